//! Dispatches incoming commands to plugins and translates failures.

use crate::registry::PluginRegistry;
use crate::types::Reply;
use std::sync::Arc;
use tracing::{error, info};

/// Runs one plugin invocation per incoming command.
///
/// Guarantees a non-crashing outcome: every plugin failure is logged with
/// its underlying cause and converted to the stable user-facing message
/// for its failure class. Nothing propagates to the host framework.
pub struct Dispatcher {
    registry: Arc<PluginRegistry>,
}

impl Dispatcher {
    /// Create a new dispatcher.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// Handle one raw message.
    ///
    /// Returns `None` when no plugin matches or when the plugin chose to
    /// suppress its output.
    pub async fn dispatch(&self, text: &str, sender: &str) -> Option<Reply> {
        let plugin = self.registry.find(text)?;
        let msg = PluginRegistry::command_message(plugin.as_ref(), text, sender);

        info!(plugin = %plugin.name(), "Executing plugin");
        match plugin.execute(&msg).await {
            Ok(Reply::Empty) => {
                info!(plugin = %plugin.name(), "Plugin suppressed output");
                None
            }
            Ok(reply) => Some(reply),
            Err(e) => {
                error!(plugin = %plugin.name(), error = %e, "Plugin invocation failed");
                Some(Reply::Text(e.user_message()))
            }
        }
    }
}
