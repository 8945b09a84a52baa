//! Plugin registry keyed by command trigger.

use crate::types::{CommandMessage, Plugin};
use std::sync::Arc;

/// Registry of available command plugins.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Register a plugin.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Find the plugin handling `text`, preferring the longest trigger
    /// when several match.
    pub fn find(&self, text: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins
            .iter()
            .filter(|p| p.matches(text))
            .max_by_key(|p| p.trigger().len())
            .cloned()
    }

    /// Build the command message handed to a matched plugin.
    pub fn command_message(plugin: &dyn Plugin, text: &str, sender: &str) -> CommandMessage {
        let query = text[plugin.trigger().len()..].trim().to_string();
        CommandMessage {
            original_text: text.to_string(),
            text: query,
            sender: sender.to_string(),
        }
    }

    /// List registered triggers.
    pub fn list_triggers(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.trigger()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PluginError;
    use crate::types::Reply;
    use async_trait::async_trait;

    struct MockPlugin {
        name: String,
        trigger: String,
    }

    impl MockPlugin {
        fn new(name: &str, trigger: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.into(),
                trigger: trigger.into(),
            })
        }
    }

    #[async_trait]
    impl Plugin for MockPlugin {
        fn name(&self) -> &str {
            &self.name
        }

        fn trigger(&self) -> &str {
            &self.trigger
        }

        async fn execute(&self, msg: &CommandMessage) -> Result<Reply, PluginError> {
            Ok(Reply::text(format!("{}:{}", self.name, msg.text)))
        }
    }

    #[test]
    fn test_register_and_find() {
        let mut registry = PluginRegistry::new();
        registry.register(MockPlugin::new("weather", ".weather"));

        assert!(registry.find(".weather Tokyo").is_some());
        assert!(registry.find(".stock AAPL").is_none());
    }

    #[test]
    fn test_find_prefers_longest_trigger() {
        let mut registry = PluginRegistry::new();
        registry.register(MockPlugin::new("room", ".room"));
        registry.register(MockPlugin::new("room_temp", ".room_temp"));

        let plugin = registry.find(".room_temp").unwrap();
        assert_eq!(plugin.name(), "room_temp");
    }

    #[test]
    fn test_command_message_strips_trigger() {
        let plugin = MockPlugin::new("weather", ".weather");
        let msg =
            PluginRegistry::command_message(plugin.as_ref(), ".weather  Tokyo ", "user-1");

        assert_eq!(msg.original_text, ".weather  Tokyo ");
        assert_eq!(msg.text, "Tokyo");
        assert_eq!(msg.sender, "user-1");
    }

    #[test]
    fn test_list_triggers() {
        let mut registry = PluginRegistry::new();
        registry.register(MockPlugin::new("weather", ".weather"));
        registry.register(MockPlugin::new("stock", ".stock"));

        let triggers = registry.list_triggers();
        assert_eq!(triggers, vec![".weather", ".stock"]);
    }
}
