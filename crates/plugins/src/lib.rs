//! Chat-bot command plugins.
//!
//! Every plugin is a small fetch-parse-format pipeline behind the
//! [`Plugin`] trait: match a command trigger, call an upstream HTTP API,
//! pull the interesting fields out of the response, and render a reply.
//! Failures are classified by stage so the dispatcher can hand the user
//! a stable message for each class.
//!
//! Hosts load a [`PluginsConfig`] from the environment, build a registry
//! with [`builtin::build_registry`], and route incoming messages through
//! a [`Dispatcher`].

pub mod builtin;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod types;

pub use config::PluginsConfig;
pub use dispatcher::Dispatcher;
pub use error::PluginError;
pub use registry::PluginRegistry;
pub use types::{
    AttachmentField, ChatMessage, CommandMessage, MessageAttachment, Plugin, Reply,
};
