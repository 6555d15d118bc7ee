//! Chat-bot command framework for Discord.
//!
//! The [`args`] module splits command text into arguments, [`message`] recognizes commands in
//! message content, and the rest connects both to Discord through an ordered list of plugins.

pub mod args;
pub mod config;
pub mod context;
pub mod event;
pub mod handler;
mod helper;
pub mod logging;
pub mod message;
mod plugin;
