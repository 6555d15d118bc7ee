use crate::{args::ArgumentOptions, config::Config};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Collection of data that is shared across events
pub struct Context<'a> {
    pub cfg: &'a RwLock<Config>,
    // Discord/Serenity context types
    pub cache: &'a Arc<serenity::all::Cache>,
    pub http: &'a Arc<serenity::all::Http>,
    pub cache_http: &'a CacheHttp,
}

/// Many Serenity functions take a `impl CacheHttp` in order to first check the cache if the item
/// is available and fall back to an http request otherwise.  The most readily available type that
/// impl's this is named very differently in a way that could be confusing, and so we alias it.
pub type CacheHttp = serenity::all::Context;

impl Context<'_> {
    /// Every prefix a command may start with, including mentions of the bot if enabled.
    pub async fn prefixes(&self) -> Vec<String> {
        let cfg = self.cfg.read().await;
        let mut prefixes = cfg.general.command_prefixes.clone();

        if cfg.general.mention_prefix {
            let my_id = self.cache.current_user().id;
            // Discord inserts a space after an autocompleted mention
            prefixes.push(format!("<@{}> ", my_id));
            prefixes.push(format!("<@!{}> ", my_id));
        }

        prefixes
    }

    /// The first configured prefix, for usage lines
    pub async fn display_prefix(&self) -> String {
        let cfg = self.cfg.read().await;
        cfg.general
            .command_prefixes
            .iter()
            .find(|prefix| !prefix.is_empty())
            .cloned()
            .unwrap_or_default()
    }

    pub async fn argument_options(&self) -> ArgumentOptions {
        self.cfg.read().await.arguments.clone()
    }
}
