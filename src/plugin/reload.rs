use crate::helper::MessageHelper;
use crate::{event::*, log_internal, plugin::*};
use anyhow::Result;

pub struct Reload;

#[serenity::async_trait]
impl Plugin for Reload {
    fn name(&self) -> &'static str {
        "reload"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        Some(format!(
            "{}{} - reload config (bot owner only)",
            ctx.display_prefix().await,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        if !msg.is_from_owner(ctx).await {
            msg.reply(ctx.cache_http, "Only bot owners may reload the configuration")
                .await?;
            return Ok(EventHandled::Yes);
        }

        // Keep the old configuration if the new one doesn't load
        let response = match ctx.cfg.write().await.reload().await {
            Ok(()) => {
                log_internal!("Configuration reloaded by {}", msg.author.name);
                "Configuration reloaded successfully".to_owned()
            }
            Err(err) => format!("Could not reload configuration: {:#}", err),
        };

        msg.reply(ctx.cache_http, response).await?;
        Ok(EventHandled::Yes)
    }
}
