use crate::{event::*, plugin::*};
use anyhow::Result;

/// Lists every command along with how its arguments are split
pub struct Help;

#[serenity::async_trait]
impl Plugin for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        Some(format!(
            "{}{} - show this help message",
            ctx.display_prefix().await,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let mut usages = Vec::new();
        for plugin in crate::plugin::plugins() {
            if let Some(usage) = plugin.usage(ctx).await {
                usages.push(usage);
            }
        }

        let cfg = ctx.cfg.read().await;
        let reply = format_help(&cfg.general.command_prefixes, &usages);
        drop(cfg);

        msg.reply(ctx.cache_http, reply).await?;
        Ok(EventHandled::Yes)
    }
}

fn format_help(prefixes: &[String], usages: &[String]) -> String {
    let prefixes: Vec<&str> = prefixes
        .iter()
        .map(String::as_str)
        .filter(|prefix| !prefix.is_empty())
        .collect();

    let mut reply = String::from("```\n");
    reply.push_str(&format!("Prefixes: {}\n", prefixes.join(" ")));
    reply.push_str("Commands:\n");
    for usage in usages {
        reply.push_str(usage);
        reply.push('\n');
    }
    reply.push_str("\nWrap an argument in \"quotes\" to keep its spaces.\n");
    reply.push_str("```\n");
    reply
}
