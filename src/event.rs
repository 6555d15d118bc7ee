//! Serenity delivers Discord events as callbacks, which do not mesh well with the ordered plugin
//! list.  The handler translates each callback into an `Event` which is offered to each plugin in
//! turn.

use crate::{context::Context, log_error, message::CommandMessage};
use serenity::all::{Message, Ready};

/// A Discord event
pub enum Event {
    Ready(Ready),
    Message(Message),
}

pub enum EventHandled {
    Yes,
    No,
}

impl Event {
    /// Offer the event to every plugin, in order, until one consumes it.
    pub async fn handle(self, ctx: Context<'_>) {
        for plugin in crate::plugin::plugins() {
            match plugin.handle(&ctx, &self).await {
                Ok(EventHandled::Yes) => return,
                Ok(EventHandled::No) => continue,
                Err(err) => log_error!("Error in plugin {}: {:#}", plugin.name(), err),
            }
        }
    }

    /// Parse a message event as a bot command, e.g. `;cmd foo "bar baz"`.
    pub async fn command(&self, ctx: &Context<'_>) -> Option<(&Message, CommandMessage)> {
        let Event::Message(msg) = self else {
            return None;
        };

        let prefixes = ctx.prefixes().await;
        let options = ctx.argument_options().await;
        CommandMessage::parse(&msg.content, &prefixes, &options).map(|cmd| (msg, cmd))
    }

    /// Like `command`, but only if the command word is `cmd`.
    pub async fn is_bot_cmd(
        &self,
        ctx: &Context<'_>,
        cmd: &str,
    ) -> Option<(&Message, CommandMessage)> {
        self.command(ctx)
            .await
            .filter(|(_, parsed)| parsed.command == cmd)
    }
}
