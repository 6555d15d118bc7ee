use crate::{event::*, plugin::*};
use anyhow::Result;

/// Keeps bots, including this one, from running commands
pub struct IgnoreBots;

#[serenity::async_trait]
impl Plugin for IgnoreBots {
    fn name(&self) -> &'static str {
        "ignore_bots"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        None
    }

    async fn handle(&self, _ctx: &Context, event: &Event) -> Result<EventHandled> {
        match event {
            Event::Message(msg) if msg.author.bot => Ok(EventHandled::Yes),
            _ => Ok(EventHandled::No),
        }
    }
}
