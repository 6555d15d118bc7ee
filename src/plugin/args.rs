use crate::{
    args::{get_detailed_args, Argument, ArgumentOptions, QuoteSections},
    event::*,
    message::get_args_content,
    plugin::*,
};
use anyhow::Result;
use std::fmt::Write;

/// Discord refuses messages with more characters
const MAX_REPLY_LEN: usize = 2000;

/// Shows how the bot would split the rest of the message into arguments
pub struct Args;

#[derive(Default)]
struct Flags<'a> {
    /// The flags as typed, to strip them from the content
    raw: Vec<&'a str>,
    quote_sections: Option<QuoteSections>,
    show_quotes: bool,
    detailed: bool,
}

impl<'a> Flags<'a> {
    /// Collect flags from the start of the argument content.  The first word which isn't a known
    /// flag ends the flags.
    fn parse(args_content: &'a str) -> Self {
        let mut flags = Self::default();

        for word in args_content.split_whitespace() {
            match word {
                "--flexible" => flags.quote_sections = Some(QuoteSections::Flexible),
                "--strict" => flags.quote_sections = Some(QuoteSections::Strict),
                "--show-quotes" => flags.show_quotes = true,
                "--detailed" => flags.detailed = true,
                _ => break,
            }
            flags.raw.push(word);
        }

        flags
    }

    fn apply(&self, mut options: ArgumentOptions) -> ArgumentOptions {
        if self.quote_sections.is_some() {
            options.quote_sections = self.quote_sections;
        }
        options.show_quote_characters |= self.show_quotes;
        options
    }
}

#[serenity::async_trait]
impl Plugin for Args {
    fn name(&self) -> &'static str {
        "args"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        Some(format!(
            "{}{} [--flexible|--strict] [--show-quotes] [--detailed] <text> - show how <text> is split into arguments",
            ctx.display_prefix().await,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, cmd)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let flags = Flags::parse(&cmd.args_content);
        let options = flags.apply(ctx.argument_options().await);
        let content = get_args_content(&msg.content, &cmd.prefix, &cmd.command, &flags.raw);
        let args = get_detailed_args(&content, &options);

        let reply = format_reply(&content, &args, &options, flags.detailed)?;
        msg.reply(ctx.cache_http, reply).await?;
        Ok(EventHandled::Yes)
    }
}

fn format_reply(
    content: &str,
    args: &[Argument],
    options: &ArgumentOptions,
    detailed: bool,
) -> Result<String> {
    if args.is_empty() {
        let reason = if options.quote_sections == Some(QuoteSections::Strict) && !content.is_empty()
        {
            "Rejected: strict mode only allows quoted sections separated by spaces"
        } else {
            "No arguments"
        };
        return Ok(reason.to_owned());
    }

    let mut reply = String::new();
    if detailed {
        writeln!(reply, "```json")?;
        writeln!(reply, "{}", serde_json::to_string_pretty(args)?)?;
        writeln!(reply, "```")?;
    } else {
        for (i, arg) in args.iter().enumerate() {
            writeln!(reply, "{}: {:?}", i, arg.argument)?;
        }
    }

    if reply.chars().count() > MAX_REPLY_LEN {
        return Ok(format!("{} arguments, too long to show", args.len()));
    }
    Ok(reply)
}
