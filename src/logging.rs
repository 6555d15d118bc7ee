//! Logging to the terminal with colors

use crate::message::CommandMessage;
use serenity::all::Http;
use std::borrow::Cow;
use std::io::IsTerminal;
use std::sync::{Arc, LazyLock};

const DEFAULT: &str = "\x1b[0m";
const FG_BLUE: &str = "\x1b[38;5;33m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GRAY: &str = "\x1b[90m";
const FG_GREEN: &str = "\x1b[32m";
const FG_MAGENTA: &str = "\x1b[35m";
const FG_RED: &str = "\x1b[31m";
const FG_YELLOW: &str = "\x1b[33m";

pub enum Color {
    Default,
    Event,
    Internal,
    Error,
    User,
    Channel,
    Guild,
    Command,
    Glue,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // Cached, stdout won't stop being a terminal mid-run
        static STDOUT_IS_TERMINAL: LazyLock<bool> =
            LazyLock::new(|| std::io::stdout().is_terminal());

        if !*STDOUT_IS_TERMINAL {
            return Ok(());
        }

        f.write_str(match self {
            Color::Default => DEFAULT,
            Color::Event => FG_YELLOW,
            Color::Internal => FG_MAGENTA,
            Color::Error => FG_RED,
            Color::User => FG_GREEN,
            Color::Channel => FG_CYAN,
            Color::Guild => FG_BLUE,
            Color::Command => FG_MAGENTA,
            Color::Glue => FG_GRAY,
        })
    }
}

/// Print a line prefixed with a colored marker.  Use the `log_*` macros instead.
#[doc(hidden)]
#[macro_export]
macro_rules! log_marked {
    ($color:ident, $marker:literal, $fmtstr:expr $(, $args:expr)* $(,)?) => {{
        println!(
            concat!("{}", $marker, "{} ", $fmtstr),
            $crate::logging::Color::$color,
            $crate::logging::Color::Default
            $(, $args)*
        )
    }};
}

/// Something happened on Discord
#[macro_export]
macro_rules! log_event {
    ($($tt:tt)*) => {
        $crate::log_marked!(Event, "*", $($tt)*)
    };
}

/// Something happened within the bot itself
#[macro_export]
macro_rules! log_internal {
    ($($tt:tt)*) => {
        $crate::log_marked!(Internal, "+", $($tt)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($tt:tt)*) => {
        $crate::log_marked!(Error, "!", $($tt)*)
    };
}

pub trait PrintColor {
    fn color(&self) -> String;
}

#[serenity::async_trait]
pub trait AsyncPrintColor {
    async fn color(&self, http: &Arc<Http>) -> String;
}

// Field separator
pub struct Glue;
impl PrintColor for Glue {
    fn color(&self) -> String {
        format!("{}{}{}", Color::Glue, ":", Color::Default)
    }
}

impl PrintColor for serenity::all::CurrentUser {
    fn color(&self) -> String {
        format!("{}{}{}", Color::User, self.name, Color::Default)
    }
}

impl PrintColor for serenity::all::User {
    fn color(&self) -> String {
        format!("{}{}{}", Color::User, self.name, Color::Default)
    }
}

/// `prefix+command [arg, ...]`
impl PrintColor for CommandMessage {
    fn color(&self) -> String {
        format!(
            "{}{}{}{} {:?}",
            Color::Command,
            self.prefix,
            self.command,
            Color::Default,
            self.args
        )
    }
}

#[serenity::async_trait]
impl AsyncPrintColor for serenity::all::ChannelId {
    async fn color(&self, http: &Arc<Http>) -> String {
        let name = match self.name(http).await {
            Ok(name) => Cow::Owned(name),
            Err(_) => Cow::Borrowed("<unknown-channel>"),
        };

        format!("{}{}{}", Color::Channel, name, Color::Default)
    }
}

#[serenity::async_trait]
impl AsyncPrintColor for Option<serenity::all::GuildId> {
    async fn color(&self, http: &Arc<Http>) -> String {
        let name = match self {
            Some(guild_id) => match guild_id.to_partial_guild(http).await {
                Ok(guild) => Cow::Owned(guild.name),
                Err(_) => Cow::Borrowed("<unknown-guild>"),
            },
            None => Cow::Borrowed("<direct-message>"),
        };

        format!("{}{}{}", Color::Guild, name, Color::Default)
    }
}
