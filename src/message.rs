//! Recognizes `<prefix><command> <args...>` in message content and hands the rest to the
//! argument parser.

use crate::args::{get_args, get_detailed_args, Argument, ArgumentOptions};

/// Strips the first occurrence of the prefix, the command and then each extra token from the
/// content, then trims what's left.
///
/// Occurrences are not anchored to the start of the content.
pub fn get_args_content(
    content: &str,
    prefix: &str,
    command: &str,
    extra_tokens_to_strip: &[&str],
) -> String {
    let mut args_content = content.replacen(prefix, "", 1).replacen(command, "", 1);
    for token in extra_tokens_to_strip {
        args_content = args_content.replacen(token, "", 1);
    }
    args_content.trim().to_owned()
}

/// A message addressed to the bot as a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMessage {
    pub prefix: String,
    pub command: String,
    /// Everything after the command word
    pub args_content: String,
    pub args: Vec<String>,
}

impl CommandMessage {
    /// Returns `None` if no prefix matches, or nothing follows the prefix.
    ///
    /// When several prefixes match, the longest wins, e.g. `;;` over `;`.
    pub fn parse<S: AsRef<str>>(
        content: &str,
        prefixes: &[S],
        options: &ArgumentOptions,
    ) -> Option<Self> {
        let prefix = prefixes
            .iter()
            .map(|prefix| prefix.as_ref())
            .filter(|prefix| !prefix.is_empty() && content.starts_with(prefix))
            .max_by_key(|prefix| prefix.len())?;

        let command = content[prefix.len()..].split_whitespace().next()?;
        let args_content = get_args_content(content, prefix, command, &[]);
        let args = get_args(&args_content, options);

        Some(Self {
            prefix: prefix.to_owned(),
            command: command.to_owned(),
            args_content,
            args,
        })
    }

    pub fn detailed_args(&self, options: &ArgumentOptions) -> Vec<Argument> {
        get_detailed_args(&self.args_content, options)
    }
}
