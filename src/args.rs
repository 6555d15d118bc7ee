//! Splits a command's argument text into individual arguments.
//!
//! Arguments are separated by spaces.  A section wrapped in quotes (`"`, or the smart quote pair
//! `“` `”`) is a single argument, as is a codeblock wrapped in backticks.  A backslash disarms the
//! quote or backtick immediately after it.  Text touching a closing quote belongs to the quoted
//! argument, e.g. `"a b"c` is the single argument `a bc`.

use serde::{Deserialize, Serialize};

const BACKSLASH: char = '\\';
const BACKTICK: char = '`';
const QUOTE: char = '"';
const LEFT_SMART_QUOTE: char = '“';
const RIGHT_SMART_QUOTE: char = '”';

/// A single parsed argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    /// Argument text.  Trimmed, unless it was wrapped in quotes.
    pub argument: String,
    /// Argument text before trimming
    pub untrimmed_argument: String,
    pub start_quote_char: Option<char>,
    pub end_quote_char: Option<char>,
    pub wrapped_in_quotes: bool,
    /// Only set in strict mode, for a quote that was still open at the end of the content
    pub non_closed_quote_section: bool,
}

/// How quoted sections interact with the text around them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSections {
    /// Everything between two quoted sections is one argument, rather than one per word.
    Flexible,
    /// Only quoted sections are allowed.  Anything else outside quotes rejects the whole content.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgumentOptions {
    /// Keep the quote characters in the argument text
    pub show_quote_characters: bool,
    /// `None` splits on every space outside of quotes
    pub quote_sections: Option<QuoteSections>,
}

impl ArgumentOptions {
    pub fn flexible() -> Self {
        Self {
            quote_sections: Some(QuoteSections::Flexible),
            ..Default::default()
        }
    }

    pub fn strict() -> Self {
        Self {
            quote_sections: Some(QuoteSections::Strict),
            ..Default::default()
        }
    }

    fn is_strict(&self) -> bool {
        self.quote_sections == Some(QuoteSections::Strict)
    }

    fn is_flexible(&self) -> bool {
        self.quote_sections == Some(QuoteSections::Flexible)
    }
}

/// Split content into arguments, keeping quoting details for each.
///
/// In strict mode, content that fails validation produces no arguments at all.
pub fn get_detailed_args(content: &str, options: &ArgumentOptions) -> Vec<Argument> {
    let mut scanner = Scanner::new(options);

    let mut previous = None;
    for c in content.chars() {
        let escaped = previous == Some(BACKSLASH);
        if scanner.feed(c, escaped).is_err() {
            return Vec::new();
        }
        previous = Some(c);
    }

    let args = scanner.finish();
    if options.is_strict() && args.iter().any(|arg| arg.non_closed_quote_section) {
        return Vec::new();
    }
    args
}

/// Split content into argument strings
pub fn get_args(content: &str, options: &ArgumentOptions) -> Vec<String> {
    get_detailed_args(content, options)
        .into_iter()
        .map(|arg| arg.argument)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Unquoted,
    /// Holds the character which opened the quoted section
    Quoted(char),
}

/// Unquoted content in strict mode
struct Rejected;

struct Scanner<'a> {
    options: &'a ArgumentOptions,
    state: ParseState,
    inside_code_block: bool,
    buffer: String,
    /// Start and end quote characters while the buffer holds a closed quoted section.  Text
    /// touching the closing quote is added to the same argument until the next space.
    closed_quote: Option<(char, char)>,
    /// Flexible mode: the pending unquoted text comes right after a quoted section
    after_quoted_section: bool,
    /// Flexible mode: buffer offsets of the spaces between words of the pending unquoted text
    word_breaks: Vec<usize>,
    args: Vec<Argument>,
}

impl<'a> Scanner<'a> {
    fn new(options: &'a ArgumentOptions) -> Self {
        Self {
            options,
            state: ParseState::Unquoted,
            inside_code_block: false,
            buffer: String::new(),
            closed_quote: None,
            after_quoted_section: false,
            word_breaks: Vec::new(),
            args: Vec::new(),
        }
    }

    /// Whether `c` opens or closes a quoted section at this point of the scan.
    ///
    /// Smart quotes must pair up `“` ... `”`, and `"` only closes a section it opened.  Anything
    /// else is plain text.
    fn is_quote_transition(&self, c: char, escaped: bool) -> bool {
        if escaped || self.inside_code_block {
            return false;
        }

        match (c, self.state) {
            (QUOTE, ParseState::Unquoted) => true,
            (QUOTE, ParseState::Quoted(open)) => open == QUOTE,
            (LEFT_SMART_QUOTE, ParseState::Unquoted) => true,
            (RIGHT_SMART_QUOTE, ParseState::Quoted(open)) => open == LEFT_SMART_QUOTE,
            _ => false,
        }
    }

    fn feed(&mut self, c: char, escaped: bool) -> Result<(), Rejected> {
        if c == BACKTICK && !escaped {
            self.inside_code_block = !self.inside_code_block;
        }

        let transition = self.is_quote_transition(c, escaped);

        match self.state {
            ParseState::Unquoted if transition => {
                self.flush_before_quote();
                self.state = ParseState::Quoted(c);
                if self.options.show_quote_characters {
                    self.buffer.push(c);
                }
            }
            ParseState::Unquoted if c == ' ' && !self.inside_code_block => {
                if self.closed_quote.is_some() {
                    self.flush_closed_quote();
                    self.after_quoted_section = true;
                }

                if self.options.is_flexible() {
                    self.word_breaks.push(self.buffer.len());
                    self.buffer.push(c);
                } else {
                    self.flush_words();
                }
            }
            ParseState::Unquoted => {
                if self.options.is_strict() {
                    return Err(Rejected);
                }
                self.buffer.push(c);
            }
            ParseState::Quoted(open) if transition => {
                if self.options.show_quote_characters {
                    self.buffer.push(c);
                }
                self.closed_quote = Some((open, c));
                self.state = ParseState::Unquoted;
            }
            ParseState::Quoted(_) => self.buffer.push(c),
        }

        Ok(())
    }

    /// Emits whatever is pending before a quoted section starts.
    ///
    /// In flexible mode, text between two quoted sections is a single argument.
    fn flush_before_quote(&mut self) {
        if self.closed_quote.is_some() {
            self.flush_closed_quote();
        } else if self.options.is_flexible() && self.after_quoted_section {
            let untrimmed_argument = std::mem::take(&mut self.buffer);
            self.word_breaks.clear();
            self.push_unquoted(&untrimmed_argument);
        } else {
            self.flush_words();
        }
        self.after_quoted_section = false;
    }

    /// Emits pending unquoted text, one argument per word.
    fn flush_words(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);
        let breaks = std::mem::take(&mut self.word_breaks);

        let mut start = 0;
        for end in breaks.into_iter().chain(std::iter::once(buffer.len())) {
            self.push_unquoted(&buffer[start..end]);
            start = end;
        }
    }

    /// Skips text which is only whitespace
    fn push_unquoted(&mut self, untrimmed_argument: &str) {
        let argument = untrimmed_argument.trim();
        if argument.is_empty() {
            return;
        }

        self.args.push(Argument {
            argument: argument.to_owned(),
            untrimmed_argument: untrimmed_argument.to_owned(),
            start_quote_char: None,
            end_quote_char: None,
            wrapped_in_quotes: false,
            non_closed_quote_section: false,
        });
    }

    fn flush_closed_quote(&mut self) {
        if let Some((start_quote_char, end_quote_char)) = self.closed_quote.take() {
            self.flush_quoted(start_quote_char, Some(end_quote_char));
        }
    }

    /// Emits a quoted section, even when empty.  Quoted text is never trimmed.
    fn flush_quoted(&mut self, start_quote_char: char, end_quote_char: Option<char>) {
        let untrimmed_argument = std::mem::take(&mut self.buffer);
        let non_closed_quote_section = self.options.is_strict() && end_quote_char.is_none();

        self.args.push(Argument {
            argument: untrimmed_argument.clone(),
            untrimmed_argument,
            start_quote_char: Some(start_quote_char),
            end_quote_char,
            wrapped_in_quotes: true,
            non_closed_quote_section,
        });
    }

    fn finish(mut self) -> Vec<Argument> {
        match self.state {
            ParseState::Unquoted if self.closed_quote.is_some() => self.flush_closed_quote(),
            ParseState::Unquoted => self.flush_words(),
            ParseState::Quoted(open) => self.flush_quoted(open, None),
        }
        self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(content: &str) -> Vec<String> {
        get_args(content, &ArgumentOptions::default())
    }

    fn show_quotes() -> ArgumentOptions {
        ArgumentOptions {
            show_quote_characters: true,
            ..Default::default()
        }
    }

    #[test]
    fn splits_on_spaces() {
        assert_eq!(args("arg0 arg1 arg2"), ["arg0", "arg1", "arg2"]);
    }

    #[test]
    fn ignores_outer_and_repeated_spaces() {
        assert_eq!(args("   arg0    arg1  "), ["arg0", "arg1"]);
        assert!(args("     ").is_empty());
        assert!(args("").is_empty());
    }

    #[test]
    fn quoted_sections() {
        let content = r#""arg 0" "arg 1" "arg 2""#;
        assert_eq!(args(content), ["arg 0", "arg 1", "arg 2"]);
        assert_eq!(
            get_args(content, &show_quotes()),
            [r#""arg 0""#, r#""arg 1""#, r#""arg 2""#]
        );
    }

    #[test]
    fn quoted_sections_keep_inner_whitespace() {
        assert_eq!(args(r#""  padded  " next"#), ["  padded  ", "next"]);
    }

    #[test]
    fn default_mode_splits_between_quotes() {
        assert_eq!(
            args(r#""arg 0" arg 1 "arg 2""#),
            ["arg 0", "arg", "1", "arg 2"]
        );
    }

    #[test]
    fn flexible_mode_joins_between_quotes() {
        let detailed = get_detailed_args(r#""arg 0" arg 1 "arg 2""#, &ArgumentOptions::flexible());
        let texts: Vec<&str> = detailed.iter().map(|a| a.argument.as_str()).collect();
        assert_eq!(texts, ["arg 0", "arg 1", "arg 2"]);

        assert!(!detailed[1].wrapped_in_quotes);
        assert_eq!(detailed[1].untrimmed_argument, " arg 1 ");
    }

    #[test]
    fn flexible_mode_splits_words_outside_quoted_sections() {
        let flexible = ArgumentOptions::flexible();
        assert_eq!(get_args("  a b c ", &flexible), ["a", "b", "c"]);
        assert_eq!(get_args(r#"a b "c d" e f"#, &flexible), ["a", "b", "c d", "e", "f"]);
        assert_eq!(
            get_args(r#""a" b c "d" e f "g""#, &flexible),
            ["a", "b c", "d", "e f", "g"]
        );
    }

    #[test]
    fn text_before_quote_is_separate() {
        assert_eq!(args(r#"pre"quoted text""#), ["pre", "quoted text"]);
    }

    #[test]
    fn text_touching_closing_quote_joins_it() {
        assert_eq!(args(r#""arg 0"tail next"#), ["arg 0tail", "next"]);

        let detailed = get_detailed_args(r#"“a b”c"#, &ArgumentOptions::default());
        assert_eq!(detailed.len(), 1);
        assert_eq!(detailed[0].argument, "a bc");
        assert!(detailed[0].wrapped_in_quotes);
        assert_eq!(detailed[0].start_quote_char, Some('“'));
        assert_eq!(detailed[0].end_quote_char, Some('”'));

        assert_eq!(
            get_args(r#""a b"c d"#, &show_quotes()),
            [r#""a b"c"#, "d"]
        );
    }

    #[test]
    fn text_touching_closing_quote_in_flexible_mode() {
        assert_eq!(
            get_args(r#""a"b c "d""#, &ArgumentOptions::flexible()),
            ["ab", "c", "d"]
        );
    }

    #[test]
    fn adjacent_quoted_sections_stay_separate() {
        assert_eq!(args(r#""a""b""#), ["a", "b"]);
    }

    #[test]
    fn strict_mode_rejects_text_touching_closing_quote() {
        assert!(get_detailed_args(r#""a"b"#, &ArgumentOptions::strict()).is_empty());
    }

    #[test]
    fn empty_quotes() {
        assert_eq!(args(r#""""#), [""]);
        assert_eq!(get_args(r#""""#, &ArgumentOptions::flexible()), [""]);
        assert_eq!(get_args(r#""""#, &ArgumentOptions::strict()), [""]);
        assert_eq!(args(r#"a "" b"#), ["a", "", "b"]);
    }

    #[test]
    fn strict_mode_rejects_unquoted_text() {
        let strict = ArgumentOptions::strict();
        assert!(get_detailed_args(r#""arg 0" arg 1 "args 2""#, &strict).is_empty());
        assert!(get_detailed_args("bare", &strict).is_empty());
    }

    #[test]
    fn strict_mode_accepts_quoted_sections() {
        assert_eq!(
            get_args(r#""arg 0" " arg 1" "arg 2""#, &ArgumentOptions::strict()),
            ["arg 0", " arg 1", "arg 2"]
        );
    }

    #[test]
    fn strict_mode_rejects_unterminated_quote() {
        assert!(get_detailed_args(r#""arg 0" "arg 1"#, &ArgumentOptions::strict()).is_empty());
    }

    #[test]
    fn unterminated_quote_is_best_effort() {
        let detailed = get_detailed_args(r#"a "b c"#, &ArgumentOptions::default());
        assert_eq!(detailed.len(), 2);
        assert_eq!(detailed[1].argument, "b c");
        assert!(detailed[1].wrapped_in_quotes);
        assert_eq!(detailed[1].start_quote_char, Some('"'));
        assert_eq!(detailed[1].end_quote_char, None);
        assert!(!detailed[1].non_closed_quote_section);
    }

    #[test]
    fn code_blocks_are_literal() {
        let content = r#"```this is a "test" with code blocks```"#;
        assert_eq!(args(content), [content]);
        assert_eq!(args("`a b` c"), ["`a b`", "c"]);
    }

    #[test]
    fn quoted_code_blocks() {
        assert_eq!(
            args(r#""`code "with" quotes`" after"#),
            [r#"`code "with" quotes`"#, "after"]
        );
    }

    #[test]
    fn escaped_quotes_are_text() {
        assert_eq!(args(r#"\"not quoted\""#), [r#"\"not"#, r#"quoted\""#]);
        assert_eq!(args(r#""a \" b""#), [r#"a \" b"#]);
    }

    #[test]
    fn escaped_backtick_does_not_open_code_block() {
        assert_eq!(args(r"\`a b"), [r"\`a", "b"]);
    }

    #[test]
    fn smart_quotes() {
        let detailed = get_detailed_args("“arg 0” arg1", &ArgumentOptions::default());
        assert_eq!(detailed[0].argument, "arg 0");
        assert_eq!(detailed[0].start_quote_char, Some('“'));
        assert_eq!(detailed[0].end_quote_char, Some('”'));
        assert_eq!(detailed[1].argument, "arg1");
    }

    #[test]
    fn mismatched_smart_quotes_are_text() {
        assert_eq!(
            args("“arg 0“ arg 1 but spaces” “arg 2”"),
            ["arg 0“ arg 1 but spaces", "arg 2"]
        );
    }

    #[test]
    fn stray_right_smart_quote_is_text() {
        assert_eq!(args("a” b"), ["a”", "b"]);
    }

    #[test]
    fn quote_pairs_do_not_mix() {
        assert_eq!(args(r#""a ” b" c"#), ["a ” b", "c"]);
        assert_eq!(args(r#"“a " b” c"#), [r#"a " b"#, "c"]);
    }

    #[test]
    fn show_quote_characters_with_smart_quotes() {
        assert_eq!(get_args("“a b”", &show_quotes()), ["“a b”"]);
    }

    #[test]
    fn unquoted_tokens_trim_only_outer_whitespace() {
        let detailed = get_detailed_args("a\u{2003}", &ArgumentOptions::default());
        assert_eq!(detailed[0].argument, "a");
        assert_eq!(detailed[0].untrimmed_argument, "a\u{2003}");
    }

    #[test]
    fn options_deserialize_from_toml() {
        let options: ArgumentOptions = toml::from_str(
            r#"
            show_quote_characters = true
            quote_sections = "strict"
            "#,
        )
        .unwrap();
        assert!(options.show_quote_characters);
        assert_eq!(options.quote_sections, Some(QuoteSections::Strict));

        let options: ArgumentOptions = toml::from_str("").unwrap();
        assert_eq!(options, ArgumentOptions::default());
    }
}
