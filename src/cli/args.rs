//! cli::args
//!
//! The argument sequence: a position-aware, lazily split view over raw
//! tokens.
//!
//! # Design
//!
//! [`Arguments`] owns the tokens; an [`ArgCursor`] is an immutable view of
//! one position. Advancing returns a new cursor and never mutates prior
//! positions. Whether a position's token is split as an option (`--key`,
//! `--key=value`) is decided when the cursor is created: `advance(false)`
//! produces a position whose token is a plain string, and once splitting is
//! disabled it stays disabled for every later position of that traversal.

/// The literal token that disables option splitting for all later tokens.
pub const END_OPTIONS: &str = "--";

/// An ordered raw token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    tokens: Vec<String>,
}

impl Arguments {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Split an interactive line into whitespace-delimited tokens.
    ///
    /// No quoting: interactive input has no shell in front of it and this
    /// layer does not emulate one.
    pub fn from_line(line: &str) -> Self {
        Self::new(line.split_whitespace().map(str::to_string).collect())
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Cursor at the first position, with option splitting enabled.
    pub fn start(&self) -> ArgCursor<'_> {
        ArgCursor {
            arguments: self,
            index: 0,
            options: true,
        }
    }
}

/// An immutable view of one position in an [`Arguments`] sequence.
///
/// The position one past the last token is the end sentinel.
#[derive(Debug, Clone, Copy)]
pub struct ArgCursor<'a> {
    arguments: &'a Arguments,
    index: usize,
    options: bool,
}

impl<'a> ArgCursor<'a> {
    /// Whether this is the end sentinel.
    pub fn is_end(&self) -> bool {
        self.index >= self.arguments.tokens.len()
    }

    /// Raw token at this position; `None` at the end sentinel.
    pub fn raw(&self) -> Option<&'a str> {
        self.arguments.tokens.get(self.index).map(String::as_str)
    }

    /// Whether this position's token is split as an option.
    fn splits(&self) -> bool {
        self.options
            && self
                .raw()
                .is_some_and(|t| t.len() > 1 && t.starts_with('-') && t != END_OPTIONS)
    }

    /// Key part of the token: the text before `=` for option-split tokens,
    /// the whole token otherwise.
    pub fn key(&self) -> Option<&'a str> {
        let raw = self.raw()?;
        if self.splits() {
            Some(raw.split_once('=').map_or(raw, |(key, _)| key))
        } else {
            Some(raw)
        }
    }

    /// Inline value (`--key=value`); absent without the `=` form.
    pub fn value(&self) -> Option<&'a str> {
        if self.splits() {
            self.raw()?.split_once('=').map(|(_, value)| value)
        } else {
            None
        }
    }

    /// Whether this token is literally the end-of-options marker.
    ///
    /// Always false once option splitting is disabled: a later `--` is a
    /// plain positional string.
    pub fn is_end_options(&self) -> bool {
        self.options && self.raw() == Some(END_OPTIONS)
    }

    /// The next position. `options_enabled` controls whether the resulting
    /// position splits its token; splitting can only ever be turned off.
    pub fn advance(self, options_enabled: bool) -> ArgCursor<'a> {
        ArgCursor {
            arguments: self.arguments,
            index: self.index + 1,
            options: self.options && options_enabled,
        }
    }

    /// Remaining raw tokens from this position on (diagnostics).
    pub fn rest(&self) -> &'a [String] {
        let tokens = self.arguments.tokens();
        &tokens[self.index.min(tokens.len())..]
    }
}
