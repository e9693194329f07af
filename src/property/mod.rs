//! property
//!
//! Typed, named parameter slots bound during argument matching.
//!
//! # Design
//!
//! A [`PropertySpec`] describes one slot of a commandlet grammar: its name
//! (the option key for named options, a plain word for positional values),
//! an optional short alias, the binding behavior as a closed [`PropertyKind`]
//! variant, and the `required` / `multi_valued` / `end_options` modifiers.
//!
//! Specs are immutable grammar. The values bound during a match attempt live
//! in a separate [`Bindings`] created fresh per attempt, so a rejected
//! candidate never leaves residue behind (see `cli::matcher`).
//!
//! # Variants
//!
//! - `Value(ValueType)` - named option or positional value with a typed value
//! - `Flag` - boolean set true by key presence alone, consumes no value token
//! - `Bool` - named option whose separate/inline value must parse as boolean
//! - `Keyword` - positional literal that must match exactly (subcommand
//!   discriminator); a mismatch always rejects the whole commandlet

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::log::LogLevel;
use crate::tool;

/// Failure to convert a raw token into a property's declared type.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Value does not parse as the declared type.
    #[error("invalid value '{value}': expected {expected}")]
    InvalidValue {
        /// The offending raw token.
        value: String,
        /// Human-readable description of the expected type.
        expected: &'static str,
    },

    /// Value names a tool this build does not know.
    #[error("unknown tool '{0}'")]
    UnknownTool(String),
}

/// Declared value type of a [`PropertyKind::Value`] slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Arbitrary non-empty string.
    Str,
    /// Filesystem path.
    Path,
    /// Name of a known tool (validated against the tool table).
    Tool,
    /// Version identifier (dotted alphanumerics, or `latest`).
    Version,
    /// Log level name.
    LogLevel,
}

impl ValueType {
    /// Convert a raw token into a [`BoundValue`] of this type.
    pub fn parse(&self, raw: &str) -> Result<BoundValue, ConvertError> {
        match self {
            ValueType::Str => {
                if raw.is_empty() {
                    return Err(ConvertError::InvalidValue {
                        value: raw.to_string(),
                        expected: "non-empty string",
                    });
                }
                Ok(BoundValue::Str(raw.to_string()))
            }
            ValueType::Path => {
                if raw.is_empty() {
                    return Err(ConvertError::InvalidValue {
                        value: raw.to_string(),
                        expected: "path",
                    });
                }
                Ok(BoundValue::Path(PathBuf::from(raw)))
            }
            ValueType::Tool => {
                if tool::is_known(raw) {
                    Ok(BoundValue::Str(raw.to_string()))
                } else {
                    Err(ConvertError::UnknownTool(raw.to_string()))
                }
            }
            ValueType::Version => {
                let valid = !raw.is_empty()
                    && raw
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+'));
                if valid {
                    Ok(BoundValue::Str(raw.to_string()))
                } else {
                    Err(ConvertError::InvalidValue {
                        value: raw.to_string(),
                        expected: "version identifier",
                    })
                }
            }
            ValueType::LogLevel => raw
                .parse::<LogLevel>()
                .map(BoundValue::Level)
                .map_err(|_| ConvertError::InvalidValue {
                    value: raw.to_string(),
                    expected: "log level (trace|debug|info|warning|error)",
                }),
        }
    }
}

/// Binding behavior of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Typed value, supplied inline (`--key=v`), separately (`--key v`), or
    /// positionally.
    Value(ValueType),
    /// Present-or-absent flag; never consumes a value token.
    Flag,
    /// Named option whose value must be `true` or `false`.
    Bool,
    /// Positional literal matched by exact string equality.
    Keyword,
}

/// One slot of a commandlet grammar.
#[derive(Debug, Clone)]
pub struct PropertySpec {
    name: String,
    alias: Option<String>,
    kind: PropertyKind,
    required: bool,
    multi_valued: bool,
    end_options: bool,
}

impl PropertySpec {
    /// Create a spec with the given name and kind; optional, single-valued.
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            alias: None,
            kind,
            required: false,
            multi_valued: false,
            end_options: false,
        }
    }

    /// Shorthand for a required spec.
    pub fn required(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self::new(name, kind).with_required(true)
    }

    /// Shorthand for a positional keyword literal (always required).
    pub fn keyword(literal: impl Into<String>) -> Self {
        Self::new(literal, PropertyKind::Keyword).with_required(true)
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_multi_valued(mut self, multi: bool) -> Self {
        self.multi_valued = multi;
        self
    }

    /// Mark this option as also demarcating end-of-options: every token after
    /// its value is treated as a plain positional string.
    pub fn with_end_options(mut self, end_options: bool) -> Self {
        self.end_options = end_options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_multi_valued(&self) -> bool {
        self.multi_valued
    }

    pub fn is_end_options(&self) -> bool {
        self.end_options
    }

    /// Whether a keyword slot matches the given token (exact equality).
    pub fn matches_keyword(&self, token: &str) -> bool {
        self.kind == PropertyKind::Keyword && self.name == token
    }

    /// Bind a raw token into `bindings` according to this spec's kind.
    ///
    /// Multi-valued slots append; single-valued slots replace. `Flag` and
    /// `Keyword` slots ignore `raw` and bind `true`.
    pub fn bind(&self, raw: &str, bindings: &mut Bindings) -> Result<(), ConvertError> {
        match self.kind {
            PropertyKind::Flag | PropertyKind::Keyword => {
                bindings.set(&self.name, BoundValue::Bool(true));
                Ok(())
            }
            PropertyKind::Bool => {
                let value = match raw {
                    "true" => true,
                    "false" => false,
                    _ => {
                        return Err(ConvertError::InvalidValue {
                            value: raw.to_string(),
                            expected: "boolean (true|false)",
                        })
                    }
                };
                bindings.set(&self.name, BoundValue::Bool(value));
                Ok(())
            }
            PropertyKind::Value(value_type) => {
                let value = value_type.parse(raw)?;
                if self.multi_valued {
                    bindings.append(&self.name, raw.to_string());
                } else {
                    bindings.set(&self.name, value);
                }
                Ok(())
            }
        }
    }
}

/// A value bound to a property during one match attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    Str(String),
    Path(PathBuf),
    Bool(bool),
    Level(LogLevel),
    List(Vec<String>),
}

/// Per-attempt property bindings, keyed by property name.
///
/// Created empty for every match attempt, discarded if the attempt fails,
/// and handed to `validate`/`run` if it succeeds.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<String, BoundValue>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any value is bound for `name`.
    pub fn is_bound(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn set(&mut self, name: &str, value: BoundValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Append to a multi-valued slot, creating the list on first use.
    pub fn append(&mut self, name: &str, value: String) {
        match self.values.get_mut(name) {
            Some(BoundValue::List(items)) => items.push(value),
            _ => {
                self.values
                    .insert(name.to_string(), BoundValue::List(vec![value]));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.values.get(name)
    }

    /// Bound string value, if any.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(BoundValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Bound path value, if any.
    pub fn get_path(&self, name: &str) -> Option<&PathBuf> {
        match self.values.get(name) {
            Some(BoundValue::Path(p)) => Some(p),
            _ => None,
        }
    }

    /// Flag/keyword/bool state; unbound reads as false.
    pub fn get_flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(BoundValue::Bool(true)))
    }

    /// Bound log level, if any.
    pub fn get_log_level(&self, name: &str) -> Option<LogLevel> {
        match self.values.get(name) {
            Some(BoundValue::Level(level)) => Some(*level),
            _ => None,
        }
    }

    /// Bound list values; empty slice if unbound.
    pub fn get_list(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(BoundValue::List(items)) => items,
            _ => &[],
        }
    }
}
