//! cli::matcher
//!
//! Binds one argument sequence against one commandlet grammar.
//!
//! # Design
//!
//! A single forward pass with no backtracking. State is the current cursor,
//! an optional pending property (a selected option awaiting its value from
//! the next token), and the end-of-options flag. Every attempt fills a fresh
//! [`Bindings`]; a rejected candidate is dropped together with them, so
//! trying and discarding candidates never leaves observable residue.
//!
//! # Outcomes
//!
//! Conversion failures and grammar exhaustion are local: they turn into a
//! `None` verdict (required slot) or a warning (optional slot), never into a
//! thrown error. The commandlet's `validate` delivers the final verdict on a
//! structurally complete parse.

use crate::commandlet::Commandlet;
use crate::log::Logger;
use crate::property::{Bindings, BoundValue, ConvertError, PropertyKind, PropertySpec};

use super::args::ArgCursor;

/// Try to match the sequence at `start` against `commandlet`.
///
/// Returns the bindings on success, `None` if the commandlet does not match.
pub fn apply(
    start: ArgCursor<'_>,
    commandlet: &dyn Commandlet,
    log: &Logger,
) -> Option<Bindings> {
    log.trace(format!(
        "trying to match arguments against commandlet '{}'",
        commandlet.name()
    ));
    let grammar = commandlet.grammar();
    let mut bindings = Bindings::new();
    let mut positionals = grammar.positionals().iter();
    let mut pending: Option<&PropertySpec> = None;
    let mut end_options = false;
    let mut cursor = start;

    while !cursor.is_end() {
        if cursor.is_end_options() {
            end_options = true;
        } else {
            let raw = cursor.raw()?;
            if let Some(property) = pending {
                // A previously selected option takes this token as its value.
                if !bind_or_warn(property, raw, &mut bindings, commandlet, log) {
                    return None;
                }
                if !property.is_multi_valued() {
                    pending = None;
                }
            } else {
                let option = if end_options {
                    None
                } else {
                    cursor.key().and_then(|key| grammar.find_option(key))
                };
                match option {
                    Some(property) => {
                        if let Some(value) = cursor.value() {
                            if !bind_or_warn(property, value, &mut bindings, commandlet, log) {
                                return None;
                            }
                        } else if property.kind() == PropertyKind::Flag {
                            bindings.set(property.name(), BoundValue::Bool(true));
                        } else {
                            // Value arrives with the next token.
                            pending = Some(property);
                            if property.is_end_options() {
                                // The next token is still consumed as the
                                // value; only later tokens become plain.
                                end_options = true;
                            }
                        }
                    }
                    None => {
                        let Some(property) = positionals.next() else {
                            log.trace("no option or remaining value slot for token");
                            return None;
                        };
                        log.trace(format!("next value candidate is '{}'", property.name()));
                        if property.kind() == PropertyKind::Keyword {
                            if !property.matches_keyword(raw) {
                                log.trace("keyword mismatch");
                                return None;
                            }
                            bindings.set(property.name(), BoundValue::Bool(true));
                        } else {
                            if !bind_or_warn(property, raw, &mut bindings, commandlet, log) {
                                return None;
                            }
                            if property.is_multi_valued() {
                                // Stays current: following tokens keep
                                // feeding this slot.
                                pending = Some(property);
                            }
                        }
                    }
                }
            }
        }
        cursor = cursor.advance(!end_options);
    }

    if commandlet.validate(&bindings) {
        Some(bindings)
    } else {
        log.trace("validation rejected the bindings");
        None
    }
}

/// Bind `raw` into `bindings`, applying the conversion-failure policy:
/// required slot fails the attempt, optional slot logs and continues.
///
/// Returns false when the attempt must be abandoned.
fn bind_or_warn(
    property: &PropertySpec,
    raw: &str,
    bindings: &mut Bindings,
    commandlet: &dyn Commandlet,
    log: &Logger,
) -> bool {
    match property.bind(raw, bindings) {
        Ok(()) => true,
        Err(error) => {
            warn_invalid(property, raw, commandlet, &error, log);
            !property.is_required()
        }
    }
}

fn warn_invalid(
    property: &PropertySpec,
    raw: &str,
    commandlet: &dyn Commandlet,
    error: &ConvertError,
    log: &Logger,
) {
    log.warning(format!(
        "invalid argument '{}' for property '{}' of commandlet '{}': {}",
        raw,
        property.name(),
        commandlet.name(),
        error
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commandlet::{Grammar, Registry};
    use crate::context::GlobalContext;
    use crate::property::ValueType;
    use crate::cli::args::Arguments;

    /// Synthetic commandlet with an arbitrary grammar and validate hook.
    struct Probe {
        name: &'static str,
        grammar: Grammar,
        validate: fn(&Bindings) -> bool,
    }

    impl Probe {
        fn new(name: &'static str, grammar: Grammar) -> Self {
            Self {
                name,
                grammar,
                validate: |_| true,
            }
        }

        fn with_validate(mut self, validate: fn(&Bindings) -> bool) -> Self {
            self.validate = validate;
            self
        }
    }

    impl Commandlet for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn summary(&self) -> &str {
            "probe"
        }

        fn grammar(&self) -> &Grammar {
            &self.grammar
        }

        fn validate(&self, bindings: &Bindings) -> bool {
            (self.validate)(bindings)
        }

        fn run(&self, _: &mut GlobalContext, _: &Registry, _: &Bindings) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn tokens(items: &[&str]) -> Arguments {
        Arguments::new(items.iter().map(|t| t.to_string()).collect())
    }

    fn apply_probe(probe: &Probe, items: &[&str]) -> Option<Bindings> {
        let arguments = tokens(items);
        apply(arguments.start(), probe, &Logger::default())
    }

    mod positionals {
        use super::*;

        fn two_values() -> Probe {
            Probe::new(
                "pair",
                Grammar::new()
                    .positional(PropertySpec::new(
                        "first",
                        PropertyKind::Value(ValueType::Str),
                    ))
                    .positional(PropertySpec::new(
                        "second",
                        PropertyKind::Value(ValueType::Str),
                    )),
            )
        }

        #[test]
        fn bind_left_to_right() {
            let bindings = apply_probe(&two_values(), &["a", "b"]).unwrap();
            assert_eq!(bindings.get_str("first"), Some("a"));
            assert_eq!(bindings.get_str("second"), Some("b"));
        }

        #[test]
        fn fewer_tokens_than_slots_is_fine() {
            let bindings = apply_probe(&two_values(), &["a"]).unwrap();
            assert_eq!(bindings.get_str("first"), Some("a"));
            assert!(!bindings.is_bound("second"));
        }

        #[test]
        fn token_without_slot_rejects() {
            assert!(apply_probe(&two_values(), &["a", "b", "c"]).is_none());
        }

        #[test]
        fn validate_delivers_final_verdict() {
            let rejecting = two_values().with_validate(|_| false);
            assert!(apply_probe(&rejecting, &["a", "b"]).is_none());
        }
    }

    mod keywords {
        use super::*;

        fn keyworded() -> Probe {
            Probe::new(
                "install",
                Grammar::new()
                    .positional(PropertySpec::keyword("install"))
                    .positional(PropertySpec::required(
                        "tool",
                        PropertyKind::Value(ValueType::Tool),
                    )),
            )
        }

        #[test]
        fn keyword_match_binds_and_continues() {
            let bindings = apply_probe(&keyworded(), &["install", "gradle"]).unwrap();
            assert!(bindings.get_flag("install"));
            assert_eq!(bindings.get_str("tool"), Some("gradle"));
        }

        #[test]
        fn keyword_mismatch_is_fatal() {
            assert!(apply_probe(&keyworded(), &["remove", "gradle"]).is_none());
        }

        #[test]
        fn missing_required_positional_fails_validation() {
            assert!(apply_probe(&keyworded(), &["install"]).is_none());
        }
    }

    mod conversion {
        use super::*;

        #[test]
        fn required_conversion_failure_rejects() {
            let probe = Probe::new(
                "needs-tool",
                Grammar::new().positional(PropertySpec::required(
                    "tool",
                    PropertyKind::Value(ValueType::Tool),
                )),
            );
            assert!(apply_probe(&probe, &["zzz-unknown"]).is_none());
        }

        #[test]
        fn optional_conversion_failure_continues() {
            let probe = Probe::new(
                "loose",
                Grammar::new()
                    .positional(PropertySpec::new(
                        "tool",
                        PropertyKind::Value(ValueType::Tool),
                    ))
                    .positional(PropertySpec::new(
                        "note",
                        PropertyKind::Value(ValueType::Str),
                    )),
            );
            // "zzz-unknown" fails conversion on the optional tool slot; the
            // next token still binds to the next slot.
            let bindings = apply_probe(&probe, &["zzz-unknown", "hello"]).unwrap();
            assert!(!bindings.is_bound("tool"));
            assert_eq!(bindings.get_str("note"), Some("hello"));
        }
    }

    mod options {
        use super::*;

        fn optioned() -> Probe {
            Probe::new(
                "opts",
                Grammar::new()
                    .positional(PropertySpec::new(
                        "value",
                        PropertyKind::Value(ValueType::Str),
                    ))
                    .option(PropertySpec::new(
                        "--version",
                        PropertyKind::Value(ValueType::Version),
                    ))
                    .option(PropertySpec::new("--force", PropertyKind::Flag))
                    .option(PropertySpec::new("--color", PropertyKind::Bool)),
            )
        }

        #[test]
        fn inline_value_binds_without_consuming_next_token() {
            let bindings = apply_probe(&optioned(), &["--version=8.5", "pos"]).unwrap();
            assert_eq!(bindings.get_str("--version"), Some("8.5"));
            assert_eq!(bindings.get_str("value"), Some("pos"));
        }

        #[test]
        fn inline_value_position_is_irrelevant() {
            let bindings = apply_probe(&optioned(), &["pos", "--version=8.5"]).unwrap();
            assert_eq!(bindings.get_str("--version"), Some("8.5"));
            assert_eq!(bindings.get_str("value"), Some("pos"));
        }

        #[test]
        fn separate_value_comes_from_next_token() {
            let bindings = apply_probe(&optioned(), &["--version", "8.5"]).unwrap();
            assert_eq!(bindings.get_str("--version"), Some("8.5"));
        }

        #[test]
        fn flag_consumes_no_value() {
            let bindings = apply_probe(&optioned(), &["--force", "pos"]).unwrap();
            assert!(bindings.get_flag("--force"));
            assert_eq!(bindings.get_str("value"), Some("pos"));
        }

        #[test]
        fn explicit_bool_requires_boolean_value() {
            let bindings = apply_probe(&optioned(), &["--color=true"]).unwrap();
            assert!(bindings.get_flag("--color"));
            // non-boolean is a conversion failure on an optional slot
            let bindings = apply_probe(&optioned(), &["--color=purple"]).unwrap();
            assert!(!bindings.is_bound("--color"));
        }
    }

    mod end_of_options {
        use super::*;

        #[test]
        fn marker_downgrades_later_options_to_positionals() {
            let probe = Probe::new(
                "plain",
                Grammar::new()
                    .positional(
                        PropertySpec::new("args", PropertyKind::Value(ValueType::Str))
                            .with_multi_valued(true),
                    )
                    .option(PropertySpec::new("--force", PropertyKind::Flag)),
            );
            let bindings = apply_probe(&probe, &["--", "--force", "--x=1"]).unwrap();
            assert!(!bindings.get_flag("--force"));
            assert_eq!(bindings.get_list("args"), ["--force", "--x=1"]);
        }

        #[test]
        fn option_that_ends_options_takes_next_token_as_value() {
            let probe = Probe::new(
                "runner",
                Grammar::new()
                    .positional(
                        PropertySpec::new("args", PropertyKind::Value(ValueType::Str))
                            .with_multi_valued(true),
                    )
                    .option(
                        PropertySpec::new("--cmd", PropertyKind::Value(ValueType::Str))
                            .with_end_options(true),
                    )
                    .option(PropertySpec::new("--force", PropertyKind::Flag)),
            );
            let bindings =
                apply_probe(&probe, &["--cmd", "--weird-value", "--force"]).unwrap();
            // the token after --cmd is its value even though it looks like
            // an option, and later option-like tokens are plain positionals
            assert_eq!(bindings.get_str("--cmd"), Some("--weird-value"));
            assert!(!bindings.get_flag("--force"));
            assert_eq!(bindings.get_list("args"), ["--force"]);
        }
    }

    mod multi_valued {
        use super::*;

        #[test]
        fn multi_valued_option_keeps_accepting_values() {
            let probe = Probe::new(
                "multi",
                Grammar::new().option(
                    PropertySpec::new("--tag", PropertyKind::Value(ValueType::Str))
                        .with_multi_valued(true),
                ),
            );
            let bindings = apply_probe(&probe, &["--tag", "a", "b"]).unwrap();
            assert_eq!(bindings.get_list("--tag"), ["a", "b"]);
        }
    }

    mod residue {
        use super::*;

        #[test]
        fn rejected_attempt_leaves_no_observable_state() {
            let probe = Probe::new(
                "strict",
                Grammar::new()
                    .positional(PropertySpec::keyword("strict"))
                    .positional(PropertySpec::required(
                        "tool",
                        PropertyKind::Value(ValueType::Tool),
                    )),
            );
            // First attempt fails after partially binding the keyword.
            assert!(apply_probe(&probe, &["strict", "zzz-unknown"]).is_none());
            // Second attempt starts from scratch on the same commandlet.
            let bindings = apply_probe(&probe, &["strict", "gradle"]).unwrap();
            assert_eq!(bindings.get_str("tool"), Some("gradle"));
        }
    }
}
