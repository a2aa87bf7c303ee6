//! Extracts resolved values from raw matches.
//!
//! For each field, in declaration order: tokens present on the command line
//! go through the field's conversion function, one call per token; an absent
//! field falls back to its declared default, used as-is since defaults are
//! declared in converted form. The resolved value, defaulted or not, is then
//! checked against the field's choice set. Command fields resolve the chosen
//! sub-container recursively into a nested [`Parsed`].

use clap::ArgMatches;
use log::trace;

use crate::container::{Container, Parsed};
use crate::error::{InvalidArgumentsError, Result};
use crate::field::{Arity, FieldKind};
use crate::validate::explicitly_given;
use crate::value::{convert, ConvertFn, Value};

pub(crate) fn resolve(container: &Container, matches: &ArgMatches) -> Result<Parsed> {
    trace!("resolving values for container `{}`", container.name);
    let mut parsed = Parsed::default();

    for field in &container.fields {
        match &field.kind {
            FieldKind::Positional(spec) => {
                let value = resolve_tokens(
                    &field.name,
                    spec.arity,
                    spec.convert,
                    &spec.default,
                    &spec.choices,
                    matches,
                )?;
                if let Some(value) = value {
                    parsed.values.insert(field.name.clone(), value);
                }
            }
            FieldKind::Option(spec) => {
                let value = resolve_tokens(
                    &field.name,
                    spec.arity,
                    spec.convert,
                    &spec.default,
                    &spec.choices,
                    matches,
                )?;
                if let Some(value) = value {
                    parsed.values.insert(field.name.clone(), value);
                }
            }
            FieldKind::Flag(_) => {
                parsed
                    .values
                    .insert(field.name.clone(), Value::Bool(matches.get_flag(&field.name)));
            }
            FieldKind::Switch(spec) => {
                // conflict between the two forms is rejected by the validator
                // before resolution runs
                let value = if explicitly_given(matches, &field.name) {
                    true
                } else if explicitly_given(matches, &spec.off_id(&field.name)) {
                    false
                } else {
                    spec.default
                };
                parsed.values.insert(field.name.clone(), Value::Bool(value));
            }
            FieldKind::Command(spec) => match matches.subcommand() {
                Some((sub_name, sub_matches)) => {
                    let sub = spec
                        .subs
                        .iter()
                        .find(|(name, _)| name == sub_name)
                        .map(|(_, sub)| sub)
                        .ok_or(InvalidArgumentsError::MissingCommand {
                            field: field.name.clone(),
                        })?;
                    let sub_parsed = resolve(sub, sub_matches)?;
                    parsed.command = Some((sub_name.to_string(), Box::new(sub_parsed)));
                }
                None => {
                    return Err(InvalidArgumentsError::MissingCommand {
                        field: field.name.clone(),
                    })
                }
            },
        }
    }
    Ok(parsed)
}

fn resolve_tokens(
    name: &str,
    arity: Arity,
    convert_fn: Option<ConvertFn>,
    default: &Option<Value>,
    choices: &Option<Vec<Value>>,
    matches: &ArgMatches,
) -> Result<Option<Value>> {
    let convert_fn = convert_fn.unwrap_or(convert::string);

    let resolved = match matches.get_many::<String>(name) {
        Some(tokens) => {
            let mut items = Vec::with_capacity(tokens.len());
            for raw in tokens {
                items.push(apply(name, convert_fn, raw)?);
            }
            if arity.is_repeated() {
                Some(Value::List(items))
            } else {
                items.into_iter().next().or_else(|| default.clone())
            }
        }
        None => match default {
            Some(value) => Some(value.clone()),
            None if arity == Arity::ZeroOrMore => Some(Value::List(Vec::new())),
            None => None,
        },
    };

    if let (Some(value), Some(choices)) = (&resolved, choices) {
        check_choices(name, value, choices)?;
    }
    Ok(resolved)
}

fn apply(name: &str, convert_fn: ConvertFn, raw: &str) -> Result<Value> {
    convert_fn(raw).map_err(|message| InvalidArgumentsError::Conversion {
        field: name.to_string(),
        message,
    })
}

/// Choice membership is checked element-wise for repeated fields and covers
/// defaulted values as well as explicit ones
fn check_choices(name: &str, value: &Value, choices: &[Value]) -> Result<()> {
    let reject = |offending: &Value| InvalidArgumentsError::InvalidChoice {
        field: name.to_string(),
        value: offending.to_string(),
    };
    match value {
        Value::List(items) => {
            for item in items {
                if !choices.contains(item) {
                    return Err(reject(item));
                }
            }
            Ok(())
        }
        other => {
            if choices.contains(other) {
                Ok(())
            } else {
                Err(reject(other))
            }
        }
    }
}
