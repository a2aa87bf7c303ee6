//! Two-phase validation of argument containers.
//!
//! The pre-registration phase checks the declaration itself: attribute and
//! console name collisions, switch well-formedness, and sub-command
//! structure. The post-parse phase inspects the raw matches for conflicts
//! the parser cannot express (a switch given in both forms) and recurses
//! into the chosen sub-command's container.

use std::collections::HashSet;

use clap::parser::ValueSource;
use clap::ArgMatches;
use log::trace;

use crate::container::Container;
use crate::error::{InvalidArgumentsError, Result};
use crate::field::{FieldKind, FieldSpec};

/// Structural validation, run before any parser registration
pub(crate) fn check_structure(container: &Container) -> Result<()> {
    trace!("structural validation of container `{}`", container.name);

    let mut attributes: HashSet<&str> = HashSet::new();
    let mut console: HashSet<String> = HashSet::new();
    let mut command_field: Option<&str> = None;

    for field in &container.fields {
        if !attributes.insert(&field.name) {
            return Err(InvalidArgumentsError::DuplicateAttribute { name: field.name.clone() });
        }
        for name in console_names(field) {
            if !console.insert(name.clone()) {
                return Err(InvalidArgumentsError::DuplicateName { name });
            }
        }
        if let FieldKind::Command(spec) = &field.kind {
            if let Some(first) = command_field {
                return Err(InvalidArgumentsError::MultipleCommands {
                    first: first.to_string(),
                    second: field.name.clone(),
                });
            }
            command_field = Some(&field.name);

            if spec.subs.is_empty() {
                return Err(InvalidArgumentsError::EmptyCommand { field: field.name.clone() });
            }
            let mut sub_names: HashSet<&str> = HashSet::new();
            for (name, sub) in &spec.subs {
                if !sub_names.insert(name) {
                    return Err(InvalidArgumentsError::DuplicateSubcommand {
                        field: field.name.clone(),
                        name: name.clone(),
                    });
                }
                check_structure(sub)?;
            }
        }
    }
    Ok(())
}

/// All console-facing names a field registers, in `--long`/`-s` form
fn console_names(field: &FieldSpec) -> Vec<String> {
    match &field.kind {
        FieldKind::Positional(_) | FieldKind::Command(_) => Vec::new(),
        FieldKind::Option(spec) => {
            let mut names = vec![format!("--{}", spec.long_name(&field.name))];
            if let Some(short) = spec.short {
                names.push(format!("-{}", short));
            }
            names.extend(spec.aliases.iter().map(|a| format!("--{}", a)));
            names
        }
        FieldKind::Flag(spec) => {
            let mut names = vec![format!("--{}", spec.long_name(&field.name))];
            if let Some(short) = spec.short {
                names.push(format!("-{}", short));
            }
            names.extend(spec.aliases.iter().map(|a| format!("--{}", a)));
            names
        }
        FieldKind::Switch(spec) => {
            let console = spec.console_name(&field.name);
            vec![format!("--{}", console), format!("--no-{}", console)]
        }
    }
}

/// Semantic validation of the raw matches, recursing into the selected
/// sub-command
pub(crate) fn check_matches(container: &Container, matches: &ArgMatches) -> Result<()> {
    trace!("post-parse validation of container `{}`", container.name);

    for field in &container.fields {
        match &field.kind {
            FieldKind::Switch(spec) => {
                let on = explicitly_given(matches, &field.name);
                let off = explicitly_given(matches, &spec.off_id(&field.name));
                if on && off {
                    return Err(InvalidArgumentsError::SwitchConflict {
                        field: field.name.clone(),
                        name: spec.console_name(&field.name),
                    });
                }
            }
            FieldKind::Command(spec) => match matches.subcommand() {
                Some((sub_name, sub_matches)) => {
                    if let Some((_, sub)) = spec.subs.iter().find(|(name, _)| name == sub_name) {
                        check_matches(sub, sub_matches)?;
                    }
                }
                // the compiled parser requires a sub-command; this guards the
                // callback-extended paths
                None => {
                    return Err(InvalidArgumentsError::MissingCommand {
                        field: field.name.clone(),
                    })
                }
            },
            _ => (),
        }
    }
    Ok(())
}

pub(crate) fn explicitly_given(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_command;
    use crate::container::ParserOptions;
    use crate::field::{command, flag, option, positional, switch};

    fn matches_for(container: &Container, argv: &[&str]) -> ArgMatches {
        let cmd = build_command(container, &ParserOptions::default()).unwrap();
        let argv: Vec<String> =
            std::iter::once(container.name().to_string()).chain(argv.iter().map(|s| s.to_string())).collect();
        cmd.try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_duplicate_attribute_rejected() {
        let container = Container::new("tool").field(flag("verbose")).field(switch("verbose"));
        assert_eq!(
            check_structure(&container),
            Err(InvalidArgumentsError::DuplicateAttribute { name: "verbose".to_string() })
        );
    }

    #[test]
    fn test_duplicate_console_name_rejected() {
        let container = Container::new("tool")
            .field(option("log_file").required(false))
            .field(flag("logfile").long("log-file"));
        assert_eq!(
            check_structure(&container),
            Err(InvalidArgumentsError::DuplicateName { name: "--log-file".to_string() })
        );
    }

    #[test]
    fn test_switch_collides_with_its_negated_form() {
        let container = Container::new("tool").field(flag("no_color")).field(switch("color"));
        assert_eq!(
            check_structure(&container),
            Err(InvalidArgumentsError::DuplicateName { name: "--no-color".to_string() })
        );
    }

    #[test]
    fn test_single_command_field_enforced() {
        let container = Container::new("tool")
            .field(command("first").sub("a", Container::new("a")))
            .field(command("second").sub("b", Container::new("b")));
        assert_eq!(
            check_structure(&container),
            Err(InvalidArgumentsError::MultipleCommands {
                first: "first".to_string(),
                second: "second".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_command_field_rejected() {
        let container = Container::new("tool").field(command("action"));
        assert_eq!(
            check_structure(&container),
            Err(InvalidArgumentsError::EmptyCommand { field: "action".to_string() })
        );
    }

    #[test]
    fn test_sub_container_structure_checked_recursively() {
        let bad = Container::new("sub").field(flag("force")).field(option("force"));
        let container = Container::new("tool").field(command("action").sub("clean", bad));
        assert_eq!(
            check_structure(&container),
            Err(InvalidArgumentsError::DuplicateAttribute { name: "force".to_string() })
        );
    }

    #[test]
    fn test_switch_conflict_detected_post_parse() {
        let container = Container::new("tool").field(switch("color"));
        let matches = matches_for(&container, &["--color", "--no-color"]);
        assert_eq!(
            check_matches(&container, &matches),
            Err(InvalidArgumentsError::SwitchConflict {
                field: "color".to_string(),
                name: "color".to_string(),
            })
        );
    }

    #[test]
    fn test_single_switch_form_passes() {
        let container = Container::new("tool").field(switch("color"));
        let matches = matches_for(&container, &["--no-color"]);
        assert_eq!(check_matches(&container, &matches), Ok(()));
    }

    #[test]
    fn test_switch_conflict_found_inside_subcommand() {
        let sub = Container::new("build").field(positional("target")).field(switch("cache"));
        let container = Container::new("tool").field(command("action").sub("build", sub));
        let matches = matches_for(&container, &["build", "lib", "--cache", "--no-cache"]);
        assert_eq!(
            check_matches(&container, &matches),
            Err(InvalidArgumentsError::SwitchConflict {
                field: "cache".to_string(),
                name: "cache".to_string(),
            })
        );
    }
}
