//! End-to-end tests for container compilation and parsing.

use std::collections::BTreeSet;
use std::path::PathBuf;

use declarg::{
    command, convert, flag, option, positional, switch, Arguments, Arity, Container,
    InvalidArgumentsError, Parsed, ParserOptions, Result, Value,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, PartialEq)]
struct BuildArguments {
    projects: BTreeSet<String>,
    root: PathBuf,
    verbose: bool,
}

impl Arguments for BuildArguments {
    fn container() -> Container {
        Container::new("build")
            .about("Compile the given projects")
            .field(positional("projects").arity(Arity::OneOrMore).help("Projects to compile"))
            .field(option("root").short('r').convert(convert::path).default(Value::path(".")))
            .field(switch("verbose").help_suffix("verbose output"))
    }

    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        Ok(BuildArguments {
            projects: parsed.get_strings("projects")?.into_iter().collect(),
            root: parsed.get_path("root")?,
            verbose: parsed.get_bool("verbose")?,
        })
    }
}

#[derive(Debug, PartialEq)]
struct CleanArguments {
    force: bool,
}

impl Arguments for CleanArguments {
    fn container() -> Container {
        Container::new("clean")
            .field(flag("force").help("Force cleaning even if up-to-date"))
    }

    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        Ok(CleanArguments { force: parsed.get_bool("force")? })
    }
}

#[derive(Debug, PartialEq)]
enum ConsoleCommand {
    Build(BuildArguments),
    Clean(CleanArguments),
}

#[derive(Debug, PartialEq)]
struct ConsoleArguments {
    root: PathBuf,
    action: ConsoleCommand,
}

impl Arguments for ConsoleArguments {
    fn container() -> Container {
        Container::new("console")
            .field(positional("root").convert(convert::path))
            .field(
                command("action")
                    .sub("build", BuildArguments::container())
                    .sub("clean", CleanArguments::container()),
            )
    }

    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        let action = match parsed.require_command("action")? {
            ("build", sub) => ConsoleCommand::Build(BuildArguments::from_parsed(sub)?),
            ("clean", sub) => ConsoleCommand::Clean(CleanArguments::from_parsed(sub)?),
            (other, _) => unreachable!("parser admitted unknown sub-command `{}`", other),
        };
        Ok(ConsoleArguments { root: parsed.get_path("root")?, action })
    }
}

#[test]
fn test_build_scenario_with_repeated_positional_and_switch() {
    init_logs();
    let args = BuildArguments::parse_from(["proj1", "proj2", "--verbose"]).unwrap();

    let expected: BTreeSet<String> =
        ["proj1", "proj2"].iter().map(|s| s.to_string()).collect();
    assert_eq!(args.projects, expected);
    assert_eq!(args.root, PathBuf::from("."));
    assert!(args.verbose);
}

#[test]
fn test_nested_command_selection() {
    init_logs();
    let args = ConsoleArguments::parse_from([
        "some/root", "build", "proj1", "proj2", "--verbose", "--root", "my-root",
    ])
    .unwrap();

    assert_eq!(args.root, PathBuf::from("some/root"));
    match args.action {
        ConsoleCommand::Build(build) => {
            assert_eq!(build.root, PathBuf::from("my-root"));
            assert!(build.verbose);
            assert_eq!(build.projects.len(), 2);
        }
        other => panic!("expected build command, got {:?}", other),
    }
}

#[test]
fn test_clean_command_flag_defaults_false() {
    let args = ConsoleArguments::parse_from(["ws", "clean"]).unwrap();
    assert_eq!(args.action, ConsoleCommand::Clean(CleanArguments { force: false }));

    let args = ConsoleArguments::parse_from(["ws", "clean", "--force"]).unwrap();
    assert_eq!(args.action, ConsoleCommand::Clean(CleanArguments { force: true }));
}

#[test]
fn test_parsing_twice_yields_equal_instances() {
    let argv = ["proj1", "proj2", "--root", "out", "--verbose"];
    let first = BuildArguments::parse_from(argv).unwrap();
    let second = BuildArguments::parse_from(argv).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_switch_conflict_is_recoverable() {
    let err = BuildArguments::parse_from(["proj1", "--verbose", "--no-verbose"]).unwrap_err();
    assert_eq!(
        err,
        InvalidArgumentsError::SwitchConflict {
            field: "verbose".to_string(),
            name: "verbose".to_string(),
        }
    );
}

#[test]
fn test_short_and_long_option_forms_parse_identically() {
    struct ServeArguments {
        port: i64,
    }

    impl Arguments for ServeArguments {
        fn container() -> Container {
            Container::new("serve").field(option("port").short('p').convert(convert::int))
        }

        fn from_parsed(parsed: &Parsed) -> Result<Self> {
            Ok(ServeArguments { port: parsed.get_int("port")? })
        }
    }

    let short = ServeArguments::parse_from(["-p", "8080"]).unwrap();
    let long = ServeArguments::parse_from(["--port", "8080"]).unwrap();
    assert_eq!(short.port, 8080);
    assert_eq!(long.port, 8080);
}

#[test]
fn test_duplicate_console_names_fail_at_compile_time() {
    #[derive(Debug)]
    struct BrokenArguments;

    impl Arguments for BrokenArguments {
        fn container() -> Container {
            Container::new("broken")
                .field(option("log_file").required(false))
                .field(flag("logfile").long("log-file"))
        }

        fn from_parsed(_parsed: &Parsed) -> Result<Self> {
            Ok(BrokenArguments)
        }
    }

    let err = BrokenArguments::new_parser().unwrap_err();
    assert_eq!(err, InvalidArgumentsError::DuplicateName { name: "--log-file".to_string() });

    // the same declaration error surfaces before any parsing happens
    let err = BrokenArguments::parse_from(["--log-file", "x"]).unwrap_err();
    assert_eq!(err, InvalidArgumentsError::DuplicateName { name: "--log-file".to_string() });
}

#[test]
fn test_missing_subcommand_follows_cli_convention() {
    // the compiled parser enforces selection, so the non-try entry points
    // exit with usage; the recoverable variant reports the syntax error
    let parser = ConsoleArguments::new_parser().unwrap();
    assert!(parser.is_subcommand_required_set());

    let err = ConsoleArguments::try_parse_from(["some/root"]).unwrap_err();
    assert!(matches!(err, InvalidArgumentsError::Syntax { .. }));
}

#[test]
fn test_unknown_option_reported_through_try_variant() {
    let err = BuildArguments::try_parse_from(["proj1", "--werbose"]).unwrap_err();
    assert!(matches!(err, InvalidArgumentsError::Syntax { .. }));
}

fn register_dry_run(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        clap::Arg::new("dry-run")
            .long("dry-run")
            .action(clap::ArgAction::SetTrue)
            .help("Print actions without executing them"),
    )
}

#[test]
fn test_parser_callbacks_extend_the_compiled_parser() {
    let parser = BuildArguments::new_parser_with(
        &ParserOptions::new().name("builder").version("1.2.3"),
        &[register_dry_run],
    )
    .unwrap();

    assert_eq!(parser.get_name(), "builder");
    assert!(parser.get_arguments().any(|a| a.get_id() == "dry-run"));

    // declared fields still resolve when extra options are present
    let args = BuildArguments::parse_from_with(
        ["proj1", "--dry-run"],
        &ParserOptions::new(),
        &[register_dry_run],
    )
    .unwrap();
    assert!(!args.verbose);
    assert_eq!(args.projects.len(), 1);
}

#[test]
fn test_choices_matched_against_converted_values() {
    #[derive(Debug)]
    struct TargetArguments {
        arch: PathBuf,
    }

    impl Arguments for TargetArguments {
        fn container() -> Container {
            Container::new("target").field(
                option("arch")
                    .convert(convert::path)
                    .choices([Value::path("a"), Value::path("b")]),
            )
        }

        fn from_parsed(parsed: &Parsed) -> Result<Self> {
            Ok(TargetArguments { arch: parsed.get_path("arch")? })
        }
    }

    let args = TargetArguments::parse_from(["--arch", "a"]).unwrap();
    assert_eq!(args.arch, PathBuf::from("a"));

    let err = TargetArguments::parse_from(["--arch", "c"]).unwrap_err();
    assert_eq!(
        err,
        InvalidArgumentsError::InvalidChoice { field: "arch".to_string(), value: "c".to_string() }
    );
}
