//! Declarative command-line argument containers compiled into `clap` parsers.
//!
//! Describe a command-line interface as an ordered table of field
//! descriptors — positionals, options, flags, switches, and sub-commands —
//! attached to a plain struct, and let the container compiler turn the table
//! into a working parser. Tokenizing `argv`, printing help, and rejecting
//! malformed syntax are delegated to `clap`; this crate owns the declaration
//! surface, conversion and default policy, choice validation, and recursive
//! sub-command resolution.
//!
//! Defaults are declared in converted form ([`Value`]s) and never pass
//! through a field's conversion function; choice sets are `Value`s too, so
//! membership is always checked post-conversion.
//!
//! ```
//! use std::path::PathBuf;
//!
//! use declarg::{convert, flag, option, positional, Arguments, Arity, Container, Parsed, Result, Value};
//!
//! struct BuildArgs {
//!     targets: Vec<String>,
//!     root: PathBuf,
//!     verbose: bool,
//! }
//!
//! impl Arguments for BuildArgs {
//!     fn container() -> Container {
//!         Container::new("build")
//!             .field(positional("targets").arity(Arity::OneOrMore).help("Targets to build"))
//!             .field(option("root").short('r').convert(convert::path).default(Value::path(".")))
//!             .field(flag("verbose").short('v').help("Enable verbose output"))
//!     }
//!
//!     fn from_parsed(parsed: &Parsed) -> Result<Self> {
//!         Ok(BuildArgs {
//!             targets: parsed.get_strings("targets")?,
//!             root: parsed.get_path("root")?,
//!             verbose: parsed.get_bool("verbose")?,
//!         })
//!     }
//! }
//!
//! let args = BuildArgs::parse_from(["proj1", "proj2", "--verbose"])?;
//! assert_eq!(args.targets, vec!["proj1", "proj2"]);
//! assert_eq!(args.root, PathBuf::from("."));
//! assert!(args.verbose);
//! # Ok::<(), declarg::InvalidArgumentsError>(())
//! ```

mod builder;
mod container;
mod error;
mod field;
mod resolver;
mod validate;
mod value;

pub use container::{Arguments, Container, Parsed, ParserCallback, ParserOptions};
pub use error::{InvalidArgumentsError, Result};
pub use field::{
    command, flag, option, positional, switch, Arity, CommandField, CommandSpec, FieldKind,
    FieldSpec, Flag, FlagSpec, OptionField, OptionSpec, Positional, PositionalSpec, Switch,
    SwitchSpec,
};
pub use value::{convert, ConvertFn, Value};
