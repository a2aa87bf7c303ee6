//! Error types for container compilation and argument validation.
//!
//! Two channels exist for reporting problems. Logical errors (bad
//! declarations, conflicting switches, choice violations) are surfaced as
//! [`InvalidArgumentsError`] through normal `Result`s and are recoverable by
//! the caller. CLI-convention errors (malformed syntax, unknown options,
//! missing required sub-command) follow standard command-line tool behaviour
//! instead: the underlying parser prints usage to stderr and the process
//! exits with a non-zero status.

use thiserror::Error;

/// Result type for container compilation and parsing operations
pub type Result<T> = std::result::Result<T, InvalidArgumentsError>;

/// Errors raised for declaration mistakes and post-parse validation failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidArgumentsError {
    /// Two fields in one container share an attribute name
    #[error("duplicate attribute name in container: `{name}`")]
    DuplicateAttribute { name: String },

    /// Two fields resolve to the same console name
    #[error("duplicate console name in container: `{name}`")]
    DuplicateName { name: String },

    /// A container declares more than one command field
    #[error("container declares more than one command field: `{first}` and `{second}`")]
    MultipleCommands { first: String, second: String },

    /// A command field was declared without any sub-containers
    #[error("command field `{field}` has no sub-commands")]
    EmptyCommand { field: String },

    /// Two sub-containers of one command field share a name
    #[error("duplicate sub-command name for field `{field}`: `{name}`")]
    DuplicateSubcommand { field: String, name: String },

    /// Both forms of a switch were given on one invocation
    #[error("conflicting options for `{field}`: cannot specify both --{name} and --no-{name}")]
    SwitchConflict { field: String, name: String },

    /// A resolved value is outside the field's declared choice set
    #[error("invalid value for `{field}`: {value} is not an allowed choice")]
    InvalidChoice { field: String, value: String },

    /// A conversion function rejected a raw token
    #[error("cannot convert value for `{field}`: {message}")]
    Conversion { field: String, message: String },

    /// The container declares a command field but no sub-command was selected
    #[error("field `{field}`: a sub-command is required")]
    MissingCommand { field: String },

    /// Typed extraction requested a field the parse did not populate
    #[error("no value for field `{field}`")]
    MissingValue { field: String },

    /// Typed extraction requested a different shape than the field resolved to
    #[error("field `{field}` does not hold a {expected}")]
    TypeMismatch { field: String, expected: &'static str },

    /// Raw syntax error reported by the underlying parser (try_ entry points only)
    #[error("{message}")]
    Syntax { message: String },
}
