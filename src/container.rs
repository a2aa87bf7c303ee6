//! Argument containers and the parsing façade.
//!
//! A [`Container`] is an ordered table of field descriptors attached to a
//! record type through the [`Arguments`] trait. The trait's provided methods
//! compile the table into a fresh `clap` parser per call, parse an argument
//! vector, run post-parse validation, and hand a [`Parsed`] instance to the
//! implementor's `from_parsed` for typed record construction.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::builder;
use crate::error::{InvalidArgumentsError, Result};
use crate::field::FieldSpec;
use crate::resolver;
use crate::validate;
use crate::value::Value;

/// Callback invoked with the fully configured parser before it is returned,
/// allowing registration of extra, non-declared options
pub type ParserCallback = fn(clap::Command) -> clap::Command;

/// Pass-through configuration forwarded verbatim to the underlying parser
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    pub(crate) name: Option<String>,
    pub(crate) about: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) after_help: Option<String>,
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the parser name shown in usage text
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn after_help(mut self, text: impl Into<String>) -> Self {
        self.after_help = Some(text.into());
        self
    }
}

/// An ordered set of field descriptors compiled into a parser
#[derive(Debug, Clone)]
pub struct Container {
    pub(crate) name: String,
    pub(crate) about: Option<String>,
    pub(crate) fields: Vec<FieldSpec>,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Container { name: name.into(), about: None, fields: Vec::new() }
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Append a field descriptor; declaration order is registration order
    pub fn field(mut self, field: impl Into<FieldSpec>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A populated record of resolved field values
///
/// Values are post-conversion [`Value`]s keyed by attribute name; a chosen
/// sub-command holds its own nested `Parsed`. Two parses of the same argument
/// vector against the same container compare equal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parsed {
    pub(crate) values: BTreeMap<String, Value>,
    pub(crate) command: Option<(String, Box<Parsed>)>,
}

impl Parsed {
    /// Raw access to a resolved value; `None` when the field was omitted and
    /// had no default
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Result<&str> {
        self.require(name)?
            .as_str()
            .ok_or(InvalidArgumentsError::TypeMismatch { field: name.to_string(), expected: "string" })
    }

    pub fn get_int(&self, name: &str) -> Result<i64> {
        self.require(name)?
            .as_int()
            .ok_or(InvalidArgumentsError::TypeMismatch { field: name.to_string(), expected: "integer" })
    }

    pub fn get_float(&self, name: &str) -> Result<f64> {
        self.require(name)?
            .as_float()
            .ok_or(InvalidArgumentsError::TypeMismatch { field: name.to_string(), expected: "float" })
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        self.require(name)?
            .as_bool()
            .ok_or(InvalidArgumentsError::TypeMismatch { field: name.to_string(), expected: "boolean" })
    }

    pub fn get_path(&self, name: &str) -> Result<PathBuf> {
        self.require(name)?
            .as_path()
            .map(PathBuf::from)
            .ok_or(InvalidArgumentsError::TypeMismatch { field: name.to_string(), expected: "path" })
    }

    /// Elements of a repeated string field
    pub fn get_strings(&self, name: &str) -> Result<Vec<String>> {
        self.list_items(name, "string list", |v| v.as_str().map(str::to_string))
    }

    /// Elements of a repeated path field
    pub fn get_paths(&self, name: &str) -> Result<Vec<PathBuf>> {
        self.list_items(name, "path list", |v| v.as_path().map(PathBuf::from))
    }

    /// The selected sub-command, as `(name, nested instance)`
    pub fn command(&self) -> Option<(&str, &Parsed)> {
        self.command.as_ref().map(|(name, parsed)| (name.as_str(), parsed.as_ref()))
    }

    /// Like [`Parsed::command`], but failing with the declaring field's name
    /// when no sub-command was recorded
    pub fn require_command(&self, field: &str) -> Result<(&str, &Parsed)> {
        self.command()
            .ok_or(InvalidArgumentsError::MissingCommand { field: field.to_string() })
    }

    fn require(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or(InvalidArgumentsError::MissingValue { field: name.to_string() })
    }

    fn list_items<T>(
        &self,
        name: &str,
        expected: &'static str,
        item: impl Fn(&Value) -> Option<T>,
    ) -> Result<Vec<T>> {
        let mismatch = || InvalidArgumentsError::TypeMismatch { field: name.to_string(), expected };
        let items = self.require(name)?.as_list().ok_or_else(mismatch)?;
        items.iter().map(|v| item(v).ok_or_else(mismatch)).collect()
    }
}

/// Marks a record type as an argument container
///
/// Implementors supply the declaration table and the typed construction; the
/// provided methods cover building and parsing. Each call allocates a fresh
/// parser, so no state is shared between invocations.
pub trait Arguments: Sized {
    /// The declaration table for this record type
    fn container() -> Container;

    /// Build the typed record from resolved values
    fn from_parsed(parsed: &Parsed) -> Result<Self>;

    /// Build a parser without parsing anything
    fn new_parser() -> Result<clap::Command> {
        Self::new_parser_with(&ParserOptions::default(), &[])
    }

    /// Build a parser with overrides and extension callbacks applied
    fn new_parser_with(
        options: &ParserOptions,
        callbacks: &[ParserCallback],
    ) -> Result<clap::Command> {
        let container = Self::container();
        let mut cmd = builder::build_command(&container, options)?;
        for callback in callbacks {
            cmd = callback(cmd);
        }
        Ok(cmd)
    }

    /// Parse the process's own invocation vector
    ///
    /// CLI-convention failures (malformed syntax, unknown options, missing
    /// required sub-command, `--help`) print usage and terminate the process;
    /// logical failures come back as [`InvalidArgumentsError`].
    fn parse_args() -> Result<Self> {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse the given argument vector (without a leading program name)
    fn parse_from<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::parse_from_with(argv, &ParserOptions::default(), &[])
    }

    /// Parse with parser overrides and extension callbacks
    fn parse_from_with<I, S>(
        argv: I,
        options: &ParserOptions,
        callbacks: &[ParserCallback],
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let container = Self::container();
        let cmd = Self::new_parser_with(options, callbacks)?;
        let matches = match cmd.try_get_matches_from(invocation(&container, argv)) {
            Ok(matches) => matches,
            Err(err) => err.exit(),
        };
        finish::<Self>(&container, &matches)
    }

    /// Fully recoverable variant of [`Arguments::parse_from`]: raw parser
    /// errors are returned as [`InvalidArgumentsError::Syntax`] instead of
    /// terminating the process
    fn try_parse_from<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let container = Self::container();
        let cmd = Self::new_parser_with(&ParserOptions::default(), &[])?;
        let matches = cmd
            .try_get_matches_from(invocation(&container, argv))
            .map_err(|err| InvalidArgumentsError::Syntax { message: err.to_string() })?;
        finish::<Self>(&container, &matches)
    }
}

fn invocation<I, S>(container: &Container, argv: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    // clap expects argv[0] to be the program name
    std::iter::once(container.name.clone())
        .chain(argv.into_iter().map(Into::into))
        .collect()
}

fn finish<T: Arguments>(container: &Container, matches: &clap::ArgMatches) -> Result<T> {
    validate::check_matches(container, matches)?;
    let parsed = resolver::resolve(container, matches)?;
    T::from_parsed(&parsed)
}
