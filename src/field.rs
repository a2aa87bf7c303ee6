//! Field descriptors: the declaration-time description of one CLI parameter.
//!
//! A [`FieldSpec`] captures configuration only and performs no side effects;
//! the builder module turns a container's field table into parser
//! registrations, the resolver extracts values back out. Descriptors are
//! created through the constructor functions ([`positional`], [`option`],
//! [`flag`], [`switch`], [`command`]) and are immutable once handed to a
//! [`Container`](crate::Container).

use crate::container::Container;
use crate::value::{ConvertFn, Value};

/// Convert an attribute name into a CLI-friendly console name
pub(crate) fn to_console_name(name: &str) -> String {
    name.replace('_', "-")
}

/// How many tokens a value-carrying field consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one token
    One,
    /// Zero or one token
    ZeroOrOne,
    /// One or more tokens
    OneOrMore,
    /// Zero or more tokens
    ZeroOrMore,
}

impl Arity {
    pub(crate) fn is_repeated(self) -> bool {
        matches!(self, Arity::OneOrMore | Arity::ZeroOrMore)
    }

    pub(crate) fn requires_token(self) -> bool {
        matches!(self, Arity::One | Arity::OneOrMore)
    }
}

/// One declared CLI parameter: attribute name plus kind-specific configuration
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub(crate) name: String,
    pub(crate) kind: FieldKind,
}

impl FieldSpec {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The closed set of field kinds
#[derive(Debug, Clone)]
pub enum FieldKind {
    Positional(PositionalSpec),
    Option(OptionSpec),
    Flag(FlagSpec),
    Switch(SwitchSpec),
    Command(CommandSpec),
}

#[derive(Debug, Clone)]
pub struct PositionalSpec {
    pub(crate) arity: Arity,
    pub(crate) convert: Option<ConvertFn>,
    pub(crate) default: Option<Value>,
    pub(crate) choices: Option<Vec<Value>>,
    pub(crate) help: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub(crate) short: Option<char>,
    pub(crate) long: Option<String>,
    pub(crate) aliases: Vec<String>,
    pub(crate) arity: Arity,
    pub(crate) convert: Option<ConvertFn>,
    pub(crate) default: Option<Value>,
    pub(crate) required: Option<bool>,
    pub(crate) choices: Option<Vec<Value>>,
    pub(crate) help: Option<String>,
}

impl OptionSpec {
    /// The long console name: explicit override, or derived from the
    /// attribute name. Derivation happens even when a short name is given,
    /// so `-p` always has a `--port` alongside it.
    pub(crate) fn long_name(&self, field_name: &str) -> String {
        match &self.long {
            Some(long) => long.clone(),
            None => to_console_name(field_name),
        }
    }

    /// Requiredness resolution: explicit override wins, otherwise a field
    /// with a default is not required.
    pub(crate) fn is_required(&self) -> bool {
        self.required.unwrap_or_else(|| self.default.is_none() && self.arity.requires_token())
    }
}

#[derive(Debug, Clone)]
pub struct FlagSpec {
    pub(crate) short: Option<char>,
    pub(crate) long: Option<String>,
    pub(crate) aliases: Vec<String>,
    pub(crate) help: Option<String>,
}

impl FlagSpec {
    pub(crate) fn long_name(&self, field_name: &str) -> String {
        match &self.long {
            Some(long) => long.clone(),
            None => to_console_name(field_name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SwitchSpec {
    pub(crate) console_name: Option<String>,
    pub(crate) default: bool,
    pub(crate) help: Option<String>,
    pub(crate) help_suffix: Option<String>,
}

impl SwitchSpec {
    pub(crate) fn console_name(&self, field_name: &str) -> String {
        match &self.console_name {
            Some(name) => name.clone(),
            None => to_console_name(field_name),
        }
    }

    /// Internal parser id for the generated `--no-` form. Attribute names
    /// never contain hyphens, so the hyphenated id cannot collide with one.
    pub(crate) fn off_id(&self, field_name: &str) -> String {
        format!("no-{}", self.console_name(field_name))
    }

    pub(crate) fn enable_help(&self) -> Option<String> {
        match (&self.help, &self.help_suffix) {
            (Some(help), _) => Some(help.clone()),
            (None, Some(suffix)) => Some(format!("Enable {}", suffix)),
            (None, None) => None,
        }
    }

    pub(crate) fn disable_help(&self) -> Option<String> {
        match (&self.help, &self.help_suffix) {
            (Some(help), _) => Some(help.clone()),
            (None, Some(suffix)) => Some(format!("Disable {}", suffix)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub(crate) subs: Vec<(String, Container)>,
}

/// Declare a positional parameter
pub fn positional(name: impl Into<String>) -> Positional {
    Positional {
        name: name.into(),
        spec: PositionalSpec {
            arity: Arity::One,
            convert: None,
            default: None,
            choices: None,
            help: None,
        },
    }
}

/// Declare a named option that consumes a value (`--name value`, `-n value`)
pub fn option(name: impl Into<String>) -> OptionField {
    OptionField {
        name: name.into(),
        spec: OptionSpec {
            short: None,
            long: None,
            aliases: Vec::new(),
            arity: Arity::One,
            convert: None,
            default: None,
            required: None,
            choices: None,
            help: None,
        },
    }
}

/// Declare a boolean flag: `false` when absent, `true` when present
pub fn flag(name: impl Into<String>) -> Flag {
    Flag {
        name: name.into(),
        spec: FlagSpec { short: None, long: None, aliases: Vec::new(), help: None },
    }
}

/// Declare a boolean switch exposing `--name` and `--no-name` forms
pub fn switch(name: impl Into<String>) -> Switch {
    Switch {
        name: name.into(),
        spec: SwitchSpec {
            console_name: None,
            default: false,
            help: None,
            help_suffix: None,
        },
    }
}

/// Declare a sub-command slot selecting between named sub-containers
pub fn command(name: impl Into<String>) -> CommandField {
    CommandField { name: name.into(), spec: CommandSpec { subs: Vec::new() } }
}

/// Builder for a positional field
#[derive(Debug, Clone)]
pub struct Positional {
    name: String,
    spec: PositionalSpec,
}

impl Positional {
    pub fn arity(mut self, arity: Arity) -> Self {
        self.spec.arity = arity;
        self
    }

    pub fn convert(mut self, convert: ConvertFn) -> Self {
        self.spec.convert = Some(convert);
        self
    }

    /// Default used when no token is supplied. Declared in converted form;
    /// the conversion function is never applied to it.
    pub fn default(mut self, default: Value) -> Self {
        self.spec.default = Some(default);
        self
    }

    /// Allowed values, compared post-conversion
    pub fn choices(mut self, choices: impl IntoIterator<Item = Value>) -> Self {
        self.spec.choices = Some(choices.into_iter().collect());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.spec.help = Some(help.into());
        self
    }
}

impl From<Positional> for FieldSpec {
    fn from(builder: Positional) -> Self {
        FieldSpec { name: builder.name, kind: FieldKind::Positional(builder.spec) }
    }
}

/// Builder for an option field
#[derive(Debug, Clone)]
pub struct OptionField {
    name: String,
    spec: OptionSpec,
}

impl OptionField {
    pub fn short(mut self, short: char) -> Self {
        self.spec.short = Some(short);
        self
    }

    /// Override the derived long console name
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.spec.long = Some(long.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.spec.aliases.push(alias.into());
        self
    }

    pub fn arity(mut self, arity: Arity) -> Self {
        self.spec.arity = arity;
        self
    }

    pub fn convert(mut self, convert: ConvertFn) -> Self {
        self.spec.convert = Some(convert);
        self
    }

    /// Default used when the option is omitted. Declared in converted form;
    /// supplying one implies `required = false` unless overridden.
    pub fn default(mut self, default: Value) -> Self {
        self.spec.default = Some(default);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.spec.required = Some(required);
        self
    }

    /// Allowed values, compared post-conversion
    pub fn choices(mut self, choices: impl IntoIterator<Item = Value>) -> Self {
        self.spec.choices = Some(choices.into_iter().collect());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.spec.help = Some(help.into());
        self
    }
}

impl From<OptionField> for FieldSpec {
    fn from(builder: OptionField) -> Self {
        FieldSpec { name: builder.name, kind: FieldKind::Option(builder.spec) }
    }
}

/// Builder for a flag field
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    spec: FlagSpec,
}

impl Flag {
    pub fn short(mut self, short: char) -> Self {
        self.spec.short = Some(short);
        self
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.spec.long = Some(long.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.spec.aliases.push(alias.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.spec.help = Some(help.into());
        self
    }
}

impl From<Flag> for FieldSpec {
    fn from(builder: Flag) -> Self {
        FieldSpec { name: builder.name, kind: FieldKind::Flag(builder.spec) }
    }
}

/// Builder for a switch field
#[derive(Debug, Clone)]
pub struct Switch {
    name: String,
    spec: SwitchSpec,
}

impl Switch {
    /// Override the derived console name for both forms
    pub fn console_name(mut self, name: impl Into<String>) -> Self {
        self.spec.console_name = Some(name.into());
        self
    }

    pub fn default(mut self, default: bool) -> Self {
        self.spec.default = default;
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.spec.help = Some(help.into());
        self
    }

    /// Auto-generates "Enable {suffix}" / "Disable {suffix}" help text
    pub fn help_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.spec.help_suffix = Some(suffix.into());
        self
    }
}

impl From<Switch> for FieldSpec {
    fn from(builder: Switch) -> Self {
        FieldSpec { name: builder.name, kind: FieldKind::Switch(builder.spec) }
    }
}

/// Builder for a sub-command field
#[derive(Debug, Clone)]
pub struct CommandField {
    name: String,
    spec: CommandSpec,
}

impl CommandField {
    /// Register a named sub-container; selection order follows registration
    /// order in help output
    pub fn sub(mut self, name: impl Into<String>, container: Container) -> Self {
        self.spec.subs.push((name.into(), container));
        self
    }
}

impl From<CommandField> for FieldSpec {
    fn from(builder: CommandField) -> Self {
        FieldSpec { name: builder.name, kind: FieldKind::Command(builder.spec) }
    }
}
