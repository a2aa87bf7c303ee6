//! Compiles a container's field table into a `clap` command.
//!
//! Fields are registered in declaration order with their resolved console
//! names, arity, requiredness, and help text. Defaults and choice sets are
//! deliberately not handed to the parser: both are post-conversion values
//! owned by the resolver. Sub-containers compile recursively into
//! subcommands, with selection marked required so an absent sub-command
//! follows the usual usage-and-exit convention.

use clap::{Arg, ArgAction, Command};
use log::debug;

use crate::container::{Container, ParserOptions};
use crate::error::Result;
use crate::field::{Arity, FieldKind, FieldSpec, FlagSpec, OptionSpec, PositionalSpec, SwitchSpec};
use crate::validate;

/// Build a parser for `container`, running structural validation first so
/// declaration mistakes surface at compile time rather than parse time
pub(crate) fn build_command(container: &Container, options: &ParserOptions) -> Result<Command> {
    validate::check_structure(container)?;

    let name = options.name.clone().unwrap_or_else(|| container.name.clone());
    debug!("compiling container `{}` into parser `{}`", container.name, name);

    let mut cmd = Command::new(name);
    if let Some(about) = options.about.clone().or_else(|| container.about.clone()) {
        cmd = cmd.about(about);
    }
    if let Some(version) = &options.version {
        cmd = cmd.version(version.clone());
    }
    if let Some(after_help) = &options.after_help {
        cmd = cmd.after_help(after_help.clone());
    }

    for field in &container.fields {
        cmd = register_field(cmd, field)?;
    }
    Ok(cmd)
}

fn register_field(cmd: Command, field: &FieldSpec) -> Result<Command> {
    match &field.kind {
        FieldKind::Positional(spec) => Ok(register_positional(cmd, &field.name, spec)),
        FieldKind::Option(spec) => Ok(register_option(cmd, &field.name, spec)),
        FieldKind::Flag(spec) => Ok(register_flag(cmd, &field.name, spec)),
        FieldKind::Switch(spec) => Ok(register_switch(cmd, &field.name, spec)),
        FieldKind::Command(spec) => {
            let mut cmd = cmd;
            for (name, sub) in &spec.subs {
                debug!("compiling sub-container `{}` for field `{}`", name, field.name);
                let sub_cmd = build_command(sub, &ParserOptions::default())?.name(name.clone());
                cmd = cmd.subcommand(sub_cmd);
            }
            Ok(cmd.subcommand_required(true))
        }
    }
}

fn register_positional(cmd: Command, name: &str, spec: &PositionalSpec) -> Command {
    debug!("registering positional `{}`", name);
    let mut arg = Arg::new(name.to_string()).value_name(name.to_uppercase());
    arg = apply_arity(arg, spec.arity);
    arg = arg.required(spec.arity.requires_token() && spec.default.is_none());
    if let Some(help) = &spec.help {
        arg = arg.help(help.clone());
    }
    cmd.arg(arg)
}

fn register_option(cmd: Command, name: &str, spec: &OptionSpec) -> Command {
    let long = spec.long_name(name);
    debug!("registering option --{} for field `{}`", long, name);
    let mut arg = Arg::new(name.to_string())
        .long(long.clone())
        .value_name(long.to_uppercase())
        .required(spec.is_required());
    if let Some(short) = spec.short {
        arg = arg.short(short);
    }
    for alias in &spec.aliases {
        arg = arg.alias(alias.clone());
    }
    arg = apply_arity(arg, spec.arity);
    if spec.arity.is_repeated() {
        arg = arg.action(ArgAction::Append);
    }
    if let Some(help) = &spec.help {
        arg = arg.help(help.clone());
    }
    cmd.arg(arg)
}

fn register_flag(cmd: Command, name: &str, spec: &FlagSpec) -> Command {
    let long = spec.long_name(name);
    debug!("registering flag --{} for field `{}`", long, name);
    let mut arg = Arg::new(name.to_string())
        .long(long)
        .action(ArgAction::SetTrue);
    if let Some(short) = spec.short {
        arg = arg.short(short);
    }
    for alias in &spec.aliases {
        arg = arg.alias(alias.clone());
    }
    if let Some(help) = &spec.help {
        arg = arg.help(help.clone());
    }
    cmd.arg(arg)
}

fn register_switch(cmd: Command, name: &str, spec: &SwitchSpec) -> Command {
    let console = spec.console_name(name);
    debug!("registering switch --{}/--no-{} for field `{}`", console, console, name);

    let mut on = Arg::new(name.to_string())
        .long(console.clone())
        .action(ArgAction::SetTrue);
    if let Some(help) = spec.enable_help() {
        on = on.help(help);
    }

    // the off form conflicts with the on form only when both are explicit;
    // that check belongs to the post-parse validator, not the parser
    let mut off = Arg::new(spec.off_id(name))
        .long(format!("no-{}", console))
        .action(ArgAction::SetTrue);
    if let Some(help) = spec.disable_help() {
        off = off.help(help);
    }

    cmd.arg(on).arg(off)
}

fn apply_arity(arg: Arg, arity: Arity) -> Arg {
    match arity {
        Arity::One => arg.num_args(1),
        Arity::ZeroOrOne => arg.num_args(0..=1),
        Arity::OneOrMore => arg.num_args(1..),
        Arity::ZeroOrMore => arg.num_args(0..),
    }
}
