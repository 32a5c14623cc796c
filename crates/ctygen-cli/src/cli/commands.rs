//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("ctygen")
        .about("Ordered ctypes export from a type catalog snapshot")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(export_command())
        .subcommand(names_command())
}

/// Export selected types and their dependencies as ctypes definitions.
pub fn export_command() -> Command {
    Command::new("export")
        .about("Export types as ordered ctypes definitions")
        .override_usage(
            "\
  ctygen export <PATTERN>... -c <FILE>
  ctygen export <PATTERN>... -c <FILE> -o types.py
  ctygen export '<GLOB>' -c <FILE> --on-unresolved stub",
        )
        .after_help(
            r#"EXAMPLES:
  ctygen export Point -c types.json            # one type and its deps
  ctygen export 'Net*' Packet -c types.json    # wildcard plus literal
  ctygen export '*' -c types.json -o all.py    # whole catalog to a file
  ctygen export Conn -c types.json --no-deps   # selected types only
  ctygen export Conn -c types.json --prefix Bn # BnConn instead of Conn"#,
        )
        .arg(patterns_arg())
        .arg(catalog_arg())
        .arg(on_unresolved_arg())
        .arg(prefix_arg())
        .arg(no_deps_arg())
        .arg(output_arg())
        .arg(format_arg())
}

/// List catalog type names.
pub fn names_command() -> Command {
    Command::new("names")
        .about("List type names in a catalog snapshot")
        .override_usage(
            "\
  ctygen names -c <FILE>
  ctygen names '<GLOB>' -c <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  ctygen names -c types.json              # every name, catalog order
  ctygen names 'Usb*' -c types.json       # only matching names"#,
        )
        .arg(filter_arg())
        .arg(catalog_arg())
}
