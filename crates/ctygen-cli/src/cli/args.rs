//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` composed into commands in
//! `commands.rs`.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Type name patterns (positional, at least one).
pub fn patterns_arg() -> Arg {
    Arg::new("patterns")
        .value_name("PATTERN")
        .num_args(1..)
        .required(true)
        .help("Type names to export; `*` and `?` wildcards are supported")
}

/// Optional single filter pattern (positional).
pub fn filter_arg() -> Arg {
    Arg::new("pattern")
        .value_name("PATTERN")
        .help("Only list names matching this pattern")
}

/// Catalog snapshot file (-c/--catalog).
pub fn catalog_arg() -> Arg {
    Arg::new("catalog")
        .short('c')
        .long("catalog")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Type catalog snapshot (JSON)")
}

/// Unresolved-reference policy (--on-unresolved).
pub fn on_unresolved_arg() -> Arg {
    Arg::new("on_unresolved")
        .long("on-unresolved")
        .value_name("POLICY")
        .default_value("fail")
        .value_parser(["fail", "stub"])
        .help("What to do when a referenced type is missing")
}

/// Class name prefix (--prefix).
pub fn prefix_arg() -> Arg {
    Arg::new("prefix")
        .long("prefix")
        .value_name("PREFIX")
        .default_value("")
        .help("Prefix prepended to every emitted class name")
}

/// Don't follow references outside the selected set (--no-deps).
pub fn no_deps_arg() -> Arg {
    Arg::new("no_deps")
        .long("no-deps")
        .action(ArgAction::SetTrue)
        .help("Export only the selected types, not their dependencies")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output here instead of stdout")
}

/// Output format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("text")
        .value_parser(["text", "json"])
        .help("Output format (text, json)")
}
