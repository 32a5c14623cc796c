//! Dispatch logic: extract params from ArgMatches and convert to command
//! args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from
//! clap; `From` impls bridge dispatch to the command handlers.

use std::path::PathBuf;

use clap::ArgMatches;

use ctygen_export::OnUnresolved;

use crate::commands::export::ExportArgs;
use crate::commands::names::NamesArgs;

/// Payload format for the export command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct ExportParams {
    pub patterns: Vec<String>,
    pub catalog: PathBuf,
    pub on_unresolved: OnUnresolved,
    pub prefix: String,
    pub no_deps: bool,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
}

impl ExportParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let on_unresolved = match m.get_one::<String>("on_unresolved").map(String::as_str) {
            Some("stub") => OnUnresolved::Stub,
            _ => OnUnresolved::Fail,
        };
        let format = match m.get_one::<String>("format").map(String::as_str) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };
        Self {
            patterns: m
                .get_many::<String>("patterns")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            catalog: m
                .get_one::<PathBuf>("catalog")
                .cloned()
                .unwrap_or_default(),
            on_unresolved,
            prefix: m.get_one::<String>("prefix").cloned().unwrap_or_default(),
            no_deps: m.get_flag("no_deps"),
            output: m.get_one::<PathBuf>("output").cloned(),
            format,
        }
    }
}

impl From<ExportParams> for ExportArgs {
    fn from(p: ExportParams) -> Self {
        Self {
            patterns: p.patterns,
            catalog: p.catalog,
            on_unresolved: p.on_unresolved,
            prefix: p.prefix,
            follow_deps: !p.no_deps,
            output: p.output,
            format: p.format,
        }
    }
}

pub struct NamesParams {
    pub pattern: Option<String>,
    pub catalog: PathBuf,
}

impl NamesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            pattern: m.get_one::<String>("pattern").cloned(),
            catalog: m
                .get_one::<PathBuf>("catalog")
                .cloned()
                .unwrap_or_default(),
        }
    }
}

impl From<NamesParams> for NamesArgs {
    fn from(p: NamesParams) -> Self {
        Self {
            pattern: p.pattern,
            catalog: p.catalog,
        }
    }
}
