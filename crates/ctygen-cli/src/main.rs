mod cli;
mod commands;

use cli::{ExportParams, NamesParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("export", m)) => {
            let params = ExportParams::from_matches(m);
            commands::export::run(params.into());
        }
        Some(("names", m)) => {
            let params = NamesParams::from_matches(m);
            commands::names::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
