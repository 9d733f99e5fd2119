mod cli;
mod commands;
mod logging;


use cli::{EmitParams, GenerateParams, LocateParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    let verbosity = matches
        .subcommand()
        .map_or(0, |(_, m)| m.get_count("verbose"));
    logging::init(verbosity);

    match matches.subcommand() {
        Some(("generate", m)) => {
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into());
        }
        Some(("emit", m)) => {
            let params = EmitParams::from_matches(m);
            commands::emit::run(params.into());
        }
        Some(("locate", m)) => {
            let params = LocateParams::from_matches(m);
            commands::locate::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
