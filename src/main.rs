use clap::Parser;

mod cli;
mod commands;
mod logging;

use cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;
    let config = cli.world_config()?;
    match cli.command {
        Command::Profile => commands::profile(&config),
        Command::World { parallel } => commands::world(config, parallel),
        Command::Stream { from, to, steps } => commands::stream(config, from, to, steps),
        Command::Config => commands::config(&config),
    }
}
