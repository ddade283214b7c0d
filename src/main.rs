use std::process;

use clap::Parser;
use dotenv::dotenv;
use soroban_scripts::{
    cli::Cli, config::Config, errors::ScriptError, runner::ShellRunner,
};
use tracing::error;

fn main() {
    // Load .env file
    dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    if let Err(err) = run(cli) {
        error!("{}", err);
        process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), ScriptError> {
    let config = Config::from_env(cli.overrides())?;
    let runner = ShellRunner::new(config.project_dir.clone());

    cli.command.run(&config, &runner)
}
