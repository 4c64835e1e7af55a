mod app;
mod config;
mod error;
mod git;
mod model;
mod output;

use std::io::{self, IsTerminal};

use log::debug;

use app::App;
use config::{ColorChoice, Config};
use error::BranchlogError;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_args();
    debug!("{:?}", config);

    let app = match App::new(config) {
        Ok(app) => app,
        Err(e) => exit_with(e),
    };

    let rows = match app.rows() {
        Ok(rows) => rows,
        Err(e) => exit_with(e),
    };

    let styled = match app.config.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stdout().is_terminal(),
    };

    let mut stdout = io::stdout().lock();
    match output::render_table(&mut stdout, &rows, styled) {
        // Piping into `head` closes stdout early
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => Ok(result?),
    }
}

fn exit_with(e: BranchlogError) -> ! {
    eprintln!("Error: {}", e);
    if matches!(e, BranchlogError::NotARepository(_)) {
        eprintln!("\nAre you sure you're in a repository?");
    }
    std::process::exit(1);
}
