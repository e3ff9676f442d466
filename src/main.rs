mod command;
mod config;
mod event;
mod frame;
mod model;
mod program;
mod source;
mod terminal;
mod viewer;
mod window;

use std::fs::File;

use anyhow::Context as _;
use clap::Parser;
use config::{Cli, ViewConfig};
use env_logger::{Env, Target};
use log::LevelFilter;
use program::Program;
use terminal::Terminal;
use viewer::Viewer;

const LOG_FILE_NAME: &str = "tailbox.log";

// The terminal is the drawing surface, so records go to a file in the temp
// dir. Logging is switched off if that file cannot be opened.
fn init_logging() {
    let mut path = std::env::temp_dir();
    path.push(LOG_FILE_NAME);

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    match File::options().append(true).create(true).open(&path) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(LevelFilter::Off);
        }
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let width = terminal::width().context("could not determine the terminal size")?;
    let config = ViewConfig::new(cli, width);
    log::info!(
        "watching {} every {:?}, {} lines in {} columns",
        config.locator,
        config.refresh,
        config.lines,
        config.cols
    );

    let mut viewer = Viewer::new(&config, source::open(&config.locator))?;
    let mut terminal = Terminal::stdout(width);

    if let Err(e) = Program::new()
        .tick(config.refresh)
        .run(&mut terminal, &mut viewer)
    {
        log::error!("{}", e);
        return Err(e.into());
    }

    log::info!("stopped");
    Ok(())
}
