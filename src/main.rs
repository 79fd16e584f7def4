use anyhow::Result;
use clap::Parser;
use cookable::config::load_config;
use cookable::executor::{Command, execute};
use cookable::state::AppState;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recipe catalog to use instead of the configured one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // 1. Load Config
    let mut config = load_config()?;
    if let Some(catalog) = args.catalog {
        config.general.catalog = Some(catalog);
    }

    // 2. Init State
    let mut state = AppState::new(config);
    log::debug!("Catalog at {:?}", state.config.catalog_path());

    // 3. Run
    let stdout = io::stdout();
    let changed = execute(&mut state, args.command, &mut stdout.lock())?;
    if changed {
        state.save()?;
    }

    Ok(())
}
