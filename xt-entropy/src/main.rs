// xt-entropy/src/main.rs
//! XT Entropy entry point.

use anyhow::{Context, Result};
use clap::Parser;
use xt_entropy::cli::{Cli, Commands};
use xt_entropy::commands::scan::{run_scan, ScanOptions};
use xt_entropy::logger;

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    match args.command {
        Commands::About => {
            println!("{}", xt_entropy_core::about());
        }
        Commands::Scan(cmd) => {
            let root = cmd.root.clone();
            let opts = ScanOptions {
                root: cmd.root,
                volume: cmd.volume,
                config: cmd.config,
                json_file: cmd.json_file,
                summary: !cmd.no_summary && !args.quiet,
            };
            run_scan(&opts).with_context(|| format!("Scan of {} failed", root.display()))?;
        }
    }

    Ok(())
}
