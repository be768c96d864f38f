mod ui;

use clap::Parser;
use crate::ui::cli;
use netprof_core::utils::logging::init_logging;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    init_logging(args.log_level);
    if let Err(e) = cli::run_cli(args).await {
        eprintln!("netprof: {e:#}");
        std::process::exit(1);
    }
}
