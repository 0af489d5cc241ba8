mod app;
mod cli;
mod effects;
mod logging;
mod persistence;
mod render;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    logging::initialize(args.log);
    app::run(args)
}
