use clap::Parser;

use turbine_atlas::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    run(cli)
}
