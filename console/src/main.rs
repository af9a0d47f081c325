mod dedup;
mod utils;

use clap::Parser;
use dedup::DedupArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[clap(flatten)]
    args: DedupArgs,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);
    cli.args.run()
}
