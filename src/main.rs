use clap::Parser;

use crate::cli::Cli;
use teapot_viewer::run;

mod cli;

fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli.into()) {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}
