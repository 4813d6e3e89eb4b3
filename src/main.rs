use clap::Parser;
use sortdown::cli::{self, Cli};
use sortdown::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::run(&cli) {
        OutputFormatter::error(&e);
        std::process::exit(1);
    }
}
