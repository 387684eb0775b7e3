use clap::Parser;
use discmos::cli::{Cli, Commands};
use discmos::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Init(args) => discmos::cli::init::run(args, &printer)?,
        Commands::Preview(args) => discmos::cli::preview::run(args, &printer)?,
        Commands::Mosaic(args) => discmos::cli::mosaic::run(args, &printer)?,
        Commands::Completions(args) => discmos::cli::completions::run(args)?,
    }

    Ok(())
}
