mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use cmistype_core::codec::WireFormat;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cmistype", version, about = "Validate and convert CMIS type definitions")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved settings
    Doctor,

    /// Check a type definition against the structural rules
    Validate(ValidateArgs),

    /// Re-encode a type definition as XML or JSON
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Type definition file, or "-" for stdin
    pub input: PathBuf,

    /// Input format (defaults to the file extension)
    #[arg(long)]
    pub format: Option<WireFormat>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Type definition file, or "-" for stdin
    pub input: PathBuf,

    /// Input format (defaults to the file extension)
    #[arg(long)]
    pub from: Option<WireFormat>,

    /// Output format (defaults to the output extension, then config, then the other format)
    #[arg(long)]
    pub to: Option<WireFormat>,

    /// Output file (defaults to stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(cli.config.as_deref()),
        Commands::Validate(args) => cmd::validate::run(cli.config.as_deref(), &args),
        Commands::Convert(args) => cmd::convert::run(cli.config.as_deref(), &args),
    }

    logging::flush();
}
