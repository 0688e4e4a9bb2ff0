use crate::quote::{run_quote, run_regions, QuoteArgs, RegionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use shipping_fee::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Shipping Fee Service",
    about = "Quote distance-based shipping fees over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Quote the shipping fee for a single order
    Quote(QuoteArgs),
    /// List the regions and distances the calculator knows about
    Regions(RegionsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
        Command::Regions(args) => run_regions(args),
    }
}
