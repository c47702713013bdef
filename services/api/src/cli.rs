use crate::report::{run_analyze, run_formats, AnalyzeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use employee_pairs::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "employee-pairs",
    about = "Find the pair of employees who worked together the longest on shared projects",
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
    /// Analyze a CSV export of work assignments and print the longest working pair
    Analyze(AnalyzeArgs),
    /// List the supported date formats
    Formats,
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
        Command::Analyze(args) => run_analyze(args),
        Command::Formats => run_formats(),
    }
}
