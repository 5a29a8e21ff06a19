use crate::demo::{run_demo, run_rank, DemoArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use donate_impact::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Donate Impact Matcher",
    about = "Run and demonstrate the donation matching service from the command line",
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
    /// Score and rank a candidate dataset for one set of preferences
    Match {
        #[command(subcommand)]
        command: MatchCommand,
    },
    /// Run an end-to-end CLI demo covering the wizard-to-allocation flow
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum MatchCommand {
    /// Print the ranked candidate table and optional score breakdowns
    Rank(RankArgs),
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
        Command::Match {
            command: MatchCommand::Rank(args),
        } => run_rank(args),
        Command::Demo(args) => run_demo(args),
    }
}
