use crate::demo::{run_demo, run_evaluate, run_policy_defaults, DemoArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_scorecard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Scorecard",
    about = "Score small-business loan applications from the command line or over HTTP",
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
    /// Score an application form stored as JSON
    Evaluate(EvaluateArgs),
    /// Inspect the scoring policy
    Policy {
        #[command(subcommand)]
        command: PolicyCommand,
    },
    /// Score the built-in sample application and print a readable summary
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PolicyCommand {
    /// Print the default policy as JSON
    Defaults,
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Policy {
            command: PolicyCommand::Defaults,
        } => run_policy_defaults(),
        Command::Demo(args) => run_demo(args),
    }
}
