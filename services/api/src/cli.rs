use crate::server;
use clap::{Args, Parser, Subcommand};
use job_board::config::AppConfig;
use job_board::error::AppError;
use job_board::session::SessionAuthority;

#[derive(Parser, Debug)]
#[command(
    name = "Job Board API",
    about = "Serve the job board HTTP API or mint session tokens for operators",
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
    /// Print a signed session token for the configured secret
    Token(TokenArgs),
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

#[derive(Args, Debug)]
pub(crate) struct TokenArgs {
    /// Email the session identifies
    #[arg(long)]
    pub(crate) email: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Token(args) => print_token(args),
    }
}

fn print_token(args: TokenArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let authority = SessionAuthority::from_config(&config.session);
    let token = authority.issue(&args.email)?;
    println!("{token}");
    Ok(())
}
