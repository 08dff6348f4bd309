mod render;
mod replay;
mod session;

use atlunch_core::SortDirection;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "atlunch")]
#[command(about = "Find somewhere to eat near you")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one session: locate, search nearby, apply actions, print the list
    Session(SessionArgs),
    /// Print what the last session persisted, without touching the network
    Replay,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct SessionArgs {
    /// Latitude of the simulated position fix
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude of the simulated position fix
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Simulate a device without geolocation support
    #[arg(long, conflicts_with_all = ["lat", "deny"])]
    no_geolocation: bool,

    /// Simulate the user refusing location permission
    #[arg(long, conflicts_with = "lat")]
    deny: bool,

    /// Simulate a device without connectivity
    #[arg(long)]
    offline: bool,

    /// Page URL the session was opened with, e.g. a shared link
    #[arg(long)]
    url: Option<String>,

    /// Case-insensitive name filter
    #[arg(long)]
    query: Option<String>,

    /// Rating order: asc or desc
    #[arg(long, default_value = "desc")]
    sort: SortDirection,

    /// Place id to toggle as favorite (repeatable)
    #[arg(long = "toggle", value_name = "PLACE_ID")]
    toggles: Vec<String>,

    /// Viewport width in pixels, used to pick list or map first
    #[arg(long, value_name = "PX")]
    viewport_width: Option<u32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = atlunch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Session(args) => session::run_session(&config, &args).await?,
        Commands::Replay => replay::run_replay(&config),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
