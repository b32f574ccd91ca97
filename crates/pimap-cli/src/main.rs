mod center;
mod discover;
mod locate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pimap_core::FindMePreference;

#[derive(Debug, Parser)]
#[command(name = "pimap-cli")]
#[command(about = "Map of Pi seller discovery, from the terminal")]
struct Cli {
    /// Pi SDK access token for authenticated operations (saving a map
    /// center). Read from the environment rather than the command line so
    /// it never lands in shell history.
    #[arg(long, env = "PIMAP_PI_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pi_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch sellers around a coordinate.
    Discover {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Search radius in kilometres; defaults to the configured radius.
        #[arg(long)]
        radius: Option<f64>,
        /// Optional text filter applied server-side.
        #[arg(long)]
        query: Option<String>,
    },
    /// Show the extended record for one seller.
    Seller { seller_id: String },
    /// Resolve a starting origin and run the initial seller fetch.
    Locate {
        /// Override the configured find-me preference
        /// (auto | deviceGPS | searchCenter).
        #[arg(long)]
        find_me: Option<FindMePreference>,
    },
    /// Read or persist the user's search/sell map centers.
    Center {
        #[command(subcommand)]
        action: center::CenterAction,
    },
    /// Resolve a place name to a coordinate.
    Geocode { place: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pimap_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Discover {
            lat,
            lng,
            radius,
            query,
        } => discover::run(&config, lat, lng, radius, query.as_deref()).await,
        Commands::Seller { seller_id } => discover::show_seller(&config, &seller_id).await,
        Commands::Locate { find_me } => locate::run(&config, find_me).await,
        Commands::Center { action } => center::run(&config, action, cli.pi_token.as_deref()).await,
        Commands::Geocode { place } => center::geocode(&config, &place).await,
    }
}
