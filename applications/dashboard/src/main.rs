/// MelodyMap - listening statistics and recommendations in the terminal
use clap::{Parser, Subcommand};
use melodymap_core::{RecommendationLimit, TimeRange};
use melodymap_dashboard::{
    app::PageRequest, config::DashboardConfig, render::StatusReport, Dashboard,
};
use melodymap_views::{LayoutAction, RecommendationSelection};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "melodymap")]
#[command(about = "MelodyMap listening dashboard", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "MELODYMAP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the entry page and start signing in
    Login,
    /// Handle the redirect the backend sent after sign-in
    Callback {
        /// Full redirect URL, path with query, or bare query string
        url: String,
    },
    /// Show profile, top artists and top tracks
    Home {
        /// short_term, medium_term or long_term
        #[arg(short, long, default_value_t = TimeRange::default())]
        time_range: TimeRange,
    },
    /// Show recommended tracks
    Recommendations {
        /// Range the seed tracks are taken from
        #[arg(short, long, default_value_t = TimeRange::default())]
        time_range: TimeRange,
        /// 5, 10, 20 or 50
        #[arg(short, long, default_value_t = RecommendationLimit::default())]
        limit: RecommendationLimit,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is stored
    Status,
    /// List playlists
    Playlists,
    /// List recently played tracks
    Recent,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the rendered pages
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "melodymap=info,melodymap_dashboard=info,melodymap_core=info,melodymap_client=info,melodymap_views=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = DashboardConfig::load(cli.config.as_deref())?;
    config.validate()?;
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    let dashboard = Dashboard::new(&config)?;

    let visit = match cli.command {
        Commands::Login => dashboard.open(PageRequest::Entry { sign_in: true }).await?,
        Commands::Callback { url } => {
            dashboard
                .open(PageRequest::Callback { incoming: url })
                .await?
        }
        Commands::Home { time_range } => dashboard.open(PageRequest::Home { time_range }).await?,
        Commands::Recommendations { time_range, limit } => {
            let selection = RecommendationSelection { time_range, limit };
            dashboard
                .open(PageRequest::Recommendations { selection })
                .await?
        }
        Commands::Logout => dashboard.activate(LayoutAction::SignOut).await?,
        Commands::Status => {
            let layout = dashboard.status().await?;
            print!("{}", StatusReport(&layout));
            return Ok(());
        }
        Commands::Playlists => dashboard.open(PageRequest::Playlists).await?,
        Commands::Recent => dashboard.open(PageRequest::RecentlyPlayed).await?,
    };

    print!("{}", visit);
    Ok(())
}
