use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlistify::{
    cli, config, error,
    types::{Period, PkceToken},
    utils,
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show the authenticated user and the number of saved songs
    Profile,

    /// Create a playlist from saved songs
    Create(CreateOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CreateOptions {
    /// Playlist name (defaults to "Saved Songs D-M-YYYY")
    #[clap(long)]
    pub name: Option<String>,

    /// Number of saved songs to consider (defaults to the whole library)
    #[clap(long)]
    pub songs: Option<usize>,

    /// Only take songs saved within this window: last-day, last-month, last-year, all-time
    #[clap(long, value_parser = utils::parse_period)]
    pub period: Option<Period>,

    /// JPEG file used as the playlist cover
    #[clap(long)]
    pub cover: Option<PathBuf>,

    /// Create a public playlist
    #[clap(long)]
    pub public: bool,

    /// Playlist description
    #[clap(long)]
    pub description: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Profile => cli::profile().await,
        Command::Create(opt) => {
            cli::create(
                opt.name,
                opt.songs,
                opt.period,
                opt.cover,
                opt.public,
                opt.description,
            )
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
