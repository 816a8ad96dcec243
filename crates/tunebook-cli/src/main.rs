use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use tunebook_resolve::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "tunebook", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory for the cached tune data (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Never download tune data; use only the local cache
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Render a set-list file as Markdown or HTML with incipits
    ///
    /// Reads plain text, one set per line:
    ///
    ///   reels: Cooley's / The Wise Maid [118] / The Maid Behind The Bar
    ///
    /// The field before ':' gives the tune type(s); tunes are separated
    /// by '/', each optionally followed by a '(key)' and a '[id]'
    /// disambiguation hint. Every tune is matched against The Session
    /// data dump (downloaded and cached on first use) and annotated with
    /// the opening measures of each of its parts.
    ///
    /// Lines or tunes that fail to parse or match are reported and
    /// annotated in the output; the rest of the setlist still renders.
    Render {
        /// Set-list file ('-' for stdin)
        input: PathBuf,

        /// Write an HTML page (with in-browser notation) instead of Markdown
        #[arg(long)]
        html: bool,

        /// Output file (default: stdout)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Look up a single tune and print its match and incipit
    Lookup {
        /// Tune name, e.g. "Cooley's"
        name: String,

        /// Tune type, e.g. "reel"
        #[arg(long = "type", value_name = "TYPE")]
        tune_type: Option<String>,

        /// Key/mode, e.g. "D", "Am", "Edor"
        #[arg(long)]
        key: Option<String>,

        /// Tune ID on The Session, to pick among same-named tunes
        #[arg(long)]
        id: Option<u32>,
    },
    /// Fetch a member's saved sets from thesession.org and render them
    Sets {
        /// Member ID on The Session
        member_id: u64,

        /// Only this set (default: all of the member's sets)
        #[arg(long)]
        set: Option<u32>,

        /// Write an HTML page instead of Markdown
        #[arg(long)]
        html: bool,

        /// Output file (default: stdout)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Download or refresh the cached Session data dump
    Fetch,
    /// Show the configuration (or create a starter config file)
    Config {
        /// Write an example config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if cli.offline {
        config.offline = true;
    }

    match cli.command {
        Commands::Render { input, html, out } => {
            commands::run_render(&config, &input, html, out.as_deref()).await?;
        }
        Commands::Lookup {
            name,
            tune_type,
            key,
            id,
        } => {
            commands::run_lookup(&config, &name, tune_type, key, id).await?;
        }
        Commands::Sets {
            member_id,
            set,
            html,
            out,
        } => {
            commands::run_sets(member_id, set, html, out.as_deref()).await?;
        }
        Commands::Fetch => {
            commands::run_fetch(&config).await?;
        }
        Commands::Config { init } => {
            commands::show_config(&config, init)?;
        }
    }

    Ok(())
}
