mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "byline",
    about = "Writer onboarding and badge evidence for the byline blog platform",
    version,
    propagate_version = true
)]
struct Cli {
    /// Site root (default: auto-detect from .byline/ or .git/)
    #[arg(long, global = true, env = "BYLINE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize byline in the current site
    Init {
        /// Site name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Run the JSON API server
    Serve {
        #[arg(long, default_value = "3142")]
        port: u16,
    },

    /// Show a writer's onboarding state
    Onboarding { slug: String },

    /// Merge article sources and show a writer's badge report
    Evidence {
        slug: String,

        /// JSON file of remote documents: [{"id": ..., "data": {...}}]
        #[arg(long)]
        remote: Option<PathBuf>,
    },

    /// Inspect and validate the site configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, name.as_deref()),
        Commands::Serve { port } => cmd::serve::run(&root, port),
        Commands::Onboarding { slug } => cmd::onboarding::run(&root, &slug, cli.json),
        Commands::Evidence { slug, remote } => {
            cmd::evidence::run(&root, &slug, remote.as_deref(), cli.json)
        }
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
