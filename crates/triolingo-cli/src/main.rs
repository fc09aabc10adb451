//! triolingo CLI — the terminal front end for TrioLingo.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod context;
mod view;

use context::Context;

#[derive(Parser)]
#[command(name = "triolingo", version, about = "Language-learning quizzes in the terminal")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Lesson repository directory (overrides the configured source)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Score file (overrides the configured location)
    #[arg(long, global = true)]
    scores: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available languages
    Languages,

    /// List the lesson sets of a language
    Lessons {
        /// Language code (e.g. "es")
        language: String,
    },

    /// Take a quiz on one lesson set
    Quiz {
        /// Language code (e.g. "es")
        language: String,

        /// Lesson set id (e.g. "basics")
        lesson_set: String,
    },

    /// Open a view by path: "/", "/es" or "/es/basics"
    Open {
        path: String,
    },

    /// Show per-language scores
    Scores {
        /// Only show this language
        #[arg(long)]
        language: Option<String>,
    },

    /// Check every document in the lesson repository
    Validate,

    /// Create a starter config and sample lesson repository
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triolingo=warn".parse().unwrap()),
        )
        .init();

    let result = dispatch(Cli::parse()).await;

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let load = || Context::load(cli.config.clone(), cli.content.clone(), cli.scores.clone());

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Languages => commands::languages::execute(&load()?).await,
        Commands::Lessons { language } => commands::lessons::execute(&load()?, &language).await,
        Commands::Quiz {
            language,
            lesson_set,
        } => commands::quiz::execute(&load()?, &language, &lesson_set).await,
        Commands::Open { path } => commands::open::execute(&load()?, &path).await,
        Commands::Scores { language } => commands::scores::execute(&load()?, language.as_deref()),
        Commands::Validate => commands::validate::execute(&load()?).await,
    }
}
