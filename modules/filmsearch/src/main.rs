use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use filmsearch::templates::{render_article, render_page};
use filmsearch::{
    Config, FilmSearch, PosterStrategy, SearchError, SearchSession, SessionState, SnippetMode,
};

#[derive(Parser)]
#[command(name = "filmsearch")]
#[command(about = "Search Wikipedia for films and resolve their posters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search film pages and resolve a poster for each hit
    Search {
        term: String,

        /// Poster strategy: direct or heuristic (overrides POSTER_STRATEGY)
        #[arg(long)]
        strategy: Option<PosterStrategy>,

        /// Write the rendered results page to this file
        #[arg(long)]
        html: Option<PathBuf>,

        /// Embed provider snippet HTML unsanitized
        #[arg(long)]
        raw_snippets: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one article's text and metadata
    Article {
        title: String,

        #[arg(long)]
        html: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("filmsearch=info".parse()?))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    match cli.command {
        Command::Search {
            term,
            strategy,
            html,
            raw_snippets,
            json,
        } => {
            if let Some(strategy) = strategy {
                config.strategy = strategy;
            }
            if raw_snippets {
                config.snippet_mode = SnippetMode::Raw;
            }
            config.log_keys();
            run_search(&config, &term, html, json).await
        }
        Command::Article { title, html, json } => {
            config.log_keys();
            run_article(&config, &title, html, json).await
        }
    }
}

async fn run_search(config: &Config, term: &str, html: Option<PathBuf>, json: bool) -> Result<()> {
    let films = FilmSearch::from_config(config)?;
    info!(resolver = films.resolver_name(), "Film search ready");

    let mut session = SearchSession::new();
    if let Some(generation) = session.begin(term) {
        let outcome = films.run(term).await;
        session.complete(generation, outcome);
    }

    if let Some(path) = html {
        std::fs::write(&path, render_page(&session, config.snippet_mode))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote results page");
    }

    match session.state() {
        SessionState::Success { results, .. } => {
            if json {
                println!("{}", serde_json::to_string_pretty(results)?);
            } else if results.is_empty() {
                println!("No films found.");
            } else {
                for (i, r) in results.iter().enumerate() {
                    println!("{:>2}. {}", i + 1, r.hit.title);
                    println!("    {}", r.page_url());
                    println!("    poster: {}", r.poster_url.as_deref().unwrap_or("(none)"));
                }
            }
            Ok(())
        }
        SessionState::Failed { message, .. } => bail!("{message}"),
        SessionState::Idle | SessionState::Searching { .. } => bail!("search did not complete"),
    }
}

async fn run_article(config: &Config, title: &str, html: Option<PathBuf>, json: bool) -> Result<()> {
    let films = FilmSearch::from_config(config)?;
    let article = match films.article(title).await {
        Ok(article) => article,
        Err(SearchError::Validation(message)) => bail!("{message}"),
        Err(e) => bail!("Error fetching Wikipedia content. Please try again. ({e})"),
    };

    if let Some(path) = html {
        std::fs::write(&path, render_article(&article))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote article page");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&article)?);
        return Ok(());
    }

    println!("{}", article.title);
    println!("{}", article.url);
    println!(
        "categories: {}  links: {}  images: {}",
        article.categories.len(),
        article.links.len(),
        article.images.len()
    );
    println!();
    for paragraph in article.paragraphs() {
        println!("{paragraph}\n");
    }
    Ok(())
}
