mod annots_cmd;
mod cli;
mod info_cmd;
mod links_cmd;
mod outline_cmd;
mod page_range;
mod pages_cmd;
mod search_cmd;
mod shared;
mod text_cmd;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Info { doc } => info_cmd::run(doc),
        Commands::Pages { doc, pages } => pages_cmd::run(doc, pages.as_deref()),
        Commands::Text { doc, pages } => text_cmd::run(doc, pages.as_deref()),
        Commands::Outline { doc } => outline_cmd::run(doc),
        Commands::Annots { doc, pages } => annots_cmd::run(doc, pages.as_deref()),
        Commands::Links { doc, pages } => links_cmd::run(doc, pages.as_deref()),
        Commands::Search {
            pattern,
            doc,
            pages,
            regex,
            case_sensitive,
            max_results,
        } => search_cmd::run(
            doc,
            &search_cmd::SearchArgs {
                pattern,
                pages: pages.as_deref(),
                regex: *regex,
                case_sensitive: *case_sensitive,
                max_results: *max_results,
            },
        ),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
