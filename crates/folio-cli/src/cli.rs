use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Inspect a logical PDF document made of one or more files.
#[derive(Debug, Parser)]
#[command(name = "folio", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every subcommand: which files form the document.
#[derive(Debug, Args)]
pub struct DocumentArgs {
    /// PDF files, in document order
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Directory the files are resolved against
    #[arg(long, value_name = "DIR")]
    pub base: Option<PathBuf>,

    /// Password for encrypted PDFs
    #[arg(long)]
    pub password: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show title, uid, page count and per-file page counts
    Info {
        #[command(flatten)]
        doc: DocumentArgs,
    },

    /// List every page with its file, local page, rectangle and rotation
    Pages {
        #[command(flatten)]
        doc: DocumentArgs,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,
    },

    /// Extract text from pages
    Text {
        #[command(flatten)]
        doc: DocumentArgs,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,
    },

    /// Print the combined outline (table of contents)
    Outline {
        #[command(flatten)]
        doc: DocumentArgs,
    },

    /// List annotations
    Annots {
        #[command(flatten)]
        doc: DocumentArgs,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,
    },

    /// List hyperlinks with their resolved targets
    Links {
        #[command(flatten)]
        doc: DocumentArgs,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,
    },

    /// Search page text for a pattern
    Search {
        /// Text to search for
        #[arg(value_name = "PATTERN")]
        pattern: String,

        #[command(flatten)]
        doc: DocumentArgs,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Treat the pattern as a regular expression
        #[arg(long)]
        regex: bool,

        /// Match case exactly
        #[arg(long)]
        case_sensitive: bool,

        /// Stop after this many matches
        #[arg(long)]
        max_results: Option<usize>,
    },
}

/// Output format for every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, tab-separated output
    Text,
    /// JSON output
    Json,
}
