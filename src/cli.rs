use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one search and print the result list.
    Search(SearchArgs),
    /// Read keywords from stdin and keep the result list up to date.
    Interactive(InteractiveArgs),
}

#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    /// Books API base; the keyword is appended as-is
    /// (default: $BOOKLISTING_API_BASE, then Google Books).
    #[arg(long)]
    pub api_base: Option<String>,

    /// Skip malformed items instead of discarding the whole result set.
    #[arg(long)]
    pub lenient: bool,

    /// Number of threads used to download thumbnails.
    #[arg(long, default_value_t = 1)]
    pub thumbnail_workers: usize,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search keyword. Whitespace is removed before the request is sent.
    #[arg(required = true, num_args = 1..)]
    pub keyword: Vec<String>,

    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Print the records as a JSON array instead of rows.
    #[arg(long)]
    pub json: bool,

    /// Open the preview of the given row (1-based) after the list is shown.
    #[arg(long)]
    pub open: Option<usize>,
}

#[derive(Debug, Args)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,
}
