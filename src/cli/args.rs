use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lingo")]
#[command(about = "Terminal chat with one-key translation and grammar checking")]
#[command(version)]
pub struct Args {
    /// Provider name from the config file
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Model name
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Language Ctrl+S translates to (ISO 639-1, e.g., vi, ja)
    #[arg(long = "primary")]
    pub primary: Option<String>,

    /// Language Ctrl+E translates to (ISO 639-1, e.g., en)
    #[arg(long = "secondary")]
    pub secondary: Option<String>,

    /// Language grammar explanations are written in
    #[arg(long = "explain-in")]
    pub explain_in: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported language codes
    Languages,
    /// List configured providers
    Providers {
        /// Show details of a single provider
        provider: Option<String>,
    },
}
