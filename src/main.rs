use anyhow::Result;
use clap::Parser;

use lingo_chat::cli::commands::{chat, providers};
use lingo_chat::cli::{Args, Command};
use lingo_chat::config::ResolveOptions;
use lingo_chat::prompt::{print_languages, validate_language};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Providers { provider }) => {
            providers::print_providers(provider.as_deref())?;
        }
        None => {
            for lang in [&args.primary, &args.secondary, &args.explain_in]
                .into_iter()
                .flatten()
            {
                validate_language(lang)?;
            }

            let options = ResolveOptions {
                provider: args.provider,
                model: args.model,
                primary_language: args.primary,
                secondary_language: args.secondary,
                explanation_language: args.explain_in,
            };
            chat::run_chat(options).await?;
        }
    }

    Ok(())
}
