//! gitfill CLI - README template renderer

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use gitfill::{FixSuggestion, GitfillError, PropertyProfile, Renderer};

#[derive(Parser)]
#[command(name = "gitfill")]
#[command(about = "Renders README templates with live repository stats from the GitHub API")]
#[command(version)]
struct Cli {
    /// Path to the template file
    template: PathBuf,

    /// Path the rendered document is written to (overwritten)
    output: PathBuf,

    /// Property set available to placeholders
    #[arg(long, value_enum, default_value = "extended")]
    profile: PropertyProfile,
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = render(&cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn render(cli: &Cli) -> Result<(), GitfillError> {
    let text = tokio::fs::read_to_string(&cli.template).await?;

    let mut renderer = Renderer::new(cli.profile);
    let rendered = renderer.render(&text).await?;

    tokio::fs::write(&cli.output, rendered).await?;

    println!(
        "{} Rendered {} {} {}",
        "✓".green(),
        cli.template.display().to_string().cyan(),
        "→".cyan(),
        cli.output.display().to_string().cyan().bold()
    );

    Ok(())
}
