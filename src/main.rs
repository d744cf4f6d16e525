mod discovery;
mod error;
mod extract;
mod pipeline;
mod record;
mod session;
mod store;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use session::Session;

#[derive(Parser)]
#[command(name = "shl_scraper", about = "SHL assessment catalog scraper")]
struct Cli {
    /// Run the browser with a visible window
    #[arg(long, global = true)]
    headful: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the catalog pagination and print the detail-page links
    Discover,
    /// Render one detail page and print the extracted record as JSON
    Extract { url: String },
    /// Discover, extract and persist the full catalog
    Run {
        /// Max detail pages to extract (default: all discovered)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    // Reachability and browser acquisition are the only fatal failures.
    if matches!(cli.command, Commands::Discover | Commands::Run { .. }) {
        discovery::probe_root().await?;
    }
    let session = Session::launch(cli.headful)
        .await
        .context("could not acquire a rendering session")?;

    // The session closes on every exit path, success or not.
    let result = dispatch(&session, cli.command).await;
    session.close().await;

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    result
}

async fn dispatch(session: &Session, command: Commands) -> Result<()> {
    match command {
        Commands::Discover => {
            let d = discovery::discover_links(session).await?;
            for link in &d.links {
                println!("{link}");
            }
            println!(
                "\n{} links over {} pages (stopped: {:?})",
                d.links.len(),
                d.pages_visited,
                d.stop
            );
            Ok(())
        }
        Commands::Extract { url } => {
            let record = pipeline::extract_one(session, &url).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Commands::Run { limit } => {
            let report = pipeline::run(session, limit).await?;
            report.print();
            Ok(())
        }
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
