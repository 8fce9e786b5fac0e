use purdue_catalog::catalog::CatalogClient;
use purdue_catalog::scrape::{self, ScrapeOptions, ScrapeOutcome};
use std::io::{self, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Term comes from the first argument, or an interactive prompt. The
    // pipeline itself never touches the terminal.
    let term = match std::env::args().nth(1) {
        Some(term) => term,
        None => prompt_term()?,
    };
    let term = term.trim().to_string();
    if term.is_empty() {
        error!("no term code given");
        return Ok(());
    }

    let client = match CatalogClient::new() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to set up catalog client");
            return Ok(());
        }
    };

    // Failures are logged, not signaled via exit status.
    match scrape::run(&client, &term, &ScrapeOptions::default()).await {
        Ok(ScrapeOutcome::Written { path, course_count }) => {
            info!(
                courses = course_count,
                file = %path.display(),
                "successfully scraped and stored courses"
            );
        }
        Ok(ScrapeOutcome::NoCourses) => {
            error!("failed to scrape any courses");
        }
        Err(e) => {
            error!(error = %e, "scrape aborted");
        }
    }

    Ok(())
}

fn prompt_term() -> io::Result<String> {
    print!("Input term code: ");
    io::stdout().flush()?;
    let mut term = String::new();
    io::stdin().read_line(&mut term)?;
    Ok(term)
}
