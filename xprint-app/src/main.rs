use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use xprint_common::OutputFormat;
use xprint_common::observability::init_logging;
use xprint_config::{XprintConfig, XprintConfigLoader, default_config_path};
use xprint_drivers::{ChromiumPrinter, PdfPrinter};
use xprint_social::twitter::PostRef;

mod cli;
mod pipeline;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        tracing::error!(error = %format!("{err:#}"), "xprint.failed");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // 1) Load config (env wins)
    let loader = match (&cli.config, default_config_path()) {
        (Some(path), _) => XprintConfigLoader::new().with_file(path),
        (None, Some(path)) => XprintConfigLoader::new().with_optional_file(path),
        (None, None) => XprintConfigLoader::new(),
    };
    let cfg: XprintConfig = loader.load().context("failed to load configuration")?;

    // 2) Logging
    let log_path = init_logging("xprint", &cfg.logging)?;
    tracing::debug!(log = %log_path.display(), "xprint.logging.ready");

    // 3) Resolve and render
    let post = PostRef::parse(&cli.url)?;
    let format = if cli.html {
        OutputFormat::Html
    } else {
        OutputFormat::Pdf
    };
    let output = pipeline::output_path(cli.output, &post.status_id, format);
    println!("-> Fetching post {}", post.status_id);

    let sources = pipeline::build_sources(&cfg)?;
    let concurrent = cli.concurrent || cfg.sources.concurrent;
    let html = pipeline::render_document(&post, &sources, &cfg.document, concurrent).await?;

    // 4) Write
    let printer = match format {
        OutputFormat::Html => None,
        OutputFormat::Pdf => {
            println!("-> Printing PDF");
            let browser = cli.browser.as_deref().or(cfg.pdf.browser.as_deref());
            Some(
                ChromiumPrinter::discover(browser)?
                    .with_timeout(Duration::from_secs(cfg.pdf.timeout_secs))
                    .with_virtual_time_budget(Duration::from_millis(
                        cfg.pdf.virtual_time_budget_ms,
                    )),
            )
        }
    };
    pipeline::write_output(
        &html,
        &output,
        format,
        printer.as_ref().map(|p| p as &dyn PdfPrinter),
    )
    .await?;

    println!("OK: {} written: {}", format.extension().to_uppercase(), output.display());
    Ok(())
}
