//! capitulo CLI — download webcomic chapters into PDFs.

use capitulo::{Config, ImageFetcher, OutputMode, Pipeline, UrlFormat, resolver_for};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Download the page images of a webcomic chapter range and assemble PDFs.
#[derive(Debug, Parser)]
#[command(name = "capitulo", version, about)]
struct Cli {
    /// Series name, used for the output folder and file names
    #[arg(long)]
    series: String,

    /// Base chapter URL: either the prefix the chapter id is appended to
    /// (e.g. https://mangaonline.biz/capitulo/one-piece-capitulo-) or a
    /// template containing a {chapter} placeholder
    #[arg(long)]
    base_url: String,

    /// How chapter URLs end: "/" (static sites) or "html" (script-rendered
    /// sites, extracted through a headless browser)
    #[arg(long)]
    format: String,

    /// First chapter of the range, e.g. 1
    #[arg(long)]
    start: String,

    /// Last chapter of the range, e.g. 10, or 232-5 for sub-chapters
    /// 232.1 through 232.5
    #[arg(long)]
    end: String,

    /// Produce a single PDF spanning the whole range instead of one per chapter
    #[arg(long)]
    combined: bool,

    /// Directory the series output folder is created in
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Settle delay in milliseconds for rendered-page extraction
    #[arg(long, default_value_t = 3000)]
    settle_delay_ms: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> capitulo::Result<()> {
    let url_format: UrlFormat = cli.format.parse()?;
    let config = Config {
        series: cli.series,
        base_url: cli.base_url,
        url_format,
        start: cli.start,
        end: cli.end,
        mode: if cli.combined {
            OutputMode::Combined
        } else {
            OutputMode::PerChapter
        },
        output_dir: cli.output_dir,
        settle_delay_ms: cli.settle_delay_ms,
        ..Config::default()
    };
    config.validate()?;

    let resolver = resolver_for(&config)?;
    let fetcher = ImageFetcher::new(&config.user_agent)?;
    let summary = Pipeline::new(config, resolver, fetcher).run().await?;

    for document in &summary.documents {
        println!("wrote {}", document.display());
    }
    println!(
        "{} chapters completed, {} skipped, {} failed",
        summary.completed(),
        summary.skipped(),
        summary.failed()
    );
    Ok(())
}
