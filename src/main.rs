use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use osrs_item_pages::config::{
    DEFAULT_API_BASE, DEFAULT_BATCH_SIZE, DEFAULT_SITE_BASE_URL, DEFAULT_USER_AGENT,
};
use osrs_item_pages::{BuildConfig, BuildSummary, Endpoints, Pipeline, WikiClient};

#[derive(Parser, Debug)]
#[command(name = "osrs-item-pages")]
#[command(about = "Generate static OSRS Grand Exchange item pages and a sitemap", long_about = None)]
struct Cli {
    /// Project root; pages go to <out-dir>/items, the sitemap to <out-dir>/sitemap.xml
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Public site URL used for canonical links and the sitemap
    #[arg(long, default_value = DEFAULT_SITE_BASE_URL)]
    base_url: String,
    /// Prices API base; /mapping, /latest and /volumes are appended
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,
    /// User-Agent header sent with every API request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
    /// Items written between rate-limit pauses
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    batch_size: usize,
    /// Pause between batches in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,
    /// Exit with status 2 when any item page failed
    #[arg(long)]
    strict: bool,
    /// Enable verbose logging (or set OSRS_PAGES_LOG)
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn build_config(&self) -> BuildConfig {
        BuildConfig {
            out_dir: self.out_dir.clone(),
            site_base_url: self.base_url.trim_end_matches('/').to_string(),
            batch_size: self.batch_size,
            batch_delay: Duration::from_millis(self.delay_ms),
            ..BuildConfig::default()
        }
    }
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("OSRS_PAGES_LOG").unwrap_or_else(|_| {
        if verbose {
            "osrs_item_pages=debug".to_string()
        } else {
            "osrs_item_pages=info".to_string()
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn build(cli: &Cli) -> Result<BuildSummary> {
    let client = WikiClient::new(Endpoints::from_base(&cli.api_base), &cli.user_agent)
        .context("failed to build HTTP client")?;
    let pipeline = Pipeline::new(client, cli.build_config());
    let summary = pipeline.run().context("build failed")?;
    Ok(summary)
}

/// 0 for a completed run even with item failures, 1 when the build aborted,
/// 2 for item failures under `--strict`.
fn exit_status(result: &Result<BuildSummary>, strict: bool) -> u8 {
    match result {
        Ok(summary) if strict && !summary.errors.is_empty() => 2,
        Ok(_) => 0,
        Err(_) => 1,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    info!("starting OSRS item page generation");

    let result = build(&cli);
    match &result {
        Ok(summary) if cli.strict && !summary.errors.is_empty() => {
            error!("{} item pages failed (strict mode)", summary.errors.len());
        }
        Ok(_) => {}
        Err(err) => error!("{err:#}"),
    }
    ExitCode::from(exit_status(&result, cli.strict))
}

#[cfg(test)]
mod tests {
    use osrs_item_pages::{BuildError, FetchError, ItemFailure};

    use super::*;

    fn summary(failures: usize) -> BuildSummary {
        BuildSummary {
            processed: 3,
            errors: (0..failures)
                .map(|i| ItemFailure {
                    name: format!("Item {i}"),
                    message: "Is a directory (os error 21)".into(),
                })
                .collect(),
            batches: 1,
            pauses: 0,
            sitemap_path: PathBuf::from("sitemap.xml"),
        }
    }

    fn fetch_failure() -> Result<BuildSummary> {
        let err = BuildError::Fetch(FetchError::Parse {
            url: "https://prices.runescape.wiki/api/v1/osrs/mapping".into(),
            message: "expected value at line 1 column 1".into(),
        });
        Err(anyhow::Error::new(err).context("build failed"))
    }

    #[test]
    fn clean_run_exits_zero() {
        assert_eq!(exit_status(&Ok(summary(0)), false), 0);
        assert_eq!(exit_status(&Ok(summary(0)), true), 0);
    }

    #[test]
    fn item_failures_still_exit_zero_by_default() {
        assert_eq!(exit_status(&Ok(summary(2)), false), 0);
    }

    #[test]
    fn item_failures_exit_two_in_strict_mode() {
        assert_eq!(exit_status(&Ok(summary(2)), true), 2);
    }

    #[test]
    fn aborted_build_exits_one() {
        assert_eq!(exit_status(&fetch_failure(), false), 1);
        assert_eq!(exit_status(&fetch_failure(), true), 1);
    }
}
