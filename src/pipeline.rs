use std::collections::HashMap;
use std::path::PathBuf;
use std::thread;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::config::BuildConfig;
use crate::error::{BuildError, ItemFailure};
use crate::fetcher::MarketSource;
use crate::models::{Item, PriceSnapshot, VolumeSnapshot, price_for, volume_for};
use crate::output::{ensure_dir, write_page, write_sitemap};
use crate::page::{SiteContext, render_item_page};
use crate::sitemap::render_sitemap;
use crate::slug::item_path;

/// A page that made it to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub id: u32,
    pub path: PathBuf,
}

/// Outcome of a completed run. Per-item failures land in `errors`; the run
/// itself only fails during the fetch phase or when the sitemap cannot be
/// written.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub processed: usize,
    pub errors: Vec<ItemFailure>,
    pub batches: usize,
    pub pauses: usize,
    pub sitemap_path: PathBuf,
}

impl BuildSummary {
    /// The first `limit` error lines and how many were left out.
    pub fn error_preview(&self, limit: usize) -> (Vec<String>, usize) {
        let shown = self.errors.iter().take(limit).map(ToString::to_string).collect();
        (shown, self.errors.len().saturating_sub(limit))
    }
}

struct Snapshot {
    catalog: Vec<Item>,
    prices: PriceSnapshot,
    volumes: VolumeSnapshot,
}

pub struct Pipeline<S> {
    source: S,
    config: BuildConfig,
}

impl<S: MarketSource> Pipeline<S> {
    pub fn new(source: S, config: BuildConfig) -> Self {
        Self { source, config }
    }

    pub fn run(&self) -> Result<BuildSummary, BuildError> {
        self.run_on(Utc::now().date_naive())
    }

    /// Same as [`run`](Self::run) with an explicit run date.
    pub fn run_on(&self, today: NaiveDate) -> Result<BuildSummary, BuildError> {
        let Snapshot {
            catalog,
            prices,
            volumes,
        } = self.fetch()?;

        let items_dir = self.config.items_dir();
        ensure_dir(&items_dir)?;

        let ctx = SiteContext {
            base_url: self.config.site_base_url.clone(),
            today,
        };

        let mut processed = 0;
        let mut errors = Vec::new();
        let mut batches = 0;
        let mut pauses = 0;
        let mut owners: HashMap<PathBuf, u32> = HashMap::new();

        for (index, batch) in catalog.chunks(self.config.batch_size.max(1)).enumerate() {
            if index > 0 {
                thread::sleep(self.config.batch_delay);
                pauses += 1;
            }
            batches += 1;
            debug!(batch = index, items = batch.len(), "processing batch");

            for result in self.process_batch(&ctx, batch, &prices, &volumes) {
                match result {
                    Ok(written) => {
                        if let Some(previous) = owners.insert(written.path.clone(), written.id) {
                            warn!(
                                path = %written.path.display(),
                                previous,
                                current = written.id,
                                "slug collision, page overwritten"
                            );
                        }
                        processed += 1;
                        if self.config.progress_every > 0 && processed % self.config.progress_every == 0 {
                            info!("processed {processed} items...");
                        }
                    }
                    Err(failure) => errors.push(failure),
                }
            }
        }

        info!(
            "generated {processed} item pages in {}",
            items_dir.display()
        );

        let summary = BuildSummary {
            processed,
            errors,
            batches,
            pauses,
            sitemap_path: self.config.sitemap_path(),
        };
        self.report_errors(&summary);

        info!("generating sitemap");
        write_sitemap(&summary.sitemap_path, &render_sitemap(&ctx, &catalog))?;
        info!("build complete");

        Ok(summary)
    }

    /// The three upstream calls, one after another. The first failure aborts.
    fn fetch(&self) -> Result<Snapshot, BuildError> {
        info!("fetching item catalog");
        let catalog = self.source.catalog()?;
        info!("found {} items", catalog.len());

        info!("fetching latest prices");
        let prices = self.source.latest_prices()?;

        info!("fetching trading volumes");
        let volumes = self.source.volumes()?;

        Ok(Snapshot {
            catalog,
            prices,
            volumes,
        })
    }

    /// Render and write each item of `batch` in order; one result per item.
    fn process_batch(
        &self,
        ctx: &SiteContext,
        batch: &[Item],
        prices: &PriceSnapshot,
        volumes: &VolumeSnapshot,
    ) -> Vec<Result<Written, ItemFailure>> {
        let items_dir = self.config.items_dir();
        batch
            .iter()
            .map(|item| {
                let html = render_item_page(
                    ctx,
                    item,
                    price_for(prices, item.id),
                    volume_for(volumes, item.id),
                );
                let path = item_path(&items_dir, &item.name);
                write_page(&path, &html)
                    .map(|()| Written { id: item.id, path })
                    .map_err(|err| ItemFailure {
                        name: item.name.clone(),
                        message: err.to_string(),
                    })
            })
            .collect()
    }

    fn report_errors(&self, summary: &BuildSummary) {
        if summary.errors.is_empty() {
            return;
        }
        warn!("encountered {} errors:", summary.errors.len());
        let (shown, hidden) = summary.error_preview(self.config.error_preview);
        for line in shown {
            warn!("  - {line}");
        }
        if hidden > 0 {
            warn!("  ... and {hidden} more");
        }
    }
}
