use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SITE_BASE_URL: &str = "https://www.osrs.lol";
pub const DEFAULT_API_BASE: &str = "https://prices.runescape.wiki/api/v1/osrs";
pub const DEFAULT_USER_AGENT: &str = "osrs.lol bot";
pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);

/// The three upstream URLs a build depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub mapping: String,
    pub latest: String,
    pub volumes: String,
}

impl Endpoints {
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            mapping: format!("{base}/mapping"),
            latest: format!("{base}/latest"),
            volumes: format!("{base}/volumes"),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_base(DEFAULT_API_BASE)
    }
}

/// Settings for one build. Constructed once and never mutated.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Project root; item pages go to `<out_dir>/<items_dir_name>/`.
    pub out_dir: PathBuf,
    pub items_dir_name: String,
    pub sitemap_file_name: String,
    /// Without trailing slash.
    pub site_base_url: String,
    pub batch_size: usize,
    /// Pause between consecutive batches, not after the last one.
    pub batch_delay: Duration,
    /// How many item failures are logged individually.
    pub error_preview: usize,
    pub progress_every: usize,
}

impl BuildConfig {
    pub fn items_dir(&self) -> PathBuf {
        self.out_dir.join(&self.items_dir_name)
    }

    pub fn sitemap_path(&self) -> PathBuf {
        self.out_dir.join(&self.sitemap_file_name)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            items_dir_name: "items".to_string(),
            sitemap_file_name: "sitemap.xml".to_string(),
            site_base_url: DEFAULT_SITE_BASE_URL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
            error_preview: 10,
            progress_every: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_tolerate_trailing_slash() {
        let endpoints = Endpoints::from_base("http://127.0.0.1:9000/api/");
        assert_eq!(endpoints.mapping, "http://127.0.0.1:9000/api/mapping");
        assert_eq!(endpoints.volumes, "http://127.0.0.1:9000/api/volumes");
    }

    #[test]
    fn default_paths() {
        let config = BuildConfig::default();
        assert_eq!(config.items_dir(), PathBuf::from("./items"));
        assert_eq!(config.sitemap_path(), PathBuf::from("./sitemap.xml"));
    }
}
