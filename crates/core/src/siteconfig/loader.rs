use crate::error::{Result, SiteconfError};
use crate::siteconfig::directives::SiteConfig;
use crate::siteconfig::parser::ConfigParser;
use crate::siteconfig::registry::SiteConfigRegistry;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default cap on files read at the same time
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Loader settings
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Maximum number of files open at once (default: 10).
    pub concurrency: usize,
    /// Only load files with this extension, e.g. `txt` (default: all files).
    pub extension: Option<String>,
    /// Replace invalid UTF-8 instead of failing the file (default: false).
    pub lossy: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { concurrency: DEFAULT_CONCURRENCY, extension: None, lossy: false }
    }
}

impl LoaderConfig {
    /// Creates a new builder for LoaderConfig.
    pub fn builder() -> LoaderConfigBuilder {
        LoaderConfigBuilder::new()
    }
}

/// Builder for LoaderConfig
#[derive(Debug)]
pub struct LoaderConfigBuilder {
    config: LoaderConfig,
}

impl LoaderConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self { config: LoaderConfig::default() }
    }

    /// Set the maximum number of concurrent file reads. Zero is treated as one.
    pub fn concurrency(mut self, value: usize) -> Self {
        self.config.concurrency = value;
        self
    }

    /// Only load files with the given extension
    pub fn extension<S: Into<String>>(mut self, ext: S) -> Self {
        self.config.extension = Some(ext.into());
        self
    }

    /// Decode invalid UTF-8 lossily
    pub fn lossy(mut self, value: bool) -> Self {
        self.config.lossy = value;
        self
    }

    /// Build the LoaderConfig
    pub fn build(self) -> LoaderConfig {
        self.config
    }
}

impl Default for LoaderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A file that could not be loaded
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: SiteconfError,
}

/// Result of loading a directory: every config that loaded plus every file that did not
#[derive(Debug, Default)]
pub struct LoadReport {
    pub configs: SiteConfigRegistry,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// True when every file loaded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, name: String, path: PathBuf, outcome: Result<SiteConfig>) {
        match outcome {
            Ok(config) => {
                debug!(name = %name, "loaded site config");
                self.configs.insert(name, config);
            }
            Err(error) => {
                warn!(path = %path.display(), error = %error, "failed to load site config");
                self.failures.push(LoadFailure { path, error });
            }
        }
    }
}

/// Loads FTR site config directories
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: LoaderConfig,
}

impl ConfigLoader {
    /// Create a new config loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config loader with the given settings
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load every regular file in `dir`, keyed by file name.
    ///
    /// Files are read with at most `concurrency` open at a time. A file that
    /// cannot be read or decoded ends up in [`LoadReport::failures`] and does
    /// not stop the others. A missing directory is an error for the whole load.
    pub async fn load_dir<P: AsRef<Path>>(&self, dir: P) -> Result<LoadReport> {
        let dir = dir.as_ref();
        let mut report = LoadReport::default();

        let files = self.list_files(dir, &mut report).await?;
        let limit = self.config.concurrency.max(1);
        let mut pending = FuturesUnordered::new();

        for (name, path) in files {
            pending.push(self.load_entry(name, path));

            while pending.len() >= limit {
                if let Some((name, path, outcome)) = pending.next().await {
                    report.record(name, path, outcome);
                }
            }
        }

        while let Some((name, path, outcome)) = pending.next().await {
            report.record(name, path, outcome);
        }

        info!(
            dir = %dir.display(),
            loaded = report.configs.len(),
            failed = report.failures.len(),
            "loaded site configs"
        );

        Ok(report)
    }

    /// Load and parse a single config file
    pub async fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<SiteConfig> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SiteconfError::FileNotFound(path.to_path_buf()),
            _ => SiteconfError::ReadError { path: path.to_path_buf(), source: e },
        })?;

        let content = self.decode(path, bytes)?;
        Ok(ConfigParser::parse_string(&content))
    }

    async fn load_entry(&self, name: String, path: PathBuf) -> (String, PathBuf, Result<SiteConfig>) {
        let outcome = self.load_file(&path).await;
        (name, path, outcome)
    }

    fn decode(&self, path: &Path, bytes: Vec<u8>) -> Result<String> {
        match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(e) if self.config.lossy => Ok(String::from_utf8_lossy(e.as_bytes()).into_owned()),
            Err(_) => Err(SiteconfError::InvalidEncoding(path.to_path_buf())),
        }
    }

    /// Regular files in `dir` as (file name, path). Entries whose metadata
    /// cannot be read are reported as failures.
    async fn list_files(&self, dir: &Path, report: &mut LoadReport) -> Result<Vec<(String, PathBuf)>> {
        match tokio::fs::metadata(dir).await {
            Ok(meta) if meta.is_dir() => {}
            _ => return Err(SiteconfError::DirectoryNotFound(dir.to_path_buf())),
        }

        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if let Some(ext) = &self.config.extension
                && path.extension().is_none_or(|e| e != ext.as_str())
            {
                continue;
            }

            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    files.push((name, path));
                }
                Ok(_) => debug!(path = %path.display(), "skipping non-file entry"),
                Err(source) => {
                    let error = SiteconfError::ReadError { path: path.clone(), source };
                    report.failures.push(LoadFailure { path, error });
                }
            }
        }

        Ok(files)
    }

    /// Default config directory (~/.config/siteconf/sites)
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("siteconf").join("sites"))
    }
}
