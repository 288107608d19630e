use crate::error::{Result, SiteconfError};
use crate::siteconfig::directives::SiteConfig;
use std::collections::HashMap;

/// Loaded site configs keyed by file name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteConfigRegistry {
    configs: HashMap<String, SiteConfig>,
}

impl SiteConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a config under `name`, replacing any previous entry
    pub fn insert(&mut self, name: String, config: SiteConfig) {
        self.configs.insert(name, config);
    }

    /// Config stored under an exact file name
    pub fn get(&self, name: &str) -> Option<&SiteConfig> {
        self.configs.get(name)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// File names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.configs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SiteConfig)> {
        self.configs.iter().map(|(name, config)| (name.as_str(), config))
    }

    /// First config matching `host`, with the file name it was stored under.
    ///
    /// Candidates are tried from most to least specific (see
    /// [`candidate_names`]). Configs are never merged.
    pub fn for_host(&self, host: &str) -> Option<(&str, &SiteConfig)> {
        candidate_names(host)
            .into_iter()
            .find_map(|name| self.configs.get_key_value(&name))
            .map(|(name, config)| (name.as_str(), config))
    }

    /// Config for the host of `url`
    pub fn for_url(&self, url: &str) -> Result<Option<(&str, &SiteConfig)>> {
        let url = url::Url::parse(url).map_err(|e| SiteconfError::InvalidUrl(e.to_string()))?;

        let host = url
            .host_str()
            .ok_or_else(|| SiteconfError::InvalidUrl("No host found in URL".to_string()))?;

        Ok(self.for_host(host))
    }
}

impl FromIterator<(String, SiteConfig)> for SiteConfigRegistry {
    fn from_iter<I: IntoIterator<Item = (String, SiteConfig)>>(iter: I) -> Self {
        Self { configs: iter.into_iter().collect() }
    }
}

/// Config file names for a host, most specific first.
///
/// `www.news.example.com` yields `www.news.example.com.txt`,
/// `news.example.com.txt`, `.www.news.example.com.txt`,
/// `.news.example.com.txt`, then each parent domain with at least two labels
/// as `parent.txt` and `.parent.txt`.
pub fn candidate_names(host: &str) -> Vec<String> {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let mut names = vec![format!("{host}.txt")];

    let without_www = host.strip_prefix("www.");
    if let Some(bare) = without_www {
        names.push(format!("{bare}.txt"));
    }

    names.push(format!(".{host}.txt"));
    if let Some(bare) = without_www {
        names.push(format!(".{bare}.txt"));
    }

    let parts: Vec<&str> = host.split('.').collect();
    for i in 1..parts.len().saturating_sub(1) {
        let parent = parts[i..].join(".");
        for name in [format!("{parent}.txt"), format!(".{parent}.txt")] {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    names
}
