//! Loader for harvester configuration with YAML + environment overlays.
//!
//! Sources, lowest precedence first: built-in defaults, a YAML file, inline
//! YAML (tests), then `MEEPLE__`-prefixed environment variables where `__`
//! separates nesting levels (`MEEPLE__CRAWL__PAGES=3`). After merging,
//! `${VAR}` placeholders in string values are expanded.
use config::{Config, Environment, File};
use meeple_catalog::SelectorSpec;
use meeple_common::OutputFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub use config::ConfigError;
pub use meeple_common::observability::LoggingConfig;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Placeholder replaced by the page number in [`SourceConfig::url_template`].
pub const PAGE_PLACEHOLDER: &str = "{page}";
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://hobbygames.ru/nastolnie/ekbg?page={page}&parameter_type=0";
pub const DEFAULT_CONFIG_FILE: &str = "meeple.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeepleConfig {
    pub source: SourceConfig,
    pub crawl: CrawlConfig,
    pub selectors: SelectorSpec,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url_template: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    pub first_page: u32,
    /// Number of pages to fetch, starting at `first_page`.
    pub pages: u32,
    /// Pages in flight at once. Output order does not depend on it.
    pub concurrency: usize,
    /// `None` lets a request wait indefinitely.
    pub timeout_secs: Option<u64>,
    /// Sent as `User-Agent` when set; otherwise the client default is used.
    pub user_agent: Option<String>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            first_page: 1,
            pages: 9,
            concurrency: 1,
            timeout_secs: None,
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl MeepleConfig {
    /// Reject values the crawler cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.source.url_template.contains(PAGE_PLACEHOLDER) {
            return Err(ConfigError::Message(format!(
                "source.url_template must contain `{PAGE_PLACEHOLDER}`: {}",
                self.source.url_template
            )));
        }
        if self.crawl.first_page == 0 {
            return Err(ConfigError::Message("crawl.first_page starts at 1".into()));
        }
        if self.crawl.pages == 0 {
            return Err(ConfigError::Message("crawl.pages must be at least 1".into()));
        }
        if self.crawl.concurrency == 0 {
            return Err(ConfigError::Message(
                "crawl.concurrency must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct MeepleConfigLoader {
    files: Vec<(PathBuf, bool)>,
    inline: Vec<String>,
}

impl Default for MeepleConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MeepleConfigLoader {
    /// Start with built-in defaults plus `MEEPLE__` env overrides.
    ///
    /// ```
    /// use meeple_config::MeepleConfigLoader;
    ///
    /// let config = MeepleConfigLoader::new()
    ///     .with_yaml_str("crawl:\n  pages: 2")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.crawl.pages, 2);
    /// assert_eq!(config.crawl.first_page, 1);
    /// assert_eq!(config.selectors.price, "span.price");
    /// ```
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            inline: Vec::new(),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; the `config` crate
    /// infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files.push((path.as_ref().to_path_buf(), true));
        self
    }

    /// Attach a file that is silently skipped when absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files.push((path.as_ref().to_path_buf(), false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use meeple_common::OutputFormat;
    /// use meeple_config::MeepleConfigLoader;
    ///
    /// let cfg = MeepleConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// output:
    ///   format: json
    /// selectors:
    ///   card: ".tile"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.output.format, OutputFormat::Json);
    /// assert_eq!(cfg.selectors.card, ".tile");
    /// assert_eq!(cfg.selectors.title, ".name");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.inline.push(yaml.to_string());
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed, validated config.
    ///
    /// ```
    /// use meeple_config::MeepleConfigLoader;
    ///
    /// unsafe { std::env::set_var("LISTING_HOST", "shop.example"); }
    ///
    /// let config = MeepleConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// source:
    ///   url_template: "https://${LISTING_HOST}/games?page={page}"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.source.url_template, "https://shop.example/games?page={page}");
    ///
    /// unsafe { std::env::remove_var("LISTING_HOST"); }
    /// ```
    pub fn load(self) -> Result<MeepleConfig, ConfigError> {
        let defaults = Config::try_from(&MeepleConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);

        for (path, required) in &self.files {
            builder = builder.add_source(File::from(path.as_path()).required(*required));
        }
        for yaml in &self.inline {
            builder = builder.add_source(File::from_str(yaml, config::FileFormat::Yaml));
        }
        builder = builder.add_source(
            Environment::with_prefix("MEEPLE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        // Recursively expand environment variables
        expand_env_in_value(&mut v);

        let typed: MeepleConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.validate()?;

        Ok(typed)
    }
}
