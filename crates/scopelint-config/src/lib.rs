use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glob::Pattern;
use scopelint_engine::{ScopeExpression, SelectorError, WalkerConfig};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid scope {scope:?} for rule {rule}: {source}")]
    InvalidScope {
        rule: String,
        scope: String,
        source: SelectorError,
    },

    #[error("Invalid include pattern {pattern:?}: {source}")]
    InvalidInclude {
        pattern: String,
        source: glob::PatternError,
    },
}

/// A rule's settings as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Scope expressions; all must match for the rule to apply.
    pub scope: Vec<String>,
}

/// A rule ready to be matched against scope paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub scope: ScopeExpression,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Replaces the default skipped tags. Listing `alt` skips image alt text.
    pub skipped_scopes: Vec<String>,
    /// Added to the default skipped classes.
    pub ignored_classes: Vec<String>,
    /// Replaces the default masked inline scopes.
    pub ignored_scopes: Vec<String>,
    /// Glob patterns a discovered file must match. Empty means everything.
    pub include: Vec<String>,
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in include patterns
        config.include = config
            .include
            .iter()
            .map(|pattern| Self::expand(pattern).unwrap_or_else(|| pattern.clone()))
            .collect();

        // Surface malformed selectors and patterns now rather than mid-walk
        config.rules()?;
        config.file_filter()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/scopelint");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Skip and ignore lists for the walker, defaults overridden by this
    /// config.
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::default()
            .with_skipped_scopes(&self.skipped_scopes)
            .with_ignored_classes(&self.ignored_classes)
            .with_ignored_scopes(&self.ignored_scopes)
    }

    /// Parses every rule's scope, in rule-name order.
    pub fn rules(&self) -> Result<Vec<Rule>, ConfigError> {
        self.rules
            .iter()
            .map(|(name, rule)| {
                let scope = ScopeExpression::parse(&rule.scope).map_err(|source| {
                    let scope = match &source {
                        SelectorError::Empty { raw } | SelectorError::EmptySegment { raw } => {
                            raw.clone()
                        }
                    };
                    ConfigError::InvalidScope {
                        rule: name.clone(),
                        scope,
                        source,
                    }
                })?;
                Ok(Rule {
                    name: name.clone(),
                    scope,
                })
            })
            .collect()
    }

    pub fn file_filter(&self) -> Result<FileFilter, ConfigError> {
        let patterns = self
            .include
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| ConfigError::InvalidInclude {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(FileFilter { patterns })
    }

    fn expand(value: &str) -> Option<String> {
        match shellexpand::full(value) {
            Ok(expanded) => Some(expanded.into_owned()),
            Err(_) => None,
        }
    }
}

/// Compiled `include` patterns.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    patterns: Vec<Pattern>,
}

impl FileFilter {
    /// Whether `path` should be linted. With no patterns every path is.
    pub fn matches(&self, path: &Path) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches_path(path))
    }
}
