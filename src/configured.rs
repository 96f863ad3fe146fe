//! Project format driven by a [`FormatConfig`].

use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use log::debug;
use std::path::{Component, Path, PathBuf};

use crate::config::{FormatConfig, TargetConfig};
use crate::error::{Error, Result};
use crate::filter::{FilterSet, FilterSetCollection};
use crate::format::{standard_filters, ProjectFormat};
use crate::target::Targets;

/// [`ProjectFormat`] whose targets, templates and filters come from configuration.
///
/// Target paths are resolved against the output directory given at construction.
#[derive(Debug, Clone)]
pub struct ConfiguredFormat {
    config: FormatConfig,
    targets: IndexMap<PathBuf, TargetConfig>,
}

impl ConfiguredFormat {
    /// # Errors
    /// * `Error::ValidationError` if a target path is empty, absolute or leaves the output directory
    /// * `Error::ConfigError` if two targets share a path
    pub fn new<P: AsRef<Path>>(config: FormatConfig, output_root: P) -> Result<Self> {
        let output_root = output_root.as_ref();
        let mut targets = IndexMap::new();

        for target in &config.targets {
            validate_target_path(&target.path)?;
            let path = output_root.join(&target.path);
            if targets.insert(path, target.clone()).is_some() {
                return Err(Error::ConfigError(format!(
                    "Duplicate target: '{}'",
                    target.path
                )));
            }
        }

        Ok(Self { config, targets })
    }

    /// Keeps only the targets whose configured path matches one of `patterns`.
    /// An empty pattern list keeps everything.
    pub fn retain_matching<S: AsRef<str>>(&mut self, patterns: &[S]) -> Result<()> {
        if patterns.is_empty() {
            return Ok(());
        }
        let glob_set = build_glob_set(patterns)?;
        self.targets.retain(|_, target| {
            let keep = glob_set.is_match(&target.path);
            if !keep {
                debug!("Skipping target {}", target.path);
            }
            keep
        });
        Ok(())
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    fn lookup(&self, target: &Path) -> Result<&TargetConfig> {
        self.targets.get(target).ok_or_else(|| {
            Error::ConfigError(format!("No template rule for target {}", target.display()))
        })
    }
}

impl ProjectFormat for ConfiguredFormat {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn has_classes(&self) -> bool {
        self.config.has_classes
    }

    fn targets(&self) -> Targets {
        self.targets.keys().cloned().collect()
    }

    fn template_for_target(&self, target: &Path) -> Result<String> {
        Ok(self.lookup(target)?.template.clone())
    }

    fn filters_for_target(&self, target: &Path) -> Result<FilterSetCollection> {
        let target = self.lookup(target)?;
        let mut filters = FilterSetCollection::new();
        if target.raw {
            return Ok(filters);
        }

        filters.add(target.filters.iter().collect::<FilterSet>());
        filters.add(self.config.filters.iter().collect::<FilterSet>());
        if self.config.standard_filters {
            filters.add(standard_filters(
                &self.config.name,
                self.config.has_classes,
                &self.config.libs,
                self.config.line_ending,
            ));
        }
        Ok(filters)
    }
}

fn validate_target_path(path: &str) -> Result<()> {
    let escapes = Path::new(path)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if path.trim().is_empty() || escapes {
        return Err(Error::ValidationError(format!(
            "Invalid target path: '{path}'"
        )));
    }
    Ok(())
}

fn build_glob_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern.as_ref()).map_err(|e| {
            Error::ConfigError(format!("Invalid target pattern: {e}"))
        })?);
    }
    builder
        .build()
        .map_err(|e| Error::ConfigError(format!("Invalid target pattern: {e}")))
}
