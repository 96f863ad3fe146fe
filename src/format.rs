//! Core materialization orchestration.
//! A [`ProjectFormat`] says which files a build produces, which template each
//! one comes from and which filters apply; `process_templates` runs the copy
//! for every target in order.

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::constants::{
    TOKEN_DELIMITER, TOKEN_JAR_ARRAY, TOKEN_JAR_NAME, TOKEN_LOWERC_NAME, TOKEN_NAME,
};
use crate::copy::{CopyEngine, CopyMode};
use crate::error::Result;
use crate::filter::{FilterSet, FilterSetCollection};
use crate::libs::{jar_name, lib_string};
use crate::line_ending::LineEnding;
use crate::loader::ResourceLoader;
use crate::target::Targets;

/// A file produced by a materialization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    pub target: PathBuf,
    pub template: String,
    pub mode: CopyMode,
}

/// Outcome of [`ProjectFormat::process_templates`], in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub files: Vec<Materialized>,
}

impl Report {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Describes the deployment files of one kind of build artifact.
pub trait ProjectFormat {
    /// Name of the project being built.
    fn name(&self) -> &str;

    /// Whether the project packages compiled classes of its own.
    fn has_classes(&self) -> bool {
        true
    }

    /// Paths of the files to create during the build.
    fn targets(&self) -> Targets;

    /// Template used to build `target`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if no template is configured for `target`
    fn template_for_target(&self, target: &Path) -> Result<String>;

    /// Filters applied while generating `target`. An empty collection means
    /// the template is copied unchanged.
    ///
    /// # Errors
    /// * `Error::ConfigError` if `target` is unknown to this format
    fn filters_for_target(&self, target: &Path) -> Result<FilterSetCollection>;

    /// Creates every target from its template.
    ///
    /// Targets are processed one at a time in enumeration order. The first
    /// failure aborts the run; files generated before it are kept.
    fn process_templates(&self, loader: &dyn ResourceLoader, engine: &CopyEngine) -> Result<Report> {
        let mut report = Report::default();

        for target in &self.targets() {
            let template = self.template_for_target(target)?;
            let filters = self.filters_for_target(target)?;
            debug!("Generating {} from template '{}'", target.display(), template);

            let source = loader.open(&template)?;
            let mode = engine.copy_file(source, target, Some(&filters))?;
            info!("{}: '{}'", mode, target.display());

            report.files.push(Materialized {
                target: target.clone(),
                template,
                mode,
            });
        }

        Ok(report)
    }
}

/// Tokens every project format understands, delimited as `@NAME@`.
///
/// * `@NAME@` - project name
/// * `@LOWERC_NAME@` - lower-cased project name
/// * `@JAR_NAME@` - archive holding the project's classes
/// * `@JAR_ARRAY@` - `<array>` fragment listing all required JARs
pub fn standard_filters<I, S>(
    name: &str,
    has_classes: bool,
    ext_libs: I,
    line_ending: LineEnding,
) -> FilterSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = FilterSet::with_delimiters(TOKEN_DELIMITER, TOKEN_DELIMITER);
    set.insert(TOKEN_NAME, name);
    set.insert(TOKEN_LOWERC_NAME, name.to_lowercase());
    set.insert(TOKEN_JAR_NAME, jar_name(name));
    set.insert(
        TOKEN_JAR_ARRAY,
        lib_string(name, has_classes, ext_libs, line_ending),
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_filters() {
        let set = standard_filters("Foo", true, ["a.jar"], LineEnding::Lf);
        assert_eq!(set.get("@NAME@"), Some("Foo"));
        assert_eq!(set.get("@LOWERC_NAME@"), Some("foo"));
        assert_eq!(set.get("@JAR_NAME@"), Some("foo.jar"));
        assert_eq!(
            set.get("@JAR_ARRAY@"),
            Some("<array>\n\t\t<string>foo.jar</string>\n\t\t<string>a.jar</string>\n\t</array>")
        );
    }
}
