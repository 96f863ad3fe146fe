//! Template lookup.
//! Resolves template identifiers to readable byte streams, either from a
//! directory on disk or from templates held in memory.

use crate::error::{Error, Result};
use log::debug;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};

/// Trait for opening templates by identifier.
pub trait ResourceLoader {
    /// Opens the template named by `template`.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if no template exists under that identifier
    fn open(&self, template: &str) -> Result<Box<dyn Read>>;
}

/// Loader for templates stored under a root directory.
///
/// Identifiers are relative paths such as `woapp/Info.plist`; absolute paths
/// and `..` components are rejected so lookups stay inside the root.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, template: &str) -> Result<PathBuf> {
        let relative = Path::new(template);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if template.is_empty() || escapes {
            return Err(Error::ValidationError(format!(
                "Invalid template identifier: '{template}'"
            )));
        }
        Ok(self.root.join(relative))
    }
}

impl ResourceLoader for DirectoryLoader {
    fn open(&self, template: &str) -> Result<Box<dyn Read>> {
        let path = self.resolve(template)?;
        if !path.is_file() {
            return Err(Error::TemplateNotFound {
                template: template.to_string(),
            });
        }
        debug!("Opening template {}", path.display());
        let file = File::open(&path).map_err(Error::IoError)?;
        Ok(Box::new(file))
    }
}

/// Loader serving templates from memory, e.g. ones embedded with `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    templates: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>, B: Into<Vec<u8>>>(&mut self, template: S, content: B) {
        self.templates.insert(template.into(), content.into());
    }

    pub fn with<S: Into<String>, B: Into<Vec<u8>>>(mut self, template: S, content: B) -> Self {
        self.insert(template, content);
        self
    }
}

impl ResourceLoader for MemoryLoader {
    fn open(&self, template: &str) -> Result<Box<dyn Read>> {
        match self.templates.get(template) {
            Some(content) => Ok(Box::new(Cursor::new(content.clone()))),
            None => Err(Error::TemplateNotFound {
                template: template.to_string(),
            }),
        }
    }
}
