//! woformat generates the deployment files of a packaged project
//! (property lists, descriptors, launch scripts) from static templates,
//! optionally replacing tokens while copying.

/// Command-line interface module for the woformat application
pub mod cli;

/// Configuration handling (woformat.json, woformat.yml, woformat.yaml)
pub mod config;

/// Project format described entirely by configuration
pub mod configured;

/// Common constants
pub mod constants;

/// Template to destination copying, raw or token-filtered
pub mod copy;

/// Error types and handling for the woformat application
pub mod error;

/// Token filter sets
pub mod filter;

/// Target enumeration, template resolution and the materialization loop
pub mod format;

/// JAR list fragments for property-list descriptors
pub mod libs;

/// Line terminators written into filtered files
pub mod line_ending;

/// Template lookup from disk or memory
pub mod loader;

/// Logger setup for the command-line tool
pub mod logger;

/// Restartable enumeration of the files a run generates
pub mod target;
