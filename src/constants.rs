//! Common constants used throughout woformat.

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["woformat.json", "woformat.yml", "woformat.yaml"];

/// Chunk size used when copying templates without filtering
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Suffix of the archive a project packages its own classes into
pub const JAR_SUFFIX: &str = ".jar";

/// Standard token names, wrapped in `@` delimiters when filters are built.
pub const TOKEN_NAME: &str = "NAME";
pub const TOKEN_LOWERC_NAME: &str = "LOWERC_NAME";
pub const TOKEN_JAR_NAME: &str = "JAR_NAME";
pub const TOKEN_JAR_ARRAY: &str = "JAR_ARRAY";

/// Default token delimiter
pub const TOKEN_DELIMITER: &str = "@";
