//! Source Resolver
//!
//! Expands a user-supplied path, URL, or directory into the ordered list of
//! extractable inputs to process.
//!
//! ## Empty-vs-error policy
//!
//! A nonexistent path, an unsupported single-file extension, and a directory
//! with no recognized children all resolve to an empty list; the caller
//! reports "no valid files found" without raising. (The original treated
//! some of these cases inconsistently; here empty always means empty.)

use tracing::debug;

use crate::extract::is_recognized;
use crate::types::Source;

/// Resolve a raw input string into the list of sources to process.
pub fn resolve(input: &str) -> Vec<Source> {
    match Source::parse(input) {
        url @ Source::Url(_) => vec![url],
        Source::File(path) => {
            if path.is_file() {
                if is_recognized(&path) {
                    return vec![Source::File(path)];
                }
                debug!("Unsupported extension for {}", path.display());
                return Vec::new();
            }

            if path.is_dir() {
                let Ok(entries) = std::fs::read_dir(&path) else {
                    debug!("Cannot read directory {}", path.display());
                    return Vec::new();
                };
                return entries
                    .flatten()
                    .map(|entry| entry.path())
                    .filter(|p| p.is_file() && is_recognized(p))
                    .map(Source::File)
                    .collect();
            }

            debug!("{} does not exist", path.display());
            Vec::new()
        }
    }
}
