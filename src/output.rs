//! Output Writer
//!
//! Appends generated content to a target file, deriving a default filename
//! from the input when none is given. Files are never truncated: a visible
//! divider separates successive entries so repeated runs accumulate a
//! readable log.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::constants::output as output_const;
use crate::types::{Message, Result, Source};

/// Append content to the resolved target, returning the path written.
///
/// Resolution: an absent target means the working directory; a target with
/// no extension that does not exist yet is created as a directory; a
/// directory target is joined with the filename derived from the input.
pub fn write(content: &str, target: Option<&Path>, source: &Source, suffix: &str) -> Result<PathBuf> {
    let mut path = target
        .map(Path::to_path_buf)
        .map_or_else(std::env::current_dir, Ok)?;

    if !path.exists() && path.extension().is_none() {
        std::fs::create_dir_all(&path)?;
    }

    if path.is_dir() {
        path = path.join(derive_filename(source, suffix));
    }

    let existing_len = path.metadata().map(|m| m.len()).unwrap_or(0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if existing_len > 0 {
        file.write_all(output_const::ENTRY_DIVIDER.as_bytes())?;
    }
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;

    debug!("Output written to {}", path.display());
    Ok(path)
}

/// Derive the default output filename for a source.
pub fn derive_filename(source: &Source, suffix: &str) -> String {
    match source {
        Source::File(path) => {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            format!("{}{}", stem, suffix)
        }
        Source::Url(url) => format!("{}{}", sanitize_url(url), suffix),
    }
}

/// Sanitize a URL into a filesystem-safe name: scheme stripped, path
/// separators become `_`, reserved characters become `-`, bounded length.
pub fn sanitize_url(url: &Url) -> String {
    let mut raw = String::new();
    raw.push_str(url.host_str().unwrap_or("page"));
    if let Some(port) = url.port() {
        raw.push_str(&format!("-{}", port));
    }
    raw.push_str(url.path());
    if let Some(query) = url.query() {
        raw.push('-');
        raw.push_str(query);
    }

    let sanitized: String = raw
        .trim_end_matches('/')
        .chars()
        .map(|c| match c {
            '/' => '_',
            c if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' => c,
            _ => '-',
        })
        .collect();

    sanitized
        .chars()
        .take(output_const::MAX_DERIVED_NAME_LEN)
        .collect()
}

/// Render the full transcript: each message under a role heading, then the
/// generated text under a response heading. Used by `--include-prompt`.
pub fn format_transcript(messages: &[Message], response: &str) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(&format!("# {}\n\n{}\n\n", message.role, message.content));
    }
    out.push_str(&format!("# response\n\n{}", response));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fresh_target_has_no_leading_divider() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("out.md");

        let source = Source::parse("doc.txt");
        write("first", Some(&target), &source, output_const::GENERATED_SUFFIX).unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "first\n");
    }

    #[test]
    fn test_second_write_appends_with_divider() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("out.md");
        let source = Source::parse("doc.txt");

        write("first", Some(&target), &source, output_const::GENERATED_SUFFIX).unwrap();
        write("second", Some(&target), &source, output_const::GENERATED_SUFFIX).unwrap();

        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "first\n\n------\n\nsecond\n"
        );
    }

    #[test]
    fn test_directory_target_joins_derived_name() {
        let temp = TempDir::new().unwrap();
        let source = Source::parse("report.pdf");

        let path = write(
            "content",
            Some(temp.path()),
            &source,
            output_const::GENERATED_SUFFIX,
        )
        .unwrap();

        assert_eq!(path, temp.path().join("report.doc-gpt.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content\n");
    }

    #[test]
    fn test_nonexistent_extensionless_target_becomes_directory() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("results");
        let source = Source::parse("notes.md");

        let path = write(
            "content",
            Some(&target),
            &source,
            output_const::GENERATED_SUFFIX,
        )
        .unwrap();

        assert!(target.is_dir());
        assert_eq!(path, target.join("notes.doc-gpt.md"));
    }

    #[test]
    fn test_sanitize_url_is_deterministic_and_safe() {
        let url = Url::parse("https://example.com/a/b?c=1").unwrap();
        let first = sanitize_url(&url);
        let second = sanitize_url(&url);

        assert_eq!(first, second);
        assert_eq!(first, "example.com_a_b-c-1");
        assert!(!first.contains('/'));
        assert!(!first.contains('?'));
        assert!(!first.contains('='));
    }

    #[test]
    fn test_sanitize_url_bounded_length() {
        let long_path = "x".repeat(400);
        let url = Url::parse(&format!("https://example.com/{}", long_path)).unwrap();
        assert!(sanitize_url(&url).len() <= output_const::MAX_DERIVED_NAME_LEN);
    }

    #[test]
    fn test_derived_url_filename_ends_with_suffix() {
        let source = Source::parse("https://example.com/a/b?c=1");
        let name = derive_filename(&source, output_const::GENERATED_SUFFIX);
        assert_eq!(name, "example.com_a_b-c-1.doc-gpt.md");
    }

    #[test]
    fn test_format_transcript_labels_roles() {
        let messages = vec![Message::system("rules"), Message::user("ask")];
        let transcript = format_transcript(&messages, "reply");
        assert!(transcript.starts_with("# system\n\nrules\n\n"));
        assert!(transcript.contains("# user\n\nask\n\n"));
        assert!(transcript.ends_with("# response\n\nreply"));
    }
}
