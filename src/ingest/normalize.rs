//! Cleaning heuristics for noisy extracted text
//!
//! PDF extraction routinely leaks encoding artifacts into the text layer:
//! null bytes, replacement characters, escaped-unicode residue and stray
//! table pipes. Everything outside printable ASCII (plus line structure)
//! is deliberately flattened to a space before chunking and embedding.

use once_cell::sync::Lazy;
use regex::Regex;

/// Escaped-unicode residue left behind by some PDF text extractors.
static UNICODE_ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\u[0-9a-fA-F]{4}").expect("unicode escape regex"));

/// Table-border artifact: one or more pipes followed by whitespace.
static PIPE_ARTIFACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|+\s+").expect("pipe artifact regex"));

/// Normalize raw extracted text into clean, chunkable form.
///
/// Total and idempotent: always returns a string (possibly empty), and
/// `normalize(normalize(x)) == normalize(x)` for all inputs.
///
/// Paragraph structure is preserved as at most one blank line so the
/// chunker's paragraph-priority split still has boundaries to work with.
pub fn normalize(raw: &str) -> String {
    // Drop hard artifacts, flatten everything non-printable to a space.
    let mut filtered = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\0' | '\u{FFFD}' => {}
            '\r' => {}
            '\n' | '\t' => filtered.push(ch),
            c if (' '..='~').contains(&c) => filtered.push(c),
            _ => filtered.push(' '),
        }
    }

    let stripped = UNICODE_ESCAPE_RE.replace_all(&filtered, " ");
    let stripped = PIPE_ARTIFACT_RE.replace_all(&stripped, " ");

    // Collapse horizontal whitespace per line, cap blank runs at one line.
    let mut out = String::with_capacity(stripped.len());
    let mut pending_blank = false;
    let mut wrote_line = false;
    for line in stripped.lines() {
        let collapsed = collapse_spaces(line);
        if collapsed.is_empty() {
            pending_blank = wrote_line;
            continue;
        }
        if wrote_line {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        out.push_str(&collapsed);
        wrote_line = true;
        pending_blank = false;
    }

    out
}

/// Collapse runs of spaces/tabs to a single space and trim the line.
fn collapse_spaces(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    let mut prev_space = false;
    for ch in line.chars() {
        if ch == ' ' || ch == '\t' {
            if !prev_space {
                result.push(' ');
                prev_space = true;
            }
        } else {
            result.push(ch);
            prev_space = false;
        }
    }
    result.trim().to_string()
}
