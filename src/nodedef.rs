//! Minimal `node.def` extractor.
//!
//! A node definition file is line-oriented text with three markers:
//! `type:`, `help:` and `multi:`. Extraction is best-effort and total —
//! malformed or missing markers degrade to defaults, never to an error,
//! because plenty of real template trees carry half-written definitions.
use once_cell::sync::Lazy;
use regex::Regex;

// ------------------------------- Types ------------------------------------ //

/// Parsed view of one `node.def`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeDef {
    /// Declared scalar type names, in declaration order, duplicates kept.
    pub types: Vec<String>,
    /// Trimmed remainder of the `help:` line.
    pub help: Option<String>,
    /// True iff a `multi:` marker appears anywhere in the file.
    pub multi: bool,
}

// ------------------------------ Extraction -------------------------------- //

static TYPE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^type:([^\n]*)").unwrap());
static HELP_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^help:([^\n]*)").unwrap());

/// Extract a [`NodeDef`] from raw definition text.
///
/// Marker matching is line-based and first-match-wins. The `type:` line drops
/// everything after the first `;` — an inline-comment convention inherited
/// from the source format, preserved as-is.
pub fn parse_def(text: &str) -> NodeDef {
    let mut def = NodeDef::default();

    if let Some(caps) = TYPE_LINE.captures(text) {
        let decl = caps[1].trim();
        let decl = decl.split(';').next().unwrap_or("");
        def.types = decl.split(',').map(|t| t.trim().to_string()).collect();
    }

    if let Some(caps) = HELP_LINE.captures(text) {
        def.help = Some(caps[1].trim().to_string());
    }

    // presence-only: any value after the marker is ignored
    def.multi = text.contains("multi:");

    def
}

// ------------------------------- Tests ------------------------------------ //
