//! Markdown link-target extraction.
//!
//! Documents reference each other with ordinary markdown links whose
//! targets end in `.md`. Localized variants (the `_ja.md` suffix) are
//! suppressed so the crawl stays within the primary-language corpus.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use unitdex_shared::DocumentId;

/// Reserved suffix of localized document variants, never followed.
const LOCALIZED_SUFFIX: &str = "_ja.md";

/// Matches `](target.md)` — an inline markdown link whose target ends in `.md`.
static MD_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\(([^)]*\.md)\)").expect("link regex"));

/// Extract the document identifiers linked from `text`.
///
/// Returns each distinct target once, in order of first appearance,
/// excluding localized variants. No deduplication happens against anything
/// outside this call; an input without links yields an empty vec.
pub fn extract_links(text: &str) -> Vec<DocumentId> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut links = Vec::new();

    for caps in MD_LINK_RE.captures_iter(text) {
        let target = caps.get(1).expect("capture group").as_str();
        if target.ends_with(LOCALIZED_SUFFIX) {
            continue;
        }
        if seen.insert(target) {
            links.push(DocumentId::from(target));
        }
    }

    links
}
