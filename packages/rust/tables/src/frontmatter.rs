//! Front-matter title extraction.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Fallback title for documents without usable front matter.
pub const UNTITLED: &str = "Untitled";

/// Matches a leading `---`-delimited front-matter block and captures its body.
static FRONT_MATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\r?\n(.+?)\r?\n---").expect("front matter regex"));

/// Matches a `title:` key at the start of a front-matter line.
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^title:\s*(.*)$").expect("title regex"));

/// Extract the document title from its leading front-matter block.
///
/// Returns the trimmed `title:` value, or [`UNTITLED`] when the document has
/// no front-matter block or the block has no `title:` key. Never fails.
pub fn extract_title(text: &str) -> String {
    let Some(block) = FRONT_MATTER_RE
        .captures(text)
        .map(|caps| caps.get(1).expect("capture group").as_str())
    else {
        debug!("no front-matter block, using fallback title");
        return UNTITLED.to_string();
    };

    match TITLE_RE.captures(block) {
        Some(caps) => caps[1].trim().to_string(),
        None => {
            debug!("front matter has no title key, using fallback title");
            UNTITLED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_title_from_front_matter() {
        let md = "---\nlayout: page\ntitle: Oscillator Units\n---\n\n# Body\n";
        assert_eq!(extract_title(md), "Oscillator Units");
    }

    #[test]
    fn trims_title_value() {
        let md = "---\ntitle:    Spaced Out   \n---\nbody";
        assert_eq!(extract_title(md), "Spaced Out");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let md = "---\r\ntitle: Windows Doc\r\n---\r\nbody";
        assert_eq!(extract_title(md), "Windows Doc");
    }

    #[test]
    fn falls_back_without_front_matter() {
        assert_eq!(extract_title("# Just a heading\n\nProse.\n"), UNTITLED);
        assert_eq!(extract_title(""), UNTITLED);
    }

    #[test]
    fn falls_back_without_title_key() {
        let md = "---\nlayout: page\nauthor: someone\n---\nbody";
        assert_eq!(extract_title(md), UNTITLED);
    }

    #[test]
    fn block_must_lead_the_document() {
        let md = "intro text\n---\ntitle: Too Late\n---\n";
        assert_eq!(extract_title(md), UNTITLED);
    }

    #[test]
    fn title_key_must_start_its_line() {
        let md = "---\nsubtitle: nope\nmy title: also nope\n---\n";
        assert_eq!(extract_title(md), UNTITLED);
    }
}
