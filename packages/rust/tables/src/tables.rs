//! Pipe-delimited table extraction and row parsing.

use unitdex_shared::FieldRecord;

/// Header markers a block must contain to qualify as a unit table.
pub const REQUIRED_HEADERS: [&str; 4] =
    ["| Name |", "| Developer |", "| Description |", "| Platforms |"];

/// Value substituted when a row has fewer cells than the header defines.
const EMPTY_CELL: &str = "";

/// Scanner state: inside or outside a run of pipe-prefixed lines.
enum Scan {
    Seeking,
    Collecting,
}

/// Isolate the qualifying table blocks of a document.
///
/// A block is a maximal run of consecutive lines beginning with `|`; it
/// closes at the first non-pipe line or at end of input, and is trimmed.
/// Collected blocks are then filtered to those containing every marker in
/// [`REQUIRED_HEADERS`] — anything else (layout tables, other schemas) is
/// silently discarded.
pub fn extract_tables(text: &str) -> Vec<String> {
    let mut blocks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut state = Scan::Seeking;

    for line in text.lines() {
        let is_pipe = line.starts_with('|');
        match state {
            Scan::Seeking if is_pipe => {
                state = Scan::Collecting;
                current.push_str(line);
                current.push('\n');
            }
            Scan::Seeking => {}
            Scan::Collecting if is_pipe => {
                current.push_str(line);
                current.push('\n');
            }
            Scan::Collecting => {
                blocks.push(current.trim().to_string());
                current.clear();
                state = Scan::Seeking;
            }
        }
    }

    // Input may end while still collecting.
    if matches!(state, Scan::Collecting) && !current.is_empty() {
        blocks.push(current.trim().to_string());
    }

    blocks.retain(|block| REQUIRED_HEADERS.iter().all(|h| block.contains(h)));
    blocks
}

/// Parse one table block into header-keyed records.
///
/// Line 0 defines the headers; line 1 is assumed to be the separator row
/// and skipped without validation. Each remaining line becomes one record:
/// values are zipped to headers positionally, short rows are padded with
/// empty strings, and extra values beyond the header count are dropped.
/// A block with fewer than three lines yields no records.
pub fn parse_table(block: &str) -> Vec<FieldRecord> {
    let lines: Vec<&str> = block.trim().lines().collect();
    let Some(header_line) = lines.first() else {
        return Vec::new();
    };
    let headers = split_row(header_line);

    lines
        .iter()
        .skip(2)
        .map(|line| {
            let values = split_row(line);
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = values
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| EMPTY_CELL.to_string());
                    (header.clone(), value)
                })
                .collect()
        })
        .collect()
}

/// Split a pipe row into trimmed, non-empty cell segments.
///
/// Empty segments are artifacts of the leading/trailing pipes and are
/// dropped — which also means an intentionally blank mid-row cell shifts
/// the values after it; short rows are padded back out by [`parse_table`].
fn split_row(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}
