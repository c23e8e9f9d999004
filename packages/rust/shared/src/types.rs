//! Core domain types for harvested unit tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of one markdown document within the corpus.
///
/// Doubles as the fetch key (resolved against the corpus base URL) and the
/// link-target key extracted from document text. Ordering is byte-wise
/// lexicographic on the inner string; the aggregate output is sorted by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    /// Borrow the identifier as a path-like string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One data row of a qualifying table: column header → cell value.
///
/// Every header of the table appears as a key in every record; cells the
/// source row did not supply are empty strings. Column order carries no
/// meaning downstream, so a sorted map is used and duplicate headers
/// collapse last-wins.
pub type FieldRecord = BTreeMap<String, String>;

/// All records harvested from one qualifying table of one document.
///
/// A document containing several qualifying tables yields several
/// `DocumentTable`s sharing its identifier and title. Never mutated after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTable {
    /// The document the table was found in.
    pub document: DocumentId,
    /// Title from the document's front matter ("Untitled" when absent).
    pub title: String,
    /// Parsed rows, in source order.
    pub records: Vec<FieldRecord>,
}

/// The aggregate result of a full harvest, sorted by document identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Harvest {
    /// One entry per qualifying table across the whole corpus.
    pub table_data: Vec<DocumentTable>,
}
