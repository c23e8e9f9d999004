//! Transitive discovery of every document reachable from a root.
//!
//! The link graph is walked depth-first with an explicit stack (no call
//! recursion) and a visited set. An identifier is inserted into the
//! visited set before its fetch is issued; cyclic or diamond-shaped link
//! graphs therefore terminate with each document fetched at most once.

use std::collections::HashSet;

use tracing::{debug, info, instrument};

use unitdex_shared::{DocumentId, Result};

use crate::fetcher::DocumentFetcher;
use crate::links::extract_links;

/// Walks the corpus link graph starting from a root document.
pub struct Crawler<F> {
    fetcher: F,
}

impl<F: DocumentFetcher> Crawler<F> {
    /// Create a crawler over the given fetcher.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Discover every document transitively linked from `root`.
    ///
    /// Returns the discovered identifiers in order of first discovery,
    /// excluding the root itself (the root is pre-seeded into the visited
    /// set and handled by the caller). Fetching is strictly sequential and
    /// depth-first: a document's links are fully resolved before the next
    /// sibling link is considered. Any failed fetch aborts the whole crawl.
    #[instrument(skip(self), fields(root = %root))]
    pub async fn crawl(&self, root: &DocumentId) -> Result<Vec<DocumentId>> {
        let root_text = self.fetcher.fetch(root).await?;

        let mut visited: HashSet<DocumentId> = HashSet::new();
        visited.insert(root.clone());

        let mut discovered: Vec<DocumentId> = Vec::new();
        let mut stack = vec![extract_links(&root_text).into_iter()];

        while let Some(links) = stack.last_mut() {
            let Some(id) = links.next() else {
                stack.pop();
                continue;
            };

            // Mark before fetching: links back to `id` encountered deeper in
            // the walk must already see it as visited.
            if !visited.insert(id.clone()) {
                continue;
            }
            discovered.push(id.clone());

            debug!(%id, "discovered document");
            let text = self.fetcher.fetch(&id).await?;
            stack.push(extract_links(&text).into_iter());
        }

        info!(discovered = discovered.len(), "crawl complete");
        Ok(discovered)
    }
}
