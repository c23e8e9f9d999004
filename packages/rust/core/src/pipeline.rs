//! End-to-end harvest: root → crawl → per-document tables → sorted output.

use tracing::{debug, info, instrument};

use unitdex_crawler::{Crawler, DocumentFetcher, HttpFetcher};
use unitdex_shared::{DocumentId, DocumentTable, Harvest, Result};
use unitdex_tables::{extract_tables, extract_title, parse_table};

/// The corpus entry point everything else is reachable from.
pub const ROOT_DOCUMENT: &str = "01_unit_index.md";

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before each document is fetched for table harvesting.
    fn document(&self, id: &DocumentId, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, harvest: &Harvest);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn document(&self, _id: &DocumentId, _current: usize, _total: usize) {}
    fn done(&self, _harvest: &Harvest) {}
}

/// Harvest the published corpus from the fixed root document.
///
/// The root identifier is a constant of the system, not an input; callers
/// wanting a different corpus or progress reporting use [`harvest`]
/// directly.
pub async fn load() -> Result<Harvest> {
    let fetcher = HttpFetcher::for_corpus()?;
    harvest(&fetcher, &DocumentId::from(ROOT_DOCUMENT), &SilentProgress).await
}

/// Run the full harvest pipeline against an arbitrary fetcher and root.
///
/// 1. Crawl: discover every document transitively linked from `root`
/// 2. Harvest: fetch root + discovered documents, extract title and
///    qualifying tables, parse each table into records
/// 3. Aggregate: one [`DocumentTable`] per qualifying table, sorted by
///    document identifier (stable, so table order within a document holds)
///
/// Documents without a qualifying table do not appear in the output. A
/// failed fetch at any point aborts the whole harvest.
#[instrument(skip_all, fields(root = %root))]
pub async fn harvest<F: DocumentFetcher>(
    fetcher: &F,
    root: &DocumentId,
    progress: &dyn ProgressReporter,
) -> Result<Harvest> {
    progress.phase("Discovering documents");
    let crawler = Crawler::new(fetcher);
    let discovered = crawler.crawl(root).await?;

    progress.phase("Harvesting tables");
    let mut documents = Vec::with_capacity(discovered.len() + 1);
    documents.push(root.clone());
    documents.extend(discovered);

    let mut table_data: Vec<DocumentTable> = Vec::new();
    let total = documents.len();

    for (i, id) in documents.iter().enumerate() {
        progress.document(id, i + 1, total);

        let text = fetcher.fetch(id).await?;
        let title = extract_title(&text);
        let blocks = extract_tables(&text);
        debug!(%id, %title, tables = blocks.len(), "processing document");

        for block in blocks {
            table_data.push(DocumentTable {
                document: id.clone(),
                title: title.clone(),
                records: parse_table(&block),
            });
        }
    }

    table_data.sort_by(|a, b| a.document.cmp(&b.document));

    let harvest = Harvest { table_data };
    info!(
        documents = total,
        tables = harvest.table_data.len(),
        "harvest complete"
    );

    progress.done(&harvest);
    Ok(harvest)
}

#[cfg(test)]
mod tests {
    use super::*;

    use unitdex_shared::HarvestError;
    use url::Url;

    const QUALIFYING_TABLE: &str = "\
| Name | Developer | Description | Platforms |
| --- | --- | --- | --- |
| Waves | Korg | Morphing wavetable oscillator | prologue |";

    async fn mount(server: &wiremock::MockServer, path: &str, body: &str, expected: u64) {
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path(path))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(body))
            .expect(expected)
            .mount(server)
            .await;
    }

    fn fetcher_for(server: &wiremock::MockServer) -> HttpFetcher {
        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        HttpFetcher::new(base).expect("build fetcher")
    }

    async fn run(server: &wiremock::MockServer, root: &str) -> Result<Harvest> {
        let fetcher = fetcher_for(server);
        harvest(&fetcher, &DocumentId::from(root), &SilentProgress).await
    }

    #[tokio::test]
    async fn end_to_end_root_with_one_table() {
        let server = wiremock::MockServer::start().await;
        let body = format!("---\ntitle: Unit Index\n---\n\n{QUALIFYING_TABLE}\n");
        // Fetched once by the crawl, once by the harvest phase.
        mount(&server, "/root.md", &body, 2).await;

        let result = run(&server, "root.md").await.unwrap();
        assert_eq!(result.table_data.len(), 1);

        let entry = &result.table_data[0];
        assert_eq!(entry.document, DocumentId::from("root.md"));
        assert_eq!(entry.title, "Unit Index");
        assert_eq!(entry.records.len(), 1);
        assert_eq!(entry.records[0]["Name"], "Waves");
        assert_eq!(entry.records[0]["Platforms"], "prologue");
    }

    #[tokio::test]
    async fn output_is_sorted_by_document_id() {
        let server = wiremock::MockServer::start().await;
        // Root links b before a; output must still order a first.
        mount(&server, "/index.md", "[b](b.md) and [a](a.md)", 2).await;
        mount(
            &server,
            "/b.md",
            &format!("---\ntitle: B\n---\n{QUALIFYING_TABLE}"),
            2,
        )
        .await;
        mount(
            &server,
            "/a.md",
            &format!("---\ntitle: A\n---\n{QUALIFYING_TABLE}"),
            2,
        )
        .await;

        let result = run(&server, "index.md").await.unwrap();
        let order: Vec<&str> = result
            .table_data
            .iter()
            .map(|t| t.document.as_str())
            .collect();
        assert_eq!(order, vec!["a.md", "b.md"]);
    }

    #[tokio::test]
    async fn documents_without_qualifying_tables_are_omitted() {
        let server = wiremock::MockServer::start().await;
        mount(&server, "/index.md", "prose only, [units](units.md)", 2).await;
        mount(
            &server,
            "/units.md",
            &format!("---\ntitle: Units\n---\n{QUALIFYING_TABLE}"),
            2,
        )
        .await;

        let result = run(&server, "index.md").await.unwrap();
        assert_eq!(result.table_data.len(), 1);
        assert_eq!(result.table_data[0].document.as_str(), "units.md");
    }

    #[tokio::test]
    async fn multiple_tables_share_document_and_title_in_order() {
        let server = wiremock::MockServer::start().await;
        let second = QUALIFYING_TABLE.replace("Waves", "Anthem");
        let body = format!("---\ntitle: Both\n---\n{QUALIFYING_TABLE}\n\nmore prose\n\n{second}\n");
        mount(&server, "/root.md", &body, 2).await;

        let result = run(&server, "root.md").await.unwrap();
        assert_eq!(result.table_data.len(), 2);
        assert_eq!(result.table_data[0].title, "Both");
        assert_eq!(result.table_data[1].title, "Both");
        assert_eq!(result.table_data[0].records[0]["Name"], "Waves");
        assert_eq!(result.table_data[1].records[0]["Name"], "Anthem");
    }

    #[tokio::test]
    async fn missing_front_matter_falls_back_to_untitled() {
        let server = wiremock::MockServer::start().await;
        mount(&server, "/root.md", QUALIFYING_TABLE, 2).await;

        let result = run(&server, "root.md").await.unwrap();
        assert_eq!(result.table_data[0].title, "Untitled");
    }

    #[tokio::test]
    async fn localized_documents_are_never_requested() {
        let server = wiremock::MockServer::start().await;
        mount(
            &server,
            "/index.md",
            "[en](guide.md) [ja](guide_ja.md)",
            2,
        )
        .await;
        mount(
            &server,
            "/guide.md",
            &format!("---\ntitle: Guide\n---\n{QUALIFYING_TABLE}"),
            2,
        )
        .await;
        mount(&server, "/guide_ja.md", "should never be fetched", 0).await;

        let result = run(&server, "index.md").await.unwrap();
        assert_eq!(result.table_data.len(), 1);
        assert_eq!(result.table_data[0].document.as_str(), "guide.md");
        // guide_ja.md expectation (zero requests) verified on server drop.
    }

    #[tokio::test]
    async fn failed_fetch_aborts_with_no_partial_output() {
        let server = wiremock::MockServer::start().await;
        mount(&server, "/index.md", "[gone](missing.md)", 1).await;
        // missing.md is not mounted → 404 → NotFound.

        let err = run(&server, "index.md").await.unwrap_err();
        assert!(matches!(err, HarvestError::NotFound { id } if id.as_str() == "missing.md"));
    }

    #[tokio::test]
    async fn harvests_fixture_corpus() {
        let server = wiremock::MockServer::start().await;

        let fixture = |name: &str| {
            std::fs::read_to_string(format!("../../../fixtures/md/{name}"))
                .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
        };

        mount(&server, "/01_unit_index.md", &fixture("01_unit_index.md"), 2).await;
        mount(&server, "/03_osc_units.md", &fixture("03_osc_units.md"), 2).await;
        mount(&server, "/04_modfx_units.md", &fixture("04_modfx_units.md"), 2).await;
        mount(&server, "/03_osc_units_ja.md", "never fetched", 0).await;

        let result = run(&server, "01_unit_index.md").await.unwrap();

        // The index has no tables of its own; both unit pages qualify, and
        // the modfx page's settings block fails the schema gate.
        let order: Vec<&str> = result
            .table_data
            .iter()
            .map(|t| t.document.as_str())
            .collect();
        assert_eq!(order, vec!["03_osc_units.md", "04_modfx_units.md"]);

        assert_eq!(result.table_data[0].title, "Oscillator Units");
        assert_eq!(result.table_data[0].records.len(), 3);
        assert_eq!(result.table_data[1].title, "Modulation Effect Units");
        assert_eq!(result.table_data[1].records.len(), 2);

        // Short row in the modfx table padded out to the full header set.
        let padded = &result.table_data[1].records[1];
        assert_eq!(padded["Platforms"], "");
    }

    #[tokio::test]
    async fn harvest_serializes_to_json() {
        let server = wiremock::MockServer::start().await;
        let body = format!("---\ntitle: Unit Index\n---\n{QUALIFYING_TABLE}");
        mount(&server, "/root.md", &body, 2).await;

        let result = run(&server, "root.md").await.unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["table_data"][0]["document"], "root.md");
        assert_eq!(json["table_data"][0]["records"][0]["Developer"], "Korg");
    }
}
