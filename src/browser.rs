//! Pagination and search state plus the request/render cycle.
//!
//! `ListingsBrowser` owns the browse cursor, turns control actions into page
//! requests and applies completed responses to a `ListingsView`. It knows
//! nothing about terminals; the UI shell implements the view.

use crate::error::{DetailError, FetchError};
use crate::listings::{Listing, ListingDetails, ListingsSource, PageQuery};

/// Pagination and search cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    /// Current page, never below 1
    pub page: u32,
    /// Active name filter, never an empty string
    pub search_name: Option<String>,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            page: 1,
            search_name: None,
        }
    }
}

impl BrowseState {
    /// Query for the current page and filter.
    pub fn query(&self) -> PageQuery {
        PageQuery::new(self.page, self.search_name.clone())
    }
}

/// Single-row message shown in place of listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableNotice {
    /// The page came back empty
    NoData,
    /// The request failed
    FetchFailed,
}

impl TableNotice {
    pub fn message(self) -> &'static str {
        match self {
            TableNotice::NoData => "No data available",
            TableNotice::FetchFailed => "Error fetching data",
        }
    }
}

/// Render capability provided by the UI shell.
pub trait ListingsView {
    /// Replace all rows with `rows`, in order.
    fn render_rows(&mut self, rows: Vec<Listing>);
    /// Replace all rows with a single notice row.
    fn render_notice(&mut self, notice: TableNotice);
    /// Show `page` in the page indicator.
    fn set_page_indicator(&mut self, page: u32);
    /// Show the name filter the rendered rows were fetched with.
    fn set_active_filter(&mut self, name: Option<&str>);
    /// Fill the detail dialog and ask for it to be shown.
    fn open_details(&mut self, details: ListingDetails);
    /// Empty the search input field.
    fn clear_search_input(&mut self);
}

/// A request that has been started but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Monotonic request id
    pub id: u64,
    pub query: PageQuery,
}

/// The listings browser component.
#[derive(Debug, Default)]
pub struct ListingsBrowser {
    state: BrowseState,
    /// Id of the most recently started request
    latest_request: u64,
}

impl ListingsBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a browser positioned at `state`.
    #[cfg(test)]
    pub fn with_state(state: BrowseState) -> Self {
        Self {
            state,
            latest_request: 0,
        }
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    /// Start a request for the current state.
    ///
    /// Any request started earlier becomes stale: its response will be
    /// discarded by `finish_request`.
    pub fn begin_request(&mut self) -> PendingRequest {
        self.latest_request += 1;
        let query = self.state.query();
        log::debug!(
            "Request {} for page {} (name: {:?})",
            self.latest_request,
            query.page,
            query.name
        );
        PendingRequest {
            id: self.latest_request,
            query,
        }
    }

    /// Apply the outcome of request `id` to the view.
    ///
    /// # Arguments
    /// * `id` - Id from the matching `PendingRequest`
    /// * `result` - Listings or fetch error
    /// * `view` - View to render into
    ///
    /// # Returns
    /// * `bool` - False when the response was stale and ignored
    ///
    /// # Details
    /// - Non-empty page: rows replace the table in response order.
    /// - Empty page: "no data" row; the page steps back by one when above 1,
    ///   without fetching again.
    /// - Error: "error" row; the page is left alone.
    ///
    /// The page indicator and active filter are refreshed in every case.
    pub fn finish_request<V: ListingsView>(
        &mut self,
        id: u64,
        result: Result<Vec<Listing>, FetchError>,
        view: &mut V,
    ) -> bool {
        if id != self.latest_request {
            log::debug!(
                "Discarding stale response {} (latest is {})",
                id,
                self.latest_request
            );
            return false;
        }

        match result {
            Ok(listings) if !listings.is_empty() => {
                log::info!("Rendering {} listings", listings.len());
                view.render_rows(listings);
            }
            Ok(_) => {
                log::info!("Page {} is empty", self.state.page);
                view.render_notice(TableNotice::NoData);
                if self.state.page > 1 {
                    self.state.page -= 1;
                }
            }
            Err(e) => {
                log::error!("Error fetching listings data: {}", e);
                view.render_notice(TableNotice::FetchFailed);
            }
        }

        view.set_page_indicator(self.state.page);
        view.set_active_filter(self.state.search_name.as_deref());
        true
    }

    /// Fetch the current page from `source` and render it.
    pub async fn request_page<S, V>(&mut self, source: &S, view: &mut V)
    where
        S: ListingsSource,
        V: ListingsView,
    {
        let pending = self.begin_request();
        let result = source.fetch_page(&pending.query).await;
        self.finish_request(pending.id, result, view);
    }

    /// Open the detail dialog for `listing`.
    ///
    /// # Returns
    /// * `Result<(), DetailError>` - Error when the price is not numeric or the
    ///   cover image is missing; the dialog stays closed in that case
    pub fn show_details<V: ListingsView>(
        &self,
        listing: &Listing,
        view: &mut V,
    ) -> Result<(), DetailError> {
        let details = ListingDetails::try_from(listing).inspect_err(|e| {
            log::error!("Cannot show details for listing {}: {}", listing.id, e);
        })?;
        view.open_details(details);
        Ok(())
    }

    /// Search by name: trimmed input (or no filter when blank), back to page 1.
    pub fn submit_search(&mut self, input: &str) -> PendingRequest {
        let trimmed = input.trim();
        self.state.search_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self.state.page = 1;
        self.begin_request()
    }

    /// Drop the name filter and the input text, back to page 1.
    pub fn clear_search<V: ListingsView>(&mut self, view: &mut V) -> PendingRequest {
        view.clear_search_input();
        self.state.search_name = None;
        self.state.page = 1;
        self.begin_request()
    }

    /// Step back one page; nothing happens on page 1.
    pub fn previous_page(&mut self) -> Option<PendingRequest> {
        if self.state.page <= 1 {
            return None;
        }
        self.state.page -= 1;
        Some(self.begin_request())
    }

    /// Step forward one page. Paging past the end is corrected by the
    /// empty-page rule in `finish_request`.
    pub fn next_page(&mut self) -> PendingRequest {
        self.state.page += 1;
        self.begin_request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::listings::ListingsClient;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingView {
        rows: Vec<Listing>,
        notice: Option<TableNotice>,
        indicator: Option<u32>,
        filter: Option<String>,
        details: Option<ListingDetails>,
        input_cleared: bool,
    }

    impl ListingsView for RecordingView {
        fn render_rows(&mut self, rows: Vec<Listing>) {
            self.notice = None;
            self.rows = rows;
        }

        fn render_notice(&mut self, notice: TableNotice) {
            self.rows.clear();
            self.notice = Some(notice);
        }

        fn set_page_indicator(&mut self, page: u32) {
            self.indicator = Some(page);
        }

        fn set_active_filter(&mut self, name: Option<&str>) {
            self.filter = name.map(str::to_string);
        }

        fn open_details(&mut self, details: ListingDetails) {
            self.details = Some(details);
        }

        fn clear_search_input(&mut self) {
            self.input_cleared = true;
        }
    }

    /// Source that replays canned responses and records every query.
    #[derive(Default)]
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<Vec<Listing>, FetchError>>>,
        queries: Mutex<Vec<PageQuery>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Vec<Listing>, FetchError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                queries: Mutex::default(),
            }
        }

        fn queries(&self) -> Vec<PageQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl ListingsSource for ScriptedSource {
        async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Listing>, FetchError> {
            self.queries.lock().unwrap().push(query.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn listing(id: &str, name: &str) -> Listing {
        serde_json::from_value(json!({
            "_id": id,
            "name": name,
            "room_type": "Private room",
            "images": { "picture_url": format!("https://example.com/{id}.jpg") },
            "price": 125.5,
            "bed_type": "Real Bed",
            "beds": 1,
            "accommodates": 2
        }))
        .unwrap()
    }

    fn at_page(page: u32) -> ListingsBrowser {
        ListingsBrowser::with_state(BrowseState {
            page,
            search_name: None,
        })
    }

    fn request_url(pending: &PendingRequest) -> String {
        let config = Config {
            api_base_url: Some("https://listings.example.com".to_string()),
            ..Config::default()
        };
        let client = ListingsClient::new(&config).unwrap();
        client.build_request(&pending.query).unwrap().url().to_string()
    }

    #[tokio::test]
    async fn test_rows_rendered_in_response_order() {
        let listings = vec![listing("1", "A"), listing("2", "B"), listing("3", "C")];
        let source = ScriptedSource::new(vec![Ok(listings.clone())]);
        let mut view = RecordingView::default();
        let mut browser = ListingsBrowser::new();

        browser.request_page(&source, &mut view).await;

        assert_eq!(view.rows, listings);
        assert_eq!(view.notice, None);
        assert_eq!(view.indicator, Some(1));
        assert_eq!(source.queries(), vec![PageQuery::new(1, None)]);

        let picked = view.rows[1].clone();
        browser.show_details(&picked, &mut view).unwrap();
        assert_eq!(view.details.unwrap().name, "B");
    }

    #[tokio::test]
    async fn test_empty_first_page_keeps_page() {
        let source = ScriptedSource::new(vec![Ok(Vec::new())]);
        let mut view = RecordingView::default();
        let mut browser = ListingsBrowser::new();

        browser.request_page(&source, &mut view).await;

        assert_eq!(view.notice, Some(TableNotice::NoData));
        assert_eq!(browser.state().page, 1);
        assert_eq!(view.indicator, Some(1));
    }

    #[tokio::test]
    async fn test_empty_page_steps_back_without_refetch() {
        let source = ScriptedSource::new(vec![Ok(Vec::new())]);
        let mut view = RecordingView::default();
        let mut browser = at_page(3);

        browser.request_page(&source, &mut view).await;

        assert_eq!(view.notice, Some(TableNotice::NoData));
        assert_eq!(browser.state().page, 2);
        assert_eq!(view.indicator, Some(2));
        assert_eq!(source.queries().len(), 1);
        assert_eq!(source.queries()[0].page, 3);
    }

    #[tokio::test]
    async fn test_error_status_keeps_page() {
        let source = ScriptedSource::new(vec![Err(FetchError::Status(
            StatusCode::INTERNAL_SERVER_ERROR,
        ))]);
        let mut view = RecordingView {
            rows: vec![listing("old", "Old")],
            ..RecordingView::default()
        };
        let mut browser = at_page(4);

        browser.request_page(&source, &mut view).await;

        assert_eq!(view.notice, Some(TableNotice::FetchFailed));
        assert!(view.rows.is_empty());
        assert_eq!(browser.state().page, 4);
    }

    #[test]
    fn test_request_url_carries_page_and_page_size() {
        let mut browser = ListingsBrowser::new();
        let pending = browser.begin_request();
        assert!(request_url(&pending).ends_with("/api/listings?page=1&perPage=10"));

        let pending = browser.next_page();
        assert!(request_url(&pending).ends_with("?page=2&perPage=10"));
    }

    #[test]
    fn test_search_trims_and_resets_page() {
        let mut browser = at_page(5);
        let pending = browser.submit_search("  Loft  ");

        assert_eq!(browser.state().search_name.as_deref(), Some("Loft"));
        assert_eq!(browser.state().page, 1);
        assert!(request_url(&pending).ends_with("?page=1&perPage=10&name=Loft"));
    }

    #[test]
    fn test_finished_request_reports_active_filter() {
        let mut view = RecordingView::default();
        let mut browser = ListingsBrowser::new();

        let pending = browser.submit_search("Loft");
        browser.finish_request(pending.id, Ok(vec![listing("1", "Loft")]), &mut view);
        assert_eq!(view.filter.as_deref(), Some("Loft"));

        let pending = browser.clear_search(&mut view);
        browser.finish_request(pending.id, Err(FetchError::Decode("eof".into())), &mut view);
        assert_eq!(view.filter, None);
    }

    #[test]
    fn test_blank_search_drops_filter() {
        let mut browser = ListingsBrowser::new();
        browser.submit_search("Loft");
        browser.submit_search("   ");
        assert_eq!(browser.state().search_name, None);
    }

    #[test]
    fn test_clear_removes_name_parameter() {
        let mut view = RecordingView::default();
        let mut browser = ListingsBrowser::new();
        browser.submit_search("Loft");
        browser.next_page();

        let pending = browser.clear_search(&mut view);

        assert!(view.input_cleared);
        assert_eq!(browser.state(), &BrowseState::default());
        assert!(!request_url(&pending).contains("name="));
    }

    #[test]
    fn test_previous_stops_at_first_page() {
        let mut browser = at_page(2);
        let pending = browser.previous_page().unwrap();
        assert_eq!(pending.query.page, 1);

        assert_eq!(browser.previous_page(), None);
        assert_eq!(browser.state().page, 1);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut view = RecordingView::default();
        let mut browser = ListingsBrowser::new();
        let first = browser.begin_request();
        let second = browser.next_page();

        assert!(browser.finish_request(second.id, Ok(vec![listing("2", "Fresh")]), &mut view));
        assert!(!browser.finish_request(first.id, Ok(vec![listing("1", "Stale")]), &mut view));

        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].name, "Fresh");
        assert_eq!(browser.state().page, 2);
    }

    #[test]
    fn test_show_details_rejects_non_numeric_price() {
        let mut view = RecordingView::default();
        let browser = ListingsBrowser::new();
        let mut bad = listing("1", "Bad");
        bad.price = json!(null);

        assert!(matches!(
            browser.show_details(&bad, &mut view),
            Err(DetailError::NonNumericPrice(_))
        ));
        assert!(view.details.is_none());
    }
}
