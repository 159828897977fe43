use std::cell::RefCell;

use url::Url;

use crate::alert::{
    AlertPhase, AlertSlot, AlertTicket, Timer, ALERT_DISMISS_DELAY, ALERT_FADE_DURATION,
};
use crate::config::LocatorConfig;
use crate::domain::{Severity, WarehouseRecord};
use crate::error::Result;
use crate::index::LocationIndex;
use crate::page::{Page, Region, SelectOption};
use crate::query::{parse_warehouses, Transport, WarehouseQuery};
use crate::render;

pub const STATE_PLACEHOLDER: &str = "Select State";
pub const DISTRICT_PLACEHOLDER: &str = "Select District";
pub const MISSING_FILTER_MESSAGE: &str = "Please select a state or district";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Please try again.";

/// First half of a search: either a request to send, or an outcome reached
/// without touching the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStart {
    Fetch(Url),
    Done(SearchOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Cards were rendered for this many warehouses.
    Rendered(usize),
    NoResults,
    /// No filter was selected; nothing was requested.
    Rejected(AlertTicket),
    Failed(AlertTicket),
}

impl SearchOutcome {
    /// The alert raised by this outcome, if any, for scheduling its dismissal.
    pub const fn alert(self) -> Option<AlertTicket> {
        match self {
            Self::Rejected(ticket) | Self::Failed(ticket) => Some(ticket),
            Self::Rendered(_) | Self::NoResults => None,
        }
    }
}

/// Owns everything the page keeps between events: the location index, the
/// alert container and the warehouses of the last search.
///
/// Each network-bound flow is split into a `begin_*` step that returns the URL
/// to fetch and a `finish_*` step that takes the response body, so a caller
/// sharing the controller never holds a borrow across the request.
pub struct PageController<P: Page> {
    page: P,
    config: LocatorConfig,
    index: LocationIndex,
    alert: AlertSlot,
    results: Vec<WarehouseRecord>,
    popular: Vec<WarehouseRecord>,
}

impl<P: Page> PageController<P> {
    pub fn new(page: P, config: LocatorConfig) -> Self {
        Self {
            page,
            config,
            index: LocationIndex::new(),
            alert: AlertSlot::new(),
            results: Vec::new(),
            popular: Vec::new(),
        }
    }

    pub const fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub const fn config(&self) -> &LocatorConfig {
        &self.config
    }

    pub const fn index(&self) -> &LocationIndex {
        &self.index
    }

    /// Warehouses rendered by the most recent successful search.
    pub fn results(&self) -> &[WarehouseRecord] {
        &self.results
    }

    /// Warehouses currently shown in the popular panel.
    pub fn popular(&self) -> &[WarehouseRecord] {
        &self.popular
    }

    pub const fn alert_slot(&self) -> &AlertSlot {
        &self.alert
    }

    /// Installs the location index from the CSV text, or the load error.
    ///
    /// On failure the popular panel shows a persistent warning and the index
    /// stays empty. The error is handed back so the caller can skip loading
    /// the popular panel.
    pub fn load_locations(&mut self, csv: Result<String>) -> Result<()> {
        let loaded = csv.and_then(|text| LocationIndex::from_csv_text(&text));
        match loaded {
            Ok(index) => {
                log::info!("Loaded {} states from location data", index.len());
                self.index = index;
                self.populate_states();
                Ok(())
            }
            Err(e) => {
                log::error!("Error loading location data: {e}");
                self.index = LocationIndex::new();
                self.page.set_popular_html(&render::location_warning());
                Err(e)
            }
        }
    }

    pub fn populate_states(&mut self) {
        let options: Vec<_> = std::iter::once(SelectOption::placeholder(STATE_PLACEHOLDER))
            .chain(self.index.states().map(SelectOption::item))
            .collect();
        self.page.set_state_options(&options);
    }

    pub fn populate_districts(&mut self, state: &str) {
        let mut options = vec![SelectOption::placeholder(DISTRICT_PLACEHOLDER)];
        if let Some(districts) = self.index.districts(state) {
            options.extend(districts.map(SelectOption::item));
        }
        self.page.set_district_options(&options);
    }

    pub fn begin_search(&mut self) -> SearchStart {
        let state = self.page.selected_state();
        let district = self.page.selected_district();

        self.page.set_results_html("");
        self.page.set_visible(Region::LoadingSpinner, true);
        self.page.set_visible(Region::MapContainer, false);

        let Some(query) = WarehouseQuery::from_selection(&state, &district) else {
            let ticket = self.show_alert(MISSING_FILTER_MESSAGE, Severity::Warning);
            self.page.set_visible(Region::LoadingSpinner, false);
            return SearchStart::Done(SearchOutcome::Rejected(ticket));
        };

        let url = query.url(&self.config.api_url);
        log::debug!("Searching warehouses: {url}");
        SearchStart::Fetch(url)
    }

    pub fn finish_search(&mut self, body: Result<String>) -> SearchOutcome {
        let outcome = match body.and_then(|text| parse_warehouses(&text)) {
            Ok(records) if records.is_empty() => {
                self.results.clear();
                self.page.set_results_html(&render::empty_results());
                SearchOutcome::NoResults
            }
            Ok(records) => {
                self.clear_markers();
                self.results = records;
                self.display_results();
                self.initialize_map();
                self.page.set_visible(Region::MapContainer, true);
                self.page.scroll_to_results();
                SearchOutcome::Rendered(self.results.len())
            }
            Err(e) => {
                log::error!("Warehouse search failed: {e}");
                SearchOutcome::Failed(self.show_alert(FETCH_FAILED_MESSAGE, Severity::Danger))
            }
        };
        self.page.set_visible(Region::LoadingSpinner, false);
        outcome
    }

    fn display_results(&mut self) {
        self.page
            .set_results_html(&render::warehouse_cards(&self.results));
        self.page.set_results_count(self.results.len());
        self.page.set_visible(Region::ResultsSection, true);
    }

    fn initialize_map(&mut self) {
        self.page
            .set_map_html(&render::map_placeholder(self.results.len()));
    }

    /// Placeholder until the map panel plots markers.
    pub fn clear_markers(&mut self) {
        log::debug!("Map panel is a placeholder, no markers to clear");
    }

    pub fn begin_popular(&self) -> Url {
        WarehouseQuery::for_state(&self.config.popular_state).url(&self.config.api_url)
    }

    /// Fills the popular panel. Failures are logged only; an empty response
    /// leaves the panel as it was. Returns how many cards were rendered.
    pub fn finish_popular(&mut self, body: Result<String>) -> usize {
        let mut records = match body.and_then(|text| parse_warehouses(&text)) {
            Ok(records) => records,
            Err(e) => {
                log::error!("Error fetching popular warehouses: {e}");
                return 0;
            }
        };
        if records.is_empty() {
            return 0;
        }

        records.truncate(self.config.popular_limit);
        self.popular = records;
        self.page
            .set_popular_html(&render::popular_cards(&self.popular, self.config.popular_limit));
        self.popular.len()
    }

    /// Replaces the alert container with a new banner and reveals it.
    pub fn show_alert(&mut self, message: &str, severity: Severity) -> AlertTicket {
        let ticket = self.alert.show(message, severity);
        self.page
            .set_alert_html(&render::alert_banner(message, severity, true));
        self.page.set_visible(Region::AlertContainer, true);
        ticket
    }

    pub fn fade_alert(&mut self, ticket: AlertTicket) -> bool {
        if !self.alert.begin_fade(ticket) {
            return false;
        }
        if let Some(alert) = self.alert.current() {
            let html = render::alert_banner(&alert.message, alert.severity, false);
            self.page.set_alert_html(&html);
        }
        true
    }

    pub fn hide_alert(&mut self, ticket: AlertTicket) -> bool {
        if !self.alert.hide(ticket) {
            return false;
        }
        self.page.set_visible(Region::AlertContainer, false);
        true
    }

    pub async fn load_location_index<T: Transport>(&mut self, transport: &T) -> Result<()> {
        let csv = transport.get_text(&self.config.csv_path).await;
        self.load_locations(csv)
    }

    pub async fn fetch_warehouses<T: Transport>(&mut self, transport: &T) -> SearchOutcome {
        match self.begin_search() {
            SearchStart::Fetch(url) => {
                let body = transport.get_text(url.as_str()).await;
                self.finish_search(body)
            }
            SearchStart::Done(outcome) => outcome,
        }
    }

    pub async fn fetch_popular_warehouses<T: Transport>(&mut self, transport: &T) -> usize {
        let url = self.begin_popular();
        let body = transport.get_text(url.as_str()).await;
        self.finish_popular(body)
    }

    /// Page-load sequence: location index, then the popular panel.
    pub async fn on_load<T: Transport>(&mut self, transport: &T) -> Result<()> {
        self.load_location_index(transport).await?;
        self.fetch_popular_warehouses(transport).await;
        Ok(())
    }
}

/// Runs the timed dismissal of the alert `ticket` names: visible for
/// [`ALERT_DISMISS_DELAY`], then faded, then hidden after
/// [`ALERT_FADE_DURATION`]. A newer alert cancels it.
pub async fn auto_dismiss<P: Page, T: Timer>(
    controller: &RefCell<PageController<P>>,
    ticket: AlertTicket,
    timer: &T,
) {
    timer.sleep(ALERT_DISMISS_DELAY).await;
    if !controller.borrow_mut().fade_alert(ticket) {
        return;
    }
    timer.sleep(ALERT_FADE_DURATION).await;
    let hidden = controller.borrow_mut().hide_alert(ticket);
    let phase: AlertPhase = controller.borrow().alert_slot().phase();
    log::debug!("Alert dismissal finished (hidden: {hidden}, phase: {phase})");
}
