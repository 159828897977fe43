//! The DOM surface the controller drives, and an in-memory rendition of it.

use std::collections::HashSet;

use crate::render::escape_html;

pub const STATE_SELECT_ID: &str = "state";
pub const DISTRICT_SELECT_ID: &str = "district";
pub const RESULTS_LIST_ID: &str = "warehouseList";
pub const RESULTS_COUNT_ID: &str = "resultsCount";
pub const MAP_ID: &str = "map";
pub const POPULAR_ID: &str = "popularWarehouses";
pub const SEARCH_BUTTON_ID: &str = "searchBtn";

/// Class that hides an element in the page stylesheet.
pub const HIDDEN_CLASS: &str = "d-none";

/// Elements whose visibility the controller toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    ResultsSection,
    LoadingSpinner,
    MapContainer,
    AlertContainer,
}

impl Region {
    pub const fn id(self) -> &'static str {
        match self {
            Self::ResultsSection => "resultsSection",
            Self::LoadingSpinner => "loadingSpinner",
            Self::MapContainer => "mapContainer",
            Self::AlertContainer => "alertContainer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    /// The leading "nothing selected" entry, with an empty value.
    pub fn placeholder(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
        }
    }

    pub fn item(value: &str) -> Self {
        Self {
            value: value.to_string(),
            label: value.to_string(),
        }
    }
}

/// Everything the page controller reads from or writes to the document.
pub trait Page {
    fn set_state_options(&mut self, options: &[SelectOption]);
    fn set_district_options(&mut self, options: &[SelectOption]);
    fn selected_state(&self) -> String;
    fn selected_district(&self) -> String;
    fn set_results_html(&mut self, html: &str);
    fn set_results_count(&mut self, count: usize);
    fn set_popular_html(&mut self, html: &str);
    fn set_map_html(&mut self, html: &str);
    fn set_alert_html(&mut self, html: &str);
    fn set_visible(&mut self, region: Region, visible: bool);
    fn scroll_to_results(&mut self);
}

/// A page held entirely in memory. Used by the command-line harness, which
/// can write it out as a standalone document, and by tests.
#[derive(Debug, Default, Clone)]
pub struct StaticPage {
    pub state_options: Vec<SelectOption>,
    pub district_options: Vec<SelectOption>,
    pub state: String,
    pub district: String,
    pub results_html: String,
    pub results_count: Option<usize>,
    pub popular_html: String,
    pub map_html: String,
    pub alert_html: String,
    pub scrolled_to_results: bool,
    visible: HashSet<Region>,
}

impl StaticPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selector values as a user would.
    pub fn select(&mut self, state: &str, district: &str) {
        self.state = state.to_string();
        self.district = district.to_string();
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.visible.contains(&region)
    }

    pub fn to_document(&self) -> String {
        let section = |region: Region, body: &str| {
            let class = if self.is_visible(region) {
                String::new()
            } else {
                format!(r#" class="{HIDDEN_CLASS}""#)
            };
            format!(r#"<div id="{}"{class}>{body}</div>"#, region.id())
        };
        let count = self
            .results_count
            .map_or_else(String::new, |count| count.to_string());
        let results = format!(
            r#"<h2><span id="{RESULTS_COUNT_ID}">{count}</span> warehouses found</h2><div id="{RESULTS_LIST_ID}" class="row">{}</div>"#,
            self.results_html
        );
        let map = format!(r#"<div id="{MAP_ID}">{}</div>"#, self.map_html);
        let selection = format!(
            "<p>State: {} &middot; District: {}</p>",
            escape_html(&self.state),
            escape_html(&self.district)
        );

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Warehouse Locator</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
<style>.{HIDDEN_CLASS} {{ display: none; }}</style>
</head>
<body class="container py-4">
{alert}
{selection}
<div id="{POPULAR_ID}" class="row">{popular}</div>
{results}
{map}
</body>
</html>
"#,
            alert = section(Region::AlertContainer, &self.alert_html),
            popular = self.popular_html,
            results = section(Region::ResultsSection, &results),
            map = section(Region::MapContainer, &map),
        )
    }
}

impl Page for StaticPage {
    fn set_state_options(&mut self, options: &[SelectOption]) {
        self.state_options = options.to_vec();
    }

    fn set_district_options(&mut self, options: &[SelectOption]) {
        self.district_options = options.to_vec();
    }

    fn selected_state(&self) -> String {
        self.state.clone()
    }

    fn selected_district(&self) -> String {
        self.district.clone()
    }

    fn set_results_html(&mut self, html: &str) {
        self.results_html = html.to_string();
    }

    fn set_results_count(&mut self, count: usize) {
        self.results_count = Some(count);
    }

    fn set_popular_html(&mut self, html: &str) {
        self.popular_html = html.to_string();
    }

    fn set_map_html(&mut self, html: &str) {
        self.map_html = html.to_string();
    }

    fn set_alert_html(&mut self, html: &str) {
        self.alert_html = html.to_string();
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        if visible {
            self.visible.insert(region);
        } else {
            self.visible.remove(&region);
        }
    }

    fn scroll_to_results(&mut self) {
        self.scrolled_to_results = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_hides_invisible_regions() {
        let mut page = StaticPage::new();
        page.set_results_html("<p>card</p>");
        page.set_results_count(1);
        page.set_visible(Region::ResultsSection, true);

        let document = page.to_document();
        assert!(document.contains(r#"<div id="resultsSection"><h2><span id="resultsCount">1</span>"#));
        assert!(document.contains(r#"<div id="mapContainer" class="d-none">"#));
        assert!(document.contains(r#"<div id="alertContainer" class="d-none">"#));
    }

    #[test]
    fn test_visibility_toggles() {
        let mut page = StaticPage::new();
        assert!(!page.is_visible(Region::LoadingSpinner));
        page.set_visible(Region::LoadingSpinner, true);
        assert!(page.is_visible(Region::LoadingSpinner));
        page.set_visible(Region::LoadingSpinner, false);
        assert!(!page.is_visible(Region::LoadingSpinner));
    }
}
