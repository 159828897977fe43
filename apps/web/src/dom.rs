use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlOptionElement, HtmlSelectElement, ScrollBehavior, ScrollIntoViewOptions};

use warehouse_locator::page::{
    DISTRICT_SELECT_ID, HIDDEN_CLASS, MAP_ID, POPULAR_ID, RESULTS_COUNT_ID, RESULTS_LIST_ID,
    STATE_SELECT_ID,
};
use warehouse_locator::{Page, Region, SelectOption};

/// The live document. Missing elements are logged and otherwise ignored.
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            log::warn!("Page has no #{id} element");
        }
        element
    }

    fn select_value(&self, id: &str) -> String {
        self.element(id)
            .and_then(|element| element.dyn_into::<HtmlSelectElement>().ok())
            .map(|select| select.value())
            .unwrap_or_default()
    }

    fn set_html(&self, id: &str, html: &str) {
        if let Some(element) = self.element(id) {
            element.set_inner_html(html);
        }
    }

    fn fill_select(&self, id: &str, options: &[SelectOption]) {
        let Some(select) = self.element(id) else {
            return;
        };
        select.set_inner_html("");
        for option in options {
            let appended = HtmlOptionElement::new_with_text_and_value(&option.label, &option.value)
                .and_then(|element| select.append_child(&element));
            if let Err(e) = appended {
                log::error!("Failed to add option {:?} to #{id}: {e:?}", option.value);
            }
        }
    }
}

impl Page for DomPage {
    fn set_state_options(&mut self, options: &[SelectOption]) {
        self.fill_select(STATE_SELECT_ID, options);
    }

    fn set_district_options(&mut self, options: &[SelectOption]) {
        self.fill_select(DISTRICT_SELECT_ID, options);
    }

    fn selected_state(&self) -> String {
        self.select_value(STATE_SELECT_ID)
    }

    fn selected_district(&self) -> String {
        self.select_value(DISTRICT_SELECT_ID)
    }

    fn set_results_html(&mut self, html: &str) {
        self.set_html(RESULTS_LIST_ID, html);
    }

    fn set_results_count(&mut self, count: usize) {
        if let Some(element) = self.element(RESULTS_COUNT_ID) {
            element.set_text_content(Some(&count.to_string()));
        }
    }

    fn set_popular_html(&mut self, html: &str) {
        self.set_html(POPULAR_ID, html);
    }

    fn set_map_html(&mut self, html: &str) {
        self.set_html(MAP_ID, html);
    }

    fn set_alert_html(&mut self, html: &str) {
        self.set_html(Region::AlertContainer.id(), html);
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        let Some(element) = self.element(region.id()) else {
            return;
        };
        let classes = element.class_list();
        let result = if visible {
            classes.remove_1(HIDDEN_CLASS)
        } else {
            classes.add_1(HIDDEN_CLASS)
        };
        if let Err(e) = result {
            log::error!("Failed to toggle #{}: {e:?}", region.id());
        }
    }

    fn scroll_to_results(&mut self) {
        if let Some(element) = self.element(Region::ResultsSection.id()) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }
}
