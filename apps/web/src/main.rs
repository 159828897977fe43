mod console;
mod dom;
mod fetch;

use std::cell::RefCell;
use std::rc::Rc;

use log::LevelFilter;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::Event;

use warehouse_locator::page::{SEARCH_BUTTON_ID, STATE_SELECT_ID};
use warehouse_locator::{auto_dismiss, LocatorConfig, Page, PageController, SearchStart, Transport};

use crate::dom::DomPage;
use crate::fetch::{BrowserTimer, FetchTransport};

type SharedController = Rc<RefCell<PageController<DomPage>>>;

fn main() -> Result<(), JsValue> {
    console::init_logging(LevelFilter::Info);

    let page = DomPage::new().ok_or_else(|| JsValue::from_str("document is not available"))?;
    let document = page.document().clone();
    let controller: SharedController = Rc::new(RefCell::new(PageController::new(
        page,
        LocatorConfig::default(),
    )));

    listen(&document, STATE_SELECT_ID, "change", {
        let controller = controller.clone();
        move || {
            let mut controller = controller.borrow_mut();
            let state = controller.page().selected_state();
            controller.populate_districts(&state);
        }
    })?;

    listen(&document, SEARCH_BUTTON_ID, "click", {
        let controller = controller.clone();
        move || spawn_local(search(controller.clone()))
    })?;

    spawn_local(load_page(controller));

    Ok(())
}

fn listen<F>(
    document: &web_sys::Document,
    id: &str,
    event: &str,
    mut handler: F,
) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let Some(target) = document.get_element_by_id(id) else {
        log::warn!("Page has no #{id} element, {event} is not bound");
        return Ok(());
    };
    let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| handler());
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    // The listener lives as long as the page
    callback.forget();
    Ok(())
}

async fn load_page(controller: SharedController) {
    let csv_path = controller.borrow().config().csv_path.clone();
    let csv = FetchTransport.get_text(&csv_path).await;
    if controller.borrow_mut().load_locations(csv).is_err() {
        return;
    }

    let url = controller.borrow().begin_popular();
    let body = FetchTransport.get_text(url.as_str()).await;
    controller.borrow_mut().finish_popular(body);
}

/// One search. Overlapping searches are not guarded: whichever response
/// arrives last is what the page shows.
async fn search(controller: SharedController) {
    let start = controller.borrow_mut().begin_search();
    let outcome = match start {
        SearchStart::Fetch(url) => {
            let body = FetchTransport.get_text(url.as_str()).await;
            controller.borrow_mut().finish_search(body)
        }
        SearchStart::Done(outcome) => outcome,
    };

    if let Some(ticket) = outcome.alert() {
        auto_dismiss(&*controller, ticket, &BrowserTimer).await;
    }
}
