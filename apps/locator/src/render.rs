//! HTML fragments for the results list, the popular panel, the map
//! placeholder and alert banners.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::domain::{Severity, WarehouseRecord};

pub const MAP_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Characters `encodeURIComponent` leaves alone, everything else is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// External map search for a warehouse, keyed on "name address".
pub fn map_search_url(record: &WarehouseRecord) -> String {
    let query = format!("{} {}", record.name, record.address);
    format!("{MAP_SEARCH_BASE}{}", encode_uri_component(&query))
}

/// Click-to-call link. The number is passed through as-is.
pub fn call_url(record: &WarehouseRecord) -> String {
    format!("tel:{}", record.contact)
}

pub fn warehouse_card(record: &WarehouseRecord) -> String {
    let name = escape_html(&record.name.to_string());
    let manager = escape_html(&record.manager.to_string());
    let address = escape_html(&record.address.to_string());
    let capacity = escape_html(&record.capacity.to_string());
    let contact = escape_html(&record.contact.to_string());
    let status = escape_html(&record.status.to_string());
    let valid_until = escape_html(&record.valid_until.to_string());
    let badge = record.badge().as_str();
    let call_url = escape_html(&call_url(record));
    let map_url = escape_html(&map_search_url(record));

    format!(
        r#"
      <div class="col-md-6 col-lg-4 mb-4">
        <div class="warehouse-card">
          <div class="warehouse-header">
            <h3 class="h5 mb-0">{name}</h3>
          </div>
          <div class="warehouse-body">
            <p class="warehouse-info"><strong>Manager:</strong> {manager}</p>
            <p class="warehouse-info"><strong>Address:</strong> {address}</p>
            <p class="warehouse-info"><strong>Capacity:</strong> {capacity} MT</p>
            <p class="warehouse-info"><strong>Contact:</strong> {contact}</p>
            <p class="warehouse-info">
              <strong>Status:</strong>
              <span class="badge {badge}">{status}</span>
            </p>
            <p class="warehouse-info"><strong>Valid Until:</strong> {valid_until}</p>
          </div>
          <div class="warehouse-footer">
            <a href="{call_url}" class="btn btn-call btn-primary flex-grow-1">
              <i class="bi bi-telephone-fill me-2"></i> Call
            </a>
            <a href="{map_url}" target="_blank" class="btn btn-map flex-grow-1">
              <i class="bi bi-geo-alt-fill me-2"></i> Map
            </a>
          </div>
        </div>
      </div>
"#
    )
}

pub fn warehouse_cards(records: &[WarehouseRecord]) -> String {
    records.iter().map(warehouse_card).collect()
}

pub fn popular_card(record: &WarehouseRecord) -> String {
    let name = escape_html(&record.name.to_string());
    let address = escape_html(&record.address.to_string());
    let capacity = escape_html(&record.capacity.to_string());
    let map_url = escape_html(&map_search_url(record));

    format!(
        r#"
        <div class="col-md-4 mb-4">
          <div class="warehouse-card">
            <div class="warehouse-header">
              <h3 class="h5 mb-0">{name}</h3>
            </div>
            <div class="warehouse-body">
              <p class="warehouse-info"><strong>Location:</strong> {address}</p>
              <p class="warehouse-info"><strong>Capacity:</strong> {capacity} MT</p>
            </div>
            <div class="warehouse-footer">
              <a href="{map_url}" target="_blank" class="btn btn-map w-100">
                <i class="bi bi-info-circle me-2"></i> View Details
              </a>
            </div>
          </div>
        </div>
"#
    )
}

/// The first `limit` records as compact cards.
pub fn popular_cards(records: &[WarehouseRecord], limit: usize) -> String {
    records.iter().take(limit).map(popular_card).collect()
}

pub fn empty_results() -> String {
    r#"
        <div class="col-12 text-center py-5">
          <div class="alert alert-info">
            <i class="bi bi-info-circle me-2"></i> No warehouses found for the selected location.
            <p class="mt-2 mb-0">Try selecting a different state or district.</p>
          </div>
        </div>
"#
    .to_string()
}

pub fn location_warning() -> String {
    r#"
      <div class="alert alert-warning">
        Unable to load location data. Please try again later.
      </div>
"#
    .to_string()
}

pub fn map_placeholder(warehouse_count: usize) -> String {
    format!(
        r#"
    <div class="p-4 bg-light h-100 d-flex flex-column justify-content-center align-items-center">
      <i class="bi bi-map text-primary" style="font-size: 3rem;"></i>
      <h4 class="mt-3">Map View</h4>
      <p class="text-center">
        {warehouse_count} warehouses would be displayed here on an interactive map.<br>
        <small class="text-muted">Google Maps API integration required for full functionality.</small>
      </p>
    </div>
"#
    )
}

/// Dismissible banner. `shown` controls the `show` class used by the fade.
pub fn alert_banner(message: &str, severity: Severity, shown: bool) -> String {
    let message = escape_html(message);
    let severity = severity.as_str();
    let show = if shown { " show" } else { "" };

    format!(
        r#"
    <div class="alert alert-{severity} alert-dismissible fade{show}" role="alert">
      {message}
      <button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>
    </div>
"#
    )
}
