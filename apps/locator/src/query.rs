use serde_json::Value;
use url::Url;

use crate::domain::WarehouseRecord;
use crate::error::Result;

pub const DEFAULT_API_URL: &str = "https://api.easyfarms.in/warehouses";

/// Fetches a URL and returns the response body as text.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get_text(&self, url: &str) -> Result<String>;
}

/// State and district filters for one warehouse search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseQuery {
    state: Option<String>,
    district: Option<String>,
}

impl WarehouseQuery {
    /// Builds a query from the selector values, or `None` when neither is set.
    pub fn from_selection(state: &str, district: &str) -> Option<Self> {
        let non_empty = |value: &str| (!value.is_empty()).then(|| value.to_string());
        let query = Self {
            state: non_empty(state),
            district: non_empty(district),
        };
        (query.state.is_some() || query.district.is_some()).then_some(query)
    }

    pub fn for_state(state: &str) -> Self {
        Self {
            state: Some(state.to_string()),
            district: None,
        }
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    /// `base` with `state` and `district` appended as form-encoded pairs.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(state) = &self.state {
                pairs.append_pair("state", state);
            }
            if let Some(district) = &self.district {
                pairs.append_pair("district", district);
            }
        }
        url
    }
}

/// Interprets a warehouse API body.
///
/// Anything that parses as JSON but is not an array counts as no results, as
/// do array entries that are not objects. Only malformed JSON is an error.
pub fn parse_warehouses(body: &str) -> Result<Vec<WarehouseRecord>> {
    let Value::Array(items) = serde_json::from_str::<Value>(body)? else {
        log::debug!("Warehouse response is not an array, treating as empty");
        return Ok(Vec::new());
    };

    let records = items
        .into_iter()
        .filter_map(|item| {
            if !item.is_object() {
                log::warn!("Skipping non-object warehouse entry: {item}");
                return None;
            }
            match serde_json::from_value::<WarehouseRecord>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping unreadable warehouse entry: {e}");
                    None
                }
            }
        })
        .collect();

    Ok(records)
}
