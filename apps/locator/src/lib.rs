// Export our modules for use in binaries and tests
pub mod alert;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod index;
pub mod page;
pub mod query;
pub mod render;

#[cfg(feature = "native")]
pub mod cli;
#[cfg(feature = "native")]
pub mod http;
#[cfg(feature = "native")]
pub mod logging;

pub use alert::{AlertTicket, Timer};
pub use config::LocatorConfig;
pub use controller::{auto_dismiss, PageController, SearchOutcome, SearchStart};
pub use domain::{BadgeClass, Severity, WarehouseRecord};
pub use error::LocatorError;
pub use index::LocationIndex;
pub use page::{Page, Region, SelectOption, StaticPage};
pub use query::{Transport, WarehouseQuery};
