//! Domain layer: lookup result model and the lookup port.
//!
//! [`QueryResult`] is the record every other layer passes around;
//! [`CedulaLookup`] is the boundary to the external scraping engine.

pub mod lookup;
pub mod query_result;

pub use lookup::{CedulaLookup, LookupError, QueryOptions};
pub use query_result::{FIELD_NAMES, QueryResult};
