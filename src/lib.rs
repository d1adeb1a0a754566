//! # cedula-gateway
//!
//! Web front end for looking up the status of a cédula by barcode number.
//!
//! The lookup itself is delegated to an external scraping service; this
//! crate validates the input, calls the service, renders the result, and
//! records it in MySQL when a database is configured.
//!
//! ## Architecture
//!
//! ```text
//! Browser (HTML form)   Clients (JSON)
//!     │                     │
//!     ├── Handlers (api/) ──┘
//!     │
//!     ├── ConsultaService (service/)
//!     │     ├── CedulaLookup port (domain/) ── HttpLookup (lookup/)
//!     │     └── PersistenceGate (persistence/) ── MySQL (optional)
//!     │
//!     └── IndexPage (view)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod lookup;
pub mod persistence;
pub mod service;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;
