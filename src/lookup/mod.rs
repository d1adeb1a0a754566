//! Adapters implementing [`crate::domain::CedulaLookup`].

pub mod http;

pub use http::HttpLookup;
