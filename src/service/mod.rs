//! Service layer: lookup orchestration.
//!
//! [`ConsultaService`] runs the external lookup under its timeout, hands
//! the result to the [`crate::persistence::PersistenceGate`], and logs what
//! the gate did.

pub mod consulta_service;

pub use consulta_service::ConsultaService;
