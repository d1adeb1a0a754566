//! Data Transfer Objects for request decoding.

pub mod consulta_dto;

pub use consulta_dto::*;
