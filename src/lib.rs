//! SATM Survey — multi-step survey wizard core.

pub mod catalog;
pub mod channels;
pub mod config;
pub mod error;
pub mod export;
pub mod store;
pub mod submit;
pub mod wizard;
