//! Ports: capabilities the domain layer expects its host to inject.

pub mod state_service;

pub use state_service::{FilesystemStateService, StateServiceAsync};
