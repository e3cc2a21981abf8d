//! Service layer: analysis orchestration.
//!
//! [`RadarService`] owns the snapshot store, serializes ingestion against
//! analysis runs, and delegates all computation to [`crate::analysis`].

pub mod radar_service;

pub use radar_service::RadarService;
