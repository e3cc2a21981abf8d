//! # rewards-radar
//!
//! REST service that analyzes daily snapshots of loyalty-program partner
//! offers: how many points each partner pays per currency unit, whether a
//! special offer is active, and how that changes over time.
//!
//! Snapshots are appended through the API and held in memory. Every
//! query derives its answer from the full observation log:
//!
//! - **Streaks**: consecutive days at the current quantity and the most
//!   recent differing value.
//! - **Changes**: day-over-day arrivals, disappearances, offer transitions
//!   and large swings between the two most recent dates.
//! - **Novelty**: partners observed rarely enough to count as new.
//! - **Reports**: current state per partner, ratio ranking and summary.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── RadarService (service/)
//!     │
//!     ├── Analysis: streak, differ, novelty, aggregator, report (analysis/)
//!     │
//!     └── SnapshotStore (domain/)
//! ```

pub mod analysis;
pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
