//! Domain layer: snapshot rows, the snapshot store, and derived views.
//!
//! This module contains the data model of the radar: validated
//! observations and their composite key, the in-memory append-only store,
//! the per-entity state view, the day-over-day change events, and the
//! subscriber preference filter applied to those events.

pub mod change_event;
pub mod entity_key;
pub mod entity_state;
pub mod observation;
pub mod snapshot_store;
pub mod subscription;

pub use change_event::{ChangeEvent, ChangeKind};
pub use entity_key::EntityKey;
pub use entity_state::EntityState;
pub use observation::{Observation, ObservationRejection, RawObservation};
pub use snapshot_store::{IngestReport, SnapshotStore};
pub use subscription::SubscriberPreferences;
