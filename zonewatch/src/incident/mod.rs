//! Incident dataset and spatial index.
//!
//! Incident records are read-only for the lifetime of a monitoring session.
//! The [`IncidentIndex`] publishes the dataset as an immutable
//! [`DatasetSnapshot`] behind an `Arc`; reloading swaps the whole snapshot, so
//! a reader holding a snapshot never observes a half-replaced dataset.
//!
//! # Example
//!
//! ```
//! use zonewatch::geo::Coordinate;
//! use zonewatch::incident::{IncidentIndex, IncidentSource, SampleDataset};
//!
//! let index = IncidentIndex::new();
//! index.refresh(&SampleDataset).unwrap();
//!
//! let new_delhi = Coordinate::new(28.6139, 77.209).unwrap();
//! let snapshot = index.snapshot();
//! let nearby = snapshot.query(new_delhi, 10.0);
//! assert!(!nearby.is_empty());
//! ```

mod dataset;
mod error;
mod index;
mod model;

pub use dataset::{IncidentSource, JsonFileSource, SampleDataset};
pub use error::DatasetError;
pub use index::{DatasetSnapshot, IncidentIndex};
pub use model::{IncidentMetadata, IncidentRecord};
