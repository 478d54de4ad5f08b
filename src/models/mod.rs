//! Models module
//!
//! Defines the passive value objects shared by every exporter. The model is
//! owned by the caller and only ever read by the engine.

pub mod column;
pub mod data_model;
pub mod relationship;
pub mod table;

pub use column::Column;
pub use data_model::{DataModel, ModelError};
pub use relationship::{Reference, RelationshipKind};
pub use table::Table;
