//! Entity structs for the three ontology layers and their derived edges.
//!
//! Assets, threats and controls are the authoritative records of a KB
//! document. `Relationship` is never stored; it is rebuilt from the
//! `targets`/`mitigates` fields whenever it is needed.

mod asset;
mod control;
mod relationship;
mod threat;

pub use asset::Asset;
pub use control::Control;
pub use relationship::{Relationship, RelationshipState};
pub use threat::Threat;
