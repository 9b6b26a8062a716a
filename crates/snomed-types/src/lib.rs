//! # snomed-types
//!
//! Type definitions for SNOMED CT component states and taxonomy relationships.
//!
//! This crate provides the plain value types shared by release importers and
//! the taxonomy loader: RF2 concept, relationship and reference set member
//! rows, the normalized [`Relationship`] stored in a taxonomy, and the
//! coded values the loader branches on.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use snomed_types::{Relationship, Rf2Relationship, SctId};
//! use snomed_types::{CharacteristicType, ModifierType};
//! use snomed_types::well_known;
//!
//! let row = Rf2Relationship {
//!     id: 100,
//!     effective_time: None,
//!     active: true,
//!     module_id: well_known::SNOMED_CT_CORE_MODULE,
//!     source_id: 1,
//!     destination_id: 2,
//!     relationship_group: 0,
//!     type_id: well_known::HAS_ACTIVE_INGREDIENT,
//!     characteristic_type_id: CharacteristicType::STATED_ID,
//!     modifier_id: ModifierType::UNIVERSAL_ID,
//! };
//!
//! let stored = Relationship::from_rf2(&row, 20260101);
//! assert_eq!(stored.union_group, 1);
//! assert_eq!(stored.effective_time, 20260101);
//! ```

#![warn(missing_docs)]

mod concept;
mod enums;
mod refset;
mod relationship;
mod sctid;
pub mod well_known;

// Re-export all public types at crate root
pub use concept::Rf2Concept;
pub use enums::{CharacteristicType, DefinitionStatus, ModifierType, RelationshipAxis};
pub use refset::Rf2RefsetMember;
pub use relationship::{Relationship, Rf2Relationship};
pub use sctid::{EffectiveTime, SctId};
