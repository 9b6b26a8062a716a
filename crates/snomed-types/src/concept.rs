//! SNOMED CT Concept state.
//!
//! This module provides the `Rf2Concept` struct representing one concept
//! state row as delivered by a release importer.

use crate::{DefinitionStatus, EffectiveTime, SctId};

/// A SNOMED CT concept state from an RF2 Concept file.
///
/// Represents a row from `sct2_Concept_*.txt` files. Delta files may leave
/// the effective time blank for unpublished content, hence the `Option`.
///
/// # Examples
///
/// ```
/// use snomed_types::{Rf2Concept, DefinitionStatus};
///
/// let concept = Rf2Concept {
///     id: 73211009,
///     effective_time: Some(20020131),
///     active: true,
///     module_id: 900000000000207008,
///     definition_status_id: DefinitionStatus::FULLY_DEFINED_ID,
/// };
///
/// assert!(concept.is_fully_defined());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rf2Concept {
    /// Unique identifier for this concept (SCTID).
    pub id: SctId,
    /// Effective date in YYYYMMDD format, absent for unpublished states.
    pub effective_time: Option<EffectiveTime>,
    /// Whether this concept is active (true) or inactive (false).
    pub active: bool,
    /// The module containing this concept.
    pub module_id: SctId,
    /// Whether this concept is primitive or fully defined.
    pub definition_status_id: SctId,
}

impl Rf2Concept {
    /// Definition status of this state; unknown ids read as primitive.
    pub fn definition_status(&self) -> DefinitionStatus {
        DefinitionStatus::from_id(self.definition_status_id)
    }

    /// Returns true if this concept is fully defined.
    pub fn is_fully_defined(&self) -> bool {
        self.definition_status() == DefinitionStatus::FullyDefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_concept() {
        let concept = Rf2Concept {
            id: 404684003,
            effective_time: Some(20020131),
            active: true,
            module_id: 900000000000207008,
            definition_status_id: DefinitionStatus::PRIMITIVE_ID,
        };

        assert!(!concept.is_fully_defined());
        assert_eq!(concept.definition_status(), DefinitionStatus::Primitive);
    }

    #[test]
    fn test_unknown_status_reads_as_primitive() {
        let concept = Rf2Concept {
            id: 73211009,
            effective_time: None,
            active: true,
            module_id: 900000000000207008,
            definition_status_id: 1,
        };

        assert!(!concept.is_fully_defined());
        assert_eq!(concept.definition_status(), DefinitionStatus::Primitive);
    }
}
