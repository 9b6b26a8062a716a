//! SNOMED CT Reference Set member state.
//!
//! Reference set files share six leading columns and differ only in the
//! additional columns that follow `referencedComponentId`. A generic member
//! keeps those additional values as strings, in column order, alongside the
//! header names they came from.
//!
//! # Example
//!
//! ```
//! use snomed_types::{well_known, Rf2RefsetMember};
//!
//! let member = Rf2RefsetMember {
//!     field_names: vec!["owlExpression".to_string()],
//!     id: "7f5ed0a1-3c1e-4b3f-9b67-0f4c1a8d2e11".to_string(),
//!     effective_time: Some(20230101),
//!     active: true,
//!     module_id: 900000000000207008,
//!     refset_id: well_known::OWL_AXIOM_REFSET,
//!     referenced_component_id: 404684003,
//!     other_values: vec!["SubClassOf(:404684003 :138875005)".to_string()],
//! };
//!
//! assert_eq!(member.other_value(0), Some("SubClassOf(:404684003 :138875005)"));
//! assert_eq!(member.other_value(1), None);
//! ```

use crate::{EffectiveTime, SctId};

/// A reference set member row of any refset pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rf2RefsetMember {
    /// Header names of the additional columns.
    pub field_names: Vec<String>,
    /// Member identifier (a UUID in published releases).
    pub id: String,
    /// Effective time as YYYYMMDD integer, absent for unpublished states.
    pub effective_time: Option<EffectiveTime>,
    /// Whether this membership is currently active.
    pub active: bool,
    /// Module this member belongs to.
    pub module_id: SctId,
    /// The reference set this member belongs to.
    pub refset_id: SctId,
    /// The component (usually concept) that is a member of the refset.
    pub referenced_component_id: SctId,
    /// Values of the additional columns, in file order.
    pub other_values: Vec<String>,
}

impl Rf2RefsetMember {
    /// Returns the additional value at `index`, if the row has one.
    pub fn other_value(&self, index: usize) -> Option<&str> {
        self.other_values.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_values_by_position() {
        let member = Rf2RefsetMember {
            field_names: vec![
                "domainId".to_string(),
                "grouped".to_string(),
                "attributeCardinality".to_string(),
                "attributeInGroupCardinality".to_string(),
                "ruleStrengthId".to_string(),
                "contentTypeId".to_string(),
            ],
            id: "0a1b".to_string(),
            effective_time: Some(20200101),
            active: true,
            module_id: 900000000000207008,
            refset_id: 723604009,
            referenced_component_id: 363698007,
            other_values: vec![
                "404684003".to_string(),
                "1".to_string(),
                "0..*".to_string(),
                "0..1".to_string(),
                "723597001".to_string(),
                "723596005".to_string(),
            ],
        };

        assert_eq!(member.other_value(1), Some("1"));
        assert_eq!(member.other_value(5), Some("723596005"));
        assert_eq!(member.other_value(6), None);
    }
}
