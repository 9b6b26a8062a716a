//! SNOMED CT Relationship types.
//!
//! [`Rf2Relationship`] is a relationship state row as read from a release;
//! [`Relationship`] is the normalized value the taxonomy stores once a row
//! has been applied.

use crate::{well_known, EffectiveTime, ModifierType, RelationshipAxis, SctId};

/// A SNOMED CT relationship state from an RF2 Relationship file.
///
/// Represents a row from `sct2_Relationship_*.txt` or
/// `sct2_StatedRelationship_*.txt` files.
///
/// # Examples
///
/// ```
/// use snomed_types::{CharacteristicType, ModifierType, RelationshipAxis, Rf2Relationship};
///
/// let relationship = Rf2Relationship {
///     id: 100000028,
///     effective_time: Some(20020131),
///     active: true,
///     module_id: 900000000000207008,
///     source_id: 73211009,        // Diabetes mellitus
///     destination_id: 362969004,  // Disorder of endocrine system
///     relationship_group: 0,
///     type_id: 116680003,         // IS_A
///     characteristic_type_id: CharacteristicType::STATED_ID,
///     modifier_id: ModifierType::EXISTENTIAL_ID,
/// };
///
/// assert_eq!(relationship.axis(), RelationshipAxis::Stated);
/// assert!(!relationship.is_universal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rf2Relationship {
    /// Unique identifier for this relationship (SCTID).
    pub id: SctId,
    /// Effective date in YYYYMMDD format, absent for unpublished states.
    pub effective_time: Option<EffectiveTime>,
    /// Whether this relationship is active.
    pub active: bool,
    /// The module containing this relationship.
    pub module_id: SctId,
    /// Source concept (subject).
    pub source_id: SctId,
    /// Destination concept (object/value).
    pub destination_id: SctId,
    /// Role group number (0 = ungrouped).
    pub relationship_group: u16,
    /// Relationship type (e.g., IS_A, Finding site).
    pub type_id: SctId,
    /// Whether this is stated or inferred.
    pub characteristic_type_id: SctId,
    /// Modifier (existential or universal).
    pub modifier_id: SctId,
}

impl Rf2Relationship {
    /// The relationship collection this row belongs to.
    pub fn axis(&self) -> RelationshipAxis {
        RelationshipAxis::for_characteristic_type(self.characteristic_type_id)
    }

    /// Returns true if the modifier is the universal restriction.
    pub fn is_universal(&self) -> bool {
        ModifierType::from_id(self.modifier_id) == Some(ModifierType::Universal)
    }

    /// Union group implied by this row.
    ///
    /// Universal "has active ingredient" relationships go into union group 1,
    /// everything else stays in group 0.
    pub fn union_group(&self) -> u16 {
        if self.type_id == well_known::HAS_ACTIVE_INGREDIENT && self.is_universal() {
            1
        } else {
            0
        }
    }
}

/// A relationship as held by the taxonomy.
///
/// The source concept and the stated/inferred axis are implied by where the
/// value is stored, so neither appears here.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relationship {
    /// Relationship SCTID.
    pub relationship_id: SctId,
    /// Effective time, defaulted to the import date when the row had none.
    pub effective_time: EffectiveTime,
    /// Module containing the relationship.
    pub module_id: SctId,
    /// Attribute type.
    pub type_id: SctId,
    /// Destination concept.
    pub destination_id: SctId,
    /// Reserved for negated roles; currently always false.
    pub destination_negated: bool,
    /// Role group number.
    pub group: u16,
    /// Union group number (0 = none).
    pub union_group: u16,
    /// True for a universal restriction, false for existential.
    pub universal: bool,
    /// Characteristic type the row carried.
    pub characteristic_type_id: SctId,
}

impl Relationship {
    /// Builds the stored value for an active relationship row.
    pub fn from_rf2(row: &Rf2Relationship, default_effective_time: EffectiveTime) -> Self {
        Self {
            relationship_id: row.id,
            effective_time: row.effective_time.unwrap_or(default_effective_time),
            module_id: row.module_id,
            type_id: row.type_id,
            destination_id: row.destination_id,
            destination_negated: false,
            group: row.relationship_group,
            union_group: row.union_group(),
            universal: row.is_universal(),
            characteristic_type_id: row.characteristic_type_id,
        }
    }
}
