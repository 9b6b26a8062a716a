//! Coded values the taxonomy loader branches on.
//!
//! RF2 rows carry these as concept ids. The loader only ever asks a few
//! questions of them (fully defined or not, which relationship axis, which
//! quantifier), and each question is answered through the enums here.

use crate::SctId;

/// How a concept is defined.
///
/// Anything other than the fully defined status is treated as primitive.
///
/// # Examples
///
/// ```
/// use snomed_types::DefinitionStatus;
///
/// assert_eq!(DefinitionStatus::from_id(900000000000073002), DefinitionStatus::FullyDefined);
/// assert_eq!(DefinitionStatus::from_id(1), DefinitionStatus::Primitive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefinitionStatus {
    /// Necessary conditions only.
    Primitive,
    /// Necessary and sufficient conditions.
    FullyDefined,
}

impl DefinitionStatus {
    /// `900000000000074008 |Primitive|`
    pub const PRIMITIVE_ID: SctId = 900000000000074008;
    /// `900000000000073002 |Defined|`
    pub const FULLY_DEFINED_ID: SctId = 900000000000073002;

    /// Reads a `definitionStatusId`.
    pub fn from_id(id: SctId) -> Self {
        if id == Self::FULLY_DEFINED_ID {
            Self::FullyDefined
        } else {
            Self::Primitive
        }
    }
}

/// Characteristic type of a relationship row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacteristicType {
    /// Authored.
    Stated,
    /// Computed by a classifier.
    Inferred,
    /// Additional, non-defining.
    Additional,
}

impl CharacteristicType {
    /// `900000000000010007 |Stated relationship|`
    pub const STATED_ID: SctId = 900000000000010007;
    /// `900000000000011006 |Inferred relationship|`
    pub const INFERRED_ID: SctId = 900000000000011006;
    /// `900000000000227009 |Additional relationship|`
    pub const ADDITIONAL_ID: SctId = 900000000000227009;

    /// Reads a `characteristicTypeId`; `None` for ids outside the three above.
    pub fn from_id(id: SctId) -> Option<Self> {
        match id {
            Self::STATED_ID => Some(Self::Stated),
            Self::INFERRED_ID => Some(Self::Inferred),
            Self::ADDITIONAL_ID => Some(Self::Additional),
            _ => None,
        }
    }
}

/// The relationship collection a row is stored in.
///
/// Only stated rows go to the stated axis. Inferred, additional and
/// unrecognised characteristic types all land on the inferred axis.
///
/// # Examples
///
/// ```
/// use snomed_types::{CharacteristicType, RelationshipAxis};
///
/// assert_eq!(
///     RelationshipAxis::for_characteristic_type(CharacteristicType::STATED_ID),
///     RelationshipAxis::Stated
/// );
/// assert_eq!(
///     RelationshipAxis::for_characteristic_type(CharacteristicType::ADDITIONAL_ID),
///     RelationshipAxis::Inferred
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationshipAxis {
    /// Stated relationships.
    Stated,
    /// Everything else.
    Inferred,
}

impl RelationshipAxis {
    /// Axis for a `characteristicTypeId`.
    pub fn for_characteristic_type(characteristic_type_id: SctId) -> Self {
        match CharacteristicType::from_id(characteristic_type_id) {
            Some(CharacteristicType::Stated) => Self::Stated,
            Some(CharacteristicType::Inferred | CharacteristicType::Additional) | None => {
                Self::Inferred
            }
        }
    }
}

/// Quantifier of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierType {
    /// Some values from.
    Existential,
    /// All values from.
    Universal,
}

impl ModifierType {
    /// `900000000000451002 |Existential restriction modifier|`
    pub const EXISTENTIAL_ID: SctId = 900000000000451002;
    /// `900000000000450001 |Universal restriction modifier|`
    pub const UNIVERSAL_ID: SctId = 900000000000450001;

    /// Reads a `modifierId`; `None` for unknown ids.
    pub fn from_id(id: SctId) -> Option<Self> {
        match id {
            Self::EXISTENTIAL_ID => Some(Self::Existential),
            Self::UNIVERSAL_ID => Some(Self::Universal),
            _ => None,
        }
    }
}
