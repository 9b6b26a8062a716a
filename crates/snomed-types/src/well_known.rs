//! Well-known SNOMED CT concept IDs.
//!
//! Constants for the concepts the taxonomy loader interprets specially:
//! attribute types, modules, reference sets and MRCM content types. Coded
//! metadata values live on the enums in [`crate::DefinitionStatus`] and its
//! siblings.
//!
//! # Examples
//!
//! ```
//! use snomed_types::well_known;
//!
//! assert_eq!(well_known::HAS_ACTIVE_INGREDIENT, 127489000);
//! assert_eq!(well_known::OWL_AXIOM_REFSET, 733073007);
//! ```

use crate::SctId;

// =============================================================================
// Attribute Types
// =============================================================================

/// IS_A relationship type - 116680003.
pub const IS_A: SctId = 116680003;

/// Has active ingredient attribute - 127489000.
///
/// Universal relationships of this type are placed in union group 1.
pub const HAS_ACTIVE_INGREDIENT: SctId = 127489000;

/// Finding site attribute - 363698007.
pub const FINDING_SITE: SctId = 363698007;

// =============================================================================
// Modules
// =============================================================================

/// SNOMED CT core module - 900000000000207008.
pub const SNOMED_CT_CORE_MODULE: SctId = 900000000000207008;

/// SNOMED CT model component module - 900000000000012004.
pub const SNOMED_CT_MODEL_COMPONENT_MODULE: SctId = 900000000000012004;

// =============================================================================
// Reference Sets
// =============================================================================

/// OWL axiom reference set - 733073007.
///
/// Members carry one OWL functional syntax axiom in their first
/// additional field.
pub const OWL_AXIOM_REFSET: SctId = 733073007;

/// MRCM attribute domain international reference set - 723604009.
///
/// Members carry the grouped flag in their second additional field and
/// the content type in their sixth.
pub const MRCM_ATTRIBUTE_DOMAIN_INTERNATIONAL_REFSET: SctId = 723604009;

// =============================================================================
// MRCM Content Types
// =============================================================================

/// All SNOMED CT content - 723596005.
pub const ALL_SNOMED_CT_CONTENT: SctId = 723596005;

/// All precoordinated content - 723594008.
pub const ALL_PRECOORDINATED_CONTENT: SctId = 723594008;

/// All new precoordinated content - 723593002.
pub const ALL_NEW_PRECOORDINATED_CONTENT: SctId = 723593002;
