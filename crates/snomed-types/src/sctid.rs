//! SNOMED CT Identifier (SCTID) type.
//!
//! Concepts, relationships and modules are all identified by SCTIDs.
//! Reference set members are the exception: their ids are UUID strings.

/// A SNOMED CT identifier (SCTID).
///
/// SCTIDs are 64-bit unsigned integers carrying a partition identifier
/// and a Verhoeff check digit in their least significant digits.
///
/// # Examples
///
/// ```
/// use snomed_types::SctId;
///
/// let concept_id: SctId = 73211009; // Diabetes mellitus
/// let has_active_ingredient: SctId = 127489000;
/// ```
pub type SctId = u64;

/// Effective time of a component state as a `YYYYMMDD` integer.
pub type EffectiveTime = u32;
