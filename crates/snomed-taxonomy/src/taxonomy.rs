//! In-memory SNOMED CT taxonomy model.
//!
//! Holds the merged result of an import run: active and fully defined
//! concepts, stated and inferred relationships keyed by source then
//! relationship id, parsed axioms keyed by concept then refset member id,
//! and the attributes that must stay ungrouped per MRCM content type.
//!
//! Mutation is reserved to the loader; once the loader hands the model out
//! through [`TaxonomyLoader::report_errors`](crate::TaxonomyLoader::report_errors)
//! only the read accessors remain.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use snomed_types::{well_known, Relationship, RelationshipAxis, SctId};

/// The taxonomy built by a snapshot and delta import.
///
/// `A` is the parsed axiom handle produced by the loader's axiom parser.
///
/// # Example
///
/// ```
/// use snomed_taxonomy::{FunctionalSyntaxParser, TaxonomyLoader};
/// use snomed_taxonomy::snomed_types::well_known;
///
/// let loader = TaxonomyLoader::new(FunctionalSyntaxParser::new());
/// let taxonomy = loader.report_errors().unwrap();
///
/// assert_eq!(taxonomy.concept_count(), 0);
/// assert!(taxonomy
///     .ungrouped_roles_for_content_type_or_default(well_known::ALL_SNOMED_CT_CONTENT)
///     .is_none());
/// ```
pub struct SnomedTaxonomy<A> {
    /// Active concepts.
    all_concept_ids: HashSet<SctId>,
    /// Active, fully defined concepts; always a subset of `all_concept_ids`.
    fully_defined_concept_ids: HashSet<SctId>,
    /// Stated relationships: source -> relationship id -> relationship.
    stated_relationships: HashMap<SctId, HashMap<SctId, Relationship>>,
    /// Inferred relationships: source -> relationship id -> relationship.
    inferred_relationships: HashMap<SctId, HashMap<SctId, Relationship>>,
    /// Parsed axioms: referenced concept -> member id -> axiom.
    axioms: HashMap<SctId, HashMap<String, A>>,
    /// Ungrouped attributes per MRCM content type.
    ungrouped_roles: HashMap<SctId, HashSet<SctId>>,
}

impl<A> Default for SnomedTaxonomy<A> {
    fn default() -> Self {
        Self {
            all_concept_ids: HashSet::new(),
            fully_defined_concept_ids: HashSet::new(),
            stated_relationships: HashMap::new(),
            inferred_relationships: HashMap::new(),
            axioms: HashMap::new(),
            ungrouped_roles: HashMap::new(),
        }
    }
}

impl<A> std::fmt::Debug for SnomedTaxonomy<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnomedTaxonomy")
            .field("all_concept_ids", &self.all_concept_ids.len())
            .field("fully_defined_concept_ids", &self.fully_defined_concept_ids.len())
            .field("stated_relationships", &self.stated_relationship_count())
            .field("inferred_relationships", &self.inferred_relationship_count())
            .field("axioms", &self.axiom_count())
            .field("ungrouped_roles", &self.ungrouped_roles.len())
            .finish()
    }
}

/// Removes `key` from the inner map under `outer`, dropping the inner map once empty.
fn remove_nested<K, Q, V>(
    map: &mut HashMap<SctId, HashMap<K, V>>,
    outer: SctId,
    key: &Q,
) -> Option<V>
where
    K: Borrow<Q> + Hash + Eq,
    Q: Hash + Eq + ?Sized,
{
    let Entry::Occupied(mut entry) = map.entry(outer) else {
        return None;
    };
    let removed = entry.get_mut().remove(key);
    if entry.get().is_empty() {
        entry.remove();
    }
    removed
}

impl<A> SnomedTaxonomy<A> {
    /// Creates an empty taxonomy.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Mutators used by the loader
    // ------------------------------------------------------------------

    pub(crate) fn add_concept(&mut self, concept_id: SctId, fully_defined: bool) {
        self.all_concept_ids.insert(concept_id);
        if fully_defined {
            self.fully_defined_concept_ids.insert(concept_id);
        } else {
            self.fully_defined_concept_ids.remove(&concept_id);
        }
    }

    pub(crate) fn remove_concept(&mut self, concept_id: SctId) {
        self.all_concept_ids.remove(&concept_id);
        self.fully_defined_concept_ids.remove(&concept_id);
    }

    fn relationships_mut(
        &mut self,
        axis: RelationshipAxis,
    ) -> &mut HashMap<SctId, HashMap<SctId, Relationship>> {
        match axis {
            RelationshipAxis::Stated => &mut self.stated_relationships,
            RelationshipAxis::Inferred => &mut self.inferred_relationships,
        }
    }

    /// Inserts or replaces the relationship with the same id on `source_id`.
    pub(crate) fn add_or_modify_relationship(
        &mut self,
        axis: RelationshipAxis,
        source_id: SctId,
        relationship: Relationship,
    ) {
        self.relationships_mut(axis)
            .entry(source_id)
            .or_default()
            .insert(relationship.relationship_id, relationship);
    }

    pub(crate) fn remove_relationship(
        &mut self,
        axis: RelationshipAxis,
        source_id: SctId,
        relationship_id: SctId,
    ) -> Option<Relationship> {
        remove_nested(self.relationships_mut(axis), source_id, &relationship_id)
    }

    pub(crate) fn add_axiom(&mut self, concept_id: SctId, member_id: String, axiom: A) {
        self.axioms
            .entry(concept_id)
            .or_default()
            .insert(member_id, axiom);
    }

    pub(crate) fn remove_axiom(&mut self, concept_id: SctId, member_id: &str) -> Option<A> {
        remove_nested(&mut self.axioms, concept_id, member_id)
    }

    pub(crate) fn add_ungrouped_role(&mut self, content_type_id: SctId, attribute_id: SctId) {
        self.ungrouped_roles
            .entry(content_type_id)
            .or_default()
            .insert(attribute_id);
    }

    pub(crate) fn remove_ungrouped_role(&mut self, content_type_id: SctId, attribute_id: SctId) {
        if let Entry::Occupied(mut entry) = self.ungrouped_roles.entry(content_type_id) {
            entry.get_mut().remove(&attribute_id);
            if entry.get().is_empty() {
                entry.remove();
            }
        }
    }

    // ------------------------------------------------------------------
    // Concepts
    // ------------------------------------------------------------------

    /// All active concepts.
    pub fn all_concept_ids(&self) -> &HashSet<SctId> {
        &self.all_concept_ids
    }

    /// Active concepts whose definition status is fully defined.
    pub fn fully_defined_concept_ids(&self) -> &HashSet<SctId> {
        &self.fully_defined_concept_ids
    }

    /// Returns true if the concept is active in the taxonomy.
    pub fn contains_concept(&self, concept_id: SctId) -> bool {
        self.all_concept_ids.contains(&concept_id)
    }

    /// Returns true if the concept is active and fully defined.
    pub fn is_fully_defined(&self, concept_id: SctId) -> bool {
        self.fully_defined_concept_ids.contains(&concept_id)
    }

    /// Number of active concepts.
    pub fn concept_count(&self) -> usize {
        self.all_concept_ids.len()
    }

    // ------------------------------------------------------------------
    // Relationships
    // ------------------------------------------------------------------

    /// Stated relationships of a source concept, keyed by relationship id.
    pub fn stated_relationships(&self, source_id: SctId) -> Option<&HashMap<SctId, Relationship>> {
        self.stated_relationships.get(&source_id)
    }

    /// Inferred relationships of a source concept, keyed by relationship id.
    pub fn inferred_relationships(
        &self,
        source_id: SctId,
    ) -> Option<&HashMap<SctId, Relationship>> {
        self.inferred_relationships.get(&source_id)
    }

    /// A single stated relationship.
    pub fn stated_relationship(&self, source_id: SctId, relationship_id: SctId) -> Option<&Relationship> {
        self.stated_relationships(source_id)?.get(&relationship_id)
    }

    /// A single inferred relationship.
    pub fn inferred_relationship(
        &self,
        source_id: SctId,
        relationship_id: SctId,
    ) -> Option<&Relationship> {
        self.inferred_relationships(source_id)?.get(&relationship_id)
    }

    /// Total number of stated relationships.
    pub fn stated_relationship_count(&self) -> usize {
        self.stated_relationships.values().map(HashMap::len).sum()
    }

    /// Total number of inferred relationships.
    pub fn inferred_relationship_count(&self) -> usize {
        self.inferred_relationships.values().map(HashMap::len).sum()
    }

    // ------------------------------------------------------------------
    // Axioms
    // ------------------------------------------------------------------

    /// Parsed axioms referencing a concept, keyed by refset member id.
    pub fn axioms(&self, concept_id: SctId) -> Option<&HashMap<String, A>> {
        self.axioms.get(&concept_id)
    }

    /// The axiom stored for one refset member.
    pub fn axiom(&self, concept_id: SctId, member_id: &str) -> Option<&A> {
        self.axioms(concept_id)?.get(member_id)
    }

    /// Total number of stored axioms.
    pub fn axiom_count(&self) -> usize {
        self.axioms.values().map(HashMap::len).sum()
    }

    // ------------------------------------------------------------------
    // Ungrouped roles
    // ------------------------------------------------------------------

    /// Attributes that must not be grouped for a content type.
    pub fn ungrouped_roles(&self, content_type_id: SctId) -> Option<&HashSet<SctId>> {
        self.ungrouped_roles.get(&content_type_id)
    }

    /// Like [`ungrouped_roles`](Self::ungrouped_roles), falling back to
    /// "all precoordinated content" when the content type has no entry.
    pub fn ungrouped_roles_for_content_type_or_default(
        &self,
        content_type_id: SctId,
    ) -> Option<&HashSet<SctId>> {
        self.ungrouped_roles(content_type_id)
            .or_else(|| self.ungrouped_roles(well_known::ALL_PRECOORDINATED_CONTENT))
    }
}
