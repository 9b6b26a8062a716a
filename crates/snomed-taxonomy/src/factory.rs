//! Row callbacks for RF2 import.
//!
//! A row source walks the release and hands every component state to a
//! [`ComponentFactory`]. Each method has an empty default body, so a factory
//! only implements the row kinds it consumes.

use snomed_types::{Rf2Concept, Rf2RefsetMember, Rf2Relationship};

/// Receives component states one row at a time, in source order.
pub trait ComponentFactory {
    /// Called for every concept row.
    fn apply_concept_row(&mut self, _concept: &Rf2Concept) {}

    /// Called for every stated or inferred relationship row.
    fn apply_relationship_row(&mut self, _relationship: &Rf2Relationship) {}

    /// Called for every reference set member row, whatever its refset.
    fn apply_refset_member_row(&mut self, _member: &Rf2RefsetMember) {}
}

impl<F: ComponentFactory + ?Sized> ComponentFactory for &mut F {
    fn apply_concept_row(&mut self, concept: &Rf2Concept) {
        (**self).apply_concept_row(concept);
    }

    fn apply_relationship_row(&mut self, relationship: &Rf2Relationship) {
        (**self).apply_relationship_row(relationship);
    }

    fn apply_refset_member_row(&mut self, member: &Rf2RefsetMember) {
        (**self).apply_refset_member_row(member);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ConceptCounter {
        concepts: usize,
    }

    impl ComponentFactory for ConceptCounter {
        fn apply_concept_row(&mut self, _concept: &Rf2Concept) {
            self.concepts += 1;
        }
    }

    fn feed<F: ComponentFactory>(mut factory: F, concept: &Rf2Concept, member: &Rf2RefsetMember) {
        factory.apply_concept_row(concept);
        factory.apply_refset_member_row(member);
    }

    #[test]
    fn test_unimplemented_callbacks_are_ignored() {
        let mut counter = ConceptCounter::default();
        let concept = Rf2Concept {
            id: 138875005,
            effective_time: Some(20020131),
            active: true,
            module_id: 900000000000207008,
            definition_status_id: 900000000000074008,
        };
        let member = Rf2RefsetMember {
            field_names: Vec::new(),
            id: "a".to_string(),
            effective_time: None,
            active: true,
            module_id: 900000000000207008,
            refset_id: 1,
            referenced_component_id: 138875005,
            other_values: Vec::new(),
        };

        feed(&mut counter, &concept, &member);
        counter.apply_concept_row(&concept);

        assert_eq!(counter.concepts, 2);
    }
}
