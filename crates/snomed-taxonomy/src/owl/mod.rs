//! Built-in OWL 2 functional syntax axiom parser.
//!
//! [`FunctionalSyntaxParser`] is the default [`AxiomParser`] for the
//! taxonomy loader. It reads the subset of functional syntax that SNOMED CT
//! publishes in the OWL axiom reference set and returns each axiom as an
//! [`OwlAxiom`]: a constructor name with an argument tree, kept as-is for
//! the reasoner adapter.
//!
//! # Usage
//!
//! ```
//! use snomed_taxonomy::axiom::deserialise_axiom;
//! use snomed_taxonomy::owl::FunctionalSyntaxParser;
//!
//! let axiom = deserialise_axiom(&FunctionalSyntaxParser::new(), "SubClassOf(:404684003 :138875005)")
//!     .unwrap();
//!
//! assert_eq!(axiom.kind(), "SubClassOf");
//! assert!(axiom.concept_ids().contains(&138875005));
//! ```

mod parser;

use std::collections::BTreeSet;

use snomed_types::SctId;

use crate::axiom::AxiomParser;
use crate::types::AxiomError;

/// Namespace of SNOMED CT concept IRIs.
pub const SNOMED_IRI: &str = "http://snomed.info/id/";

/// Returns true if `iri` names a SNOMED CT concept.
pub fn is_concept_iri(iri: &str) -> bool {
    iri.starts_with(SNOMED_IRI)
}

/// Extracts the concept id from a SNOMED CT concept IRI.
///
/// Returns `None` for IRIs outside the namespace or with a non-numeric local part.
pub fn concept_id_from_iri(iri: &str) -> Option<SctId> {
    iri.strip_prefix(SNOMED_IRI)?.parse().ok()
}

/// A literal value such as `"500"^^xsd:decimal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwlLiteral {
    /// Lexical form, with escapes resolved.
    pub lexical: String,
    /// Full datatype IRI, when typed.
    pub datatype: Option<String>,
    /// Language tag, when tagged.
    pub language: Option<String>,
}

/// One argument of a functional syntax constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwlTerm {
    /// A named entity, by full IRI.
    Entity(String),
    /// An anonymous individual such as `_:b0`, by node id.
    AnonymousIndividual(String),
    /// A literal value.
    Literal(OwlLiteral),
    /// A bare non-negative integer (cardinalities).
    Integer(u64),
    /// A nested constructor.
    Expression(OwlExpression),
}

/// A constructor applied to its arguments, such as `ObjectSomeValuesFrom(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwlExpression {
    /// Constructor name.
    pub constructor: String,
    /// Arguments in document order.
    pub arguments: Vec<OwlTerm>,
}

impl OwlExpression {
    fn collect_concept_ids(&self, ids: &mut BTreeSet<SctId>) {
        for argument in &self.arguments {
            match argument {
                OwlTerm::Entity(iri) => ids.extend(concept_id_from_iri(iri)),
                OwlTerm::Expression(nested) => nested.collect_concept_ids(ids),
                OwlTerm::AnonymousIndividual(_) | OwlTerm::Literal(_) | OwlTerm::Integer(_) => {}
            }
        }
    }
}

/// A parsed top-level axiom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwlAxiom {
    expression: OwlExpression,
}

impl OwlAxiom {
    pub(crate) fn new(expression: OwlExpression) -> Self {
        Self { expression }
    }

    /// Axiom constructor, e.g. `SubClassOf` or `EquivalentClasses`.
    pub fn kind(&self) -> &str {
        &self.expression.constructor
    }

    /// Top-level arguments of the axiom.
    pub fn arguments(&self) -> &[OwlTerm] {
        &self.expression.arguments
    }

    /// The axiom as an expression tree.
    pub fn expression(&self) -> &OwlExpression {
        &self.expression
    }

    /// Every SNOMED CT concept the axiom mentions, at any depth.
    pub fn concept_ids(&self) -> BTreeSet<SctId> {
        let mut ids = BTreeSet::new();
        self.expression.collect_concept_ids(&mut ids);
        ids
    }
}

/// Parser for OWL 2 functional syntax ontology documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionalSyntaxParser;

impl FunctionalSyntaxParser {
    /// Creates a parser.
    pub fn new() -> Self {
        Self
    }
}

impl AxiomParser for FunctionalSyntaxParser {
    type Axiom = OwlAxiom;

    fn parse_document(&self, document: &str) -> Result<Vec<OwlAxiom>, AxiomError> {
        parser::parse_document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axiom::deserialise_axiom;

    #[test]
    fn test_concept_iri_helpers() {
        assert!(is_concept_iri("http://snomed.info/id/73211009"));
        assert!(!is_concept_iri("http://www.w3.org/2002/07/owl#Thing"));
        assert_eq!(
            concept_id_from_iri("http://snomed.info/id/73211009"),
            Some(73211009)
        );
        assert_eq!(concept_id_from_iri("http://snomed.info/id/abc"), None);
        assert_eq!(concept_id_from_iri("http://example.org/1"), None);
    }

    #[test]
    fn test_concept_ids_from_nested_axiom() {
        let axiom = deserialise_axiom(
            &FunctionalSyntaxParser::new(),
            "EquivalentClasses(:73211009 ObjectIntersectionOf(:362969004 \
             ObjectSomeValuesFrom(:609096000 ObjectSomeValuesFrom(:363698007 :113331007))))",
        )
        .unwrap();

        assert_eq!(axiom.kind(), "EquivalentClasses");
        assert_eq!(
            axiom.concept_ids().into_iter().collect::<Vec<_>>(),
            vec![73211009, 113331007, 362969004, 363698007, 609096000]
        );
    }

    #[test]
    fn test_two_axioms_in_one_member_is_an_error() {
        let result = deserialise_axiom(
            &FunctionalSyntaxParser::new(),
            "SubClassOf(:1 :2) SubClassOf(:1 :3)",
        );
        assert!(matches!(result, Err(AxiomError::AxiomCount { found: 2 })));
    }

    #[test]
    fn test_property_axioms() {
        let parser = FunctionalSyntaxParser::new();

        let chain = deserialise_axiom(
            &parser,
            "SubObjectPropertyOf(ObjectPropertyChain(:363701004 :738774007) :363701004)",
        )
        .unwrap();
        assert_eq!(chain.kind(), "SubObjectPropertyOf");

        let transitive = deserialise_axiom(&parser, "TransitiveObjectProperty(:774081006)").unwrap();
        assert_eq!(transitive.concept_ids().into_iter().collect::<Vec<_>>(), vec![774081006]);
    }
}
