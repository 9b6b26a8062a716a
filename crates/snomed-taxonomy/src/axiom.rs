//! Boundary to the logical-expression parser.
//!
//! Axiom refset members carry a single OWL functional syntax axiom with
//! concept ids written as `:12345`. To parse one, the expression is wrapped
//! in a minimal in-memory ontology document that binds the empty prefix to
//! the SNOMED CT namespace, and the document must yield exactly one axiom.
//!
//! The taxonomy never looks inside a parsed axiom, so the parser decides
//! what an axiom handle is through [`AxiomParser::Axiom`].

use crate::types::AxiomError;

/// Start of the ontology document an axiom expression is wrapped in.
pub const ONTOLOGY_DOC_START: &str = "Prefix(:=<http://snomed.info/id/>) Ontology(";

/// End of the ontology document an axiom expression is wrapped in.
pub const ONTOLOGY_DOC_END: &str = ")";

/// Turns an ontology document into parsed axioms.
pub trait AxiomParser {
    /// Parsed axiom handle stored in the taxonomy.
    type Axiom;

    /// Parses a complete ontology document and returns its axioms in
    /// document order.
    fn parse_document(&self, document: &str) -> Result<Vec<Self::Axiom>, AxiomError>;
}

impl<P: AxiomParser + ?Sized> AxiomParser for &P {
    type Axiom = P::Axiom;

    fn parse_document(&self, document: &str) -> Result<Vec<Self::Axiom>, AxiomError> {
        (**self).parse_document(document)
    }
}

/// Wraps an axiom expression in the ontology document envelope.
pub fn ontology_document(expression: &str) -> String {
    let mut document =
        String::with_capacity(ONTOLOGY_DOC_START.len() + expression.len() + ONTOLOGY_DOC_END.len());
    document.push_str(ONTOLOGY_DOC_START);
    document.push_str(expression);
    document.push_str(ONTOLOGY_DOC_END);
    document
}

/// Parses one axiom refset expression into exactly one axiom.
///
/// # Errors
/// Returns the parser's error, or [`AxiomError::AxiomCount`] when the
/// document holds no axiom or more than one.
pub fn deserialise_axiom<P: AxiomParser + ?Sized>(
    parser: &P,
    expression: &str,
) -> Result<P::Axiom, AxiomError> {
    let mut axioms = parser.parse_document(&ontology_document(expression))?;
    let found = axioms.len();
    match axioms.pop() {
        Some(axiom) if found == 1 => Ok(axiom),
        _ => Err(AxiomError::AxiomCount { found }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Treats every whitespace-separated word inside the envelope as one axiom.
    struct WordParser;

    impl AxiomParser for WordParser {
        type Axiom = String;

        fn parse_document(&self, document: &str) -> Result<Vec<String>, AxiomError> {
            let body = document
                .strip_prefix(ONTOLOGY_DOC_START)
                .and_then(|rest| rest.strip_suffix(ONTOLOGY_DOC_END))
                .ok_or_else(|| AxiomError::Syntax {
                    offset: 0,
                    message: "missing envelope".to_string(),
                })?;
            Ok(body.split_whitespace().map(str::to_string).collect())
        }
    }

    #[test]
    fn test_envelope_wraps_expression() {
        assert_eq!(
            ontology_document("SubClassOf(:1 :2)"),
            "Prefix(:=<http://snomed.info/id/>) Ontology(SubClassOf(:1 :2))"
        );
    }

    #[test]
    fn test_single_axiom_is_returned() {
        let axiom = deserialise_axiom(&WordParser, "only").unwrap();
        assert_eq!(axiom, "only");
    }

    #[test]
    fn test_axiom_count_must_be_one() {
        assert!(matches!(
            deserialise_axiom(&WordParser, ""),
            Err(AxiomError::AxiomCount { found: 0 })
        ));
        assert!(matches!(
            deserialise_axiom(&WordParser, "one two"),
            Err(AxiomError::AxiomCount { found: 2 })
        ));
    }

    #[test]
    fn test_parser_by_reference() {
        let parser = WordParser;
        let by_ref = &parser;
        assert_eq!(deserialise_axiom(&by_ref, "x").unwrap(), "x");
    }
}
