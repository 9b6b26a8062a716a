//! OWL 2 functional syntax document parser, built on `nom` combinators.
//!
//! Only the structure is checked: constructors are accepted by name with
//! any arguments, which is all the axiom refset needs before the axioms are
//! handed on to a reasoner. Constructors nested deeper than
//! [`MAX_NESTING_DEPTH`] are a syntax error.

use std::collections::HashMap;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, multispace1, none_of, one_of, satisfy},
    combinator::{cut, eof, map, map_res, opt, recognize},
    error::{context, VerboseError, VerboseErrorKind},
    multi::{fold_many0, many0},
    sequence::{delimited, pair, preceded, separated_pair, terminated},
    IResult, Parser,
};

use super::{OwlAxiom, OwlExpression, OwlLiteral, OwlTerm};
use crate::types::AxiomError;

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Declared prefix name to namespace IRI.
type Prefixes<'a> = HashMap<&'a str, String>;

/// Deepest constructor nesting accepted, counting the axiom itself as 1.
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

const UNDECLARED_PREFIX: &str = "declared prefix";
const NESTING_TOO_DEEP: &str = "nesting too deep";

/// Prefixes every functional syntax document may use without declaring them.
const STANDARD_PREFIXES: &[(&str, &str)] = &[
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// Ontology-level elements that appear inside `Ontology(...)` but are not axioms.
const NON_AXIOM_ELEMENTS: &[&str] = &["Import", "Annotation"];

/// Parses a whole ontology document into its distinct axioms.
pub(crate) fn parse_document(input: &str) -> Result<Vec<OwlAxiom>, AxiomError> {
    match document(input) {
        Ok((_, axioms)) => Ok(axioms),
        Err(nom::Err::Error(error)) | Err(nom::Err::Failure(error)) => {
            Err(to_axiom_error(input, &error))
        }
        Err(nom::Err::Incomplete(_)) => {
            Err(syntax_error(input.len(), "unexpected end of document"))
        }
    }
}

fn syntax_error(offset: usize, message: impl Into<String>) -> AxiomError {
    AxiomError::Syntax {
        offset,
        message: message.into(),
    }
}

/// Maps the innermost failure to an [`AxiomError`] with its byte offset.
fn to_axiom_error(document: &str, error: &VerboseError<&str>) -> AxiomError {
    let Some((rest, kind)) = error.errors.first() else {
        return syntax_error(0, "malformed document");
    };
    let offset = document.len() - rest.len();

    let innermost_context = error.errors.iter().find_map(|(_, kind)| match kind {
        VerboseErrorKind::Context(context) => Some(*context),
        _ => None,
    });

    match innermost_context {
        Some(UNDECLARED_PREFIX) => AxiomError::UnknownPrefix {
            prefix: rest.split_once(':').map_or(*rest, |(prefix, _)| prefix).to_string(),
            offset,
        },
        Some(NESTING_TOO_DEEP) => syntax_error(
            offset,
            format!("nesting too deep (more than {MAX_NESTING_DEPTH} levels)"),
        ),
        Some(expected) => syntax_error(offset, format!("expected {expected}")),
        None => match kind {
            VerboseErrorKind::Char(c) => syntax_error(offset, format!("expected '{c}'")),
            VerboseErrorKind::Nom(kind) => syntax_error(offset, kind.description()),
            VerboseErrorKind::Context(context) => {
                syntax_error(offset, format!("expected {context}"))
            }
        },
    }
}

fn fail_at<'a, O>(input: &'a str, reason: &'static str) -> ParseResult<'a, O> {
    Err(nom::Err::Failure(VerboseError {
        errors: vec![(input, VerboseErrorKind::Context(reason))],
    }))
}

// ============================================================================
// Lexical pieces
// ============================================================================

/// Skips whitespace and `#` line comments.
fn ws(input: &str) -> ParseResult<'_, ()> {
    fold_many0(alt((multispace1, comment)), || (), |_, _| ())(input)
}

fn comment(input: &str) -> ParseResult<'_, &str> {
    recognize(pair(char('#'), take_while(|c: char| c != '\n')))(input)
}

fn token<'a, O, F>(parser: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: Parser<&'a str, O, VerboseError<&'a str>>,
{
    preceded(ws, parser)
}

fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | '<' | '>' | '"' | '=' | '^' | '@' | '#' | ':')
}

/// Constructor name such as `ObjectSomeValuesFrom`.
fn keyword(input: &str) -> ParseResult<'_, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric()),
    ))(input)
}

/// `prefix:local`; the empty prefix is written `:local`.
fn prefixed_name(input: &str) -> ParseResult<'_, (&str, &str)> {
    pair(
        terminated(take_while(is_name_char), char(':')),
        take_while(|c: char| is_name_char(c) || c == ':'),
    )(input)
}

/// Full IRI, returned without the angle brackets.
fn full_iri(input: &str) -> ParseResult<'_, &str> {
    preceded(
        char('<'),
        cut(context(
            "well-formed IRI",
            terminated(take_while1(|c: char| c != '>' && !c.is_whitespace()), char('>')),
        )),
    )(input)
}

/// Quoted string with `\"` and `\\` escapes resolved.
fn quoted(input: &str) -> ParseResult<'_, String> {
    preceded(
        char('"'),
        cut(terminated(
            fold_many0(
                alt((
                    none_of("\\\""),
                    preceded(char('\\'), cut(context("escape sequence", one_of("\\\"")))),
                )),
                String::new,
                |mut lexical: String, c: char| {
                    lexical.push(c);
                    lexical
                },
            ),
            context("closing '\"'", char('"')),
        )),
    )(input)
}

fn language_tag(input: &str) -> ParseResult<'_, &str> {
    preceded(
        char('@'),
        cut(context(
            "language tag",
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-'),
        )),
    )(input)
}

// ============================================================================
// Entities and terms
// ============================================================================

fn prefixed_entity<'a>(input: &'a str, prefixes: &Prefixes<'a>) -> ParseResult<'a, String> {
    let (rest, (prefix, local)) = prefixed_name(input)?;
    match prefixes.get(prefix) {
        Some(namespace) => Ok((rest, format!("{namespace}{local}"))),
        None => fail_at(input, UNDECLARED_PREFIX),
    }
}

fn entity<'a>(input: &'a str, prefixes: &Prefixes<'a>) -> ParseResult<'a, String> {
    alt((
        map(full_iri, str::to_string),
        |i: &'a str| prefixed_entity(i, prefixes),
    ))(input)
}

fn literal<'a>(input: &'a str, prefixes: &Prefixes<'a>) -> ParseResult<'a, OwlLiteral> {
    let (input, lexical) = quoted(input)?;

    let (input, caret) = opt(token(tag("^^")))(input)?;
    if caret.is_some() {
        let (input, datatype) = cut(context(
            "datatype after '^^'",
            token(|i: &'a str| entity(i, prefixes)),
        ))(input)?;
        return Ok((
            input,
            OwlLiteral {
                lexical,
                datatype: Some(datatype),
                language: None,
            },
        ));
    }

    let (input, language) = opt(language_tag)(input)?;
    Ok((
        input,
        OwlLiteral {
            lexical,
            datatype: None,
            language: language.map(str::to_string),
        },
    ))
}

fn term<'a>(input: &'a str, depth: usize, prefixes: &Prefixes<'a>) -> ParseResult<'a, OwlTerm> {
    preceded(
        ws,
        alt((
            map(full_iri, |iri: &str| OwlTerm::Entity(iri.to_string())),
            map(preceded(tag("_:"), take_while1(is_name_char)), |node: &str| {
                OwlTerm::AnonymousIndividual(node.to_string())
            }),
            map(|i: &'a str| prefixed_entity(i, prefixes), OwlTerm::Entity),
            map(|i: &'a str| literal(i, prefixes), OwlTerm::Literal),
            map_res(digit1, |digits: &str| digits.parse().map(OwlTerm::Integer)),
            map(
                |i: &'a str| expression(i, depth + 1, prefixes),
                OwlTerm::Expression,
            ),
        )),
    )(input)
}

fn expression<'a>(
    input: &'a str,
    depth: usize,
    prefixes: &Prefixes<'a>,
) -> ParseResult<'a, OwlExpression> {
    let (input, _) = ws(input)?;
    let start = input;
    let (input, constructor) = keyword(input)?;
    if depth > MAX_NESTING_DEPTH {
        return fail_at(start, NESTING_TOO_DEEP);
    }

    let (input, _) = cut(context("'(' after constructor", token(char('('))))(input)?;
    let (input, arguments) = many0(|i: &'a str| term(i, depth, prefixes))(input)?;
    let (input, _) = cut(context("')'", token(char(')'))))(input)?;

    Ok((
        input,
        OwlExpression {
            constructor: constructor.to_string(),
            arguments,
        },
    ))
}

// ============================================================================
// Document
// ============================================================================

fn prefix_declaration(input: &str) -> ParseResult<'_, (&str, &str)> {
    preceded(
        token(tag("Prefix")),
        cut(delimited(
            context("'(' after 'Prefix'", token(char('('))),
            separated_pair(
                context(
                    "prefix name ending in ':'",
                    token(terminated(take_while(is_name_char), char(':'))),
                ),
                context("'=' in prefix declaration", token(char('='))),
                context("full IRI in prefix declaration", token(full_iri)),
            ),
            context("')' closing the prefix declaration", token(char(')'))),
        )),
    )(input)
}

fn document<'a>(input: &'a str) -> ParseResult<'a, Vec<OwlAxiom>> {
    let (input, declarations) = many0(prefix_declaration)(input)?;

    let mut prefixes: Prefixes<'a> = STANDARD_PREFIXES
        .iter()
        .map(|(prefix, iri)| (*prefix, iri.to_string()))
        .collect();
    prefixes.extend(
        declarations
            .into_iter()
            .map(|(prefix, iri)| (prefix, iri.to_string())),
    );

    let (input, _) = context("'Ontology'", token(tag("Ontology")))(input)?;
    let (input, _) = cut(context("'(' after 'Ontology'", token(char('('))))(input)?;
    // Optional ontology IRI, then optional version IRI.
    let (input, _) = opt(token(full_iri))(input)?;
    let (input, _) = opt(token(full_iri))(input)?;
    let (input, elements) = many0(|i: &'a str| expression(i, 1, &prefixes))(input)?;
    let (input, _) = cut(context("')' closing the ontology", token(char(')'))))(input)?;
    let (input, _) = cut(context("end of document", preceded(ws, eof)))(input)?;

    let mut axioms: Vec<OwlAxiom> = Vec::new();
    for element in elements {
        if NON_AXIOM_ELEMENTS.contains(&element.constructor.as_str()) {
            continue;
        }
        let axiom = OwlAxiom::new(element);
        if !axioms.contains(&axiom) {
            axioms.push(axiom);
        }
    }

    Ok((input, axioms))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCT: &str = "http://snomed.info/id/";

    fn envelope(body: &str) -> String {
        format!("Prefix(:=<{SCT}>) Ontology({body})")
    }

    fn parse(body: &str) -> Result<Vec<OwlAxiom>, AxiomError> {
        parse_document(&envelope(body))
    }

    /// `levels` constructors nested inside each other, the axiom included.
    fn nested(levels: usize) -> String {
        let inner = levels - 1;
        format!(
            "SubClassOf(:1 {}:2{})",
            "ObjectIntersectionOf(".repeat(inner),
            ")".repeat(inner)
        )
    }

    #[test]
    fn test_subclass_axiom() {
        let axioms = parse("SubClassOf(:404684003 :138875005)").unwrap();
        assert_eq!(axioms.len(), 1);
        assert_eq!(axioms[0].kind(), "SubClassOf");
        assert_eq!(
            axioms[0].arguments(),
            &[
                OwlTerm::Entity(format!("{SCT}404684003")),
                OwlTerm::Entity(format!("{SCT}138875005")),
            ]
        );
    }

    #[test]
    fn test_nested_class_expressions() {
        let axioms = parse(
            "EquivalentClasses(:73211009 ObjectIntersectionOf(:362969004 \
             ObjectSomeValuesFrom(:609096000 ObjectSomeValuesFrom(:363698007 :113331007))))",
        )
        .unwrap();

        assert_eq!(axioms.len(), 1);
        let OwlTerm::Expression(intersection) = &axioms[0].arguments()[1] else {
            panic!("expected a nested expression");
        };
        assert_eq!(intersection.constructor, "ObjectIntersectionOf");
        assert_eq!(intersection.arguments.len(), 2);
    }

    #[test]
    fn test_data_values_and_cardinalities() {
        let axioms = parse(
            "SubClassOf(:1 ObjectIntersectionOf(DataHasValue(:2 \"500\"^^xsd:decimal) \
             ObjectMinCardinality(1 :3 :4)))",
        )
        .unwrap();

        let OwlTerm::Expression(intersection) = &axioms[0].arguments()[1] else {
            panic!("expected a nested expression");
        };
        let OwlTerm::Expression(has_value) = &intersection.arguments[0] else {
            panic!("expected DataHasValue");
        };
        assert_eq!(
            has_value.arguments[1],
            OwlTerm::Literal(OwlLiteral {
                lexical: "500".to_string(),
                datatype: Some("http://www.w3.org/2001/XMLSchema#decimal".to_string()),
                language: None,
            })
        );
        let OwlTerm::Expression(min_cardinality) = &intersection.arguments[1] else {
            panic!("expected ObjectMinCardinality");
        };
        assert_eq!(min_cardinality.arguments[0], OwlTerm::Integer(1));
    }

    #[test]
    fn test_tagged_literal_with_escapes() {
        let axioms = parse(r#"AnnotationAssertion(rdfs:label :1 "a \"b\" \\ c"@en-GB)"#).unwrap();

        assert_eq!(
            axioms[0].arguments()[2],
            OwlTerm::Literal(OwlLiteral {
                lexical: r#"a "b" \ c"#.to_string(),
                datatype: None,
                language: Some("en-GB".to_string()),
            })
        );
    }

    #[test]
    fn test_anonymous_individuals_and_full_iris() {
        let axioms = parse("ClassAssertion(<http://example.org/A> _:b0)").unwrap();

        assert_eq!(
            axioms[0].arguments(),
            &[
                OwlTerm::Entity("http://example.org/A".to_string()),
                OwlTerm::AnonymousIndividual("b0".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let axioms = parse_document(
            "# module axioms\n\
             Prefix(:=<http://snomed.info/id/>)\n\
             Ontology( # body\n\
               SubClassOf(:1 # child\n :2)\n\
             )\n",
        )
        .unwrap();

        assert_eq!(axioms.len(), 1);
    }

    #[test]
    fn test_ontology_iri_imports_and_annotations_are_not_axioms() {
        let axioms = parse_document(
            "Prefix(:=<http://snomed.info/id/>) \
             Ontology(<http://snomed.info/sct/900000000000207008> \
             <http://snomed.info/sct/900000000000207008/version/20250101> \
             Import(<http://example.org/other>) \
             Annotation(rdfs:comment \"core\"@en) \
             Declaration(Class(:1)) \
             TransitiveObjectProperty(:116680003))",
        )
        .unwrap();

        let kinds: Vec<&str> = axioms.iter().map(OwlAxiom::kind).collect();
        assert_eq!(kinds, vec!["Declaration", "TransitiveObjectProperty"]);
    }

    #[test]
    fn test_repeated_axiom_is_kept_once() {
        let axioms = parse("SubClassOf(:1 :2) SubClassOf(:1 :2) SubClassOf(:1 :3)").unwrap();

        assert_eq!(axioms.len(), 2);
        assert_eq!(axioms[0].arguments()[1], OwlTerm::Entity(format!("{SCT}2")));
        assert_eq!(axioms[1].arguments()[1], OwlTerm::Entity(format!("{SCT}3")));
    }

    #[test]
    fn test_empty_ontology_has_no_axioms() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_undeclared_prefix_reports_its_offset() {
        let document = envelope("SubClassOf(snomed:1 :2)");
        let error = parse_document(&document).unwrap_err();

        let AxiomError::UnknownPrefix { prefix, offset } = &error else {
            panic!("expected an unknown prefix, got {error:?}");
        };
        assert_eq!(prefix, "snomed");
        assert_eq!(*offset, document.find("snomed:").unwrap());
    }

    #[test]
    fn test_nesting_limit() {
        assert_eq!(parse(&nested(MAX_NESTING_DEPTH)).unwrap().len(), 1);

        let document = envelope(&nested(MAX_NESTING_DEPTH + 1));
        let error = parse_document(&document).unwrap_err();
        let AxiomError::Syntax { offset, message } = &error else {
            panic!("expected a syntax error, got {error:?}");
        };
        assert!(message.contains("nesting too deep"));
        assert_eq!(&document[*offset..*offset + 20], "ObjectIntersectionOf");
    }

    #[test]
    fn test_very_deep_nesting_fails_cleanly() {
        let error = parse(&nested(100_000)).unwrap_err();
        assert!(matches!(error, AxiomError::Syntax { ref message, .. } if message.contains("nesting too deep")));
    }

    #[test]
    fn test_unbalanced_documents_are_rejected() {
        assert!(parse("SubClassOf(:1 :2").is_err());
        assert!(parse("SubClassOf(:1 :2))").is_err());
        assert!(parse("SubClassOf :1 :2").is_err());
        assert!(parse(":1").is_err());
    }

    #[test]
    fn test_malformed_lexical_forms_are_rejected() {
        let unterminated_iri = parse("SubClassOf(<http://example.org/A :2)").unwrap_err();
        assert!(matches!(unterminated_iri, AxiomError::Syntax { ref message, .. } if message == "expected well-formed IRI"));

        let unterminated_literal = parse("DataHasValue(:1 \"500)").unwrap_err();
        assert!(matches!(unterminated_literal, AxiomError::Syntax { .. }));

        let bad_escape = parse(r#"DataHasValue(:1 "a\nb")"#).unwrap_err();
        assert!(matches!(bad_escape, AxiomError::Syntax { ref message, .. } if message == "expected escape sequence"));
    }

    #[test]
    fn test_syntax_error_offset_points_at_the_problem() {
        let document = envelope("SubClassOf :1 :2");
        let error = parse_document(&document).unwrap_err();

        let AxiomError::Syntax { offset, message } = &error else {
            panic!("expected a syntax error, got {error:?}");
        };
        assert_eq!(*offset, document.find(" :1").unwrap() + 1);
        assert_eq!(message, "expected '(' after constructor");
    }

    #[test]
    fn test_missing_ontology_keyword_is_rejected() {
        assert!(matches!(
            parse_document("Prefix(:=<http://snomed.info/id/>) SubClassOf(:1 :2)"),
            Err(AxiomError::Syntax { .. })
        ));
    }
}
