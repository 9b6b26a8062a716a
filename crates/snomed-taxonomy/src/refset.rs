//! RF2 Reference Set member row parser.
//!
//! Every refset pattern shares the six leading columns below. Whatever
//! follows `referencedComponentId` is kept as raw strings together with the
//! header names, so one parser serves OWL expression, MRCM and any other
//! refset file.

use csv::StringRecord;
use snomed_types::Rf2RefsetMember;

use crate::parser::{parse, Rf2Record};
use crate::types::Rf2Result;

/// Leading columns shared by all reference set files.
const REFSET_COLUMNS: &[&str] = &[
    "id",
    "effectiveTime",
    "active",
    "moduleId",
    "refsetId",
    "referencedComponentId",
];

impl Rf2Record for Rf2RefsetMember {
    const EXPECTED_COLUMNS: &'static [&'static str] = REFSET_COLUMNS;

    fn from_record(record: &StringRecord, header: &StringRecord) -> Rf2Result<Self> {
        let leading = REFSET_COLUMNS.len();

        Ok(Rf2RefsetMember {
            field_names: header.iter().skip(leading).map(str::to_string).collect(),
            id: parse::field(record, 0, "id")?.to_string(),
            effective_time: parse::optional_effective_time(parse::field(
                record,
                1,
                "effectiveTime",
            )?)?,
            active: parse::boolean(parse::field(record, 2, "active")?)?,
            module_id: parse::sctid(parse::field(record, 3, "moduleId")?)?,
            refset_id: parse::sctid(parse::field(record, 4, "refsetId")?)?,
            referenced_component_id: parse::sctid(parse::field(
                record,
                5,
                "referencedComponentId",
            )?)?,
            other_values: record.iter().skip(leading).map(str::to_string).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Rf2Parser;
    use snomed_types::well_known;

    #[test]
    fn test_parse_owl_expression_member() {
        let header = StringRecord::from(vec![
            "id",
            "effectiveTime",
            "active",
            "moduleId",
            "refsetId",
            "referencedComponentId",
            "owlExpression",
        ]);
        let record = StringRecord::from(vec![
            "7f5ed0a1-3c1e-4b3f-9b67-0f4c1a8d2e11",
            "20230101",
            "1",
            "900000000000207008",
            "733073007",
            "404684003",
            "SubClassOf(:404684003 :138875005)",
        ]);

        let member = Rf2RefsetMember::from_record(&record, &header).unwrap();
        assert_eq!(member.id, "7f5ed0a1-3c1e-4b3f-9b67-0f4c1a8d2e11");
        assert_eq!(member.refset_id, well_known::OWL_AXIOM_REFSET);
        assert_eq!(member.referenced_component_id, 404684003);
        assert_eq!(member.field_names, vec!["owlExpression"]);
        assert_eq!(
            member.other_value(0),
            Some("SubClassOf(:404684003 :138875005)")
        );
    }

    #[test]
    fn test_quotes_in_expressions_are_kept_verbatim() {
        let content = "id\teffectiveTime\tactive\tmoduleId\trefsetId\treferencedComponentId\towlExpression\n\
            a1\t\t1\t900000000000207008\t733073007\t1\tSubClassOf(:1 DataHasValue(:2 \"5\"^^xsd:integer))\n";

        let members: Vec<Rf2RefsetMember> = Rf2Parser::<_, Rf2RefsetMember>::from_reader(
            content.as_bytes(),
        )
        .unwrap()
        .collect::<Rf2Result<_>>()
        .unwrap();

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].effective_time, None);
        assert_eq!(
            members[0].other_value(0),
            Some("SubClassOf(:1 DataHasValue(:2 \"5\"^^xsd:integer))")
        );
    }

    #[test]
    fn test_mrcm_attribute_domain_member_keeps_all_values() {
        let content = "id\teffectiveTime\tactive\tmoduleId\trefsetId\treferencedComponentId\t\
            domainId\tgrouped\tattributeCardinality\tattributeInGroupCardinality\truleStrengthId\tcontentTypeId\n\
            b2\t20200131\t1\t900000000000012004\t723604009\t127489000\t\
            373873005\t0\t0..*\t0..1\t723597001\t723594008\n";

        let mut parser =
            Rf2Parser::<_, Rf2RefsetMember>::from_reader(content.as_bytes()).unwrap();
        let member = parser.next().unwrap().unwrap();

        assert_eq!(member.field_names[1], "grouped");
        assert_eq!(member.other_value(1), Some("0"));
        assert_eq!(member.other_value(5), Some("723594008"));
        assert!(parser.next().is_none());
    }
}
