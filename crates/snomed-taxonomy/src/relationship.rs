//! SNOMED CT Relationship row parser.
//!
//! Parses sct2_Relationship_*.txt and sct2_StatedRelationship_*.txt RF2
//! content. Both share one column layout.

use csv::StringRecord;
use snomed_types::Rf2Relationship;

use crate::parser::{parse, Rf2Record};
use crate::types::Rf2Result;

/// Expected columns in a relationship file.
const RELATIONSHIP_COLUMNS: &[&str] = &[
    "id",
    "effectiveTime",
    "active",
    "moduleId",
    "sourceId",
    "destinationId",
    "relationshipGroup",
    "typeId",
    "characteristicTypeId",
    "modifierId",
];

impl Rf2Record for Rf2Relationship {
    const EXPECTED_COLUMNS: &'static [&'static str] = RELATIONSHIP_COLUMNS;

    fn from_record(record: &StringRecord, _header: &StringRecord) -> Rf2Result<Self> {
        Ok(Rf2Relationship {
            id: parse::sctid(parse::field(record, 0, "id")?)?,
            effective_time: parse::optional_effective_time(parse::field(
                record,
                1,
                "effectiveTime",
            )?)?,
            active: parse::boolean(parse::field(record, 2, "active")?)?,
            module_id: parse::sctid(parse::field(record, 3, "moduleId")?)?,
            source_id: parse::sctid(parse::field(record, 4, "sourceId")?)?,
            destination_id: parse::sctid(parse::field(record, 5, "destinationId")?)?,
            relationship_group: parse::integer(parse::field(record, 6, "relationshipGroup")?)?,
            type_id: parse::sctid(parse::field(record, 7, "typeId")?)?,
            characteristic_type_id: parse::sctid(parse::field(
                record,
                8,
                "characteristicTypeId",
            )?)?,
            modifier_id: parse::sctid(parse::field(record, 9, "modifierId")?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rf2Error;
    use snomed_types::{well_known, RelationshipAxis};

    fn make_record(fields: &[&str]) -> StringRecord {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field);
        }
        record
    }

    #[test]
    fn test_parse_stated_universal_relationship() {
        let record = make_record(&[
            "100000028",
            "20020131",
            "1",
            "900000000000207008",
            "322236009",
            "387517004",
            "1",
            "127489000",
            "900000000000010007",
            "900000000000450001",
        ]);

        let rel = Rf2Relationship::from_record(&record, &make_record(RELATIONSHIP_COLUMNS))
            .unwrap();
        assert_eq!(rel.id, 100000028);
        assert_eq!(rel.source_id, 322236009);
        assert_eq!(rel.destination_id, 387517004);
        assert_eq!(rel.relationship_group, 1);
        assert_eq!(rel.type_id, well_known::HAS_ACTIVE_INGREDIENT);
        assert_eq!(rel.axis(), RelationshipAxis::Stated);
        assert!(rel.is_universal());
    }

    #[test]
    fn test_negative_group_is_rejected() {
        let record = make_record(&[
            "100000028",
            "20020131",
            "1",
            "900000000000207008",
            "73211009",
            "362969004",
            "-1",
            "116680003",
            "900000000000011006",
            "900000000000451002",
        ]);

        assert!(matches!(
            Rf2Relationship::from_record(&record, &make_record(RELATIONSHIP_COLUMNS)),
            Err(Rf2Error::InvalidInteger { .. })
        ));
    }
}
