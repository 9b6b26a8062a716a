//! # snomed-taxonomy
//!
//! Folds SNOMED CT RF2 component states into an in-memory taxonomy ready for
//! classification.
//!
//! A run feeds concept, relationship and reference set member rows to a
//! [`TaxonomyLoader`] in two phases: a snapshot with the full current state,
//! then optionally a delta whose inactive rows retract state. OWL axiom
//! refset members are parsed through an [`AxiomParser`]; a malformed axiom
//! does not stop the run but is reported by
//! [`TaxonomyLoader::report_errors`] once all rows are in.
//!
//! ## Features
//!
//! - Streaming RF2 parsing with header validation ([`Rf2Parser`])
//! - Stated and inferred relationships with union group assignment
//! - OWL 2 functional syntax axiom parsing ([`FunctionalSyntaxParser`])
//! - MRCM attribute domain ungrouped roles per content type
//!
//! ## Example
//!
//! ```
//! use snomed_taxonomy::{load_taxonomy, FunctionalSyntaxParser, LoaderConfig, Rf2Release};
//!
//! let concepts = "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId\n\
//!     73211009\t20020131\t1\t900000000000207008\t900000000000073002\n";
//! let axioms = "id\teffectiveTime\tactive\tmoduleId\trefsetId\treferencedComponentId\towlExpression\n\
//!     ax-1\t20190731\t1\t900000000000207008\t733073007\t73211009\t\
//!     EquivalentClasses(:73211009 ObjectIntersectionOf(:362969004 :126877002))\n";
//!
//! let snapshot = Rf2Release::new()
//!     .with_concepts(concepts.as_bytes())
//!     .with_refset_members(axioms.as_bytes());
//!
//! let taxonomy = load_taxonomy(FunctionalSyntaxParser::new(), LoaderConfig::default(), snapshot, None)
//!     .expect("valid release");
//!
//! assert!(taxonomy.is_fully_defined(73211009));
//! assert_eq!(taxonomy.axiom_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod axiom;
mod concept;
mod factory;
mod import;
mod loader;
pub mod owl;
pub mod parser;
mod phase;
mod refset;
mod relationship;
mod taxonomy;
pub mod types;

pub use axiom::{deserialise_axiom, ontology_document, AxiomParser};
pub use factory::ComponentFactory;
pub use import::{
    import_concepts, import_refset_members, import_relationships, load_taxonomy, Rf2Release,
};
pub use loader::{is_ungrouped_flag, TaxonomyLoader};
pub use owl::{FunctionalSyntaxParser, OwlAxiom};
pub use parser::{Rf2Parser, Rf2Record};
pub use phase::ImportPhase;
pub use taxonomy::SnomedTaxonomy;
pub use types::{
    AxiomError, ImportStats, LoaderConfig, Rf2Error, Rf2Result, TaxonomyError, TaxonomyResult,
};

// Re-export snomed-types for convenience
pub use snomed_types;
