//! Class hierarchy and label queries over OWL ontologies.
//!
//! This crate answers the questions a curator asks of an ontology like the
//! Gene Ontology:
//! - load the document from the web or a local file,
//! - resolve `rdfs:label` annotations to classes (and back),
//! - list asserted direct subclasses and superclasses,
//! - classify the told hierarchy and query it transitively, with
//!   consistency and unsatisfiability diagnostics,
//! - walk the computed hierarchy as a structured traversal.
//!
//! OWL document parsing is delegated to the `oxrdfio` stack and only the
//! structural axioms are interpreted; the [`Reasoner`] trait is the seam a
//! full description-logic engine would plug into.
//!
//! # Example
//! ```
//! use oxclass::{compute_inferred, OntologyLoader, Reasoner};
//! use oxrdfio::RdfFormat;
//!
//! let data = r#"
//!     @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
//!     <http://example.org/Dog> rdfs:subClassOf <http://example.org/Animal> ;
//!         rdfs:label "Dog" .
//! "#;
//! let ontology = OntologyLoader::new()
//!     .load_from_reader(RdfFormat::Turtle, data.as_bytes())?;
//! let reasoner = compute_inferred(&ontology)?;
//! assert!(reasoner.is_consistent());
//! let dog = ontology.class_by_label("Dog").unwrap();
//! assert_eq!(ontology.direct_superclasses_of(dog).len(), 1);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

mod error;
mod loader;
mod ontology;
mod query;
mod reasoner;
pub(crate) mod vocab;

pub use error::{LoadError, ReasonerError};
pub use loader::{
    LoaderConfig, OntologyLoader, DEFAULT_ONTOLOGY_PATH, DEFAULT_ONTOLOGY_URL,
};
pub use ontology::{ClassLabelMap, Ontology};
pub use query::{
    reasoned_subclasses_of, reasoned_subclasses_of_label, reasoned_superclasses_of,
    reasoned_superclasses_of_label, walk_subhierarchy, walk_superhierarchy, TraversalStep,
};
pub use reasoner::{
    compute_inferred, ClassNode, ClassNodeSet, InferenceSummary, Reasoner, ReasonerConfig,
    ToldReasoner,
};
