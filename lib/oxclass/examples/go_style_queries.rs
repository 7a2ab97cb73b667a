//! Query a small GO-style ontology: labels, hierarchies, diagnostics.
//!
//! Run with: cargo run -p oxclass --example go_style_queries

use oxclass::{
    compute_inferred, reasoned_subclasses_of_label, walk_subhierarchy, OntologyLoader, Reasoner,
};
use oxrdfio::RdfFormat;

const DOCUMENT: &str = r#"
    @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
    @prefix owl: <http://www.w3.org/2002/07/owl#> .

    <http://purl.example.org/bp> a owl:Ontology .

    <http://purl.example.org/BP_0001> a owl:Class ;
        rdfs:label "biological_process" .
    <http://purl.example.org/BP_0002> a owl:Class ;
        rdfs:subClassOf <http://purl.example.org/BP_0001> ;
        rdfs:label "metabolic process" .
    <http://purl.example.org/BP_0003> a owl:Class ;
        rdfs:subClassOf <http://purl.example.org/BP_0002> ;
        rdfs:label "catabolic process" .
    <http://purl.example.org/BP_0004> a owl:Class ;
        rdfs:subClassOf <http://purl.example.org/BP_0001> ;
        rdfs:label "signaling" .
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ontology = OntologyLoader::new().load_from_reader(RdfFormat::Turtle, DOCUMENT.as_bytes())?;
    println!("Loaded {ontology}");

    // Label resolution
    let class = ontology
        .class_by_label("metabolic process")
        .expect("label should resolve");
    println!("\"metabolic process\" -> {class}");

    // Asserted direct subclasses
    for (iri, label) in ontology.direct_subclasses_of(class) {
        println!("  asserted subclass: {} ({})", iri.as_str(), label.as_deref().unwrap_or("?"));
    }

    // Classification and the flattened closure
    let reasoner = compute_inferred(&ontology)?;
    println!("consistent: {}", reasoner.is_consistent());
    let all = reasoned_subclasses_of_label(&ontology, &reasoner, "biological_process", false)
        .expect("label should resolve");
    println!("{} classes below biological_process", all.len());

    // A structured traversal of the computed hierarchy
    let root = ontology
        .class_by_label("biological_process")
        .expect("label should resolve")
        .clone();
    for step in walk_subhierarchy(&reasoner, &root, true) {
        println!(
            "{}{}",
            "  ".repeat(step.depth),
            step.representative.as_str()
        );
    }

    Ok(())
}
