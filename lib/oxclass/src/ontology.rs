//! Ontology container: class signature, asserted hierarchy and labels.

use crate::vocab;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Graph, NamedNode, SubjectRef, TermRef};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// A mapping from class IRI to its label, if any.
///
/// This is the result shape of all hierarchy queries: keys are named classes
/// from the ontology signature, values are the first `rdfs:label` value of
/// the class or `None` for unlabelled classes.
pub type ClassLabelMap = FxHashMap<NamedNode, Option<String>>;

/// The class-level view of an OWL ontology.
///
/// Built from a parsed RDF graph, it keeps the pieces the hierarchy queries
/// need: the named class signature, asserted `rdfs:subClassOf` edges between
/// named classes, `owl:equivalentClass` / `owl:disjointWith` pairs,
/// `rdfs:label` annotation values and named-individual type assertions.
/// Anonymous class expressions (restrictions, boolean combinations) are
/// skipped and counted, never reported as hierarchy members.
///
/// The ontology is never mutated after loading; queries recompute their
/// answers from the stored axioms on every call.
#[derive(Debug, Clone, Default)]
pub struct Ontology {
    /// The ontology IRI (subject of `rdf:type owl:Ontology`), if declared.
    iri: Option<NamedNode>,
    /// The `owl:versionIRI`, if declared.
    version_iri: Option<NamedNode>,
    /// Where the document was loaded from (URL or file path).
    document_location: Option<String>,
    /// The named class signature.
    classes: FxHashSet<NamedNode>,
    /// Asserted `(sub, super)` edges between named classes.
    subclass_edges: Vec<(NamedNode, NamedNode)>,
    /// Asserted `owl:equivalentClass` pairs between named classes.
    equivalent_pairs: Vec<(NamedNode, NamedNode)>,
    /// Asserted `owl:disjointWith` pairs between named classes.
    disjoint_pairs: Vec<(NamedNode, NamedNode)>,
    /// `rdfs:label` values per class, sorted for deterministic lookups.
    labels: FxHashMap<NamedNode, Vec<String>>,
    /// Named individuals asserted into each signature class.
    instances: FxHashMap<NamedNode, FxHashSet<NamedNode>>,
    /// Number of anonymous class expressions skipped during extraction.
    anonymous_skipped: usize,
}

impl Ontology {
    /// Extracts the class-level view from a parsed RDF graph.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut ontology = Self::default();
        ontology.read_header(graph);
        ontology.read_signature(graph);
        ontology.read_annotations(graph);
        ontology
    }

    fn read_header(&mut self, graph: &Graph) {
        for triple in graph.triples_for_predicate(rdf::TYPE) {
            if triple.object != TermRef::from(vocab::ONTOLOGY) {
                continue;
            }
            if let SubjectRef::NamedNode(subject) = triple.subject {
                self.iri = Some(subject.into_owned());
                if let Some(TermRef::NamedNode(version)) =
                    graph.object_for_subject_predicate(subject, vocab::VERSION_IRI)
                {
                    self.version_iri = Some(version.into_owned());
                }
                break;
            }
        }
    }

    /// Collects the named class signature and the class axioms.
    ///
    /// Classes mentioned in subclass, equivalence or disjointness axioms are
    /// part of the signature even without an `owl:Class` declaration.
    fn read_signature(&mut self, graph: &Graph) {
        for triple in graph.triples_for_predicate(rdf::TYPE) {
            if triple.object == TermRef::from(vocab::CLASS) {
                if let SubjectRef::NamedNode(subject) = triple.subject {
                    self.classes.insert(subject.into_owned());
                }
            }
        }

        for triple in graph.triples_for_predicate(rdfs::SUB_CLASS_OF) {
            match (triple.subject, triple.object) {
                (SubjectRef::NamedNode(sub), TermRef::NamedNode(sup)) => {
                    let sub = sub.into_owned();
                    let sup = sup.into_owned();
                    self.classes.insert(sub.clone());
                    self.classes.insert(sup.clone());
                    self.subclass_edges.push((sub, sup));
                }
                _ => self.anonymous_skipped += 1,
            }
        }

        for triple in graph.triples_for_predicate(vocab::EQUIVALENT_CLASS) {
            match (triple.subject, triple.object) {
                (SubjectRef::NamedNode(a), TermRef::NamedNode(b)) => {
                    let a = a.into_owned();
                    let b = b.into_owned();
                    self.classes.insert(a.clone());
                    self.classes.insert(b.clone());
                    self.equivalent_pairs.push((a, b));
                }
                _ => self.anonymous_skipped += 1,
            }
        }

        for triple in graph.triples_for_predicate(vocab::DISJOINT_WITH) {
            match (triple.subject, triple.object) {
                (SubjectRef::NamedNode(a), TermRef::NamedNode(b)) => {
                    let a = a.into_owned();
                    let b = b.into_owned();
                    self.classes.insert(a.clone());
                    self.classes.insert(b.clone());
                    self.disjoint_pairs.push((a, b));
                }
                _ => self.anonymous_skipped += 1,
            }
        }
    }

    /// Collects labels and named-individual type assertions for the signature.
    fn read_annotations(&mut self, graph: &Graph) {
        for triple in graph.triples_for_predicate(rdfs::LABEL) {
            if let (SubjectRef::NamedNode(subject), TermRef::Literal(value)) =
                (triple.subject, triple.object)
            {
                let subject = subject.into_owned();
                if self.classes.contains(&subject) {
                    self.labels
                        .entry(subject)
                        .or_default()
                        .push(value.value().to_owned());
                }
            }
        }
        for values in self.labels.values_mut() {
            values.sort();
            values.dedup();
        }

        for triple in graph.triples_for_predicate(rdf::TYPE) {
            if let (SubjectRef::NamedNode(subject), TermRef::NamedNode(object)) =
                (triple.subject, triple.object)
            {
                if object.as_str().starts_with(vocab::OWL_NAMESPACE) {
                    continue;
                }
                let class = object.into_owned();
                if self.classes.contains(&class) {
                    self.instances
                        .entry(class)
                        .or_default()
                        .insert(subject.into_owned());
                }
            }
        }
    }

    /// Returns the ontology IRI, if the document declares one.
    pub fn iri(&self) -> Option<&NamedNode> {
        self.iri.as_ref()
    }

    /// Returns the `owl:versionIRI`, if the document declares one.
    pub fn version_iri(&self) -> Option<&NamedNode> {
        self.version_iri.as_ref()
    }

    /// Returns the location the document was loaded from.
    pub fn document_location(&self) -> Option<&str> {
        self.document_location.as_deref()
    }

    pub(crate) fn set_document_location(&mut self, location: String) {
        self.document_location = Some(location);
    }

    /// Returns all named classes in the signature, in no particular order.
    pub fn classes(&self) -> impl Iterator<Item = &NamedNode> {
        self.classes.iter()
    }

    /// Returns the number of named classes in the signature.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Checks whether a class is part of the signature.
    pub fn contains_class(&self, class: &NamedNode) -> bool {
        self.classes.contains(class)
    }

    /// Returns the asserted `(sub, super)` subclass edges between named classes.
    pub fn subclass_edges(&self) -> &[(NamedNode, NamedNode)] {
        &self.subclass_edges
    }

    /// Returns the asserted `owl:equivalentClass` pairs between named classes.
    pub fn equivalent_pairs(&self) -> &[(NamedNode, NamedNode)] {
        &self.equivalent_pairs
    }

    /// Returns the asserted `owl:disjointWith` pairs between named classes.
    pub fn disjoint_pairs(&self) -> &[(NamedNode, NamedNode)] {
        &self.disjoint_pairs
    }

    /// Returns the number of anonymous class expressions skipped while reading
    /// the document.
    pub fn anonymous_expressions_skipped(&self) -> usize {
        self.anonymous_skipped
    }

    /// Checks whether any named individual is asserted into the class.
    pub fn has_asserted_instance(&self, class: &NamedNode) -> bool {
        self.instances.get(class).is_some_and(|i| !i.is_empty())
    }

    /// Returns all `rdfs:label` values of a class, sorted.
    pub fn labels_of(&self, class: &NamedNode) -> &[String] {
        self.labels.get(class).map_or(&[], Vec::as_slice)
    }

    /// Returns the first `rdfs:label` value of a class.
    ///
    /// A class is expected to carry a single label; when several are present
    /// the smallest one is returned.
    pub fn label_of(&self, class: &NamedNode) -> Option<&str> {
        self.labels_of(class).first().map(String::as_str)
    }

    /// Returns every class whose labels contain `label` (byte-exact match),
    /// sorted by IRI.
    ///
    /// Several classes may share a label; this lookup surfaces all of them so
    /// callers can disambiguate. The scan is linear in the signature size.
    pub fn classes_with_label(&self, label: &str) -> Vec<&NamedNode> {
        let mut matches: Vec<&NamedNode> = self
            .classes
            .iter()
            .filter(|class| self.labels_of(class).iter().any(|l| l == label))
            .collect();
        matches.sort_unstable();
        matches
    }

    /// Resolves a label to a single class.
    ///
    /// Returns the class with the smallest IRI among the matches, so the
    /// answer is stable across loads of the same ontology, or `None` when no
    /// class carries the label. Use [`classes_with_label`](Self::classes_with_label)
    /// when the ambiguity itself matters.
    pub fn class_by_label(&self, label: &str) -> Option<&NamedNode> {
        self.classes_with_label(label).into_iter().next()
    }

    /// Builds a [`ClassLabelMap`] for the given classes.
    pub fn label_map(&self, classes: impl IntoIterator<Item = NamedNode>) -> ClassLabelMap {
        classes
            .into_iter()
            .map(|class| {
                let label = self.label_of(&class).map(str::to_owned);
                (class, label)
            })
            .collect()
    }

    /// Returns the direct asserted subclasses of a class, with their labels.
    ///
    /// Only named classes appear; anonymous subclass expressions were already
    /// dropped at extraction time.
    pub fn direct_subclasses_of(&self, class: &NamedNode) -> ClassLabelMap {
        self.label_map(
            self.subclass_edges
                .iter()
                .filter(|(_, sup)| sup == class)
                .map(|(sub, _)| sub.clone()),
        )
    }

    /// Returns the direct asserted superclasses of a class, with their labels.
    pub fn direct_superclasses_of(&self, class: &NamedNode) -> ClassLabelMap {
        self.label_map(
            self.subclass_edges
                .iter()
                .filter(|(sub, _)| sub == class)
                .map(|(_, sup)| sup.clone()),
        )
    }

    /// Returns the direct asserted subclasses of the class carrying `label`,
    /// or `None` when the label resolves to no class.
    pub fn subclasses_of_label(&self, label: &str) -> Option<ClassLabelMap> {
        let class = self.class_by_label(label)?.clone();
        Some(self.direct_subclasses_of(&class))
    }

    /// Returns the direct asserted superclasses of the class carrying `label`,
    /// or `None` when the label resolves to no class.
    pub fn superclasses_of_label(&self, label: &str) -> Option<ClassLabelMap> {
        let class = self.class_by_label(label)?.clone();
        Some(self.direct_superclasses_of(&class))
    }
}

impl fmt::Display for Ontology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.iri {
            Some(iri) => write!(f, "Ontology({iri})")?,
            None => write!(f, "Ontology(anonymous)")?,
        }
        write!(
            f,
            " [{} classes, {} subclass axioms]",
            self.classes.len(),
            self.subclass_edges.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{Literal, TripleRef};

    fn named(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    fn animals() -> Ontology {
        let mut graph = Graph::default();
        let animal = named("http://example.org/Animal");
        let dog = named("http://example.org/Dog");
        let animal_label = Literal::new_simple_literal("Animal");
        let dog_label = Literal::new_simple_literal("Dog");
        graph.insert(TripleRef::new(
            animal.as_ref(),
            rdf::TYPE,
            vocab::CLASS,
        ));
        graph.insert(TripleRef::new(dog.as_ref(), rdf::TYPE, vocab::CLASS));
        graph.insert(TripleRef::new(
            dog.as_ref(),
            rdfs::SUB_CLASS_OF,
            animal.as_ref(),
        ));
        graph.insert(TripleRef::new(
            animal.as_ref(),
            rdfs::LABEL,
            animal_label.as_ref(),
        ));
        graph.insert(TripleRef::new(
            dog.as_ref(),
            rdfs::LABEL,
            dog_label.as_ref(),
        ));
        Ontology::from_graph(&graph)
    }

    #[test]
    fn signature_and_labels() {
        let ontology = animals();
        assert_eq!(ontology.class_count(), 2);
        let dog = named("http://example.org/Dog");
        assert!(ontology.contains_class(&dog));
        assert_eq!(ontology.label_of(&dog), Some("Dog"));
        assert_eq!(ontology.labels_of(&named("http://example.org/Missing")), &[] as &[String]);
    }

    #[test]
    fn direct_hierarchy() {
        let ontology = animals();
        let animal = named("http://example.org/Animal");
        let dog = named("http://example.org/Dog");

        let subs = ontology.direct_subclasses_of(&animal);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs.get(&dog), Some(&Some("Dog".to_owned())));

        let supers = ontology.direct_superclasses_of(&dog);
        assert_eq!(supers.len(), 1);
        assert_eq!(supers.get(&animal), Some(&Some("Animal".to_owned())));
    }

    #[test]
    fn label_resolution() {
        let ontology = animals();
        assert_eq!(
            ontology.class_by_label("Dog"),
            Some(&named("http://example.org/Dog"))
        );
        assert_eq!(ontology.class_by_label("NoSuchLabel"), None);
        assert!(ontology.subclasses_of_label("NoSuchLabel").is_none());
    }

    #[test]
    fn shared_label_surfaces_all_matches() {
        let mut graph = Graph::default();
        let a = named("http://example.org/A");
        let b = named("http://example.org/B");
        let label = Literal::new_simple_literal("Shared");
        graph.insert(TripleRef::new(a.as_ref(), rdf::TYPE, vocab::CLASS));
        graph.insert(TripleRef::new(b.as_ref(), rdf::TYPE, vocab::CLASS));
        graph.insert(TripleRef::new(a.as_ref(), rdfs::LABEL, label.as_ref()));
        graph.insert(TripleRef::new(b.as_ref(), rdfs::LABEL, label.as_ref()));
        let ontology = Ontology::from_graph(&graph);

        assert_eq!(ontology.classes_with_label("Shared"), vec![&a, &b]);
        // deterministic: the smallest IRI wins
        assert_eq!(ontology.class_by_label("Shared"), Some(&a));
    }

    #[test]
    fn anonymous_expressions_are_skipped() {
        let mut graph = Graph::default();
        let a = named("http://example.org/A");
        let restriction = oxrdf::BlankNode::default();
        graph.insert(TripleRef::new(
            a.as_ref(),
            rdfs::SUB_CLASS_OF,
            restriction.as_ref(),
        ));
        let ontology = Ontology::from_graph(&graph);

        assert_eq!(ontology.anonymous_expressions_skipped(), 1);
        assert!(ontology.subclass_edges().is_empty());
        // the named end of the axiom still enters the signature
        assert!(ontology.contains_class(&a));
    }
}
