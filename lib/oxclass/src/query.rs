//! Reasoner-backed queries: by-label subclass lookups and hierarchy walks.

use crate::ontology::{ClassLabelMap, Ontology};
use crate::reasoner::{ClassNode, Reasoner};
use crate::vocab;
use oxrdf::NamedNode;
use rustc_hash::FxHashSet;

/// Returns the reasoner's subclasses of a class: direct children only, or
/// the whole flattened descendant set when `direct` is false. The
/// `owl:Nothing` placeholder never appears in the result.
pub fn reasoned_subclasses_of(
    ontology: &Ontology,
    reasoner: &dyn Reasoner,
    class: &NamedNode,
    direct: bool,
) -> ClassLabelMap {
    let nodes = reasoner.sub_classes(class, direct);
    ontology.label_map(
        nodes
            .flattened()
            .filter(|c| c.as_ref() != vocab::NOTHING)
            .cloned(),
    )
}

/// Returns the reasoner's superclasses of a class. The `owl:Thing` and
/// `owl:Nothing` placeholders never appear in the result.
pub fn reasoned_superclasses_of(
    ontology: &Ontology,
    reasoner: &dyn Reasoner,
    class: &NamedNode,
    direct: bool,
) -> ClassLabelMap {
    let nodes = reasoner.super_classes(class, direct);
    ontology.label_map(
        nodes
            .flattened()
            .filter(|c| c.as_ref() != vocab::THING && c.as_ref() != vocab::NOTHING)
            .cloned(),
    )
}

/// [`reasoned_subclasses_of`] with the class given by its label.
///
/// Returns `None` when no class carries the label.
pub fn reasoned_subclasses_of_label(
    ontology: &Ontology,
    reasoner: &dyn Reasoner,
    label: &str,
    direct: bool,
) -> Option<ClassLabelMap> {
    let class = ontology.class_by_label(label)?.clone();
    Some(reasoned_subclasses_of(ontology, reasoner, &class, direct))
}

/// [`reasoned_superclasses_of`] with the class given by its label.
///
/// Returns `None` when no class carries the label.
pub fn reasoned_superclasses_of_label(
    ontology: &Ontology,
    reasoner: &dyn Reasoner,
    label: &str,
    direct: bool,
) -> Option<ClassLabelMap> {
    let class = ontology.class_by_label(label)?.clone();
    Some(reasoned_superclasses_of(ontology, reasoner, &class, direct))
}

/// One record of a hierarchy traversal: a node of equivalent classes
/// encountered at the given depth below (or above) the start class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalStep {
    /// Distance from the start class, in hierarchy levels.
    pub depth: usize,
    /// The smallest member IRI, identifying the node.
    pub representative: NamedNode,
    /// The classes of the node, sorted by IRI.
    pub members: Vec<NamedNode>,
}

/// Walks the reasoner's hierarchy downwards from `start`, depth first.
///
/// Each visited node yields one [`TraversalStep`]; a visited set keyed on
/// node identity guarantees termination and keeps every node in the output
/// exactly once, even when multiple inheritance offers several paths to it.
/// When the bottom node is reached carrying unsatisfiable classes besides
/// the placeholder, those classes are reported and the branch is not
/// expanded further.
///
/// `direct` is handed to the reasoner at every level: with `false`, each
/// step expands to the full descendant set instead of the direct children.
pub fn walk_subhierarchy(
    reasoner: &dyn Reasoner,
    start: &NamedNode,
    direct: bool,
) -> Vec<TraversalStep> {
    walk(reasoner, start, direct, true)
}

/// Walks the reasoner's hierarchy upwards from `start`, depth first.
///
/// The mirror image of [`walk_subhierarchy`], with the top node as the
/// boundary.
pub fn walk_superhierarchy(
    reasoner: &dyn Reasoner,
    start: &NamedNode,
    direct: bool,
) -> Vec<TraversalStep> {
    walk(reasoner, start, direct, false)
}

enum Work {
    Expand(usize, NamedNode),
    Emit(TraversalStep),
}

fn walk(reasoner: &dyn Reasoner, start: &NamedNode, direct: bool, down: bool) -> Vec<TraversalStep> {
    let mut steps = Vec::new();
    let mut visited: FxHashSet<NamedNode> = FxHashSet::default();
    let mut stack = vec![Work::Expand(0, start.clone())];

    while let Some(work) = stack.pop() {
        let (depth, class) = match work {
            Work::Emit(step) => {
                steps.push(step);
                continue;
            }
            Work::Expand(depth, class) => (depth, class),
        };

        let node_set = if down {
            reasoner.sub_classes(&class, direct)
        } else {
            reasoner.super_classes(&class, direct)
        };

        // Reversed, so that popping preserves the node order and each node's
        // subtree is expanded before its next sibling is emitted.
        for node in node_set.nodes().iter().rev() {
            let Some(identity) = node.representative() else {
                continue;
            };
            if !visited.insert(identity.clone()) {
                continue;
            }

            let boundary = if down { node.is_bottom() } else { node.is_top() };
            if boundary && node.len() != 1 {
                // The boundary bundles real classes with the placeholder:
                // report them, do not expand through the boundary.
                if let Some(step) = boundary_step(depth, node, down) {
                    stack.push(Work::Emit(step));
                }
                continue;
            }

            for entity in node.entities().iter().rev() {
                stack.push(Work::Expand(depth + 1, entity.clone()));
            }
            stack.push(Work::Emit(TraversalStep {
                depth,
                representative: identity.clone(),
                members: node.entities().to_vec(),
            }));
        }
    }

    steps
}

fn boundary_step(depth: usize, node: &ClassNode, down: bool) -> Option<TraversalStep> {
    let members: Vec<NamedNode> = if down {
        node.entities_minus_bottom().cloned().collect()
    } else {
        node.entities_minus_top().cloned().collect()
    };
    let representative = members.first()?.clone();
    Some(TraversalStep {
        depth,
        representative,
        members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoner::compute_inferred;
    use oxrdf::vocab::rdfs;
    use oxrdf::{Graph, Literal, TripleRef};

    fn named(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    fn subclass(graph: &mut Graph, sub: &NamedNode, sup: &NamedNode) {
        graph.insert(TripleRef::new(sub.as_ref(), rdfs::SUB_CLASS_OF, sup.as_ref()));
    }

    fn label(graph: &mut Graph, class: &NamedNode, value: &str) {
        let value = Literal::new_simple_literal(value);
        graph.insert(TripleRef::new(class.as_ref(), rdfs::LABEL, value.as_ref()));
    }

    /// A diamond: B and C under A, D under both B and C.
    fn diamond() -> Ontology {
        let mut graph = Graph::default();
        let a = named("http://example.org/A");
        let b = named("http://example.org/B");
        let c = named("http://example.org/C");
        let d = named("http://example.org/D");
        subclass(&mut graph, &b, &a);
        subclass(&mut graph, &c, &a);
        subclass(&mut graph, &d, &b);
        subclass(&mut graph, &d, &c);
        label(&mut graph, &a, "top of diamond");
        Ontology::from_graph(&graph)
    }

    #[test]
    fn reasoned_subclasses_by_label() {
        let ontology = diamond();
        let reasoner = compute_inferred(&ontology).unwrap();

        let direct =
            reasoned_subclasses_of_label(&ontology, &reasoner, "top of diamond", true).unwrap();
        assert_eq!(direct.len(), 2);
        assert!(direct.contains_key(&named("http://example.org/B")));
        assert!(direct.contains_key(&named("http://example.org/C")));

        let all =
            reasoned_subclasses_of_label(&ontology, &reasoner, "top of diamond", false).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.contains_key(&named("http://example.org/D")));
        // the placeholder is filtered out of the flattened set
        assert!(!all.contains_key(&crate::vocab::NOTHING.into_owned()));
    }

    #[test]
    fn unresolved_label_is_absent() {
        let ontology = diamond();
        let reasoner = compute_inferred(&ontology).unwrap();
        assert!(reasoned_subclasses_of_label(&ontology, &reasoner, "NoSuchLabel", true).is_none());
    }

    #[test]
    fn walk_terminates_and_deduplicates_on_diamonds() {
        let ontology = diamond();
        let reasoner = compute_inferred(&ontology).unwrap();
        let a = named("http://example.org/A");

        let steps = walk_subhierarchy(&reasoner, &a, true);

        // B, D below B, the bottom node below D, then C (D already seen).
        let reps: Vec<(&str, usize)> = steps
            .iter()
            .map(|s| (s.representative.as_str(), s.depth))
            .collect();
        assert_eq!(
            reps,
            vec![
                ("http://example.org/B", 0),
                ("http://example.org/D", 1),
                ("http://www.w3.org/2002/07/owl#Nothing", 2),
                ("http://example.org/C", 0),
            ]
        );
    }

    #[test]
    fn walk_up_reaches_the_top_node() {
        let ontology = diamond();
        let reasoner = compute_inferred(&ontology).unwrap();
        let d = named("http://example.org/D");

        let steps = walk_superhierarchy(&reasoner, &d, true);
        let reps: Vec<(&str, usize)> = steps
            .iter()
            .map(|s| (s.representative.as_str(), s.depth))
            .collect();
        assert_eq!(
            reps,
            vec![
                ("http://example.org/B", 0),
                ("http://example.org/A", 1),
                ("http://www.w3.org/2002/07/owl#Thing", 2),
                ("http://example.org/C", 0),
            ]
        );
    }

    #[test]
    fn mixed_bottom_node_reports_unsatisfiable_members_without_expansion() {
        let mut graph = Graph::default();
        let a = named("http://example.org/A");
        let bad = named("http://example.org/Bad");
        subclass(&mut graph, &bad, &a);
        graph.insert(TripleRef::new(
            bad.as_ref(),
            crate::vocab::DISJOINT_WITH,
            bad.as_ref(),
        ));
        let ontology = Ontology::from_graph(&graph);
        let reasoner = compute_inferred(&ontology).unwrap();

        let steps = walk_subhierarchy(&reasoner, &a, true);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].members, vec![bad]);
        assert_eq!(steps[0].depth, 0);
    }
}
