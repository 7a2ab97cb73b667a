//! Hierarchy nodes: sets of mutually equivalent classes.

use crate::vocab;
use oxrdf::NamedNode;
use std::fmt;

/// A node of the computed class hierarchy.
///
/// A node bundles the classes a reasoner found to be logically equivalent.
/// Most nodes hold a single class; the bottom node holds `owl:Nothing`
/// together with every unsatisfiable class, and the top node holds
/// `owl:Thing` together with every class equivalent to it.
///
/// Members are kept sorted by IRI, so node output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    classes: Vec<NamedNode>,
}

impl ClassNode {
    pub(crate) fn new(mut classes: Vec<NamedNode>) -> Self {
        classes.sort_unstable();
        classes.dedup();
        Self { classes }
    }

    pub(crate) fn singleton(class: NamedNode) -> Self {
        Self {
            classes: vec![class],
        }
    }

    /// The classes in this node, sorted by IRI.
    pub fn entities(&self) -> &[NamedNode] {
        &self.classes
    }

    /// The smallest member IRI, used as the identity of the node.
    ///
    /// Every node holds at least one class, so this only returns `None` for
    /// a node that was built empty, which the reasoner never produces.
    pub fn representative(&self) -> Option<&NamedNode> {
        self.classes.first()
    }

    /// Checks whether the node contains the given class.
    pub fn contains(&self, class: &NamedNode) -> bool {
        self.classes.binary_search(class).is_ok()
    }

    /// Checks whether this is the bottom node (contains `owl:Nothing`).
    pub fn is_bottom(&self) -> bool {
        self.contains_ref(vocab::NOTHING)
    }

    /// Checks whether this is the top node (contains `owl:Thing`).
    pub fn is_top(&self) -> bool {
        self.contains_ref(vocab::THING)
    }

    fn contains_ref(&self, class: oxrdf::NamedNodeRef<'_>) -> bool {
        self.classes.iter().any(|c| c.as_ref() == class)
    }

    /// The members of the node without the `owl:Nothing` placeholder.
    ///
    /// On the bottom node this is exactly the set of unsatisfiable classes.
    pub fn entities_minus_bottom(&self) -> impl Iterator<Item = &NamedNode> {
        self.classes
            .iter()
            .filter(|c| c.as_ref() != vocab::NOTHING)
    }

    /// The members of the node without the `owl:Thing` placeholder.
    pub fn entities_minus_top(&self) -> impl Iterator<Item = &NamedNode> {
        self.classes.iter().filter(|c| c.as_ref() != vocab::THING)
    }

    /// Number of classes in the node.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Checks whether the node is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl fmt::Display for ClassNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{class}")?;
        }
        write!(f, "}}")
    }
}

/// An ordered collection of hierarchy nodes, as returned by sub/superclass
/// queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassNodeSet {
    nodes: Vec<ClassNode>,
}

impl ClassNodeSet {
    pub(crate) fn new(mut nodes: Vec<ClassNode>) -> Self {
        nodes.sort_unstable_by(|a, b| a.entities().cmp(b.entities()));
        nodes.dedup();
        Self { nodes }
    }

    /// The nodes of the set, sorted by their member lists.
    pub fn nodes(&self) -> &[ClassNode] {
        &self.nodes
    }

    /// All classes of all nodes, flattened into one iterator.
    pub fn flattened(&self) -> impl Iterator<Item = &NamedNode> {
        self.nodes.iter().flat_map(|node| node.entities().iter())
    }

    /// Number of nodes in the set.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Checks whether the set contains no node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'a> IntoIterator for &'a ClassNodeSet {
    type Item = &'a ClassNode;
    type IntoIter = std::slice::Iter<'a, ClassNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    #[test]
    fn node_members_are_sorted_and_deduped() {
        let b = named("http://example.org/B");
        let a = named("http://example.org/A");
        let node = ClassNode::new(vec![b.clone(), a.clone(), b.clone()]);
        assert_eq!(node.entities(), &[a.clone(), b]);
        assert_eq!(node.representative(), Some(&a));
    }

    #[test]
    fn bottom_node_minus_placeholder() {
        let unsat = named("http://example.org/Unsat");
        let node = ClassNode::new(vec![vocab::NOTHING.into_owned(), unsat.clone()]);
        assert!(node.is_bottom());
        assert!(!node.is_top());
        let rest: Vec<_> = node.entities_minus_bottom().collect();
        assert_eq!(rest, vec![&unsat]);
    }

    #[test]
    fn flattened_node_set() {
        let a = named("http://example.org/A");
        let b = named("http://example.org/B");
        let set = ClassNodeSet::new(vec![
            ClassNode::singleton(b.clone()),
            ClassNode::singleton(a.clone()),
        ]);
        let flat: Vec<_> = set.flattened().collect();
        assert_eq!(flat, vec![&a, &b]);
    }
}
