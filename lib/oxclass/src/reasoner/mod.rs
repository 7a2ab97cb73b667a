//! Class hierarchy classification.
//!
//! [`Reasoner`] is the seam a description-logic engine plugs into; the
//! shipped implementation is [`ToldReasoner`], which works purely on the
//! asserted (told) axioms: it computes the transitive closure of the named
//! class hierarchy, collapses equivalence cycles into nodes and folds every
//! structurally unsatisfiable class into the bottom node. It performs no
//! tableau inference.

mod node;

pub use node::{ClassNode, ClassNodeSet};

use crate::error::ReasonerError;
use crate::ontology::Ontology;
use crate::vocab;
use oxrdf::NamedNode;
use rustc_hash::{FxHashMap, FxHashSet};

/// Configuration for the told reasoner.
#[derive(Debug, Clone)]
pub struct ReasonerConfig {
    /// Maximum number of sweeps for the closure fixpoint computation.
    pub max_iterations: usize,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
        }
    }
}

/// A classified view of an ontology's class hierarchy.
///
/// Implementations precompute their hierarchy once in
/// [`classify`](Reasoner::classify); the query methods then answer from the
/// precomputed state. Classification is expensive and a reasoner is meant to
/// be built once per session and reused across queries.
pub trait Reasoner {
    /// A short identifier for the implementation, for diagnostics.
    fn reasoner_name(&self) -> &str;

    /// Precomputes the hierarchy. Idempotent.
    fn classify(&mut self) -> Result<(), ReasonerError>;

    /// Whether the ontology is consistent.
    fn is_consistent(&self) -> bool;

    /// The bottom node: `owl:Nothing` plus every unsatisfiable class.
    fn unsatisfiable_classes(&self) -> ClassNode;

    /// The subclass nodes of a class: direct children only, or every strict
    /// descendant when `direct` is false. The bottom node closes the result
    /// in both cases; queries on the bottom node or on a class outside the
    /// signature return an empty set.
    fn sub_classes(&self, class: &NamedNode, direct: bool) -> ClassNodeSet;

    /// The superclass nodes of a class, symmetric to
    /// [`sub_classes`](Reasoner::sub_classes), closed by the top node.
    /// Members of the bottom node answer only the top node: the told
    /// hierarchy gives unsatisfiable classes no other position.
    fn super_classes(&self, class: &NamedNode, direct: bool) -> ClassNodeSet;

    /// The node of classes equivalent to the given class (including itself).
    fn equivalence_node(&self, class: &NamedNode) -> ClassNode;
}

/// Hierarchy reasoner over the asserted axioms only.
#[derive(Debug)]
pub struct ToldReasoner<'a> {
    ontology: &'a Ontology,
    config: ReasonerConfig,

    /// class -> node id
    node_index: FxHashMap<NamedNode, usize>,
    nodes: Vec<ClassNode>,
    /// node id -> strict ancestor node ids (bottom and implicit top excluded)
    ancestors: Vec<FxHashSet<usize>>,
    /// node id -> direct parent node ids (ancestors minus the reducible ones)
    parents: Vec<FxHashSet<usize>>,

    bottom: usize,
    top: usize,
    consistent: bool,
    classified: bool,
}

impl<'a> ToldReasoner<'a> {
    /// Creates a reasoner for the given ontology. Call
    /// [`classify`](Reasoner::classify) before querying.
    pub fn new(ontology: &'a Ontology) -> Self {
        Self::with_config(ontology, ReasonerConfig::default())
    }

    /// Creates a reasoner with a custom configuration.
    pub fn with_config(ontology: &'a Ontology, config: ReasonerConfig) -> Self {
        Self {
            ontology,
            config,
            node_index: FxHashMap::default(),
            nodes: Vec::new(),
            ancestors: Vec::new(),
            parents: Vec::new(),
            bottom: 0,
            top: 0,
            consistent: true,
            classified: false,
        }
    }

    /// The summary the consistency checker reports: verdict, reasoner
    /// identity and the unsatisfiable classes (placeholder excluded).
    pub fn summary(&self) -> InferenceSummary {
        InferenceSummary {
            consistent: self.is_consistent(),
            reasoner_name: self.reasoner_name().to_owned(),
            unsatisfiable: self
                .unsatisfiable_classes()
                .entities_minus_bottom()
                .cloned()
                .collect(),
        }
    }

    /// Collects the asserted up-edges between named classes.
    ///
    /// Equivalences become mutual edges; a class disjoint with itself gets an
    /// edge to `owl:Nothing`.
    fn told_edges(&self) -> FxHashMap<NamedNode, FxHashSet<NamedNode>> {
        let mut edges: FxHashMap<NamedNode, FxHashSet<NamedNode>> = FxHashMap::default();
        for (sub, sup) in self.ontology.subclass_edges() {
            edges.entry(sub.clone()).or_default().insert(sup.clone());
        }
        for (a, b) in self.ontology.equivalent_pairs() {
            edges.entry(a.clone()).or_default().insert(b.clone());
            edges.entry(b.clone()).or_default().insert(a.clone());
        }
        for (a, b) in self.ontology.disjoint_pairs() {
            if a == b {
                edges
                    .entry(a.clone())
                    .or_default()
                    .insert(vocab::NOTHING.into_owned());
            }
        }
        edges
    }

    /// Computes the transitive closure of the up-edges by sweeping until
    /// nothing changes, as bounded by the configuration.
    fn closure(
        &self,
        edges: &FxHashMap<NamedNode, FxHashSet<NamedNode>>,
    ) -> Result<FxHashMap<NamedNode, FxHashSet<NamedNode>>, ReasonerError> {
        let mut closure = edges.clone();
        let mut changed = true;
        let mut iterations = 0;

        while changed {
            if iterations >= self.config.max_iterations {
                return Err(ReasonerError::IterationLimit(self.config.max_iterations));
            }
            changed = false;
            iterations += 1;

            let classes: Vec<NamedNode> = closure.keys().cloned().collect();
            for class in classes {
                if let Some(supers) = closure.get(&class).cloned() {
                    for sup in supers {
                        if let Some(transitive) = closure.get(&sup).cloned() {
                            let entry = closure.entry(class.clone()).or_default();
                            for sup_sup in transitive {
                                if entry.insert(sup_sup) {
                                    changed = true;
                                }
                            }
                        }
                    }
                }
            }
        }

        Ok(closure)
    }

    fn node_of(&self, class: &NamedNode) -> Option<usize> {
        self.node_index.get(class).copied()
    }

    fn node_set(&self, ids: impl IntoIterator<Item = usize>) -> ClassNodeSet {
        ClassNodeSet::new(ids.into_iter().map(|id| self.nodes[id].clone()).collect())
    }
}

impl Reasoner for ToldReasoner<'_> {
    fn reasoner_name(&self) -> &str {
        "oxclass-told"
    }

    fn classify(&mut self) -> Result<(), ReasonerError> {
        if self.classified {
            return Ok(());
        }

        let nothing = vocab::NOTHING.into_owned();
        let thing = vocab::THING.into_owned();

        let edges = self.told_edges();
        let closure = self.closure(&edges)?;
        let empty = FxHashSet::default();
        let reaches = |class: &NamedNode| closure.get(class).unwrap_or(&empty);

        // Universe: the signature plus the boundary placeholders.
        let mut universe: Vec<NamedNode> = self.ontology.classes().cloned().collect();
        universe.push(nothing.clone());
        universe.push(thing.clone());
        universe.sort_unstable();
        universe.dedup();

        // Bottom node: Nothing and every class that reaches it.
        let unsatisfiable: Vec<NamedNode> = universe
            .iter()
            .filter(|class| **class != nothing && reaches(class).contains(&nothing))
            .cloned()
            .collect();
        let mut bottom_members = unsatisfiable;
        bottom_members.push(nothing.clone());
        self.bottom = 0;
        self.nodes.push(ClassNode::new(bottom_members));
        for member in self.nodes[self.bottom].entities() {
            self.node_index.insert(member.clone(), self.bottom);
        }

        // Remaining nodes: groups of mutually reachable classes.
        for class in &universe {
            if self.node_index.contains_key(class) {
                continue;
            }
            let mut members = vec![class.clone()];
            for other in reaches(class) {
                if other != class && reaches(other).contains(class) {
                    members.push(other.clone());
                }
            }
            let node = ClassNode::new(members);
            let id = self.nodes.len();
            for member in node.entities() {
                self.node_index.insert(member.clone(), id);
            }
            self.nodes.push(node);
        }
        self.top = self.node_index[&thing];

        // Node-level strict ancestors.
        self.ancestors = vec![FxHashSet::default(); self.nodes.len()];
        for (id, node) in self.nodes.iter().enumerate() {
            if id == self.bottom {
                continue;
            }
            let mut up = FxHashSet::default();
            for member in node.entities() {
                for sup in reaches(member) {
                    let sup_id = self.node_index[sup];
                    if sup_id != id && sup_id != self.bottom {
                        up.insert(sup_id);
                    }
                }
            }
            self.ancestors[id] = up;
        }

        // Direct parents: ancestors with no intermediate ancestor in between.
        self.parents = self
            .ancestors
            .iter()
            .map(|up| {
                up.iter()
                    .copied()
                    .filter(|parent| {
                        !up.iter().any(|other| {
                            other != parent && self.ancestors[*other].contains(parent)
                        })
                    })
                    .collect()
            })
            .collect();

        // A bare unsatisfiable class is fine; an asserted instance of one is
        // a contradiction.
        self.consistent = !self.nodes[self.bottom]
            .entities_minus_bottom()
            .any(|class| self.ontology.has_asserted_instance(class));

        self.classified = true;
        Ok(())
    }

    fn is_consistent(&self) -> bool {
        self.consistent
    }

    fn unsatisfiable_classes(&self) -> ClassNode {
        self.nodes
            .get(self.bottom)
            .cloned()
            .unwrap_or_else(|| ClassNode::singleton(vocab::NOTHING.into_owned()))
    }

    fn sub_classes(&self, class: &NamedNode, direct: bool) -> ClassNodeSet {
        let Some(id) = self.node_of(class) else {
            return ClassNodeSet::default();
        };
        if id == self.bottom {
            return ClassNodeSet::default();
        }

        // Root nodes carry no explicit parent; their implicit parent is the
        // top node.
        let is_child_of = |other: usize, parent: usize| {
            if other == self.bottom || other == self.top || other == parent {
                false
            } else if self.parents[other].is_empty() {
                parent == self.top
            } else {
                self.parents[other].contains(&parent)
            }
        };
        let is_descendant_of = |other: usize, ancestor: usize| {
            other != self.bottom
                && other != ancestor
                && (ancestor == self.top || self.ancestors[other].contains(&ancestor))
        };

        let below: Vec<usize> = if direct {
            let children: Vec<usize> = (0..self.nodes.len())
                .filter(|&other| is_child_of(other, id))
                .collect();
            if children.is_empty() {
                vec![self.bottom]
            } else {
                children
            }
        } else {
            let mut descendants: Vec<usize> = (0..self.nodes.len())
                .filter(|&other| is_descendant_of(other, id))
                .collect();
            descendants.push(self.bottom);
            descendants
        };
        self.node_set(below)
    }

    fn super_classes(&self, class: &NamedNode, direct: bool) -> ClassNodeSet {
        let Some(id) = self.node_of(class) else {
            return ClassNodeSet::default();
        };
        if id == self.top {
            return ClassNodeSet::default();
        }
        if id == self.bottom {
            return self.node_set([self.top]);
        }

        let above: Vec<usize> = if direct {
            if self.parents[id].is_empty() {
                vec![self.top]
            } else {
                self.parents[id].iter().copied().collect()
            }
        } else {
            let mut ancestors: Vec<usize> = self.ancestors[id].iter().copied().collect();
            if !ancestors.contains(&self.top) {
                ancestors.push(self.top);
            }
            ancestors
        };
        self.node_set(above)
    }

    fn equivalence_node(&self, class: &NamedNode) -> ClassNode {
        match self.node_of(class) {
            Some(id) => self.nodes[id].clone(),
            None => ClassNode::singleton(class.clone()),
        }
    }
}

impl std::fmt::Display for ToldReasoner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ToldReasoner(classified={}, nodes={}, consistent={})",
            self.classified,
            self.nodes.len(),
            self.consistent
        )
    }
}

/// Builds a classified reasoner session for the ontology.
///
/// This precomputes the full hierarchy closure and the consistency verdict;
/// it is the expensive call of a query session and the returned session is
/// meant to be reused for every subsequent hierarchy query.
pub fn compute_inferred(ontology: &Ontology) -> Result<ToldReasoner<'_>, ReasonerError> {
    let mut reasoner = ToldReasoner::new(ontology);
    reasoner.classify()?;
    Ok(reasoner)
}

/// The outcome of [`compute_inferred`]: the consistency verdict, the
/// reasoner identity and the unsatisfiable classes (`owl:Nothing` excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceSummary {
    pub consistent: bool,
    pub reasoner_name: String,
    pub unsatisfiable: Vec<NamedNode>,
}
