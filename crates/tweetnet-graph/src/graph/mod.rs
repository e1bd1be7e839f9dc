//! Weighted interaction graphs
//!
//! A [`Graph`] is a node set plus a weighted edge map. Directed graphs key
//! edges by `(source, target)`; undirected graphs canonicalize the pair so
//! that `(a, b)` and `(b, a)` are the same edge.

mod builder;

pub use builder::{CoRetweetGraph, MentionGraph, RetweetGraph};

use crate::ordered::OrderedMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Directed,
    Undirected,
}

impl EdgeKind {
    /// Value of GEXF's `defaultedgetype`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
        }
    }
}

/// Borrowed view of one edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub weight: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    kind: EdgeKind,
    nodes: OrderedMap<String, ()>,
    edges: OrderedMap<(String, String), u64>,
}

impl Graph {
    pub fn new(kind: EdgeKind) -> Self {
        Self {
            kind,
            nodes: OrderedMap::new(),
            edges: OrderedMap::new(),
        }
    }

    pub fn directed() -> Self {
        Self::new(EdgeKind::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(EdgeKind::Undirected)
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn add_node(&mut self, name: &str) {
        self.nodes.upsert_with(name, || ());
    }

    fn edge_key(&self, a: &str, b: &str) -> (String, String) {
        if self.kind == EdgeKind::Undirected && b < a {
            (b.to_string(), a.to_string())
        } else {
            (a.to_string(), b.to_string())
        }
    }

    /// Add `by` to the edge weight, creating the edge at 0 first.
    ///
    /// Endpoints are expected to exist already; missing ones are added.
    pub fn bump_edge(&mut self, source: &str, target: &str, by: u64) {
        self.add_node(source);
        self.add_node(target);
        let key = self.edge_key(source, target);
        *self.edges.upsert_with(&key, || 0) += by;
    }

    /// One more interaction between `source` and `target`
    pub fn add_edge(&mut self, source: &str, target: &str) {
        self.bump_edge(source, target, 1);
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn weight(&self, source: &str, target: &str) -> Option<u64> {
        self.edges.get(&self.edge_key(source, target)).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in first-insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Edges in first-insertion order
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.edges.iter().map(|((source, target), &weight)| Edge {
            source,
            target,
            weight,
        })
    }

    /// Union nodes and sum edge weights. Order: ours first, then new
    /// entries from `other` in its order.
    pub fn merge(&mut self, other: Graph) {
        debug_assert_eq!(self.kind, other.kind, "merging graphs of different kinds");
        for name in other.nodes.keys() {
            self.add_node(name);
        }
        for ((source, target), weight) in other.edges {
            *self.edges.upsert_with(&(source, target), || 0) += weight;
        }
    }
}
