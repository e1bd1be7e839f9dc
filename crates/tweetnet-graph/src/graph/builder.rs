//! Graph accumulators: one per interaction kind

use tweetnet_core::Accumulator;

use super::Graph;
use crate::record::Record;

/// Directed `reposter → original author`, weighted by repost count.
#[derive(Debug, Clone, PartialEq)]
pub struct RetweetGraph {
    graph: Graph,
}

impl RetweetGraph {
    pub fn new() -> Self {
        Self {
            graph: Graph::directed(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

impl Default for RetweetGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for RetweetGraph {
    type Item = Record;

    fn push(&mut self, record: &Record) {
        let Some(original) = &record.repost_of else {
            return;
        };
        if let Some(author) = &record.author {
            self.graph.add_node(author);
        }
        if let Some(original_author) = &original.author {
            self.graph.add_node(original_author);
        }
        // Self-retweets stay as loops
        if let Some((author, original_author)) = record.repost_pair() {
            self.graph.add_edge(author, original_author);
        }
    }

    fn merge(&mut self, other: Self) {
        self.graph.merge(other.graph);
    }
}

/// Directed `author → mentioned user` over original posts only.
///
/// Every author of an original post becomes a node, even without mentions.
#[derive(Debug, Clone, PartialEq)]
pub struct MentionGraph {
    graph: Graph,
}

impl MentionGraph {
    pub fn new() -> Self {
        Self {
            graph: Graph::directed(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

impl Default for MentionGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for MentionGraph {
    type Item = Record;

    fn push(&mut self, record: &Record) {
        if record.is_repost() {
            return;
        }
        let Some(author) = &record.author else {
            return;
        };
        self.graph.add_node(author);
        for mentioned in &record.mentioned_users {
            self.graph.add_edge(author, mentioned);
        }
    }

    fn merge(&mut self, other: Self) {
        self.graph.merge(other.graph);
    }
}

/// Undirected reposter to original author, excluding self-reposts.
#[derive(Debug, Clone, PartialEq)]
pub struct CoRetweetGraph {
    graph: Graph,
}

impl CoRetweetGraph {
    pub fn new() -> Self {
        Self {
            graph: Graph::undirected(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

impl Default for CoRetweetGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for CoRetweetGraph {
    type Item = Record;

    fn push(&mut self, record: &Record) {
        match record.repost_pair() {
            Some((author, original_author)) if author != original_author => {
                self.graph.add_node(original_author);
                self.graph.add_node(author);
                self.graph.add_edge(original_author, author);
            }
            _ => {}
        }
    }

    fn merge(&mut self, other: Self) {
        self.graph.merge(other.graph);
    }
}
