//! Dependency graph value objects

use std::fmt;

/// A single node in a dependency graph together with its dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Position of the node in the caller's input
    pub index: usize,
    /// Unique name within one resolution pass
    pub name: String,
    /// Names this node depends on, in declaration order
    pub dependencies: Vec<String>,
}

impl Node {
    /// Create a new node
    pub fn new<N, I, S>(index: usize, name: N, dependencies: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index,
            name: name.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dependencies.is_empty() {
            write!(f, "{}: {}", self.index, self.name)
        } else {
            write!(f, "{}: {} -> {}", self.index, self.name, self.dependencies.join(", "))
        }
    }
}

/// Ordered sequence of nodes
pub type Graph = Vec<Node>;
