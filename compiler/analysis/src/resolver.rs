//! Dependency-ordered emission
//!
//! Nodes are released in batches: every node whose dependency set is empty is
//! ready, the ready batch is handed out in its current relative order, and the
//! batch's names are removed from every remaining dependency set. A round
//! without ready nodes means the remaining nodes form a cycle.

use std::collections::BTreeSet;
use std::fmt;

use ir::TypedNode;
use thiserror::Error;
use tracing::{debug, warn};

/// A node that could not be released, with the names it still waits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedNode {
    /// Node name
    pub name: String,
    /// Unresolved dependencies
    pub waiting_on: Vec<String>,
}

impl fmt::Display for BlockedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> [{}]", self.name, self.waiting_on.join(", "))
    }
}

/// Errors raised by the resolver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No remaining node is ready.
    #[error("cyclic dependency between {}", format_blocked(.nodes))]
    CyclicDependency {
        /// Every remaining node, sorted by name
        nodes: Vec<BlockedNode>,
    },
}

fn format_blocked(nodes: &[BlockedNode]) -> String {
    nodes.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Batch iterator over dependency-ordered nodes.
///
/// Each item is one ready batch. After a [`ResolveError`] the iterator is
/// exhausted.
#[derive(Debug)]
pub struct DependencyResolver<T: TypedNode> {
    remaining: Vec<T>,
    failed: bool,
}

impl<T: TypedNode> DependencyResolver<T> {
    /// Take ownership of `nodes` and pre-order them.
    pub fn new(nodes: Vec<T>) -> Self {
        let mut remaining = nodes;
        for node in &mut remaining {
            let own = node.name().to_string();
            node.dependencies_mut().remove(&own);
        }
        pre_order(&mut remaining);
        Self { remaining, failed: false }
    }

    /// Number of nodes not yet released.
    pub fn remaining(&self) -> usize { self.remaining.len() }

    fn blocked(&self) -> Vec<BlockedNode> {
        let mut nodes: Vec<BlockedNode> = self
            .remaining
            .iter()
            .map(|node| BlockedNode {
                name: node.name().to_string(),
                waiting_on: node.dependencies().iter().cloned().collect(),
            })
            .collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        nodes
    }
}

impl<T: TypedNode> Iterator for DependencyResolver<T> {
    type Item = Result<Vec<T>, ResolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }

        let (ready, rest): (Vec<T>, Vec<T>) = std::mem::take(&mut self.remaining)
            .into_iter()
            .partition(|n| n.dependencies().is_empty());
        self.remaining = rest;

        if ready.is_empty() {
            self.failed = true;
            let nodes = self.blocked();
            warn!("Dependency cycle among {} nodes", nodes.len());
            return Some(Err(ResolveError::CyclicDependency { nodes }));
        }

        let released: BTreeSet<&str> = ready.iter().map(|n| n.name()).collect();
        for node in &mut self.remaining {
            node.dependencies_mut().retain(|dep| !released.contains(dep.as_str()));
        }
        debug!("Released batch of {} nodes, {} remaining", ready.len(), self.remaining.len());

        Some(Ok(ready))
    }
}

/// Resolve `nodes` into a single dependency-respecting order.
pub fn resolve_order<T: TypedNode>(nodes: Vec<T>) -> Result<Vec<T>, ResolveError> {
    let mut ordered = Vec::new();
    for batch in DependencyResolver::new(nodes) {
        ordered.extend(batch?);
    }
    Ok(ordered)
}

/// Stable insertion sort with "A before B unless B is among A's dependencies".
///
/// The relation is not a total order, so a library sort is not used.
fn pre_order<T: TypedNode>(nodes: &mut [T]) {
    for i in 1..nodes.len() {
        let mut j = i;
        while j > 0 && nodes[j - 1].dependencies().contains(nodes[j].name()) {
            nodes.swap(j - 1, j);
            j -= 1;
        }
    }
}
