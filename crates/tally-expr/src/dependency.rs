//! Reference graph and evaluation ordering

use crate::error::{ExprError, ExprResult};

/// Colors of the depth-first topological sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Directed graph of formula references.
///
/// Nodes are formula indices; an edge `a → b` means formula `a`'s text
/// mentions formula `b`'s name. The graph must be acyclic for an
/// evaluation order to exist.
#[derive(Debug, Default)]
pub struct ReferenceGraph {
    edges: Vec<Vec<usize>>,
}

impl ReferenceGraph {
    pub fn new(node_count: usize) -> Self {
        Self {
            edges: vec![Vec::new(); node_count],
        }
    }

    /// Record that `from` references `to`.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.edges[from].push(to);
    }

    /// Depth-first topological sort with cycle detection.
    ///
    /// Returns node indices ordered so that every node appears after all
    /// nodes it references. Every node is tried as a root, so disconnected
    /// components are covered. The first detected cycle aborts the whole
    /// sort with `GraphCycle`; no partial order is returned.
    pub fn topo_order(&self) -> ExprResult<Vec<usize>> {
        let mut marks = vec![Mark::Unvisited; self.edges.len()];
        let mut order = Vec::with_capacity(self.edges.len());
        for root in 0..self.edges.len() {
            if marks[root] == Mark::Unvisited {
                self.visit(root, &mut marks, &mut order)?;
            }
        }
        Ok(order)
    }

    fn visit(&self, node: usize, marks: &mut [Mark], order: &mut Vec<usize>) -> ExprResult<()> {
        match marks[node] {
            Mark::Done => return Ok(()),
            Mark::InProgress => return Err(ExprError::GraphCycle),
            Mark::Unvisited => {}
        }
        marks[node] = Mark::InProgress;
        for &next in &self.edges[node] {
            self.visit(next, marks, order)?;
        }
        marks[node] = Mark::Done;
        order.push(node);
        Ok(())
    }
}
