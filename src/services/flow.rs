//! Flow graph construction for the class → item-group Sankey diagram.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::filters;
use crate::services::analytics::PairAggregate;

/// One aggregated money flow between two category nodes. `source` and
/// `target` index into [`FlowGraph::nodes`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub label: String,
}

/// Unique category names with stable indices, plus the edges between
/// them. An empty row set yields zero nodes and zero edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<FlowEdge>,
}

pub fn build_flow_graph(pairs: &[PairAggregate], currency: &str, locale: &str) -> FlowGraph {
    let mut graph = FlowGraph::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for pair in pairs {
        let source = node_index(&mut graph.nodes, &mut index, &pair.first);
        let target = node_index(&mut graph.nodes, &mut index, &pair.second);
        let label = format!(
            "{} → {}: {}",
            pair.first,
            pair.second,
            filters::format_amount(pair.total, currency, locale)
        );

        graph.edges.push(FlowEdge {
            source,
            target,
            value: pair.total,
            label,
        });
    }

    graph
}

fn node_index(nodes: &mut Vec<String>, index: &mut HashMap<String, usize>, name: &str) -> usize {
    if let Some(&i) = index.get(name) {
        return i;
    }
    let i = nodes.len();
    nodes.push(name.to_string());
    index.insert(name.to_string(), i);
    i
}
