use crate::types::RoadMap;
use std::collections::HashMap;

/// Adjacency view of a map: for every point name, the ids of the segments
/// that leave it, in map storage order. Built once per search and never
/// mutated afterwards.
///
/// `max_branch_count` (the largest out-degree of any point) sizes the gene
/// domain: a gene can hold any value up to `max_branch_count - 1`, and the
/// decoder wraps values that exceed a particular point's branch list.
#[derive(Debug, Clone)]
pub struct BranchIndex {
    links: HashMap<String, Vec<u32>>,
    max_branch_count: usize,
}

impl BranchIndex {
    pub fn build(map: &RoadMap) -> Self {
        let mut links: HashMap<String, Vec<u32>> = HashMap::new();
        for segment in &map.segments {
            links
                .entry(segment.origin.clone())
                .or_default()
                .push(segment.id);
        }
        let max_branch_count = links.values().map(Vec::len).max().unwrap_or(0);
        Self {
            links,
            max_branch_count,
        }
    }

    /// Segment ids leaving `point`, or `None` for a point with no outgoing
    /// legs (a dead end, or a name not in the map at all).
    pub fn branches(&self, point: &str) -> Option<&[u32]> {
        self.links.get(point).map(Vec::as_slice)
    }

    pub fn max_branch_count(&self) -> usize {
        self.max_branch_count
    }

    /// Whether `point` is the origin of at least one segment.
    pub fn has_origin(&self, point: &str) -> bool {
        self.links.contains_key(point)
    }
}
