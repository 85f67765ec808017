use super::branch_index::BranchIndex;
use super::genome::Genome;
use crate::types::RoadMap;

/// Walks a genome from the requested origin and resolves each gene to a
/// concrete segment id. Decoding stops at the first `-1` gene, the first
/// dead end (a point with no outgoing legs), or genome exhaustion.
pub struct PathDecoder<'a> {
    map: &'a RoadMap,
    index: &'a BranchIndex,
    origin: &'a str,
}

impl<'a> PathDecoder<'a> {
    pub fn new(map: &'a RoadMap, index: &'a BranchIndex, origin: &'a str) -> Self {
        Self { map, index, origin }
    }

    /// Resolve the leading valid genes of `genome` to segment ids.
    ///
    /// The returned list may be empty (the very first step hit a dead
    /// end); that is a zero-fitness candidate, not an error. Its length is
    /// the "valid gene count": trailing genes past the first stop carry no
    /// route information.
    pub fn decode(&self, genome: &Genome) -> Vec<u32> {
        let mut segment_ids = Vec::new();
        let mut current_point = self.origin;

        for &gene in genome {
            if gene < 0 {
                // End-of-route sentinel.
                break;
            }
            let links = match self.index.branches(current_point) {
                Some(links) if !links.is_empty() => links,
                // Dead end: this genome ends here whether it wanted to or not.
                _ => break,
            };
            // Wrap values generated against the global gene domain onto
            // this point's (possibly shorter) branch list.
            let choice = gene as usize % links.len();
            let segment_id = links[choice];
            segment_ids.push(segment_id);

            current_point = match self.map.segment_by_id(segment_id) {
                Some(segment) => &segment.destination,
                None => break,
            };
        }

        segment_ids
    }
}
