use serde::{Deserialize, Serialize};

/// A directed road leg between two named points.
///
/// Ids are assigned by the store when a map is saved, densely 1..N in
/// storage order, and never change afterwards. The genetic search refers
/// to segments by id instead of carrying the full struct around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: u32,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
}

impl Segment {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        distance_km: f64,
    ) -> Self {
        Self {
            id: 0,
            origin: origin.into(),
            destination: destination.into(),
            distance_km,
        }
    }
}

/// Two segments are the same road leg iff they connect the same points.
/// Id and distance are excluded so duplicate legs compare equal even when
/// submitted with different distances.
impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin && self.destination == other.destination
    }
}

impl Eq for Segment {}

/// A named collection of segments. `id` is `None` until the store assigns
/// one on first save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadMap {
    pub id: Option<u32>,
    pub name: String,
    pub segments: Vec<Segment>,
}

impl RoadMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            segments: Vec::new(),
        }
    }

    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn segment_by_id(&self, id: u32) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }
}

/// The best route found by a search: the legs in travel order, the point
/// names visited (always one more entry than the legs), and the fuel cost
/// of driving the whole route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub segments: Vec<Segment>,
    pub waypoints: Vec<String>,
    pub total_cost: f64,
}
