/// Genome representation for the route search.
///
/// A genome is a fixed-length sequence of integers, one gene per segment
/// in the map. Each gene holds a branch choice: the index of the outgoing
/// segment to take from the point the partial route has reached so far.
///
/// Example: point A has two outgoing legs,
///   index 0 -> segment A-B
///   index 1 -> segment A-C
/// so a gene value of 0 or 1 picks the next leg. Values above the last
/// index wrap around via modulo, which keeps genes drawn from the global
/// `[.., max_branch_count - 1]` domain valid at points with fewer
/// branches.
///
/// The value `-1` is the end-of-route sentinel: decoding stops there and
/// the remaining genes are ignored. A route has at least one leg, so gene
/// 0 may not be `-1` -- its domain starts at 0 while every later gene's
/// domain starts at -1.
///
/// Why a fixed-length vector instead of a variable-length path? Crossover
/// and mutation stay trivial (array slicing, per-slot redraw) and no
/// variation operator can produce a structurally invalid individual.
pub type Genome = Vec<i32>;

/// End-of-route sentinel.
pub const END_OF_ROUTE: i32 = -1;

/// Lower bound of the gene domain at `index`.
pub fn gene_lower_bound(index: usize) -> i32 {
    if index == 0 {
        0
    } else {
        END_OF_ROUTE
    }
}
