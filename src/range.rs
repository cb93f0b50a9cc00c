use crate::grid::Grid;
use crate::obstruction::CollisionVolume;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

// Trace logging flag - set to true to enable debug output
const TRACE_RANGE: bool = false;

/// A frontier entry in the range expansion
#[derive(Debug, Clone, Copy)]
struct FrontierNode {
    index: usize,
    cumulative_cost: f32,
}

impl PartialEq for FrontierNode {
    fn eq(&self, other: &Self) -> bool {
        self.cumulative_cost == other.cumulative_cost && self.index == other.index
    }
}

impl Eq for FrontierNode {}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .cumulative_cost
            .partial_cmp(&self.cumulative_cost)
            .unwrap_or(Ordering::Equal)
            // Tie-breaker: use tile index for deterministic ordering
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Cost-bounded uniform-cost expansion from an origin tile
///
/// Entering a tile consumes that tile's movement cost; a tile is reachable if
/// some path keeps the cumulative cost within `range`. Tiles reachable via
/// several paths are kept at their minimum cumulative cost; on exact ties the
/// first admission wins. The origin itself is excluded from the result.
///
/// Returns indices into the grid's tile collection, in ascending order.
pub(crate) fn reachable_indices(
    grid: &Grid,
    origin: usize,
    range: f32,
    volume: Option<&CollisionVolume>,
) -> Vec<usize> {
    if range <= 0.0 {
        return Vec::new();
    }

    let tile_count = grid.tiles().len();
    let mut best: Vec<f32> = vec![f32::INFINITY; tile_count];
    let mut queue: BinaryHeap<FrontierNode> = BinaryHeap::new();

    best[origin] = 0.0;
    queue.push(FrontierNode {
        index: origin,
        cumulative_cost: 0.0,
    });

    while let Some(node) = queue.pop() {
        // Skip entries superseded by a cheaper admission
        if node.cumulative_cost > best[node.index] {
            continue;
        }

        if TRACE_RANGE {
            let (x, y) = grid.get_coords(node.index as i32);
            println!(
                "[range] expanding ({},{}) at cost {:.2}",
                x, y, node.cumulative_cost
            );
        }

        for neighbour in grid.neighbour_indices(node.index, volume) {
            let step_cost = grid.tiles()[neighbour].cost;
            let cumulative = node.cumulative_cost + step_cost;

            if cumulative > range {
                continue;
            }
            // Strict comparison: first-seen wins on exact ties
            if cumulative < best[neighbour] {
                best[neighbour] = cumulative;
                queue.push(FrontierNode {
                    index: neighbour,
                    cumulative_cost: cumulative,
                });
            }
        }
    }

    (0..tile_count)
        .filter(|&index| index != origin && best[index].is_finite())
        .collect()
}
