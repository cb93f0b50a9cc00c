use crate::obstruction::Aabb;

/// A single cell of the movement grid
///
/// Coordinates and anchor are assigned by the grid during reconciliation and
/// stay in sync with the tile's index in the owning collection.
#[derive(Clone, Debug)]
pub struct Tile {
    /// Grid coordinates
    pub x: i32,
    pub y: i32,

    /// World-space anchor (used as sweep start/end point)
    pub anchor_x: f32,
    pub anchor_y: f32,

    /// Cost consumed when moving into this tile.
    /// Infinite cost means the tile cannot be entered.
    pub cost: f32,

    /// Collision footprint for obstruction sweeps (None = no geometry)
    pub collision: Option<Aabb>,
}

impl Tile {
    /// Create an open tile with unit movement cost
    pub fn new(x: i32, y: i32, anchor_x: f32, anchor_y: f32) -> Self {
        Tile {
            x,
            y,
            anchor_x,
            anchor_y,
            cost: 1.0,
            collision: None,
        }
    }

    /// Whether the tile can be entered at all
    pub fn is_passable(&self) -> bool {
        self.cost.is_finite()
    }

    /// Mark the tile impassable
    pub fn block(&mut self) {
        self.cost = f32::INFINITY;
    }

    /// Make the tile passable again with the given cost
    pub fn unblock(&mut self, cost: f32) {
        self.cost = cost;
    }
}

/// Construction hook invoked by the grid during resize reconciliation
///
/// `create` receives the target coordinates and the computed world anchor.
/// A creation error aborts the whole reconciliation pass; the grid guarantees
/// the tile collection is left untouched in that case.
pub trait TileFactory {
    fn create(&mut self, x: i32, y: i32, anchor_x: f32, anchor_y: f32) -> Result<Tile, String>;

    /// Teardown hook for tiles removed by reconciliation
    fn destroy(&mut self, _tile: Tile) {}
}

/// Factory producing plain open tiles
#[derive(Default)]
pub struct DefaultTileFactory;

impl TileFactory for DefaultTileFactory {
    fn create(&mut self, x: i32, y: i32, anchor_x: f32, anchor_y: f32) -> Result<Tile, String> {
        Ok(Tile::new(x, y, anchor_x, anchor_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_is_passable() {
        let tile = Tile::new(2, 3, 40.0, 45.0);
        assert_eq!(tile.x, 2);
        assert_eq!(tile.y, 3);
        assert_eq!(tile.cost, 1.0);
        assert!(tile.is_passable());
    }

    #[test]
    fn test_block_unblock() {
        let mut tile = Tile::new(0, 0, 0.0, 0.0);
        tile.block();
        assert!(!tile.is_passable());

        tile.unblock(2.5);
        assert!(tile.is_passable());
        assert_eq!(tile.cost, 2.5);
    }

    #[test]
    fn test_default_factory() {
        let mut factory = DefaultTileFactory;
        let tile = factory.create(1, 2, 10.0, 20.0).unwrap();
        assert_eq!((tile.x, tile.y), (1, 2));
        assert_eq!((tile.anchor_x, tile.anchor_y), (10.0, 20.0));
    }
}
