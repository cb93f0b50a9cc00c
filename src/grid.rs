use crate::events::{GridEvents, ListenerId};
use crate::obstruction::{Aabb, CollisionScene, CollisionVolume};
use crate::range;
use crate::tile::{DefaultTileFactory, Tile, TileFactory};

/// Neighbour scan order: north, south, east, west.
/// North is y-1 (the row above, toward the world origin).
const NEIGHBOUR_DIRS: [(i32, i32); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

/// A rectangular board of tiles that pawns can move around on
///
/// The grid owns its tiles in a row-major vector (`y * width + x`), converts
/// between grid coordinates and world positions, answers neighbour / range /
/// obstruction queries and fans out hover and click notifications to
/// registered listeners. Tile anchors sit at cell centers.
pub struct Grid {
    width: i32,
    height: i32,
    tile_width: f32,
    tile_height: f32,
    origin_x: f32,
    origin_y: f32,

    tiles: Vec<Tile>,

    /// Last tile the cursor was reported over
    hovered: Option<usize>,
    /// Last tile that was clicked
    selected: Option<usize>,

    /// Last dimensions a reconciliation pass was applied for
    prev_width: i32,
    prev_height: i32,

    events: GridEvents,
    factory: Box<dyn TileFactory>,
    scene: Option<Box<dyn CollisionScene>>,
}

impl Grid {
    /// Create a grid of open unit-cost tiles at world origin (0, 0)
    pub fn new(width: i32, height: i32, tile_width: f32, tile_height: f32) -> Self {
        let width = width.max(0);
        let height = height.max(0);

        let mut grid = Grid {
            width,
            height,
            tile_width,
            tile_height,
            origin_x: 0.0,
            origin_y: 0.0,
            tiles: Vec::with_capacity((width * height) as usize),
            hovered: None,
            selected: None,
            prev_width: width,
            prev_height: height,
            events: GridEvents::new(),
            factory: Box::new(DefaultTileFactory),
            scene: None,
        };

        for index in 0..(width * height) {
            let (x, y) = grid.get_coords(index);
            let (ax, ay) = grid.anchor_for(x, y);
            grid.tiles.push(Tile::new(x, y, ax, ay));
        }

        grid
    }

    /// Create a grid whose tiles come from the given factory
    pub fn with_factory(
        width: i32,
        height: i32,
        tile_width: f32,
        tile_height: f32,
        factory: Box<dyn TileFactory>,
    ) -> Result<Self, String> {
        let mut grid = Grid::new(0, 0, tile_width, tile_height);
        grid.factory = factory;
        grid.resize(width, height)?;
        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> f32 {
        self.tile_height
    }

    pub fn origin(&self) -> (f32, f32) {
        (self.origin_x, self.origin_y)
    }

    /// Attach the host collision scene used by `obstructed`
    pub fn set_collision_scene(&mut self, scene: Box<dyn CollisionScene>) {
        self.scene = Some(scene);
    }

    /// Detach the collision scene; `obstructed` reports a clear path after this
    pub fn clear_collision_scene(&mut self) {
        self.scene = None;
    }

    /// Convert grid coords to an offset from the grid origin.
    /// Pure: `(x * tile_width, y * tile_height)`, the cell's min corner.
    pub fn local_position(&self, x: i32, y: i32) -> (f32, f32) {
        (x as f32 * self.tile_width, y as f32 * self.tile_height)
    }

    /// Convert (x, y) coordinates to a linear tile id
    pub fn get_id(&self, x: i32, y: i32) -> i32 {
        x + y * self.width
    }

    /// Convert a linear tile id to (x, y) coordinates
    pub fn get_coords(&self, id: i32) -> (i32, i32) {
        (id % self.width, id / self.width)
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(self.get_id(x, y) as usize)
        } else {
            None
        }
    }

    /// World-space anchor of the cell at (x, y): the cell center
    fn anchor_for(&self, x: i32, y: i32) -> (f32, f32) {
        let (lx, ly) = self.local_position(x, y);
        (
            self.origin_x + lx + self.tile_width / 2.0,
            self.origin_y + ly + self.tile_height / 2.0,
        )
    }

    /// World-space rectangle covered by the cell at (x, y)
    pub fn cell_rect(&self, x: i32, y: i32) -> Aabb {
        let (ax, ay) = self.anchor_for(x, y);
        Aabb::centered(ax, ay, self.tile_width / 2.0, self.tile_height / 2.0)
    }

    /// Get tile from coords, None if out of bounds
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index_of(x, y).map(|index| &self.tiles[index])
    }

    /// Mutable access to a tile for cost / collision edits
    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.index_of(x, y).map(|index| &mut self.tiles[index])
    }

    /// Get tile from a world location, None if outside the grid extents
    pub fn tile_at_world(&self, world_x: f32, world_y: f32) -> Option<&Tile> {
        let x = ((world_x - self.origin_x) / self.tile_width).floor() as i32;
        let y = ((world_y - self.origin_y) / self.tile_height).floor() as i32;
        self.get_tile(x, y)
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Currently hovered tile, if any
    pub fn hovered_tile(&self) -> Option<&Tile> {
        self.hovered.map(|index| &self.tiles[index])
    }

    /// Currently selected tile, if any
    pub fn selected_tile(&self) -> Option<&Tile> {
        self.selected.map(|index| &self.tiles[index])
    }

    /// Create or destroy tiles so the collection holds `width * height`
    ///
    /// No-op when the dimensions match the last applied ones. Growth appends
    /// factory-created tiles; shrinking destroys the excess from the end
    /// through the factory. Surviving tiles are re-addressed so stored
    /// coordinates and anchors always match the row-major index. Atomic per
    /// call: a factory failure leaves the collection untouched.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), String> {
        if width < 0 || height < 0 {
            return Err(format!("invalid grid dimensions {}x{}", width, height));
        }
        if width == self.prev_width && height == self.prev_height {
            return Ok(());
        }

        let new_count = (width * height) as usize;

        // Create all appended tiles before touching the collection, so a
        // factory error cannot leave it at the wrong length
        let mut created: Vec<Tile> = Vec::new();
        for index in self.tiles.len()..new_count {
            let x = index as i32 % width;
            let y = index as i32 / width;
            let ax = self.origin_x + x as f32 * self.tile_width + self.tile_width / 2.0;
            let ay = self.origin_y + y as f32 * self.tile_height + self.tile_height / 2.0;
            created.push(self.factory.create(x, y, ax, ay)?);
        }

        while self.tiles.len() > new_count {
            if let Some(tile) = self.tiles.pop() {
                self.factory.destroy(tile);
            }
        }
        self.tiles.append(&mut created);

        self.width = width;
        self.height = height;
        self.prev_width = width;
        self.prev_height = height;

        // Surviving tiles may have moved to different coordinates
        self.readdress_tiles();

        if self.hovered.map_or(false, |index| index >= new_count) {
            self.hovered = None;
        }
        if self.selected.map_or(false, |index| index >= new_count) {
            self.selected = None;
        }

        Ok(())
    }

    /// Change world cell dimensions and re-anchor every tile
    pub fn set_tile_size(&mut self, tile_width: f32, tile_height: f32) {
        if self.tile_width == tile_width && self.tile_height == tile_height {
            return;
        }
        self.tile_width = tile_width;
        self.tile_height = tile_height;
        self.readdress_tiles();
    }

    /// Move the grid's world anchor and re-anchor every tile
    pub fn set_origin(&mut self, origin_x: f32, origin_y: f32) {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self.readdress_tiles();
    }

    fn readdress_tiles(&mut self) {
        for index in 0..self.tiles.len() {
            let x = index as i32 % self.width;
            let y = index as i32 / self.width;
            let (ax, ay) = self.anchor_for(x, y);
            let tile = &mut self.tiles[index];
            tile.x = x;
            tile.y = y;
            tile.anchor_x = ax;
            tile.anchor_y = ay;
        }
    }

    /// Find all tiles adjacent to `tile`, in north/south/east/west order
    ///
    /// With a collision volume, candidates whose sweep from `tile` is
    /// obstructed are excluded.
    pub fn neighbours(&self, tile: &Tile, volume: Option<&CollisionVolume>) -> Vec<&Tile> {
        match self.index_of(tile.x, tile.y) {
            Some(index) => self
                .neighbour_indices(index, volume)
                .into_iter()
                .map(|neighbour| &self.tiles[neighbour])
                .collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn neighbour_indices(
        &self,
        index: usize,
        volume: Option<&CollisionVolume>,
    ) -> Vec<usize> {
        let (x, y) = self.get_coords(index as i32);
        let mut result = Vec::with_capacity(4);

        for (dx, dy) in NEIGHBOUR_DIRS {
            if let Some(neighbour) = self.index_of(x + dx, y + dy) {
                if let Some(volume) = volume {
                    if self.obstructed(&self.tiles[index], &self.tiles[neighbour], volume) {
                        continue;
                    }
                }
                result.push(neighbour);
            }
        }

        result
    }

    /// Find all tiles reachable from `origin` within a movement budget
    ///
    /// Entering a tile consumes its movement cost; see the `range` module for
    /// the expansion rules. A non-positive range yields no tiles; the origin
    /// is never part of the result.
    pub fn tiles_in_range(
        &self,
        origin: &Tile,
        range: f32,
        volume: Option<&CollisionVolume>,
    ) -> Vec<&Tile> {
        match self.index_of(origin.x, origin.y) {
            Some(index) => range::reachable_indices(self, index, range, volume)
                .into_iter()
                .map(|reachable| &self.tiles[reachable])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Check if anything blocks a sweep of `volume` between two tiles
    ///
    /// The sweep runs from `from`'s anchor to `to`'s anchor; geometry inside
    /// the two endpoint cells never counts as blocking. Without an attached
    /// collision scene the path is always clear.
    pub fn obstructed(&self, from: &Tile, to: &Tile, volume: &CollisionVolume) -> bool {
        match &self.scene {
            Some(scene) => {
                let ignore = [self.cell_rect(from.x, from.y), self.cell_rect(to.x, to.y)];
                scene.sweep_blocked(
                    volume,
                    (from.anchor_x, from.anchor_y),
                    (to.anchor_x, to.anchor_y),
                    &ignore,
                )
            }
            None => false,
        }
    }

    /// Subscribe to tile click notifications
    pub fn on_tile_clicked<F: FnMut(&Tile) + 'static>(&mut self, callback: F) -> ListenerId {
        self.events.on_tile_clicked(callback)
    }

    /// Subscribe to hover-start notifications
    pub fn on_tile_cursor_over<F: FnMut(&Tile) + 'static>(&mut self, callback: F) -> ListenerId {
        self.events.on_tile_cursor_over(callback)
    }

    /// Subscribe to hover-end notifications
    pub fn on_end_tile_cursor_over<F: FnMut(&Tile) + 'static>(&mut self, callback: F) -> ListenerId {
        self.events.on_end_tile_cursor_over(callback)
    }

    /// Unregister a listener; returns true if it was registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.events.remove_listener(id)
    }

    /// Report a click on the tile at (x, y)
    ///
    /// Overwrites the previous selection and notifies click listeners.
    /// No notification is emitted for the deselected tile. Out-of-bounds
    /// coordinates are ignored.
    pub fn tile_clicked(&mut self, x: i32, y: i32) {
        if let Some(index) = self.index_of(x, y) {
            self.selected = Some(index);
            self.events.emit_clicked(&self.tiles[index]);
        }
    }

    /// Report the cursor entering the tile at (x, y)
    ///
    /// Ends the previous hover first when moving between tiles; reporting the
    /// tile already hovered is a no-op.
    pub fn tile_cursor_over(&mut self, x: i32, y: i32) {
        let index = match self.index_of(x, y) {
            Some(index) => index,
            None => return,
        };
        if self.hovered == Some(index) {
            return;
        }
        if let Some(prev) = self.hovered.take() {
            self.events.emit_end_cursor_over(&self.tiles[prev]);
        }
        self.hovered = Some(index);
        self.events.emit_cursor_over(&self.tiles[index]);
    }

    /// Report the cursor leaving the tile at (x, y)
    ///
    /// Stale calls naming a tile that is not the current hover target are
    /// silently ignored.
    pub fn end_tile_cursor_over(&mut self, x: i32, y: i32) {
        let index = match self.index_of(x, y) {
            Some(index) => index,
            None => return,
        };
        if self.hovered == Some(index) {
            self.hovered = None;
            self.events.emit_end_cursor_over(&self.tiles[index]);
        }
    }
}
