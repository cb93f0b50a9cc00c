pub mod config;
pub mod event_log;
pub mod events;
pub mod grid;
pub mod obstruction;
pub mod range;
pub mod tile;

pub use config::Config;
pub use event_log::{EventLog, GridEvent};
pub use events::{GridEvents, ListenerId};
pub use grid::Grid;
pub use obstruction::{Aabb, CollisionScene, CollisionVolume, StaticObstacleScene};
pub use tile::{DefaultTileFactory, Tile, TileFactory};
