// World collaborators consumed by the combat core
//
// - `tilemap`: the collision query and a tile grid implementing it
// - `room`: room identity, doors and the built-in layouts

pub mod room;
pub mod tilemap;

pub use room::{demo_rooms, Door, DoorTarget, RoomId, RoomLayout};
pub use tilemap::{CollisionQuery, TileMap, TILE_SIZE};
