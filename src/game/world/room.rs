// Room identity, doors and the built-in room layouts

use glam::Vec2;

use super::tilemap::{TileMap, TILE_SIZE};

/// Identifies one room of the overworld
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RoomId(pub u8);

impl RoomId {
    pub const MAIN_ROOM: RoomId = RoomId(0);
    pub const HALLWAY: RoomId = RoomId(1);
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room {}", self.0)
    }
}

/// Where a door leads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorTarget {
    pub room: RoomId,
    /// Spawn position inside the target room
    pub spawn: Vec2,
}

/// Rectangular trigger area that moves the player to another room
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Door {
    pub center: Vec2,
    pub half_width: f32,
    pub half_height: f32,
    pub target: DoorTarget,
}

impl Door {
    pub fn new(center: Vec2, half_width: f32, half_height: f32, target: DoorTarget) -> Self {
        Self {
            center,
            half_width,
            half_height,
            target,
        }
    }

    /// Door spanning `width_tiles` tiles starting at tile (`tx`, `ty`).
    ///
    /// The trigger reaches one tile deep on either side of the row so an
    /// actor whose feet stop at the map edge still stands inside it.
    pub fn from_tiles(map: &TileMap, tx: i32, ty: i32, width_tiles: i32, target: DoorTarget) -> Self {
        let first = map.tile_center(tx, ty);
        let last = map.tile_center(tx + width_tiles - 1, ty);
        let half_tile = (TILE_SIZE / 2) as f32;

        Self::new(
            (first + last) / 2.0,
            (last.x - first.x) / 2.0 + half_tile,
            TILE_SIZE as f32,
            target,
        )
    }

    /// Whether a world point lies inside the door area (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        let d = point - self.center;
        d.x.abs() <= self.half_width && d.y.abs() <= self.half_height
    }
}

/// Static description of one room
#[derive(Debug, Clone)]
pub struct RoomLayout {
    pub id: RoomId,
    pub map: TileMap,
    pub doors: Vec<Door>,
    /// Where the player starts when a session begins in this room
    pub player_spawn: Vec2,
    /// Enemy spawn points
    pub enemy_spawns: Vec<Vec2>,
}

impl RoomLayout {
    /// First door whose area contains `point`
    pub fn door_at(&self, point: Vec2) -> Option<&Door> {
        self.doors.iter().find(|door| door.contains(point))
    }
}

const MAIN_ROOM_ROWS: [&str; 16] = [
    "################",
    "#..............#",
    "#..............#",
    "#...##.........#",
    "#...##.........#",
    "#..............#",
    "#.........##...#",
    "#.........##...#",
    "#..............#",
    "#..............#",
    "#....####......#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "######....######",
];

const HALLWAY_ROWS: [&str; 16] = [
    "######....######",
    "######....######",
    "######....######",
    "######....######",
    "####........####",
    "####........####",
    "####..#..#..####",
    "####........####",
    "####........####",
    "####..#..#..####",
    "####........####",
    "####........####",
    "######....######",
    "######....######",
    "######....######",
    "################",
];

/// The two rooms used by the demo: a main hall and a hallway above it
pub fn demo_rooms() -> Vec<RoomLayout> {
    let main_map = TileMap::from_rows(&MAIN_ROOM_ROWS);
    let hallway_map = TileMap::from_rows(&HALLWAY_ROWS);

    let main_door = Door::from_tiles(
        &main_map,
        6,
        15,
        4,
        DoorTarget {
            room: RoomId::HALLWAY,
            spawn: hallway_map.tile_center(7, 3),
        },
    );
    let hallway_door = Door::from_tiles(
        &hallway_map,
        6,
        0,
        4,
        DoorTarget {
            room: RoomId::MAIN_ROOM,
            spawn: main_map.tile_center(7, 12),
        },
    );

    let main_player_spawn = main_map.tile_center(8, 8);
    let hallway_player_spawn = hallway_map.tile_center(7, 11);

    let main_spawns = vec![main_map.tile_center(3, 7), main_map.tile_center(12, 3)];
    let hallway_spawns = vec![
        hallway_map.tile_center(7, 8),
        hallway_map.tile_center(8, 10),
        hallway_map.tile_center(6, 5),
    ];

    vec![
        RoomLayout {
            id: RoomId::MAIN_ROOM,
            map: main_map,
            doors: vec![main_door],
            player_spawn: main_player_spawn,
            enemy_spawns: main_spawns,
        },
        RoomLayout {
            id: RoomId::HALLWAY,
            map: hallway_map,
            doors: vec![hallway_door],
            player_spawn: hallway_player_spawn,
            enemy_spawns: hallway_spawns,
        },
    ]
}
