// Tile collision map
//
// Coordinates are world pixels with the map centred on (0, 0) and y growing
// downward. Anything outside the map reports solid, which acts as an
// implicit boundary wall.

use glam::Vec2;

/// Edge length of a map tile in pixels
pub const TILE_SIZE: i32 = 8;

/// The world collision query the combat core moves against
pub trait CollisionQuery {
    /// Whether the world point is blocked
    fn is_solid(&self, point: Vec2) -> bool;

    /// Map size in pixels (width, height)
    fn pixel_size(&self) -> (u32, u32);

    /// Clamp a point into the map's pixel bounds
    fn clamp_to_bounds(&self, point: Vec2) -> Vec2 {
        let (w, h) = self.pixel_size();
        let half = Vec2::new((w / 2) as f32, (h / 2) as f32);
        point.clamp(-half, half)
    }
}

/// Grid of solid/empty cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: i32,
    height: i32,
    solid: Vec<bool>,
}

impl TileMap {
    /// An empty (fully walkable) map of `width` x `height` tiles
    pub fn new(width: u32, height: u32) -> Self {
        let width = width as i32;
        let height = height as i32;
        Self {
            width,
            height,
            solid: vec![false; (width * height).max(0) as usize],
        }
    }

    /// Build a map from ASCII rows; `#` marks a solid tile.
    ///
    /// Short rows are padded with empty tiles.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut map = Self::new(width, height);

        for (ty, row) in rows.iter().enumerate() {
            for (tx, ch) in row.chars().enumerate() {
                if ch == '#' {
                    map.set_solid(tx as i32, ty as i32, true);
                }
            }
        }

        map
    }

    /// Width in tiles
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in tiles
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Mark a tile solid or empty; out-of-range tiles are ignored
    pub fn set_solid(&mut self, tx: i32, ty: i32, solid: bool) {
        if let Some(index) = self.index(tx, ty) {
            self.solid[index] = solid;
        }
    }

    /// Whether the given tile is solid (out of range counts as solid)
    pub fn tile_is_solid(&self, tx: i32, ty: i32) -> bool {
        self.index(tx, ty).map_or(true, |index| self.solid[index])
    }

    /// Convert a world point to tile coordinates
    pub fn tile_at(&self, point: Vec2) -> (i32, i32) {
        let left = -(self.width * TILE_SIZE) / 2;
        let top = -(self.height * TILE_SIZE) / 2;

        let x_px = point.x.floor() as i32;
        let y_px = point.y.floor() as i32;

        (
            (x_px - left).div_euclid(TILE_SIZE),
            (y_px - top).div_euclid(TILE_SIZE),
        )
    }

    /// World-space centre of a tile
    pub fn tile_center(&self, tx: i32, ty: i32) -> Vec2 {
        let left = -(self.width * TILE_SIZE) / 2;
        let top = -(self.height * TILE_SIZE) / 2;
        Vec2::new(
            (left + tx * TILE_SIZE + TILE_SIZE / 2) as f32,
            (top + ty * TILE_SIZE + TILE_SIZE / 2) as f32,
        )
    }

    fn index(&self, tx: i32, ty: i32) -> Option<usize> {
        if tx < 0 || ty < 0 || tx >= self.width || ty >= self.height {
            return None;
        }
        Some((ty * self.width + tx) as usize)
    }
}

impl CollisionQuery for TileMap {
    fn is_solid(&self, point: Vec2) -> bool {
        let (tx, ty) = self.tile_at(point);
        self.tile_is_solid(tx, ty)
    }

    fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width * TILE_SIZE) as u32,
            (self.height * TILE_SIZE) as u32,
        )
    }
}
