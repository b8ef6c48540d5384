// Game layer: actors, combat, rooms and the session that ties them together

pub mod characters;
pub mod combat;
pub mod session;
pub mod world;

pub use session::GameSession;
