// A running game: rooms, actors and the per-tick door check

use glam::Vec2;
use log::{debug, info};

use crate::config::GameConfig;
use crate::game::characters::{Actor, ActorId, ControlState, Enemy, EntityManager, Player};
use crate::game::combat::DamageNumbers;
use crate::game::world::{demo_rooms, CollisionQuery, RoomId, RoomLayout};

pub struct GameSession {
    rooms: Vec<RoomLayout>,
    manager: EntityManager,
    damage_numbers: DamageNumbers,
    tick_count: u64,
}

impl GameSession {
    /// Start in the first room of `rooms`, with every room's enemies
    /// spawned and hunting the player
    pub fn new(rooms: Vec<RoomLayout>, config: &GameConfig) -> Self {
        let start = rooms.first().map(|room| room.id).unwrap_or_default();
        let mut manager = EntityManager::new(start);

        let spawn = rooms.first().map(|room| room.player_spawn).unwrap_or(Vec2::ZERO);
        manager.set_player(Player::with_stats(spawn, &config.player_stats()));

        let enemy_stats = config.enemy_stats();
        let behavior = config.enemy_behavior();
        for room in &rooms {
            for &position in &room.enemy_spawns {
                let mut enemy = Enemy::with_stats(position, &enemy_stats, behavior);
                enemy.set_target(Some(ActorId::Player));
                if manager.add_enemy_to(enemy, room.id).is_none() {
                    debug!("Skipped enemy spawn at {:?} in {}", position, room.id);
                }
            }
        }

        info!(
            "Session started in {} with {} rooms and {} enemies",
            start,
            rooms.len(),
            manager.enemy_count()
        );

        Self {
            rooms,
            manager,
            damage_numbers: DamageNumbers::new(),
            tick_count: 0,
        }
    }

    /// Session over the built-in rooms
    pub fn demo(config: &GameConfig) -> Self {
        Self::new(demo_rooms(), config)
    }

    /// Advance one fixed tick. Returns the room entered through a door, if any.
    pub fn tick(&mut self, controls: ControlState) -> Option<RoomId> {
        self.tick_count += 1;

        if let Some(player) = self.manager.player_mut() {
            player.set_controls(controls);
        }

        let current = self.manager.current_room();
        let world = self
            .rooms
            .iter()
            .find(|room| room.id == current)
            .map(|room| &room.map as &dyn CollisionQuery);
        self.manager.update(world, &mut self.damage_numbers);
        self.damage_numbers.update();

        self.check_doors()
    }

    fn check_doors(&mut self) -> Option<RoomId> {
        let player = self.manager.player()?;
        if !player.entity().is_alive() {
            return None;
        }

        let target = self.current_layout()?.door_at(player.entity().position())?.target;
        if !self.rooms.iter().any(|room| room.id == target.room) {
            debug!("Door leads to unknown {}", target.room);
            return None;
        }

        self.manager.set_current_room(target.room);
        if let Some(player) = self.manager.player_mut() {
            player.teleport(target.spawn);
        }
        // Popups belong to the room they were spawned in
        self.damage_numbers.clear();

        info!("Player entered {}", target.room);
        Some(target.room)
    }

    pub fn manager(&self) -> &EntityManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut EntityManager {
        &mut self.manager
    }

    pub fn damage_numbers(&self) -> &DamageNumbers {
        &self.damage_numbers
    }

    pub fn current_layout(&self) -> Option<&RoomLayout> {
        let current = self.manager.current_room();
        self.rooms.iter().find(|room| room.id == current)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The player is dead (or was never spawned)
    pub fn is_game_over(&self) -> bool {
        self.manager
            .player()
            .map_or(true, |player| !player.entity().is_alive())
    }

    /// Camera centre for a viewport of `viewport` pixels
    pub fn camera_focus(&self, viewport: Vec2) -> Vec2 {
        match (self.manager.player(), self.current_layout()) {
            (Some(player), Some(layout)) => player.camera_focus(viewport, &layout.map),
            _ => Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_demo_rooms() -> Vec<RoomLayout> {
        let mut rooms = demo_rooms();
        for room in &mut rooms {
            room.enemy_spawns.clear();
        }
        rooms
    }

    fn holding_down() -> ControlState {
        ControlState {
            down: true,
            ..ControlState::default()
        }
    }

    fn holding_up() -> ControlState {
        ControlState {
            up: true,
            ..ControlState::default()
        }
    }

    fn walk_until_door(session: &mut GameSession, controls: ControlState) -> Option<RoomId> {
        for _ in 0..120 {
            if let Some(room) = session.tick(controls) {
                return Some(room);
            }
        }
        None
    }

    #[test]
    fn test_demo_spawns_everyone() {
        let session = GameSession::demo(&GameConfig::default());
        let manager = session.manager();

        assert_eq!(manager.current_room(), RoomId::MAIN_ROOM);
        assert_eq!(manager.enemy_count(), 5);
        assert_eq!(manager.active_ids().len(), 2);
        assert_eq!(manager.room_enemies(RoomId::HALLWAY).len(), 3);
        assert!(manager
            .active_enemies()
            .all(|enemy| enemy.target() == Some(ActorId::Player)));
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_config_reaches_actors() {
        let config = GameConfig {
            player_max_health: 25,
            enemy_max_health: 2,
            ..GameConfig::default()
        };
        let session = GameSession::demo(&config);
        let manager = session.manager();

        assert_eq!(manager.player().map(|p| p.entity().max_health()), Some(25));
        assert!(manager.active_enemies().all(|e| e.entity().max_health() == 2));
    }

    #[test]
    fn test_door_round_trip() {
        let mut session = GameSession::new(empty_demo_rooms(), &GameConfig::default());

        // Just above the bottom door of the main room
        let near_door = session.rooms[0].map.tile_center(7, 13);
        if let Some(player) = session.manager_mut().player_mut() {
            player.teleport(near_door);
        }

        assert_eq!(walk_until_door(&mut session, holding_down()), Some(RoomId::HALLWAY));
        assert_eq!(session.manager().current_room(), RoomId::HALLWAY);
        let arrived = session.manager().player().map(|p| p.entity().position());
        assert_eq!(arrived, Some(session.rooms[0].doors[0].target.spawn));

        assert_eq!(walk_until_door(&mut session, holding_up()), Some(RoomId::MAIN_ROOM));
        assert_eq!(session.manager().current_room(), RoomId::MAIN_ROOM);
    }

    #[test]
    fn test_room_switch_freezes_enemies() {
        let mut session = GameSession::demo(&GameConfig::default());
        let hallway: Vec<_> = session.manager().room_enemies(RoomId::HALLWAY).to_vec();
        let before: Vec<_> = hallway
            .iter()
            .filter_map(|id| session.manager().enemy(*id))
            .map(|e| e.entity().position())
            .collect();

        for _ in 0..30 {
            session.tick(ControlState::default());
        }

        let after: Vec<_> = hallway
            .iter()
            .filter_map(|id| session.manager().enemy(*id))
            .map(|e| e.entity().position())
            .collect();
        assert_eq!(before, after);
        assert!(hallway
            .iter()
            .filter_map(|id| session.manager().enemy(*id))
            .all(|e| !e.entity().is_active()));
    }

    #[test]
    fn test_hits_produce_damage_numbers() {
        let mut rooms = empty_demo_rooms();
        let spawn = rooms[0].player_spawn;
        rooms[0].enemy_spawns.push(spawn + Vec2::new(0.0, 6.0));
        let mut session = GameSession::new(rooms, &GameConfig::default());

        let attack = ControlState {
            attack: true,
            ..ControlState::default()
        };
        let mut seen = false;
        for tick in 0..40 {
            let controls = if tick == 0 { attack } else { ControlState::default() };
            session.tick(controls);
            seen |= !session.damage_numbers().is_empty();
        }

        assert!(seen);
        assert_eq!(session.tick_count(), 40);
    }

    #[test]
    fn test_empty_room_list_still_spawns_player() {
        let session = GameSession::new(Vec::new(), &GameConfig::default());
        assert_eq!(session.manager().current_room(), RoomId::MAIN_ROOM);
        assert!(!session.is_game_over());
        assert_eq!(session.camera_focus(Vec2::new(320.0, 240.0)), Vec2::ZERO);
    }
}
