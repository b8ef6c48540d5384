// Entity manager: owns every actor, runs the per-tick pipeline and keeps
// enemies partitioned by room

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::game::combat::{penetration, DamageSink};
use crate::game::world::{CollisionQuery, RoomId};

use super::enemy::Enemy;
use super::entity::{Actor, Entity, TargetView};
use super::player::Player;

/// Most enemies a single room can hold
pub const MAX_ENEMIES_PER_ROOM: usize = 32;

/// Most rooms the manager keeps buckets for
pub const MAX_ROOMS: usize = 16;

/// Stable handle to an enemy owned by an `EntityManager`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(usize);

/// Anything an enemy can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorId {
    Player,
    Enemy(EnemyId),
}

type EnemyList = ArrayVec<EnemyId, MAX_ENEMIES_PER_ROOM>;

#[derive(Debug, Clone)]
struct RoomBucket {
    room: RoomId,
    enemies: EnemyList,
}

impl RoomBucket {
    fn new(room: RoomId) -> Self {
        Self {
            room,
            enemies: EnemyList::new(),
        }
    }
}

/// Owns the player and all enemies and advances them one tick at a time
#[derive(Debug)]
pub struct EntityManager {
    player: Option<Player>,
    /// Every enemy ever added; never shrinks
    enemies: Vec<Enemy>,
    current_room: RoomId,
    /// Working copy of the current room's bucket
    active: EnemyList,
    rooms: ArrayVec<RoomBucket, MAX_ROOMS>,
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new(RoomId::default())
    }
}

impl EntityManager {
    pub fn new(starting_room: RoomId) -> Self {
        let mut rooms = ArrayVec::new();
        rooms.push(RoomBucket::new(starting_room));

        Self {
            player: None,
            enemies: Vec::new(),
            current_room: starting_room,
            active: EnemyList::new(),
            rooms,
        }
    }

    // Player

    pub fn set_player(&mut self, player: Player) {
        self.player = Some(player);
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    // Enemies

    /// Register an enemy in the current room
    pub fn add_enemy(&mut self, enemy: Enemy) -> Option<EnemyId> {
        self.add_enemy_to(enemy, self.current_room)
    }

    /// Register an enemy in `room`. Enemies outside the current room start
    /// inactive. Returns `None` when the room or the room table is full.
    pub fn add_enemy_to(&mut self, mut enemy: Enemy, room: RoomId) -> Option<EnemyId> {
        let id = EnemyId(self.enemies.len());

        if room == self.current_room {
            if self.active.try_push(id).is_err() {
                log::debug!("{} is full, dropping enemy", room);
                return None;
            }
            enemy.entity_mut().set_active(true);
        } else {
            let Some(index) = self.bucket_index_or_create(room) else {
                log::debug!("Room table is full, dropping enemy for {}", room);
                return None;
            };
            if self.rooms[index].enemies.try_push(id).is_err() {
                log::debug!("{} is full, dropping enemy", room);
                return None;
            }
            enemy.entity_mut().set_active(false);
        }

        self.enemies.push(enemy);
        Some(id)
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(id.0)
    }

    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.get_mut(id.0)
    }

    /// Handles of the enemies in the current room
    pub fn active_ids(&self) -> &[EnemyId] {
        &self.active
    }

    /// Enemies in the current room
    pub fn active_enemies(&self) -> impl Iterator<Item = &Enemy> + '_ {
        self.active.iter().filter_map(|id| self.enemies.get(id.0))
    }

    /// Handles registered to `room`; empty for rooms never used
    pub fn room_enemies(&self, room: RoomId) -> &[EnemyId] {
        if room == self.current_room {
            return &self.active;
        }
        self.bucket_index(room)
            .map_or(&[][..], |index| &self.rooms[index].enemies[..])
    }

    /// Living enemies in the current room
    pub fn alive_enemy_count(&self) -> usize {
        self.active_enemies()
            .filter(|enemy| enemy.entity().is_alive())
            .count()
    }

    /// Enemies registered across all rooms
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// Deactivate and forget every enemy of the current room
    pub fn clear_enemies(&mut self) {
        for id in &self.active {
            if let Some(enemy) = self.enemies.get_mut(id.0) {
                enemy.entity_mut().set_active(false);
            }
        }
        self.active.clear();
    }

    // Rooms

    pub fn current_room(&self) -> RoomId {
        self.current_room
    }

    /// Park the current room's enemies and wake up those of `room`
    pub fn set_current_room(&mut self, room: RoomId) {
        if room == self.current_room {
            return;
        }

        let Some(target) = self.bucket_index_or_create(room) else {
            log::debug!("Room table is full, staying in {}", self.current_room);
            return;
        };

        for id in &self.active {
            if let Some(enemy) = self.enemies.get_mut(id.0) {
                enemy.entity_mut().set_active(false);
            }
        }
        if let Some(current) = self.bucket_index(self.current_room) {
            self.rooms[current].enemies = std::mem::take(&mut self.active);
        }

        self.active = self.rooms[target].enemies.clone();
        for id in &self.active {
            if let Some(enemy) = self.enemies.get_mut(id.0) {
                enemy.entity_mut().set_active(true);
            }
        }

        log::debug!(
            "Entered {} ({} enemies)",
            room,
            self.active.len()
        );
        self.current_room = room;
    }

    fn bucket_index(&self, room: RoomId) -> Option<usize> {
        self.rooms.iter().position(|bucket| bucket.room == room)
    }

    fn bucket_index_or_create(&mut self, room: RoomId) -> Option<usize> {
        if let Some(index) = self.bucket_index(room) {
            return Some(index);
        }
        self.rooms.try_push(RoomBucket::new(room)).ok()?;
        Some(self.rooms.len() - 1)
    }

    /// Snapshot of a target, or `None` if it does not exist in this room
    pub fn target_view(&self, target: ActorId) -> Option<TargetView> {
        match target {
            ActorId::Player => self.player.as_ref().map(|p| p.entity().view()),
            ActorId::Enemy(id) => self
                .enemies
                .get(id.0)
                .filter(|enemy| enemy.entity().is_active())
                .map(|enemy| enemy.entity().view()),
        }
    }

    // Pipeline

    /// Advance one tick: actors, player attacks, enemy attacks, bumps
    pub fn update(&mut self, world: Option<&dyn CollisionQuery>, sink: &mut dyn DamageSink) {
        self.advance(world);
        self.resolve_player_attacks(sink);
        self.resolve_enemy_attacks(sink);
        self.resolve_bumps(world);
    }

    fn advance(&mut self, world: Option<&dyn CollisionQuery>) {
        if let Some(player) = self.player.as_mut() {
            player.update(world);
        }

        for i in 0..self.active.len() {
            let id = self.active[i];
            let target = self
                .enemies
                .get(id.0)
                .and_then(|enemy| enemy.target())
                .and_then(|target| self.target_view(target));

            if let Some(enemy) = self.enemies.get_mut(id.0) {
                enemy.update(target, world);
            }
        }
    }

    fn resolve_player_attacks(&mut self, sink: &mut dyn DamageSink) {
        let Some(player) = self.player.as_ref() else {
            return;
        };
        let attacker = player.entity();
        if !attacker.is_alive() || !attacker.animation().is_attacking() {
            return;
        }

        for id in &self.active {
            let Some(enemy) = self.enemies.get_mut(id.0) else {
                continue;
            };
            if enemy.entity().is_alive() && attacker.attack_hits(enemy.entity()) {
                enemy.receive_hit(attacker.damage(), attacker.position(), sink);
            }
        }
    }

    fn resolve_enemy_attacks(&mut self, sink: &mut dyn DamageSink) {
        let Some(player) = self.player.as_mut() else {
            return;
        };

        for id in &self.active {
            let Some(enemy) = self.enemies.get(id.0) else {
                continue;
            };
            let attacker = enemy.entity();
            if !attacker.is_alive() || !attacker.animation().is_attacking() {
                continue;
            }
            if attacker.attack_hits(player.entity()) {
                player.receive_hit(attacker.damage(), attacker.position(), sink);
            }
        }
    }

    fn resolve_bumps(&mut self, world: Option<&dyn CollisionQuery>) {
        if let Some(player) = self.player.as_mut() {
            for id in &self.active {
                if let Some(enemy) = self.enemies.get_mut(id.0) {
                    separate(player.entity_mut(), enemy.entity_mut(), world);
                }
            }
        }

        for i in 0..self.active.len() {
            for j in (i + 1)..self.active.len() {
                let (a, b) = (self.active[i].0, self.active[j].0);
                if let Some((first, second)) = pair_mut(&mut self.enemies, a, b) {
                    separate(first.entity_mut(), second.entity_mut(), world);
                }
            }
        }
    }
}

/// Push two overlapping live entities apart along the cheaper axis, half
/// the penetration each. Equal depths resolve vertically.
fn separate(a: &mut Entity, b: &mut Entity, world: Option<&dyn CollisionQuery>) {
    if !a.is_alive() || !b.is_alive() {
        return;
    }
    let Some(depth) = penetration(a.hurt_box(), a.position(), b.hurt_box(), b.position()) else {
        return;
    };

    let delta = b.hurt_box().center(b.position()) - a.hurt_box().center(a.position());
    let push = if depth.x < depth.y {
        let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
        Vec2::new(sign * depth.x / 2.0, 0.0)
    } else {
        let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
        Vec2::new(0.0, sign * depth.y / 2.0)
    };

    a.move_by(-push, world);
    b.move_by(push, world);
}

/// Two distinct mutable elements of a slice
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b || a.max(b) >= items.len() {
        return None;
    }
    if a < b {
        let (left, right) = items.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = items.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::player::ControlState;
    use crate::game::characters::stats::{ActorStats, ENEMY_BEHAVIOR};
    use crate::game::combat::{DamageNumbers, Hitbox, NullDamageSink};
    use crate::game::world::TileMap;
    use approx::assert_relative_eq;

    const OTHER_ROOM: RoomId = RoomId(7);

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::new(Vec2::new(x, y))
    }

    fn position_of(manager: &EntityManager, id: Option<EnemyId>) -> Option<Vec2> {
        id.and_then(|id| manager.enemy(id))
            .map(|e| e.entity().position())
    }

    #[test]
    fn test_add_enemy_to_current_room() {
        let mut manager = EntityManager::default();
        let id = manager.add_enemy(enemy_at(0.0, 0.0));
        assert_eq!(id, Some(EnemyId(0)));
        assert_eq!(manager.active_ids(), &[EnemyId(0)]);
        assert!(manager.enemy(EnemyId(0)).unwrap().entity().is_active());
    }

    #[test]
    fn test_add_enemy_to_other_room_starts_inactive() {
        let mut manager = EntityManager::default();
        let id = manager.add_enemy_to(enemy_at(0.0, 0.0), OTHER_ROOM);
        assert!(id.is_some());
        assert!(manager.active_ids().is_empty());
        assert_eq!(manager.room_enemies(OTHER_ROOM).len(), 1);
        assert!(!manager.active_enemies().any(|_| true));
        assert!(!manager.enemy(id.unwrap()).unwrap().entity().is_active());
    }

    #[test]
    fn test_room_capacity_drops_excess() {
        let mut manager = EntityManager::default();
        for _ in 0..MAX_ENEMIES_PER_ROOM {
            assert!(manager.add_enemy(enemy_at(0.0, 0.0)).is_some());
        }
        assert!(manager.add_enemy(enemy_at(0.0, 0.0)).is_none());
        assert_eq!(manager.active_ids().len(), MAX_ENEMIES_PER_ROOM);
        assert_eq!(manager.enemy_count(), MAX_ENEMIES_PER_ROOM);
    }

    #[test]
    fn test_room_table_capacity() {
        let mut manager = EntityManager::default();
        // The starting room already owns one bucket
        for room in 1..MAX_ROOMS as u8 {
            assert!(manager.add_enemy_to(enemy_at(0.0, 0.0), RoomId(room)).is_some());
        }
        assert!(manager
            .add_enemy_to(enemy_at(0.0, 0.0), RoomId(MAX_ROOMS as u8))
            .is_none());

        manager.set_current_room(RoomId(200));
        assert_eq!(manager.current_room(), RoomId::default());
    }

    #[test]
    fn test_room_round_trip() {
        let mut manager = EntityManager::default();
        let a1 = manager.add_enemy(enemy_at(-10.0, 0.0));
        let a2 = manager.add_enemy(enemy_at(10.0, 0.0));
        let b1 = manager.add_enemy_to(enemy_at(0.0, 20.0), OTHER_ROOM);
        let before: Vec<EnemyId> = manager.active_ids().to_vec();

        manager.set_current_room(OTHER_ROOM);
        assert_eq!(manager.current_room(), OTHER_ROOM);
        assert_eq!(manager.active_ids().to_vec(), b1.into_iter().collect::<Vec<_>>());
        for id in [a1, a2].into_iter().flatten() {
            assert!(!manager.enemy(id).unwrap().entity().is_active());
        }
        assert_eq!(manager.room_enemies(RoomId::default()), &before[..]);

        manager.set_current_room(RoomId::default());
        assert_eq!(manager.active_ids(), &before[..]);
        for id in &before {
            assert!(manager.enemy(*id).unwrap().entity().is_active());
        }
        assert!(!manager.enemy(b1.unwrap()).unwrap().entity().is_active());
    }

    #[test]
    fn test_set_same_room_is_noop() {
        let mut manager = EntityManager::default();
        manager.add_enemy(enemy_at(0.0, 0.0));
        manager.set_current_room(RoomId::default());
        assert_eq!(manager.active_ids().len(), 1);
    }

    #[test]
    fn test_clear_enemies() {
        let mut manager = EntityManager::default();
        let id = manager.add_enemy(enemy_at(0.0, 0.0));
        manager.clear_enemies();
        assert!(manager.active_ids().is_empty());
        assert_eq!(manager.alive_enemy_count(), 0);
        assert!(!manager.enemy(id.unwrap()).unwrap().entity().is_active());
    }

    #[test]
    fn test_inactive_room_is_frozen() {
        let mut manager = EntityManager::default();
        manager.set_player(Player::new(Vec2::ZERO));
        let mut far = enemy_at(30.0, 0.0);
        far.set_target(Some(ActorId::Player));
        let id = manager.add_enemy_to(far, OTHER_ROOM);

        for _ in 0..20 {
            manager.update(None, &mut NullDamageSink);
        }
        let enemy = id.and_then(|id| manager.enemy(id));
        assert_eq!(enemy.map(|e| e.entity().position()), Some(Vec2::new(30.0, 0.0)));
    }

    #[test]
    fn test_enemy_chases_player() {
        let mut manager = EntityManager::default();
        manager.set_player(Player::new(Vec2::ZERO));
        let mut enemy = enemy_at(40.0, 0.0);
        enemy.set_target(Some(ActorId::Player));
        let id = manager.add_enemy(enemy);

        manager.update(None, &mut NullDamageSink);
        let enemy = manager.enemy(id.unwrap()).unwrap();
        assert_relative_eq!(enemy.entity().position().x, 39.3);
    }

    #[test]
    fn test_player_attack_damages_once_per_swing() {
        let mut manager = EntityManager::default();
        manager.set_player(Player::new(Vec2::ZERO));
        // Hurt boxes touch; the attack box (8 px below the player) overlaps
        let id = manager.add_enemy(enemy_at(0.0, 12.0));

        let mut numbers = DamageNumbers::new();
        if let Some(player) = manager.player_mut() {
            player.set_controls(ControlState {
                attack: true,
                ..ControlState::default()
            });
        }
        for _ in 0..16 {
            manager.update(None, &mut numbers);
        }

        let health = id.and_then(|id| manager.enemy(id)).map(|e| e.entity().health());
        assert_eq!(health, Some(4));
        assert_eq!(numbers.len(), 1);
    }

    #[test]
    fn test_player_attack_is_reevaluated_every_tick() {
        let mut manager = EntityManager::default();
        manager.set_player(Player::new(Vec2::ZERO));
        let stats = ActorStats {
            max_health: 100,
            invuln_duration: 0,
            knockback_strength: 0.0,
            ..ActorStats::enemy()
        };
        let id = manager.add_enemy(Enemy::with_stats(Vec2::new(0.0, 12.0), &stats, ENEMY_BEHAVIOR));

        if let Some(player) = manager.player_mut() {
            player.set_controls(ControlState {
                attack: true,
                ..ControlState::default()
            });
        }
        for _ in 0..20 {
            manager.update(None, &mut NullDamageSink);
        }

        // One hit for each of the 15 ticks the swing is still playing after
        // the advance phase
        let health = id.and_then(|id| manager.enemy(id)).map(|e| e.entity().health());
        assert_eq!(health, Some(85));
    }

    #[test]
    fn test_enemy_attack_damages_player() {
        let mut manager = EntityManager::default();
        manager.set_player(Player::new(Vec2::ZERO));
        let mut enemy = enemy_at(0.0, 12.0);
        enemy.set_target(Some(ActorId::Player));
        manager.add_enemy(enemy);

        let mut numbers = DamageNumbers::new();
        for _ in 0..40 {
            manager.update(None, &mut numbers);
        }

        assert_eq!(manager.player().map(|p| p.entity().health()), Some(9));
        assert_eq!(numbers.len(), 1);
    }

    #[test]
    fn test_bump_separates_enemies() {
        let mut manager = EntityManager::default();
        let stats = ActorStats {
            hurt_box: Hitbox::centered(8.0, 8.0),
            ..ActorStats::enemy()
        };
        let a = manager.add_enemy(Enemy::with_stats(Vec2::ZERO, &stats, ENEMY_BEHAVIOR));
        let b = manager.add_enemy(Enemy::with_stats(Vec2::new(10.0, 0.0), &stats, ENEMY_BEHAVIOR));

        let ea = manager.enemy(a.unwrap()).unwrap();
        let eb = manager.enemy(b.unwrap()).unwrap();
        assert!(ea.entity().overlaps(eb.entity()));

        manager.update(None, &mut NullDamageSink);

        assert_eq!(position_of(&manager, a), Some(Vec2::new(-3.0, 0.0)));
        assert_eq!(position_of(&manager, b), Some(Vec2::new(13.0, 0.0)));

        // Now only touching: nothing moves
        manager.update(None, &mut NullDamageSink);
        assert_eq!(position_of(&manager, a), Some(Vec2::new(-3.0, 0.0)));
    }

    #[test]
    fn test_bump_tie_pushes_vertically() {
        let mut manager = EntityManager::default();
        let stats = ActorStats {
            hurt_box: Hitbox::centered(8.0, 8.0),
            ..ActorStats::enemy()
        };
        let a = manager.add_enemy(Enemy::with_stats(Vec2::ZERO, &stats, ENEMY_BEHAVIOR));
        let b = manager.add_enemy(Enemy::with_stats(Vec2::new(10.0, 10.0), &stats, ENEMY_BEHAVIOR));

        // 6 px deep on both axes
        manager.update(None, &mut NullDamageSink);

        assert_eq!(position_of(&manager, a), Some(Vec2::new(0.0, -3.0)));
        assert_eq!(position_of(&manager, b), Some(Vec2::new(10.0, 13.0)));
    }

    #[test]
    fn test_bump_respects_walls() {
        // Wall column at tile x = 2 (x in -16..-8)
        let mut map = TileMap::new(8, 8);
        for ty in 0..8 {
            map.set_solid(2, ty, true);
        }

        let mut manager = EntityManager::default();
        let pinned = manager.add_enemy(enemy_at(-2.0, 0.0));
        let free = manager.add_enemy(enemy_at(6.0, 0.0));

        manager.update(Some(&map), &mut NullDamageSink);

        // 4 px deep: the pinned one would put its left edge at x = -10
        assert_eq!(position_of(&manager, pinned), Some(Vec2::new(-2.0, 0.0)));
        assert_eq!(position_of(&manager, free), Some(Vec2::new(8.0, 0.0)));
    }

    #[test]
    fn test_bump_skips_dead_pairs() {
        let mut manager = EntityManager::default();
        let a = manager.add_enemy(enemy_at(0.0, 0.0));
        manager.add_enemy(enemy_at(4.0, 0.0));
        if let Some(enemy) = a.and_then(|id| manager.enemy_mut(id)) {
            enemy.entity_mut().take_damage_here(100, &mut NullDamageSink);
        }

        manager.update(None, &mut NullDamageSink);
        let positions: Vec<Vec2> = manager.active_enemies().map(|e| e.entity().position()).collect();
        // The dead one only moved by its own knockback
        assert_eq!(positions[1], Vec2::new(4.0, 0.0));
        assert_eq!(manager.alive_enemy_count(), 1);
    }

    #[test]
    fn test_dead_player_is_not_chased() {
        let mut manager = EntityManager::default();
        let mut player = Player::new(Vec2::ZERO);
        player.entity_mut().take_damage_here(100, &mut NullDamageSink);
        manager.set_player(player);

        let mut enemy = enemy_at(30.0, 0.0);
        enemy.set_target(Some(ActorId::Player));
        let id = manager.add_enemy(enemy);

        manager.update(None, &mut NullDamageSink);
        let enemy = id.and_then(|id| manager.enemy(id));
        assert_eq!(enemy.map(|e| e.velocity()), Some(Vec2::ZERO));
    }

    #[test]
    fn test_pair_mut() {
        let mut items = [1, 2, 3];
        if let Some((a, b)) = pair_mut(&mut items, 2, 0) {
            std::mem::swap(a, b);
        }
        assert_eq!(items, [3, 2, 1]);
        assert!(pair_mut(&mut items, 1, 1).is_none());
        assert!(pair_mut(&mut items, 0, 3).is_none());
    }
}
