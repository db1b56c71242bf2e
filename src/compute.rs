/// The simulation of one round.
///
/// `Session` owns every live entity. The controller feeds it one
/// `FrameInput` per frame through `tick`; all randomness comes through the
/// injected RNG so a seeded generator replays a round exactly.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bullet, Enemy, Player};
use crate::input::FrameInput;

#[derive(Clone, Debug)]
pub struct Session {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    pub spawn_timer: i32,
    active: bool,
}

impl Session {
    /// A fresh round: player at the start position, nothing else on screen.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            player: Player::new(config),
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            spawn_timer: config.spawn.initial_timer,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the round by one frame and report whether it is still
    /// running. Once the round has ended further calls do nothing.
    pub fn tick(&mut self, input: &FrameInput, config: &GameConfig, rng: &mut impl Rng) -> bool {
        if !self.active {
            return false;
        }

        // ── 0. Fire (press edge, gated by the cooldown) ──────────────────────
        if input.fire && self.player.can_shoot() {
            let bullet = self.player.shoot(config);
            self.bullets.push(bullet);
        }

        // ── 1. Move the player ───────────────────────────────────────────────
        self.player.handle_input(input.directions, config);

        // ── 2. Spawn ─────────────────────────────────────────────────────────
        self.spawn_timer -= 1;
        if self.spawn_timer <= 0 {
            self.spawn_enemy(config, rng);
            self.spawn_timer = config.spawn_interval(self.score);
        }

        // ── 3. Bullets fly; drop the ones past the top ───────────────────────
        let top = config.bullet.remove_above;
        self.bullets.retain_mut(|b| {
            b.update();
            b.body.y >= top
        });

        // ── 4. Enemies fall; drop the ones past the bottom ───────────────────
        let bottom = config.height;
        self.enemies.retain_mut(|e| {
            e.update();
            e.body.y <= bottom
        });

        // ── 5. Bullets vs enemies ────────────────────────────────────────────
        // Each bullet claims the first live enemy it overlaps. The enemy is
        // removed immediately so later bullets can't claim it again.
        let mut survivors = Vec::with_capacity(self.bullets.len());
        for bullet in std::mem::take(&mut self.bullets) {
            let rect = bullet.body.bounds();
            match self.enemies.iter().position(|e| e.body.bounds().overlaps(&rect)) {
                Some(hit) => {
                    self.enemies.remove(hit);
                    self.score += 1;
                    tracing::debug!(score = self.score, "enemy destroyed");
                }
                None => survivors.push(bullet),
            }
        }
        self.bullets = survivors;

        // ── 6. Enemies vs player ─────────────────────────────────────────────
        let player_rect = self.player.body.bounds();
        if self.enemies.iter().any(|e| e.body.bounds().overlaps(&player_rect)) {
            self.active = false;
            tracing::info!(score = self.score, "player hit, round over");
        }

        self.active
    }

    fn spawn_enemy(&mut self, config: &GameConfig, rng: &mut impl Rng) {
        let x = rng.gen_range(0..=config.enemy_spawn_max_x()) as f64;
        let speed = rng.gen_range(config.enemy.min_speed..=config.enemy.max_speed);
        tracing::trace!(x, speed, "enemy spawned");
        self.enemies.push(Enemy::new(x, config.enemy.spawn_y, speed, config));
    }
}
