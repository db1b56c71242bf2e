/// Game entity types and their per-frame motion.
///
/// Positions are kept as floats for smooth sub-unit movement; the integer
/// `Rect` used for drawing and collisions is derived by truncation.

use crate::config::GameConfig;
use crate::input::Directions;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Integer axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// True when the two rectangles share a non-empty area. Rectangles that
    /// only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Position and size shared by every entity kind. Size never changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub x: f64,
    pub y: f64,
    w: f64,
    h: f64,
}

impl Entity {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        debug_assert!(w > 0.0 && h > 0.0);
        Self { x, y, w, h }
    }

    pub fn width(&self) -> f64 {
        self.w
    }

    pub fn height(&self) -> f64 {
        self.h
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x as i32, self.y as i32, self.w as i32, self.h as i32)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Entity,
    pub speed: f64,
    /// Frames left before the next shot is allowed.
    pub cooldown: u32,
}

impl Player {
    /// A player at the round's start position.
    pub fn new(config: &GameConfig) -> Self {
        let (x, y) = config.player_start();
        Self::at(x, y, config)
    }

    pub fn at(x: f64, y: f64, config: &GameConfig) -> Self {
        Self {
            body: Entity::new(x, y, config.player.width, config.player.height),
            speed: config.player.speed,
            cooldown: 0,
        }
    }

    /// Move along every held direction (diagonals are not normalised), clamp
    /// to the screen, then tick the shot cooldown.
    pub fn handle_input(&mut self, dirs: Directions, config: &GameConfig) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if dirs.left {
            dx -= self.speed;
        }
        if dirs.right {
            dx += self.speed;
        }
        if dirs.up {
            dy -= self.speed;
        }
        if dirs.down {
            dy += self.speed;
        }

        let max_x = config.width - self.body.width();
        let max_y = config.height - self.body.height();
        self.body.x = (self.body.x + dx).min(max_x).max(0.0);
        self.body.y = (self.body.y + dy).min(max_y).max(0.0);

        self.cooldown = self.cooldown.saturating_sub(1);
    }

    pub fn can_shoot(&self) -> bool {
        self.cooldown == 0
    }

    /// Fire one bullet, centred above the player. Callers check
    /// `can_shoot` first.
    pub fn shoot(&mut self, config: &GameConfig) -> Bullet {
        self.cooldown = config.player.shoot_cooldown;
        let b = &config.bullet;
        let x = self.body.x + (self.body.width() / 2.0).floor() - (b.width / 2.0).floor();
        let y = self.body.y - b.spawn_offset;
        Bullet::new(x, y, b.width, b.height, b.vy)
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Entity,
    /// Downward speed, fixed at spawn.
    pub speed: f64,
}

impl Enemy {
    pub fn new(x: f64, y: f64, speed: f64, config: &GameConfig) -> Self {
        Self {
            body: Entity::new(x, y, config.enemy.width, config.enemy.height),
            speed,
        }
    }

    pub fn update(&mut self) {
        self.body.y += self.speed;
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub body: Entity,
    pub vy: f64,
}

impl Bullet {
    pub fn new(x: f64, y: f64, w: f64, h: f64, vy: f64) -> Self {
        Self {
            body: Entity::new(x, y, w, h),
            vy,
        }
    }

    pub fn update(&mut self) {
        self.body.y += self.vy;
    }
}
