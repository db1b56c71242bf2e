/// Rendering layer.
///
/// The game never talks to a concrete screen: everything is drawn through
/// the `Renderer` trait in logical screen units. `terminal` holds the
/// crossterm implementation.

use std::io;

use serde::{Deserialize, Serialize};

use crate::assets::{
    AssetLoader, Sprite, BACKGROUND_SPRITE, BULLET_SPRITE, ENEMY_SPRITE, PLAYER_SPRITE,
};
use crate::compute::Session;
use crate::config::GameConfig;
use crate::entities::{Bullet, Enemy, Player, Rect};

pub mod terminal;

/// 24-bit colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// `x` is the left edge of the text.
    Left,
    /// `x` is the horizontal centre of the text.
    Center,
}

/// A surface that can draw rectangles, sprites and text, then show the frame.
pub trait Renderer {
    fn clear(&mut self, color: Rgb) -> io::Result<()>;
    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> io::Result<()>;
    /// Draw only the border of `rect`, `width` logical units thick.
    fn outline_rect(&mut self, rect: Rect, color: Rgb, width: f64) -> io::Result<()>;
    /// Stretch `sprite` over `rect`.
    fn blit(&mut self, sprite: &Sprite, rect: Rect) -> io::Result<()>;
    fn text(&mut self, text: &str, x: f64, y: f64, color: Rgb, align: Align) -> io::Result<()>;
    fn present(&mut self) -> io::Result<()>;
}

// ── Drawable entities ─────────────────────────────────────────────────────────

/// Something with bounds that knows how to draw itself, falling back to a
/// plain coloured rectangle when its sprite is missing.
pub trait Drawable {
    fn bounds(&self) -> Rect;
    fn draw<R: Renderer, A: AssetLoader + ?Sized>(
        &self,
        out: &mut R,
        assets: &A,
        config: &GameConfig,
    ) -> io::Result<()>;
}

fn sprite_or_fill<R: Renderer, A: AssetLoader + ?Sized>(
    out: &mut R,
    assets: &A,
    name: &str,
    rect: Rect,
    fill: Rgb,
) -> io::Result<()> {
    match assets.load(name, (rect.w.max(0) as u32, rect.h.max(0) as u32)) {
        Some(sprite) => out.blit(&sprite, rect),
        None => out.fill_rect(rect, fill),
    }
}

impl Drawable for Player {
    fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    fn draw<R: Renderer, A: AssetLoader + ?Sized>(
        &self,
        out: &mut R,
        assets: &A,
        config: &GameConfig,
    ) -> io::Result<()> {
        let p = &config.palette;
        let rect = self.bounds();
        sprite_or_fill(out, assets, PLAYER_SPRITE, rect, p.player)?;
        out.outline_rect(rect, p.player_outline, p.outline_width)
    }
}

impl Drawable for Enemy {
    fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    fn draw<R: Renderer, A: AssetLoader + ?Sized>(
        &self,
        out: &mut R,
        assets: &A,
        config: &GameConfig,
    ) -> io::Result<()> {
        let p = &config.palette;
        let rect = self.bounds();
        sprite_or_fill(out, assets, ENEMY_SPRITE, rect, p.enemy)?;
        out.outline_rect(rect, p.enemy_outline, p.outline_width)
    }
}

impl Drawable for Bullet {
    fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    // Bullets are too small for an outline.
    fn draw<R: Renderer, A: AssetLoader + ?Sized>(
        &self,
        out: &mut R,
        assets: &A,
        config: &GameConfig,
    ) -> io::Result<()> {
        sprite_or_fill(out, assets, BULLET_SPRITE, self.bounds(), config.palette.bullet)
    }
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_background<R: Renderer, A: AssetLoader + ?Sized>(
    out: &mut R,
    assets: &A,
    config: &GameConfig,
) -> io::Result<()> {
    out.clear(config.palette.background)?;
    let screen = Rect::new(0, 0, config.width as i32, config.height as i32);
    if let Some(bg) = assets.load(BACKGROUND_SPRITE, (screen.w as u32, screen.h as u32)) {
        out.blit(&bg, screen)?;
    }
    Ok(())
}

/// Render one frame of a running round.
pub fn render_play<R: Renderer, A: AssetLoader + ?Sized>(
    out: &mut R,
    session: &Session,
    assets: &A,
    config: &GameConfig,
) -> io::Result<()> {
    draw_background(out, assets, config)?;

    session.player.draw(out, assets, config)?;
    for bullet in &session.bullets {
        bullet.draw(out, assets, config)?;
    }
    for enemy in &session.enemies {
        enemy.draw(out, assets, config)?;
    }

    out.text(
        &format!("Score: {}", session.score),
        10.0,
        10.0,
        config.palette.hud_text,
        Align::Left,
    )?;
    out.present()
}

/// Render the idle screen shown between rounds.
pub fn render_game_over<R: Renderer, A: AssetLoader + ?Sized>(
    out: &mut R,
    score: u64,
    assets: &A,
    config: &GameConfig,
) -> io::Result<()> {
    draw_background(out, assets, config)?;

    let p = &config.palette;
    let cx = (config.width / 2.0).floor();
    let cy = (config.height / 2.0).floor();
    out.text("GAME OVER", cx, cy - 50.0, p.game_over_title, Align::Center)?;
    out.text(&format!("Score: {score}"), cx, cy + 20.0, p.hud_text, Align::Center)?;
    out.text(
        "SPACE - Play again  |  ESC - Quit",
        cx,
        cy + 100.0,
        p.hint_text,
        Align::Center,
    )?;
    out.present()
}
