mod common;

use common::{Op, Recorder, SomeAssets};

use fantasy_fighter::assets::NoAssets;
use fantasy_fighter::compute::Session;
use fantasy_fighter::display::terminal::{CellSpan, TerminalRenderer};
use fantasy_fighter::display::*;
use fantasy_fighter::entities::{Bullet, Enemy, Rect};
use fantasy_fighter::GameConfig;

fn busy_session(cfg: &GameConfig) -> Session {
    let mut s = Session::new(cfg);
    s.score = 3;
    s.bullets.push(Bullet::new(10.0, 20.0, 20.0, 20.0, -7.0));
    s.enemies.push(Enemy::new(300.0, 40.0, 2.0, cfg));
    s
}

#[test]
fn play_frame_falls_back_to_colours() {
    let cfg = GameConfig::default();
    let p = &cfg.palette;
    let mut out = Recorder::default();
    render_play(&mut out, &busy_session(&cfg), &NoAssets, &cfg).unwrap();

    let player = Rect::new(435, 550, 130, 130);
    let bullet = Rect::new(10, 20, 20, 20);
    let enemy = Rect::new(300, 40, 100, 100);
    assert_eq!(
        out.ops,
        vec![
            Op::Clear(p.background),
            Op::Fill(player, p.player),
            Op::Outline(player, p.player_outline),
            Op::Fill(bullet, p.bullet),
            Op::Fill(enemy, p.enemy),
            Op::Outline(enemy, p.enemy_outline),
            Op::Text("Score: 3".into(), p.hud_text, Align::Left),
            Op::Present,
        ]
    );
}

#[test]
fn sprites_replace_fill_but_keep_outline() {
    let cfg = GameConfig::default();
    let mut out = Recorder::default();
    let assets = SomeAssets(&["player", "background"]);
    render_play(&mut out, &Session::new(&cfg), &assets, &cfg).unwrap();

    let player = Rect::new(435, 550, 130, 130);
    assert_eq!(out.ops[1], Op::Blit(Rect::new(0, 0, 1000, 700)));
    assert_eq!(out.ops[2], Op::Blit(player));
    assert_eq!(out.ops[3], Op::Outline(player, cfg.palette.player_outline));
}

#[test]
fn game_over_screen_shows_score_and_hint() {
    let cfg = GameConfig::default();
    let mut out = Recorder::default();
    render_game_over(&mut out, 17, &NoAssets, &cfg).unwrap();
    assert_eq!(
        out.texts(),
        vec!["GAME OVER", "Score: 17", "SPACE - Play again  |  ESC - Quit"]
    );
    assert_eq!(out.presents(), 1);
}

#[test]
fn drawable_bounds_match_entities() {
    let cfg = GameConfig::default();
    let s = busy_session(&cfg);
    assert_eq!(s.player.bounds(), s.player.body.bounds());
    assert_eq!(s.enemies[0].bounds(), Rect::new(300, 40, 100, 100));
}

// ── Terminal ──────────────────────────────────────────────────────────────────

#[test]
fn rects_map_onto_cells() {
    let cfg = GameConfig::default();
    let term = TerminalRenderer::with_size(Vec::new(), 100, 70, &cfg);
    assert_eq!(
        term.cells(Rect::new(0, 0, 1000, 700)),
        Some(CellSpan { col0: 0, row0: 0, col1: 100, row1: 70 })
    );
    assert_eq!(
        term.cells(Rect::new(435, 550, 130, 130)),
        Some(CellSpan { col0: 43, row0: 55, col1: 56, row1: 68 })
    );
}

#[test]
fn partly_visible_rects_are_clipped() {
    let cfg = GameConfig::default();
    let term = TerminalRenderer::with_size(Vec::new(), 100, 70, &cfg);
    assert_eq!(
        term.cells(Rect::new(-50, -30, 100, 100)),
        Some(CellSpan { col0: 0, row0: 0, col1: 5, row1: 7 })
    );
    assert_eq!(
        term.cells(Rect::new(950, 690, 100, 100)),
        Some(CellSpan { col0: 95, row0: 69, col1: 100, row1: 70 })
    );
}

#[test]
fn off_screen_rects_draw_nothing() {
    let cfg = GameConfig::default();
    let term = TerminalRenderer::with_size(Vec::new(), 100, 70, &cfg);
    assert_eq!(term.cells(Rect::new(0, -200, 100, 100)), None);
    assert_eq!(term.cells(Rect::new(1000, 0, 100, 100)), None);
}

#[test]
fn tiny_rects_still_cover_a_cell() {
    let cfg = GameConfig::default();
    let term = TerminalRenderer::with_size(Vec::new(), 80, 24, &cfg);
    let span = term.cells(Rect::new(500, 350, 1, 1)).unwrap();
    assert_eq!((span.col1 - span.col0, span.row1 - span.row0), (1, 1));
}

#[test]
fn terminal_frame_is_written_and_flushed() {
    let cfg = GameConfig::default();
    let mut term = TerminalRenderer::with_size(Vec::new(), 80, 24, &cfg);
    render_play(&mut term, &busy_session(&cfg), &SomeAssets(&["enemy"]), &cfg).unwrap();
    let bytes = term.into_inner();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("Score: 3"));
    assert!(text.contains('#'));
}
