#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use fantasy_fighter::assets::{AssetLoader, Sprite};
use fantasy_fighter::controller::FrameClock;
use fantasy_fighter::display::{Align, Renderer, Rgb};
use fantasy_fighter::entities::Rect;
use fantasy_fighter::input::{FrameInput, InputSource};

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear(Rgb),
    Fill(Rect, Rgb),
    Outline(Rect, Rgb),
    Blit(Rect),
    Text(String, Rgb, Align),
    Present,
}

/// Renderer that just remembers what it was asked to draw.
#[derive(Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
}

impl Recorder {
    pub fn presents(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::Present).count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(t, ..) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for Recorder {
    fn clear(&mut self, color: Rgb) -> io::Result<()> {
        self.ops.push(Op::Clear(color));
        Ok(())
    }
    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> io::Result<()> {
        self.ops.push(Op::Fill(rect, color));
        Ok(())
    }
    fn outline_rect(&mut self, rect: Rect, color: Rgb, _width: f64) -> io::Result<()> {
        self.ops.push(Op::Outline(rect, color));
        Ok(())
    }
    fn blit(&mut self, _sprite: &Sprite, rect: Rect) -> io::Result<()> {
        self.ops.push(Op::Blit(rect));
        Ok(())
    }
    fn text(&mut self, text: &str, _x: f64, _y: f64, color: Rgb, align: Align) -> io::Result<()> {
        self.ops.push(Op::Text(text.to_string(), color, align));
        Ok(())
    }
    fn present(&mut self) -> io::Result<()> {
        self.ops.push(Op::Present);
        Ok(())
    }
}

/// Only the named sprites exist.
pub struct SomeAssets(pub &'static [&'static str]);

impl AssetLoader for SomeAssets {
    fn load(&self, name: &str, size: (u32, u32)) -> Option<Sprite> {
        if self.0.iter().any(|n| *n == name) {
            Sprite::from_text("#", size)
        } else {
            None
        }
    }
}

/// Plays back a fixed list of frames, then asks to quit forever.
pub struct Scripted(pub VecDeque<FrameInput>);

impl InputSource for Scripted {
    fn poll(&mut self) -> anyhow::Result<FrameInput> {
        Ok(self.0.pop_front().unwrap_or(FrameInput {
            quit: true,
            ..Default::default()
        }))
    }
}

/// Never sleeps; records the frame rates it was asked for.
#[derive(Default)]
pub struct InstantClock {
    pub rates: Vec<u32>,
}

impl FrameClock for InstantClock {
    fn wait(&mut self, fps: u32) {
        self.rates.push(fps);
    }
}
