/// Sprite lookup with graceful fallback.
///
/// On a terminal an "image" is a text file of character art,
/// `<assets_dir>/<name>.txt`. A missing, unreadable or blank file simply
/// means "no sprite"; callers then draw a plain coloured rectangle.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const PLAYER_SPRITE: &str = "player";
pub const ENEMY_SPRITE: &str = "enemy";
pub const BULLET_SPRITE: &str = "bullet";
pub const BACKGROUND_SPRITE: &str = "background";

/// Loaded character art, shared cheaply between every entity that uses it.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    art: Rc<Vec<Vec<char>>>,
    /// Logical size the sprite was requested at.
    pub size: (u32, u32),
}

impl Sprite {
    /// Build a sprite from lines of art. Returns `None` if there is nothing
    /// visible to draw.
    pub fn from_text(text: &str, size: (u32, u32)) -> Option<Self> {
        let art: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end().chars().collect())
            .collect();
        let art_width = art.iter().map(Vec::len).max().unwrap_or(0);
        if art_width == 0 || size.0 == 0 || size.1 == 0 {
            return None;
        }
        Some(Self {
            art: Rc::new(art),
            size,
        })
    }

    pub fn rows(&self) -> usize {
        self.art.len()
    }

    pub fn cols(&self) -> usize {
        self.art.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Character at `(u, v)` in `[0, 1)` texture space, nearest neighbour.
    /// Short lines are padded with spaces.
    pub fn sample(&self, u: f64, v: f64) -> char {
        let row = ((v.clamp(0.0, 1.0) * self.rows() as f64) as usize).min(self.rows() - 1);
        let col = ((u.clamp(0.0, 1.0) * self.cols() as f64) as usize).min(self.cols() - 1);
        self.art[row].get(col).copied().unwrap_or(' ')
    }
}

/// Resolves a sprite name to an optional image. Never fails.
pub trait AssetLoader {
    fn load(&self, name: &str, size: (u32, u32)) -> Option<Sprite>;
}

/// A loader with no images at all; everything draws as fallback colours.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAssets;

impl AssetLoader for NoAssets {
    fn load(&self, _name: &str, _size: (u32, u32)) -> Option<Sprite> {
        None
    }
}

/// Loads `<dir>/<name>.txt`, remembering each result (hit or miss) so a file
/// is read at most once per requested size.
#[derive(Debug)]
pub struct FileAssets {
    dir: PathBuf,
    cache: RefCell<HashMap<(String, (u32, u32)), Option<Sprite>>>,
}

impl FileAssets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, name: &str, size: (u32, u32)) -> Option<Sprite> {
        let path = self.dir.join(format!("{name}.txt"));
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                let sprite = Sprite::from_text(&text, size);
                if sprite.is_none() {
                    tracing::debug!(path = %path.display(), "sprite file is blank, using fallback");
                }
                sprite
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "no sprite, using fallback");
                None
            }
        }
    }
}

impl AssetLoader for FileAssets {
    fn load(&self, name: &str, size: (u32, u32)) -> Option<Sprite> {
        let key = (name.to_string(), size);
        if let Some(cached) = self.cache.borrow().get(&key) {
            return cached.clone();
        }
        let sprite = self.read(name, size);
        self.cache.borrow_mut().insert(key, sprite.clone());
        sprite
    }
}
