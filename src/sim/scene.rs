//! Decorative background scenes and the fade between them
//!
//! Decorations are a pure function of time so the renderer can rebuild them
//! every frame without keeping any state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Background theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SceneKind {
    #[default]
    Stars,
    Leaves,
    Embers,
}

/// A single decorative sprite: an axis-aligned ellipse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub center: Vec2,
    pub half_size: Vec2,
    pub color: [u8; 3],
}

impl Decoration {
    fn dot(center: Vec2, radius: f32, color: [u8; 3]) -> Self {
        Self {
            center,
            half_size: Vec2::splat(radius),
            color,
        }
    }
}

const STAR_COUNT: i32 = 25;
const LEAF_COUNT: i32 = 12;
const EMBER_COUNT: i32 = 20;

impl SceneKind {
    pub const ALL: [SceneKind; 3] = [SceneKind::Stars, SceneKind::Leaves, SceneKind::Embers];

    /// Next scene in the cycle
    pub fn next(self) -> Self {
        match self {
            SceneKind::Stars => SceneKind::Leaves,
            SceneKind::Leaves => SceneKind::Embers,
            SceneKind::Embers => SceneKind::Stars,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            SceneKind::Stars => 0,
            SceneKind::Leaves => 1,
            SceneKind::Embers => 2,
        }
    }

    pub fn background(self) -> [u8; 3] {
        match self {
            SceneKind::Stars => [12, 18, 30],
            SceneKind::Leaves => [8, 40, 20],
            SceneKind::Embers => [30, 12, 18],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Stars => "Stars",
            SceneKind::Leaves => "Leaves",
            SceneKind::Embers => "Embers",
        }
    }

    /// Decorations at time `t` (seconds) for a playfield of `width` x `height` pixels
    pub fn decorations(self, t: f32, width: i32, height: i32) -> Vec<Decoration> {
        let (w, h) = (width.max(1), height.max(1));
        match self {
            SceneKind::Stars => (0..STAR_COUNT)
                .map(|i| {
                    let x = (i * 47 + (t * 30.0) as i32).rem_euclid(w);
                    let sway = (((i as f32 + t) * 0.3).sin() * 20.0) as i32;
                    let y = (i * 71 + sway).rem_euclid(h);
                    let color = if i % 7 == 0 { [200, 220, 255] } else { [150, 180, 220] };
                    Decoration::dot(Vec2::new(x as f32, y as f32), 1.0, color)
                })
                .collect(),
            SceneKind::Leaves => (0..LEAF_COUNT)
                .map(|i| {
                    let x = (i * 120 + (t * 10.0) as i32).rem_euclid(w) as f32;
                    let y = (50.0 + (i * 23) as f32 + (t * 0.5 + i as f32).sin() * 20.0)
                        .rem_euclid(h as f32);
                    Decoration {
                        center: Vec2::new(x + 3.0, y + 1.5),
                        half_size: Vec2::new(3.0, 1.5),
                        color: [30, 100, 40],
                    }
                })
                .collect(),
            SceneKind::Embers => (0..EMBER_COUNT)
                .map(|i| {
                    let x = (i * 83 + (t * 50.0) as i32).rem_euclid(w);
                    let lift = 10.0 + (i * 3) as f32 + (t * 0.8 + i as f32).sin().abs();
                    let y = h as f32 - lift;
                    let color = if i % 3 == 0 { [255, 140, 60] } else { [200, 80, 40] };
                    Decoration::dot(Vec2::new(x as f32, y.floor()), 2.0, color)
                })
                .collect(),
        }
    }
}

/// Black overlay that fades in after a scene change
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fade {
    alpha: f32,
    active: bool,
}

impl Fade {
    /// Alpha gained per millisecond
    const RATE: f32 = 1.0 / 4.0;

    pub fn start(&mut self) {
        self.alpha = 0.0;
        self.active = true;
    }

    pub fn update(&mut self, dt_ms: f32) {
        if !self.active {
            return;
        }
        self.alpha += dt_ms * Self::RATE;
        if self.alpha >= 255.0 {
            self.alpha = 255.0;
            self.active = false;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Overlay opacity in [0, 1]; zero once the transition has finished
    pub fn opacity(&self) -> f32 {
        if self.active { self.alpha / 255.0 } else { 0.0 }
    }
}
