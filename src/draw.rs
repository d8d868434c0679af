//! Per-tick draw list
//!
//! The simulation never renders. Each tick it fills a `DrawQueue` with
//! sprite and rectangle descriptors that the host renderer consumes at
//! the end of the frame.

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::consts::*;

/// RGBA color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const ENERGY_BAR_BORDER: Color = Color::rgba(0, 0, 0, 255);
    pub const ENERGY_BAR_FILL: Color = Color::rgba(0, 0, 255, 128);
}

/// A single primitive for the host renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "primitive", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Textured quad; `angle` in degrees
    Sprite {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        path: String,
        angle: Option<f32>,
    },
    /// Rectangle outline
    Border {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    /// Filled rectangle
    Solid {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
}

/// Draw commands emitted during one tick, in paint order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawQueue {
    commands: Vec<DrawCommand>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop last frame's commands, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of sprites using the given asset
    pub fn count_sprites(&self, asset: &str) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { path, .. } if path == asset))
            .count()
    }

    /// Serialize the frame for hosts that consume JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Ship sprite, rotated so the nose follows `rotation` (degrees)
pub fn ship(queue: &mut DrawQueue, location: Point, rotation: f32) {
    queue.push(DrawCommand::Sprite {
        x: location.x,
        y: location.y,
        w: SHIP_SIZE,
        h: SHIP_SIZE,
        path: SHIP_SPRITE.to_string(),
        angle: Some(rotation - SHIP_SPRITE_ANGLE_OFFSET),
    });
}

/// Energy bar: outline box plus an inner fill scaled by `fraction`
pub fn energy_bar(queue: &mut DrawQueue, fraction: f32) {
    let inner_width = ENERGY_BAR_WIDTH - ENERGY_BAR_MARGIN * 2.0;
    // NaN-safe: max/min drop NaN in favor of the bound
    let fill_width = (inner_width * fraction).max(0.0).min(inner_width);

    queue.push(DrawCommand::Border {
        x: ENERGY_BAR_X,
        y: ENERGY_BAR_Y,
        w: ENERGY_BAR_WIDTH,
        h: ENERGY_BAR_HEIGHT,
        color: colors::ENERGY_BAR_BORDER,
    });
    queue.push(DrawCommand::Solid {
        x: ENERGY_BAR_X + ENERGY_BAR_MARGIN,
        y: ENERGY_BAR_Y + ENERGY_BAR_MARGIN,
        w: fill_width,
        h: ENERGY_BAR_HEIGHT - ENERGY_BAR_MARGIN * 2.0,
        color: colors::ENERGY_BAR_FILL,
    });
}

/// Pickup star sprite
pub fn pickup(queue: &mut DrawQueue, location: Point) {
    queue.push(DrawCommand::Sprite {
        x: location.x,
        y: location.y,
        w: PICKUP_SIZE,
        h: PICKUP_SIZE,
        path: PICKUP_SPRITE.to_string(),
        angle: None,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn fill_width(queue: &DrawQueue) -> f32 {
        match queue.commands().last() {
            Some(DrawCommand::Solid { w, .. }) => *w,
            other => panic!("expected solid fill, got {:?}", other),
        }
    }

    #[test]
    fn test_ship_sprite_offsets_rotation() {
        let mut queue = DrawQueue::new();
        ship(&mut queue, Vec2::new(640.0, 360.0), 30.0);
        assert_eq!(queue.len(), 1);
        match &queue.commands()[0] {
            DrawCommand::Sprite { x, y, w, h, path, angle } => {
                assert_eq!((*x, *y, *w, *h), (640.0, 360.0, 20.0, 20.0));
                assert_eq!(path, SHIP_SPRITE);
                assert_eq!(*angle, Some(-60.0));
            }
            other => panic!("expected sprite, got {:?}", other),
        }
    }

    #[test]
    fn test_energy_bar_layout() {
        let mut queue = DrawQueue::new();
        energy_bar(&mut queue, 0.5);
        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.commands()[0],
            DrawCommand::Border {
                x: 20.0,
                y: 20.0,
                w: 400.0,
                h: 30.0,
                color: colors::ENERGY_BAR_BORDER,
            }
        );
        match &queue.commands()[1] {
            DrawCommand::Solid { x, y, w, h, color } => {
                assert_eq!((*x, *y, *h), (23.0, 23.0, 24.0));
                assert_eq!(*w, 197.0);
                assert_eq!(*color, colors::ENERGY_BAR_FILL);
            }
            other => panic!("expected solid fill, got {:?}", other),
        }
    }

    #[test]
    fn test_energy_bar_fill_is_clamped() {
        let mut queue = DrawQueue::new();
        energy_bar(&mut queue, -0.2);
        assert_eq!(fill_width(&queue), 0.0);

        queue.clear();
        energy_bar(&mut queue, 1.5);
        assert_eq!(fill_width(&queue), 394.0);
    }

    #[test]
    fn test_clear_and_count() {
        let mut queue = DrawQueue::new();
        pickup(&mut queue, Vec2::new(1.0, 2.0));
        pickup(&mut queue, Vec2::new(3.0, 4.0));
        ship(&mut queue, Vec2::ZERO, 0.0);
        assert_eq!(queue.count_sprites(PICKUP_SPRITE), 2);
        assert_eq!(queue.count_sprites(SHIP_SPRITE), 1);

        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_json_tags_primitive() {
        let mut queue = DrawQueue::new();
        pickup(&mut queue, Vec2::new(1.0, 2.0));
        let json = queue.to_json().unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains(r#""primitive":"sprite""#));
        assert!(json.contains(PICKUP_SPRITE));
    }
}
