//! Rendering output
//!
//! The simulation produces a flat list of [`DrawCommand`]s per frame. A surface
//! (Canvas2D on the web, a recorder in tests and headless runs) consumes them;
//! `shapes` tessellates them into vertex buffers for GPU backends.

pub mod shapes;
pub mod vertex;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use vertex::Vertex;

/// Straight (non-premultiplied) RGBA color, components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// From a packed `0xRRGGBB` value
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as f32 / 255.0,
            ((hex >> 8) & 0xFF) as f32 / 255.0,
            (hex & 0xFF) as f32 / 255.0,
        )
    }

    /// Same color with a new alpha, clamped to `[0, 1]`
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: crate::sim::physics::clamp_unit(alpha),
            ..self
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS `rgba()` string for Canvas2D
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            self.a
        )
    }
}

/// A color stop at `offset` (0 = centre, 1 = edge)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

/// One primitive drawn by a surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Solid filled circle (trail particles)
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Circle filled with a radial gradient centred on `center` (ripples)
    RadialGradientCircle {
        center: Vec2,
        radius: f32,
        stops: [GradientStop; 3],
    },
}

impl DrawCommand {
    pub fn center(&self) -> Vec2 {
        match self {
            DrawCommand::FillCircle { center, .. } => *center,
            DrawCommand::RadialGradientCircle { center, .. } => *center,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            DrawCommand::FillCircle { radius, .. } => *radius,
            DrawCommand::RadialGradientCircle { radius, .. } => *radius,
        }
    }
}

/// Consumer of per-frame draw lists
pub trait DrawSurface {
    /// Start a new frame of the given canvas size (clears previous content)
    fn begin_frame(&mut self, width: f32, height: f32);
    fn draw(&mut self, command: &DrawCommand);
    fn end_frame(&mut self) {}
}

/// Surface that keeps the last frame's commands (tests, headless runs)
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub frames: usize,
    pub commands: Vec<DrawCommand>,
    pub total_commands: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gradient_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::RadialGradientCircle { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn begin_frame(&mut self, _width: f32, _height: f32) {
        self.frames += 1;
        self.commands.clear();
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.total_commands += 1;
        self.commands.push(command.clone());
    }
}
