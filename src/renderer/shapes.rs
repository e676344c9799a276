//! Shape generation for draw commands

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use super::{Color, DrawCommand, GradientStop};

/// Point on a circle of `radius` around `center` at segment `i` of `segments`
#[inline]
fn rim(center: Vec2, radius: f32, i: u32, segments: u32) -> Vec2 {
    let theta = (i as f32 / segments as f32) * 2.0 * PI;
    Vec2::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    fan(center, radius, color, color, segments)
}

/// Triangle fan with one color at the centre and another on the rim
fn fan(center: Vec2, radius: f32, inner: Color, outer: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let p1 = rim(center, radius, i, segments);
        let p2 = rim(center, radius, i + 1, segments);

        vertices.push(Vertex::with_color(center.x, center.y, inner));
        vertices.push(Vertex::with_color(p1.x, p1.y, outer));
        vertices.push(Vertex::with_color(p2.x, p2.y, outer));
    }

    vertices
}

/// Generate vertices for a ring, colors interpolated from inner to outer edge
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: Color,
    outer_color: Color,
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let inner1 = rim(center, inner_radius, i, segments);
        let outer1 = rim(center, outer_radius, i, segments);
        let inner2 = rim(center, inner_radius, i + 1, segments);
        let outer2 = rim(center, outer_radius, i + 1, segments);

        // Two triangles per segment
        vertices.push(Vertex::with_color(inner1.x, inner1.y, inner_color));
        vertices.push(Vertex::with_color(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::with_color(inner2.x, inner2.y, inner_color));

        vertices.push(Vertex::with_color(inner2.x, inner2.y, inner_color));
        vertices.push(Vertex::with_color(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::with_color(outer2.x, outer2.y, outer_color));
    }

    vertices
}

/// Radial gradient disc: a fan up to the first inner stop, then one ring per stop pair
pub fn radial_gradient(center: Vec2, radius: f32, stops: &[GradientStop], segments: u32) -> Vec<Vertex> {
    let Some(first) = stops.first() else {
        return Vec::new();
    };

    let mut vertices = Vec::new();
    if first.offset > 0.0 {
        vertices.extend(fan(center, radius * first.offset, first.color, first.color, segments));
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b.offset <= a.offset {
            continue;
        }
        if a.offset <= 0.0 {
            vertices.extend(fan(center, radius * b.offset, a.color, b.color, segments));
        } else {
            vertices.extend(ring(
                center,
                radius * a.offset,
                radius * b.offset,
                a.color,
                b.color,
                segments,
            ));
        }
    }
    vertices
}

/// Tessellate one draw command into a triangle list
pub fn tessellate(command: &DrawCommand, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    match command {
        DrawCommand::FillCircle {
            center,
            radius,
            color,
        } => circle(*center, *radius, *color, segments),
        DrawCommand::RadialGradientCircle {
            center,
            radius,
            stops,
        } => radial_gradient(*center, *radius, stops, segments),
    }
}

/// Tessellate a whole frame, in draw order
pub fn tessellate_all(commands: &[DrawCommand], segments: u32) -> Vec<Vertex> {
    commands.iter().flat_map(|c| tessellate(c, segments)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(offset: f32, alpha: f32) -> GradientStop {
        GradientStop {
            offset,
            color: Color::rgb(1.0, 0.0, 1.0).with_alpha(alpha),
        }
    }

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 10.0, Color::rgb(1.0, 1.0, 1.0), 16);
        assert_eq!(verts.len(), 48);
        for v in verts.iter().skip(1).step_by(3) {
            let r = Vec2::from(v.position).length();
            assert!((r - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_radial_gradient_fan_then_ring() {
        let stops = [stop(0.0, 0.8), stop(0.5, 0.4), stop(1.0, 0.0)];
        let verts = radial_gradient(Vec2::new(5.0, 5.0), 20.0, &stops, 8);
        // fan 8*3 + ring 8*6
        assert_eq!(verts.len(), 72);
        assert_eq!(verts[0].position, [5.0, 5.0]);
        assert!((verts[0].color[3] - 0.8).abs() < 1e-6);
        assert_eq!(verts.last().unwrap().color[3], 0.0);
    }

    #[test]
    fn test_tessellate_enforces_min_segments() {
        let cmd = DrawCommand::FillCircle {
            center: Vec2::ZERO,
            radius: 1.0,
            color: Color::TRANSPARENT,
        };
        assert_eq!(tessellate(&cmd, 0).len(), 9);
    }

    #[test]
    fn test_empty_stops() {
        assert!(radial_gradient(Vec2::ZERO, 5.0, &[], 8).is_empty());
    }
}
