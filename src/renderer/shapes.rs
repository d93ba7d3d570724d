//! Shape generation for 2D primitives
//!
//! Every helper appends a plain triangle list to `out`.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    let segments = segments.max(3);
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Circle segment count that keeps edges smooth without wasting triangles
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(8, 32)
}

pub fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Box of the given half extents rotated `angle` radians about its center
pub fn rotated_rect(
    out: &mut Vec<Vertex>,
    center: Vec2,
    half_extents: Vec2,
    angle: f32,
    color: [f32; 4],
) {
    let rot = Vec2::from_angle(angle);
    let corner = |x: f32, y: f32| center + rot.rotate(Vec2::new(x, y));

    let tl = corner(-half_extents.x, -half_extents.y);
    let tr = corner(half_extents.x, -half_extents.y);
    let br = corner(half_extents.x, half_extents.y);
    let bl = corner(-half_extents.x, half_extents.y);

    triangle(out, tl, tr, br, color);
    triangle(out, tl, br, bl, color);
}

pub fn rect(out: &mut Vec<Vertex>, center: Vec2, half_extents: Vec2, color: [f32; 4]) {
    rotated_rect(out, center, half_extents, 0.0, color);
}

/// Regular polygon with `sides` vertices on a circle of `radius`
pub fn regular_polygon(
    out: &mut Vec<Vertex>,
    center: Vec2,
    sides: u32,
    radius: f32,
    rotation: f32,
    color: [f32; 4],
) {
    let sides = sides.max(3);
    let point = |i: u32| {
        let theta = rotation + (i as f32 / sides as f32) * TAU;
        center + Vec2::new(theta.cos(), theta.sin()) * radius
    };

    for i in 0..sides {
        triangle(out, center, point(i), point(i + 1), color);
    }
}
