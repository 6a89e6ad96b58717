//! # Concrete Compression Zone
//!
//! Two models of the equivalent stress block for a trial neutral axis:
//!
//! - [`CompressionZone::AxisAligned`] treats the block as a rectangle along
//!   whichever section axis is closer to the compression direction
//!   (`|cos θ|` vs `|sin θ|`), and measures bar depth from the top face for
//!   every θ. This reproduces the historical column sheets point for point,
//!   including their inaccuracy for θ near 45°.
//! - [`CompressionZone::Polygon`] clips the rectangle by the band of depth
//!   `a` below the most-compressed corner and integrates the resulting
//!   polygon exactly.
//!
//! θ = 0 compresses the top face (+y), θ = π/2 the right face (+x).

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::section::CrossSection;

/// Tolerance for treating a bar on the block boundary as inside it (mm)
const BOUNDARY_TOLERANCE_MM: f64 = 1e-9;

/// One sample of the sweep: neutral-axis depth and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeutralAxisState {
    /// Depth from the most-compressed fiber to the neutral axis (mm)
    pub c_mm: f64,
    /// Orientation of the neutral axis (rad, 0 to 2π)
    pub theta_rad: f64,
}

impl NeutralAxisState {
    pub fn new(c_mm: f64, theta_rad: f64) -> Self {
        NeutralAxisState { c_mm, theta_rad }
    }

    /// Unit vector pointing toward the compressed face.
    pub fn compression_direction(&self) -> Vector2<f64> {
        Vector2::new(self.theta_rad.sin(), self.theta_rad.cos())
    }
}

/// Geometry of the concrete stress block for one sample.
///
/// The block is the part of the section whose projection on `direction` is at
/// least `min_projection`; `area_mm2` and `centroid` describe that region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcreteBlock {
    pub area_mm2: f64,
    pub centroid: Vector2<f64>,
    pub direction: Vector2<f64>,
    pub min_projection: f64,
}

impl ConcreteBlock {
    /// Whether a point lies inside the compressed concrete.
    pub fn contains(&self, point: &Vector2<f64>) -> bool {
        self.area_mm2 > 0.0 && self.direction.dot(point) >= self.min_projection - BOUNDARY_TOLERANCE_MM
    }
}

/// How the concrete compression zone is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompressionZone {
    /// Axis-aligned rectangle chosen by comparing |cos θ| and |sin θ|
    AxisAligned,
    /// Exact rotated polygon
    #[default]
    Polygon,
}

impl CompressionZone {
    pub fn display_name(&self) -> &'static str {
        match self {
            CompressionZone::AxisAligned => "Axis-aligned compression block approximation",
            CompressionZone::Polygon => "Exact polygonal compression zone",
        }
    }

    /// Stress block of depth `a_mm` for the given neutral-axis state.
    pub fn block(&self, section: &CrossSection, axis: &NeutralAxisState, a_mm: f64) -> ConcreteBlock {
        match self {
            CompressionZone::AxisAligned => axis_aligned_block(section, axis, a_mm),
            CompressionZone::Polygon => polygon_block(section, axis, a_mm),
        }
    }

    /// Distance from the most-compressed fiber to `point`, used for strain.
    pub fn fiber_depth(&self, section: &CrossSection, axis: &NeutralAxisState, point: &Vector2<f64>) -> f64 {
        match self {
            CompressionZone::AxisAligned => section.h_mm / 2.0 - point.y,
            CompressionZone::Polygon => {
                let u = axis.compression_direction();
                section.extreme_projection(&u) - u.dot(point)
            }
        }
    }
}

fn axis_aligned_block(section: &CrossSection, axis: &NeutralAxisState, a_mm: f64) -> ConcreteBlock {
    let (cos, sin) = (axis.theta_rad.cos(), axis.theta_rad.sin());
    if cos.abs() > sin.abs() {
        let depth = a_mm.min(section.h_mm);
        ConcreteBlock {
            area_mm2: depth * section.b_mm,
            centroid: Vector2::new(0.0, section.h_mm / 2.0 - depth / 2.0),
            direction: Vector2::new(0.0, 1.0),
            min_projection: section.h_mm / 2.0 - depth,
        }
    } else {
        let depth = a_mm.min(section.b_mm);
        ConcreteBlock {
            area_mm2: depth * section.h_mm,
            centroid: Vector2::new(section.b_mm / 2.0 - depth / 2.0, 0.0),
            direction: Vector2::new(1.0, 0.0),
            min_projection: section.b_mm / 2.0 - depth,
        }
    }
}

fn polygon_block(section: &CrossSection, axis: &NeutralAxisState, a_mm: f64) -> ConcreteBlock {
    let u = axis.compression_direction();
    let min_projection = section.extreme_projection(&u) - a_mm;
    let clipped = clip_half_plane(&section.corners(), &u, min_projection);

    match polygon_area_centroid(&clipped) {
        Some((area, centroid)) => ConcreteBlock {
            area_mm2: area,
            centroid,
            direction: u,
            min_projection,
        },
        None => ConcreteBlock {
            area_mm2: 0.0,
            centroid: Vector2::zeros(),
            direction: u,
            min_projection,
        },
    }
}

/// Sutherland–Hodgman clip of a convex polygon to `normal · p >= level`.
fn clip_half_plane(vertices: &[Vector2<f64>], normal: &Vector2<f64>, level: f64) -> Vec<Vector2<f64>> {
    let mut out = Vec::with_capacity(vertices.len() + 1);
    for i in 0..vertices.len() {
        let p = vertices[i];
        let q = vertices[(i + 1) % vertices.len()];
        let dp = normal.dot(&p) - level;
        let dq = normal.dot(&q) - level;
        if dp >= 0.0 {
            out.push(p);
        }
        if (dp >= 0.0) != (dq >= 0.0) {
            let t = dp / (dp - dq);
            out.push(p + (q - p) * t);
        }
    }
    out
}

/// Signed-area shoelace integration; vertices in counter-clockwise order.
fn polygon_area_centroid(vertices: &[Vector2<f64>]) -> Option<(f64, Vector2<f64>)> {
    if vertices.len() < 3 {
        return None;
    }
    let mut a = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..vertices.len() {
        let p = vertices[i];
        let q = vertices[(i + 1) % vertices.len()];
        let cross = p.x * q.y - q.x * p.y;
        a += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    a *= 0.5;
    if a.abs() < 1e-12 {
        return None;
    }
    Some((a, Vector2::new(cx / (6.0 * a), cy / (6.0 * a))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn section() -> CrossSection {
        CrossSection::new(400.0, 500.0, 28.0, 420.0).unwrap()
    }

    #[test]
    fn test_polygon_matches_rectangle_for_theta_zero() {
        let s = section();
        let axis = NeutralAxisState::new(200.0, 0.0);
        let block = CompressionZone::Polygon.block(&s, &axis, 170.0);
        assert!((block.area_mm2 - 170.0 * 400.0).abs() < 1e-6);
        assert!(block.centroid.x.abs() < 1e-9);
        assert!((block.centroid.y - (250.0 - 85.0)).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_right_face_for_quarter_turn() {
        let s = section();
        let axis = NeutralAxisState::new(100.0, FRAC_PI_2);
        let block = CompressionZone::Polygon.block(&s, &axis, 85.0);
        assert!((block.area_mm2 - 85.0 * 500.0).abs() < 1e-6);
        assert!((block.centroid.x - (200.0 - 42.5)).abs() < 1e-6);
        assert!(block.centroid.y.abs() < 1e-6);
    }

    #[test]
    fn test_polygon_triangle_at_corner() {
        // Square 400 x 400, θ = 45°: a small block is a right isosceles triangle
        let s = CrossSection::new(400.0, 400.0, 28.0, 420.0).unwrap();
        let axis = NeutralAxisState::new(100.0, FRAC_PI_4);
        let a = 50.0;
        let block = CompressionZone::Polygon.block(&s, &axis, a);
        // Legs of length a·√2
        let leg = a * 2f64.sqrt();
        assert!((block.area_mm2 - leg * leg / 2.0).abs() < 1e-6);
        // Centroid a third of the legs in from the corner
        let expected = 200.0 - leg / 3.0;
        assert!((block.centroid.x - expected).abs() < 1e-6);
        assert!((block.centroid.y - expected).abs() < 1e-6);
    }

    #[test]
    fn test_polygon_full_section() {
        let s = section();
        let axis = NeutralAxisState::new(900.0, 1.0);
        let block = CompressionZone::Polygon.block(&s, &axis, 800.0);
        assert!((block.area_mm2 - s.gross_area_mm2()).abs() < 1e-6);
        assert!(block.centroid.norm() < 1e-6);
    }

    #[test]
    fn test_polygon_mirrors_under_half_turn() {
        let s = section();
        let theta = 0.7;
        let a = 180.0;
        let b1 = CompressionZone::Polygon.block(&s, &NeutralAxisState::new(200.0, theta), a);
        let b2 = CompressionZone::Polygon.block(&s, &NeutralAxisState::new(200.0, theta + PI), a);
        assert!((b1.area_mm2 - b2.area_mm2).abs() < 1e-6);
        assert!((b1.centroid + b2.centroid).norm() < 1e-6);
    }

    #[test]
    fn test_axis_aligned_branches() {
        let s = section();
        let x_branch = CompressionZone::AxisAligned.block(&s, &NeutralAxisState::new(100.0, 0.2), 85.0);
        assert_eq!(x_branch.area_mm2, 85.0 * 400.0);
        assert_eq!(x_branch.centroid, Vector2::new(0.0, 250.0 - 42.5));

        let y_branch = CompressionZone::AxisAligned.block(&s, &NeutralAxisState::new(100.0, 1.4), 85.0);
        assert_eq!(y_branch.area_mm2, 85.0 * 500.0);
        assert_eq!(y_branch.centroid, Vector2::new(200.0 - 42.5, 0.0));

        // Same positive-side block for the opposite direction
        let flipped = CompressionZone::AxisAligned.block(&s, &NeutralAxisState::new(100.0, PI), 85.0);
        assert_eq!(flipped.centroid, x_branch.centroid);
    }

    #[test]
    fn test_axis_aligned_depth_is_capped() {
        let s = section();
        let block = CompressionZone::AxisAligned.block(&s, &NeutralAxisState::new(900.0, 0.0), 765.0);
        assert_eq!(block.area_mm2, s.gross_area_mm2());
        assert!(block.centroid.y.abs() < 1e-12);
    }

    #[test]
    fn test_fiber_depth() {
        let s = section();
        let p = Vector2::new(100.0, -150.0);
        let legacy = CompressionZone::AxisAligned.fiber_depth(&s, &NeutralAxisState::new(100.0, FRAC_PI_2), &p);
        assert_eq!(legacy, 400.0);
        let exact = CompressionZone::Polygon.fiber_depth(&s, &NeutralAxisState::new(100.0, FRAC_PI_2), &p);
        assert!((exact - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_block_contains() {
        let s = section();
        let block = CompressionZone::Polygon.block(&s, &NeutralAxisState::new(100.0, 0.0), 85.0);
        assert!(block.contains(&Vector2::new(0.0, 200.0)));
        assert!(!block.contains(&Vector2::new(0.0, 100.0)));
    }
}
