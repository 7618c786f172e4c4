//! Geometry primitives for hydromesh.
//!
//! Provides the planar point type, the triangle predicates used by the
//! Voronoi dual construction (circumcenter, centre of mass, obtuse test)
//! and the projection used for edge metrics.

pub mod metrics;

use serde::{Deserialize, Serialize};
use static_assertions::assert_impl_all;

/// Mean Earth radius in metres, used for geographic edge metrics.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// A point in the horizontal plane.
///
/// For [`Projection::Geographic`] meshes, `x` is longitude and `y` is
/// latitude, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

assert_impl_all!(Point: Copy, Send, Sync);

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Planar Euclidean distance to `other`.
    pub fn dist(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint of the segment from `self` to `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }
}

/// Circumcenter of the triangle `(a, b, c)`.
///
/// Solves the 2x2 system for the offset of the centre from `a`, which keeps
/// the arithmetic well scaled for small triangles far from the origin.
/// Degenerate (collinear) triangles produce non-finite coordinates; callers
/// filter such cells downstream.
pub fn circumcenter(a: Point, b: Point, c: Point) -> Point {
    let ux = b.x - a.x;
    let uy = b.y - a.y;
    let vx = c.x - a.x;
    let vy = c.y - a.y;

    let ru = 0.5 * (ux * ux + uy * uy);
    let rv = 0.5 * (vx * vx + vy * vy);

    let det = ux * vy - uy * vx;
    let ox = (ru * vy - rv * uy) / det;
    let oy = (rv * ux - ru * vx) / det;

    Point::new(a.x + ox, a.y + oy)
}

/// Centre of mass of the triangle `(a, b, c)`.
pub fn centroid(a: Point, b: Point, c: Point) -> Point {
    Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
}

/// Largest interior angle of the triangle `(a, b, c)` in degrees, or 0.0
/// when the triangle is not obtuse.
///
/// Uses the law of cosines on the angle opposite the longest side.
pub fn largest_angle_deg(a: Point, b: Point, c: Point) -> f64 {
    let la = b.dist(c);
    let lb = a.dist(c);
    let lc = a.dist(b);

    let cosine = if la > lb && la > lc {
        (lb * lb + lc * lc - la * la) / (2.0 * lb * lc)
    } else if lb > la && lb > lc {
        (la * la + lc * lc - lb * lb) / (2.0 * la * lc)
    } else {
        (la * la + lb * lb - lc * lc) / (2.0 * la * lb)
    };
    let angle = cosine.acos();
    if angle > std::f64::consts::FRAC_PI_2 {
        angle.to_degrees()
    } else {
        0.0
    }
}

/// Whether the triangle `(a, b, c)` has an interior angle greater than 90
/// degrees.
pub fn is_obtuse(a: Point, b: Point, c: Point) -> bool {
    largest_angle_deg(a, b, c) > 0.0
}

/// Horizontal coordinate system of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// Cartesian coordinates in metres.
    #[default]
    Planar,
    /// Longitude/latitude in degrees; distances are great circles on a
    /// spherical Earth.
    Geographic,
}

impl Projection {
    /// Distance from `a` to `b` in metres.
    pub fn distance(self, a: Point, b: Point) -> f64 {
        match self {
            Projection::Planar => a.dist(b),
            Projection::Geographic => haversine(a, b),
        }
    }

    /// Orientation of the edge from `a` to `b`, in radians.
    ///
    /// Planar meshes use the anticlockwise angle from east; geographic
    /// meshes use the initial great-circle bearing clockwise from north.
    pub fn bearing(self, a: Point, b: Point) -> f64 {
        match self {
            Projection::Planar => (b.y - a.y).atan2(b.x - a.x),
            Projection::Geographic => {
                let phi1 = a.y.to_radians();
                let phi2 = b.y.to_radians();
                let dlam = (b.x - a.x).to_radians();
                let y = dlam.sin() * phi2.cos();
                let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlam.cos();
                y.atan2(x)
            }
        }
    }
}

fn haversine(a: Point, b: Point) -> f64 {
    let phi1 = a.y.to_radians();
    let phi2 = b.y.to_radians();
    let dphi = (b.y - a.y).to_radians();
    let dlam = (b.x - a.x).to_radians();
    let h = (0.5 * dphi).sin().powi(2) + phi1.cos() * phi2.cos() * (0.5 * dlam).sin().powi(2);
    2.0 * EARTH_RADIUS * h.sqrt().asin()
}
