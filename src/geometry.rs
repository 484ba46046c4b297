//! Axis-aligned box geometry and geometry-kind dispatch.
//!
//! The traversal algorithm needs exactly three things from a box: half-open
//! point containment, box containment under the same half-open rule, and a
//! separating-axis intersection test. `BBox` provides those plus the
//! corner/midpoint enumeration and the integer grid mapping the index uses
//! to derive curve coordinates.
//!
//! The upper bound is exclusive everywhere, so a point sitting exactly on a
//! shared cell edge is counted by exactly one cell.

use crate::error::{Result, SpatialError};
use crate::location::Location;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, stored as origin + size.
///
/// Invariant: both size components are positive. `max` is derived
/// (`origin + size`), never stored. Boxes are immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    origin: [f64; 2],
    size: [f64; 2],
}

impl BBox {
    /// Create a box from origin and size.
    ///
    /// Size components must be positive; `from_bounds` is the checked
    /// constructor for untrusted input.
    pub fn new(origin: [f64; 2], size: [f64; 2]) -> Self {
        debug_assert!(size[0] > 0.0 && size[1] > 0.0);
        Self { origin, size }
    }

    /// Create a box from min/max corners.
    ///
    /// Fails with [`SpatialError::InvalidBounds`] if `max` does not exceed
    /// `min` on every axis.
    pub fn from_bounds(min: [f64; 2], max: [f64; 2]) -> Result<Self> {
        if max[0] <= min[0] || max[1] <= min[1] {
            return Err(SpatialError::InvalidBounds { min, max });
        }
        Ok(Self {
            origin: min,
            size: [max[0] - min[0], max[1] - min[1]],
        })
    }

    /// Lower-left corner.
    pub fn origin(&self) -> [f64; 2] {
        self.origin
    }

    /// Extent per axis.
    pub fn size(&self) -> [f64; 2] {
        self.size
    }

    /// Minimum corner (same as `origin`).
    pub fn min(&self) -> [f64; 2] {
        self.origin
    }

    /// Maximum corner, derived as `origin + size`.
    pub fn max(&self) -> [f64; 2] {
        [self.origin[0] + self.size[0], self.origin[1] + self.size[1]]
    }

    /// The four corners in winding order: origin, lower-right, max,
    /// upper-left.
    pub fn corners(&self) -> [[f64; 2]; 4] {
        let max = self.max();
        [
            self.origin,
            [max[0], self.origin[1]],
            max,
            [self.origin[0], max[1]],
        ]
    }

    /// Midpoints of the four edges, same winding as `corners`: bottom,
    /// right, top, left.
    pub fn midpoints(&self) -> [[f64; 2]; 4] {
        let max = self.max();
        let center = [
            self.origin[0] + self.size[0] * 0.5,
            self.origin[1] + self.size[1] * 0.5,
        ];
        [
            [center[0], self.origin[1]],
            [max[0], center[1]],
            [center[0], max[1]],
            [self.origin[0], center[1]],
        ]
    }

    /// Half-open point containment: `min[i] <= p[i] < max[i]` on both axes.
    pub fn include_point(&self, p: [f64; 2]) -> bool {
        let max = self.max();
        p[0] >= self.origin[0] && p[0] < max[0] && p[1] >= self.origin[1] && p[1] < max[1]
    }

    /// Box containment under the same half-open rule, applied to `other`'s
    /// min and max corners. A box whose max coincides exactly with this
    /// box's max is not included.
    pub fn include(&self, other: &BBox) -> bool {
        self.include_point(other.min()) && self.include_point(other.max())
    }

    /// Separating-axis intersection test. Touching boxes intersect.
    pub fn intersect(&self, other: &BBox) -> bool {
        let max = self.max();
        let other_max = other.max();
        !(other.origin[0] > max[0]
            || other_max[0] < self.origin[0]
            || other.origin[1] > max[1]
            || other_max[1] < self.origin[1])
    }

    /// Map a coordinate into an integer grid of `scale` cells per axis.
    ///
    /// Coordinates inside the box land in `[0, scale)`; out-of-range input
    /// produces an out-of-range (but not panicking) integer.
    pub fn integral_offset(&self, coordinate: [f64; 2], scale: i64) -> [i64; 2] {
        [
            ((coordinate[0] - self.origin[0]) / self.size[0] * scale as f64).floor() as i64,
            ((coordinate[1] - self.origin[1]) / self.size[1] * scale as f64).floor() as i64,
        ]
    }
}

/// A sphere on the Earth's surface: a center location and a radius in
/// meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Location,
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere from a center and a radius in meters.
    pub fn new(center: Location, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Two spheres intersect iff the great-circle distance between their
    /// centers does not exceed the sum of their radii.
    pub fn intersects(&self, other: &Sphere) -> bool {
        self.center.distance_to(&other.center) <= self.radius + other.radius
    }
}

/// Closed set of geometry kinds the index can compare.
///
/// Intersection is only defined between like kinds; unlike kinds fail with
/// [`SpatialError::UnsupportedGeometry`] rather than silently returning
/// false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Box(BBox),
    Sphere(Sphere),
}

impl Shape {
    /// Kind name used in error reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Box(_) => "box",
            Shape::Sphere(_) => "sphere",
        }
    }

    /// Intersection between like geometry kinds.
    pub fn intersects(&self, other: &Shape) -> Result<bool> {
        match (self, other) {
            (Shape::Box(a), Shape::Box(b)) => Ok(a.intersect(b)),
            (Shape::Sphere(a), Shape::Sphere(b)) => Ok(a.intersects(b)),
            (a, b) => Err(SpatialError::UnsupportedGeometry {
                left: a.kind(),
                right: b.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bounds_rejects_inverted() {
        assert!(BBox::from_bounds([0.0, 0.0], [10.0, 5.0]).is_ok());
        assert!(matches!(
            BBox::from_bounds([0.0, 0.0], [0.0, 5.0]),
            Err(SpatialError::InvalidBounds { .. })
        ));
        assert!(matches!(
            BBox::from_bounds([0.0, 0.0], [10.0, -1.0]),
            Err(SpatialError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_min_max_derived() {
        let b = BBox::new([-180.0, -90.0], [360.0, 180.0]);
        assert_eq!(b.min(), [-180.0, -90.0]);
        assert_eq!(b.max(), [180.0, 90.0]);
    }

    #[test]
    fn test_corners_winding() {
        let b = BBox::new([1.0, 2.0], [4.0, 6.0]);
        assert_eq!(
            b.corners(),
            [[1.0, 2.0], [5.0, 2.0], [5.0, 8.0], [1.0, 8.0]]
        );
    }

    #[test]
    fn test_midpoints_winding() {
        let b = BBox::new([0.0, 0.0], [4.0, 2.0]);
        assert_eq!(
            b.midpoints(),
            [[2.0, 0.0], [4.0, 1.0], [2.0, 2.0], [0.0, 1.0]]
        );
    }

    #[test]
    fn test_include_point_half_open() {
        let b = BBox::new([0.0, 0.0], [10.0, 10.0]);
        assert!(b.include_point([0.0, 0.0])); // min corner inclusive
        assert!(b.include_point([9.999, 9.999]));
        assert!(!b.include_point([10.0, 5.0])); // max edge exclusive
        assert!(!b.include_point([5.0, 10.0]));
        assert!(!b.include_point([-0.001, 5.0]));
    }

    #[test]
    fn test_include_box_boundary() {
        let outer = BBox::new([0.0, 0.0], [10.0, 10.0]);

        // A box whose max coincides with the outer max is NOT included.
        let flush = BBox::from_bounds([5.0, 5.0], [10.0, 10.0]).unwrap();
        assert!(!outer.include(&flush));

        // Strictly interior on both axes is included.
        let interior = BBox::from_bounds([5.0, 5.0], [9.0, 9.0]).unwrap();
        assert!(outer.include(&interior));
    }

    #[test]
    fn test_intersect_separating_axis() {
        let a = BBox::new([0.0, 0.0], [10.0, 10.0]);
        let b = BBox::new([5.0, 5.0], [10.0, 10.0]);
        let c = BBox::new([20.0, 0.0], [5.0, 5.0]);
        let touching = BBox::new([10.0, 0.0], [5.0, 5.0]);

        assert!(a.intersect(&b));
        assert!(b.intersect(&a));
        assert!(!a.intersect(&c));
        assert!(!c.intersect(&a));
        // Shared edge counts as intersecting.
        assert!(a.intersect(&touching));
    }

    #[test]
    fn test_integral_offset() {
        let earth = BBox::new([-180.0, -90.0], [360.0, 180.0]);
        let scale = 1i64 << 16;

        assert_eq!(earth.integral_offset([-180.0, -90.0], scale), [0, 0]);
        assert_eq!(
            earth.integral_offset([0.0, 0.0], scale),
            [scale / 2, scale / 2]
        );
        assert_eq!(
            earth.integral_offset([179.999, 89.999], scale),
            [scale - 1, scale - 1]
        );
        // Out-of-range coordinates yield out-of-range integers, no panic.
        assert_eq!(earth.integral_offset([-181.0, -90.0], scale)[0], -183);
        assert!(earth.integral_offset([181.0, 0.0], scale)[0] >= scale);
    }

    #[test]
    fn test_sphere_intersects() {
        let a = Sphere::new(Location::new(0.0, 0.0), 150_000.0);
        let b = Sphere::new(Location::new(2.0, 0.0), 80_000.0);
        // 2 degrees of longitude at the equator is ~222 km: the radii sum
        // to 230 km, so these overlap.
        assert!(a.intersects(&b));

        let c = Sphere::new(Location::new(2.0, 0.0), 50_000.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_shape_dispatch() {
        let bbox = Shape::Box(BBox::new([0.0, 0.0], [1.0, 1.0]));
        let sphere = Shape::Sphere(Sphere::new(Location::new(0.5, 0.5), 1_000.0));

        assert!(bbox.intersects(&bbox).unwrap());
        assert!(sphere.intersects(&sphere).unwrap());
        assert_eq!(
            bbox.intersects(&sphere),
            Err(SpatialError::UnsupportedGeometry {
                left: "box",
                right: "sphere"
            })
        );
    }
}
