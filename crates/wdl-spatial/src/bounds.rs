use serde::{Deserialize, Serialize};

use wdl_core::Vector3;

/// Euclidean distance between two points.
pub fn distance(a: Vector3, b: Vector3) -> f64 {
    distance_squared(a, b).sqrt()
}

/// Squared Euclidean distance between two points. Cheaper than
/// [`distance`] when only comparisons are needed.
pub fn distance_squared(a: Vector3, b: Vector3) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z - a.z;
    dx * dx + dy * dy + dz * dz
}

/// An axis-aligned bounding box.
///
/// All containment and overlap tests are inclusive: a point exactly on a
/// face is contained, and two boxes touching at a face intersect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_point: Vector3,
    pub max_point: Vector3,
}

impl BoundingBox {
    /// Build a box from its two corners.
    pub fn new(min_point: Vector3, max_point: Vector3) -> Self {
        Self {
            min_point,
            max_point,
        }
    }

    /// Build a box centered on `center` with the given full extents.
    pub fn from_center_size(center: Vector3, size: Vector3) -> Self {
        let half = Vector3::new(size.x / 2.0, size.y / 2.0, size.z / 2.0);
        Self {
            min_point: Vector3::new(center.x - half.x, center.y - half.y, center.z - half.z),
            max_point: Vector3::new(center.x + half.x, center.y + half.y, center.z + half.z),
        }
    }

    /// The midpoint of the box.
    pub fn center(&self) -> Vector3 {
        Vector3::new(
            (self.min_point.x + self.max_point.x) / 2.0,
            (self.min_point.y + self.max_point.y) / 2.0,
            (self.min_point.z + self.max_point.z) / 2.0,
        )
    }

    /// Component-wise extent of the box.
    pub fn size(&self) -> Vector3 {
        Vector3::new(
            self.max_point.x - self.min_point.x,
            self.max_point.y - self.min_point.y,
            self.max_point.z - self.min_point.z,
        )
    }

    /// Volume of the box; zero when degenerate on any axis.
    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }

    /// Inclusive containment test on all six faces.
    pub fn contains_point(&self, point: Vector3) -> bool {
        point.x >= self.min_point.x
            && point.x <= self.max_point.x
            && point.y >= self.min_point.y
            && point.y <= self.max_point.y
            && point.z >= self.min_point.z
            && point.z <= self.max_point.z
    }

    /// Inclusive axis-aligned overlap test; boxes touching at a face
    /// count as intersecting.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_point.x <= other.max_point.x
            && self.max_point.x >= other.min_point.x
            && self.min_point.y <= other.max_point.y
            && self.max_point.y >= other.min_point.y
            && self.min_point.z <= other.max_point.z
            && self.max_point.z >= other.min_point.z
    }

    /// A copy grown by `amount` on every face.
    pub fn expand(&self, amount: f64) -> Self {
        Self {
            min_point: Vector3::new(
                self.min_point.x - amount,
                self.min_point.y - amount,
                self.min_point.z - amount,
            ),
            max_point: Vector3::new(
                self.max_point.x + amount,
                self.max_point.y + amount,
                self.max_point.z + amount,
            ),
        }
    }

    /// The smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min_point: Vector3::new(
                self.min_point.x.min(other.min_point.x),
                self.min_point.y.min(other.min_point.y),
                self.min_point.z.min(other.min_point.z),
            ),
            max_point: Vector3::new(
                self.max_point.x.max(other.max_point.x),
                self.max_point.y.max(other.max_point.y),
                self.max_point.z.max(other.max_point.z),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(x: f64) -> BoundingBox {
        BoundingBox::from_center_size(Vector3::new(x, 0.0, 0.0), Vector3::ONE)
    }

    #[test]
    fn distance_three_four_five() {
        let a = Vector3::ZERO;
        let b = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(distance(a, b), 5.0);
        assert_eq!(distance_squared(a, b), 25.0);
    }

    #[test]
    fn center_size_volume() {
        let b = BoundingBox::from_center_size(Vector3::new(1.0, 2.0, 3.0), Vector3::splat(2.0));
        assert_eq!(b.center(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(b.size(), Vector3::splat(2.0));
        assert_eq!(b.volume(), 8.0);
    }

    #[test]
    fn degenerate_box_has_zero_volume() {
        let b = BoundingBox::from_center_size(Vector3::ZERO, Vector3::new(2.0, 0.0, 2.0));
        assert_eq!(b.volume(), 0.0);
    }

    #[test]
    fn point_on_face_is_contained() {
        let b = unit_box_at(0.0);
        assert!(b.contains_point(Vector3::new(0.5, 0.0, 0.0)));
        assert!(b.contains_point(Vector3::new(0.5, 0.5, 0.5)));
        assert!(!b.contains_point(Vector3::new(0.5001, 0.0, 0.0)));
    }

    #[test]
    fn face_touching_boxes_intersect() {
        // Unit boxes centered 1 apart touch exactly at x = 0.5.
        assert!(unit_box_at(0.0).intersects(&unit_box_at(1.0)));
        assert!(!unit_box_at(0.0).intersects(&unit_box_at(1.001)));
    }

    #[test]
    fn expand_grows_every_face() {
        let b = unit_box_at(0.0).expand(0.5);
        assert_eq!(b.min_point, Vector3::splat(-1.0));
        assert_eq!(b.max_point, Vector3::splat(1.0));
    }

    #[test]
    fn union_covers_both() {
        let u = unit_box_at(0.0).union(&unit_box_at(5.0));
        assert_eq!(u.min_point.x, -0.5);
        assert_eq!(u.max_point.x, 5.5);
    }
}
