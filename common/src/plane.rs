use glam::Vec3;

/// Tolerance of the half-space test, in world units.
///
/// Vertices come out of triple-plane solves and carry float round-off. Tighter values make the
/// solver drop corners that are really on the boundary, looser values admit points from the
/// wrong side of a plane.
pub const PLANE_EPSILON: f32 = 0.001;

/// Triple products with a magnitude below this have no unique intersection point.
pub const DETERMINANT_EPSILON: f32 = 1e-6;

/// A plane stored as a point on the plane and a unit normal.
///
/// The normal points out of the half-space it bounds: points with a negative
/// [`Plane::distance`] are inside.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    /// Build a plane, normalizing `normal`.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Plane through three points, facing along `(v1 - v0) x (v2 - v0)`.
    ///
    /// Returns `None` when the points are collinear.
    pub fn from_points(v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Self> {
        let normal = (v1 - v0).cross(v2 - v0).try_normalize()?;
        Some(Self { point: v0, normal })
    }

    /// Plane through three points in the winding level editors write brush sides in.
    ///
    /// Editors list the points clockwise as seen from outside the brush, so the normal is
    /// `(p0 - p1) x (p2 - p1)` and faces out of the solid.
    pub fn from_quake_points(points: [Vec3; 3]) -> Option<Self> {
        let [p0, p1, p2] = points;
        let normal = (p0 - p1).cross(p2 - p1).try_normalize()?;
        Some(Self { point: p0, normal })
    }

    /// Signed distance of `point` from the plane, positive on the side the normal faces.
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point - self.point)
    }

    /// `normal . x = dist` form of the plane.
    pub fn dist(&self) -> f32 {
        self.normal.dot(self.point)
    }

    /// Whether `point` is inside the half-space or on its boundary.
    pub fn contains(&self, point: Vec3) -> bool {
        self.distance(point) <= PLANE_EPSILON
    }

    /// The single point shared by `self`, `p1` and `p2`.
    ///
    /// Solves the 3x3 system with the three normals as rows. When the triple product
    /// `p2.normal . (self.normal x p1.normal)` is (nearly) zero the planes meet in a line, in
    /// nothing, or are the same plane, and there is no unique point.
    pub fn intersect(&self, p1: &Plane, p2: &Plane) -> Option<Vec3> {
        let n0 = self.normal;
        let n1 = p1.normal;
        let n2 = p2.normal;

        let det = n2.dot(n0.cross(n1));
        if det.abs() < DETERMINANT_EPSILON {
            return None;
        }

        // Cramer's rule written with cross products
        let point = (n1.cross(n2) * self.dist() + n2.cross(n0) * p1.dist() + n0.cross(n1) * p2.dist())
            / det;

        Some(point)
    }
}
