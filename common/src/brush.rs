use glam::Vec3;

use crate::plane::{Plane, PLANE_EPSILON};

/// The face a single brush plane contributes to the solid.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    /// Index of the source plane in the brush.
    pub plane: usize,
    /// Boundary, counter-clockwise when looking down the plane normal.
    pub vertices: Vec<Vec3>,
    pub centroid: Vec3,
}

/// Whether `point` is inside every half-space of the brush, boundary included.
pub fn point_in_brush(planes: &[Plane], point: Vec3) -> bool {
    planes.iter().all(|plane| plane.contains(point))
}

/// Corners of the brush that lie on `planes[index]`, in no particular order.
///
/// Every unordered pair `(p2, p3)` of brush planes (including `planes[index]` itself, whose
/// triples are singular and fall out) is intersected with the plane, and the point is kept if
/// it is inside the whole brush. For `n` planes that is O(n²) solves per plane and O(n³) per
/// brush, each followed by an O(n) containment test. Brushes rarely have more than a dozen
/// sides, so no adjacency pruning is done here; a smarter enumeration can replace this
/// function as long as it returns the same point set.
///
/// Corners where more than three planes meet are found once per triple; those repeats are
/// merged so a corner appears once.
pub fn plane_vertices(planes: &[Plane], index: usize) -> Vec<Vec3> {
    let p1 = &planes[index];
    let mut points: Vec<Vec3> = Vec::new();

    for (j, p2) in planes.iter().enumerate() {
        for p3 in &planes[j..] {
            let Some(point) = p1.intersect(p2, p3) else {
                continue;
            };
            if !point_in_brush(planes, point) {
                continue;
            }
            if points.iter().any(|p| p.abs_diff_eq(point, PLANE_EPSILON)) {
                continue;
            }
            points.push(point);
        }
    }

    points
}

/// Arithmetic mean of `points`.
pub fn centroid(points: &[Vec3]) -> Vec3 {
    points.iter().copied().sum::<Vec3>() / points.len() as f32
}

/// Order coplanar `points` counter-clockwise around `plane.normal`.
///
/// The first point fixes a tangent axis through the centroid. Each point is classified by the
/// side of that axis it falls on and by its progress along it, which puts it in one of four
/// quadrants. Sorting inside a quadrant by the signed progress and concatenating quadrants in
/// order gives the angular order without evaluating any angles.
pub fn wind(plane: &Plane, points: &[Vec3], centroid: Vec3) -> Vec<Vec3> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let tangent = (*first - centroid).normalize_or_zero();

    let mut quadrants: [Vec<(f32, Vec3)>; 4] = Default::default();

    for &point in points {
        let dir = (point - centroid).normalize_or_zero();

        let side = plane.distance(tangent.cross(dir) + centroid);
        let along = tangent.dot(dir);

        let quadrant = match (side >= 0.0, along >= 0.0) {
            (true, true) => 0,
            (true, false) => 1,
            (false, false) => 2,
            (false, true) => 3,
        };
        let key = if side < 0.0 { -along } else { along };

        quadrants[quadrant].push((key, point));
    }

    quadrants
        .into_iter()
        .flat_map(|mut quadrant| {
            quadrant.sort_by(|a, b| b.0.total_cmp(&a.0));
            quadrant.into_iter().map(|(_, point)| point)
        })
        .collect()
}

/// Solve the faces of a brush from its bounding planes.
///
/// Planes that end up with fewer than three corners do not touch the solid (or only touch it
/// along an edge or at a corner) and produce no polygon.
pub fn get_vertices(planes: &[Plane]) -> Vec<Polygon> {
    planes
        .iter()
        .enumerate()
        .filter_map(|(index, plane)| {
            let points = plane_vertices(planes, index);
            if points.len() < 3 {
                log::trace!("Plane {index} touches the brush at {} points, skipped", points.len());
                return None;
            }

            let centroid = centroid(&points);
            let vertices = wind(plane, &points, centroid);

            Some(Polygon {
                plane: index,
                vertices,
                centroid,
            })
        })
        .collect()
}

/// Whether the first three vertices wind the same way as `plane`.
///
/// A `false` here means the solver produced an inverted polygon. Callers report it, they do not
/// flip the polygon.
pub fn winding_matches(plane: &Plane, vertices: &[Vec3]) -> bool {
    let [v0, v1, v2, ..] = vertices else {
        return false;
    };
    Plane::from_points(*v0, *v1, *v2).is_some_and(|wound| wound.normal.dot(plane.normal) > 0.0)
}

/// Fan triangles of a convex polygon with `count` vertices, anchored on vertex 0.
///
/// Yields exactly `count - 2` triangles for `count >= 3`, and none otherwise.
pub fn fan_triangulate(count: usize) -> impl Iterator<Item = [usize; 3]> {
    (2..count.max(2)).map(|i| [0, i - 1, i])
}

#[cfg(test)]
mod brush_tests {
    use glam::vec3;

    use super::*;

    fn unit_cube() -> Vec<Plane> {
        let min = Vec3::splat(-1.0);
        let max = Vec3::splat(1.0);
        vec![
            Plane::new(min, Vec3::NEG_Y),
            Plane::new(min, Vec3::NEG_X),
            Plane::new(min, Vec3::NEG_Z),
            Plane::new(max, Vec3::Y),
            Plane::new(max, Vec3::X),
            Plane::new(max, Vec3::Z),
        ]
    }

    /// Triangular prism with a slanted side, plus a plane that never touches it.
    fn wedge() -> Vec<Plane> {
        vec![
            Plane::new(vec3(-1.0, 0.0, 0.0), Vec3::NEG_X),
            Plane::new(vec3(0.0, -1.0, 0.0), Vec3::NEG_Y),
            Plane::new(Vec3::ZERO, vec3(1.0, 1.0, 0.0)),
            Plane::new(vec3(0.0, 0.0, -1.0), Vec3::NEG_Z),
            Plane::new(vec3(0.0, 0.0, 1.0), Vec3::Z),
            Plane::new(vec3(5.0, 0.0, 0.0), Vec3::X),
        ]
    }

    fn area(vertices: &[Vec3]) -> f32 {
        fan_triangulate(vertices.len())
            .map(|[a, b, c]| {
                (vertices[b] - vertices[a])
                    .cross(vertices[c] - vertices[a])
                    .length()
                    * 0.5
            })
            .sum()
    }

    #[test]
    fn unit_cube_has_six_quads() {
        let planes = unit_cube();
        let polygons = get_vertices(&planes);

        assert_eq!(polygons.len(), 6);

        let mut corners: Vec<Vec3> = Vec::new();
        let mut triangles = 0;

        for polygon in &polygons {
            let plane = &planes[polygon.plane];

            assert_eq!(polygon.vertices.len(), 4);
            assert!(plane.distance(polygon.centroid).abs() < 1e-5);

            for v in &polygon.vertices {
                assert!(plane.distance(*v).abs() < 1e-5);
                assert!(v.abs().abs_diff_eq(Vec3::ONE, 1e-5));
                if !corners.iter().any(|c| c.abs_diff_eq(*v, 1e-5)) {
                    corners.push(*v);
                }
            }

            triangles += fan_triangulate(polygon.vertices.len()).count();
        }

        assert_eq!(corners.len(), 8);
        assert_eq!(triangles, 12);
    }

    #[test]
    fn polygons_are_closed() {
        for planes in [unit_cube(), wedge()] {
            for polygon in get_vertices(&planes) {
                for v in &polygon.vertices {
                    for (i, plane) in planes.iter().enumerate() {
                        let d = plane.distance(*v);
                        if i == polygon.plane {
                            assert!(d.abs() < 1e-4, "vertex {v} is {d} off its own plane");
                        } else {
                            assert!(d <= PLANE_EPSILON, "vertex {v} is outside plane {i}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn polygons_wind_counter_clockwise() {
        for planes in [unit_cube(), wedge()] {
            for polygon in get_vertices(&planes) {
                let plane = &planes[polygon.plane];

                assert!(winding_matches(plane, &polygon.vertices));

                // every consecutive edge turns the same way, so the whole loop is convex and CCW
                let n = polygon.vertices.len();
                for i in 0..n {
                    let a = polygon.vertices[i];
                    let b = polygon.vertices[(i + 1) % n];
                    let c = polygon.vertices[(i + 2) % n];
                    assert!((b - a).cross(c - b).dot(plane.normal) > 0.0);
                }
            }
        }
    }

    #[test]
    fn wedge_drops_the_redundant_plane() {
        let planes = wedge();
        let polygons = get_vertices(&planes);

        assert_eq!(polygons.len(), 5);
        assert!(polygons.iter().all(|p| p.plane != 5));

        let mut sizes: Vec<usize> = polygons.iter().map(|p| p.vertices.len()).collect();
        sizes.sort();
        assert_eq!(sizes, vec![3, 3, 4, 4, 4]);

        let slanted = polygons.iter().find(|p| p.plane == 2).unwrap();
        // 2 * sqrt(2) long and 2 tall
        assert!((area(&slanted.vertices) - 4.0 * 2f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn plane_touching_an_edge_is_skipped() {
        let mut planes = unit_cube();
        planes.push(Plane::new(vec3(1.0, 1.0, 0.0), vec3(1.0, 1.0, 0.0)));

        let polygons = get_vertices(&planes);

        assert_eq!(polygons.len(), 6);
        assert!(polygons.iter().all(|p| p.vertices.len() == 4));
    }

    #[test]
    fn fan_covers_the_polygon() {
        assert_eq!(fan_triangulate(0).count(), 0);
        assert_eq!(fan_triangulate(2).count(), 0);
        assert_eq!(fan_triangulate(3).collect::<Vec<_>>(), vec![[0, 1, 2]]);
        assert_eq!(
            fan_triangulate(5).collect::<Vec<_>>(),
            vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]
        );

        // regular hexagon of circumradius 1
        let hexagon: Vec<Vec3> = (0..6)
            .map(|i| {
                let a = i as f32 * std::f32::consts::FRAC_PI_3;
                vec3(a.cos(), a.sin(), 0.0)
            })
            .collect();

        assert_eq!(fan_triangulate(hexagon.len()).count(), 4);
        assert!((area(&hexagon) - 1.5 * 3f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn inverted_winding_is_reported() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Z);
        let ccw = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let cw = [Vec3::ZERO, Vec3::Y, Vec3::X];

        assert!(winding_matches(&plane, &ccw));
        assert!(!winding_matches(&plane, &cw));
        assert!(!winding_matches(&plane, &ccw[..2]));
    }
}
