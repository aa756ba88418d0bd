//! Texture coordinates for brush faces, using the editor's planar projection.
//!
//! A face is textured by projecting its vertices onto the axis-aligned plane closest to it. The
//! editor fields then offset, rotate and scale the projection.

use glam::{UVec2, Vec2, Vec3};

/// Texture fields of a brush side, as written by the editor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextureAttributes {
    pub offset_u: f32,
    pub offset_v: f32,
    pub angle_degrees: f32,
    pub scale_u: f32,
    pub scale_v: f32,
}

impl Default for TextureAttributes {
    fn default() -> Self {
        Self {
            offset_u: 0.0,
            offset_v: 0.0,
            angle_degrees: 0.0,
            scale_u: 1.0,
            scale_v: 1.0,
        }
    }
}

/// Reference normal, u axis and v axis for each projection, in the Y-up world.
const BASE_AXES: [[Vec3; 3]; 6] = [
    // floor
    [Vec3::Y, Vec3::Z, Vec3::NEG_X],
    // ceiling
    [Vec3::NEG_Y, Vec3::Z, Vec3::NEG_X],
    [Vec3::Z, Vec3::X, Vec3::NEG_Y],
    [Vec3::NEG_Z, Vec3::X, Vec3::NEG_Y],
    [Vec3::X, Vec3::Z, Vec3::NEG_Y],
    [Vec3::NEG_X, Vec3::Z, Vec3::NEG_Y],
];

/// The u and v axes of the projection whose reference normal is closest to `normal`.
/// Ties go to the earlier entry, so floors win over walls.
pub fn base_axes(normal: Vec3) -> (Vec3, Vec3) {
    let mut best = 0;
    let mut best_dot = f32::NEG_INFINITY;

    for (i, [reference, ..]) in BASE_AXES.iter().enumerate() {
        let dot = normal.dot(*reference);
        if dot > best_dot {
            best = i;
            best_dot = dot;
        }
    }

    (BASE_AXES[best][1], BASE_AXES[best][2])
}

fn sin_cos_degrees(angle: f32) -> (f32, f32) {
    let angle = angle.rem_euclid(360.0);
    if angle == 0.0 {
        (0.0, 1.0)
    } else if angle == 90.0 {
        (1.0, 0.0)
    } else if angle == 180.0 {
        (0.0, -1.0)
    } else if angle == 270.0 {
        (-1.0, 0.0)
    } else {
        angle.to_radians().sin_cos()
    }
}

fn first_nonzero(axis: Vec3) -> usize {
    if axis.x != 0.0 {
        0
    } else if axis.y != 0.0 {
        1
    } else {
        2
    }
}

fn scale_or_one(scale: f32) -> f32 {
    if scale == 0.0 {
        1.0
    } else {
        scale
    }
}

/// Projection axes for a face, rotated and divided by the texture scale.
///
/// The rotation happens in the plane of the world components the unrotated u and v axes
/// point along. That is the reference plane for all six projections, but the sense of the
/// rotation is not guaranteed to match what the editor shows.
pub fn texture_axes(normal: Vec3, attributes: &TextureAttributes) -> (Vec3, Vec3) {
    let (mut u, mut v) = base_axes(normal);

    let (sin, cos) = sin_cos_degrees(attributes.angle_degrees);
    let s = first_nonzero(u);
    let t = first_nonzero(v);

    for axis in [&mut u, &mut v] {
        let ns = cos * axis[s] - sin * axis[t];
        let nt = sin * axis[s] + cos * axis[t];
        axis[s] = ns;
        axis[t] = nt;
    }

    (
        u / scale_or_one(attributes.scale_u),
        v / scale_or_one(attributes.scale_v),
    )
}

/// Texture coordinate of `point` on a face with the given normal, in units of the texture size.
pub fn project_uv(
    texture_size: UVec2,
    normal: Vec3,
    point: Vec3,
    attributes: &TextureAttributes,
) -> Vec2 {
    let (u, v) = texture_axes(normal, attributes);
    let size = texture_size.as_vec2();

    Vec2::new(
        (u.dot(point) + attributes.offset_u) / size.x,
        (v.dot(point) + attributes.offset_v) / size.y,
    )
}
