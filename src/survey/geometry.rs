//! Vector geometry on Cartesian `[f64; 3]` coordinates.
//!
//! Every function is pure. Operations that are undefined for degenerate
//! input (zero-length vectors, parallel plane spans) return `None` instead
//! of propagating NaN.

pub type Vec3 = [f64; 3];

/// Vectors shorter than this (Å) are treated as zero-length.
pub const LENGTH_EPSILON: f64 = 1e-9;

/// Minimum sine of the angle between two plane-spanning vectors.
pub const COLLINEARITY_EPSILON: f64 = 1e-6;

#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale(v: Vec3, s: f64) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm(v: Vec3) -> f64 {
    dot(v, v).sqrt()
}

pub fn normalize(v: Vec3) -> Option<Vec3> {
    let len = norm(v);
    if len < LENGTH_EPSILON {
        None
    } else {
        Some(scale(v, 1.0 / len))
    }
}

/// Arccosine in degrees with the ratio clamped to [-1, 1].
#[inline]
pub fn acos_degrees(ratio: f64) -> f64 {
    ratio.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(p: Vec3, q: Vec3) -> f64 {
    norm(sub(p, q))
}

/// Angle at `vertex` between the rays to `p` and `q`, in degrees within [0, 180].
///
/// Returns `None` when either ray has zero length.
pub fn angle(p: Vec3, vertex: Vec3, q: Vec3) -> Option<f64> {
    let a = sub(p, vertex);
    let b = sub(q, vertex);
    let len_a = norm(a);
    let len_b = norm(b);
    if len_a < LENGTH_EPSILON || len_b < LENGTH_EPSILON {
        return None;
    }
    Some(acos_degrees(dot(a, b) / (len_a * len_b)))
}

/// Normal of the plane spanned by `v1` and `v2` (their cross product).
///
/// Magnitude is `|v1||v2| sin θ`; use [`unit_normal`] when the span may be degenerate.
#[inline]
pub fn plane_normal(v1: Vec3, v2: Vec3) -> Vec3 {
    cross(v1, v2)
}

/// Unit plane normal, or `None` when `v1` and `v2` are (nearly) parallel or zero.
pub fn unit_normal(v1: Vec3, v2: Vec3) -> Option<Vec3> {
    let len1 = norm(v1);
    let len2 = norm(v2);
    if len1 < LENGTH_EPSILON || len2 < LENGTH_EPSILON {
        return None;
    }
    let n = plane_normal(v1, v2);
    let len_n = norm(n);
    if len_n <= COLLINEARITY_EPSILON * len1 * len2 {
        return None;
    }
    Some(scale(n, 1.0 / len_n))
}

/// In-plane residual `v - (v·n̂)n̂`. `None` when `normal` has zero length.
pub fn project_onto_plane(v: Vec3, normal: Vec3) -> Option<Vec3> {
    decompose(v, normal).map(|d| d.in_plane)
}

/// A vector split relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposition {
    pub in_plane: Vec3,
    /// Signed length along the unit normal.
    pub out_of_plane: f64,
}

pub fn decompose(v: Vec3, normal: Vec3) -> Option<Decomposition> {
    let n_hat = normalize(normal)?;
    let out_of_plane = dot(v, n_hat);
    Some(Decomposition {
        in_plane: sub(v, scale(n_hat, out_of_plane)),
        out_of_plane,
    })
}
