//! Analytic time-of-impact solvers.
//!
//! All shapes are swept linearly between their buffered (t0) and current
//! (t1) poses. Each solver returns the smallest non-negative root of the
//! contact condition, or `None` when the motion is degenerate or the paths
//! never touch. Callers decide which times count as a hit in the step
//! (usually `t <= 1.0`).

use crate::math::{is_approx_zero, Vec2};

/// Time and relative segment position of a point-line contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLineContact {
    /// Normalized time of contact within the step.
    pub t: f64,
    /// Position of the contact along the segment, 0 at the start vertex and
    /// 1 at the end vertex.
    pub alpha: f64,
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    Some(((-b + sq) / (2.0 * a), (-b - sq) / (2.0 * a)))
}

fn smallest_non_negative(candidates: impl IntoIterator<Item = f64>) -> Option<f64> {
    candidates
        .into_iter()
        .filter(|&t| t >= 0.0)
        .min_by(|a, b| a.total_cmp(b))
}

/// TOI of a moving point against a moving circle.
///
/// With the relative start offset `a = p0 - c0` and relative displacement
/// `b = (p1 - p0) - (c1 - c0)`, contact happens where
/// `|a + t b| = radius`, a quadratic in t. A near-zero leading coefficient
/// means point and circle move in lockstep: no contact.
pub fn point_circle(p0: Vec2, p1: Vec2, c0: Vec2, c1: Vec2, radius: f64) -> Option<f64> {
    let a = p0 - c0;
    let b = (p1 - p0) - (c1 - c0);

    let qa = b.dot(b);
    if is_approx_zero(qa) {
        return None;
    }
    let qb = 2.0 * a.dot(b);
    let qc = a.dot(a) - radius * radius;

    let (t1, t2) = quadratic_roots(qa, qb, qc)?;
    smallest_non_negative([t1, t2])
}

/// TOI of two moving circles.
///
/// Solved as a point against a circle of combined radius: `ra + rb` when the
/// circles start separated, `ra - rb` when one starts inside the other (the
/// inner circle then hits the containing boundary; the sign is irrelevant
/// since the radius is squared).
pub fn circle_circle(
    ca0: Vec2,
    ca1: Vec2,
    ra: f64,
    cb0: Vec2,
    cb1: Vec2,
    rb: f64,
) -> Option<f64> {
    let a = ca0 - cb0;
    let r = if a.magnitude() >= ra + rb {
        ra + rb
    } else {
        ra - rb
    };
    let b = (ca1 - ca0) - (cb1 - cb0);

    let bb = b.dot(b);
    if is_approx_zero(bb) {
        return None;
    }
    // Normalized quadratic: t^2 + 2 p t + q = 0
    let p = a.dot(b) / bb;
    let q = (a.dot(a) - r * r) / bb;

    let disc = p * p - q;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    smallest_non_negative([-p + sq, -p - sq])
}

/// TOI of a moving segment against a moving circle.
///
/// The contact condition is that the circle center's distance to the segment
/// line equals the radius, expressed through the cross product
/// `seg(t) × (center(t) - start(t)) = ±radius * |seg|`. When the segment
/// vector is constant over the step the condition is linear in t; otherwise
/// each sign yields a quadratic.
///
/// The returned time places the center on the carrier line at distance
/// `radius`; the caller must still check that the center projects into the
/// segment.
pub fn line_circle(
    la0: Vec2,
    lb0: Vec2,
    la1: Vec2,
    lb1: Vec2,
    c0: Vec2,
    c1: Vec2,
    radius: f64,
) -> Option<f64> {
    let a = lb0 - la0;
    let b = (lb1 - lb0) - (la1 - la0);
    let c = c0 - la0;
    let d = (c1 - c0) - (la1 - la0);

    let length = a.magnitude();

    if is_approx_zero(b.x) && is_approx_zero(b.y) {
        // Segment vector constant: cross terms in t^2 vanish
        let den = a.cross(d);
        if is_approx_zero(den) {
            return None;
        }
        let n = a.cross(c);
        // n + t * den = +-radius * length, one tangency per sign
        smallest_non_negative([
            (length * radius - n) / den,
            (-(length * radius) - n) / den,
        ])
    } else {
        let qa = b.cross(d);
        if is_approx_zero(qa) {
            return None;
        }
        let qb = b.cross(c) + a.cross(d);
        let base = a.cross(c);

        let mut candidates = Vec::with_capacity(4);
        if let Some((t1, t2)) = quadratic_roots(qa, qb, base - radius * length) {
            candidates.push(t1);
            candidates.push(t2);
        }
        if let Some((t1, t2)) = quadratic_roots(qa, qb, base + radius * length) {
            candidates.push(t1);
            candidates.push(t2);
        }
        smallest_non_negative(candidates)
    }
}

/// TOI of a moving point against a moving segment.
///
/// Contact requires the point to lie on the segment: with `a = la0 - p0`,
/// `b = lb0 - la0`, `c` the relative point displacement and `d` the change
/// of the segment vector, the collinearity condition
/// `(a + alpha b) x (c + alpha d) * ... = 0` reduces to a quadratic in the
/// segment parameter alpha; each root in [0,1] recovers its time of contact
/// from the component equations. A static segment vector (`d ~ 0`) reduces
/// to a single linear solve.
pub fn point_line(
    p0: Vec2,
    p1: Vec2,
    la0: Vec2,
    lb0: Vec2,
    la1: Vec2,
    lb1: Vec2,
) -> Option<PointLineContact> {
    let a = la0 - p0;
    let b = lb0 - la0;
    let c = (p1 - p0) - (la1 - la0);
    let d = (lb0 - la0) - (lb1 - la1);

    if is_approx_zero(d.x) && is_approx_zero(d.y) {
        let den = b.cross(c);
        if is_approx_zero(den) {
            return None;
        }
        let alpha = -a.cross(c) / den;
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        let t = recover_time(a, b, c, d, alpha)?;
        if t >= 0.0 {
            return Some(PointLineContact { t, alpha });
        }
        return None;
    }

    let qa = b.cross(d);
    let qb = a.cross(d) + b.cross(c);
    let qc = a.cross(c);

    let alphas: [Option<f64>; 2] = if is_approx_zero(qa) {
        // Quadratic degenerates; single root in alpha
        if is_approx_zero(qb) {
            return None;
        }
        [Some(-qc / qb), None]
    } else {
        match quadratic_roots(qa, qb, qc) {
            Some((a1, a2)) => [Some(a1), Some(a2)],
            None => return None,
        }
    };

    let mut best: Option<PointLineContact> = None;
    for alpha in alphas.into_iter().flatten() {
        if !(0.0..=1.0).contains(&alpha) {
            continue;
        }
        if let Some(t) = recover_time(a, b, c, d, alpha) {
            if t >= 0.0 && best.map_or(true, |prev| t < prev.t) {
                best = Some(PointLineContact { t, alpha });
            }
        }
    }
    best
}

/// Recovers the time of contact for a given segment position from the
/// per-component equations `(a + alpha b) = t (c + alpha d)`, preferring
/// whichever component has a usable denominator.
fn recover_time(a: Vec2, b: Vec2, c: Vec2, d: Vec2, alpha: f64) -> Option<f64> {
    let num = a + b * alpha;
    let den_x = c.x + d.x * alpha;
    if !is_approx_zero(den_x) {
        return Some(num.x / den_x);
    }
    let den_y = c.y + d.y * alpha;
    if !is_approx_zero(den_y) {
        return Some(num.y / den_y);
    }
    None
}
