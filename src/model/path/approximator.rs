use std::f64::consts::PI;

use crate::model::pos2::{DivisionByZero, Pos2};

const BEZIER_TOLERANCE: f32 = 0.25;
const CATMULL_DETAIL: usize = 50;
const CIRCULAR_ARC_TOLERANCE: f32 = 0.1;

pub(crate) fn linear(points: &[Pos2]) -> Vec<Pos2> {
    points.to_vec()
}

/// Piecewise bezier curve where a repeated point splits the segments.
pub(crate) fn bezier(points: &[Pos2]) -> Vec<Pos2> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut result = Vec::new();
    let mut start = 0;

    for (end, (curr, next)) in (1..).zip(points.iter().zip(points.iter().skip(1))) {
        if end - start > 1 && curr == next {
            bezier_segment(&mut result, &points[start..end]);
            start = end;
        }
    }

    bezier_segment(&mut result, &points[start..]);

    result
}

fn bezier_segment(result: &mut Vec<Pos2>, points: &[Pos2]) {
    if points.len() < 2 {
        result.extend_from_slice(points);

        return;
    }

    let step = (BEZIER_TOLERANCE / points.len() as f32).max(0.01);
    let n = points.len() as i32 - 1;
    let steps = (1.0 / step).ceil() as usize;

    for k in 0..=steps {
        let t = (k as f32 * step).min(1.0);

        let point = (0..).zip(points).fold(Pos2::zero(), |point, (p, curr)| {
            let factor = binomial(p, n) * (1.0 - t).powi(n - p) * t.powi(p);

            point + *curr * factor
        });

        result.push(point);
    }
}

fn binomial(mut p: i32, n: i32) -> f32 {
    if p < 0 || p > n {
        return 0.0;
    }

    p = p.min(n - p);
    let mut out = 1.0;

    for i in 1..=p {
        out *= (n - p + i) as f32 / i as f32;
    }

    out
}

pub(crate) fn catmull(points: &[Pos2]) -> Vec<Pos2> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let order = points.len();
    let mut result = Vec::with_capacity((order - 1) * CATMULL_DETAIL * 2);

    for i in 0..order - 1 {
        let v1 = if i > 0 { points[i - 1] } else { points[i] };
        let v2 = points[i];
        let v3 = if i < order - 1 {
            points[i + 1]
        } else {
            v2 + v2 - v1
        };
        let v4 = if i < order - 2 {
            points[i + 2]
        } else {
            v3 + v3 - v2
        };

        for c in 0..CATMULL_DETAIL {
            let t0 = c as f32 / CATMULL_DETAIL as f32;
            let t1 = (c + 1) as f32 / CATMULL_DETAIL as f32;

            result.push(catmull_point(v1, v2, v3, v4, t0));
            result.push(catmull_point(v1, v2, v3, v4, t1));
        }
    }

    result
}

fn catmull_point(v1: Pos2, v2: Pos2, v3: Pos2, v4: Pos2, t: f32) -> Pos2 {
    let t2 = t * t;
    let t3 = t * t2;

    let component = |p0: f32, p1: f32, p2: f32, p3: f32| {
        0.5 * (2.0 * p1
            + (-p0 + p2) * t
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
            + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
    };

    Pos2::new(
        component(v1.x, v2.x, v3.x, v4.x),
        component(v1.y, v2.y, v3.y, v4.y),
    )
}

/// Circle through three points.
struct CircularArc {
    center: Pos2,
    radius: f32,
    theta_start: f64,
    theta_range: f64,
    direction: f64,
}

impl CircularArc {
    fn new(a: Pos2, b: Pos2, c: Pos2) -> Result<Option<Self>, DivisionByZero> {
        // Collinear points have no circumcircle
        if ((b.y - a.y) * (c.x - a.x) - (b.x - a.x) * (c.y - a.y)).abs() < 1e-3 {
            return Ok(None);
        }

        let d = 2.0 * (a.x * (b - c).y + b.x * (c - a).y + c.x * (a - b).y);
        let a_sq = a.length_squared();
        let b_sq = b.length_squared();
        let c_sq = c.length_squared();

        let center = Pos2::new(
            a_sq * (b - c).y + b_sq * (c - a).y + c_sq * (a - b).y,
            a_sq * (c - b).x + b_sq * (a - c).x + c_sq * (b - a).x,
        )
        .try_div(d)?;

        let d_a = a - center;
        let d_c = c - center;

        let radius = d_a.length();
        let theta_start = f64::from(d_a.y).atan2(f64::from(d_a.x));
        let mut theta_end = f64::from(d_c.y).atan2(f64::from(d_c.x));

        while theta_end < theta_start {
            theta_end += 2.0 * PI;
        }

        let mut direction = 1.0;
        let mut theta_range = theta_end - theta_start;

        // Decide whether to go clockwise or counter-clockwise
        let ortho_a_to_c = Pos2::new((c - a).y, -(c - a).x);

        if ortho_a_to_c.dot(b - a) < 0.0 {
            direction = -direction;
            theta_range = 2.0 * PI - theta_range;
        }

        Ok(Some(Self {
            center,
            radius,
            theta_start,
            theta_range,
            direction,
        }))
    }
}

/// Approximate a circular arc through three points.
///
/// Returns `None` if the points do not describe a proper arc in which case the
/// caller should fall back to a different curve type.
pub(crate) fn circular_arc(points: &[Pos2]) -> Option<Vec<Pos2>> {
    let [a, b, c] = points else {
        return None;
    };

    let arc = CircularArc::new(*a, *b, *c).ok()??;

    let amount_points = if 2.0 * arc.radius <= CIRCULAR_ARC_TOLERANCE {
        2
    } else {
        let divisor = 2.0 * f64::from(1.0 - CIRCULAR_ARC_TOLERANCE / arc.radius).acos();

        ((arc.theta_range / divisor).ceil() as usize).max(2)
    };

    let points = (0..amount_points)
        .map(|i| {
            let fract = i as f64 / (amount_points - 1) as f64;
            let theta = arc.theta_start + arc.direction * fract * arc.theta_range;
            let offset = Pos2::new(theta.cos() as f32, theta.sin() as f32) * arc.radius;

            arc.center + offset
        })
        .collect();

    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bezier_endpoints() {
        let points = [Pos2::zero(), Pos2::new(50.0, 100.0), Pos2::new(100.0, 0.0)];
        let curve = bezier(&points);

        assert_eq!(curve[0], Pos2::zero());

        let last = curve[curve.len() - 1];
        assert!((last.x - 100.0).abs() < 1e-3 && last.y.abs() < 1e-3);
    }

    #[test]
    fn arc_through_three_points() {
        let points = [Pos2::zero(), Pos2::new(50.0, 50.0), Pos2::new(100.0, 0.0)];
        let arc = circular_arc(&points).unwrap();

        let last = arc[arc.len() - 1];
        assert!((last.x - 100.0).abs() < 1e-2 && last.y.abs() < 1e-2);

        // Center is (50, 0) with radius 50
        assert!(arc.iter().all(|p| (p.distance(Pos2::new(50.0, 0.0)) - 50.0).abs() < 1e-2));
    }

    #[test]
    fn collinear_arc_is_rejected() {
        let points = [Pos2::zero(), Pos2::new(50.0, 0.0), Pos2::new(100.0, 0.0)];

        assert!(circular_arc(&points).is_none());
    }
}
