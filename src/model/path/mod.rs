use std::str::FromStr;

use crate::{model::pos2::Pos2, util::float_ext::FloatExt};

mod approximator;

/// The kind of curve a slider path segment describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathType {
    Catmull,
    Bezier,
    Linear,
    PerfectCurve,
}

impl FromStr for PathType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(Self::Linear),
            "C" => Ok(Self::Catmull),
            "B" => Ok(Self::Bezier),
            "P" => Ok(Self::PerfectCurve),
            _ => Err(()),
        }
    }
}

/// A control point of a slider path, relative to the slider's position.
///
/// A point carrying a [`PathType`] starts a new segment.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PathControlPoint {
    pub pos: Pos2,
    pub path_type: Option<PathType>,
}

impl PathControlPoint {
    pub const fn new(pos: Pos2) -> Self {
        Self {
            pos,
            path_type: None,
        }
    }

    pub const fn with_type(pos: Pos2, path_type: PathType) -> Self {
        Self {
            pos,
            path_type: Some(path_type),
        }
    }
}

/// The geometric path of a slider.
///
/// The approximated vertices and their cumulative lengths are computed on
/// construction; modifying a path means building a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderPath {
    control_points: Vec<PathControlPoint>,
    expected_dist: Option<f64>,
    calculated_path: Vec<Pos2>,
    cumulative_len: Vec<f64>,
}

impl SliderPath {
    pub fn new(control_points: Vec<PathControlPoint>, expected_dist: Option<f64>) -> Self {
        let mut path = Self {
            control_points,
            expected_dist,
            calculated_path: Vec::new(),
            cumulative_len: Vec::new(),
        };

        path.calculate_path();
        path.calculate_cumulative_len();

        path
    }

    pub fn control_points(&self) -> &[PathControlPoint] {
        &self.control_points
    }

    /// The distance given by the chart, if any.
    pub const fn expected_dist(&self) -> Option<f64> {
        self.expected_dist
    }

    /// The length of the path after truncating or extending it to the
    /// expected distance.
    pub fn dist(&self) -> f64 {
        self.cumulative_len.last().copied().unwrap_or(0.0)
    }

    /// The approximated vertices of the path.
    pub fn calculated_path(&self) -> &[Pos2] {
        &self.calculated_path
    }

    /// Position at the given progress along the path, relative to the
    /// slider's position. The progress is clamped to `0.0..=1.0`.
    pub fn position_at(&self, progress: f64) -> Pos2 {
        let d = progress.clamp(0.0, 1.0) * self.dist();
        let i = self.idx_of_dist(d);

        self.interpolate_vertices(i, d)
    }

    /// A copy of this path mirrored along the x-axis.
    pub fn flipped_vertically(&self) -> Self {
        let control_points = self
            .control_points
            .iter()
            .map(|point| PathControlPoint {
                pos: Pos2::new(point.pos.x, -point.pos.y),
                path_type: point.path_type,
            })
            .collect();

        Self::new(control_points, self.expected_dist)
    }

    fn calculate_path(&mut self) {
        self.calculated_path.clear();

        let Some(first) = self.control_points.first() else {
            return;
        };

        let mut segment_type = first.path_type.unwrap_or(PathType::Linear);
        let mut start = 0;

        for i in 0..self.control_points.len() {
            let is_last = i == self.control_points.len() - 1;
            let starts_segment = i > start && self.control_points[i].path_type.is_some();

            if starts_segment || is_last {
                let vertices: Vec<Pos2> = self.control_points[start..=i]
                    .iter()
                    .map(|point| point.pos)
                    .collect();

                let subpath = Self::approximate_segment(segment_type, &vertices);

                for vertex in subpath {
                    if self.calculated_path.last() != Some(&vertex) {
                        self.calculated_path.push(vertex);
                    }
                }

                if let Some(next_type) = self.control_points[i].path_type {
                    segment_type = next_type;
                }

                start = i;
            }
        }
    }

    fn approximate_segment(path_type: PathType, vertices: &[Pos2]) -> Vec<Pos2> {
        match path_type {
            PathType::Linear => approximator::linear(vertices),
            PathType::Catmull => approximator::catmull(vertices),
            PathType::Bezier => approximator::bezier(vertices),
            // Degenerate arcs are drawn as bezier curves
            PathType::PerfectCurve => approximator::circular_arc(vertices)
                .unwrap_or_else(|| approximator::bezier(vertices)),
        }
    }

    fn calculate_cumulative_len(&mut self) {
        let mut calculated_len = 0.0;
        self.cumulative_len.clear();
        self.cumulative_len.push(0.0);

        for window in self.calculated_path.windows(2) {
            let diff = window[1] - window[0];
            calculated_len += f64::from(diff.length());
            self.cumulative_len.push(calculated_len);
        }

        let Some(expected_dist) = self.expected_dist else {
            return;
        };

        if FloatExt::eq(calculated_len, expected_dist) {
            return;
        }

        // The end is not extended if the last two control points coincide
        if let [.., second_last, last] = self.control_points.as_slice() {
            if second_last.pos == last.pos && expected_dist > calculated_len {
                return;
            }
        }

        // The last length is always incorrect
        self.cumulative_len.pop();

        let mut path_end_idx = self.calculated_path.len().saturating_sub(1);

        if calculated_len > expected_dist {
            while self
                .cumulative_len
                .last()
                .is_some_and(|&len| len >= expected_dist)
            {
                self.cumulative_len.pop();
                self.calculated_path.truncate(path_end_idx);
                path_end_idx = path_end_idx.saturating_sub(1);
            }
        }

        if path_end_idx == 0 {
            // Expected distance is negative or zero
            self.calculated_path.truncate(1);
            self.cumulative_len.clear();
            self.cumulative_len.push(0.0);

            return;
        }

        let prev = self.calculated_path[path_end_idx - 1];
        let dir = (self.calculated_path[path_end_idx] - prev)
            .normalize()
            .unwrap_or_default();

        let remaining = expected_dist - self.cumulative_len.last().copied().unwrap_or(0.0);
        self.calculated_path[path_end_idx] = prev + dir * remaining as f32;
        self.calculated_path.truncate(path_end_idx + 1);
        self.cumulative_len.push(expected_dist);
    }

    fn idx_of_dist(&self, d: f64) -> usize {
        match self
            .cumulative_len
            .binary_search_by(|probe| probe.total_cmp(&d))
        {
            Ok(i) | Err(i) => i,
        }
    }

    fn interpolate_vertices(&self, i: usize, d: f64) -> Pos2 {
        let Some(&first) = self.calculated_path.first() else {
            return Pos2::zero();
        };

        if i == 0 {
            return first;
        } else if i >= self.calculated_path.len() {
            return self.calculated_path[self.calculated_path.len() - 1];
        }

        let p0 = self.calculated_path[i - 1];
        let p1 = self.calculated_path[i];

        let d0 = self.cumulative_len[i - 1];
        let d1 = self.cumulative_len[i];

        if d0.almost_eq(d1, 1e-7) {
            return p0;
        }

        let w = (d - d0) / (d1 - d0);

        p0 + (p1 - p0) * w as f32
    }
}
