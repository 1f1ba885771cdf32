//! Stroke simplification, run once when a stroke is committed.
//!
//! Two stages:
//! 1. redundant-point removal drops samples closer than `min_distance` to
//!    the previously kept one;
//! 2. Ramer–Douglas–Peucker reduction, only when the stroke still has more
//!    than `max_points` samples.
//!
//! Simplification never runs while a stroke is being drawn (the line would
//! visibly jitter) and is never allowed to lose a stroke: any degenerate
//! result falls back to the unsimplified points.

use crate::model::{Point, Stroke};
use serde::{Deserialize, Serialize};

/// Deepest subdivision the Douglas–Peucker pass will perform. Segments
/// reaching it keep all of their points.
pub const MAX_DEPTH: u32 = 32;

/// Tuning for [`optimize_points`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimplifyOptions {
    pub min_distance: f32,
    pub tolerance: f32,
    pub max_points: usize,
}

impl SimplifyOptions {
    pub const PERFORMANCE: Self = Self {
        min_distance: 3.0,
        tolerance: 4.0,
        max_points: 50,
    };

    pub const BALANCED: Self = Self {
        min_distance: 1.5,
        tolerance: 2.0,
        max_points: 100,
    };

    pub const QUALITY: Self = Self {
        min_distance: 0.5,
        tolerance: 1.0,
        max_points: 200,
    };

    fn is_usable(&self) -> bool {
        self.min_distance.is_finite() && self.tolerance.is_finite()
    }
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self::BALANCED
    }
}

/// Named presets, as selected in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimplifyPreset {
    Performance,
    #[default]
    Balanced,
    Quality,
}

impl SimplifyPreset {
    pub fn options(self) -> SimplifyOptions {
        match self {
            Self::Performance => SimplifyOptions::PERFORMANCE,
            Self::Balanced => SimplifyOptions::BALANCED,
            Self::Quality => SimplifyOptions::QUALITY,
        }
    }
}

/// Keep a point only if it is at least `min_distance` from the last kept
/// one. The first and last points always survive.
#[must_use = "returns the filtered points"]
pub fn remove_redundant_points(points: &[Point], min_distance: f32) -> Vec<Point> {
    let Some((first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut kept = Vec::with_capacity(points.len());
    kept.push(*first);
    let last_idx = rest.len().saturating_sub(1);
    for (i, p) in rest.iter().enumerate() {
        let anchor = kept[kept.len() - 1];
        if i == last_idx || p.distance(&anchor) >= min_distance {
            kept.push(*p);
        }
    }
    kept
}

/// Ramer–Douglas–Peucker reduction.
///
/// Finds the interior point farthest from the chord between a segment's
/// endpoints; below `tolerance` the segment collapses to its endpoints,
/// otherwise both halves are processed. Uses an explicit work stack.
#[must_use = "returns the simplified points"]
pub fn douglas_peucker(points: &[Point], tolerance: f32) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut kept = vec![false; points.len()];
    kept[0] = true;
    kept[last] = true;

    let mut stack = vec![(0usize, last, 0u32)];
    while let Some((start, end, depth)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        if depth >= MAX_DEPTH {
            kept[start + 1..end].fill(true);
            continue;
        }

        let (split, max_dist) = farthest_from_chord(points, start, end);
        if max_dist < tolerance {
            continue;
        }
        kept[split] = true;
        stack.push((start, split, depth + 1));
        stack.push((split, end, depth + 1));
    }

    points
        .iter()
        .zip(&kept)
        .filter(|&(_, k)| *k)
        .map(|(&p, _)| p)
        .collect()
}

fn farthest_from_chord(points: &[Point], start: usize, end: usize) -> (usize, f32) {
    let mut best = (start + 1, 0.0);
    for (i, p) in points.iter().enumerate().take(end).skip(start + 1) {
        let d = perpendicular_distance(p, &points[start], &points[end]);
        if d > best.1 {
            best = (i, d);
        }
    }
    best
}

/// Distance from `p` to the infinite line through `a` and `b`; when the
/// two coincide, the distance to `a`.
fn perpendicular_distance(p: &Point, a: &Point, b: &Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx.mul_add(dx, dy * dy);

    if length_sq == 0.0 {
        return p.distance(a);
    }

    let cross = dx.mul_add(a.y - p.y, -(dy * (a.x - p.x)));
    cross.abs() / length_sq.sqrt()
}

/// Both stages: redundant-point removal, then Douglas–Peucker if the
/// result still has more than `max_points` samples.
#[must_use = "returns the simplified points"]
pub fn optimize_points(points: &[Point], options: &SimplifyOptions) -> Vec<Point> {
    let filtered = remove_redundant_points(points, options.min_distance);
    if filtered.len() > options.max_points {
        douglas_peucker(&filtered, options.tolerance)
    } else {
        filtered
    }
}

/// Simplify a committed stroke, falling back to the original when the
/// options are unusable or the result is degenerate.
pub fn simplify_committed(stroke: Stroke, options: &SimplifyOptions) -> Stroke {
    if !options.is_usable() {
        log::warn!("simplify options {options:?} are not finite; keeping {}", stroke.id);
        return stroke;
    }

    let simplified = optimize_points(&stroke.points, options);
    let degenerate = simplified.is_empty()
        || (stroke.points.len() >= 2 && simplified.len() < 2)
        || !simplified.iter().all(Point::is_finite);
    if degenerate {
        log::warn!(
            "simplifying {} produced {} points; keeping the original",
            stroke.id,
            simplified.len()
        );
        return stroke;
    }

    log::debug!(
        "simplified {}: {} -> {} points",
        stroke.id,
        stroke.points.len(),
        simplified.len()
    );
    Stroke {
        points: simplified,
        ..stroke
    }
}
