//! Stroke erasing by re-segmentation.
//!
//! An eraser sample at `(x, y)` hits a stroke when any of its *vertices* lies
//! strictly closer than the threshold. A hit stroke is replaced by the runs
//! of vertices the eraser did not touch; runs shorter than two points are
//! dropped. Segments between two far vertices are not tested, so a fast
//! stroke with widely spaced samples can slip past the eraser.

use crate::model::Stroke;
use smallvec::SmallVec;

pub const DEFAULT_ERASE_THRESHOLD: f32 = 20.0;

/// What is left of one stroke after an erase sample. Usually zero, one or
/// two pieces.
pub type Fragments = SmallVec<[Stroke; 2]>;

/// Whether any vertex of `stroke` lies within `threshold` of `(x, y)`.
pub fn stroke_hit(stroke: &Stroke, x: f32, y: f32, threshold: f32) -> bool {
    stroke.points.iter().any(|p| p.distance_to(x, y) < threshold)
}

/// Split `stroke` around the eraser at `(x, y)`.
///
/// Returns `None` when the eraser misses the stroke. Otherwise returns the
/// surviving runs, each at least two points long, as new strokes with the
/// original style and derived ids. An empty result means the stroke was
/// erased entirely.
pub fn split_stroke(stroke: &Stroke, x: f32, y: f32, threshold: f32) -> Option<Fragments> {
    if !stroke_hit(stroke, x, y, threshold) {
        return None;
    }

    let mut fragments = Fragments::new();
    let mut run = Vec::new();
    for p in &stroke.points {
        if p.distance_to(x, y) < threshold {
            if run.len() >= 2 {
                fragments.push(stroke.fragment(std::mem::take(&mut run)));
            } else {
                run.clear();
            }
        } else {
            run.push(*p);
        }
    }
    if run.len() >= 2 {
        fragments.push(stroke.fragment(run));
    }

    log::debug!(
        "erase at ({x:.1}, {y:.1}) split {} into {} piece(s)",
        stroke.id,
        fragments.len()
    );
    Some(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::StrokeId;
    use crate::model::{Point, StrokeStyle};

    struct EraseOutcome {
        strokes: Vec<Stroke>,
        hits: usize,
    }

    /// One eraser sample over a whole stroke list, hit strokes replaced in
    /// place by their pieces.
    fn erase_at(strokes: &[Stroke], x: f32, y: f32, threshold: f32) -> EraseOutcome {
        let mut out = EraseOutcome {
            strokes: Vec::with_capacity(strokes.len()),
            hits: 0,
        };
        for stroke in strokes {
            match split_stroke(stroke, x, y, threshold) {
                Some(pieces) => {
                    out.hits += 1;
                    out.strokes.extend(pieces);
                }
                None => out.strokes.push(stroke.clone()),
            }
        }
        out
    }

    fn horizontal(name: &str, xs: &[f32]) -> Stroke {
        Stroke::from_points(
            StrokeId::intern(name),
            xs.iter().map(|&x| Point::new(x, 100.0)).collect(),
            StrokeStyle::default(),
        )
    }

    #[test]
    fn miss_is_noop() {
        let s = horizontal("miss", &[0.0, 10.0, 20.0]);
        assert!(split_stroke(&s, 500.0, 500.0, 20.0).is_none());
        let out = erase_at(std::slice::from_ref(&s), 500.0, 500.0, 20.0);
        assert_eq!(out.hits, 0);
        assert_eq!(out.strokes, vec![s]);
    }

    #[test]
    fn midpoint_splits_into_two() {
        let s = horizontal("five", &[0.0, 30.0, 60.0, 90.0, 120.0]);
        let pieces = split_stroke(&s, 60.0, 100.0, 20.0).unwrap();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].len(), 2);
        assert_eq!(pieces[1].len(), 2);
        assert_ne!(pieces[0].id, s.id);
        assert_ne!(pieces[0].id, pieces[1].id);
        assert_eq!(pieces[0].style(), s.style());
    }

    #[test]
    fn fully_covered_stroke_vanishes() {
        let s = horizontal("tiny", &[0.0, 3.0, 6.0, 9.0]);
        let pieces = split_stroke(&s, 4.0, 100.0, 20.0).unwrap();
        assert!(pieces.is_empty());
    }

    #[test]
    fn tangent_pass_leaves_one_shorter_stroke() {
        let s = horizontal("edge", &[0.0, 30.0, 60.0, 90.0, 120.0]);
        let pieces = split_stroke(&s, 125.0, 100.0, 20.0).unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].len(), 4);
    }

    #[test]
    fn single_point_runs_are_dropped() {
        // 0 survives alone between the start and the hit at 30.
        let s = horizontal("lonely", &[0.0, 30.0, 60.0, 90.0]);
        let pieces = split_stroke(&s, 30.0, 100.0, 20.0).unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].points[0].x, 60.0);
    }

    #[test]
    fn conservation_and_distance() {
        let strokes = vec![
            horizontal("a", &[0.0, 8.0, 16.0, 24.0, 32.0, 40.0, 48.0, 56.0]),
            horizontal("b", &[20.0, 25.0, 30.0]),
            horizontal("c", &[300.0, 310.0]),
        ];
        let (ex, ey, threshold) = (28.0, 100.0, 20.0);
        let input_points: usize = strokes.iter().map(Stroke::len).sum();
        let out = erase_at(&strokes, ex, ey, threshold);
        let output_points: usize = out.strokes.iter().map(Stroke::len).sum();

        assert_eq!(out.hits, 2);
        assert!(output_points <= input_points);
        for s in &out.strokes {
            assert!(s.len() >= 2);
            for p in &s.points {
                assert!(p.distance_to(ex, ey) >= threshold);
            }
        }
        assert_eq!(out.strokes.last().map(|s| s.id), Some(StrokeId::intern("c")));
    }

    #[test]
    fn vertex_only_proximity() {
        // The segment passes right under the eraser, but both vertices are far.
        let s = horizontal("fast", &[0.0, 200.0]);
        assert!(split_stroke(&s, 100.0, 100.0, 20.0).is_none());
    }

    #[test]
    fn dragging_eraser_keeps_fragment_ids_short() {
        let xs: Vec<f32> = (0..200).map(|i| i as f32 * 5.0).collect();
        let mut strokes = vec![horizontal("stroke_1", &xs)];
        // Right to left, one sample every 5 units, chipping the tail off.
        for i in (20..200).rev() {
            strokes = erase_at(&strokes, i as f32 * 5.0 + 4.0, 100.0, 3.0).strokes;
        }
        assert!(!strokes.is_empty());
        for s in &strokes {
            assert!(s.id.as_str().starts_with("stroke_"), "{}", s.id);
            assert!(s.id.as_str().len() < 32, "{}", s.id);
        }
    }
}
