//! SVG path data for strokes.
//!
//! Older page records store each stroke as an SVG path string made only of
//! absolute `M` and `L` commands:
//!
//! ```text
//! M10.0,20.0 L12.5,21.0 L15.0,23.5
//! ```
//!
//! Only those two commands are understood. Curves never appear in ink data.

use crate::error::{InkError, Result};
use crate::model::Point;
use std::fmt::Write;
use winnow::ascii::multispace0;
use winnow::combinator::{opt, separated_pair};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

// ─── Emitter ─────────────────────────────────────────────────────────────

/// Emit `points` as `M{x},{y} L{x},{y} …` with one decimal place.
/// Empty input gives an empty string.
#[must_use = "returns the path data"]
pub fn points_to_path(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 14);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(out, "{cmd}{:.1},{:.1}", p.x, p.y);
    }
    out
}

// ─── Parser ──────────────────────────────────────────────────────────────

/// Parse `M`/`L` path data back into points. Timestamps and pressure are
/// not part of the format.
#[must_use = "parsing result should be used"]
pub fn parse_path(data: &str) -> Result<Vec<Point>> {
    let mut rest = data;
    let mut points = Vec::new();

    let _ = multispace0::<_, ContextError>.parse_next(&mut rest);
    while !rest.is_empty() {
        let offset = data.len() - rest.len();
        let cmd = one_of::<_, _, ContextError>(['M', 'L'])
            .parse_next(&mut rest)
            .map_err(|_| InkError::PathData(format!("expected M or L at offset {offset}")))?;
        if cmd == 'L' && points.is_empty() {
            return Err(InkError::PathData("path must start with M".into()));
        }

        let (x, y) = parse_pair
            .parse_next(&mut rest)
            .map_err(|e| InkError::PathData(format!("bad coordinates after {cmd}: {e}")))?;
        points.push(Point::new(x, y));

        let _ = multispace0::<_, ContextError>.parse_next(&mut rest);
    }

    Ok(points)
}

fn parse_pair(input: &mut &str) -> ModalResult<(f32, f32)> {
    let _ = multispace0.parse_next(input)?;
    separated_pair(parse_number, separator, parse_number).parse_next(input)
}

/// `,` or whitespace, or both.
fn separator(input: &mut &str) -> ModalResult<()> {
    let before = input.len();
    let _ = multispace0.parse_next(input)?;
    let _ = opt(',').parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    if input.len() == before {
        return Err(winnow::error::ErrMode::Backtrack(ContextError::new()));
    }
    Ok(())
}

fn parse_number(input: &mut &str) -> ModalResult<f32> {
    let start = *input;
    if input.starts_with('-') {
        *input = &input[1..];
    }
    let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ =
            take_while::<_, _, ContextError>(0.., |c: char| c.is_ascii_digit()).parse_next(input);
    }
    let matched = &start[..start.len() - input.len()];
    matched
        .parse::<f32>()
        .map_err(|_| winnow::error::ErrMode::Backtrack(ContextError::new()))
}
