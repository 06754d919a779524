use super::point::PointSource;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

/// Relative slack used when comparing a remaining distance against the point spacing.
pub const SPACING_EPSILON: f64 = 1e-9;
/// Segments shorter than this (in metres) are rejected as degenerate.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-9;
/// Upper bound on the point sources a single segment may be split into.
pub const MAX_POINTS_PER_SEGMENT: usize = 1_000_000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Segment from {start:?} to {end:?} is degenerate (length {length:e} m)")]
    DegenerateSegment {
        start: [f64; 3],
        end: [f64; 3],
        length: f64,
    },
    #[error("Point spacing must be finite and positive, got {0}")]
    InvalidSpacing(f64),
    #[error("Coordinate {0:?} is not finite")]
    NonFiniteCoordinate([f64; 3]),
    #[error("Coordinate {0:?} is not below grade (depth must be negative)")]
    AboveGrade([f64; 3]),
    #[error(
        "Segment of length {length} m at spacing {spacing} m exceeds {limit} point sources"
    )]
    TooManyPoints {
        length: f64,
        spacing: f64,
        limit: usize,
    },
}

#[inline]
pub(crate) fn coords(p: &Point3<f64>) -> [f64; 3] {
    [p.x, p.y, p.z]
}

/// Checks that a cable coordinate is usable by the image-source kernel: finite and strictly
/// below the soil surface (`y < 0`).
pub(crate) fn validate_buried(p: &Point3<f64>) -> Result<(), GeometryError> {
    if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
        return Err(GeometryError::NonFiniteCoordinate(coords(p)));
    }
    if p.y >= 0.0 {
        return Err(GeometryError::AboveGrade(coords(p)));
    }
    Ok(())
}

/// A straight run of cable between two buried coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point3<f64>,
    end: Point3<f64>,
}

impl Segment {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Result<Self, GeometryError> {
        validate_buried(&start)?;
        validate_buried(&end)?;

        let length = (end - start).norm();
        if length < MIN_SEGMENT_LENGTH {
            return Err(GeometryError::DegenerateSegment {
                start: coords(&start),
                end: coords(&end),
                length,
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Point3<f64> {
        self.start
    }

    pub fn end(&self) -> Point3<f64> {
        self.end
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn direction(&self) -> Vector3<f64> {
        (self.end - self.start) / self.length()
    }

    /// Splits the segment into point sources spaced `spacing` apart.
    ///
    /// Every source but the last represents exactly `spacing` metres of cable; the last one
    /// represents whatever remains, so the represented lengths always add up to the segment
    /// length. A segment shorter than `spacing` yields a single source.
    pub fn discretize(&self, spacing: f64) -> Result<Vec<PointSource>, GeometryError> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(GeometryError::InvalidSpacing(spacing));
        }

        let length = self.length();
        let steps = (length / spacing).ceil();
        if !(steps.is_finite() && steps <= MAX_POINTS_PER_SEGMENT as f64) {
            return Err(GeometryError::TooManyPoints {
                length,
                spacing,
                limit: MAX_POINTS_PER_SEGMENT,
            });
        }
        let direction = self.direction();
        let mut points = Vec::with_capacity(steps as usize + 1);

        let mut step = 0usize;
        loop {
            let travelled = step as f64 * spacing;
            let remaining = length - travelled;
            let position = self.start + direction * travelled;

            if remaining - spacing > SPACING_EPSILON * spacing {
                points.push(PointSource::new(position, spacing));
                step += 1;
            } else {
                points.push(PointSource::new(position, remaining));
                break;
            }
        }

        Ok(points)
    }
}
