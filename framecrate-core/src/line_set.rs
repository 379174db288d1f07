//! Line sets (polylines and segment collections)

use crate::point::*;
use crate::transform::RigidTransform;
use serde::{Deserialize, Serialize};

/// A set of line segments between indexed points, one color per segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSet {
    pub points: Vec<Point3f>,
    pub lines: Vec<[usize; 2]>,
    pub colors: Vec<Rgb>,
}

impl LineSet {
    /// Create an empty line set
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect consecutive points with segments of a single color
    pub fn polyline(points: Vec<Point3f>, color: Rgb) -> Self {
        let lines: Vec<[usize; 2]> = (1..points.len()).map(|i| [i - 1, i]).collect();
        let colors = vec![color; lines.len()];
        Self {
            points,
            lines,
            colors,
        }
    }

    /// Number of segments
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// End points of a segment
    pub fn segment(&self, index: usize) -> Option<(Point3f, Point3f)> {
        let [a, b] = *self.lines.get(index)?;
        Some((*self.points.get(a)?, *self.points.get(b)?))
    }

    /// Apply a rigid transform to every point
    pub fn apply_transform(&mut self, transform: &RigidTransform) {
        for point in &mut self.points {
            *point = to_f32(&transform.transform_point(&to_f64(point)));
        }
    }
}
