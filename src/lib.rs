//! Tight axis aligned bounding boxes of 2D paths made of lines and cubic bezier curves.
//!
//! Main features:
//!  - Numerically robust quadratic solver
//!  - Exact bounding box of cubic bezier curves from their extremities
//!  - Bounding box of a whole path given as a list of absolute commands
//!  - Parser for the absolute `M`, `L`, `H`, `V`, `C`, `Z` subset of SVG path data
//!
#![deny(warnings)]

mod curve;
mod error;
mod geometry;
mod path;
mod svg;
mod utils;

pub use curve::{Cubic, Curve, CurveExtremities, Line, Segment};
pub use error::Error;
pub use geometry::{scalar_fmt, Point, Rect, Scalar, EPSILON};
pub use path::{segments_bbox, Path, PathBuilder, PathSegment, SegmentIter};
pub use svg::SvgPathParser;
pub use utils::{quadratic_solve, ArrayIter, QuadRoots};
