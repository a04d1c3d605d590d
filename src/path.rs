use crate::{Cubic, Curve, Error, Line, Point, Rect, Segment, SvgPathParser};
use std::{fmt, io::Read, str::FromStr};

/// Single path command with absolute coordinates
///
/// Start point of `Line` and `Cubic` is the end point of the previous command,
/// or `(0, 0)` if there is no previous command.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathSegment {
    Move(Point),
    Line(Point),
    Cubic(Point, Point, Point),
}

impl PathSegment {
    /// Destination point of the command
    pub fn dst(&self) -> Point {
        *match self {
            PathSegment::Move(dst) => dst,
            PathSegment::Line(dst) => dst,
            PathSegment::Cubic(_, _, dst) => dst,
        }
    }

    /// Whether the command draws anything
    pub fn is_drawing(&self) -> bool {
        !matches!(self, PathSegment::Move(_))
    }
}

/// Iterator over drawing segments with resolved start points
///
/// `Move` commands only update current position and produce nothing.
#[derive(Debug, Clone)]
pub struct SegmentIter<I> {
    commands: I,
    position: Point,
}

impl<I> SegmentIter<I> {
    pub fn new(commands: I) -> Self {
        Self {
            commands,
            position: Point::default(),
        }
    }
}

impl<I: Iterator<Item = PathSegment>> Iterator for SegmentIter<I> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.position;
            let command = self.commands.next()?;
            self.position = command.dst();
            match command {
                PathSegment::Move(_) => continue,
                PathSegment::Line(p1) => return Some(Line::new(start, p1).into()),
                PathSegment::Cubic(p1, p2, p3) => {
                    return Some(Cubic::new(start, p1, p2, p3).into());
                }
            }
        }
    }
}

/// Tight bounding box of a sequence of path commands
///
/// Returns `None` if there are no drawing commands.
pub fn segments_bbox(commands: impl IntoIterator<Item = PathSegment>) -> Option<Rect> {
    SegmentIter::new(commands.into_iter()).fold(None, |bbox, segment| Some(segment.bbox(bbox)))
}

/// Sequence of path commands
#[derive(Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Path {
    commands: Vec<PathSegment>,
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in self.commands.iter() {
            writeln!(f, "{:?}", command)?;
        }
        Ok(())
    }
}

/// Formatted as SVG path data with absolute commands, coordinates are not rounded
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn point_fmt(f: &mut fmt::Formatter<'_>, point: Point) -> fmt::Result {
            write!(f, "{},{}", point.x(), point.y())
        }

        for (index, command) in self.commands.iter().enumerate() {
            if index != 0 {
                write!(f, " ")?;
            }
            match *command {
                PathSegment::Move(p) => {
                    write!(f, "M")?;
                    point_fmt(f, p)?;
                }
                PathSegment::Line(p) => {
                    write!(f, "L")?;
                    point_fmt(f, p)?;
                }
                PathSegment::Cubic(p1, p2, p3) => {
                    write!(f, "C")?;
                    point_fmt(f, p1)?;
                    write!(f, " ")?;
                    point_fmt(f, p2)?;
                    write!(f, " ")?;
                    point_fmt(f, p3)?;
                }
            }
        }
        Ok(())
    }
}

impl Path {
    pub fn new(commands: Vec<PathSegment>) -> Self {
        Self { commands }
    }

    /// Create empty path
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create path builder
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    /// List of commands the path is made of
    pub fn commands(&self) -> &[PathSegment] {
        &self.commands
    }

    /// Iterator over drawing segments of the path
    pub fn segments(&self) -> SegmentIter<std::iter::Copied<std::slice::Iter<'_, PathSegment>>> {
        SegmentIter::new(self.commands.iter().copied())
    }

    /// Number of drawing segments in the path
    pub fn segments_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| command.is_drawing())
            .count()
    }

    /// Tight bounding box of the path, `None` if path does not draw anything
    pub fn bbox(&self) -> Option<Rect> {
        let bbox = segments_bbox(self.commands.iter().copied());
        tracing::debug!(
            commands = self.commands.len(),
            segments = self.segments_count(),
            ?bbox,
            "[path:bbox]"
        );
        bbox
    }

    /// Load path from SVG path data
    pub fn read_svg_path(mut input: impl Read) -> Result<Self, Error> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        text.parse()
    }

    /// Load path from JSON encoded list of commands
    #[cfg(feature = "serde")]
    pub fn read_json(input: impl Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(input)?)
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(text: &str) -> Result<Path, Self::Err> {
        SvgPathParser::new(text.as_bytes()).collect()
    }
}

impl IntoIterator for Path {
    type Item = PathSegment;
    type IntoIter = std::vec::IntoIter<PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = PathSegment;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, PathSegment>>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter().copied()
    }
}

impl Extend<PathSegment> for Path {
    fn extend<T: IntoIterator<Item = PathSegment>>(&mut self, iter: T) {
        self.commands.extend(iter)
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Path builder similar to Canvas/Cairo interface.
#[derive(Clone, Default)]
pub struct PathBuilder {
    position: Point,
    subpath_start: Point,
    commands: Vec<PathSegment>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Build path
    pub fn build(&mut self) -> Path {
        self.position = Point::default();
        self.subpath_start = Point::default();
        Path::new(std::mem::take(&mut self.commands))
    }

    /// Move current position, ending current subpath
    pub fn move_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let p = p.into();
        self.commands.push(PathSegment::Move(p));
        self.position = p;
        self.subpath_start = p;
        self
    }

    /// Add line from the current position to the specified point
    pub fn line_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let p = p.into();
        self.commands.push(PathSegment::Line(p));
        self.position = p;
        self
    }

    /// Add cubic bezier curve
    pub fn cubic_to(
        &mut self,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> &mut Self {
        let p3 = p3.into();
        self.commands
            .push(PathSegment::Cubic(p1.into(), p2.into(), p3));
        self.position = p3;
        self
    }

    /// Close current subpath with a line to its start
    pub fn close(&mut self) -> &mut Self {
        let start = self.subpath_start;
        self.line_to(start)
    }

    /// Current position of the builder
    pub fn position(&self) -> Point {
        self.position
    }
}
