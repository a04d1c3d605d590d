//! SVG path parser restricted to absolute move, line and cubic commands
//!
//! See [SVG Path Specification](https://www.w3.org/TR/SVG11/paths.html#PathData)
use crate::{Error, PathSegment, Point, Scalar};

/// Supported SVG path command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cmd {
    Move,
    Line,
    Horizontal,
    Vertical,
    Cubic,
    Close,
}

/// Path parser for SVG encoded path
///
/// Accepts absolute `M`, `L`, `H`, `V`, `C` and `Z` commands. `Z` is
/// converted to a line to the start of the current subpath. Any other
/// command, including relative ones, results in [`Error::UnsupportedCommand`].
#[derive(Debug)]
pub struct SvgPathParser<'a> {
    // text containing unparsed path
    text: &'a [u8],
    // current offset in the text
    offset: usize,
    // command repeated when operands are not preceded by a command
    prev_cmd: Option<Cmd>,
    // current position
    position: Point,
    // current sub-path starting position
    subpath_start: Point,
    // set once an error is reported, no more commands are produced after it
    failed: bool,
}

impl<'a> SvgPathParser<'a> {
    pub fn new(text: &'a [u8]) -> Self {
        Self {
            text,
            offset: 0,
            prev_cmd: None,
            position: Point::default(),
            subpath_start: Point::default(),
            failed: false,
        }
    }

    /// Error construction helper
    fn error(&self, offset: usize, reason: impl Into<String>) -> Error {
        Error::Parse {
            reason: reason.into(),
            offset,
        }
    }

    /// Byte at the current position
    fn peek(&self) -> Option<u8> {
        self.text.get(self.offset).copied()
    }

    /// Consume insignificant separators
    fn parse_separators(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n' | b',') = self.peek() {
            self.offset += 1;
        }
    }

    /// Consume digits, returns number of consumed digits
    fn parse_digits(&mut self) -> usize {
        let start = self.offset;
        while let Some(b'0'..=b'9') = self.peek() {
            self.offset += 1;
        }
        self.offset - start
    }

    /// Consume `+|-` sign
    fn parse_sign(&mut self) {
        if let Some(b'-' | b'+') = self.peek() {
            self.offset += 1;
        }
    }

    /// Parse single scalar
    fn parse_scalar(&mut self) -> Result<Scalar, Error> {
        self.parse_separators();
        let start = self.offset;
        self.parse_sign();
        let whole = self.parse_digits();
        let fraction = if let Some(b'.') = self.peek() {
            self.offset += 1;
            self.parse_digits()
        } else {
            0
        };
        if whole + fraction == 0 {
            return Err(self.error(start, "failed to parse scalar"));
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.offset += 1;
            self.parse_sign();
            if self.parse_digits() == 0 {
                return Err(self.error(start, "failed to parse scalar exponent"));
            }
        }
        lexical_core::parse::<Scalar>(&self.text[start..self.offset])
            .map_err(|_| self.error(start, "failed to parse scalar"))
    }

    /// Parse pair of scalars and convert it to a point
    fn parse_point(&mut self) -> Result<Point, Error> {
        let x = self.parse_scalar()?;
        let y = self.parse_scalar()?;
        Ok(Point::new(x, y))
    }

    /// Parse SVG command, operands without a command repeat previous one
    fn parse_cmd(&mut self) -> Result<Cmd, Error> {
        let offset = self.offset;
        let cmd = match self.peek() {
            Some(b'M') => Cmd::Move,
            Some(b'L') => Cmd::Line,
            Some(b'H') => Cmd::Horizontal,
            Some(b'V') => Cmd::Vertical,
            Some(b'C') => Cmd::Cubic,
            Some(b'Z') => Cmd::Close,
            Some(cmd) if cmd.is_ascii_alphabetic() && cmd != b'e' && cmd != b'E' => {
                return Err(Error::UnsupportedCommand {
                    cmd: cmd as char,
                    offset,
                });
            }
            _ => {
                return self
                    .prev_cmd
                    .ok_or_else(|| self.error(offset, "failed to parse path command"));
            }
        };
        self.offset += 1;
        self.prev_cmd = match cmd {
            Cmd::Move => Some(Cmd::Line),
            Cmd::Close => None,
            _ => Some(cmd),
        };
        Ok(cmd)
    }

    /// Parse single path command, `None` indicates end of input
    pub fn parse_segment(&mut self) -> Result<Option<PathSegment>, Error> {
        self.parse_separators();
        if self.peek().is_none() {
            return Ok(None);
        }
        let segment = match self.parse_cmd()? {
            Cmd::Move => {
                let dst = self.parse_point()?;
                self.subpath_start = dst;
                PathSegment::Move(dst)
            }
            Cmd::Line => PathSegment::Line(self.parse_point()?),
            Cmd::Horizontal => {
                PathSegment::Line(Point::new(self.parse_scalar()?, self.position.y()))
            }
            Cmd::Vertical => {
                PathSegment::Line(Point::new(self.position.x(), self.parse_scalar()?))
            }
            Cmd::Cubic => PathSegment::Cubic(
                self.parse_point()?,
                self.parse_point()?,
                self.parse_point()?,
            ),
            Cmd::Close => PathSegment::Line(self.subpath_start),
        };
        self.position = segment.dst();
        Ok(Some(segment))
    }
}

impl Iterator for SvgPathParser<'_> {
    type Item = Result<PathSegment, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.parse_segment().transpose();
        if let Some(Err(error)) = &result {
            tracing::debug!(%error, "[svg:parse]");
            self.failed = true;
        }
        result
    }
}
