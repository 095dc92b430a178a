#![forbid(unsafe_code)]

//! SVG path-data serialization.

use core::fmt::Write as _;

use crate::config::Point;

/// One drawing command of a polyline path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Lift the pen and start a new segment.
    MoveTo(Point),
    /// Draw a straight line from the previous point.
    LineTo(Point),
}

impl PathCommand {
    #[must_use]
    pub const fn point(self) -> Point {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => p,
        }
    }
}

/// Serialize commands as SVG path data with two decimals per coordinate,
/// e.g. `"M 12.00 34.50 L 13.00 35.25"`.
#[must_use]
pub fn path_data(commands: &[PathCommand]) -> String {
    let mut out = String::with_capacity(commands.len() * 16);
    for command in commands {
        if !out.is_empty() {
            out.push(' ');
        }
        let (letter, p) = match *command {
            PathCommand::MoveTo(p) => ('M', p),
            PathCommand::LineTo(p) => ('L', p),
        };
        // Writing into a String cannot fail.
        let _ = write!(out, "{letter} {:.2} {:.2}", p.x, p.y);
    }
    out
}
