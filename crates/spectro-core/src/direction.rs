use std::fmt;
use std::str::FromStr;

use crate::error::SpectroError;

/// Which way new lines travel across the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Parse a direction token, falling back to [`Direction::Down`] with a
    /// warning when the token is not recognized.
    pub fn parse_or_default(token: &str) -> Self {
        token.parse().unwrap_or_else(|e: SpectroError| {
            log::warn!("{e}, using 'down'");
            Direction::default()
        })
    }

    pub fn orientation(self) -> Orientation {
        match self {
            Direction::Up | Direction::Down => Orientation::Vertical,
            Direction::Left | Direction::Right => Orientation::Horizontal,
        }
    }

    /// Down and Right anchor the write head at line 0 and move toward the
    /// last line; Up and Left run the other way.
    pub fn reversed_head(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl FromStr for Direction {
    type Err = SpectroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(SpectroError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis along which a single line is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Lines are rows; the surface is `px_per_line` wide and `lines` tall.
    Vertical,
    /// Lines are columns; the surface is `lines` wide and `px_per_line` tall.
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// The whole surface scrolls one line per update.
    #[default]
    Waterfall,
    /// Lines overwrite the surface in cyclic order behind a moving head.
    RasterScan,
}

impl FromStr for ScanMode {
    type Err = SpectroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "waterfall" | "wf" => Ok(ScanMode::Waterfall),
            "rasterscan" | "raster-scan" | "raster_scan" | "rs" => Ok(ScanMode::RasterScan),
            _ => Err(SpectroError::UnknownScanMode(s.to_string())),
        }
    }
}

/// Fixed drawing geometry, decided once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub mode: ScanMode,
    pub orientation: Orientation,
    pub reversed_head: bool,
}

impl Layout {
    pub fn new(mode: ScanMode, direction: Direction) -> Self {
        Self {
            mode,
            orientation: direction.orientation(),
            reversed_head: direction.reversed_head(),
        }
    }

    /// Cursor position after a reset.
    ///
    /// For waterfalls this is the fixed edge where new lines enter; for raster
    /// scans it is where the head starts.
    pub fn home_line(&self, lines: usize) -> usize {
        if self.reversed_head {
            0
        } else {
            lines - 1
        }
    }

    /// Raster-scan cursor after writing at `cursor`, wrapping at both ends.
    pub fn step(&self, cursor: usize, lines: usize) -> usize {
        if self.reversed_head {
            if cursor + 1 >= lines {
                0
            } else {
                cursor + 1
            }
        } else if cursor == 0 {
            lines - 1
        } else {
            cursor - 1
        }
    }

    /// `(width, height)` of the pixel surface.
    pub fn surface_extent(&self, px_per_line: usize, lines: usize) -> (usize, usize) {
        match self.orientation {
            Orientation::Vertical => (px_per_line, lines),
            Orientation::Horizontal => (lines, px_per_line),
        }
    }
}
