use std::time::{Duration, Instant};

use crate::clock::LineClock;
use crate::color_map::{ColorMap, Rgba};
use crate::direction::{Direction, Layout, Orientation, ScanMode};
use crate::error::SpectroError;
use crate::options::SpectrogramOptions;
use crate::sample::{sample_at, Intensity};
use crate::surface::PixelSurface;

/// Pixels per line and line count used when zero is requested.
pub const DEFAULT_EXTENT: usize = 200;

/// Colour of the raster-scan write-head marker.
const MARKER: Rgba = [255, 255, 255, 255];

/// Validated line rate in lines per second, `0 <= rate < 50`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LineRate(f64);

impl LineRate {
    pub const MAX: f64 = 50.0;
    pub const STATIC: LineRate = LineRate(0.0);

    pub fn new(rate: f64) -> Result<Self, SpectroError> {
        if rate.is_nan() || !(0.0..Self::MAX).contains(&rate) {
            return Err(SpectroError::InvalidLineRate(rate));
        }
        Ok(Self(rate))
    }

    pub fn lines_per_sec(self) -> f64 {
        self.0
    }

    /// A rate of 0 means the caller steps lines by hand; nothing is scheduled.
    pub fn is_static(self) -> bool {
        self.0 == 0.0
    }

    /// Time between animated lines, or `None` for a static display.
    pub fn interval(self) -> Option<Duration> {
        if self.is_static() {
            None
        } else {
            Some(Duration::from_nanos((1e9 / self.0).round() as u64))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Freshly built or stopped; the cursor sits at its home line.
    Idle,
    /// Started, or stepped by hand since the last stop.
    Active,
}

/// Scrolling waterfall or raster-scan spectrogram drawn into a [`PixelSurface`].
///
/// Each call to [`Spectrogram::new_line`] colour-maps one row of intensity
/// samples and writes it into the surface. Waterfalls scroll the existing
/// content one line to make room at a fixed edge; raster scans overwrite
/// lines in cyclic order behind a moving cursor.
#[derive(Debug, Clone)]
pub struct Spectrogram {
    layout: Layout,
    direction: Direction,
    px_per_line: usize,
    lines: usize,
    start_bin: usize,
    line_rate: LineRate,
    color_map: ColorMap,
    surface: PixelSurface,
    next_line: usize,
    state: ScanState,
    clock: Option<LineClock>,
    on_screen_parent_id: Option<String>,
}

impl Spectrogram {
    pub fn new(
        px_per_line: usize,
        lines: usize,
        mode: ScanMode,
        direction: Direction,
        options: &SpectrogramOptions,
    ) -> Self {
        let px_per_line = non_zero_extent(px_per_line, "line width");
        let lines = non_zero_extent(lines, "line count");
        let layout = Layout::new(mode, direction);
        let (width, height) = layout.surface_extent(px_per_line, lines);

        let line_rate = LineRate::new(options.line_rate).unwrap_or_else(|e| {
            log::warn!("{e}, keeping the default rate");
            LineRate(crate::options::DEFAULT_LINE_RATE)
        });

        let color_map = match &options.color_map {
            Some(entries) => ColorMap::from_entries(entries).unwrap_or_else(|e| {
                log::warn!("{e}, using the default color map");
                ColorMap::default()
            }),
            None => ColorMap::default(),
        };

        if let Some(id) = &options.on_screen_parent_id {
            log::debug!("spectrogram surface requested on host element '{id}'");
        }

        Self {
            layout,
            direction,
            px_per_line,
            lines,
            start_bin: options.start_bin,
            line_rate,
            color_map,
            surface: PixelSurface::new(width, height),
            next_line: layout.home_line(lines),
            state: ScanState::Idle,
            clock: None,
            on_screen_parent_id: options.on_screen_parent_id.clone(),
        }
    }

    pub fn waterfall(px_per_line: usize, lines: usize, direction: Direction, options: &SpectrogramOptions) -> Self {
        Self::new(px_per_line, lines, ScanMode::Waterfall, direction, options)
    }

    pub fn raster_scan(px_per_line: usize, lines: usize, direction: Direction, options: &SpectrogramOptions) -> Self {
        Self::new(px_per_line, lines, ScanMode::RasterScan, direction, options)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn mode(&self) -> ScanMode {
        self.layout.mode
    }

    pub fn px_per_line(&self) -> usize {
        self.px_per_line
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn start_bin(&self) -> usize {
        self.start_bin
    }

    pub fn set_start_bin(&mut self, start_bin: usize) {
        self.start_bin = start_bin;
    }

    pub fn line_rate(&self) -> LineRate {
        self.line_rate
    }

    /// Scheduling interval for animated updates, `None` when static.
    pub fn tick_interval(&self) -> Option<Duration> {
        self.line_rate.interval()
    }

    pub fn color_map(&self) -> &ColorMap {
        &self.color_map
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn into_surface(self) -> PixelSurface {
        self.surface
    }

    /// Line index where the next line is written.
    pub fn next_line(&self) -> usize {
        self.next_line
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// True from [`Spectrogram::start`] until [`Spectrogram::stop`], or until
    /// an [`Spectrogram::advance`] at rate 0 ends the animation.
    pub fn is_running(&self) -> bool {
        self.clock.is_some()
    }

    pub fn on_screen_parent_id(&self) -> Option<&str> {
        self.on_screen_parent_id.as_deref()
    }

    /// Change the animation rate. Out-of-range values are rejected and the
    /// current rate is kept.
    pub fn set_line_rate(&mut self, rate: f64) -> Result<(), SpectroError> {
        match LineRate::new(rate) {
            Ok(rate) => {
                self.line_rate = rate;
                Ok(())
            }
            Err(e) => {
                log::warn!("{e}");
                Err(e)
            }
        }
    }

    /// Replace the colour table. An empty table is rejected and the current
    /// one stays in effect.
    pub fn set_color_map(&mut self, entries: &[Rgba]) -> Result<(), SpectroError> {
        match ColorMap::from_entries(entries) {
            Ok(map) => {
                self.color_map = map;
                Ok(())
            }
            Err(e) => {
                log::warn!("{e}, keeping previous color map");
                Err(e)
            }
        }
    }

    /// Draw one line of intensity samples.
    ///
    /// Samples are read from `start_bin` onwards; anything past the end of
    /// `line` is drawn with the background colour.
    pub fn new_line<S: Intensity>(&mut self, line: &[S]) {
        let toward_end = self.layout.reversed_head;
        if self.layout.mode == ScanMode::Waterfall {
            match self.layout.orientation {
                Orientation::Vertical => self.surface.shift_rows(toward_end),
                Orientation::Horizontal => self.surface.shift_columns(toward_end),
            }
        }

        self.write_line(line, self.next_line);

        if self.layout.mode == ScanMode::RasterScan {
            self.next_line = self.layout.step(self.next_line, self.lines);
            if !self.line_rate.is_static() {
                self.draw_marker(self.next_line);
            }
        }

        self.state = ScanState::Active;
    }

    /// Fill the whole surface with the background colour.
    pub fn clear(&mut self) {
        self.surface.fill(self.color_map.background());
    }

    /// Begin (or restart) animated timing from `now`.
    pub fn start(&mut self, now: Instant) {
        if self.is_running() {
            log::debug!("spectrogram restarted");
        } else {
            log::debug!("spectrogram started at {:?} lines/s", self.line_rate.lines_per_sec());
        }
        self.clock = Some(LineClock::new(now));
        self.state = ScanState::Active;
    }

    /// Stop timing and send the cursor home. No-op when already idle.
    pub fn stop(&mut self) {
        if self.state == ScanState::Idle {
            return;
        }
        self.clock = None;
        self.state = ScanState::Idle;
        self.next_line = self.layout.home_line(self.lines);
        log::debug!("spectrogram stopped");
    }

    /// Draw `line`, then report how long to wait before the next animated
    /// line. Returns `None` when not running or when the rate is 0; a rate of
    /// 0 also ends the running state, leaving the cursor where it is.
    pub fn advance<S: Intensity>(&mut self, line: &[S], now: Instant) -> Option<Duration> {
        self.new_line(line);
        let Some(interval) = self.line_rate.interval() else {
            self.clock = None;
            return None;
        };
        let clock = self.clock.as_mut()?;
        Some(clock.next_delay(interval, now))
    }

    fn write_line<S: Intensity>(&mut self, line: &[S], at: usize) {
        for i in 0..self.px_per_line {
            let sample = i.checked_add(self.start_bin).map_or(0, |idx| sample_at(line, idx));
            let rgba = self.color_map.map(sample);
            match self.layout.orientation {
                Orientation::Vertical => self.surface.put_pixel(i, at, rgba),
                // Bin 0 sits at the bottom of the column
                Orientation::Horizontal => self.surface.put_pixel(at, self.px_per_line - 1 - i, rgba),
            }
        }
    }

    fn draw_marker(&mut self, at: usize) {
        match self.layout.orientation {
            Orientation::Vertical => self.surface.fill_row(at, MARKER),
            Orientation::Horizontal => self.surface.fill_column(at, MARKER),
        }
    }
}

fn non_zero_extent(value: usize, what: &str) -> usize {
    if value == 0 || u32::try_from(value).is_err() {
        log::warn!("{what} of {value} requested, using {DEFAULT_EXTENT}");
        DEFAULT_EXTENT
    } else {
        value
    }
}
