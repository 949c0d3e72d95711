use std::io;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use spectro_core::{Direction, RasterImageOptions, ScanMode, SpectroError, SpectrogramOptions};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read job file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse job file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Spectro(#[from] SpectroError),
}

/// On-disk render job: surface geometry, options, and the sample grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderJob {
    /// Pixels per line.
    pub width: usize,
    /// Number of lines on the surface.
    pub lines: usize,
    pub mode: String,
    pub direction: String,
    /// Loosely typed spectrogram options, applied key by key.
    pub options: Value,
    /// Sample grid. Entries that are not numbers read as 0.
    #[serde(deserialize_with = "lenient_rows")]
    pub rows: Vec<Vec<f64>>,
}

fn lenient_rows<'de, D>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(rows
        .iter()
        .map(|row| match row {
            Value::Array(samples) => samples.iter().map(|s| s.as_f64().unwrap_or(0.0)).collect(),
            other => {
                log::warn!("row {other} is not an array, drawing it as background");
                Vec::new()
            }
        })
        .collect())
}

impl Default for RenderJob {
    fn default() -> Self {
        Self {
            width: 200,
            lines: 200,
            mode: "waterfall".to_string(),
            direction: "down".to_string(),
            options: Value::Null,
            rows: Vec::new(),
        }
    }
}

impl RenderJob {
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Scan mode, falling back to waterfall on an unknown token.
    pub fn scan_mode(&self) -> ScanMode {
        self.mode.parse().unwrap_or_else(|e: SpectroError| {
            log::warn!("{e}, using waterfall");
            ScanMode::Waterfall
        })
    }

    pub fn direction(&self) -> Direction {
        Direction::parse_or_default(&self.direction)
    }

    pub fn spectrogram_options(&self) -> SpectrogramOptions {
        SpectrogramOptions::from_json(&self.options)
    }

    /// Raster options; the job's own direction applies unless the options
    /// object names one.
    pub fn raster_options(&self) -> RasterImageOptions {
        let mut options = RasterImageOptions::from_json(&self.options);
        if options.dir.is_none() && options.direction.is_none() {
            options.dir = Some(self.direction.clone());
        }
        options
    }
}
