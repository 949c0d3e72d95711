use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color_map::{ColorMap, Rgba};
use crate::direction::Direction;
use crate::spectrogram::LineRate;

/// Lines per second used when no rate is configured.
pub const DEFAULT_LINE_RATE: f64 = 30.0;

/// Construction options shared by waterfalls and raster scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpectrogramOptions {
    /// Requested lines per second; 0 renders statically, one line per call.
    pub line_rate: f64,
    /// Offset into each input line of the first drawn sample.
    pub start_bin: usize,
    /// Label of the host element the surface should be mounted on for
    /// diagnostics. Only recorded; mounting is up to the host.
    pub on_screen_parent_id: Option<String>,
    /// Custom colour table, padded to 256 entries on use.
    pub color_map: Option<Vec<Rgba>>,
}

impl Default for SpectrogramOptions {
    fn default() -> Self {
        Self {
            line_rate: DEFAULT_LINE_RATE,
            start_bin: 0,
            on_screen_parent_id: None,
            color_map: None,
        }
    }
}

impl SpectrogramOptions {
    /// Build options from a loosely typed JSON object.
    ///
    /// Keys are matched case-insensitively and unknown keys are ignored. A
    /// value that fails validation is skipped with a warning and the default
    /// for that key stays in effect.
    pub fn from_json(value: &Value) -> Self {
        let mut options = Self::default();
        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    options.apply_json(key, value);
                }
            }
            Value::Null => {}
            other => log::warn!("ignoring spectrogram options, expected an object but got {other}"),
        }
        options
    }

    /// Apply a single property. Returns true when the property was recognized
    /// and its value accepted.
    pub fn apply_json(&mut self, key: &str, value: &Value) -> bool {
        let defaults = Self::default();
        match key.to_ascii_lowercase().as_str() {
            "linerate" => {
                if value.is_null() {
                    self.line_rate = defaults.line_rate;
                    return true;
                }
                match value.as_f64().ok_or(value).map(LineRate::new) {
                    Ok(Ok(rate)) => {
                        self.line_rate = rate.lines_per_sec();
                        true
                    }
                    Ok(Err(e)) => {
                        log::warn!("{e}");
                        false
                    }
                    Err(v) => {
                        log::warn!("ignoring non-numeric lineRate {v}");
                        false
                    }
                }
            }
            "startbin" => {
                if value.is_null() {
                    self.start_bin = defaults.start_bin;
                    return true;
                }
                match value.as_f64() {
                    Some(bin) if bin.is_finite() && bin >= 0.0 => {
                        self.start_bin = bin as usize;
                        true
                    }
                    _ => {
                        log::warn!("ignoring startBin {value}, expected a non-negative number");
                        false
                    }
                }
            }
            "onscreenparentid" => match value {
                Value::String(id) => {
                    self.on_screen_parent_id = Some(id.clone());
                    true
                }
                Value::Null => {
                    self.on_screen_parent_id = None;
                    true
                }
                _ => {
                    log::warn!("ignoring onScreenParentId {value}, expected a string");
                    false
                }
            },
            "colormap" => {
                if value.is_null() {
                    self.color_map = None;
                    return true;
                }
                match ColorMap::from_json(value) {
                    Ok(map) => {
                        self.color_map = Some(map.entries().to_vec());
                        true
                    }
                    Err(e) => {
                        log::warn!("{e}, keeping previous color map");
                        false
                    }
                }
            }
            _ => false,
        }
    }
}

/// Options for [`crate::build_static_raster`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterImageOptions {
    #[serde(flatten)]
    pub spectrogram: SpectrogramOptions,
    /// Scan direction token; takes precedence over `direction`.
    pub dir: Option<String>,
    pub direction: Option<String>,
}

impl RasterImageOptions {
    pub fn with_direction(direction: Direction) -> Self {
        Self {
            dir: Some(direction.name().to_string()),
            ..Self::default()
        }
    }

    pub fn from_json(value: &Value) -> Self {
        let mut options = Self {
            spectrogram: SpectrogramOptions::from_json(value),
            ..Self::default()
        };
        if let Value::Object(map) = value {
            for (key, value) in map {
                match key.to_ascii_lowercase().as_str() {
                    "dir" => options.dir = value.as_str().map(str::to_string),
                    "direction" => options.direction = value.as_str().map(str::to_string),
                    _ => {}
                }
            }
        }
        options
    }

    /// The requested direction, `down` when neither token is usable.
    pub fn direction(&self) -> Direction {
        [&self.dir, &self.direction]
            .into_iter()
            .flatten()
            .find_map(|token| match token.parse::<Direction>() {
                Ok(direction) => Some(direction),
                Err(e) => {
                    log::warn!("{e}");
                    None
                }
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let o = SpectrogramOptions::default();
        assert_eq!(o.line_rate, 30.0);
        assert_eq!(o.start_bin, 0);
        assert!(o.color_map.is_none());
    }

    #[test]
    fn test_from_json_case_insensitive_keys() {
        let o = SpectrogramOptions::from_json(&json!({
            "LINERATE": 10,
            "startbin": 4,
            "onScreenParentId": "demo",
            "unknownKey": true,
        }));
        assert_eq!(o.line_rate, 10.0);
        assert_eq!(o.start_bin, 4);
        assert_eq!(o.on_screen_parent_id.as_deref(), Some("demo"));
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let o = SpectrogramOptions::from_json(&json!({
            "lineRate": 75,
            "startBin": -3,
            "colorMap": [[1, 2, 3]],
        }));
        assert_eq!(o, SpectrogramOptions::default());

        let o = SpectrogramOptions::from_json(&json!({ "lineRate": "fast" }));
        assert_eq!(o.line_rate, DEFAULT_LINE_RATE);
    }

    #[test]
    fn test_from_json_color_map_padded() {
        let o = SpectrogramOptions::from_json(&json!({ "colorMap": [[0, 0, 0, 0], [255, 255, 255, 255]] }));
        let map = o.color_map.unwrap();
        assert_eq!(map.len(), 256);
        assert_eq!(map[255], [255, 255, 255, 255]);
    }

    #[test]
    fn test_serde_camel_case() {
        let o: SpectrogramOptions = serde_json::from_str(r#"{"lineRate": 0, "startBin": 2}"#).unwrap();
        assert_eq!(o.line_rate, 0.0);
        assert_eq!(o.start_bin, 2);
    }

    #[test]
    fn test_raster_direction_precedence() {
        let o = RasterImageOptions::from_json(&json!({ "dir": "LEFT", "direction": "up" }));
        assert_eq!(o.direction(), Direction::Left);

        let o = RasterImageOptions::from_json(&json!({ "direction": "up" }));
        assert_eq!(o.direction(), Direction::Up);

        let o = RasterImageOptions::from_json(&json!({ "dir": "nowhere" }));
        assert_eq!(o.direction(), Direction::Down);

        assert_eq!(RasterImageOptions::default().direction(), Direction::Down);
    }
}
