pub mod clock;
pub mod color_map;
pub mod direction;
pub mod error;
pub mod options;
pub mod raster_image;
pub mod sample;
pub mod spectrogram;
pub mod surface;

pub use clock::LineClock;
pub use color_map::{ColorMap, Rgba, COLOR_MAP_LEN};
pub use direction::{Direction, Layout, Orientation, ScanMode};
pub use error::SpectroError;
pub use options::{RasterImageOptions, SpectrogramOptions};
pub use raster_image::build_static_raster;
pub use sample::Intensity;
pub use spectrogram::{LineRate, ScanState, Spectrogram};
pub use surface::PixelSurface;
