use crate::direction::ScanMode;
use crate::options::RasterImageOptions;
use crate::sample::Intensity;
use crate::spectrogram::Spectrogram;
use crate::surface::PixelSurface;

/// Paint a complete grid of intensity rows as a static raster scan.
///
/// `grid[r]` is drawn as line `r` of `rows`, each `cols` pixels long. The rate
/// is forced to 0, so no write-head marker is drawn. Rows missing from `grid`
/// are drawn as background.
pub fn build_static_raster<R, S>(grid: &[R], cols: usize, rows: usize, options: &RasterImageOptions) -> PixelSurface
where
    R: AsRef<[S]>,
    S: Intensity,
{
    let mut spectrogram_options = options.spectrogram.clone();
    spectrogram_options.line_rate = 0.0;

    let mut raster = Spectrogram::new(cols, rows, ScanMode::RasterScan, options.direction(), &spectrogram_options);
    for r in 0..raster.lines() {
        match grid.get(r) {
            Some(row) => raster.new_line(row.as_ref()),
            None => raster.new_line::<S>(&[]),
        }
    }
    raster.into_surface()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_map::ColorMap;
    use crate::direction::Direction;

    #[test]
    fn test_down_raster_rows_in_order() {
        let grid = vec![vec![0u8, 1], vec![2, 3], vec![4, 5]];
        let surface = build_static_raster(&grid, 2, 3, &RasterImageOptions::default());
        let jet = ColorMap::jet();
        assert_eq!((surface.width(), surface.height()), (2, 3));
        for (r, row) in grid.iter().enumerate() {
            for (c, s) in row.iter().enumerate() {
                assert_eq!(surface.pixel(c, r), jet.map(*s));
            }
        }
    }

    #[test]
    fn test_missing_rows_are_background() {
        let grid: Vec<Vec<u8>> = vec![vec![200, 200]];
        let surface = build_static_raster(&grid, 2, 2, &RasterImageOptions::default());
        let jet = ColorMap::jet();
        assert_eq!(surface.pixel(0, 1), jet.background());
        assert_eq!(surface.pixel(1, 1), jet.background());
    }

    #[test]
    fn test_left_raster_is_transposed() {
        let grid = vec![vec![10u8, 20, 30], vec![40, 50, 60]];
        let options = RasterImageOptions::with_direction(Direction::Left);
        let surface = build_static_raster(&grid, 3, 2, &options);
        let jet = ColorMap::jet();
        assert_eq!((surface.width(), surface.height()), (2, 3));
        // First row lands in the rightmost column, bin 0 at the bottom
        assert_eq!(surface.pixel(1, 2), jet.map(10));
        assert_eq!(surface.pixel(1, 0), jet.map(30));
        assert_eq!(surface.pixel(0, 2), jet.map(40));
    }
}
