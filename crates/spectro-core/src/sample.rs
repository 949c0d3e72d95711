/// A numeric sample that can be quantized to an 8-bit intensity.
///
/// Quantization behaves like storing into a clamped byte array: values are
/// rounded half-to-even, clamped into 0..=255, and NaN becomes 0.
pub trait Intensity: Copy {
    fn to_intensity(self) -> u8;
}

impl Intensity for u8 {
    #[inline]
    fn to_intensity(self) -> u8 {
        self
    }
}

macro_rules! impl_intensity_int {
    ($($t:ty),*) => {
        $(
            impl Intensity for $t {
                #[inline]
                fn to_intensity(self) -> u8 {
                    self.min(255) as u8
                }
            }
        )*
    };
}

impl_intensity_int!(u16, u32, u64, usize);

macro_rules! impl_intensity_signed {
    ($($t:ty),*) => {
        $(
            impl Intensity for $t {
                #[inline]
                fn to_intensity(self) -> u8 {
                    self.clamp(0, 255) as u8
                }
            }
        )*
    };
}

impl_intensity_signed!(i16, i32, i64, isize);

impl Intensity for i8 {
    #[inline]
    fn to_intensity(self) -> u8 {
        self.max(0) as u8
    }
}

impl Intensity for f64 {
    #[inline]
    fn to_intensity(self) -> u8 {
        if self.is_nan() {
            return 0;
        }
        self.round_ties_even().clamp(0.0, 255.0) as u8
    }
}

impl Intensity for f32 {
    #[inline]
    fn to_intensity(self) -> u8 {
        (self as f64).to_intensity()
    }
}

/// Quantized sample at `index`, or 0 when the line is too short.
#[inline]
pub(crate) fn sample_at<S: Intensity>(line: &[S], index: usize) -> u8 {
    line.get(index).map_or(0, |s| s.to_intensity())
}
