use serde::Serialize;

/// Bounds of the sampled visible range, in nanometers.
pub const VISIBLE_MIN_NM: f64 = 380.0;
pub const VISIBLE_MAX_NM: f64 = 780.0;

/// Default sampling interval, in nanometers.
pub const DEFAULT_INTERVAL_NM: f64 = 5.0;

const GAMMA: f64 = 0.8;
const INTENSITY_MAX: f64 = 255.0;

/// An 8-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Map a wavelength in nanometers to a display color.
///
/// Piecewise-linear weights over the visible sub-bands, an intensity fade
/// at the perceptual edges of the spectrum (380-420 and 700-780 nm), and
/// gamma correction before quantizing to 8-bit channels. Wavelengths
/// outside 380-780 nm map to black.
pub fn wavelength_to_rgb(wavelength: f64) -> Rgb {
    let (r, g, b) = if (380.0..440.0).contains(&wavelength) {
        (-(wavelength - 440.0) / (440.0 - 380.0), 0.0, 1.0)
    } else if (440.0..490.0).contains(&wavelength) {
        (0.0, (wavelength - 440.0) / (490.0 - 440.0), 1.0)
    } else if (490.0..510.0).contains(&wavelength) {
        (0.0, 1.0, -(wavelength - 510.0) / (510.0 - 490.0))
    } else if (510.0..580.0).contains(&wavelength) {
        ((wavelength - 510.0) / (580.0 - 510.0), 1.0, 0.0)
    } else if (580.0..645.0).contains(&wavelength) {
        (1.0, -(wavelength - 645.0) / (645.0 - 580.0), 0.0)
    } else if (645.0..=780.0).contains(&wavelength) {
        (1.0, 0.0, 0.0)
    } else {
        (0.0, 0.0, 0.0)
    };

    let factor = if (380.0..420.0).contains(&wavelength) {
        0.3 + 0.7 * (wavelength - 380.0) / (420.0 - 380.0)
    } else if (420.0..=700.0).contains(&wavelength) {
        1.0
    } else if wavelength > 700.0 && wavelength <= 780.0 {
        0.3 + 0.7 * (780.0 - wavelength) / (780.0 - 700.0)
    } else {
        0.0
    };

    let correct = |c: f64| (INTENSITY_MAX * (c * factor).powf(GAMMA)).round() as u8;
    Rgb {
        r: correct(r),
        g: correct(g),
        b: correct(b),
    }
}

/// A sampled point of the visible spectrum.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Sample {
    pub wavelength: f64,
    pub color: Rgb,
}

/// Sample the visible range at `interval` nanometer steps.
///
/// The lower boundary is included, the upper excluded, matching the
/// half-open sub-bands of the color mapping. Sample points are computed
/// from the step index rather than by repeated addition, so fractional
/// intervals do not accumulate rounding drift.
pub fn sample_spectrum(interval: f64) -> Vec<Sample> {
    let mut samples = Vec::new();
    for i in 0.. {
        let wavelength = VISIBLE_MIN_NM + i as f64 * interval;
        if wavelength >= VISIBLE_MAX_NM {
            break;
        }
        samples.push(Sample {
            wavelength,
            color: wavelength_to_rgb(wavelength),
        });
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_green_at_band_boundary() {
        let rgb = wavelength_to_rgb(510.0);
        assert_eq!(rgb, Rgb { r: 0, g: 255, b: 0 });
    }

    #[test]
    fn pure_red_in_the_long_band() {
        let rgb = wavelength_to_rgb(650.0);
        assert_eq!(rgb, Rgb { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn violet_end_fades() {
        // factor = 0.3 at the very edge of the visible range.
        let rgb = wavelength_to_rgb(380.0);
        assert_eq!(rgb.g, 0);
        assert_eq!(rgb.b, (255.0 * 0.3f64.powf(0.8)).round() as u8);
    }

    #[test]
    fn out_of_range_is_black() {
        assert_eq!(wavelength_to_rgb(200.0), Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(wavelength_to_rgb(900.0), Rgb { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn hex_formatting() {
        let rgb = Rgb { r: 255, g: 0, b: 16 };
        assert_eq!(rgb.hex(), "#ff0010");
    }

    #[test]
    fn default_interval_covers_the_visible_range() {
        let samples = sample_spectrum(DEFAULT_INTERVAL_NM);
        assert_eq!(samples.len(), 80);
        assert_eq!(samples[0].wavelength, VISIBLE_MIN_NM);
        assert!(samples.last().unwrap().wavelength < VISIBLE_MAX_NM);
    }

    #[test]
    fn fractional_interval_does_not_drift() {
        // 0.1 is not exactly representable; repeated addition would walk
        // the sample points off their grid and miscount the total.
        let samples = sample_spectrum(0.1);
        assert_eq!(samples.len(), 4000);
        let last = samples.last().unwrap().wavelength;
        assert!((last - 779.9).abs() < 1e-9);
        assert!(last < VISIBLE_MAX_NM);
    }
}
