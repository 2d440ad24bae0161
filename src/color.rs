use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Sequential colour scales
// ---------------------------------------------------------------------------

const PLASMA: [u32; 10] = [
    0x0d0887, 0x46039f, 0x7201a8, 0x9c179e, 0xbd3786, 0xd8576b, 0xed7953, 0xfb9f3a, 0xfdca26,
    0xf0f921,
];

const VIRIDIS: [u32; 10] = [
    0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b,
    0xfde725,
];

const CIVIDIS: [u32; 10] = [
    0x00224e, 0x123570, 0x3b496c, 0x575d6d, 0x707173, 0x8a8678, 0xa59c74, 0xc3b369, 0xe1cc55,
    0xfee838,
];

/// A perceptually ordered colour scale sampled by linear interpolation
/// between evenly spaced stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    Plasma,
    Viridis,
    Cividis,
}

impl ColorScale {
    fn stops(self) -> &'static [u32] {
        match self {
            ColorScale::Plasma => &PLASMA,
            ColorScale::Viridis => &VIRIDIS,
            ColorScale::Cividis => &CIVIDIS,
        }
    }

    /// The scale's first stop.
    pub fn first(self) -> Color32 {
        hex_to_color32(self.stops()[0])
    }

    /// Colour at position `t` in `[0, 1]`; values outside are clamped, NaN maps to 0.
    pub fn sample(self, t: f64) -> Color32 {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = t as f32;

        let scaled = t * (stops.len() - 1) as f32;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - i as f32;

        let a = to_linear(stops[i]);
        let b = to_linear(stops[i + 1]);
        let mixed = a.mix(b, frac);
        let out: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
        Color32::from_rgb(out.red, out.green, out.blue)
    }

    /// Map `value` within `[min, max]` onto the scale. A degenerate range samples the middle.
    pub fn sample_range(self, value: f64, min: f64, max: f64) -> Color32 {
        if max > min {
            self.sample((value - min) / (max - min))
        } else {
            self.sample(0.5)
        }
    }
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_text(background: Color32) -> Color32 {
    let lin: LinSrgb = Srgb::new(background.r(), background.g(), background.b())
        .into_format::<f32>()
        .into_linear();
    let luminance = 0.2126 * lin.red + 0.7152 * lin.green + 0.0722 * lin.blue;
    if luminance > 0.35 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn hex_to_srgb(hex: u32) -> Srgb<u8> {
    Srgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

fn hex_to_color32(hex: u32) -> Color32 {
    let c = hex_to_srgb(hex);
    Color32::from_rgb(c.red, c.green, c.blue)
}

fn to_linear(hex: u32) -> LinSrgb {
    hex_to_srgb(hex).into_format::<f32>().into_linear()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_stops() {
        assert_eq!(ColorScale::Viridis.sample(0.0), Color32::from_rgb(0x44, 0x01, 0x54));
        assert_eq!(ColorScale::Viridis.sample(1.0), Color32::from_rgb(0xfd, 0xe7, 0x25));
        assert_eq!(ColorScale::Plasma.first(), Color32::from_rgb(0x0d, 0x08, 0x87));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(ColorScale::Cividis.sample(-3.0), ColorScale::Cividis.sample(0.0));
        assert_eq!(ColorScale::Cividis.sample(7.0), ColorScale::Cividis.sample(1.0));
        assert_eq!(ColorScale::Cividis.sample(f64::NAN), ColorScale::Cividis.sample(0.0));
    }

    #[test]
    fn degenerate_range_uses_middle() {
        assert_eq!(
            ColorScale::Viridis.sample_range(4.0, 4.0, 4.0),
            ColorScale::Viridis.sample(0.5)
        );
    }

    #[test]
    fn text_contrasts_with_background() {
        assert_eq!(contrast_text(Color32::from_rgb(0x00, 0x22, 0x4e)), Color32::WHITE);
        assert_eq!(contrast_text(Color32::from_rgb(0xfe, 0xe8, 0x38)), Color32::BLACK);
    }
}
