//! Colorbar legend and colormap.

use fv_core::ValueRange;
use serde::Serialize;

/// Colormaps available to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Colormap {
    #[default]
    Plasma,
}

/// Matplotlib plasma, sampled at nine evenly spaced stops.
const PLASMA: [[u8; 3]; 9] = [
    [13, 8, 135],
    [75, 3, 161],
    [125, 3, 168],
    [168, 34, 150],
    [203, 70, 121],
    [229, 107, 93],
    [248, 148, 65],
    [253, 195, 40],
    [240, 249, 33],
];

impl Colormap {
    pub fn name(self) -> &'static str {
        match self {
            Colormap::Plasma => "plasma",
        }
    }

    /// Colour at `t` in [0, 1]; `t` is clamped, NaN maps to the low end.
    pub fn sample(self, t: f64) -> [u8; 3] {
        let stops: &[[u8; 3]] = match self {
            Colormap::Plasma => &PLASMA,
        };
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let x = t * (stops.len() - 1) as f64;
        let i = (x.floor() as usize).min(stops.len() - 2);
        let frac = x - i as f64;
        let (a, b) = (stops[i], stops[i + 1]);
        let mut out = [0u8; 3];
        for c in 0..3 {
            let v = a[c] as f64 + (b[c] as f64 - a[c] as f64) * frac;
            out[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

/// Legend for a coloured attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Colorbar {
    pub title: String,
    pub range: ValueRange,
    pub colormap: Colormap,
}

impl Colorbar {
    pub fn new(title: impl Into<String>, range: ValueRange) -> Self {
        Self {
            title: title.into(),
            range,
            colormap: Colormap::Plasma,
        }
    }

    /// Colour of a data value. NaN gives None so callers can draw their
    /// own "no data" colour.
    pub fn color_of(&self, value: f64) -> Option<[u8; 3]> {
        if value.is_nan() {
            return None;
        }
        Some(self.colormap.sample(self.range.normalize(value)))
    }

    /// `n` evenly spaced tick values from min to max (inclusive).
    pub fn ticks(&self, n: usize) -> Vec<f64> {
        match n {
            0 => Vec::new(),
            1 => vec![self.range.min],
            _ => (0..n)
                .map(|i| self.range.min + self.range.span() * i as f64 / (n - 1) as f64)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plasma_endpoints() {
        assert_eq!(Colormap::Plasma.sample(0.0), [13, 8, 135]);
        assert_eq!(Colormap::Plasma.sample(1.0), [240, 249, 33]);
        assert_eq!(Colormap::Plasma.sample(0.5), [203, 70, 121]);
        assert_eq!(Colormap::Plasma.sample(-3.0), Colormap::Plasma.sample(0.0));
        assert_eq!(Colormap::Plasma.sample(7.0), Colormap::Plasma.sample(1.0));
    }

    #[test]
    fn interpolates_between_stops() {
        let c = Colormap::Plasma.sample(0.0625);
        assert_eq!(c, [44, 6, 148]);
    }

    #[test]
    fn ticks_span_range() {
        let bar = Colorbar::new("stress", ValueRange::new(10.0, 20.0).unwrap());
        assert_eq!(bar.ticks(3), vec![10.0, 15.0, 20.0]);
        assert_eq!(bar.ticks(1), vec![10.0]);
        assert!(bar.ticks(0).is_empty());
    }

    #[test]
    fn nan_has_no_colour() {
        let bar = Colorbar::new("t", ValueRange::new(0.0, 1.0).unwrap());
        assert_eq!(bar.color_of(f64::NAN), None);
        assert_eq!(bar.color_of(1.0), Some([240, 249, 33]));
    }
}
