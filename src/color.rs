use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{LaunchDataset, Outcome};

/// Plain 8-bit sRGB triple; each adapter converts it to its own colour type.
pub type Rgb = [u8; 3];

const FALLBACK: Rgb = [160, 160, 160];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}

/// CSS hex notation for the web adapter.
pub fn to_hex([r, g, b]: Rgb) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

pub fn outcome_color(outcome: Outcome) -> Rgb {
    match outcome {
        Outcome::Success => [46, 160, 67],
        Outcome::Failure => [214, 69, 65],
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Rgb
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl ColorMap {
    /// Build a colour map from the column's distinct values; hues follow the
    /// given order.
    pub fn new(values: &[String]) -> Self {
        let palette = generate_palette(values.len());
        let mapping = values.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: FALLBACK,
        }
    }

    /// Look up the colour for a given category.
    pub fn color_for(&self, value: &str) -> Rgb {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

/// Colours fixed for the lifetime of a dataset, so a site or booster keeps
/// its colour whatever the current selection.
#[derive(Debug, Clone)]
pub struct DashPalette {
    pub sites: ColorMap,
    pub boosters: ColorMap,
}

impl DashPalette {
    pub fn for_dataset(dataset: &LaunchDataset) -> Self {
        DashPalette {
            sites: ColorMap::new(dataset.sites()),
            boosters: ColorMap::new(dataset.booster_categories()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_category_falls_back_to_gray() {
        let map = ColorMap::new(&["FT".to_string(), "B5".to_string()]);
        assert_ne!(map.color_for("FT"), map.color_for("B5"));
        assert_eq!(map.color_for("v1.0"), FALLBACK);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(to_hex([255, 0, 16]), "#ff0010");
    }
}
