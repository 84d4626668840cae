use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::Serialize;

use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Rgb – serializable colour stored in figures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(220, 38, 38);
    pub const GREEN: Rgb = Rgb(22, 163, 74);
    pub const GRAY: Rgb = Rgb(160, 160, 160);
}

impl From<Rgb> for Color32 {
    fn from(c: Rgb) -> Self {
        Color32::from_rgb(c.0, c.1, c.2)
    }
}

/// Fixed colours of the per-site outcome pie.
pub fn outcome_color(outcome: Outcome) -> Rgb {
    match outcome {
        Outcome::Success => Rgb::GREEN,
        Outcome::Failure => Rgb::RED,
    }
}

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
            Rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category colours: category name → Rgb
// ---------------------------------------------------------------------------

/// Maps the categories of a column (booster versions, sites) to distinct
/// colours. Built over the whole dataset so a category keeps its colour
/// however the rows are filtered.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl CategoryColors {
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a String>) -> Self {
        let unique: BTreeSet<&String> = categories.into_iter().collect();
        let palette = generate_palette(unique.len());
        let mapping = unique
            .into_iter()
            .zip(palette)
            .map(|(c, rgb)| (c.clone(), rgb))
            .collect();

        CategoryColors {
            mapping,
            default_color: Rgb::GRAY,
        }
    }

    pub fn color_for(&self, category: &str) -> Rgb {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn unknown_category_gets_default_color() {
        let cats = vec!["B4".to_string(), "FT".to_string()];
        let colors = CategoryColors::new(&cats);
        assert_ne!(colors.color_for("B4"), colors.color_for("FT"));
        assert_eq!(colors.color_for("v1.0"), Rgb::GRAY);
    }
}
