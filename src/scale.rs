//! Choropleth color scale derived from the active year's totals.

use crate::data::{CountryRecord, YearSnapshot};
use ratatui::style::Color;

/// Ramp control colors, lightest to darkest orange.
pub const RAMP: [(u8, u8, u8); 4] = [
    (0xfe, 0xf3, 0xe2),
    (0xfd, 0xba, 0x74),
    (0xf9, 0x73, 0x16),
    (0xc2, 0x41, 0x0c),
];

/// Fill for countries with no record or a zero total. Not part of the ramp:
/// zero is special-cased, not the scale's lower bound.
pub const NO_DATA: Color = Color::Rgb(0x6b, 0x72, 0x80);

/// Piecewise-linear color scale over `[0, max/4, max/2, max]`.
///
/// Pure and cheap; rebuilt whenever the active year changes rather than
/// memoized across years.
#[derive(Clone, Copy, Debug)]
pub struct ColorScale {
    max_total: f64,
}

impl ColorScale {
    /// Derive the scale from the active snapshot. The maximum observed total
    /// is floored at 1 so an empty or all-zero year never yields a
    /// zero-width domain.
    pub fn for_snapshot(snapshot: Option<&YearSnapshot>) -> Self {
        let max_total = snapshot
            .map(|s| s.countries.values().map(|c| c.total).fold(0.0, f64::max))
            .unwrap_or(0.0)
            .max(1.0);
        Self { max_total }
    }

    pub fn max_total(&self) -> f64 {
        self.max_total
    }

    /// Interpolated ramp color for a total, clamped at both ends.
    pub fn color(&self, total: f64) -> Color {
        let domain = [
            0.0,
            self.max_total / 4.0,
            self.max_total / 2.0,
            self.max_total,
        ];

        if total <= domain[0] {
            let (r, g, b) = RAMP[0];
            return Color::Rgb(r, g, b);
        }
        for i in 0..3 {
            if total <= domain[i + 1] {
                let t = (total - domain[i]) / (domain[i + 1] - domain[i]);
                return lerp(RAMP[i], RAMP[i + 1], t);
            }
        }
        let (r, g, b) = RAMP[3];
        Color::Rgb(r, g, b)
    }

    /// Fill color for a country's record: ramp color for a non-zero total,
    /// the fixed neutral color otherwise.
    pub fn fill(&self, record: Option<&CountryRecord>) -> Color {
        match record {
            Some(r) if r.total != 0.0 => self.color(r.total),
            _ => NO_DATA,
        }
    }
}

fn lerp(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> Color {
    let ch = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Color::Rgb(ch(from.0, to.0), ch(from.1, to.1), ch(from.2, to.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::YearTotals;
    use std::collections::HashMap;

    fn record(total: f64) -> CountryRecord {
        CountryRecord {
            name: String::new(),
            apd: 0.0,
            napd: 0.0,
            total,
        }
    }

    fn snapshot(totals: &[(&str, f64)]) -> YearSnapshot {
        YearSnapshot {
            countries: totals
                .iter()
                .map(|(iso, t)| (iso.to_string(), record(*t)))
                .collect(),
            totals: YearTotals {
                apd: 0.0,
                napd: 0.0,
                total: 0.0,
                country_count: totals.len() as u32,
            },
        }
    }

    #[test]
    fn empty_year_clamps_domain_to_one() {
        assert_eq!(ColorScale::for_snapshot(None).max_total(), 1.0);
        let all_zero = snapshot(&[("FRA", 0.0)]);
        assert_eq!(ColorScale::for_snapshot(Some(&all_zero)).max_total(), 1.0);
        let empty = YearSnapshot {
            countries: HashMap::new(),
            totals: YearTotals {
                apd: 0.0,
                napd: 0.0,
                total: 0.0,
                country_count: 0,
            },
        };
        assert_eq!(ColorScale::for_snapshot(Some(&empty)).max_total(), 1.0);
    }

    #[test]
    fn control_points_hit_the_ramp_exactly() {
        let s = snapshot(&[("USA", 8e9)]);
        let scale = ColorScale::for_snapshot(Some(&s));
        assert_eq!(scale.color(0.0), Color::Rgb(0xfe, 0xf3, 0xe2));
        assert_eq!(scale.color(2e9), Color::Rgb(0xfd, 0xba, 0x74));
        assert_eq!(scale.color(4e9), Color::Rgb(0xf9, 0x73, 0x16));
        assert_eq!(scale.color(8e9), Color::Rgb(0xc2, 0x41, 0x0c));
    }

    #[test]
    fn interpolation_between_control_points() {
        let s = snapshot(&[("USA", 8e9)]);
        let scale = ColorScale::for_snapshot(Some(&s));
        // Halfway between the first two control points.
        let Color::Rgb(r, g, b) = scale.color(1e9) else {
            panic!("expected an RGB color");
        };
        assert_eq!((r, g, b), (0xfe, 0xd7, 0xab));
    }

    #[test]
    fn out_of_domain_totals_clamp() {
        let s = snapshot(&[("USA", 1e9)]);
        let scale = ColorScale::for_snapshot(Some(&s));
        assert_eq!(scale.color(-5.0), Color::Rgb(0xfe, 0xf3, 0xe2));
        assert_eq!(scale.color(9e9), Color::Rgb(0xc2, 0x41, 0x0c));
    }

    #[test]
    fn zero_total_is_no_data_not_scale_minimum() {
        let s = snapshot(&[("FRA", 0.0), ("USA", 5e9)]);
        let scale = ColorScale::for_snapshot(Some(&s));
        assert_eq!(scale.fill(s.countries.get("FRA")), NO_DATA);
        assert_eq!(scale.fill(None), NO_DATA);
        assert_ne!(scale.fill(s.countries.get("USA")), NO_DATA);
        // The real scale still starts at the lightest ramp color.
        assert_ne!(scale.color(0.0), NO_DATA);
    }
}
