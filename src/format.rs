//! Euro amount formatting for human display.
//!
//! Two widgets legitimately round the same magnitude differently: the KPI bar
//! compresses harder than the detail panel. Both policies are kept as
//! explicit profiles rather than unified.

/// Rounding profile, one per call site family.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Profile {
    /// KPI bar: billions with 1 decimal, millions with none.
    Kpi,
    /// Detail panel, map tooltip, legend: billions with 2 decimals,
    /// millions with 1.
    Panel,
}

/// Format an amount in euros with magnitude abbreviation.
///
/// Priority order: billions, millions, exact zero, then a grouped integer.
/// Deterministic for a given `(value, profile)`.
pub fn format_eur(value: f64, profile: Profile) -> String {
    if value >= 1e9 {
        let decimals = match profile {
            Profile::Kpi => 1,
            Profile::Panel => 2,
        };
        format!("{:.*} Md€", decimals, value / 1e9)
    } else if value >= 1e6 {
        let decimals = match profile {
            Profile::Kpi => 0,
            Profile::Panel => 1,
        };
        format!("{:.*} M€", decimals, value / 1e6)
    } else if value == 0.0 {
        "0 €".to_string()
    } else {
        format!("{} €", group_thousands(value.round() as i64))
    }
}

/// One-decimal percentage of `part` in `total`, zero-guarded: a zero (or
/// negative) total yields `"0"`, never a division by zero.
pub fn share_percent(part: f64, total: f64) -> String {
    if total > 0.0 {
        format!("{:.1}", part / total * 100.0)
    } else {
        "0".to_string()
    }
}

/// French-style digit grouping (space every three digits).
fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billions_per_profile() {
        assert_eq!(format_eur(7_002_000_000.0, Profile::Kpi), "7.0 Md€");
        assert_eq!(format_eur(7_002_000_000.0, Profile::Panel), "7.00 Md€");
        assert_eq!(format_eur(5e9, Profile::Panel), "5.00 Md€");
        assert_eq!(format_eur(1e9, Profile::Kpi), "1.0 Md€");
    }

    #[test]
    fn millions_per_profile() {
        assert_eq!(format_eur(2_000_000.0, Profile::Panel), "2.0 M€");
        assert_eq!(format_eur(2_000_000.0, Profile::Kpi), "2 M€");
        assert_eq!(format_eur(2_450_000.0, Profile::Panel), "2.5 M€");
        assert_eq!(format_eur(1e6, Profile::Kpi), "1 M€");
    }

    #[test]
    fn zero_is_literal() {
        assert_eq!(format_eur(0.0, Profile::Kpi), "0 €");
        assert_eq!(format_eur(0.0, Profile::Panel), "0 €");
    }

    #[test]
    fn small_amounts_are_grouped_integers() {
        assert_eq!(format_eur(950.0, Profile::Panel), "950 €");
        assert_eq!(format_eur(1_234.0, Profile::Kpi), "1 234 €");
        assert_eq!(format_eur(999_999.0, Profile::Panel), "999 999 €");
    }

    #[test]
    fn formatting_is_deterministic() {
        for value in [0.0, 42.0, 2e6, 7_002_000_000.0] {
            for profile in [Profile::Kpi, Profile::Panel] {
                assert_eq!(format_eur(value, profile), format_eur(value, profile));
            }
        }
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1 000");
        assert_eq!(group_thousands(1_234_567), "1 234 567");
    }

    #[test]
    fn percentages_are_zero_guarded() {
        assert_eq!(share_percent(2.5e9, 5e9), "50.0");
        assert_eq!(share_percent(1.0, 3.0), "33.3");
        assert_eq!(share_percent(0.0, 0.0), "0");
        assert_eq!(share_percent(5.0, 0.0), "0");
    }
}
