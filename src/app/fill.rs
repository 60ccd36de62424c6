//! Fill estimator: ranger distance → bounded fill percentage.

use core::fmt;

use crate::config::Calibration;

/// Derived fill level.  `Percent` is always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillLevel {
    Percent(u8),
    /// No distance was available this cycle.  Distinct from 0 %.
    Unavailable,
}

impl FillLevel {
    pub fn percent(self) -> Option<u8> {
        match self {
            Self::Percent(p) => Some(p),
            Self::Unavailable => None,
        }
    }
}

impl fmt::Display for FillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// Map a distance to a fill level.
///
/// At or beyond the empty distance the bin reads 0 %, at or inside the full
/// distance 100 %; in between the value is interpolated linearly and
/// truncated.  The result is clamped to 0..=100 in case the calibration
/// overshoots.
pub fn estimate(distance_cm: Option<f32>, cal: &Calibration) -> FillLevel {
    let Some(distance) = distance_cm.filter(|d| d.is_finite()) else {
        return FillLevel::Unavailable;
    };
    if distance >= cal.empty_distance_cm {
        return FillLevel::Percent(0);
    }
    if distance <= cal.full_distance_cm {
        return FillLevel::Percent(100);
    }

    // f64 keeps exact calibration points (e.g. 80 %) from truncating down.
    let empty = f64::from(cal.empty_distance_cm);
    let full = f64::from(cal.full_distance_cm);
    let span = empty - full;
    let occupied = f64::from(distance) - full;
    let pct = (1.0 - occupied / span) * 100.0;
    FillLevel::Percent((pct as i32).clamp(0, 100) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cal() -> Calibration {
        Calibration::default()
    }

    #[test]
    fn unavailable_distance_stays_unavailable() {
        assert_eq!(estimate(None, &cal()), FillLevel::Unavailable);
        assert_eq!(estimate(Some(f32::NAN), &cal()), FillLevel::Unavailable);
    }

    #[test]
    fn endpoints_saturate() {
        assert_eq!(estimate(Some(50.0), &cal()), FillLevel::Percent(0));
        assert_eq!(estimate(Some(400.0), &cal()), FillLevel::Percent(0));
        assert_eq!(estimate(Some(5.0), &cal()), FillLevel::Percent(100));
        assert_eq!(estimate(Some(0.0), &cal()), FillLevel::Percent(100));
    }

    #[test]
    fn interpolates_and_truncates() {
        // 45 cm span: 14 cm is exactly 80 %, 27.5 cm is exactly 50 %.
        assert_eq!(estimate(Some(14.0), &cal()), FillLevel::Percent(80));
        assert_eq!(estimate(Some(27.5), &cal()), FillLevel::Percent(50));
        // 20 cm → 66.67 % → 66.
        assert_eq!(estimate(Some(20.0), &cal()), FillLevel::Percent(66));
    }

    #[test]
    fn display_tokens() {
        assert_eq!(FillLevel::Percent(42).to_string(), "42%");
        assert_eq!(FillLevel::Unavailable.to_string(), "unavailable");
        assert_eq!(FillLevel::Unavailable.percent(), None);
    }
}
