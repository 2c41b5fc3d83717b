//! Linear value scale with evenly spaced ticks

use crate::types::Tick;
use serde::Serialize;

/// Maps `[0, max_value]` onto `[0, chart_height]`, inverted so 0 sits at
/// the bottom of the plot area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scale {
    max_value: f64,
    effective_max: f64,
    chart_height: f64,
    ticks: Vec<Tick>,
}

impl Scale {
    /// Position of `value`, measured down from the top of the plot area
    pub fn to_position(&self, value: f64) -> f64 {
        self.chart_height - (value / self.effective_max) * self.chart_height
    }

    /// True when the domain is empty (max <= 0 or not finite).
    ///
    /// Callers should show a "no data" state instead of drawing the scale.
    pub fn is_flat(&self) -> bool {
        !(self.max_value.is_finite() && self.max_value > 0.0)
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }
}

/// Build a scale with `tick_count + 1` ticks from 0 to `max_value`.
///
/// A zero `tick_count` is treated as 1. Tick values are rounded for
/// display; positions use the exact points so spacing stays even.
pub fn build_scale(max_value: f64, tick_count: usize, chart_height: f64) -> Scale {
    let effective_max = if max_value.is_finite() && max_value > 0.0 {
        max_value
    } else {
        1.0
    };
    let domain_max = if max_value.is_finite() { max_value.max(0.0) } else { 0.0 };

    let mut scale = Scale {
        max_value,
        effective_max,
        chart_height,
        ticks: Vec::new(),
    };

    let steps = tick_count.max(1);
    let ticks: Vec<Tick> = (0..=steps)
        .map(|i| {
            let exact = domain_max * i as f64 / steps as f64;
            Tick {
                value: exact.round(),
                position: scale.to_position(exact),
            }
        })
        .collect();
    scale.ticks = ticks;

    scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_max_does_not_divide_by_zero() {
        let scale = build_scale(0.0, 5, 200.0);
        let pos = scale.to_position(0.0);
        assert!(pos.is_finite());
        assert!((pos - 200.0).abs() < f64::EPSILON);
        assert!(scale.is_flat());
    }

    #[test]
    fn test_position_is_inverted() {
        let scale = build_scale(100.0, 5, 200.0);
        assert!((scale.to_position(0.0) - 200.0).abs() < f64::EPSILON);
        assert!((scale.to_position(100.0) - 0.0).abs() < f64::EPSILON);
        assert!((scale.to_position(50.0) - 100.0).abs() < f64::EPSILON);
        assert!(!scale.is_flat());
    }

    #[test]
    fn test_tick_count_plus_one_ticks() {
        let scale = build_scale(100.0, 5, 200.0);
        let values: Vec<f64> = scale.ticks().iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_tick_values_rounded_positions_exact() {
        let scale = build_scale(10.0, 3, 90.0);
        let ticks = scale.ticks();
        assert_eq!(ticks.len(), 4);
        // 10/3 = 3.33.. → 3, 20/3 = 6.66.. → 7
        assert_eq!(ticks[1].value, 3.0);
        assert_eq!(ticks[2].value, 7.0);
        assert!((ticks[1].position - 60.0).abs() < 1e-9);
        assert!((ticks[2].position - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_tick_count_treated_as_one() {
        let scale = build_scale(50.0, 0, 100.0);
        assert_eq!(scale.ticks().len(), 2);
    }

    #[test]
    fn test_flat_scale_ticks_stay_at_baseline() {
        let scale = build_scale(0.0, 4, 100.0);
        assert_eq!(scale.ticks().len(), 5);
        for tick in scale.ticks() {
            assert_eq!(tick.value, 0.0);
            assert!((tick.position - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_non_finite_max_is_flat() {
        let scale = build_scale(f64::NAN, 5, 100.0);
        assert!(scale.is_flat());
        assert!(scale.to_position(0.0).is_finite());
    }
}
