//! Grid step selection, grid line placement, and tick label formatting.

use std::fmt;
use std::sync::Arc;

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Round a raw step up to the largest `{1, 2, 5} × 10^k` not above it.
///
/// Non-finite or non-positive input returns `None`.
pub fn nice_step(raw: f64) -> Option<f64> {
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let ratio = raw / magnitude;
    let step = if ratio >= 5.0 {
        magnitude * 5.0
    } else if ratio >= 2.0 {
        magnitude * 2.0
    } else {
        magnitude
    };
    Some(step)
}

/// A grid line at a multiple of the grid step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    /// Math-space value of the line.
    pub value: f64,
    /// Whether the line is the zero axis.
    pub is_axis: bool,
}

/// Grid lines at multiples of `step` from `floor(min / step)` up to `max`.
///
/// Values are computed as `index * step` so long runs do not accumulate
/// rounding error. Returns nothing if the line count would exceed
/// `max_lines`.
pub fn grid_lines(min: f64, max: f64, step: f64, max_lines: usize) -> Vec<GridLine> {
    if !(step > 0.0) || !min.is_finite() || !max.is_finite() || min > max {
        return Vec::new();
    }
    let first = (min / step).floor();
    let last = (max / step).floor();
    let count = last - first + 1.0;
    if !count.is_finite() || count > max_lines as f64 {
        return Vec::new();
    }
    let first = first as i64;
    (0..count as i64)
        .map(|offset| {
            let index = first + offset;
            GridLine {
                value: index as f64 * step,
                is_axis: index == 0,
            }
        })
        .collect()
}

/// Formatter for tick labels.
#[derive(Clone, Default)]
pub enum AxisFormatter {
    /// Decimal formatting with just enough digits for the grid step.
    #[default]
    Default,
    /// Custom formatter callback receiving the value and the grid step.
    Custom(Arc<dyn Fn(f64, f64) -> String + Send + Sync>),
}

impl AxisFormatter {
    /// Format a tick value given the active grid step.
    pub fn format(&self, value: f64, step: f64) -> String {
        match self {
            Self::Default => format_tick(value, step),
            Self::Custom(formatter) => formatter(value, step),
        }
    }
}

impl fmt::Debug for AxisFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "AxisFormatter::Default"),
            Self::Custom(_) => write!(f, "AxisFormatter::Custom(..)"),
        }
    }
}

fn format_tick(value: f64, step: f64) -> String {
    let abs = value.abs();
    if abs != 0.0 && !(1e-4..1e15).contains(&abs) {
        return format!("{value:e}");
    }
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    let text = format!("{value:.decimals$}");
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        return text[1..].to_string();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn nice_steps_snap_down() {
        assert_relative_eq!(nice_step(1.0).unwrap(), 1.0);
        assert_relative_eq!(nice_step(3.7).unwrap(), 2.0);
        assert_relative_eq!(nice_step(7.0).unwrap(), 5.0);
        assert_relative_eq!(nice_step(0.034).unwrap(), 0.02);
        assert_relative_eq!(nice_step(450.0).unwrap(), 200.0);
        assert!(nice_step(0.0).is_none());
        assert!(nice_step(f64::NAN).is_none());
    }

    #[test]
    fn grid_lines_cover_range_and_flag_axis() {
        let lines = grid_lines(-10.0, 10.0, 5.0, 100);
        let values: Vec<f64> = lines.iter().map(|line| line.value).collect();
        assert_eq!(values, vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
        let axes: Vec<bool> = lines.iter().map(|line| line.is_axis).collect();
        assert_eq!(axes, vec![false, false, true, false, false]);
    }

    #[test]
    fn grid_lines_refuse_excessive_counts() {
        assert!(grid_lines(0.0, 1e9, 1.0, 1000).is_empty());
        assert!(grid_lines(0.0, 1.0, 0.0, 1000).is_empty());
    }

    #[test]
    fn default_labels_follow_step_precision() {
        let formatter = AxisFormatter::default();
        assert_eq!(formatter.format(2.0, 1.0), "2");
        assert_eq!(formatter.format(0.30000000000000004, 0.1), "0.3");
        assert_eq!(formatter.format(-0.05, 0.05), "-0.05");
        assert_eq!(formatter.format(-0.0001, 0.2), "0.0");
        assert_eq!(formatter.format(2e20, 1e20), "2e20");
    }
}
