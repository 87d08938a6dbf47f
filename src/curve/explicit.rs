use super::Polyline;
use crate::geom::ScreenPoint;
use crate::transform::Transform;

/// Sample `y = g(x)` every `stride` pixel columns.
///
/// A run ends where `g` is not finite, or where consecutive samples jump by
/// more than the canvas height (treated as an asymptote). Runs with fewer
/// than two points are dropped.
pub fn sample_explicit(g: impl Fn(f64) -> f64, transform: &Transform, stride: u32) -> Vec<Polyline> {
    let screen = transform.screen();
    let height = screen.height();
    let step = f64::from(stride.max(1));

    let mut runs = Vec::new();
    let mut current: Polyline = Vec::new();
    let mut finish = |current: &mut Polyline| {
        if current.len() >= 2 {
            runs.push(std::mem::take(current));
        }
        current.clear();
    };

    let mut column = 0u32;
    loop {
        let px = screen.min.x + f64::from(column) * step;
        if px > screen.max.x {
            break;
        }
        column += 1;

        let x = transform.to_math(ScreenPoint::new(px, screen.min.y)).x;
        let y = g(x);
        if !y.is_finite() {
            finish(&mut current);
            continue;
        }
        let py = transform.y_to_pixel(y);
        if current.last().is_some_and(|last| (py - last.y).abs() > height) {
            finish(&mut current);
        }
        current.push(ScreenPoint::new(px, py));
    }
    finish(&mut current);
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Viewport;

    fn canvas(viewport: Viewport) -> Transform {
        Transform::for_canvas(viewport, 200.0, 100.0).unwrap()
    }

    #[test]
    fn continuous_function_is_one_run() {
        let transform = canvas(Viewport::default());
        let runs = sample_explicit(f64::sin, &transform, 2);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 101);
        assert_eq!(runs[0][0].x, 0.0);
        assert_eq!(runs[0][100].x, 200.0);
    }

    #[test]
    fn reciprocal_splits_at_the_pole() {
        let transform = canvas(Viewport::default());
        let runs = sample_explicit(|x| 1.0 / x, &transform, 2);
        assert_eq!(runs.len(), 2);
        assert!(runs[0].iter().all(|point| point.x < 100.0));
        assert!(runs[1].iter().all(|point| point.x > 100.0));
    }

    #[test]
    fn undefined_samples_break_runs() {
        let transform = canvas(Viewport::default());
        let runs = sample_explicit(f64::sqrt, &transform, 2);
        assert_eq!(runs.len(), 1);
        assert!(runs[0].iter().all(|point| point.x >= 100.0));
    }

    #[test]
    fn isolated_points_are_dropped() {
        let transform = canvas(Viewport::default());
        let runs = sample_explicit(|x| if x == 0.0 { 1.0 } else { f64::NAN }, &transform, 2);
        assert!(runs.is_empty());
    }

    #[test]
    fn zero_stride_samples_every_column() {
        let transform = canvas(Viewport::default());
        let runs = sample_explicit(|x| x, &transform, 0);
        assert_eq!(runs[0].len(), 201);
    }
}
