//! Numeric intersection of two plots.
//!
//! The search samples `diff(x) = f(x) − g(x)` uniformly, keeps samples that
//! are already (near) zero, and refines every sign change between
//! consecutive samples by bisection. This is a heuristic: roots where the
//! difference touches zero without changing sign between two samples, or
//! several roots closer together than one sample step, can be missed.

use log::{debug, trace};

use crate::{geometry::Point2, shape::Plot};

/// Tuning knobs for [`find_intersections`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFinderConfig {
    /// Number of uniform samples over the search range.
    pub samples: usize,
    /// `|diff|` below which a sample or bisection midpoint is a root.
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for RootFinderConfig {
    fn default() -> Self {
        Self {
            samples: 500,
            tolerance: 1e-10,
            max_iterations: 50,
        }
    }
}

/// Finds the points where two plots cross inside `range`.
///
/// The search is restricted to the overlap of both plots' domains and
/// `range`. Results are ordered by x and returned as `(x, f(x))`; non-finite
/// results are dropped.
pub fn find_intersections(
    f: &Plot,
    g: &Plot,
    range: (f64, f64),
    config: &RootFinderConfig,
) -> Vec<Point2> {
    let Some((lo, hi)) = f.clip(range).and_then(|r| g.clip(r)) else {
        debug!(range:? = range; "Plots have no common domain");
        return Vec::new();
    };

    let diff = |x: f64| f.eval(x) - g.eval(x);
    let samples = config.samples.max(2);
    let step = (hi - lo) / (samples - 1) as f64;

    let mut roots = Vec::new();
    let mut previous: Option<(f64, f64)> = None;
    for i in 0..samples {
        let x = lo + step * i as f64;
        let d = diff(x);
        if d.is_finite() && d.abs() < config.tolerance {
            roots.push(x);
        } else if let Some((px, pd)) = previous {
            if pd.is_finite() && d.is_finite() && pd * d < 0.0 {
                roots.push(bisect(&diff, px, x, config));
            }
        }
        previous = Some((x, d));
    }

    let points = dedup_sorted(roots, step / 2.0)
        .into_iter()
        .map(|x| Point2::new(x, f.eval(x)))
        .filter(|p| p.is_finite())
        .collect::<Vec<_>>();

    debug!(lo, hi, found = points.len(); "Plot intersection search finished");
    points
}

fn bisect(diff: &impl Fn(f64) -> f64, mut a: f64, mut b: f64, config: &RootFinderConfig) -> f64 {
    let mut fa = diff(a);
    for iteration in 0..config.max_iterations {
        let mid = (a + b) / 2.0;
        let fmid = diff(mid);
        if fmid.abs() < config.tolerance || (b - a) / 2.0 < config.tolerance {
            trace!(iteration, x = mid; "Bisection converged");
            return mid;
        }
        if fa * fmid < 0.0 {
            b = mid;
        } else {
            a = mid;
            fa = fmid;
        }
    }
    (a + b) / 2.0
}

fn dedup_sorted(mut xs: Vec<f64>, min_gap: f64) -> Vec<f64> {
    xs.sort_by(f64::total_cmp);
    let mut kept: Vec<f64> = Vec::with_capacity(xs.len());
    for x in xs {
        if kept.last().is_none_or(|last| x - last > min_gap) {
            kept.push(x);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use float_cmp::approx_eq;

    use super::*;

    fn plot(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Plot {
        Plot::new(Arc::new(f))
    }

    #[test]
    fn test_parabola_meets_line() {
        let roots = find_intersections(
            &plot(|x| x * x),
            &plot(|x| x + 2.0),
            (-10.0, 10.0),
            &RootFinderConfig::default(),
        );
        assert_eq!(roots.len(), 2);
        assert!(approx_eq!(f64, roots[0].x(), -1.0, epsilon = 1e-8));
        assert!(approx_eq!(f64, roots[0].y(), 1.0, epsilon = 1e-8));
        assert!(approx_eq!(f64, roots[1].x(), 2.0, epsilon = 1e-8));
    }

    #[test]
    fn test_transcendental_crossing() {
        let roots = find_intersections(
            &plot(f64::cos),
            &plot(|x| x),
            (-10.0, 10.0),
            &RootFinderConfig::default(),
        );
        assert_eq!(roots.len(), 1);
        assert!(approx_eq!(f64, roots[0].x(), 0.739_085_133_2, epsilon = 1e-8));
    }

    #[test]
    fn test_exact_sample_hit_is_not_duplicated() {
        // x = 0 is one of the sample points for a symmetric range.
        let roots = find_intersections(
            &plot(|x| x),
            &plot(|_| 0.0),
            (-1.0, 1.0),
            &RootFinderConfig {
                samples: 201,
                ..RootFinderConfig::default()
            },
        );
        assert_eq!(roots.len(), 1);
        assert!(approx_eq!(f64, roots[0].x(), 0.0, epsilon = 1e-12));
    }

    #[test]
    fn test_disjoint_domains_find_nothing() {
        let left = plot(|x| x).with_domain(-5.0, -1.0);
        let right = plot(|x| x).with_domain(1.0, 5.0);
        let roots = find_intersections(&left, &right, (-10.0, 10.0), &RootFinderConfig::default());
        assert!(roots.is_empty());
    }

    #[test]
    fn test_parallel_plots_find_nothing() {
        let roots = find_intersections(
            &plot(|x| x),
            &plot(|x| x + 1.0),
            (-10.0, 10.0),
            &RootFinderConfig::default(),
        );
        assert!(roots.is_empty());
    }

    #[test]
    fn test_non_finite_samples_are_skipped() {
        let roots = find_intersections(
            &plot(|x: f64| x.ln()),
            &plot(|_| 0.0),
            (-10.0, 10.0),
            &RootFinderConfig::default(),
        );
        assert_eq!(roots.len(), 1);
        assert!(approx_eq!(f64, roots[0].x(), 1.0, epsilon = 1e-8));
    }
}
