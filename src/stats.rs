use crate::solve::Solve;
use crate::util::{mean, trimmed_mean};

/// One value trimmed from each end of a window, the WCA ao5 convention.
/// The 12-solve window deliberately reuses the same single trim.
pub const WCA_TRIM: usize = 1;

/// Aggregate statistics over the newest-first solve sequence.
///
/// Every field is re-derived from the full sequence on each call to
/// [`SolveStats::compute`]; nothing is cached or updated incrementally.
/// `None` means "not computable" and renders as the time placeholder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolveStats {
    pub count: usize,
    pub best: Option<f64>,
    pub mean: Option<f64>,
    pub ao5: Option<f64>,
    pub ao12: Option<f64>,
    pub wca5: Option<f64>,
    pub wca12: Option<f64>,
}

impl SolveStats {
    pub fn compute(solves: &[Solve]) -> Self {
        let durations = solves.iter().map(|s| s.ms as f64).collect::<Vec<f64>>();
        let window = |n: usize| &durations[..durations.len().min(n)];

        Self {
            count: solves.len(),
            best: durations.iter().copied().reduce(f64::min),
            mean: mean(&durations),
            ao5: mean(window(5)),
            ao12: mean(window(12)),
            wca5: trimmed_mean(window(5), WCA_TRIM),
            wca12: trimmed_mean(window(12), WCA_TRIM),
        }
    }
}
