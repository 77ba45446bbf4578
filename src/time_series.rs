use crate::solve::Solve;

/// A single point on the solve trend chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    /// 1-based position within the charted window, oldest first.
    pub idx: f64,
    pub ms: f64,
}

impl TrendPoint {
    pub fn new(idx: f64, ms: f64) -> Self {
        Self { idx, ms }
    }
}

impl From<(f64, f64)> for TrendPoint {
    fn from(v: (f64, f64)) -> Self {
        TrendPoint { idx: v.0, ms: v.1 }
    }
}

impl From<TrendPoint> for (f64, f64) {
    fn from(p: TrendPoint) -> Self {
        (p.idx, p.ms)
    }
}

/// Chart points for the most recent `window` solves, oldest to the left.
pub fn trend(solves: &[Solve], window: usize) -> Vec<TrendPoint> {
    solves
        .iter()
        .take(window)
        .rev()
        .enumerate()
        .map(|(i, solve)| TrendPoint::new(i as f64 + 1.0, solve.ms as f64))
        .collect()
}
