use kubik::time_series::TrendPoint;

/// Compute X (solve position) and Y (milliseconds) bounds for the trend chart
pub fn compute_chart_params(points: &[TrendPoint]) -> (f64, f64, f64) {
    let mut lowest_ms = f64::INFINITY;
    let mut highest_ms: f64 = 0.0;
    for &TrendPoint { ms, .. } in points {
        if ms > highest_ms {
            highest_ms = ms;
        }
        if ms < lowest_ms {
            lowest_ms = ms;
        }
    }

    let overall_count = match points.last() {
        Some(p) => p.idx,
        None => 1.0,
    };

    if !lowest_ms.is_finite() {
        lowest_ms = 0.0;
    }
    // A flat series still needs a visible band.
    if highest_ms - lowest_ms < 1.0 {
        highest_ms = lowest_ms + 1.0;
    }

    (overall_count.max(2.0), lowest_ms, highest_ms)
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
