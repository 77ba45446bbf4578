use itertools::Itertools;

pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Mean after discarding the `trim` lowest and `trim` highest values.
///
/// Needs at least `2 * trim + 1` values, otherwise there is nothing left
/// to average and the result is `None`.
pub fn trimmed_mean(data: &[f64], trim: usize) -> Option<f64> {
    if data.len() < trim * 2 + 1 {
        return None;
    }

    let sorted = data
        .iter()
        .copied()
        .sorted_by(|a, b| a.total_cmp(b))
        .collect::<Vec<f64>>();

    mean(&sorted[trim..sorted.len() - trim])
}
