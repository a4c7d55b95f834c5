//! Goodness-of-fit helpers for the sampling tests.

/// Pearson's chi-square statistic of observed against expected counts.
pub fn chi_square(observed: &[f64], expected: &[f64]) -> f64 {
    assert_eq!(observed.len(), expected.len());
    observed
        .iter()
        .zip(expected)
        .map(|(o, e)| (o - e) * (o - e) / e)
        .sum()
}

/// Chi-square statistic of counts that should be equal across all bins.
pub fn chi_square_equal(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    let expected = total as f64 / counts.len() as f64;
    let observed: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    chi_square(&observed, &vec![expected; counts.len()])
}

/// Kolmogorov-Smirnov distance between the empirical distribution of `samples`
/// and the continuous distribution with the given `cdf`.
pub fn ks_distance<F>(mut samples: Vec<f64>, cdf: F) -> f64
where
    F: Fn(f64) -> f64,
{
    samples.sort_by(|a, b| a.partial_cmp(b).expect("NaN sample"));
    let n = samples.len() as f64;

    samples
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf(x);
            let below = f - i as f64 / n;
            let above = (i + 1) as f64 / n - f;
            below.max(above)
        })
        .fold(0.0, f64::max)
}

/// Counts how many samples fall into each of `bins` equal width bins over `[0, 1)`.
pub fn histogram<I>(unit_values: I, bins: usize) -> Vec<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut counts = vec![0; bins];
    for v in unit_values {
        let idx = ((v * bins as f64) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}
