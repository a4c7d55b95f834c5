use float_extras::f64::ilogb;
use rand::Rng;
use std::iter::FromIterator;
use tracing::warn;

/// Keeps the integral weight of the heaviest item, `100 * 2^(bin_count-1)`
/// quanta, small enough that sums over many items fit into an `u64`.
const MAX_BIN_COUNT: usize = 40;

/// Items grouped by the magnitude of their weight, so that one can be selected
/// with probability proportional to its weight in expected constant time.
///
/// Bin `i` holds items with weights in `(max / 2^(i+1), max / 2^i]`, where `max`
/// is the largest weight seen at construction.
pub struct WeightedBins<T> {
    bins: Vec<Vec<(T, f32)>>,
    /// One over the value of one weight unit in bin_weights and bin_weights_sum,
    /// in double precision so tiny weights do not overflow it
    inv_weight_quantum: f64,
    /// Approximate weight of all binned items represented as a multiple of the quantum.
    /// When summing up items, their weights will be ceiled.
    /// Adding and subtracting integers is fast and repeatable, while these operations in
    /// floating point introduce some error that eventually sums up to a large error.
    bin_weights_sum: u64,
    /// Approximate weights of bins as multiples of the quantum, sum of this vector must be
    /// exactly equal to bin_weights_sum
    bin_weights: Vec<u64>,
    /// Contains the upper bounds for weights stored in a bin
    bin_max_weights: Vec<f64>,
    len: usize,
}

impl<T> FromIterator<(T, f32)> for WeightedBins<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, f32)>,
    {
        // 32 should be enough for most use cases
        WeightedBins::new(iter.into_iter().collect(), 32)
    }
}

impl<T> WeightedBins<T> {
    /// Bins the given items with their weights.
    ///
    /// Items with a weight that is not positive and finite, or smaller than
    /// `2^-bin_count` of the largest weight, are dropped with a warning.
    pub fn new(items: Vec<(T, f32)>, bin_count: usize) -> Self {
        assert!(
            bin_count > 0 && bin_count <= MAX_BIN_COUNT,
            "Bin count must be in 1..={}, got {}",
            MAX_BIN_COUNT,
            bin_count
        );
        let (bins, first_bin_max_weight) = partition_items(items, bin_count);

        let bin_max_weights: Vec<f64> = (0..bin_count)
            .map(|bin_idx| first_bin_max_weight as f64 * (2.0 as f64).powi(-(bin_idx as i32)))
            .collect();

        // This leads to the smallest possible item having weight 50 quanta,
        // and largest having 100 * 2^(bin_count-1) quanta
        let inv_weight_quantum = if bins.iter().all(|b| b.is_empty()) {
            1.0
        } else {
            1.0 / (0.01 * bin_max_weights[bin_count - 1])
        };

        let bin_weights: Vec<u64> = bins
            .iter()
            .map(|b| {
                b.iter()
                    .map(|&(_, w)| (inv_weight_quantum * w as f64).ceil() as u64)
                    // Verify no weight is zero
                    .inspect(|w| assert_ne!(0_u64, *w))
                    .sum()
            })
            .collect();

        let bin_weights_sum = bin_weights.iter().sum();
        let len = bins.iter().map(|b| b.len()).sum();

        WeightedBins {
            bins,
            inv_weight_quantum,
            bin_weights_sum,
            bin_weights,
            bin_max_weights,
            len,
        }
    }

    fn integral_weight(&self, float_approximation: f32) -> u64 {
        assert!(float_approximation > 0.0);
        let weight = (float_approximation as f64 * self.inv_weight_quantum).ceil() as u64;
        assert!(weight > 0);
        weight
    }

    fn bin_max_weight(&self, of_bin_with_idx: usize) -> f64 {
        self.bin_max_weights[of_bin_with_idx]
    }

    /// Adds another item, which must not be heavier than the heaviest item at construction.
    pub fn push(&mut self, item: T, weight: f32) {
        if !(weight.is_finite() && weight > 0.0) {
            warn!(weight, "ignoring item without positive weight");
            return;
        }

        let first_bin_max_weight = self.bin_max_weights[0] as f32;
        assert!(
            weight <= first_bin_max_weight,
            "Cannot push item with larger weight than the largest item"
        );

        let bin_idx = bin_idx_by_weight(first_bin_max_weight, weight);
        if bin_idx < self.bins.len() {
            let integral = self.integral_weight(weight);

            self.bins[bin_idx].push((item, weight));
            self.bin_weights[bin_idx] += integral;
            self.bin_weights_sum += integral;
            self.len += 1;
        } else {
            warn!(weight, "ignoring item too light to fit any bin");
        }
    }

    /// Returns a reference to a randomly selected item without removing it,
    /// selected with probability proportional to its weight.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &T {
        assert!(
            self.bin_weights_sum > 0,
            "Can only sample from non-empty bins. len={} bin_weights_sum={} bin_weights={:?}",
            self.len,
            self.bin_weights_sum,
            self.bin_weights
        );

        let bin_idx = self.sample_bin_idx(rng);
        let item_idx = self.sample_item_idx_from_bin_idx(rng, bin_idx);
        &self.bins[bin_idx][item_idx].0
    }

    /// Returns the amount of items in all bins.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates all binned items with their weights, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &(T, f32)> {
        self.bins.iter().flat_map(|b| b.iter())
    }

    /// Samples a random bin index with a probability proportional to the contained weight.
    fn sample_bin_idx<R: Rng>(&self, rng: &mut R) -> usize {
        let mut r = rng.gen_range(0, self.bin_weights_sum);

        for (idx, weight) in self.bin_weights.iter().enumerate() {
            if r < *weight {
                if self.bins[idx].is_empty() {
                    panic!(
                        "Empty bin sampled, bin_weights_sum ({}) and bin_weights.sum() ({}) must be out of sync",
                        self.bin_weights_sum,
                        self.bin_weights.iter().sum::<u64>()
                    );
                }

                return idx;
            }

            r -= weight;
        }

        panic!(
            "No bin sampled, bin_weights_sum ({}) and bin_weights.sum() ({}) must be out of sync, r={}",
            self.bin_weights_sum,
            self.bin_weights.iter().sum::<u64>(),
            r
        );
    }

    fn sample_item_idx_from_bin_idx<R: Rng>(&self, rng: &mut R, bin_idx: usize) -> usize {
        let bin_max_weight = self.bin_max_weight(bin_idx);
        let bin = &self.bins[bin_idx];

        // Rejection sampling, try random and accept with probability proportional
        // to weight. Acceptance is above one half, so this is constant time on average
        loop {
            let random_idx = rng.gen_range(0_usize, bin.len());
            let acceptance_probability = bin[random_idx].1 as f64 / bin_max_weight;

            if rng.gen::<f64>() < acceptance_probability {
                return random_idx;
            }
        }
    }
}

fn partition_items<T>(items: Vec<(T, f32)>, bin_count: usize) -> (Vec<Vec<(T, f32)>>, f32) {
    let max_weight = items
        .iter()
        .map(|&(_, w)| w)
        .filter(|w| w.is_finite())
        .fold(f32::NEG_INFINITY, f32::max);

    let mut bins = Vec::new();
    for _ in 0..bin_count {
        bins.push(Vec::new());
    }

    for (item, weight) in items.into_iter() {
        if weight.is_finite() && weight > 0.0 {
            let bin_idx = bin_idx_by_weight(max_weight, weight);

            if bin_idx < bin_count {
                bins[bin_idx].push((item, weight));
            } else {
                warn!(weight, max_weight, "ignoring item with too small weight during initial binning");
            }
        } else {
            warn!(weight, "ignoring item without positive weight during initial binning");
        }
    }

    (bins, max_weight)
}

fn bin_idx_by_weight(max_weight: f32, weight: f32) -> usize {
    assert!(weight <= max_weight, "Cannot bin item with larger weight than the largest item");
    // faster version of (max_weight / weight).log2()
    ilogb((max_weight / weight) as f64) as usize
}
