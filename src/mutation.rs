//! Mutation operators.
//!
//! In-place perturbation of a single individual, applied behind a
//! probability gate and always re-clamped into bounds. The [`Mutation`]
//! enum is the configured dispatch; the operators are also exposed as
//! free functions for direct use with explicit parameters.

use crate::crossover::{bit_width, encode};
use crate::individual::Individual;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Mutation strategy for perturbing offspring.
///
/// # Examples
///
/// ```
/// use evoguess::Mutation;
///
/// let op = Mutation::Adaptive; // the default: strength from fitness
/// let op = Mutation::Gaussian;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mutation {
    /// Add a non-zero uniform delta in `[-range, range]`.
    Random,

    /// Flip each bit of the fixed-width encoding independently with the
    /// configured probability.
    BitFlip,

    /// Snap to the lower or upper bound, 50/50.
    Boundary,

    /// Add a non-zero integer sample from `Normal(0, sigma)`; smaller
    /// steps are more likely than large ones.
    Gaussian,

    /// Derive both probability and range from the individual's current
    /// fitness and the generation number, then delegate to
    /// [`Mutation::Random`]. Weak individuals mutate harder. The default.
    #[default]
    Adaptive,
}

impl Mutation {
    /// Looks up a variant by its configuration identifier.
    ///
    /// Unknown identifiers fall back to [`Mutation::Adaptive`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "random" => Self::Random,
            "bit_flip" => Self::BitFlip,
            "boundary" => Self::Boundary,
            "gaussian" => Self::Gaussian,
            "adaptive" => Self::Adaptive,
            _ => Self::default(),
        }
    }

    /// Applies this mutation to the individual in place.
    ///
    /// `rate` gates the operators with a single draw (and doubles as the
    /// per-bit probability for [`Mutation::BitFlip`]); `range` bounds the
    /// uniform delta of [`Mutation::Random`]; `generation` feeds the
    /// stagnation term of [`Mutation::Adaptive`].
    pub fn apply<R: Rng>(
        &self,
        individual: &mut Individual,
        rate: f64,
        range: i64,
        generation: usize,
        rng: &mut R,
    ) {
        match self {
            Mutation::Random => random(individual, rate, range, rng),
            Mutation::BitFlip => bit_flip(individual, rate, rng),
            Mutation::Boundary => boundary(individual, rate, rng),
            Mutation::Gaussian => gaussian(individual, rate, None, rng),
            Mutation::Adaptive => adaptive(individual, generation, rng),
        }
    }
}

/// Random-delta mutation: add a non-zero amount in `[-range, range]`.
///
/// The delta is resampled until non-zero; `range` is floored at 1 so the
/// loop always terminates.
pub fn random<R: Rng>(individual: &mut Individual, rate: f64, range: i64, rng: &mut R) {
    if rng.random::<f64>() >= rate {
        return;
    }

    let range = range.max(1);
    let mut delta = rng.random_range(-range..=range);
    while delta == 0 {
        delta = rng.random_range(-range..=range);
    }
    individual.set_value(individual.value().saturating_add(delta));
}

/// Bit-flip mutation on the fixed-width encoding.
///
/// Each bit flips independently with probability `rate`; there is no
/// outer gate. The decoded value is clamped back into bounds.
pub fn bit_flip<R: Rng>(individual: &mut Individual, rate: f64, rng: &mut R) {
    let width = bit_width(individual.max_value());
    let mut bits = encode(individual.value(), width);
    for i in 0..width {
        if rng.random::<f64>() < rate {
            bits ^= 1u64 << i;
        }
    }
    individual.set_value(bits as i64);
}

/// Boundary mutation: snap to `min_value` or `max_value`, 50/50.
///
/// Meant to run with a low rate; it explores the extremes of the space.
pub fn boundary<R: Rng>(individual: &mut Individual, rate: f64, rng: &mut R) {
    if rng.random::<f64>() >= rate {
        return;
    }

    let snapped = if rng.random_bool(0.5) {
        individual.min_value()
    } else {
        individual.max_value()
    };
    individual.set_value(snapped);
}

/// Gaussian mutation: add a non-zero integer draw from `Normal(0, sigma)`.
///
/// `sigma` defaults to 5% of the range, floored at 1.0 so sampling can
/// produce non-zero integers. Sampling retries a bounded number of times
/// for a non-zero delta, then falls back to a unit step.
pub fn gaussian<R: Rng>(individual: &mut Individual, rate: f64, sigma: Option<f64>, rng: &mut R) {
    if rng.random::<f64>() >= rate {
        return;
    }

    let span = (individual.max_value() - individual.min_value()) as f64;
    let sigma = sigma.unwrap_or(span * 0.05).max(1.0);
    let normal = Normal::new(0.0, sigma).expect("sigma is finite and positive");

    let mut delta = 0i64;
    for _ in 0..100 {
        delta = normal.sample(rng) as i64;
        if delta != 0 {
            break;
        }
    }
    if delta == 0 {
        delta = if rng.random_bool(0.5) { 1 } else { -1 };
    }
    individual.set_value(individual.value().saturating_add(delta));
}

/// Adaptive mutation: strength derived from fitness and generation.
///
/// Probability: `0.1 + (1 - f/100) * 0.4`, plus a stagnation term of
/// `min(0.3, generation/1000)`, capped at 0.9. Range: 5% of the span,
/// widened by `1 + 3 * (1 - (f/100)^2)` — the squared ratio keeps strong
/// individuals stable while near-zero fitness mutates over a fifth of
/// the space. Delegates to [`random`].
pub fn adaptive<R: Rng>(individual: &mut Individual, generation: usize, rng: &mut R) {
    let fitness_ratio = (individual.fitness() / 100.0).clamp(0.0, 1.0);

    let base_probability = 0.1 + (1.0 - fitness_ratio) * 0.4;
    let generation_factor = (generation as f64 / 1000.0).min(0.3);
    let probability = (base_probability + generation_factor).min(0.9);

    let span = (individual.max_value() - individual.min_value()) as f64;
    let widen = 1.0 - fitness_ratio * fitness_ratio;
    let range = ((span * 0.05 * (1.0 + 3.0 * widen)) as i64).max(1);

    random(individual, probability, range, rng);
}

// ============================================================================
// Tests
// ============================================================================
