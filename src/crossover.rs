//! Crossover operators.
//!
//! Recombination of two parent guesses into two offspring. Operators
//! never mutate the parents, assume both share the same bounds, and
//! clamp every produced value back into range.
//!
//! The [`Crossover`] enum is the configured dispatch; the operators are
//! also exposed as free functions for direct use.

use crate::individual::Individual;
use rand::Rng;

/// Parent-similarity threshold below which [`adaptive`] switches to
/// single-point binary splicing. Empirical; expressed as a fraction of
/// the range size.
pub const SIMILAR_FRACTION: f64 = 0.05;

/// Parent-similarity threshold below which [`adaptive`] switches to
/// two-point binary splicing. Empirical; expressed as a fraction of the
/// range size.
pub const MODERATE_FRACTION: f64 = 0.20;

/// Crossover strategy for recombining two parents.
///
/// # Examples
///
/// ```
/// use evoguess::Crossover;
///
/// let op = Crossover::Adaptive; // the default: dispatch by similarity
/// let op = Crossover::Arithmetic;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Crossover {
    /// Weighted average: `child1 = w*v1 + (1-w)*v2` with uniform `w`,
    /// `child2` the complementary weighting.
    Arithmetic,

    /// Integer average of the parents, jittered by `[-diff, diff]`.
    /// Identical parents are forced apart by small opposite offsets.
    Average,

    /// Single-point splice of the fixed-width binary encodings.
    Binary,

    /// Two-point splice: the middle bit segment is swapped.
    BinaryTwoPoint,

    /// Dispatch by parent similarity relative to the range size:
    /// near-identical parents get [`Crossover::Binary`] (maximum
    /// exploration), moderately similar parents get
    /// [`Crossover::BinaryTwoPoint`], distinct parents get
    /// [`Crossover::Average`] (exploitation). The default.
    #[default]
    Adaptive,
}

impl Crossover {
    /// Looks up a variant by its configuration identifier.
    ///
    /// Unknown identifiers fall back to [`Crossover::Adaptive`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "arithmetic" => Self::Arithmetic,
            "average" => Self::Average,
            "binary" => Self::Binary,
            "binary_two_point" => Self::BinaryTwoPoint,
            "adaptive" => Self::Adaptive,
            _ => Self::default(),
        }
    }

    /// Recombines two parents into two offspring.
    pub fn recombine<R: Rng>(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        rng: &mut R,
    ) -> (Individual, Individual) {
        match self {
            Crossover::Arithmetic => arithmetic(parent1, parent2, rng),
            Crossover::Average => average(parent1, parent2, rng),
            Crossover::Binary => binary(parent1, parent2, rng),
            Crossover::BinaryTwoPoint => binary_two_point(parent1, parent2, rng),
            Crossover::Adaptive => adaptive(parent1, parent2, rng),
        }
    }
}

/// Arithmetic crossover: complementary weighted averages of the parents.
pub fn arithmetic<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    rng: &mut R,
) -> (Individual, Individual) {
    let v1 = parent1.value() as f64;
    let v2 = parent2.value() as f64;
    let w = rng.random::<f64>();

    let child1 = (w * v1 + (1.0 - w) * v2) as i64;
    let child2 = ((1.0 - w) * v1 + w * v2) as i64;

    (parent1.spawn(child1), parent1.spawn(child2))
}

/// Average crossover: jitter both children around the parents' mean.
///
/// Identical parents would collapse the mean jitter to a point, so they
/// are forced apart with small offsets in opposite directions (1 to 3).
pub fn average<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    rng: &mut R,
) -> (Individual, Individual) {
    let avg = (parent1.value() + parent2.value()).div_euclid(2);
    let diff = (parent1.value() - parent2.value()).abs();

    let (child1, child2) = if diff == 0 {
        (
            avg + rng.random_range(1..=3),
            avg - rng.random_range(1..=3),
        )
    } else {
        (
            avg + rng.random_range(-diff..=diff),
            avg + rng.random_range(-diff..=diff),
        )
    };

    (parent1.spawn(child1), parent1.spawn(child2))
}

/// Binary single-point crossover on the fixed-width encodings.
///
/// The splice point is uniform in `[1, width-1]`, counted from the most
/// significant bit, matching a string splice of the padded binary form.
/// Degenerate domains with a width below 2 have no interior splice
/// point; the parents are passed through clamped instead.
pub fn binary<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    rng: &mut R,
) -> (Individual, Individual) {
    let width = bit_width(parent1.max_value());
    if width < 2 {
        return (parent1.spawn(parent1.value()), parent1.spawn(parent2.value()));
    }

    let e1 = encode(parent1.value(), width);
    let e2 = encode(parent2.value(), width);

    let point = rng.random_range(1..width);
    let low_bits = width - point;
    let low_mask = (1u64 << low_bits) - 1;

    let child1 = (e1 & !low_mask) | (e2 & low_mask);
    let child2 = (e2 & !low_mask) | (e1 & low_mask);

    (parent1.spawn(child1 as i64), parent1.spawn(child2 as i64))
}

/// Binary two-point crossover: swap the middle bit segment.
///
/// Needs at least three bits for two distinct interior points; narrower
/// widths fall back to [`binary`], which handles its own degenerate case.
pub fn binary_two_point<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    rng: &mut R,
) -> (Individual, Individual) {
    let width = bit_width(parent1.max_value());
    if width < 3 {
        return binary(parent1, parent2, rng);
    }

    let e1 = encode(parent1.value(), width);
    let e2 = encode(parent2.value(), width);

    let point1 = rng.random_range(1..width - 1);
    let point2 = rng.random_range(point1 + 1..width);

    // Middle segment [point1, point2) from the left maps to bit
    // positions [width-point2, width-point1).
    let mid_mask = ((1u64 << (width - point1)) - 1) & !((1u64 << (width - point2)) - 1);

    let child1 = (e1 & !mid_mask) | (e2 & mid_mask);
    let child2 = (e2 & !mid_mask) | (e1 & mid_mask);

    (parent1.spawn(child1 as i64), parent1.spawn(child2 as i64))
}

/// Adaptive crossover: tagged dispatch on parent similarity.
///
/// With `R = max_value - min_value` and `diff = |v1 - v2|`:
/// `diff < 0.05R` routes to [`binary`], `diff < 0.20R` to
/// [`binary_two_point`], anything else to [`average`].
pub fn adaptive<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    rng: &mut R,
) -> (Individual, Individual) {
    let diff = (parent1.value() - parent2.value()).abs() as f64;
    let range = (parent1.max_value() - parent1.min_value()) as f64;

    if diff < SIMILAR_FRACTION * range {
        binary(parent1, parent2, rng)
    } else if diff < MODERATE_FRACTION * range {
        binary_two_point(parent1, parent2, rng)
    } else {
        average(parent1, parent2, rng)
    }
}

/// Bit length of the upper bound; the fixed encoding width.
pub(crate) fn bit_width(max_value: i64) -> u32 {
    let v = max_value.max(1) as u64;
    64 - v.leading_zeros()
}

/// Fixed-width encoding of a value. Negative values (possible when the
/// lower bound is negative) encode as zero; the decode clamp restores
/// bounds.
pub(crate) fn encode(value: i64, width: u32) -> u64 {
    let mask = if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    };
    (value.max(0) as u64) & mask
}

// ============================================================================
// Tests
// ============================================================================
