//! Fitness functions.
//!
//! Pure scoring functions mapping a guess to `[0, 100]` given the hidden
//! target and the search bounds. Every function returns exactly `100.0`
//! for an exact match and is total for any `i64` guess, inside or
//! outside the bounds.
//!
//! Scores below 100 top out at 99 (or a variant-specific ceiling) so the
//! maximum is reserved for a true match.

/// Fitness scoring strategy.
///
/// Selected at configuration time; the population evaluates every
/// individual with the configured variant each generation.
///
/// # Examples
///
/// ```
/// use evoguess::Fitness;
///
/// // Exact match always scores 100, for every variant.
/// assert_eq!(Fitness::Linear.score(50, 50, 1, 100, None), 100.0);
/// assert_eq!(Fitness::Exponential.score(50, 50, 1, 100, None), 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Fitness {
    /// Linear distance: `(range_size - distance) / range_size * 100`,
    /// floored at 0. The default.
    #[default]
    Linear,

    /// Inverse distance, normalized between the worst case
    /// (`distance = range_size`) and the best non-exact case
    /// (`distance = 1`) onto `[0, 99]`. Strongly differentiates close
    /// guesses.
    Inverse,

    /// Exponential decay `99 * e^(-k * distance)` with
    /// `k = 5 / range_size`. Heavily rewards very close guesses.
    Exponential,

    /// `0.6 * linear + 0.4 * exponential`, scaled to a 99 maximum.
    Combined,

    /// Linear baseline scaled to 90, plus a +10 bonus when the guess
    /// moved closer to the target than the previous best guess and a -5
    /// penalty when it moved away. No previous guess means no
    /// adjustment. Clamped to `[0, 99]`.
    HotCold,
}

impl Fitness {
    /// Looks up a variant by its configuration identifier.
    ///
    /// Unknown identifiers fall back to [`Fitness::Linear`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "linear" => Self::Linear,
            "inverse" => Self::Inverse,
            "exponential" => Self::Exponential,
            "combined" => Self::Combined,
            "hot_cold" => Self::HotCold,
            _ => Self::default(),
        }
    }

    /// Scores a guess against the target.
    ///
    /// `previous_guess` only affects [`Fitness::HotCold`]; the other
    /// variants ignore it.
    pub fn score(
        &self,
        guess: i64,
        target: i64,
        min_value: i64,
        max_value: i64,
        previous_guess: Option<i64>,
    ) -> f64 {
        let distance = target.abs_diff(guess) as f64;
        if distance == 0.0 {
            return 100.0;
        }
        let range_size = range_size(min_value, max_value);

        match self {
            Self::Linear => (range_size - distance).max(0.0) / range_size * 100.0,
            Self::Inverse => {
                // Normalize 1/d between 1/range_size (worst in-range) and
                // 1 (distance of one) onto [0, 99]. A one-value range has
                // no non-exact in-range guess to normalize against.
                if range_size <= 1.0 {
                    return 0.0;
                }
                let inverse = 1.0 / distance;
                let min_inverse = 1.0 / range_size;
                let normalized = (inverse - min_inverse) / (1.0 - min_inverse) * 99.0;
                normalized.clamp(0.0, 99.0)
            }
            Self::Exponential => {
                let k = 5.0 / range_size;
                99.0 * (-k * distance).exp()
            }
            Self::Combined => {
                let linear = (range_size - distance).max(0.0) / range_size;
                let k = 5.0 / range_size;
                let exponential = (-k * distance).exp();
                (0.6 * linear + 0.4 * exponential) * 99.0
            }
            Self::HotCold => {
                let baseline = (range_size - distance).max(0.0) / range_size * 90.0;
                let adjustment = match previous_guess {
                    Some(prev) => {
                        let prev_distance = target.abs_diff(prev) as f64;
                        if distance < prev_distance {
                            10.0
                        } else if distance > prev_distance {
                            -5.0
                        } else {
                            0.0
                        }
                    }
                    None => 0.0,
                };
                (baseline + adjustment).clamp(0.0, 99.0)
            }
        }
    }
}

fn range_size(min_value: i64, max_value: i64) -> f64 {
    if min_value <= max_value {
        (max_value - min_value + 1) as f64
    } else {
        1.0
    }
}
