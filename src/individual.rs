//! Candidate representation.
//!
//! An [`Individual`] is one guess at the hidden number together with its
//! fitness score. Individuals carry their own bounds so every operator
//! that produces or perturbs a value can re-clamp locally.

use rand::Rng;

/// A single candidate guess in the population.
///
/// The value always lies in `[min_value, max_value]`; both bounds are
/// fixed at creation. Fitness is 0 until the population evaluates it,
/// and stays in `[0, 100]` afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    value: i64,
    min_value: i64,
    max_value: i64,
    fitness: f64,
}

impl Individual {
    /// Creates an individual with an explicit value, clamped into bounds.
    ///
    /// A reversed bounds pair is normalized by swapping, so construction
    /// never fails.
    pub fn with_value(value: i64, min_value: i64, max_value: i64) -> Self {
        let (min_value, max_value) = if min_value <= max_value {
            (min_value, max_value)
        } else {
            (max_value, min_value)
        };
        Self {
            value: value.clamp(min_value, max_value),
            min_value,
            max_value,
            fitness: 0.0,
        }
    }

    /// Creates an individual with a uniformly random value within bounds.
    pub fn random<R: Rng>(min_value: i64, max_value: i64, rng: &mut R) -> Self {
        let (min_value, max_value) = if min_value <= max_value {
            (min_value, max_value)
        } else {
            (max_value, min_value)
        };
        Self {
            value: rng.random_range(min_value..=max_value),
            min_value,
            max_value,
            fitness: 0.0,
        }
    }

    /// The current guess.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Lower bound of the search range.
    pub fn min_value(&self) -> i64 {
        self.min_value
    }

    /// Upper bound of the search range.
    pub fn max_value(&self) -> i64 {
        self.max_value
    }

    /// The current fitness of this individual.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Sets the fitness of this individual.
    ///
    /// Called by the population after evaluation.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Replaces the value, clamping into bounds.
    ///
    /// Mutation operators go through this so an out-of-range perturbation
    /// can never escape the search space.
    pub fn set_value(&mut self, value: i64) {
        self.value = value.clamp(self.min_value, self.max_value);
    }

    /// Clamps an arbitrary candidate value into this individual's bounds.
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min_value, self.max_value)
    }

    /// Spawns a sibling with the same bounds and the given value (clamped).
    ///
    /// Crossover operators use this to produce offspring without touching
    /// the parents.
    pub fn spawn(&self, value: i64) -> Self {
        Self::with_value(value, self.min_value, self.max_value)
    }
}
