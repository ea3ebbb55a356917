//! Engine configuration.
//!
//! [`SearchConfig`] holds every parameter that controls the search. In
//! keeping with the error-handling contract of the engine, nothing here
//! fails: setters clamp rates into range and [`SearchConfig::sanitized`]
//! repairs cross-field violations by clamping or substituting the
//! documented defaults.

use crate::crossover::Crossover;
use crate::fitness::Fitness;
use crate::mutation::Mutation;
use crate::selection::Selection;

/// Configuration for the evolutionary number search.
///
/// # Defaults
///
/// ```
/// use evoguess::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.min_value, 1);
/// assert_eq!(config.max_value, 100);
/// assert_eq!(config.population_size, 20);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evoguess::{SearchConfig, Selection};
///
/// let config = SearchConfig::default()
///     .with_range(1, 1000)
///     .with_population_size(50)
///     .with_selection(Selection::Tournament(5))
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Lower bound of the search range.
    pub min_value: i64,

    /// Upper bound of the search range. Must not be below `min_value`;
    /// a reversed pair is normalized by swapping.
    pub max_value: i64,

    /// Number of individuals per generation. Floored at 2.
    pub population_size: usize,

    /// Maximum number of generations before the search reports
    /// non-convergence. Floored at 1.
    pub max_generations: usize,

    /// Probability of applying crossover to a selected pair (0.0-1.0).
    /// When the gate fails both parents are cloned unmodified.
    pub crossover_rate: f64,

    /// Probability handed to the mutation operator for each offspring
    /// (0.0-1.0).
    pub mutation_rate: f64,

    /// Number of top individuals copied unchanged into the next
    /// generation. Capped at half the population.
    pub elitism_count: usize,

    /// Maximum uniform mutation delta. `None` derives the documented
    /// default of one tenth of the range, floored at 1.
    pub mutation_range: Option<i64>,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Crossover strategy.
    pub crossover: Crossover,

    /// Mutation strategy.
    pub mutation: Mutation,

    /// Fitness scoring function.
    pub fitness: Fitness,

    /// Best fitness at or above which the search is considered solved.
    ///
    /// The bundled fitness functions return exactly 100.0 at a true
    /// match; the slightly lower default of 99.99 also accommodates
    /// fitness shapes that approach 100 asymptotically.
    pub solved_threshold: f64,

    /// Generations without best-fitness improvement that count as a
    /// plateau. Floored at 1.
    pub plateau_window: usize,

    /// Whether to re-seed the non-elite population when a plateau is
    /// reached. Elites always survive a restart.
    pub restart_on_plateau: bool,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_value: 1,
            max_value: 100,
            population_size: 20,
            max_generations: 1000,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            elitism_count: 2,
            mutation_range: None,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            fitness: Fitness::default(),
            solved_threshold: 99.99,
            plateau_window: 5,
            restart_on_plateau: false,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the search range.
    pub fn with_range(mut self, min_value: i64, max_value: i64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate, clamped into `[0, 1]`.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate, clamped into `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elitism count.
    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    /// Overrides the derived mutation range.
    pub fn with_mutation_range(mut self, range: i64) -> Self {
        self.mutation_range = Some(range.max(1));
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the fitness function.
    pub fn with_fitness(mut self, fitness: Fitness) -> Self {
        self.fitness = fitness;
        self
    }

    /// Sets the solved threshold.
    pub fn with_solved_threshold(mut self, threshold: f64) -> Self {
        self.solved_threshold = threshold;
        self
    }

    /// Configures plateau restarts: re-seed the non-elite population
    /// after `window` generations without improvement.
    pub fn with_plateau_restart(mut self, window: usize) -> Self {
        self.plateau_window = window.max(1);
        self.restart_on_plateau = true;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Repairs every cross-field violation by clamping or substituting
    /// the documented default. Construction paths call this internally,
    /// so a malformed configuration yields a working (if adjusted)
    /// engine rather than an error.
    pub fn sanitized(mut self) -> Self {
        if self.min_value > self.max_value {
            std::mem::swap(&mut self.min_value, &mut self.max_value);
        }
        self.population_size = self.population_size.max(2);
        self.max_generations = self.max_generations.max(1);
        self.crossover_rate = self.crossover_rate.clamp(0.0, 1.0);
        self.mutation_rate = self.mutation_rate.clamp(0.0, 1.0);
        self.elitism_count = self.elitism_count.min(self.population_size / 2);
        if let Some(range) = self.mutation_range {
            self.mutation_range = Some(range.max(1));
        }
        if let Selection::Tournament(k) = self.selection {
            self.selection = Selection::Tournament(k.max(1));
        }
        if !self.solved_threshold.is_finite() {
            self.solved_threshold = 99.99;
        }
        self.plateau_window = self.plateau_window.max(1);
        self
    }

    /// The effective uniform mutation delta bound: the override if set,
    /// otherwise one tenth of the range, floored at 1.
    pub fn mutation_range(&self) -> i64 {
        self.mutation_range
            .unwrap_or((self.max_value - self.min_value) / 10)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.min_value, 1);
        assert_eq!(config.max_value, 100);
        assert_eq!(config.population_size, 20);
        assert_eq!(config.max_generations, 1000);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert_eq!(config.elitism_count, 2);
        assert_eq!(config.mutation_range, None);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert_eq!(config.crossover, Crossover::Adaptive);
        assert_eq!(config.mutation, Mutation::Adaptive);
        assert_eq!(config.fitness, Fitness::Linear);
        assert!((config.solved_threshold - 99.99).abs() < 1e-10);
        assert!(!config.restart_on_plateau);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_range(10, 500)
            .with_population_size(50)
            .with_max_generations(200)
            .with_crossover_rate(0.9)
            .with_mutation_rate(0.2)
            .with_elitism_count(4)
            .with_selection(Selection::Rank)
            .with_crossover(Crossover::Binary)
            .with_mutation(Mutation::Gaussian)
            .with_fitness(Fitness::Combined)
            .with_seed(42);

        assert_eq!(config.min_value, 10);
        assert_eq!(config.max_value, 500);
        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 200);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 0.2).abs() < 1e-10);
        assert_eq!(config.elitism_count, 4);
        assert_eq!(config.selection, Selection::Rank);
        assert_eq!(config.crossover, Crossover::Binary);
        assert_eq!(config.mutation, Mutation::Gaussian);
        assert_eq!(config.fitness, Fitness::Combined);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_setters_clamp_rates() {
        let config = SearchConfig::default()
            .with_crossover_rate(1.7)
            .with_mutation_rate(-0.5);
        assert!((config.crossover_rate - 1.0).abs() < 1e-10);
        assert!((config.mutation_rate - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_sanitized_swaps_reversed_range() {
        let config = SearchConfig::default().with_range(100, 1).sanitized();
        assert_eq!(config.min_value, 1);
        assert_eq!(config.max_value, 100);
    }

    #[test]
    fn test_sanitized_floors_population() {
        let config = SearchConfig::default().with_population_size(0).sanitized();
        assert_eq!(config.population_size, 2);
    }

    #[test]
    fn test_sanitized_caps_elitism_at_half() {
        let config = SearchConfig::default()
            .with_population_size(10)
            .with_elitism_count(9)
            .sanitized();
        assert_eq!(config.elitism_count, 5);
    }

    #[test]
    fn test_sanitized_repairs_out_of_band_rates() {
        let mut config = SearchConfig::default();
        config.crossover_rate = 3.0;
        config.mutation_rate = -2.0;
        config.solved_threshold = f64::NAN;
        let config = config.sanitized();
        assert!((config.crossover_rate - 1.0).abs() < 1e-10);
        assert!((config.mutation_rate - 0.0).abs() < 1e-10);
        assert!((config.solved_threshold - 99.99).abs() < 1e-10);
    }

    #[test]
    fn test_sanitized_floors_tournament_size() {
        let config = SearchConfig::default()
            .with_selection(Selection::Tournament(0))
            .sanitized();
        assert_eq!(config.selection, Selection::Tournament(1));
    }

    #[test]
    fn test_mutation_range_derived() {
        // (100 - 1) / 10 = 9
        assert_eq!(SearchConfig::default().mutation_range(), 9);
        // narrow ranges floor at 1
        let narrow = SearchConfig::default().with_range(1, 5);
        assert_eq!(narrow.mutation_range(), 1);
        // explicit override wins
        let explicit = SearchConfig::default().with_mutation_range(25);
        assert_eq!(explicit.mutation_range(), 25);
    }

    #[test]
    fn test_strategy_lookup_by_name() {
        let config = SearchConfig::default()
            .with_selection(Selection::from_name("roulette", 3))
            .with_crossover(Crossover::from_name("average"))
            .with_mutation(Mutation::from_name("boundary"))
            .with_fitness(Fitness::from_name("exponential"));
        assert_eq!(config.selection, Selection::Roulette);
        assert_eq!(config.crossover, Crossover::Average);
        assert_eq!(config.mutation, Mutation::Boundary);
        assert_eq!(config.fitness, Fitness::Exponential);

        // unknown identifiers silently fall back to the defaults
        let fallback = SearchConfig::default()
            .with_selection(Selection::from_name("best-only", 3))
            .with_crossover(Crossover::from_name("splice"))
            .with_mutation(Mutation::from_name("jitter"))
            .with_fitness(Fitness::from_name("manhattan"));
        assert_eq!(fallback.selection, Selection::Tournament(3));
        assert_eq!(fallback.crossover, Crossover::Adaptive);
        assert_eq!(fallback.mutation, Mutation::Adaptive);
        assert_eq!(fallback.fitness, Fitness::Linear);
    }

    #[test]
    fn test_plateau_restart_builder() {
        let config = SearchConfig::default().with_plateau_restart(8);
        assert!(config.restart_on_plateau);
        assert_eq!(config.plateau_window, 8);

        let floored = SearchConfig::default().with_plateau_restart(0);
        assert_eq!(floored.plateau_window, 1);
    }
}
