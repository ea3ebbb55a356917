//! Population state and generation advancement.
//!
//! [`Population`] owns the current generation's individuals and the
//! validated configuration, evaluates fitness, keeps per-generation
//! statistics, and breeds the next generation by composing the
//! configured selection, crossover, and mutation strategies.

use crate::config::SearchConfig;
use crate::individual::Individual;
use crate::selection::elites;
use rand::Rng;
use std::collections::HashSet;

/// Attempts to re-select a second parent holding a different value
/// before breeding proceeds with a duplicate pair anyway.
const PARENT_RESELECT_ATTEMPTS: usize = 5;

/// Snapshot of population statistics after an evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Mean fitness across the population.
    pub avg_fitness: f64,

    /// Fitness of the best individual.
    pub best_fitness: f64,

    /// Value of the best individual.
    pub best_guess: i64,

    /// Population standard deviation of fitness; 0 for a single
    /// individual.
    pub fitness_std_dev: f64,

    /// Number of distinct values present.
    pub unique_values: usize,
}

/// The current generation of candidates plus breeding machinery.
///
/// Ordering contract: insertion order before evaluation,
/// fitness-descending after. The reported best is an owned clone, so
/// later breeding cannot retroactively change it.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    config: SearchConfig,
    generation: usize,
    best: Option<Individual>,
    previous_best_guess: Option<i64>,
    stats: GenerationStats,
}

impl Population {
    /// Creates a population of random individuals from the configuration.
    ///
    /// The configuration is sanitized on entry; out-of-range parameters
    /// are repaired rather than rejected.
    pub fn new<R: Rng>(config: &SearchConfig, rng: &mut R) -> Self {
        let config = config.clone().sanitized();
        let individuals = (0..config.population_size)
            .map(|_| Individual::random(config.min_value, config.max_value, rng))
            .collect();
        Self {
            individuals,
            config,
            generation: 0,
            best: None,
            previous_best_guess: None,
            stats: GenerationStats::default(),
        }
    }

    /// The individuals of the current generation.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Number of individuals; constant across generations.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population is empty. Never true for a population
    /// built through [`Population::new`].
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Completed breeding cycles; 0 for the initial generation.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The sanitized configuration this population runs with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Owned snapshot of the best individual from the latest evaluation.
    pub fn best_individual(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    /// Statistics from the latest evaluation.
    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Fraction of distinct values in the population, in `[0, 1]`.
    pub fn value_diversity(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        self.stats.unique_values as f64 / self.individuals.len() as f64
    }

    /// Scores every individual against the target, sorts the population
    /// fitness-descending, snapshots the best, and recomputes statistics.
    ///
    /// The previous evaluation's best guess feeds the hot/cold fitness
    /// function; other fitness variants ignore it.
    pub fn evaluate(&mut self, target: i64) {
        let fitness = self.config.fitness;
        let (min_value, max_value) = (self.config.min_value, self.config.max_value);
        let previous = self.previous_best_guess;

        for ind in &mut self.individuals {
            let score = fitness.score(ind.value(), target, min_value, max_value, previous);
            ind.set_fitness(score);
        }

        // stable: equal fitness keeps insertion order
        self.individuals.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let best = self.individuals[0].clone();
        self.previous_best_guess = Some(best.value());
        self.best = Some(best);
        self.recompute_stats();
    }

    fn recompute_stats(&mut self) {
        let n = self.individuals.len() as f64;
        let mean = self
            .individuals
            .iter()
            .map(|ind| ind.fitness())
            .sum::<f64>()
            / n;

        let std_dev = if self.individuals.len() > 1 {
            let variance = self
                .individuals
                .iter()
                .map(|ind| {
                    let d = ind.fitness() - mean;
                    d * d
                })
                .sum::<f64>()
                / n;
            variance.sqrt()
        } else {
            0.0
        };

        let unique_values = self
            .individuals
            .iter()
            .map(|ind| ind.value())
            .collect::<HashSet<_>>()
            .len();

        let best = self.best.as_ref().expect("statistics follow evaluation");
        self.stats = GenerationStats {
            avg_fitness: mean,
            best_fitness: best.fitness(),
            best_guess: best.value(),
            fitness_std_dev: std_dev,
            unique_values,
        };
    }

    /// Breeds the next generation in place.
    ///
    /// The top `elitism_count` individuals are carried over as clones;
    /// the rest of the population is filled with offspring from
    /// selection, gated crossover, and per-offspring mutation. The
    /// population size never changes: when only one slot remains, the
    /// second child of the final pair is dropped.
    pub fn breed<R: Rng>(&mut self, rng: &mut R) {
        let size = self.config.population_size;
        let selection = self.config.selection;
        let crossover = self.config.crossover;
        let mutation = self.config.mutation;
        let crossover_rate = self.config.crossover_rate;
        let mutation_rate = self.config.mutation_rate;
        let mutation_range = self.config.mutation_range();

        let mut next = elites(&self.individuals, self.config.elitism_count);

        while next.len() < size {
            let parent1 = self.individuals[selection.select(&self.individuals, rng)].clone();
            let mut parent2 = self.individuals[selection.select(&self.individuals, rng)].clone();

            // curb inbreeding when the pool still has distinct values
            let mut attempts = 0;
            while parent1.value() == parent2.value() && attempts < PARENT_RESELECT_ATTEMPTS {
                parent2 = self.individuals[selection.select(&self.individuals, rng)].clone();
                attempts += 1;
            }

            let (mut child1, mut child2) = if rng.random::<f64>() < crossover_rate {
                crossover.recombine(&parent1, &parent2, rng)
            } else {
                (parent1.clone(), parent2.clone())
            };

            mutation.apply(&mut child1, mutation_rate, mutation_range, self.generation, rng);
            mutation.apply(&mut child2, mutation_rate, mutation_range, self.generation, rng);

            next.push(child1);
            if next.len() < size {
                next.push(child2);
            }
        }

        self.individuals = next;
        self.generation += 1;
    }

    /// Replaces every non-elite individual with a fresh random one.
    ///
    /// Used for plateau restarts; the elites survive so the best fitness
    /// found so far cannot be lost.
    pub fn reseed<R: Rng>(&mut self, rng: &mut R) {
        let size = self.config.population_size;
        let mut next = elites(&self.individuals, self.config.elitism_count);
        while next.len() < size {
            next.push(Individual::random(
                self.config.min_value,
                self.config.max_value,
                rng,
            ));
        }
        self.individuals = next;
        self.generation += 1;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn evaluated_population(seed: u64) -> Population {
        let config = SearchConfig::default().with_population_size(10);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pop = Population::new(&config, &mut rng);
        pop.evaluate(50);
        pop
    }

    #[test]
    fn test_new_population_has_configured_size() {
        let config = SearchConfig::default().with_population_size(30);
        let mut rng = StdRng::seed_from_u64(42);
        let pop = Population::new(&config, &mut rng);
        assert_eq!(pop.len(), 30);
        assert_eq!(pop.generation(), 0);
        assert!(pop.best_individual().is_none());
        for ind in pop.individuals() {
            assert!((1..=100).contains(&ind.value()));
        }
    }

    #[test]
    fn test_malformed_config_is_repaired_not_rejected() {
        let mut config = SearchConfig::default().with_range(100, 1);
        config.population_size = 0;
        config.elitism_count = 500;
        let mut rng = StdRng::seed_from_u64(42);
        let pop = Population::new(&config, &mut rng);
        assert_eq!(pop.len(), 2);
        assert_eq!(pop.config().min_value, 1);
        assert_eq!(pop.config().max_value, 100);
        assert_eq!(pop.config().elitism_count, 1);
    }

    #[test]
    fn test_evaluate_sorts_descending() {
        let pop = evaluated_population(42);
        for pair in pop.individuals().windows(2) {
            assert!(pair[0].fitness() >= pair[1].fitness());
        }
    }

    #[test]
    fn test_evaluate_snapshots_best_without_aliasing() {
        let mut pop = evaluated_population(42);
        let best_value = pop.best_individual().unwrap().value();
        let best_fitness = pop.best_individual().unwrap().fitness();

        // breeding rewrites the live individuals; the snapshot stays put
        let mut rng = StdRng::seed_from_u64(7);
        pop.breed(&mut rng);
        assert_eq!(pop.best_individual().unwrap().value(), best_value);
        assert_eq!(pop.best_individual().unwrap().fitness(), best_fitness);
    }

    #[test]
    fn test_statistics_concrete_values() {
        let config = SearchConfig::default().with_population_size(2);
        let mut rng = StdRng::seed_from_u64(42);
        let mut pop = Population::new(&config, &mut rng);
        // pin the values for a hand-computed check
        pop.individuals = vec![
            Individual::with_value(50, 1, 100),
            Individual::with_value(40, 1, 100),
        ];
        pop.evaluate(50);

        let stats = pop.stats();
        assert_eq!(stats.best_fitness, 100.0);
        assert_eq!(stats.best_guess, 50);
        assert_eq!(stats.avg_fitness, 95.0); // (100 + 90) / 2
        // population std dev of {100, 90} is 5
        assert!((stats.fitness_std_dev - 5.0).abs() < 1e-9);
        assert_eq!(stats.unique_values, 2);
        assert_eq!(pop.value_diversity(), 1.0);
    }

    #[test]
    fn test_single_value_population_zero_std_dev() {
        let config = SearchConfig::default().with_population_size(4);
        let mut rng = StdRng::seed_from_u64(42);
        let mut pop = Population::new(&config, &mut rng);
        pop.individuals = vec![Individual::with_value(30, 1, 100); 4];
        pop.evaluate(50);

        assert_eq!(pop.stats().fitness_std_dev, 0.0);
        assert_eq!(pop.stats().unique_values, 1);
        assert_eq!(pop.value_diversity(), 0.25);
    }

    #[test]
    fn test_breed_keeps_population_size_for_every_elitism() {
        for elitism in 0..=5 {
            let config = SearchConfig::default()
                .with_population_size(10)
                .with_elitism_count(elitism);
            let mut rng = StdRng::seed_from_u64(42);
            let mut pop = Population::new(&config, &mut rng);
            for _ in 0..20 {
                pop.evaluate(50);
                pop.breed(&mut rng);
                assert_eq!(pop.len(), 10, "size drifted with elitism {elitism}");
            }
        }
    }

    #[test]
    fn test_breed_odd_slot_drops_surplus_child() {
        // odd capacity left after elites forces the final pair to
        // contribute only one child
        let config = SearchConfig::default()
            .with_population_size(7)
            .with_elitism_count(2);
        let mut rng = StdRng::seed_from_u64(42);
        let mut pop = Population::new(&config, &mut rng);
        for _ in 0..10 {
            pop.evaluate(50);
            pop.breed(&mut rng);
            assert_eq!(pop.len(), 7);
        }
    }

    #[test]
    fn test_breed_carries_elites_bit_identical() {
        let mut pop = evaluated_population(42);
        let top: Vec<Individual> = pop.individuals()[..2].to_vec();

        let mut rng = StdRng::seed_from_u64(7);
        pop.breed(&mut rng);

        assert_eq!(pop.len(), 10);
        assert_eq!(pop.individuals()[0], top[0]);
        assert_eq!(pop.individuals()[1], top[1]);
        assert_eq!(pop.generation(), 1);
    }

    #[test]
    fn test_breed_offspring_stay_in_bounds() {
        let config = SearchConfig::default()
            .with_range(10, 30)
            .with_population_size(12)
            .with_mutation_rate(1.0);
        let mut rng = StdRng::seed_from_u64(42);
        let mut pop = Population::new(&config, &mut rng);
        for _ in 0..50 {
            pop.evaluate(20);
            pop.breed(&mut rng);
            for ind in pop.individuals() {
                assert!((10..=30).contains(&ind.value()));
            }
        }
    }

    #[test]
    fn test_breed_on_zero_fitness_population() {
        use crate::selection::Selection;
        // every guess maximally wrong: selection must fall back to
        // uniform draws and breeding must still fill the generation
        let config = SearchConfig::default()
            .with_range(1, 10)
            .with_population_size(6)
            .with_selection(Selection::Roulette);
        let mut rng = StdRng::seed_from_u64(42);
        let mut pop = Population::new(&config, &mut rng);
        pop.individuals = vec![Individual::with_value(1, 1, 10); 6];
        pop.evaluate(-1000); // far outside: linear fitness floors at 0
        assert_eq!(pop.stats().best_fitness, 0.0);

        pop.breed(&mut rng);
        assert_eq!(pop.len(), 6);
    }

    #[test]
    fn test_hot_cold_receives_previous_best_guess() {
        use crate::fitness::Fitness;
        let config = SearchConfig::default()
            .with_population_size(2)
            .with_fitness(Fitness::HotCold);
        let mut rng = StdRng::seed_from_u64(42);
        let mut pop = Population::new(&config, &mut rng);

        // first evaluation has no previous guess: baseline only
        pop.individuals = vec![
            Individual::with_value(70, 1, 100),
            Individual::with_value(10, 1, 100),
        ];
        pop.evaluate(50);
        let baseline = pop.stats().best_fitness;
        // distance 20 -> (100-20)/100*90 = 72
        assert!((baseline - 72.0).abs() < 1e-9);

        // second evaluation: 60 is closer than the previous best (70),
        // earning the +10 direction bonus on top of the 81 baseline
        pop.individuals = vec![
            Individual::with_value(60, 1, 100),
            Individual::with_value(10, 1, 100),
        ];
        pop.evaluate(50);
        assert!((pop.stats().best_fitness - 91.0).abs() < 1e-9);
    }

    #[test]
    fn test_reseed_keeps_elites() {
        let mut pop = evaluated_population(42);
        let top: Vec<Individual> = pop.individuals()[..2].to_vec();

        let mut rng = StdRng::seed_from_u64(7);
        pop.reseed(&mut rng);

        assert_eq!(pop.len(), 10);
        assert_eq!(pop.individuals()[0], top[0]);
        assert_eq!(pop.individuals()[1], top[1]);
        // fresh individuals carry no fitness yet
        for ind in &pop.individuals()[2..] {
            assert_eq!(ind.fitness(), 0.0);
        }
    }
}
