//! Cooperative evolutionary loop.
//!
//! [`SearchRunner`] drives the population one generation at a time:
//! evaluate → record → check termination → breed. Each [`step`] returns
//! control to the caller, so cancellation between generations is the
//! caller's choice; [`run`] loops to termination.
//!
//! [`step`]: SearchRunner::step
//! [`run`]: SearchRunner::run

use crate::config::SearchConfig;
use crate::population::Population;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Summary of one completed generation.
///
/// Emitted once per generation, immutable afterwards; external display
/// and reporting layers consume the stream of these.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationRecord {
    /// 1-based generation number.
    pub generation: usize,

    /// Best guess of this generation.
    pub best_guess: i64,

    /// Fitness of the best guess.
    pub best_fitness: f64,

    /// Mean fitness across the population.
    pub avg_fitness: f64,

    /// Fraction of distinct values in the population, in `[0, 1]`.
    pub diversity: f64,
}

/// Final result of a search run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    /// Whether the target was found before the generation limit.
    pub solved: bool,

    /// Best guess seen across the whole run.
    pub best_guess: i64,

    /// Fitness of that guess.
    pub best_fitness: f64,

    /// Generations executed.
    pub generations: usize,

    /// Every generation record, in order.
    pub history: Vec<GenerationRecord>,
}

/// Observer for generation lifecycle events.
///
/// Passed in at construction and never swapped afterwards; the engine
/// behaves identically with no sink attached. Both callbacks default to
/// no-ops so implementors override only what they consume.
pub trait GenerationSink {
    /// Called after each generation is evaluated and recorded.
    fn on_generation(&mut self, _record: &GenerationRecord) {}

    /// Called once when the run terminates.
    fn on_finished(&mut self, _outcome: &SearchOutcome) {}
}

/// Drives the evolutionary search against a hidden target.
///
/// # Usage
///
/// ```
/// use evoguess::{SearchConfig, SearchRunner};
///
/// let config = SearchConfig::default().with_range(1, 50).with_seed(42);
/// let outcome = SearchRunner::new(&config, 23).run();
/// assert!(outcome.solved);
/// assert_eq!(outcome.best_guess, 23);
/// ```
pub struct SearchRunner {
    population: Population,
    target: i64,
    rng: StdRng,
    sink: Option<Box<dyn GenerationSink>>,
    history: Vec<GenerationRecord>,
    best_guess: i64,
    best_fitness: f64,
    plateau: usize,
}

impl SearchRunner {
    /// Creates a runner for the given configuration and target.
    ///
    /// The configuration is sanitized and a target outside the search
    /// range is clamped to the nearest bound; construction never fails.
    /// With `config.seed` set the run is fully reproducible.
    pub fn new(config: &SearchConfig, target: i64) -> Self {
        let config = config.clone().sanitized();
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let population = Population::new(&config, &mut rng);
        let target = target.clamp(config.min_value, config.max_value);
        Self {
            population,
            target,
            rng,
            sink: None,
            history: Vec::new(),
            best_guess: 0,
            best_fitness: f64::NEG_INFINITY,
            plateau: 0,
        }
    }

    /// Attaches an event sink. At most one; the last call wins.
    pub fn with_sink(mut self, sink: Box<dyn GenerationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// The (clamped) target being searched for.
    pub fn target(&self) -> i64 {
        self.target
    }

    /// The live population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Records of all generations completed so far.
    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    /// Generations elapsed since the best fitness last improved.
    pub fn plateau_length(&self) -> usize {
        self.plateau
    }

    /// Advances exactly one generation.
    ///
    /// Evaluates the population, emits the generation record, and — when
    /// the record does not meet the solved threshold — breeds the next
    /// generation (or re-seeds the non-elites on a configured plateau).
    /// Stepping again after a solved record re-evaluates without
    /// breeding, so the call is idempotent at termination.
    pub fn step(&mut self) -> GenerationRecord {
        self.population.evaluate(self.target);

        let stats = *self.population.stats();
        let record = GenerationRecord {
            generation: self.history.len() + 1,
            best_guess: stats.best_guess,
            best_fitness: stats.best_fitness,
            avg_fitness: stats.avg_fitness,
            diversity: self.population.value_diversity(),
        };

        if record.best_fitness > self.best_fitness {
            self.best_fitness = record.best_fitness;
            self.best_guess = record.best_guess;
            self.plateau = 0;
        } else {
            self.plateau += 1;
        }

        self.history.push(record);
        if let Some(sink) = self.sink.as_mut() {
            sink.on_generation(&record);
        }

        if !self.is_solved(&record) {
            let restart = {
                let config = self.population.config();
                config.restart_on_plateau && self.plateau >= config.plateau_window
            };
            if restart {
                self.population.reseed(&mut self.rng);
                self.plateau = 0;
            } else {
                self.population.breed(&mut self.rng);
            }
        }

        record
    }

    /// Whether a record meets the configured solved threshold.
    pub fn is_solved(&self, record: &GenerationRecord) -> bool {
        record.best_fitness >= self.population.config().solved_threshold
    }

    /// Runs to termination: solved, or the generation limit reached.
    pub fn run(mut self) -> SearchOutcome {
        let max_generations = self.population.config().max_generations;

        let mut solved = false;
        while self.history.len() < max_generations {
            let record = self.step();
            if self.is_solved(&record) {
                solved = true;
                break;
            }
        }

        let outcome = SearchOutcome {
            solved,
            best_guess: self.best_guess,
            best_fitness: self.best_fitness,
            generations: self.history.len(),
            history: std::mem::take(&mut self.history),
        };
        if let Some(sink) = self.sink.as_mut() {
            sink.on_finished(&outcome);
        }
        outcome
    }
}

// ============================================================================
// Tests
// ============================================================================
