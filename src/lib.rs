//! Generational evolutionary search for a hidden integer.
//!
//! Given a bounded range and a secret target inside it, the engine
//! evolves a population of integer guesses toward the target using
//! pluggable strategies:
//!
//! - **Fitness**: linear, inverse, exponential, combined, and hot/cold
//!   scoring of a guess against the target, all on a 0-100 scale.
//! - **Selection**: tournament, roulette-wheel, and rank-based parent
//!   choice, plus stochastic universal sampling and elite extraction.
//! - **Crossover**: arithmetic, average-with-variation, binary single-
//!   and two-point splicing, and a similarity-adaptive dispatcher.
//! - **Mutation**: uniform-delta, bit-flip, boundary, gaussian, and a
//!   fitness-adaptive operator that mutates weak individuals harder.
//!
//! # Architecture
//!
//! [`Population`] owns one generation and composes the four strategies
//! to breed the next; [`SearchRunner`] drives the loop one generation
//! per step, emits a [`GenerationRecord`] stream for external display
//! and reporting layers, and stops on the solved threshold or the
//! generation limit. The engine is single-threaded and performs no I/O;
//! with a fixed seed, runs are bit-for-bit reproducible.
//!
//! # Example
//!
//! ```
//! use evoguess::{SearchConfig, SearchRunner};
//!
//! let config = SearchConfig::default()
//!     .with_range(1, 50)
//!     .with_population_size(20)
//!     .with_seed(42);
//!
//! let outcome = SearchRunner::new(&config, 37).run();
//! assert!(outcome.solved);
//! assert_eq!(outcome.best_guess, 37);
//! ```

pub mod config;
pub mod crossover;
pub mod fitness;
pub mod individual;
pub mod mutation;
pub mod population;
pub mod runner;
pub mod selection;

pub use config::SearchConfig;
pub use crossover::Crossover;
pub use fitness::Fitness;
pub use individual::Individual;
pub use mutation::Mutation;
pub use population::{GenerationStats, Population};
pub use runner::{GenerationRecord, GenerationSink, SearchOutcome, SearchRunner};
pub use selection::Selection;
