//! Selection strategies.
//!
//! Selection determines which individuals become parents for crossover.
//! All strategies assume **maximization** (higher fitness = better) and
//! operate on the population slice in its current order.
//!
//! The [`Selection`] enum covers the pairwise parent choice configured
//! for the engine; [`sus`] and [`elites`] are batch operations used for
//! one-sweep multi-selection and elite preservation.
//!
//! # References
//!
//! - Baker (1987), "Reducing Bias and Inefficiency in the Selection
//!   Algorithm" (stochastic universal sampling)
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::individual::Individual;
use rand::seq::index;
use rand::Rng;

/// Parent selection strategy.
///
/// # Examples
///
/// ```
/// use evoguess::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Fitness-proportionate selection
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selection {
    /// Tournament selection: draw `k` distinct individuals at random,
    /// return the fittest. Ties go to the first-encountered contender.
    ///
    /// Higher `k` = stronger selection pressure. With `k` at or above
    /// the population size the tournament always returns the best
    /// individual.
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// A pointer is drawn uniformly in `[0, total_fitness]` and the
    /// wheel is walked cumulatively. When every individual has zero
    /// fitness the draw is uniform.
    Roulette,

    /// Rank-based selection.
    ///
    /// Individuals are ranked by fitness (best first) and weighted by
    /// `population_size - rank_index`, which avoids the scaling problems
    /// of raw-fitness roulette.
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Looks up a variant by its configuration identifier.
    ///
    /// `tournament` uses the given tournament size; unknown identifiers
    /// fall back to the default.
    pub fn from_name(name: &str, tournament_size: usize) -> Self {
        match name {
            "tournament" => Self::Tournament(tournament_size.max(1)),
            "roulette" => Self::Roulette,
            "rank" => Self::Rank,
            _ => Self::default(),
        }
    }

    /// Selects a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
        }
    }
}

/// Tournament: draw `k` distinct contenders, return the fittest.
///
/// `k` is capped at the population size, so an oversized tournament
/// degenerates into a full scan and always yields the best individual.
fn tournament<R: Rng>(population: &[Individual], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    let k = k.clamp(1, n);

    let mut best_idx: Option<usize> = None;
    for idx in index::sample(rng, n, k) {
        match best_idx {
            Some(best) if population[idx].fitness() <= population[best].fitness() => {}
            _ => best_idx = Some(idx),
        }
    }
    best_idx.expect("tournament draws at least one contender")
}

/// Roulette wheel: pointer in `[0, total]`, cumulative walk.
fn roulette<R: Rng>(population: &[Individual], rng: &mut R) -> usize {
    let n = population.len();
    let total: f64 = population.iter().map(|ind| ind.fitness()).sum();
    if total <= 0.0 {
        return rng.random_range(0..n);
    }

    let pointer = rng.random_range(0.0..=total);
    let mut cumulative = 0.0;
    for (i, ind) in population.iter().enumerate() {
        cumulative += ind.fitness();
        if cumulative >= pointer {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Rank selection: weight `n - rank` over the fitness-descending order.
fn rank<R: Rng>(population: &[Individual], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        population[b]
            .fitness()
            .partial_cmp(&population[a].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total = (n * (n + 1)) as f64 / 2.0;
    let pointer = rng.random_range(0.0..=total);
    let mut cumulative = 0.0;
    for (rank_idx, &original) in order.iter().enumerate() {
        cumulative += (n - rank_idx) as f64;
        if cumulative >= pointer {
            return original;
        }
    }

    order[n - 1] // floating-point fallback
}

/// Stochastic universal sampling: `n` selections in one sweep.
///
/// Generates `n` equally spaced pointers from a single random offset in
/// `[0, total/n]` and walks the wheel once, which keeps the selection
/// count of each individual proportional to its fitness share with much
/// lower variance than `n` independent roulette draws.
///
/// Zero total fitness degrades to `n` uniform draws.
///
/// # Panics
/// Panics if `population` is empty.
pub fn sus<R: Rng>(population: &[Individual], n: usize, rng: &mut R) -> Vec<usize> {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    if n == 0 {
        return Vec::new();
    }

    let total: f64 = population.iter().map(|ind| ind.fitness()).sum();
    if total <= 0.0 {
        return (0..n)
            .map(|_| rng.random_range(0..population.len()))
            .collect();
    }

    let spacing = total / n as f64;
    let start = rng.random_range(0.0..spacing);

    let mut selected = Vec::with_capacity(n);
    let mut cumulative = population[0].fitness();
    let mut idx = 0;
    for i in 0..n {
        let pointer = start + i as f64 * spacing;
        while cumulative < pointer && idx + 1 < population.len() {
            idx += 1;
            cumulative += population[idx].fitness();
        }
        selected.push(idx);
    }
    selected
}

/// Returns clones of the top `n` individuals by fitness.
///
/// Ties keep their current order. The clones are owned copies; mutating
/// them later cannot touch the originals.
pub fn elites(population: &[Individual], n: usize) -> Vec<Individual> {
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| {
        population[b]
            .fitness()
            .partial_cmp(&population[a].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    order
        .into_iter()
        .take(n)
        .map(|i| population[i].clone())
        .collect()
}
