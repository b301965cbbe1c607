//! Random-key genetic search over visiting orders.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::debug;
use portwise_core::StopReason;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::encoding::{RandomKeys, as_given_keys, decode, random_keys};

/// Configuration for [`GeneticOptimizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Candidates per generation.
    pub population_size: usize,
    /// Candidates kept as parents each generation.
    pub parent_count: usize,
    /// Candidates drawn per tournament.
    pub tournament_size: usize,
    /// Share of each child's genes replaced with fresh keys.
    pub mutation_rate: f64,
    /// Generations bred after the initial population.
    pub generations: usize,
    /// Wall-clock budget checked between generations.
    pub time_limit: Option<Duration>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            parent_count: 20,
            tournament_size: 3,
            mutation_rate: 0.2,
            generations: 200,
            time_limit: None,
        }
    }
}

impl GaConfig {
    /// Set the population size.
    #[must_use]
    pub const fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of parents kept each generation.
    #[must_use]
    pub const fn with_parent_count(mut self, count: usize) -> Self {
        self.parent_count = count;
        self
    }

    /// Set the tournament size.
    #[must_use]
    pub const fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Set the share of genes mutated per child.
    #[must_use]
    pub const fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set the generation budget.
    #[must_use]
    pub const fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Stop breeding once `limit` has elapsed.
    #[must_use]
    pub const fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Population size, at least two.
    const fn population(&self) -> usize {
        if self.population_size < 2 {
            2
        } else {
            self.population_size
        }
    }

    /// Parents kept, between one and the population size.
    fn parents(&self) -> usize {
        self.parent_count.clamp(1, self.population())
    }

    /// Genes mutated per child, at least one and at most `genes`.
    #[expect(
        clippy::float_arithmetic,
        reason = "the mutated share is a fraction of the gene count"
    )]
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "gene counts are small and the product is clamped to them"
    )]
    fn mutated_genes(&self, genes: usize) -> usize {
        let rate = if self.mutation_rate.is_finite() {
            self.mutation_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let share = (rate * genes as f64).round() as usize;
        share.clamp(1, genes.max(1))
    }
}

/// Result of one optimizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimization {
    /// Best visiting order seen, as stop indices `1..=genes`.
    pub order: Vec<usize>,
    /// Fitness of [`Optimization::order`].
    pub fitness: f64,
    /// Generations bred after the initial population.
    pub generations: usize,
    /// Fitness evaluations performed.
    pub evaluations: usize,
    /// Why the search ended.
    pub stop_reason: StopReason,
}

/// Best candidate seen so far.
struct Incumbent {
    keys: RandomKeys,
    fitness: f64,
}

impl Incumbent {
    fn offer(&mut self, population: &[RandomKeys], scores: &[f64]) {
        for (keys, &score) in population.iter().zip(scores) {
            if score > self.fitness {
                self.fitness = score;
                self.keys.clone_from(keys);
            }
        }
    }
}

/// Genetic optimizer over random-key candidates.
///
/// Runs are deterministic for a given seed: random draws happen on one
/// thread and parallel fitness evaluation preserves population order.
#[derive(Debug, Clone, Default)]
pub struct GeneticOptimizer {
    config: GaConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl GeneticOptimizer {
    /// Optimizer with the given configuration.
    #[must_use]
    pub const fn new(config: GaConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Stop at the next generation boundary once `flag` is set.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Search for the order of `genes` free stops that maximizes `score`.
    ///
    /// The initial population always contains the request order, so the
    /// result is never worse than it. `score` receives decoded orders and
    /// may be called from several threads at once.
    pub fn optimize<F>(&self, genes: usize, seed: u64, score: F) -> Optimization
    where
        F: Fn(&[usize]) -> f64 + Sync,
    {
        let started = Instant::now();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        if genes <= 1 {
            let order = decode(&as_given_keys(genes));
            return Optimization {
                fitness: score(&order),
                order,
                generations: 0,
                evaluations: 1,
                stop_reason: StopReason::GenerationLimit,
            };
        }

        let population_size = self.config.population();
        let mut population: Vec<RandomKeys> = Vec::with_capacity(population_size);
        population.push(as_given_keys(genes));
        while population.len() < population_size {
            population.push(random_keys(&mut rng, genes));
        }

        let mut scores = evaluate(&population, &score);
        let mut evaluations = population.len();
        let mut incumbent = Incumbent {
            keys: as_given_keys(genes),
            fitness: f64::NEG_INFINITY,
        };
        incumbent.offer(&population, &scores);

        let mut generations = 0;
        let mut stop_reason = StopReason::GenerationLimit;
        while generations < self.config.generations {
            if let Some(reason) = self.interrupted(started) {
                stop_reason = reason;
                break;
            }
            population = self.breed(&population, &scores, genes, &mut rng);
            scores = evaluate(&population, &score);
            evaluations += population.len();
            incumbent.offer(&population, &scores);
            generations += 1;
            debug!(
                "generation {generations}: best fitness {:.6}",
                incumbent.fitness
            );
        }

        Optimization {
            order: decode(&incumbent.keys),
            fitness: incumbent.fitness,
            generations,
            evaluations,
            stop_reason,
        }
    }

    fn interrupted(&self, started: Instant) -> Option<StopReason> {
        if self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Some(StopReason::Cancelled);
        }
        self.config
            .time_limit
            .filter(|limit| started.elapsed() >= *limit)
            .map(|_| StopReason::TimeLimit)
    }

    /// Next generation: tournament-selected parents followed by their
    /// mutated children.
    fn breed(
        &self,
        population: &[RandomKeys],
        scores: &[f64],
        genes: usize,
        rng: &mut ChaCha8Rng,
    ) -> Vec<RandomKeys> {
        let parent_count = self.config.parents();
        let parents: Vec<RandomKeys> = (0..parent_count)
            .filter_map(|_| {
                let winner = tournament(scores, self.config.tournament_size, rng);
                population.get(winner).cloned()
            })
            .collect();

        let child_count = population.len().saturating_sub(parents.len());
        let mutated = self.config.mutated_genes(genes);
        let pairs = parents.iter().zip(parents.iter().cycle().skip(1)).cycle();
        let children: Vec<RandomKeys> = pairs
            .take(child_count)
            .map(|(first, second)| {
                let mut child = crossover(first, second, rng);
                mutate(&mut child, mutated, rng);
                child
            })
            .collect();

        let mut next = parents;
        next.extend(children);
        next
    }
}

fn evaluate<F>(population: &[RandomKeys], score: &F) -> Vec<f64>
where
    F: Fn(&[usize]) -> f64 + Sync,
{
    population
        .par_iter()
        .map(|keys| score(&decode(keys)))
        .collect()
}

/// Index of the fittest of `size` candidates drawn uniformly with
/// replacement.
fn tournament(scores: &[f64], size: usize, rng: &mut ChaCha8Rng) -> usize {
    let mut winner = rng.gen_range(0..scores.len());
    for _ in 1..size.max(1) {
        let challenger = rng.gen_range(0..scores.len());
        if scores.get(challenger) > scores.get(winner) {
            winner = challenger;
        }
    }
    winner
}

/// Head of `first` up to a random cut, tail of `second` after it.
fn crossover(first: &[f64], second: &[f64], rng: &mut ChaCha8Rng) -> RandomKeys {
    let cut = rng.gen_range(1..first.len().max(2));
    first
        .iter()
        .take(cut)
        .chain(second.iter().skip(cut))
        .copied()
        .collect()
}

/// Replace `count` distinct genes with fresh uniform keys.
fn mutate(child: &mut [f64], count: usize, rng: &mut ChaCha8Rng) {
    let positions = index::sample(rng, child.len(), count.min(child.len()));
    for position in positions.iter() {
        if let Some(gene) = child.get_mut(position) {
            *gene = rng.r#gen::<f64>();
        }
    }
}
