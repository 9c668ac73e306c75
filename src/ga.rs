//! Genetic-algorithm optimizer over assignment chromosomes (§4.4).

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::MatchConfig;
use crate::fitness::{distance, fitness};
use crate::types::{Assignment, FitnessHistory, GaOutcome, StrokeFeatures};

/// Build one random chromosome per §4.4.1, based on `diff = written_len - reference_len`.
fn random_chromosome(written_len: usize, reference_len: usize, rng: &mut impl Rng) -> Assignment {
    let diff = written_len as isize - reference_len as isize;

    if diff == 0 {
        let mut chromosome: Assignment = (1..=reference_len).collect();
        chromosome.shuffle(rng);
        chromosome
    } else if diff > 0 {
        let mut chromosome: Assignment = (1..=reference_len).collect();
        chromosome.extend(std::iter::repeat_n(0, diff as usize));
        chromosome.shuffle(rng);
        chromosome
    } else {
        (0..written_len)
            .map(|_| rng.gen_range(1..=reference_len))
            .collect()
    }
}

/// Tournament selection: sample `tournament_size` distinct indices, return a
/// copy of the fittest chromosome among them. Ties keep the first-seen winner.
fn tournament_select(
    population: &[Assignment],
    fitnesses: &[f64],
    tournament_size: usize,
    rng: &mut impl Rng,
) -> Assignment {
    let mut indices: Vec<usize> = (0..population.len()).collect();
    let (sampled, _) = indices.partial_shuffle(rng, tournament_size);

    let mut best_idx = sampled[0];
    let mut best_fitness = fitnesses[best_idx];
    for &idx in &sampled[1..] {
        if fitnesses[idx] > best_fitness {
            best_fitness = fitnesses[idx];
            best_idx = idx;
        }
    }
    population[best_idx].clone()
}

/// Single-point crossover (§4.4.3). A no-op copy when `parent1.len() < 2`.
fn crossover(
    parent1: &Assignment,
    parent2: &Assignment,
    crossover_rate: f64,
    rng: &mut impl Rng,
) -> (Assignment, Assignment) {
    if parent1.len() < 2 || rng.r#gen::<f64>() >= crossover_rate {
        return (parent1.clone(), parent2.clone());
    }

    let point = rng.gen_range(1..parent1.len());
    let child1 = [&parent1[..point], &parent2[point..]].concat();
    let child2 = [&parent2[..point], &parent1[point..]].concat();
    (child1, child2)
}

/// Per-gene mutation (§4.4.4). Replaces a gene with a uniform draw from
/// `[0, reference_len]`, reachable regardless of `diff`.
fn mutate(chromosome: &Assignment, reference_len: usize, mutation_rate: f64, rng: &mut impl Rng) -> Assignment {
    chromosome
        .iter()
        .map(|&gene| {
            if rng.r#gen::<f64>() < mutation_rate {
                rng.gen_range(0..=reference_len)
            } else {
                gene
            }
        })
        .collect()
}

/// Run the GA to completion (§4.4.5). `written.len() == 0` short-circuits to
/// an empty assignment with fitness 1.0 and zero generations, per §7.
pub fn evolve(
    written: &[StrokeFeatures],
    reference: &[StrokeFeatures],
    config: &MatchConfig,
    rng: &mut impl Rng,
) -> GaOutcome {
    let written_len = written.len();
    let reference_len = reference.len();

    if written_len == 0 {
        return GaOutcome {
            assignment: Vec::new(),
            fitness: 1.0,
            generations: 0,
            history: FitnessHistory::default(),
        };
    }

    let population_size = config.resolved_population_size(written_len);
    let mut population: Vec<Assignment> = (0..population_size)
        .map(|_| random_chromosome(written_len, reference_len, rng))
        .collect();

    let mut best_chromosome = population[0].clone();
    let mut best_fitness = 0.0_f64;
    let mut stagnation = 0usize;
    let mut history = FitnessHistory::default();
    let mut generations_run = 0usize;

    for _generation in 0..config.max_generations {
        generations_run += 1;

        let fitnesses: Vec<f64> = population
            .iter()
            .map(|chromosome| fitness(distance(written, reference, chromosome, config)))
            .collect();

        let (gen_best_idx, &gen_best_fitness) = fitnesses
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .expect("population is never empty");
        let gen_mean_fitness = fitnesses.iter().sum::<f64>() / fitnesses.len() as f64;

        history.best_fitness.push(gen_best_fitness);
        history.mean_fitness.push(gen_mean_fitness);

        tracing::debug!(generation = _generation, best = gen_best_fitness, mean = gen_mean_fitness, "ga generation evaluated");

        if gen_best_fitness > best_fitness {
            best_fitness = gen_best_fitness;
            best_chromosome = population[gen_best_idx].clone();
            stagnation = 0;
        } else {
            stagnation += 1;
        }

        if stagnation >= config.convergence_generations {
            break;
        }

        let mut next_population = vec![best_chromosome.clone()];
        while next_population.len() < population_size {
            let parent1 = tournament_select(&population, &fitnesses, config.tournament_size, rng);
            let parent2 = tournament_select(&population, &fitnesses, config.tournament_size, rng);

            let (child1, child2) = crossover(&parent1, &parent2, config.crossover_rate, rng);
            let child1 = mutate(&child1, reference_len, config.mutation_rate, rng);
            let child2 = mutate(&child2, reference_len, config.mutation_rate, rng);

            next_population.push(child1);
            next_population.push(child2);
        }
        next_population.truncate(population_size);
        population = next_population;
    }

    GaOutcome {
        assignment: best_chromosome,
        fitness: best_fitness,
        generations: generations_run,
        history,
    }
}
