use string_evolver::{
    Alphabet, EvolutionParams, Evolver, Target,
    algorithms::elitist::{ElitistGA, RunState},
};

const TARGET: &str = "Sovereign_Symbiosis";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let alphabet = Alphabet::default();
    let target = Target::new(TARGET, &alphabet)?;
    let config = EvolutionParams {
        population_size: 200,
        max_iterations: 500,
        elitism: 10,
        crossover_num: 2,
        random_generated_candidate_num: 5,
        mutation_rate: 0.02,
    }
    .validate()?;

    let mut ga = ElitistGA::new(target, alphabet, config, 42)?;

    while ga.state() == RunState::Running {
        let best = ga.best();
        if ga.generation() % 50 == 0 {
            println!(
                "Gen {}: [{}] (Fitness: {})",
                ga.generation(),
                best.candidate,
                best.fitness
            );
        }
        ga.step();
    }

    let outcome = ga.outcome();
    if outcome.converged() {
        println!("🎯 Target reached at Gen {}!", outcome.generation);
    } else {
        println!(
            "Stopped at Gen {} with [{}] (Fitness: {})",
            outcome.generation, outcome.best, outcome.fitness
        );
    }
    Ok(())
}
