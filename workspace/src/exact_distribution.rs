use boson_sim::{
    config::ExperimentConfiguration,
    distribution::ExactDistributionCalculator,
    interferometer::random_unitary,
    state::ModeState,
};
use itertools::Itertools;
use rand::{ rngs::StdRng, SeedableRng };

const M: usize = 5; // number of modes

fn print_distribution(config: &ExperimentConfiguration) {
    let calc = ExactDistributionCalculator::new(config);
    let probs = match calc.calculate_distribution() {
        Ok(probs) => probs,
        Err(err) => {
            log::error!("failed to compute distribution: {err}");
            return;
        },
    };
    println!(
        "{} -> {} particles left, {} outcomes",
        config.initial_state(),
        config.number_of_particles_left(),
        probs.len(),
    );
    calc.outcomes().iter()
        .zip(probs.iter())
        .sorted_by(|(_, p), (_, q)| q.total_cmp(p))
        .take(10)
        .for_each(|(outcome, p)| { println!("  {outcome}  {p:.6}"); });
    println!("  total = {:.12}", probs.iter().sum::<f64>());
}

fn main() {
    const SEED: u64 = 10546;
    const LOSSES: [usize; 3] = [0, 1, 2];

    env_logger::init();

    let mut rng = StdRng::seed_from_u64(SEED);
    let u = random_unitary(M, &mut rng);
    let initial = ModeState::from([1, 1, 1, 0, 0]);
    log::info!("sampled {M}-mode interferometer with seed {SEED}");

    for lost in LOSSES.into_iter() {
        let left = initial.num_particles() - lost;
        match ExperimentConfiguration::new(u.clone(), initial.clone(), left) {
            Ok(config) => print_distribution(&config),
            Err(err) => log::error!("invalid configuration: {err}"),
        }
    }
}
