use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use landing_bay::{
    config::{
        run::{resolve_max_steps, RunParams},
        LanderConfig,
    },
    policy::{run_episode, ConstantPolicy, Policy, RandomPolicy},
    Action, LandingEnv,
};
use log::info;
use rand::prelude::*;
use rand_pcg::Pcg64Mcg;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum PolicyKind {
    Random,
    Idle,
    FullThrust,
}

#[derive(Debug, clap::Parser)]
#[command(name = "run_episodes", about = "Run landing episodes headlessly and report their outcomes")]
pub struct RunCli {
    /// YAML config; defaults are used for anything it leaves out.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    #[arg(short = 'n', long = "episodes", default_value_t = 1)]
    episodes: usize,

    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    #[arg(short = 'p', long = "policy", value_enum, default_value_t = PolicyKind::Random)]
    policy: PolicyKind,

    /// Simulated seconds after which an unfinished episode is abandoned.
    #[arg(short = 't', long = "t-max", default_value_t = 1000.0)]
    t_max: f64,

    /// Step cap; takes precedence over --t-max.
    #[arg(short = 'm', long = "max-steps")]
    max_steps: Option<usize>,

    /// Print each finished episode's outcome, trajectory included, as a JSON line on stdout.
    #[arg(long = "trajectory")]
    trajectory: bool,

    #[arg(long = "print-params")]
    print_params: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = RunCli::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Reading config from {}", path.display());
            LanderConfig::parse(path)?
        }
        None => LanderConfig::default(),
    };
    if args.print_params {
        config.print();
    }

    let run_params = RunParams {
        episodes: args.episodes,
        max_steps: resolve_max_steps(&config.lander, args.max_steps, args.t_max),
        seed: args.seed,
        emit_trajectory: args.trajectory,
    };

    let env_rng = match run_params.seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_entropy(),
    };
    let mut env = LandingEnv::new(config, env_rng)?;

    let mut policy: Box<dyn Policy> = match args.policy {
        PolicyKind::Random => {
            let rng = match run_params.seed {
                Some(seed) => Pcg64Mcg::seed_from_u64(seed.wrapping_mul(31).wrapping_add(1)),
                None => Pcg64Mcg::from_entropy(),
            };
            Box::new(RandomPolicy::new(rng))
        }
        PolicyKind::Idle => Box::new(ConstantPolicy(Action::IDLE)),
        PolicyKind::FullThrust => Box::new(ConstantPolicy(Action::new(1.0, 0.0))),
    };

    let mut n_success = 0;
    let mut total_return = 0.0;
    for i in 0..run_params.episodes {
        let summary = run_episode(
            &mut env,
            policy.as_mut(),
            run_params.max_steps,
            run_params.episode_seed(i),
        );
        match summary.outcome {
            Some(outcome) => {
                info!(
                    "Episode {}: {:?} after {} steps, return={:.2}, fuel used={:.2}",
                    i, outcome.status, summary.steps, outcome.episode_return, outcome.fuel_used
                );
                if outcome.success {
                    n_success += 1;
                }
                total_return += outcome.episode_return;
                if run_params.emit_trajectory {
                    println!("{}", serde_json::to_string(&outcome)?);
                }
            }
            None => info!("Episode {}: abandoned after {} steps", i, summary.steps),
        }
    }

    info!(
        "Done! {}/{} landings, mean return {:.2}",
        n_success,
        run_params.episodes,
        total_return / run_params.episodes.max(1) as f64
    );
    Ok(())
}
