mod solvers;

use gridworld::factory::{negative_grid, standard_grid, DEFAULT_STEP_COST};
use gridworld::render::{policy_frame, values_frame};
use gridworld::{Grid, GridError, Policy, ValueFunction};
use solvers::monte_carlo;
use solvers::policy_evaluation::PolicyEvaluation;
use solvers::value_iteration::ValueIteration;
use solvers::{demo_policy, DEFAULT_THETA};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rl101=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn log_values(banner: &str, v: &ValueFunction, grid: &Grid) {
    info!("{banner}\n{}", values_frame(v, grid.rows(), grid.cols()));
}

fn log_policy(banner: &str, p: &Policy, grid: &Grid) {
    info!("{banner}\n{}", policy_frame(p, grid.rows(), grid.cols()));
}

fn main() -> Result<(), GridError> {
    init_logging();

    // iterative policy evaluation, uniformly random policy
    let mut pe = PolicyEvaluation::uniform_random(standard_grid(), 1.0);
    let (_, sweeps) = pe.exec(DEFAULT_THETA, None)?;
    info!(sweeps, "evaluated the uniformly random policy");
    log_values("values for the uniformly random policy:", pe.v(), pe.grid());

    // iterative policy evaluation, fixed policy
    let policy = demo_policy();
    let mut pe = PolicyEvaluation::fixed(standard_grid(), 0.9, policy.clone());
    let (_, sweeps) = pe.exec(DEFAULT_THETA, None)?;
    info!(sweeps, "evaluated the fixed policy");
    log_policy("fixed policy:", &policy, pe.grid());
    log_values("values for the fixed policy:", pe.v(), pe.grid());

    // first-visit Monte Carlo estimate of the same policy
    let grid = standard_grid();
    log_values("rewards:", grid.rewards(), &grid);
    let v = monte_carlo::evaluate(grid.clone(), &policy, 0.9, 100, 2718);
    log_values("first-visit Monte Carlo values:", &v, &grid);

    // value iteration on the costed grid
    let grid = negative_grid(DEFAULT_STEP_COST);
    log_values("rewards:", grid.rewards(), &grid);
    let mut vi = ValueIteration::new(grid, 0.9, 2718);
    log_policy("initial (random) policy:", vi.policy(), vi.grid());
    let (_, sweeps) = vi.exec(DEFAULT_THETA, None);
    info!(sweeps, "value iteration converged");
    log_values("optimal values:", vi.v(), vi.grid());
    log_policy("greedy policy:", vi.policy(), vi.grid());

    Ok(())
}
