mod reference;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use linsolve::{
    load_system, save_system, GaussSeidel, LinearSystem, Matrix, Outcome, PivotCheck,
    SolverOptions,
};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gauss-seidel",
    about = "Solve a linear system by Gauss-Seidel iteration and compare against direct elimination"
)]
struct Cli {
    /// JSON file holding {"a": [[..], ..], "b": [..]}
    #[arg(long, conflicts_with = "random")]
    system: Option<PathBuf>,

    /// Generate a strictly diagonally dominant system of this size
    #[arg(long)]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// JSON file with solver options
    #[arg(long)]
    options: Option<PathBuf>,

    #[arg(long)]
    tolerance: Option<f64>,

    #[arg(long)]
    max_iterations: Option<usize>,

    /// Divide by zero pivots instead of rejecting them
    #[arg(long)]
    unchecked_pivots: bool,

    /// Print the last iterate even if the iteration budget runs out
    #[arg(long)]
    best_effort: bool,

    /// Write the system being solved to this JSON file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the solution as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn solver_options(&self) -> Result<SolverOptions> {
        let mut options = match &self.options {
            Some(path) => SolverOptions::load(path)
                .map_err(|e| anyhow!("{}", e))
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => SolverOptions::default(),
        };
        if let Some(tolerance) = self.tolerance {
            options.tolerance = tolerance;
        }
        if let Some(max_iterations) = self.max_iterations {
            options.max_iterations = max_iterations;
        }
        if self.unchecked_pivots {
            options.pivot_check = PivotCheck::Unchecked;
        }
        Ok(options)
    }

    fn linear_system(&self) -> Result<LinearSystem> {
        if let Some(path) = &self.system {
            return load_system(path)
                .map_err(|e| anyhow!("{}", e))
                .with_context(|| format!("Failed to load system from {}", path.display()));
        }
        if let Some(n) = self.random {
            let seed = self.seed.unwrap_or_else(rand::random);
            info!(n, seed, "generating random system");
            let mut rng = Pcg64::seed_from_u64(seed);
            return Ok(LinearSystem::random_diagonally_dominant(n, &mut rng));
        }
        textbook_system()
    }
}

fn textbook_system() -> Result<LinearSystem> {
    let a = Matrix::from_rows(&[[3.0, -0.1, -0.2], [0.1, 7.0, -0.3], [0.3, -0.2, 10.0]])?;
    Ok(LinearSystem::new(a, vec![7.85, -19.3, 71.4]))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.solver_options()?;
    let system = cli.linear_system()?;

    if let Some(path) = &cli.save {
        save_system(path, &system)
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("Failed to save system to {}", path.display()))?;
    }

    let solver = GaussSeidel::new(options);
    let solution = if cli.best_effort {
        match solver.solve_best_effort(&system.a, &system.b)? {
            Outcome::Converged(solution) => solution,
            Outcome::Exhausted(solution) => {
                eprintln!(
                    "maximum iterations reached, last relative change {:e}",
                    solution.max_relative_change
                );
                solution
            }
        }
    } else {
        solver.solve_detailed(&system.a, &system.b)?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&solution.x)?);
        return Ok(());
    }

    println!("Solution is");
    print_vector(&solution.x);
    println!(
        "after {} iterations, relative change {:e}",
        solution.iterations, solution.max_relative_change
    );

    match reference::gaussian_elimination(&system.a, &system.b) {
        Some(direct) => {
            println!("Direct solution is");
            print_vector(&direct);
            let max_diff = solution
                .x
                .iter()
                .zip(direct.iter())
                .fold(0.0_f64, |max, (lhs, rhs)| max.max((lhs - rhs).abs()));
            println!("max difference {:e}", max_diff);
        }
        None => println!("matrix is singular, no direct solution"),
    }
    println!(
        "relative residual {:e}",
        system.relative_residual(&solution.x)
    );

    Ok(())
}

fn print_vector(x: &[f64]) {
    for v in x {
        println!("  {:>14.8}", v);
    }
}
