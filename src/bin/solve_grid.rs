use std::env;
use std::io::{self, Write};
use std::process;

use vacuum_mdp::{io as grid_io, value_iteration, CleaningMdp, SolverConfig, StateSpace};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("usage: solve_grid <grid-file> [output-file]");
        process::exit(2);
    }

    if let Err(err) = run(&args[1], args.get(2).map(String::as_str)) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(input: &str, output: Option<&str>) -> vacuum_mdp::Result<()> {
    let grid = grid_io::read_grid(input)?;
    let space = StateSpace::generate(&grid)?;
    let mdp = CleaningMdp::new(&grid);
    let solution = value_iteration(&mdp, &space, &SolverConfig::default())?;

    println!(
        "{}x{} grid, {} states, converged after {} sweeps",
        grid.rows(),
        grid.cols(),
        space.len(),
        solution.sweeps
    );

    match output {
        Some(path) => grid_io::save_solution(path, &space, &solution)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            grid_io::write_solution(&mut handle, &space, &solution)?;
            handle.flush()?;
        }
    }
    Ok(())
}
