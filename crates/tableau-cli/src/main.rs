use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use tableau_solver::{LinearProgram, PivotRule, Solution, SolutionStatus, Solver, StandardForm, Tableau};

#[derive(Parser)]
#[command(name = "tableau")]
#[command(about = "Maximize a linear program with the tableau simplex method", long_about = None)]
struct Cli {
    /// Log solver progress (-v for info, -vv for every pivot)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a JSON problem file and print the solution
    Solve {
        /// The problem file
        file: PathBuf,
        /// Pivot cap before giving up
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
        max_iterations: u64,
        /// Entering/leaving selection rule
        #[arg(long, value_enum, default_value_t = Rule::Dantzig)]
        rule: Rule,
        /// Print the tableau of every pass
        #[arg(short, long)]
        trace: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
    /// Validate a JSON problem file
    Check {
        /// The problem file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Rule {
    Dantzig,
    Bland,
}

impl From<Rule> for PivotRule {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::Dantzig => PivotRule::Dantzig,
            Rule::Bland => PivotRule::Bland,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

fn main() {
    let cli = Cli::parse();
    setup_logger(match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    });

    match cli.command {
        Commands::Solve {
            file,
            max_iterations,
            rule,
            trace,
            format,
        } => {
            let problem = read_program(&file);

            let solver = Solver::new()
                .with_max_iterations(usize::try_from(max_iterations).unwrap_or(usize::MAX))
                .with_pivot_rule(rule.into());
            let solution = match solver.solve(&problem) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Invalid problem: {}", e);
                    std::process::exit(1);
                }
            };

            if format == Format::Json {
                match serde_json::to_string_pretty(&solution) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing solution: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print_solution(&solver, &solution, trace);
            }

            if solution.status != SolutionStatus::Optimal {
                std::process::exit(1);
            }
        }
        Commands::Check { file } => {
            let problem = read_program(&file);
            match StandardForm::from_problem(&problem) {
                Ok(form) => {
                    println!("✓ {} is valid", file.display());
                    println!("  {} decision variables", form.num_variables());
                    println!("  {} constraints", form.num_constraints());
                }
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn setup_logger(level: log::LevelFilter) {
    let result = fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("{:5} | {}", record.level(), message)))
        .level(level)
        .chain(std::io::stderr())
        .apply();
    if let Err(e) = result {
        eprintln!("Error installing logger: {}", e);
    }
}

fn read_program(file: &Path) -> LinearProgram {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::from_str(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_solution(solver: &Solver, solution: &Solution, trace: bool) {
    if trace {
        println!("Rule: {:?}, pivot cap: {}", solver.pivot_rule(), solver.max_iterations());
        println!();
        for snapshot in &solution.iterations {
            let title = if snapshot.iteration == 0 {
                "Initial tableau".to_string()
            } else {
                format!("Iteration {}", snapshot.iteration)
            };
            println!("{}:", title);
            print_tableau(&snapshot.tableau);
            if let Some(pivot) = solution.pivots.iter().find(|p| p.iteration == snapshot.iteration) {
                println!(
                    "  {} enters, row {} leaves (pivot {:.4})",
                    snapshot.tableau.column_label(pivot.column),
                    pivot.row,
                    pivot.element
                );
            }
            println!();
        }
    }

    match solution.status {
        SolutionStatus::Optimal => {
            println!("Status: OPTIMAL");
            print_values(solution);
        }
        SolutionStatus::Unbounded => {
            println!("Status: UNBOUNDED");
            println!("The objective can grow without limit.");
        }
        SolutionStatus::IterationLimit => {
            println!("Status: ITERATION LIMIT");
            println!(
                "Stopped at the cap of {} pivots without proving optimality.",
                solver.max_iterations()
            );
            println!("Values below come from the last tableau and may not be optimal.");
            if trace {
                println!("Last tableau:");
                print_tableau(&solution.final_tableau);
                println!();
            }
            print_values(solution);
        }
    }
}

fn print_values(solution: &Solution) {
    println!("Objective value: {:.4}", solution.objective_value);
    println!();
    for (j, value) in solution.values.iter().enumerate() {
        println!("  x{:<4} {:12.4}", j + 1, value);
    }
}

fn print_tableau(tableau: &Tableau) {
    print!("  {:>6}", "");
    for col in 0..tableau.num_cols() {
        print!(" {:>10}", tableau.column_label(col));
    }
    println!();

    for (i, row) in tableau.rows().iter().enumerate() {
        let label = if i == 0 { "Z".to_string() } else { format!("R{}", i) };
        print!("  {:>6}", label);
        for value in row {
            print!(" {:>10.4}", value);
        }
        println!();
    }
}
