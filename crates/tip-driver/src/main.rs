//! CLI entry point: wires lexing/parsing, type analysis and sign analysis
//! into the five-step pipeline of §10.2.

mod cli;
mod error;

use std::fs;
use std::process::ExitCode;

use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::CliError;
use tip_syntax::{parse_program, Expr, Program};
use tip_ty::{resolve_for_display, Type, UnificationSolver};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn init_tracing(explicit: Option<&str>) {
    let filter = match explicit {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let program = read_and_parse(&cli.input)?;

    let mut solver = collect_and_unify(&program)?;

    if cli.types {
        print_type_relation(&mut solver, &program);
    }

    if cli.signs {
        print_sign_analysis(&program);
    }

    Ok(())
}

#[tracing::instrument(skip_all, fields(path = %path.display()))]
fn read_and_parse(path: &std::path::Path) -> Result<Program, CliError> {
    let src = fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    let program = parse_program(&src)?;
    Ok(program)
}

#[tracing::instrument(skip_all)]
fn collect_and_unify(program: &Program) -> Result<UnificationSolver, CliError> {
    let collected = tip_ty::collect(program);
    tracing::info!(constraints = collected.constraints.len(), "collected type constraints");
    let solver = UnificationSolver::solve(&collected.constraints)?;
    Ok(solver)
}

fn print_type_relation(solver: &mut UnificationSolver, program: &Program) {
    println!("-- type relation --");
    let mut exprs: Vec<Expr> = solver
        .keys()
        .filter_map(|t| match t {
            Type::ExprVar(e) => Some((**e).clone()),
            _ => None,
        })
        .collect();
    exprs.sort_by_key(|e| e.to_string());
    exprs.dedup();

    let _ = program;
    for e in exprs {
        let var = Type::expr_var(e.clone());
        let resolved = resolve_for_display(solver, &var);
        println!("[[{e}]] → {resolved}");
    }
}

#[tracing::instrument(skip_all)]
fn print_sign_analysis(program: &Program) {
    println!("-- sign analysis --");
    let Some(main) = program.main() else {
        println!("(no `main` function; sign analysis skipped)");
        return;
    };
    let cfg = tip_cfg::build_cfg(main);
    let result = tip_sign::solve(&cfg, &main.params);

    for id in cfg.node_ids() {
        let env = result.out_env(id);
        let mut bindings: Vec<(String, String)> =
            env.iter().map(|(x, s)| (x.to_string(), s.to_string())).collect();
        bindings.sort();
        let row = bindings.iter().map(|(x, s)| format!("{x}:{s}")).collect::<Vec<_>>().join(", ");
        println!("{{{row}}}");
    }
}
