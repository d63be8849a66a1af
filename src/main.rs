use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use hub_select::cache::cached_catalog;
use hub_select::config::RunConfig;
use hub_select::solver::build_solver;
use hub_select::{export, optimize_with};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Find the smallest sets of courses that cover the requested requirements.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML run configuration (requirements, filters, solver).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Course table (.csv or .xlsx); overrides `data` from the configuration.
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Extra requirement as `NAME=COUNT`; may be repeated.
    #[arg(short = 'r', long = "require", value_parser = parse_requirement)]
    requirements: Vec<(String, u32)>,

    /// Maximum number of distinct solutions to report.
    #[arg(short = 'n', long)]
    max_solutions: Option<usize>,

    /// Binary catalog cache; used when it matches the course table, rebuilt otherwise.
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Also write the solutions to this workbook.
    #[arg(long)]
    export: Option<PathBuf>,
}

fn parse_requirement(s: &str) -> Result<(String, u32)> {
    let (name, count) = s
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("expected NAME=COUNT, got `{s}`"))?;
    let count = count
        .trim()
        .parse()
        .with_context(|| format!("invalid count in `{s}`"))?;
    Ok((name.trim().to_string(), count))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => RunConfig::default(),
    };
    for (name, count) in args.requirements {
        config.requirements.insert(name, count);
    }
    if let Some(n) = args.max_solutions {
        config.max_solutions = n;
    }
    config.validate()?;

    let Some(data) = args.data.or(config.data.clone()) else {
        bail!("no course table given: pass --data or set `data` in the configuration");
    };
    if config.requirements.is_empty() {
        bail!("no requirements given: pass --require or list them in the configuration");
    }

    let catalog = cached_catalog(&data, args.cache.as_deref())
        .with_context(|| format!("reading course table {}", data.display()))?;
    let candidates = config.filters.apply(&catalog);
    let mut solver = build_solver(&config.solver)?;
    let solutions = optimize_with(&mut *solver, &candidates, &config.requirements, config.max_solutions)
        .context("course selection failed")?;

    if solutions.is_empty() {
        println!("No course selection satisfies the requirements.");
    }
    for (idx, solution) in solutions.iter().enumerate() {
        println!("\nSolution {}:", idx + 1);
        for course in &solution.courses {
            println!("- {course}");
        }
    }

    if let Some(path) = &args.export {
        export::write_solutions(path, &solutions).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
