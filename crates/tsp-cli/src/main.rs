#![deny(clippy::all)]

mod memory;
mod options;
mod report;

use std::time::Instant;

use anyhow::Context;
use log::{info, warn};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tsp_branch_bound::BranchAndBound;
use tsp_core::{random_instance, Instance};
use tsp_enumerate::Enumerator;

use memory::{bytes_in_kilobytes, MemoryWatcher, PeakAlloc};
use options::{Options, Source};
use report::{BranchBoundReport, EnumerationReport, Report};

#[global_allocator]
static GLOBAL: PeakAlloc = PeakAlloc;

// Enumerated results grow factorially beyond this
const ENUMERATE_WARN_NODES: usize = 12;

fn load_instance(source: &Source) -> anyhow::Result<Instance> {
    match source {
        Source::File(path) => Instance::read_json(path)
            .with_context(|| format!("failed to read instance {}", path.display())),
        Source::Random {
            nodes,
            seed,
            density,
            max_weight,
        } => {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(*seed);
            random_instance(&mut rng, *nodes, *density, *max_weight)
                .context("invalid random instance parameters")
        }
        Source::Stdin => {
            let stdin = std::io::stdin().lock();
            Instance::from_reader(stdin).context("failed to read instance from stdin")
        }
    }
}

fn elapsed_millis(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1e3
}

fn run(options: &Options, instance: &Instance) -> anyhow::Result<Report> {
    let matrix = instance.matrix();
    let start = instance
        .resolve_node(&options.start)
        .with_context(|| format!("invalid start node {:?}", options.start))?;
    let start_label = instance.label(start).unwrap_or_default().to_string();
    info!("solving {} nodes from {start_label} ({start})", matrix.len());

    let enumeration = if options.solver.runs_enumerate() {
        if matrix.len() > ENUMERATE_WARN_NODES {
            warn!(
                "enumerating every tour on {} nodes, result set may not fit in memory",
                matrix.len()
            );
        }
        let mut enumerator = Enumerator::new(matrix);
        let watcher = MemoryWatcher::start();
        let timer = Instant::now();
        let count = enumerator.enumerate(start)?;
        let millis = elapsed_millis(timer);
        let peak_kb = bytes_in_kilobytes(watcher.stop());

        Some(EnumerationReport {
            count,
            best: enumerator.best(),
            tours: if options.table {
                enumerator.into_tours()
            } else {
                Vec::new()
            },
            millis,
            peak_kb,
        })
    } else {
        None
    };

    let branch_bound = if options.solver.runs_branch_bound() {
        let mut solver = BranchAndBound::new(matrix);
        solver.reset();
        let watcher = MemoryWatcher::start();
        let timer = Instant::now();
        solver.search(start)?;
        let millis = elapsed_millis(timer);
        let peak_kb = bytes_in_kilobytes(watcher.stop());

        let stats = solver.stats();
        Some(BranchBoundReport {
            best: solver.best(),
            expanded: stats.expanded,
            pruned: stats.pruned,
            improvements: stats.improvements,
            millis,
            peak_kb,
        })
    } else {
        None
    };

    Ok(Report {
        nodes: matrix.len(),
        start,
        start_label,
        coordinates: instance.coordinates().map(<[_]>::to_vec),
        enumeration,
        branch_bound,
    })
}

fn main() -> anyhow::Result<()> {
    let options = match Options::parse_from_args(std::env::args_os()) {
        Ok(options) => options,
        Err(err) => err.exit(),
    };

    let env = env_logger::Env::new()
        .filter_or("TSP_LOG", options.log_level())
        .write_style("TSP_LOG_STYLE");
    env_logger::init_from_env(env);
    log::debug!("options: {:?}", options);

    let instance = load_instance(&options.source)?;
    let report = run(&options, &instance)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text(&instance)?);
    }

    Ok(())
}
