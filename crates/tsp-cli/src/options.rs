//! Command-line options.
//! The instance comes from `--instance FILE`, `--random N` or stdin.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverKind {
    All,
    Enumerate,
    BranchBound,
}

impl SolverKind {
    pub fn runs_enumerate(self) -> bool {
        matches!(self, SolverKind::All | SolverKind::Enumerate)
    }

    pub fn runs_branch_bound(self) -> bool {
        matches!(self, SolverKind::All | SolverKind::BranchBound)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    File(PathBuf),
    Random {
        nodes: usize,
        seed: u64,
        density: f64,
        max_weight: u32,
    },
    Stdin,
}

fn make_options_parser() -> Command {
    Command::new("tsp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Exact round-trip tours on a distance matrix")
        .arg(
            Arg::new("instance")
                .short('i')
                .long("instance")
                .value_name("FILE")
                .help("Instance JSON file; read from stdin when omitted")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("random")
                .short('r')
                .long("random")
                .value_name("N")
                .help("Generate a random symmetric instance with N nodes")
                .value_parser(value_parser!(usize))
                .conflicts_with("instance"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .default_value("0")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("density")
                .long("density")
                .help("Edge probability of a random instance")
                .default_value("0.6")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("max-weight")
                .long("max-weight")
                .default_value("20")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("start")
                .short('s')
                .long("start")
                .value_name("NAME_OR_INDEX")
                .help("Start node, by label or index")
                .default_value("0"),
        )
        .arg(
            Arg::new("solver")
                .long("solver")
                .default_value("all")
                .value_parser(["all", "enumerate", "branch-bound"]),
        )
        .arg(
            Arg::new("table")
                .short('t')
                .long("table")
                .help("List every enumerated tour")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print a JSON report")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count),
        )
}

#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub source: Source,
    pub start: String,
    pub solver: SolverKind,
    pub table: bool,
    pub json: bool,
    pub verbose: u8,
}

impl Options {
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = make_options_parser().try_get_matches_from(args)?;

        let source = if let Some(path) = matches.get_one::<PathBuf>("instance") {
            Source::File(path.clone())
        } else if let Some(&nodes) = matches.get_one::<usize>("random") {
            Source::Random {
                nodes,
                seed: matches.get_one::<u64>("seed").copied().unwrap_or(0),
                density: matches.get_one::<f64>("density").copied().unwrap_or(0.6),
                max_weight: matches.get_one::<u32>("max-weight").copied().unwrap_or(20),
            }
        } else {
            Source::Stdin
        };

        let solver = match matches.get_one::<String>("solver").map(String::as_str) {
            Some("enumerate") => SolverKind::Enumerate,
            Some("branch-bound") => SolverKind::BranchBound,
            _ => SolverKind::All,
        };

        Ok(Options {
            source,
            start: matches
                .get_one::<String>("start")
                .cloned()
                .unwrap_or_else(|| "0".to_string()),
            solver,
            table: matches.get_flag("table"),
            json: matches.get_flag("json"),
            verbose: matches.get_count("verbose"),
        })
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
