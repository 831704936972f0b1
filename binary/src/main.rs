use std::{fs::File, io::BufReader, path::PathBuf, process::ExitCode, time::Instant};

use clap::{Parser, ValueEnum};
use log::info;
use process_tree_miner::{
    discover_process_tree, InductiveMinerConfig, InductiveMinerVariant, LogAbstraction,
};

/// Discover a process tree from a JSON log abstraction
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a JSON `LogAbstraction` (trace variants or directly-follows graph)
    path: PathBuf,
    /// Inductive Miner variant
    #[arg(long, value_enum, default_value_t = Variant::Im)]
    variant: Variant,
    /// Shorthand for `--variant imd`
    #[arg(long, conflicts_with = "variant")]
    imd: bool,
    /// Discover sibling subtrees in parallel
    #[arg(long)]
    parallel: bool,
    /// Use the maximal sequence cut without merging non-uniform skips
    #[arg(long)]
    relaxed_sequence_cut: bool,
    /// Do not split off empty traces before checking for base cases
    #[arg(long)]
    no_empty_traces_first: bool,
    /// Disable the activity-concurrent fall-through
    #[arg(long)]
    no_activity_concurrent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    Im,
    Imd,
}

impl Cli {
    fn variant(&self) -> InductiveMinerVariant {
        match (self.imd, self.variant) {
            (true, _) | (false, Variant::Imd) => InductiveMinerVariant::IMd,
            (false, Variant::Im) => InductiveMinerVariant::IM,
        }
    }

    fn config(&self) -> InductiveMinerConfig {
        InductiveMinerConfig {
            strict_sequence_cut: !self.relaxed_sequence_cut,
            empty_traces_first: !self.no_empty_traces_first,
            activity_concurrent_fall_through: !self.no_activity_concurrent,
            parallel: self.parallel,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let now = Instant::now();
    let abstraction: LogAbstraction = match File::open(&cli.path)
        .map_err(|e| e.to_string())
        .and_then(|f| serde_json::from_reader(BufReader::new(f)).map_err(|e| e.to_string()))
    {
        Ok(abstraction) => abstraction,
        Err(e) => {
            eprintln!("Error while reading {}: {}", cli.path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    info!("Read {} in {:#?}", abstraction.kind(), now.elapsed());

    let variant = cli.variant();
    let now = Instant::now();
    match discover_process_tree(&abstraction, variant, &cli.config()) {
        Ok(tree) => {
            println!("Discovered process tree using {} in {:#?}", variant, now.elapsed());
            println!("{}", tree);
            println!("{}", tree.to_json());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["binary", "log.json"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("log.json"));
        assert_eq!(cli.variant(), InductiveMinerVariant::IM);
        assert_eq!(cli.config(), InductiveMinerConfig::default());
    }

    #[test]
    fn config_switches() {
        let cli = Cli::try_parse_from([
            "binary",
            "log.json",
            "--imd",
            "--parallel",
            "--relaxed-sequence-cut",
            "--no-empty-traces-first",
            "--no-activity-concurrent",
        ])
        .unwrap();
        assert_eq!(cli.variant(), InductiveMinerVariant::IMd);
        let config = cli.config();
        assert!(config.parallel);
        assert!(!config.strict_sequence_cut);
        assert!(!config.empty_traces_first);
        assert!(!config.activity_concurrent_fall_through);

        let cli = Cli::try_parse_from(["binary", "--variant", "imd", "log.json"]).unwrap();
        assert_eq!(cli.variant(), InductiveMinerVariant::IMd);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["binary", "log.json", "--imd", "--bogus"]).is_err());
        assert!(Cli::try_parse_from(["binary", "--imd"]).is_err());
        assert!(Cli::try_parse_from(["binary", "log.json", "--imd", "--variant", "im"]).is_err());
    }
}
