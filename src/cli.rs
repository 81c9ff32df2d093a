use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Comma-separated list of positive integers, e.g. `1,2,3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntList(pub Vec<u32>);

/// Parse a comma-separated list of positive integers.
///
/// Whitespace around items and empty items are ignored; a list with no
/// items is rejected.
pub fn parse_int_list(value: &str) -> Result<IntList, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return Err("Empty list".to_string());
    }

    let mut parsed = Vec::with_capacity(parts.len());
    for part in parts {
        let n: i64 = part.parse().map_err(|_| format!("Invalid int list: {}", value))?;
        if n <= 0 {
            return Err("All values must be positive integers".to_string());
        }
        let n = u32::try_from(n).map_err(|_| format!("Value too large: {}", n))?;
        parsed.push(n);
    }
    Ok(IntList(parsed))
}

/// Parse a single integer >= 1
pub fn parse_positive(value: &str) -> Result<u32, String> {
    let n: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid integer: {}", value))?;
    if n < 1 {
        return Err(format!("must be >= 1 (got {})", n));
    }
    u32::try_from(n).map_err(|_| format!("Value too large: {}", n))
}

#[derive(Parser)]
#[command(
    name = "storm-bench",
    about = "Run and benchmark Storm article-writing agents",
    version,
    after_help = "Logs are written to: ~/.local/share/storm-bench/logs/storm-bench.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to storm-bench.yaml config file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write one article and print its graph data
    Write(WriteArgs),

    /// Benchmark write across a personas x questions x sections grid
    Bench(BenchArgs),

    /// Print the summary table (and optional plot) for saved results
    Report {
        /// Results file written by `bench` (.csv or .jsonl)
        input: PathBuf,

        /// Also render the plot
        #[arg(long)]
        plot: bool,

        /// Plot output path
        #[arg(long)]
        out_plot: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct WriteArgs {
    /// Article topic
    #[arg(long, default_value = "Internet of Things")]
    pub topic: String,

    /// Number of expert personas
    #[arg(long, default_value = "2", value_parser = parse_positive)]
    pub personas: u32,

    /// Questions per persona
    #[arg(long, default_value = "1", value_parser = parse_positive)]
    pub questions: u32,

    /// Article sections
    #[arg(long, default_value = "4", value_parser = parse_positive)]
    pub sections: u32,

    /// Markdown output path (defaults to the topic name, e.g. internet_of_things.md)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Use the mock agent (no API calls)
    #[arg(long)]
    pub mock: bool,

    /// Do not print events while writing
    #[arg(long)]
    pub quiet_events: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BenchArgs {
    /// Article topic
    #[arg(long, default_value = "Internet of Things")]
    pub topic: String,

    /// Persona counts, comma-separated, e.g. 1,2,3
    #[arg(long, default_value = "1,2", value_parser = parse_int_list)]
    pub personas: IntList,

    /// Question counts, comma-separated, e.g. 1
    #[arg(long, default_value = "1", value_parser = parse_int_list)]
    pub questions: IntList,

    /// Section counts, comma-separated, e.g. 1,2,3
    #[arg(long, default_value = "1,2", value_parser = parse_int_list)]
    pub sections: IntList,

    /// Repeats per configuration (>= 1)
    #[arg(long, default_value = "1", value_parser = parse_positive)]
    pub runs: u32,

    /// Use the mock agent (no API calls)
    #[arg(long, alias = "test-mode")]
    pub mock: bool,

    /// Print agent events while running
    #[arg(long)]
    pub print_events: bool,

    /// CSV output path
    #[arg(long)]
    pub out_csv: Option<PathBuf>,

    /// JSONL output path
    #[arg(long)]
    pub out_jsonl: Option<PathBuf>,

    /// Render a plot of the results
    #[arg(long)]
    pub plot: bool,

    /// Plot output path
    #[arg(long)]
    pub out_plot: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_int_list() {
        assert_eq!(parse_int_list("1,2,3").unwrap(), IntList(vec![1, 2, 3]));
        assert_eq!(parse_int_list(" 3 , 1 ").unwrap(), IntList(vec![3, 1]));
        assert_eq!(parse_int_list("1,,2,").unwrap(), IntList(vec![1, 2]));
    }

    #[test]
    fn test_parse_int_list_rejects() {
        assert_eq!(parse_int_list("").unwrap_err(), "Empty list");
        assert_eq!(parse_int_list(" , ").unwrap_err(), "Empty list");
        assert_eq!(parse_int_list("1,-2,3").unwrap_err(), "All values must be positive integers");
        assert_eq!(parse_int_list("0").unwrap_err(), "All values must be positive integers");
        assert!(parse_int_list("1,two").unwrap_err().starts_with("Invalid int list"));
        assert!(parse_int_list("1.5").is_err());
        assert!(parse_int_list("99999999999").is_err());
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("3").unwrap(), 3);
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("-1").is_err());
        assert!(parse_positive("x").is_err());
    }

    #[test]
    fn test_bench_defaults() {
        let cli = Cli::try_parse_from(["storm-bench", "bench"]).unwrap();
        let Commands::Bench(args) = cli.command else {
            panic!("expected bench");
        };
        assert_eq!(args.topic, "Internet of Things");
        assert_eq!(args.personas, IntList(vec![1, 2]));
        assert_eq!(args.questions, IntList(vec![1]));
        assert_eq!(args.sections, IntList(vec![1, 2]));
        assert_eq!(args.runs, 1);
        assert!(!args.mock);
    }

    #[test]
    fn test_bench_rejects_zero_runs() {
        let err = Cli::try_parse_from(["storm-bench", "bench", "--runs", "0"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_bench_rejects_bad_list() {
        assert!(Cli::try_parse_from(["storm-bench", "bench", "--personas", "1,-2,3"]).is_err());
        assert!(Cli::try_parse_from(["storm-bench", "bench", "--sections", ""]).is_err());
    }

    #[test]
    fn test_test_mode_alias() {
        let cli = Cli::try_parse_from(["storm-bench", "bench", "--test-mode"]).unwrap();
        let Commands::Bench(args) = cli.command else {
            panic!("expected bench");
        };
        assert!(args.mock);
    }

    #[test]
    fn test_write_defaults() {
        let cli = Cli::try_parse_from(["storm-bench", "write"]).unwrap();
        let Commands::Write(args) = cli.command else {
            panic!("expected write");
        };
        assert_eq!((args.personas, args.questions, args.sections), (2, 1, 4));
        assert!(args.out.is_none());
    }
}
