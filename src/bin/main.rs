use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use log::debug;
use websee::prelude::*;

/// websee - fuzzy scoring of candidate lines
///
/// Reads candidates (one per line) from stdin or a file, scores each of them
/// against the query and prints `candidate<TAB>score` lines in input order.
#[derive(Parser, Debug)]
#[command(name = "websee", args_override_self = true, version, about)]
struct Cli {
    /// Pattern to score every candidate against
    #[arg(short, long, default_value = "")]
    query: String,

    /// Read candidates from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// RON file providing base options, overridden by the flags below
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scoring algorithm: v1 (first occurrence) or v2 (local alignment)
    #[arg(long, value_enum)]
    algo: Option<FuzzyAlgorithm>,

    /// Reward for two equal characters
    #[arg(long, allow_negative_numbers = true)]
    match_score: Option<i64>,

    /// Penalty for two different characters
    #[arg(long, allow_negative_numbers = true)]
    mismatch_score: Option<i64>,

    /// Penalty for an insertion or deletion
    #[arg(long, allow_negative_numbers = true)]
    gap_penalty: Option<i64>,

    /// Case sensitivity
    #[arg(long, value_enum)]
    case: Option<CaseMatching>,

    /// Score candidates on all cores
    #[arg(long)]
    parallel: bool,

    /// Give up when scoring takes longer than this many milliseconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Read NUL-separated candidates
    #[arg(long)]
    read0: bool,

    /// Print NUL after each result instead of a newline
    #[arg(long)]
    print0: bool,
}

impl Cli {
    fn options(&self) -> Result<MatchOptions> {
        let mut options = match &self.config {
            Some(path) => MatchOptions::from_file(path)
                .wrap_err_with(|| format!("failed to load configuration from {}", path.display()))?,
            None => MatchOptions::default(),
        };
        if let Some(algo) = self.algo {
            options.algorithm = algo;
        }
        if let Some(score) = self.match_score {
            options.weights.match_score = score;
        }
        if let Some(score) = self.mismatch_score {
            options.weights.mismatch_score = score;
        }
        if let Some(penalty) = self.gap_penalty {
            options.weights.gap_penalty = penalty;
        }
        if let Some(case) = self.case {
            options.case = case;
        }
        options.parallel |= self.parallel;
        if self.timeout.is_some() {
            options.timeout = self.timeout;
        }
        Ok(options)
    }
}

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();
    if let Err(err) = color_eyre::install() {
        eprintln!("failed to install error report handler: {err}");
    }

    match real_main() {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            // if downstream pipe is closed, exit silently
            if err
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
            {
                std::process::exit(0)
            }
            eprintln!("websee: {err:?}");
            std::process::exit(2)
        }
    }
}

fn parse_args() -> Cli {
    let mut args = Vec::new();

    args.push(env::args().next().unwrap_or_else(|| String::from("websee")));
    args.extend(
        env::var("WEBSEE_DEFAULT_OPTIONS")
            .ok()
            .and_then(|val| shlex::split(&val))
            .unwrap_or_default(),
    );
    args.extend(env::args().skip(1));

    Cli::parse_from(args)
}

fn real_main() -> Result<()> {
    let cli = parse_args();
    let options = cli.options()?;
    debug!("options: {options:?}");

    //------------------------------------------------------------------------------
    // read candidates
    let reader_option = CandidateReaderOption::default().read0(cli.read0);
    let source: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let candidates = read_candidates(source, reader_option)?;

    //------------------------------------------------------------------------------
    // score
    let matcher = Matcher::from_options(&options);
    let control = match options.timeout_duration() {
        Some(timeout) => MatcherControl::default().timeout(timeout),
        None => MatcherControl::default(),
    };
    let results = matcher.run(&candidates, &cli.query, &control)?;

    //------------------------------------------------------------------------------
    // output
    let ending = if cli.print0 { "\0" } else { "\n" };
    let mut stdout = BufWriter::new(io::stdout().lock());
    for result in &results {
        write!(stdout, "{}\t{}{}", result.text, result.score, ending)?;
    }
    stdout.flush()?;

    Ok(())
}
