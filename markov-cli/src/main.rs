use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{LevelFilter, debug, info};
use markov_core::io::{read_lines, read_stdin_lines};
use markov_core::{BuildConfig, Mode, TextModel};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(name = "markov", author, version, about = "Generate randomized text with a Markov chain", long_about = None)]
struct Cli {
    /// Text file with one training example per line; "-" or nothing reads stdin
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Number of tokens used as the key for the next token
    #[arg(short = 'n', long, value_name = "N", default_value_t = 1)]
    prefix_len: usize,

    /// Maximum number of tokens to generate; negative means no maximum
    #[arg(long = "max", value_name = "TOKENS", default_value_t = -1, allow_negative_numbers = true)]
    max_tokens: i64,

    /// Generate a word (character tokens) instead of a sentence (word tokens)
    #[arg(short, long)]
    word: bool,

    /// Seed for reproducible output
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Build parallelism; up to WORKERS x 8 partitions are built on their own
    /// threads (defaults to the CPU count)
    #[arg(long, value_name = "COUNT", env = "MARKOV_WORKERS")]
    workers: Option<usize>,

    /// Number of outputs to generate
    #[arg(short, long, value_name = "COUNT", default_value_t = 1)]
    count: usize,

    /// Print chain statistics as JSON instead of generating
    #[arg(long)]
    stats: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let lines = load_corpus(cli.file.as_deref())?;

    let mut config = BuildConfig::new(cli.prefix_len)?;
    if let Some(workers) = cli.workers {
        config.set_workers(workers)?;
    }

    let mode = if cli.word { Mode::Word } else { Mode::Sentence };
    let model = TextModel::train(&lines, config, mode).context("failed to build the chain")?;
    info!(
        "trained {:?} chain on {} lines: {} keys",
        model.mode(),
        lines.len(),
        model.chain().key_count()
    );

    let mut out = io::stdout().lock();
    if cli.stats {
        let stats = serde_json::to_string_pretty(&model.chain().stats())?;
        writeln!(out, "{stats}")?;
        return Ok(());
    }

    // Negative bounds mean "no maximum".
    let max_tokens = usize::try_from(cli.max_tokens).ok();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    for _ in 0..cli.count {
        let text = model
            .generate(&mut rng, max_tokens)
            .context("failed to generate text")?;
        if !write_line(&mut out, &text)? {
            return Ok(());
        }
    }

    out.flush()?;
    Ok(())
}

/// Writes one output line. Returns `false` once the reader has gone away
/// (e.g. `| head -1`), which ends the run without an error.
fn write_line<W: Write>(out: &mut W, text: &str) -> io::Result<bool> {
    match writeln!(out, "{text}") {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(false),
        Err(err) => Err(err),
    }
}

/// Loads the corpus and drops blank lines.
fn load_corpus(file: Option<&Path>) -> Result<Vec<String>> {
    let lines = match file {
        Some(path) if path != Path::new("-") => {
            read_lines(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        _ => read_stdin_lines().context("failed to read standard input")?,
    };

    let total = lines.len();
    let lines: Vec<String> = lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.len() < total {
        debug!("skipped {} blank lines", total - lines.len());
    }
    Ok(lines)
}

fn init_logging(verbose: u8, quiet: u8) {
    let level = if quiet > 0 {
        match quiet {
            1 => LevelFilter::Error,
            _ => LevelFilter::Off,
        }
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp_millis();
    if verbose > 0 || quiet > 0 {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_an_unbounded_sentence_run() {
        let cli = Cli::try_parse_from(["markov", "corpus.txt"]).unwrap();
        assert_eq!(cli.prefix_len, 1);
        assert_eq!(cli.max_tokens, -1);
        assert!(!cli.word);
        assert_eq!(cli.count, 1);
        assert_eq!(cli.file.as_deref(), Some(Path::new("corpus.txt")));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_pipe_stops_output_quietly() {
        assert!(!write_line(&mut ClosedPipe, "a b c").unwrap());
    }

    #[test]
    fn written_lines_end_with_newline() {
        let mut buf = Vec::new();
        assert!(write_line(&mut buf, "a b c").unwrap());
        assert_eq!(buf, b"a b c\n");
    }

    #[test]
    fn negative_max_is_accepted() {
        let cli = Cli::try_parse_from(["markov", "--max", "-5", "-w", "-n", "2"]).unwrap();
        assert_eq!(cli.max_tokens, -5);
        assert!(cli.word);
        assert_eq!(cli.prefix_len, 2);
        assert!(cli.file.is_none());
    }
}
