//! `canto` command-line entrypoint.
//!
//! Thin wrapper over `canto_core::ChantRepository`: resolves the chant
//! directory from flags or configuration, runs one query and prints it.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use canto_core::config::{expand_path, Config};
use canto_core::{ChantNumber, ChantRepository, ReadOptions};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "canto", about = "Read-only queries over the 34 chants of the Inferno")]
struct Cli {
    /// Directory containing Canto_1.txt .. Canto_34.txt (defaults to data.chants_dir)
    #[arg(long, global = true)]
    dir: Option<String>,

    /// Where `words` writes its JSON report (defaults to report.path)
    #[arg(long, global = true)]
    report: Option<String>,

    /// Directory holding config.toml; relative paths in it resolve from here
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the verses of a chant
    Lines {
        #[arg(value_parser = ChantNumber::from_str)]
        chant: ChantNumber,
        #[arg(long)]
        strip: bool,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Number of verses in a chant
    Verses {
        #[arg(value_parser = ChantNumber::from_str)]
        chant: ChantNumber,
    },
    /// Number of complete tercets in a chant
    Tercets {
        #[arg(value_parser = ChantNumber::from_str)]
        chant: ChantNumber,
    },
    /// Occurrences of a word (raw substring, case-sensitive)
    Count {
        #[arg(value_parser = ChantNumber::from_str)]
        chant: ChantNumber,
        word: String,
    },
    /// First verse containing a word
    First {
        #[arg(value_parser = ChantNumber::from_str)]
        chant: ChantNumber,
        word: String,
    },
    /// Every verse containing a word
    All {
        #[arg(value_parser = ChantNumber::from_str)]
        chant: ChantNumber,
        word: String,
    },
    /// Longest verse of a chant
    LongestVerse {
        #[arg(value_parser = ChantNumber::from_str)]
        chant: ChantNumber,
    },
    /// Chant with the most verses
    LongestChant,
    /// Count several words and write the JSON report
    Words {
        #[arg(value_parser = ChantNumber::from_str)]
        chant: ChantNumber,
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Every verse of the corpus, in order
    Corpus,
    /// Total number of verses in the corpus
    Total,
    /// Mean verse length across the corpus
    Mean,
    /// Corpus-wide statistics as JSON
    Summary,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
    Config::load_from_dir(&cli.config_dir, &env_name).context("Error loading config")
}

/// Chant directory and report path: flags are taken as typed, config values
/// are resolved against the config directory.
fn resolve_paths(cli: &Cli, config: &Config) -> Result<(PathBuf, PathBuf)> {
    let dir = match &cli.dir {
        Some(dir) => expand_path(dir),
        None => config.chants_dir()?,
    };
    let report = match &cli.report {
        Some(report) => expand_path(report),
        None => config.report_path()?,
    };
    Ok((dir, report))
}

fn open_repository(cli: &Cli) -> Result<ChantRepository> {
    let config = load_config(cli)?;
    let (dir, report) = resolve_paths(cli, &config)?;
    info!(dir = %dir.display(), report = %report.display(), "Opening chants");

    let repo = ChantRepository::new(&dir)
        .with_context(|| format!("Cannot open chant directory {}", dir.display()))?;
    Ok(repo.with_report_path(report))
}

fn print_or_not_found(verse: Option<String>, chant: ChantNumber, word: &str) {
    match verse {
        Some(verse) => println!("{}", verse),
        None => println!("No verse of chant {} contains {:?}", chant, word),
    }
}

fn run(cli: &Cli, repo: &ChantRepository) -> Result<()> {
    match &cli.command {
        Command::Lines { chant, strip, limit } => {
            let options = ReadOptions { strip: *strip, limit: *limit };
            for verse in repo.read_lines(chant.get(), options)? {
                if *strip {
                    println!("{}", verse);
                } else {
                    print!("{}", verse);
                }
            }
        }
        Command::Verses { chant } => println!("{}", repo.count_verses(chant.get())?),
        Command::Tercets { chant } => println!("{}", repo.count_tercets(chant.get())?),
        Command::Count { chant, word } => println!("{}", repo.count_word(chant.get(), word)?),
        Command::First { chant, word } => {
            print_or_not_found(repo.find_first_verse_with_word(chant.get(), word)?, *chant, word)
        }
        Command::All { chant, word } => match repo.find_all_verses_with_word(chant.get(), word)? {
            Some(verses) => verses.iter().for_each(|verse| println!("{}", verse)),
            None => println!("No verse of chant {} contains {:?}", chant, word),
        },
        Command::LongestVerse { chant } => match repo.longest_verse(chant.get())? {
            Some(verse) => println!("{}", verse),
            None => println!("Chant {} has no verses", chant),
        },
        Command::LongestChant => match repo.longest_chant_by_verse_count() {
            Some(longest) => println!("{}", serde_json::to_string_pretty(&longest)?),
            None => println!("No readable chant has any verse"),
        },
        Command::Words { chant, words } => {
            let counts = repo.count_word_occurrences(chant.get(), words.as_slice())?;
            println!("{}", serde_json::to_string_pretty(&counts)?);
            info!(report = %repo.report_path().display(), "Report written");
        }
        Command::Corpus => repo.all_verses().iter().for_each(|verse| println!("{}", verse)),
        Command::Total => println!("{}", repo.total_verse_count()),
        Command::Mean => println!("{}", repo.mean_verse_length()),
        Command::Summary => println!("{}", serde_json::to_string_pretty(&repo.corpus_summary())?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let repo = open_repository(&cli)?;
    run(&cli, &repo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["canto", "words", "1", "mi", "vita", "--dir", "/tmp/chants", "-vv"]).unwrap();
        assert_eq!(cli.dir.as_deref(), Some("/tmp/chants"));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Words { chant, words } => {
                assert_eq!(chant.get(), 1);
                assert_eq!(words, vec!["mi", "vita"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_invalid_chant_numbers() {
        assert!(Cli::try_parse_from(["canto", "verses", "35"]).is_err());
        assert!(Cli::try_parse_from(["canto", "verses", "0"]).is_err());
        assert!(Cli::try_parse_from(["canto", "verses", "primo"]).is_err());
    }

    #[test]
    fn lines_options() {
        let cli = Cli::try_parse_from(["canto", "lines", "3", "--strip", "--limit", "6"]).unwrap();
        match cli.command {
            Command::Lines { chant, strip, limit } => {
                assert_eq!(chant.get(), 3);
                assert!(strip);
                assert_eq!(limit, Some(6));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn config_paths_resolve_against_config_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[data]\nchants_dir = \"inferno\"\n\n[report]\npath = \"out/counts.json\"\n",
        )
        .unwrap();
        let config_dir = tmp.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["canto", "total", "--config-dir", &config_dir]).unwrap();
        let config = Config::load_from_dir(&cli.config_dir, "test").unwrap();
        let (dir, report) = resolve_paths(&cli, &config).unwrap();
        assert_eq!(dir, tmp.path().join("inferno"));
        assert_eq!(report, tmp.path().join("out/counts.json"));

        let cli = Cli::try_parse_from(["canto", "total", "--config-dir", &config_dir, "--dir", "canti", "--report", "/tmp/r.json"]).unwrap();
        let (dir, report) = resolve_paths(&cli, &config).unwrap();
        assert_eq!(dir, PathBuf::from("canti"));
        assert_eq!(report, PathBuf::from("/tmp/r.json"));
    }

    #[test]
    fn words_requires_at_least_one_word() {
        assert!(Cli::try_parse_from(["canto", "words", "1"]).is_err());
    }
}
