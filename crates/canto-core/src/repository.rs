//! Read-only queries over the 34 chant files.
//!
//! Every query re-reads the chant files it needs through [`ChantRepository::read_lines`];
//! nothing is cached between calls. Single-chant queries propagate read
//! failures, while corpus-wide aggregates hand them to the configured
//! [`DiagnosticsSink`] and carry on with the remaining chants.

use std::fs;
use std::iter;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::diagnostics::TracingSink;
use crate::error::{Error, Result};
use crate::report::write_json_report;
use crate::traits::DiagnosticsSink;
use crate::types::{ChantNumber, CorpusSummary, LongestChant, ReadOptions, WordCounts, TERCET_LEN};

/// Default location of the word-count report, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "word_counts.json";

pub struct ChantRepository {
    directory: PathBuf,
    report_path: PathBuf,
    diagnostics: Box<dyn DiagnosticsSink>,
}

impl ChantRepository {
    /// Open the chants stored in `directory`, which must already exist.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        if !directory.is_dir() {
            return Err(Error::InvalidDirectory(directory));
        }
        Ok(Self {
            directory,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            diagnostics: Box::new(TracingSink),
        })
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    pub fn with_diagnostics(mut self, sink: impl DiagnosticsSink + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    pub fn chant_path(&self, number: ChantNumber) -> PathBuf {
        self.directory.join(number.file_name())
    }

    /// Verses of chant `number` in file order.
    ///
    /// Unstripped verses keep their line terminator, with `\r\n` and a lone
    /// `\r` normalised to `\n`. The number is validated before the file is opened.
    pub fn read_lines(&self, number: u32, options: ReadOptions) -> Result<Vec<String>> {
        let number = ChantNumber::new(number)?;
        self.read_chant(number, options)
    }

    fn read_chant(&self, number: ChantNumber, options: ReadOptions) -> Result<Vec<String>> {
        let path = self.chant_path(number);
        let text = fs::read_to_string(&path).map_err(|source| Error::Read { path: path.clone(), source })?;

        let verses = split_verses(&text)
            .take(options.limit.unwrap_or(usize::MAX))
            .map(|verse| if options.strip { verse.trim().to_string() } else { verse })
            .collect::<Vec<_>>();
        debug!(chant = number.get(), verses = verses.len(), path = %path.display(), "Read chant");
        Ok(verses)
    }

    pub fn count_verses(&self, number: u32) -> Result<usize> {
        Ok(self.read_lines(number, ReadOptions::default())?.len())
    }

    pub fn count_tercets(&self, number: u32) -> Result<usize> {
        Ok(self.count_verses(number)? / TERCET_LEN)
    }

    /// Non-overlapping, case-sensitive occurrences of `word` in the raw chant text.
    ///
    /// Matches inside longer words count, as do matches spanning a line break.
    pub fn count_word(&self, number: u32, word: &str) -> Result<usize> {
        let text = self.read_lines(number, ReadOptions::default())?.concat();
        Ok(count_substring(&text, word))
    }

    pub fn find_first_verse_with_word(&self, number: u32, word: &str) -> Result<Option<String>> {
        Ok(self
            .read_lines(number, ReadOptions::stripped())?
            .into_iter()
            .find(|verse| verse.contains(word)))
    }

    /// All stripped verses containing `word`, or `None` when there are none.
    pub fn find_all_verses_with_word(&self, number: u32, word: &str) -> Result<Option<Vec<String>>> {
        let matches: Vec<String> = self
            .read_lines(number, ReadOptions::stripped())?
            .into_iter()
            .filter(|verse| verse.contains(word))
            .collect();
        Ok((!matches.is_empty()).then_some(matches))
    }

    /// Longest stripped verse by character count; the earliest one wins ties.
    pub fn longest_verse(&self, number: u32) -> Result<Option<String>> {
        let mut longest = None;
        let mut longest_len = 0;
        for verse in self.read_lines(number, ReadOptions::stripped())? {
            let len = verse.chars().count();
            if longest.is_none() || len > longest_len {
                longest_len = len;
                longest = Some(verse);
            }
        }
        Ok(longest)
    }

    /// Chant with the most verses; the lowest number wins ties.
    ///
    /// Returns `None` if no readable chant has any verse.
    pub fn longest_chant_by_verse_count(&self) -> Option<LongestChant> {
        let mut longest: Option<LongestChant> = None;
        for (number, verses) in self.readable_chants(ReadOptions::default()) {
            let verse_count = verses.len();
            if verse_count > longest.map_or(0, |l| l.verse_count) {
                longest = Some(LongestChant { number, verse_count });
            }
        }
        longest
    }

    /// Count each of `words` in chant `number` and write the result to the
    /// report path, replacing any earlier report.
    pub fn count_word_occurrences<S: AsRef<str>>(&self, number: u32, words: &[S]) -> Result<WordCounts> {
        let text = self.read_lines(number, ReadOptions::default())?.concat();
        let counts: WordCounts = words
            .iter()
            .map(|word| {
                let word = word.as_ref();
                (word.to_string(), count_substring(&text, word))
            })
            .collect();

        write_json_report(&self.report_path, &counts)?;
        debug!(chant = number, words = counts.len(), path = %self.report_path.display(), "Wrote word count report");
        Ok(counts)
    }

    /// Stripped verses of every readable chant, chant by chant.
    pub fn all_verses(&self) -> Vec<String> {
        self.readable_chants(ReadOptions::stripped())
            .flat_map(|(_, verses)| verses)
            .collect()
    }

    pub fn total_verse_count(&self) -> usize {
        self.readable_chants(ReadOptions::default())
            .map(|(_, verses)| verses.len())
            .sum()
    }

    /// Mean character length of the stripped verses across the corpus, or
    /// `0.0` when there are no verses at all.
    pub fn mean_verse_length(&self) -> f64 {
        let (total_len, total_verses) = self
            .readable_chants(ReadOptions::stripped())
            .fold((0usize, 0usize), |(len, count), (_, verses)| {
                (len + total_chars(&verses), count + verses.len())
            });
        mean(total_len, total_verses)
    }

    /// Aggregate statistics over the whole corpus, reading each chant once.
    pub fn corpus_summary(&self) -> CorpusSummary {
        let mut total_verses = 0;
        let mut total_tercets = 0;
        let mut total_len = 0;
        let mut longest_chant: Option<LongestChant> = None;
        let mut unreadable = Vec::new();

        for number in ChantNumber::all() {
            let verses = match self.read_chant(number, ReadOptions::stripped()) {
                Ok(verses) => verses,
                Err(e) => {
                    self.diagnostics.chant_skipped(number, &e);
                    unreadable.push(number);
                    continue;
                }
            };
            let verse_count = verses.len();
            total_verses += verse_count;
            total_tercets += verse_count / TERCET_LEN;
            total_len += total_chars(&verses);
            if verse_count > longest_chant.map_or(0, |l| l.verse_count) {
                longest_chant = Some(LongestChant { number, verse_count });
            }
        }

        CorpusSummary {
            total_verses,
            total_tercets,
            mean_verse_length: mean(total_len, total_verses),
            longest_chant,
            unreadable,
        }
    }

    /// Chants 1..=34 that could be read, in order. Failures go to the
    /// diagnostics sink and are left out.
    fn readable_chants(&self, options: ReadOptions) -> impl Iterator<Item = (ChantNumber, Vec<String>)> + '_ {
        ChantNumber::all().filter_map(move |number| match self.read_chant(number, options) {
            Ok(verses) => Some((number, verses)),
            Err(e) => {
                self.diagnostics.chant_skipped(number, &e);
                None
            }
        })
    }
}

/// Lines of `text`, each ending in `\n` except possibly the last. `\n`,
/// `\r\n` and a lone `\r` all end a line.
fn split_verses(text: &str) -> impl Iterator<Item = String> + '_ {
    let mut rest = text;
    iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.find(['\r', '\n']) else {
            let last = rest.to_string();
            rest = "";
            return Some(last);
        };
        let terminator_len = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        let verse = format!("{}\n", &rest[..end]);
        rest = &rest[end + terminator_len..];
        Some(verse)
    })
}

fn count_substring(text: &str, word: &str) -> usize {
    text.matches(word).count()
}

fn total_chars(verses: &[String]) -> usize {
    verses.iter().map(|verse| verse.chars().count()).sum()
}

fn mean(total_len: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total_len as f64 / count as f64
    }
}
