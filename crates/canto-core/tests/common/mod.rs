#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use canto_core::{ChantNumber, DiagnosticsSink, Error};
use tempfile::TempDir;

pub const OPENING: &str = "Nel mezzo del cammin\ndi nostra vita\nmi ritrovai\n";

pub fn write_chant(dir: &Path, number: u32, content: &str) {
    fs::write(dir.join(format!("Canto_{}.txt", number)), content).unwrap();
}

/// A full corpus where chant `n` holds `n` verses of the form `verso <n>.<i>`.
pub fn full_corpus() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for n in 1..=34 {
        let content: String = (1..=n).map(|i| format!("verso {}.{}\n", n, i)).collect();
        write_chant(tmp.path(), n, &content);
    }
    tmp
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    skipped: Arc<Mutex<Vec<u32>>>,
}

impl RecordingSink {
    pub fn skipped(&self) -> Vec<u32> {
        self.skipped.lock().unwrap().clone()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn chant_skipped(&self, number: ChantNumber, error: &Error) {
        assert!(matches!(error, Error::Read { .. }), "unexpected error: {}", error);
        self.skipped.lock().unwrap().push(number.get());
    }
}
