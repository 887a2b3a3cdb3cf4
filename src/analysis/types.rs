//! Data types shared across the analysis modules

use serde::{Deserialize, Serialize};

/// Overall G+C percentage plus per-codon-position percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionMetrics {
    pub overall: f64,
    /// GC% at codon positions 0, 1 and 2.
    pub position: [f64; 3],
}

/// Per-window GC skew values, one per non-overlapping window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkewSeries {
    pub window: usize,
    pub values: Vec<f64>,
}

impl SkewSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// All 0-based start positions where a compiled motif matches a subject,
/// overlapping matches included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSet {
    /// Expanded pattern, e.g. "A[ACGT]G" for query "ANG".
    pub pattern: String,
    pub positions: Vec<usize>,
}

/// Canonical base counts of a sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseCounts {
    pub a: usize,
    pub c: usize,
    pub g: usize,
    pub t: usize,
}

impl BaseCounts {
    pub fn of(seq: &[u8]) -> Self {
        let mut counts = BaseCounts::default();
        for &b in seq {
            match b.to_ascii_uppercase() {
                b'A' => counts.a += 1,
                b'C' => counts.c += 1,
                b'G' => counts.g += 1,
                b'T' => counts.t += 1,
                _ => {}
            }
        }
        counts
    }
}

/// One amino-acid track of a six-frame row.
///
/// `offset` is the nucleotide column at which the first amino acid sits;
/// each amino acid spans three columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameTrack {
    pub frame: i8,
    pub offset: usize,
    pub amino_acids: String,
}

/// One fixed-width row of the six-frame layout, covering up to 60
/// nucleotides of the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SixFrameRow {
    /// 0-based nucleotide offset of the row.
    pub start: usize,
    pub sequence: String,
    pub complement: String,
    /// GC% of this row's chunk.
    pub gc_percent: f64,
    /// Frames 1, 2, 3.
    pub forward: [FrameTrack; 3],
    /// Frames -1, -2, -3, already reversed to read left-to-right.
    pub reverse: [FrameTrack; 3],
}

/// The complete six-frame layout for a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SixFrameView {
    pub length: usize,
    pub base_counts: BaseCounts,
    /// Overall GC% of the whole sequence.
    pub gc_percent: f64,
    pub rows: Vec<SixFrameRow>,
}

/// A single FASTA record: identifier, remaining header text and the
/// uppercase sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastaRecord {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

/// Thread count configuration for batch processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreadCount {
    /// Use all available CPU cores
    Auto,
    /// Use a specific number of threads
    Fixed(usize),
}

impl Default for ThreadCount {
    fn default() -> Self {
        Self::Auto
    }
}

impl ThreadCount {
    /// Get the actual number of threads to use
    pub fn get_count(&self) -> usize {
        match self {
            Self::Auto => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            Self::Fixed(n) => *n,
        }
    }
}

/// Progress update emitted while a batch runs.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_counts() {
        let counts = BaseCounts::of(b"AACGTNtg");
        assert_eq!(
            counts,
            BaseCounts {
                a: 2,
                c: 1,
                g: 2,
                t: 2
            }
        );
    }

    #[test]
    fn test_thread_count() {
        assert!(ThreadCount::Auto.get_count() >= 1);
        assert_eq!(ThreadCount::Fixed(3).get_count(), 3);
    }
}
