//! Fixed operation registry and batch application
//!
//! Operations form a closed, explicitly enumerated set: a name is resolved
//! through [`Operation::build`], which validates every parameter up front,
//! and an unknown name is an `UnknownOperation` error. The supported name
//! list is authored by hand, never derived from runtime introspection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;

use rayon::prelude::*;
use serde::Serialize;

use super::composition::{gc123, gc_content, gc_skew};
use super::error::{AnalysisError, Result};
use super::iupac::{antiparallel, complement, molecular_weight, reverse};
use super::motif::{search, MotifPattern};
use super::sixframe::six_frame_view;
use super::translate::{translate_with_table, Frame};
use super::types::{
    BatchProgress, CompositionMetrics, FastaRecord, MatchSet, SixFrameView, SkewSeries,
    ThreadCount,
};
use super::codon::GeneticCode;

/// The full set of operation names, in the order `--describe` lists them.
pub const SUPPORTED_OPERATIONS: &[&str] = &[
    "complement",
    "reverse",
    "antiparallel",
    "molecular-weight",
    "gc-content",
    "gc123",
    "gc-skew",
    "translate",
    "six-frame",
    "search",
];

/// Parameters an operation may pick from when it is built.
#[derive(Debug, Clone)]
pub struct OperationParams {
    /// Reading frame for `translate`.
    pub frame: i8,
    /// NCBI genetic code table id for `translate` and `six-frame`.
    pub table: u8,
    /// Window size for `gc-skew`.
    pub window: usize,
    /// IUPAC query for `search`.
    pub pattern: Option<String>,
}

impl Default for OperationParams {
    fn default() -> Self {
        Self {
            frame: 1,
            table: 1,
            window: 100,
            pattern: None,
        }
    }
}

/// One fully validated operation of the closed set.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Complement,
    Reverse,
    Antiparallel,
    MolecularWeight,
    GcContent,
    Gc123,
    GcSkew { window: usize },
    Translate { frame: i8, table: u8 },
    SixFrame { table: u8 },
    Search { pattern: MotifPattern },
}

impl Operation {
    /// Resolve an operation name and validate its parameters.
    ///
    /// Fails fast: bad frames, unknown table ids, zero windows and broken
    /// patterns are rejected here, before any record is touched.
    pub fn build(name: &str, params: &OperationParams) -> Result<Self> {
        match name {
            "complement" => Ok(Self::Complement),
            "reverse" => Ok(Self::Reverse),
            "antiparallel" => Ok(Self::Antiparallel),
            "molecular-weight" => Ok(Self::MolecularWeight),
            "gc-content" => Ok(Self::GcContent),
            "gc123" => Ok(Self::Gc123),
            "gc-skew" => {
                if params.window == 0 {
                    return Err(AnalysisError::InvalidArgument(
                        "window size must be > 0".to_string(),
                    ));
                }
                Ok(Self::GcSkew {
                    window: params.window,
                })
            }
            "translate" => {
                Frame::new(params.frame)?;
                GeneticCode::from_id(params.table)?;
                Ok(Self::Translate {
                    frame: params.frame,
                    table: params.table,
                })
            }
            "six-frame" => {
                GeneticCode::from_id(params.table)?;
                Ok(Self::SixFrame {
                    table: params.table,
                })
            }
            "search" => {
                let pattern = params.pattern.as_deref().ok_or_else(|| {
                    AnalysisError::InvalidArgument(
                        "search requires a pattern".to_string(),
                    )
                })?;
                Ok(Self::Search {
                    pattern: MotifPattern::compile(pattern.as_bytes())?,
                })
            }
            other => Err(AnalysisError::UnknownOperation(other.to_string())),
        }
    }

    /// The registry name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Complement => "complement",
            Self::Reverse => "reverse",
            Self::Antiparallel => "antiparallel",
            Self::MolecularWeight => "molecular-weight",
            Self::GcContent => "gc-content",
            Self::Gc123 => "gc123",
            Self::GcSkew { .. } => "gc-skew",
            Self::Translate { .. } => "translate",
            Self::SixFrame { .. } => "six-frame",
            Self::Search { .. } => "search",
        }
    }

    /// Apply the operation to one sequence.
    pub fn apply(&self, seq: &[u8]) -> Result<OperationOutput> {
        match self {
            Self::Complement => Ok(OperationOutput::Sequence(bytes_to_string(complement(seq)?))),
            Self::Reverse => Ok(OperationOutput::Sequence(bytes_to_string(reverse(seq)))),
            Self::Antiparallel => Ok(OperationOutput::Sequence(bytes_to_string(antiparallel(
                seq,
            )?))),
            Self::MolecularWeight => Ok(OperationOutput::Weight(molecular_weight(seq)?)),
            Self::GcContent => Ok(OperationOutput::GcPercent(gc_content(seq))),
            Self::Gc123 => Ok(OperationOutput::Composition(gc123(seq))),
            Self::GcSkew { window } => Ok(OperationOutput::Skew(gc_skew(seq, *window)?)),
            Self::Translate { frame, table } => Ok(OperationOutput::Protein(bytes_to_string(
                translate_with_table(seq, *frame, *table)?,
            ))),
            Self::SixFrame { table } => {
                Ok(OperationOutput::SixFrame(six_frame_view(seq, *table)?))
            }
            Self::Search { pattern } => Ok(OperationOutput::Matches(search(seq, pattern))),
        }
    }
}

fn bytes_to_string(bytes: Vec<u8>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Typed result of applying an operation to one sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationOutput {
    Sequence(String),
    Weight(f64),
    GcPercent(f64),
    Composition(CompositionMetrics),
    Skew(SkewSeries),
    Protein(String),
    Matches(MatchSet),
    SixFrame(SixFrameView),
}

impl OperationOutput {
    /// Whether the result carries nothing worth reporting; batch processing
    /// drops these. Scalar and structured outputs always count as results.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Sequence(s) | Self::Protein(s) => s.is_empty(),
            Self::Matches(m) => m.positions.is_empty(),
            Self::Skew(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// Apply one operation to every record on a rayon pool.
///
/// Records are independent and the tables are read-only, so the batch is
/// embarrassingly parallel. The first validation error aborts the batch;
/// empty outputs are dropped; result order follows record order. Progress
/// updates are sent best-effort and never block the workers.
pub fn apply_to_records(
    records: &[FastaRecord],
    operation: &Operation,
    threads: ThreadCount,
    progress_tx: Option<Sender<BatchProgress>>,
) -> Result<Vec<(String, OperationOutput)>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.get_count())
        .build()
        .unwrap_or_else(|_| {
            // Fallback to default pool if custom pool fails
            rayon::ThreadPoolBuilder::new().build().unwrap()
        });

    let total = records.len();
    let completed = AtomicUsize::new(0);

    let results: Result<Vec<(String, OperationOutput)>> = pool.install(|| {
        records
            .par_iter()
            .map(|record| {
                let output = operation.apply(record.sequence.as_bytes())?;

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(tx) = &progress_tx {
                    // Only send periodic updates to avoid flooding the channel
                    if done % 10 == 0 || done == total {
                        let _ = tx.send(BatchProgress {
                            completed: done,
                            total,
                            message: format!("{}: {}/{} records", operation.name(), done, total),
                        });
                    }
                }

                Ok((record.id.clone(), output))
            })
            .collect()
    });

    let mut results = results?;
    results.retain(|(_, output)| !output.is_empty());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fasta::parse_fasta;

    #[test]
    fn test_every_supported_name_builds() {
        let params = OperationParams {
            pattern: Some("ANG".to_string()),
            ..Default::default()
        };
        for name in SUPPORTED_OPERATIONS {
            let op = Operation::build(name, &params).unwrap();
            assert_eq!(op.name(), *name);
        }
    }

    #[test]
    fn test_unknown_operation_rejected() {
        let err = Operation::build("primer3", &OperationParams::default()).unwrap_err();
        assert_eq!(err, AnalysisError::UnknownOperation("primer3".to_string()));
    }

    #[test]
    fn test_build_validates_parameters() {
        let mut params = OperationParams::default();
        params.frame = 4;
        assert!(Operation::build("translate", &params).is_err());

        let mut params = OperationParams::default();
        params.table = 99;
        assert!(Operation::build("six-frame", &params).is_err());

        let mut params = OperationParams::default();
        params.window = 0;
        assert!(Operation::build("gc-skew", &params).is_err());

        // search without a pattern
        assert!(Operation::build("search", &OperationParams::default()).is_err());
    }

    #[test]
    fn test_apply_complement() {
        let op = Operation::build("complement", &OperationParams::default()).unwrap();
        assert_eq!(
            op.apply(b"ATGC").unwrap(),
            OperationOutput::Sequence("TACG".to_string())
        );
    }

    #[test]
    fn test_apply_translate_default_params() {
        let op = Operation::build("translate", &OperationParams::default()).unwrap();
        assert_eq!(
            op.apply(b"ATGGCC").unwrap(),
            OperationOutput::Protein("MA".to_string())
        );
    }

    #[test]
    fn test_batch_preserves_order_and_drops_empty() {
        let records = parse_fasta(">one\nATAG\n>two\nGGGG\n>three\nATAT");
        let params = OperationParams {
            pattern: Some("AN".to_string()),
            ..Default::default()
        };
        let op = Operation::build("search", &params).unwrap();
        let results = apply_to_records(&records, &op, ThreadCount::Fixed(2), None).unwrap();
        // "two" has no match and is dropped
        let ids: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["one", "three"]);
    }

    #[test]
    fn test_batch_fails_fast_on_bad_record() {
        let records = parse_fasta(">ok\nATGC\n>bad\nAT?C");
        let op = Operation::build("complement", &OperationParams::default()).unwrap();
        let err = apply_to_records(&records, &op, ThreadCount::Auto, None).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSymbol { .. }));
    }

    #[test]
    fn test_batch_progress_updates() {
        let records: Vec<FastaRecord> = (0..25)
            .map(|i| FastaRecord {
                id: format!("r{i}"),
                description: String::new(),
                sequence: "ACGT".to_string(),
            })
            .collect();
        let op = Operation::build("gc-content", &OperationParams::default()).unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        let results = apply_to_records(&records, &op, ThreadCount::Fixed(1), Some(tx)).unwrap();
        assert_eq!(results.len(), 25);
        let updates: Vec<BatchProgress> = rx.try_iter().collect();
        assert!(updates.iter().any(|u| u.completed == 25 && u.total == 25));
    }
}
