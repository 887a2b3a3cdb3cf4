//! Error types for sequence analysis

use thiserror::Error;

/// Errors surfaced by the analysis operations.
///
/// All of these are validation failures raised before any work is done;
/// none of the engine functions produce partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A symbol outside the IUPAC DNA alphabet (or outside A/C/G/T where
    /// only unambiguous bases are accepted).
    #[error("invalid symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// Reading frame outside {1, 2, 3, -1, -2, -3}.
    #[error("invalid reading frame {0}: expected 1, 2, 3, -1, -2 or -3")]
    InvalidFrame(i8),

    /// Genetic code table id with no registered table.
    #[error("unknown genetic code table {0}")]
    UnknownGeneticCode(u8),

    /// Bad argument value (zero window size, empty motif pattern).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation name outside the supported set.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
}

/// Convenience alias used throughout the analysis modules.
pub type Result<T> = std::result::Result<T, AnalysisError>;
