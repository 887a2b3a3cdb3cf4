//! Strandscan - Sequence Analysis Toolkit
//!
//! A Rust library for analyzing nucleotide sequences: strand
//! complementation, six-frame translation against NCBI genetic code
//! tables, composition metrics (GC content, GC123, windowed GC skew) and
//! ambiguous motif search, exposed as a fixed operation registry suitable
//! for parallel multi-FASTA batch processing.

pub mod analysis;

pub use analysis::*;
