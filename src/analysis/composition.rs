//! Nucleotide composition metrics: GC content, GC123 and windowed GC skew

use super::error::{AnalysisError, Result};
use super::types::{CompositionMetrics, SkewSeries};

fn percent(gc: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        gc as f64 * 100.0 / total as f64
    }
}

/// G+C content as a percentage of the canonical bases (A, T, G, C).
///
/// Ambiguous symbols and gaps count toward neither tally; an empty sequence
/// or one with no canonical base reports 0 rather than faulting.
pub fn gc_content(seq: &[u8]) -> f64 {
    let mut gc = 0usize;
    let mut total = 0usize;
    for &b in seq {
        match b.to_ascii_uppercase() {
            b'G' | b'C' => {
                gc += 1;
                total += 1;
            }
            b'A' | b'T' => total += 1,
            _ => {}
        }
    }
    percent(gc, total)
}

/// G+C content overall and at each of the three codon positions.
///
/// The sequence is split into consecutive triplets; a short final triplet
/// contributes only the positions it has. Positions with no canonical base
/// report 0.
pub fn gc123(seq: &[u8]) -> CompositionMetrics {
    let mut gc = [0usize; 3];
    let mut total = [0usize; 3];
    for codon in seq.chunks(3) {
        for (pos, &b) in codon.iter().enumerate() {
            match b.to_ascii_uppercase() {
                b'G' | b'C' => {
                    gc[pos] += 1;
                    total[pos] += 1;
                }
                b'A' | b'T' => total[pos] += 1,
                _ => {}
            }
        }
    }
    CompositionMetrics {
        overall: percent(gc.iter().sum(), total.iter().sum()),
        position: [
            percent(gc[0], total[0]),
            percent(gc[1], total[1]),
            percent(gc[2], total[2]),
        ],
    }
}

/// GC skew (G-C)/(G+C) over consecutive non-overlapping windows.
///
/// The last window may be shorter than `window`. A window with no G or C
/// reports a skew of 0 instead of dividing by zero.
pub fn gc_skew(seq: &[u8], window: usize) -> Result<SkewSeries> {
    if window == 0 {
        return Err(AnalysisError::InvalidArgument(
            "window size must be > 0".to_string(),
        ));
    }
    let values = seq
        .chunks(window)
        .map(|chunk| {
            let mut g = 0i64;
            let mut c = 0i64;
            for &b in chunk {
                match b.to_ascii_uppercase() {
                    b'G' => g += 1,
                    b'C' => c += 1,
                    _ => {}
                }
            }
            if g + c == 0 {
                0.0
            } else {
                (g - c) as f64 / (g + c) as f64
            }
        })
        .collect();
    Ok(SkewSeries { window, values })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gc_content() {
        assert_eq!(gc_content(b""), 0.0);
        assert_eq!(gc_content(b"ATGC"), 50.0);
        assert_eq!(gc_content(b"GGCC"), 100.0);
        assert_eq!(gc_content(b"ATAT"), 0.0);
        assert_eq!(gc_content(b"atgc"), 50.0);
        // ambiguous symbols are not part of the denominator
        assert_eq!(gc_content(b"NNNN"), 0.0);
        assert_eq!(gc_content(b"GCNN"), 100.0);
    }

    #[test]
    fn test_gc123_per_position() {
        // codons GAT GCT: pos0 = G,G -> 100; pos1 = A,C -> 50; pos2 = T,T -> 0
        let m = gc123(b"GATGCT");
        assert_eq!(m.position, [100.0, 50.0, 0.0]);
        assert_eq!(m.overall, 50.0);
    }

    #[test]
    fn test_gc123_short_final_triplet() {
        // GA TG -> codons GAT, G_: pos0 = G,G; pos1 = A; pos2 = T
        let m = gc123(b"GATG");
        assert_eq!(m.position, [100.0, 0.0, 0.0]);
        assert_eq!(m.overall, 50.0);
    }

    #[test]
    fn test_gc123_empty() {
        let m = gc123(b"");
        assert_eq!(m.overall, 0.0);
        assert_eq!(m.position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_gc_skew_basic() {
        let s = gc_skew(b"GGCC", 4).unwrap();
        assert_eq!(s.values, vec![0.0]);
        let s = gc_skew(b"GGGC", 4).unwrap();
        assert_eq!(s.values, vec![0.5]);
    }

    #[test]
    fn test_gc_skew_zero_denominator_fallback() {
        let s = gc_skew(b"NNNN", 4).unwrap();
        assert_eq!(s.values, vec![0.0]);
        let s = gc_skew(b"ATAT", 4).unwrap();
        assert_eq!(s.values, vec![0.0]);
    }

    #[test]
    fn test_gc_skew_windows() {
        // windows GGGG (skew 1), CCCC (skew -1), GG (skew 1, short)
        let s = gc_skew(b"GGGGCCCCGG", 4).unwrap();
        assert_eq!(s.values, vec![1.0, -1.0, 1.0]);
        assert_eq!(s.window, 4);
    }

    #[test]
    fn test_gc_skew_rejects_zero_window() {
        assert!(matches!(
            gc_skew(b"ACGT", 0),
            Err(AnalysisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_gc_skew_empty_sequence() {
        let s = gc_skew(b"", 100).unwrap();
        assert!(s.values.is_empty());
    }
}
