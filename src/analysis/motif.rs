//! Ambiguous motif compilation and overlapping subject search

use super::error::{AnalysisError, Result};
use super::iupac::{base_to_bit, AMBIGUITY_VALUES};
use super::types::MatchSet;

/// A compiled motif: one allowed-base set per query position, stored as
/// 4-bit masks (bit 0 = A, bit 1 = C, bit 2 = G, bit 3 = T).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifPattern {
    source: String,
    expanded: String,
    masks: Vec<u8>,
}

impl MotifPattern {
    /// Compile an ambiguous IUPAC query into per-position allowed-base sets.
    ///
    /// An empty query is rejected; any symbol without an ambiguity expansion
    /// is an `InvalidSymbol` error.
    pub fn compile(pattern: &[u8]) -> Result<Self> {
        if pattern.is_empty() {
            return Err(AnalysisError::InvalidArgument(
                "empty motif pattern".to_string(),
            ));
        }
        let mut source = String::with_capacity(pattern.len());
        let mut expanded = String::new();
        let mut masks = Vec::with_capacity(pattern.len());
        for (i, &b) in pattern.iter().enumerate() {
            let upper = b.to_ascii_uppercase();
            let bases = AMBIGUITY_VALUES
                .get(&upper)
                .ok_or(AnalysisError::InvalidSymbol {
                    symbol: b as char,
                    position: i,
                })?;
            if bases.len() == 1 {
                expanded.push_str(bases);
            } else {
                expanded.push('[');
                expanded.push_str(bases);
                expanded.push(']');
            }
            source.push(upper as char);
            masks.push(base_to_bit(upper));
        }
        Ok(MotifPattern {
            source,
            expanded,
            masks,
        })
    }

    /// The uppercased query as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The expanded form, e.g. "A[ACGT]G" for query "ANG".
    pub fn expanded(&self) -> &str {
        &self.expanded
    }

    /// Number of positions in the motif.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    fn matches_at(&self, subject: &[u8], start: usize) -> bool {
        self.masks.iter().enumerate().all(|(j, &mask)| {
            let m = base_to_bit(subject[start + j].to_ascii_uppercase());
            // Only a concrete base can satisfy a position; an ambiguous
            // subject symbol never matches.
            m != 0 && m.is_power_of_two() && m & mask == m
        })
    }
}

/// Scan a subject for every start position where the motif matches,
/// overlapping occurrences included.
pub fn search(subject: &[u8], pattern: &MotifPattern) -> MatchSet {
    let mut positions = Vec::new();
    if subject.len() >= pattern.len() {
        for start in 0..=subject.len() - pattern.len() {
            if pattern.matches_at(subject, start) {
                positions.push(start);
            }
        }
    }
    MatchSet {
        pattern: pattern.expanded().to_string(),
        positions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_expands_ambiguity() {
        let p = MotifPattern::compile(b"ANG").unwrap();
        assert_eq!(p.source(), "ANG");
        assert_eq!(p.expanded(), "A[ACGT]G");
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn test_compile_rejects_empty_and_invalid() {
        assert!(matches!(
            MotifPattern::compile(b""),
            Err(AnalysisError::InvalidArgument(_))
        ));
        assert_eq!(
            MotifPattern::compile(b"AX").unwrap_err(),
            AnalysisError::InvalidSymbol {
                symbol: 'X',
                position: 1
            }
        );
        // gaps have no expansion
        assert!(MotifPattern::compile(b"A-G").is_err());
    }

    #[test]
    fn test_search_overlapping() {
        let p = MotifPattern::compile(b"AN").unwrap();
        let m = search(b"ATAG", &p);
        assert_eq!(m.positions, vec![0, 2]);
    }

    #[test]
    fn test_search_exact() {
        let p = MotifPattern::compile(b"GAT").unwrap();
        let m = search(b"GATGAT", &p);
        assert_eq!(m.positions, vec![0, 3]);
        assert_eq!(m.pattern, "GAT");
    }

    #[test]
    fn test_search_overlapping_runs() {
        let p = MotifPattern::compile(b"AA").unwrap();
        let m = search(b"AAAA", &p);
        assert_eq!(m.positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_ambiguous_subject_never_matches() {
        let p = MotifPattern::compile(b"AN").unwrap();
        // N in the subject is not a concrete base
        let m = search(b"ANAT", &p);
        assert_eq!(m.positions, vec![2]);
    }

    #[test]
    fn test_disjunctive_position() {
        let p = MotifPattern::compile(b"RT").unwrap();
        // R = A or G
        let m = search(b"ATGTCT", &p);
        assert_eq!(m.positions, vec![0, 2]);
    }

    #[test]
    fn test_pattern_longer_than_subject() {
        let p = MotifPattern::compile(b"ACGT").unwrap();
        let m = search(b"AC", &p);
        assert!(m.positions.is_empty());
    }

    #[test]
    fn test_search_lowercase_subject() {
        let p = MotifPattern::compile(b"an").unwrap();
        let m = search(b"atag", &p);
        assert_eq!(m.positions, vec![0, 2]);
    }
}
