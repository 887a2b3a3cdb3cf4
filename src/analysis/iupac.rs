//! IUPAC ambiguity tables and strand-level sequence operations

use std::collections::HashMap;
use once_cell::sync::Lazy;

use super::error::{AnalysisError, Result};

/// Gap character
pub const GAP: u8 = b'-';

/// IUPAC code to the concrete bases it can represent, in alphabetical order.
pub static AMBIGUITY_VALUES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(b'A', "A");
    map.insert(b'C', "C");
    map.insert(b'G', "G");
    map.insert(b'T', "T");
    map.insert(b'R', "AG");
    map.insert(b'Y', "CT");
    map.insert(b'S', "CG");
    map.insert(b'W', "AT");
    map.insert(b'K', "GT");
    map.insert(b'M', "AC");
    map.insert(b'B', "CGT");
    map.insert(b'D', "AGT");
    map.insert(b'H', "ACT");
    map.insert(b'V', "ACG");
    map.insert(b'N', "ACGT");
    map
});

/// Complement of a single (uppercase) symbol. Covers the full ambiguous
/// alphabet plus the gap; `None` for anything outside it.
pub fn complement_base(b: u8) -> Option<u8> {
    let c = match b {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'R' => b'Y',
        b'Y' => b'R',
        b'S' => b'S',
        b'W' => b'W',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        b'N' => b'N',
        GAP => GAP,
        _ => return None,
    };
    Some(c)
}

/// Monomer weight of an unambiguous DNA base (free acid, g/mol).
fn monomer_weight(b: u8) -> Option<f64> {
    let w = match b {
        b'A' => 347.2212,
        b'C' => 323.1965,
        b'G' => 363.2206,
        b'T' => 322.2085,
        _ => return None,
    };
    Some(w)
}

/// Complement a sequence symbol for symbol (NOT antiparallel).
///
/// Input is uppercase-normalized first; any symbol outside the ambiguous
/// alphabet is an error.
pub fn complement(seq: &[u8]) -> Result<Vec<u8>> {
    seq.iter()
        .enumerate()
        .map(|(i, &b)| {
            let upper = b.to_ascii_uppercase();
            complement_base(upper).ok_or(AnalysisError::InvalidSymbol {
                symbol: b as char,
                position: i,
            })
        })
        .collect()
}

/// Reverse a sequence, case preserved.
pub fn reverse(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().copied().collect()
}

/// Reversed complementary sequence ( = the other strand, read 5'->3').
pub fn antiparallel(seq: &[u8]) -> Result<Vec<u8>> {
    Ok(reverse(&complement(seq)?))
}

/// Reverse complement with pass-through: symbols without a complement entry
/// are kept as-is (uppercased). Total on any input; translation relies on
/// this so that unresolvable codons degrade to 'X' instead of aborting.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|&b| {
            let upper = b.to_ascii_uppercase();
            complement_base(upper).unwrap_or(upper)
        })
        .collect()
}

/// Sum of unambiguous monomer weights; only A, C, G and T are accepted.
pub fn molecular_weight(seq: &[u8]) -> Result<f64> {
    let mut sum = 0.0;
    for (i, &b) in seq.iter().enumerate() {
        sum += monomer_weight(b.to_ascii_uppercase()).ok_or(AnalysisError::InvalidSymbol {
            symbol: b as char,
            position: i,
        })?;
    }
    Ok(sum)
}

// ── Bitmask-based IUPAC operations (zero heap allocation) ──────────────────

/// Bitmask representation: bit 0 = A, bit 1 = C, bit 2 = G, bit 3 = T

/// Lookup table: 4-bit bitmask index -> IUPAC code byte.
/// Index 0 (no bases) maps to b'?' and should not occur with valid DNA data.
pub const IUPAC_FROM_MASK: [u8; 16] = [
    b'?', // 0b0000 - no bases (invalid)
    b'A', // 0b0001
    b'C', // 0b0010
    b'M', // 0b0011 - A|C
    b'G', // 0b0100
    b'R', // 0b0101 - A|G
    b'S', // 0b0110 - C|G
    b'V', // 0b0111 - A|C|G
    b'T', // 0b1000
    b'W', // 0b1001 - A|T
    b'Y', // 0b1010 - C|T
    b'H', // 0b1011 - A|C|T
    b'K', // 0b1100 - G|T
    b'D', // 0b1101 - A|G|T
    b'B', // 0b1110 - C|G|T
    b'N', // 0b1111 - A|C|G|T
];

/// Convert a DNA base byte to its bitmask. Also handles IUPAC ambiguity codes.
/// Returns 0 for unrecognized bytes.
#[inline]
pub fn base_to_bit(b: u8) -> u8 {
    match b {
        b'A' => 0b0001,
        b'C' => 0b0010,
        b'G' => 0b0100,
        b'T' => 0b1000,
        b'R' => 0b0101,
        b'Y' => 0b1010,
        b'S' => 0b0110,
        b'W' => 0b1001,
        b'K' => 0b1100,
        b'M' => 0b0011,
        b'B' => 0b1110,
        b'D' => 0b1101,
        b'H' => 0b1011,
        b'V' => 0b0111,
        b'N' => 0b1111,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmask_roundtrip() {
        let codes = b"ACGTRYSWKMBDHVN";
        for &code in codes {
            let mask = base_to_bit(code);
            assert_eq!(
                IUPAC_FROM_MASK[mask as usize], code,
                "Roundtrip failed for '{}'",
                code as char
            );
        }
    }

    #[test]
    fn test_ambiguity_values_match_bitmasks() {
        for (&code, bases) in AMBIGUITY_VALUES.iter() {
            let mut mask = 0u8;
            for b in bases.bytes() {
                mask |= base_to_bit(b);
            }
            assert_eq!(
                mask,
                base_to_bit(code),
                "expansion mismatch for '{}'",
                code as char
            );
        }
    }

    #[test]
    fn test_complement_basic() {
        assert_eq!(complement(b"ATGC").unwrap(), b"TACG");
        assert_eq!(complement(b"atgc").unwrap(), b"TACG");
        assert_eq!(complement(b"RYN-").unwrap(), b"YRN-");
    }

    #[test]
    fn test_complement_is_involution() {
        let seq = b"ATGCATTGCAGGCCTTA";
        let twice = complement(&complement(seq).unwrap()).unwrap();
        assert_eq!(twice, seq);
    }

    #[test]
    fn test_complement_rejects_invalid() {
        let err = complement(b"ATXG").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidSymbol {
                symbol: 'X',
                position: 2
            }
        );
    }

    #[test]
    fn test_antiparallel_is_involution() {
        let seq = b"ATGCATTGCA";
        let twice = antiparallel(&antiparallel(seq).unwrap()).unwrap();
        assert_eq!(twice, seq);
    }

    #[test]
    fn test_antiparallel() {
        // complement of ATGC is TACG, reversed GCAT
        assert_eq!(antiparallel(b"ATGC").unwrap(), b"GCAT");
    }

    #[test]
    fn test_reverse_preserves_case() {
        assert_eq!(reverse(b"AtGc"), b"cGtA");
    }

    #[test]
    fn test_reverse_complement_passes_through_unknown() {
        assert_eq!(reverse_complement(b"A?G"), b"C?T");
    }

    #[test]
    fn test_molecular_weight() {
        let w = molecular_weight(b"AT").unwrap();
        assert!((w - (347.2212 + 322.2085)).abs() < 1e-6);
        assert!(molecular_weight(b"AN").is_err());
        assert_eq!(molecular_weight(b"").unwrap(), 0.0);
    }
}
