//! Frame-aware DNA to protein translation

use super::codon::{GeneticCode, PermissiveCode};
use super::error::{AnalysisError, Result};
use super::iupac::reverse_complement;

/// A validated reading frame.
///
/// The sign selects the strand (positive = given strand, negative = the
/// complementary strand read 5'->3'); the magnitude minus one is the
/// nucleotide offset before the first complete codon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame(i8);

impl Frame {
    /// The three forward frames, in order 1, 2, 3.
    pub const FORWARD: [Frame; 3] = [Frame(1), Frame(2), Frame(3)];

    /// The three reverse frames, in order -1, -2, -3.
    pub const REVERSE: [Frame; 3] = [Frame(-1), Frame(-2), Frame(-3)];

    /// Validate a frame number; anything outside {1, 2, 3, -1, -2, -3}
    /// is rejected.
    pub fn new(value: i8) -> Result<Self> {
        match value {
            1..=3 | -3..=-1 => Ok(Frame(value)),
            _ => Err(AnalysisError::InvalidFrame(value)),
        }
    }

    /// The raw frame number.
    pub fn value(self) -> i8 {
        self.0
    }

    /// Nucleotide offset before the first complete codon.
    pub fn offset(self) -> usize {
        (self.0.unsigned_abs() - 1) as usize
    }

    /// Whether this frame reads the complementary strand.
    pub fn is_reverse(self) -> bool {
        self.0 < 0
    }
}

/// Translate one reading frame of a DNA sequence.
///
/// Infallible: the frame is already validated and every codon resolves
/// through the permissive table (unresolvable codons become 'X', stops
/// become '*'). A trailing partial codon is dropped, so the output length
/// is `(len - offset) / 3`.
pub fn translate_frame(seq: &[u8], frame: Frame, code: &PermissiveCode) -> Vec<u8> {
    let working: Vec<u8> = if frame.is_reverse() {
        reverse_complement(seq)
    } else {
        seq.to_ascii_uppercase()
    };
    working
        .get(frame.offset()..)
        .unwrap_or(&[])
        .chunks_exact(3)
        .map(|codon| code.translate_codon(codon))
        .collect()
}

/// Translate a DNA sequence in one of the six reading frames.
pub fn translate(seq: &[u8], frame: i8, code: &PermissiveCode) -> Result<Vec<u8>> {
    Ok(translate_frame(seq, Frame::new(frame)?, code))
}

/// Translate against a genetic code table resolved by NCBI id.
///
/// Frame and table id are validated before any translation happens.
pub fn translate_with_table(seq: &[u8], frame: i8, table: u8) -> Result<Vec<u8>> {
    let frame = Frame::new(frame)?;
    let code = PermissiveCode::new(GeneticCode::from_id(table)?);
    Ok(translate_frame(seq, frame, &code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_validation() {
        for v in [1, 2, 3, -1, -2, -3] {
            assert!(Frame::new(v).is_ok());
        }
        for v in [0, 4, -4, 7, i8::MIN] {
            assert_eq!(Frame::new(v).unwrap_err(), AnalysisError::InvalidFrame(v));
        }
    }

    #[test]
    fn test_translate_basic() {
        assert_eq!(translate_with_table(b"ATGGCC", 1, 1).unwrap(), b"MA");
        assert_eq!(translate_with_table(b"atggcc", 1, 1).unwrap(), b"MA");
    }

    #[test]
    fn test_translate_drops_partial_codon() {
        assert_eq!(translate_with_table(b"ATG", 1, 1).unwrap().len(), 1);
        assert_eq!(translate_with_table(b"AT", 1, 1).unwrap().len(), 0);
        assert_eq!(translate_with_table(b"", 1, 1).unwrap().len(), 0);
        // frame 2 of 7 nt: 6 usable -> 2 codons
        assert_eq!(translate_with_table(b"AATGGCC", 2, 1).unwrap(), b"MA");
    }

    #[test]
    fn test_translate_through_stops() {
        assert_eq!(translate_with_table(b"ATGTAAGCC", 1, 1).unwrap(), b"M*A");
    }

    #[test]
    fn test_ambiguous_codons_become_x() {
        assert_eq!(translate_with_table(b"NNN", 1, 1).unwrap(), b"X");
        assert_eq!(translate_with_table(b"ATGRCC", 1, 1).unwrap(), b"MX");
        for id in [1, 2, 3, 4, 5, 6, 11] {
            assert_eq!(translate_with_table(b"NNN", 1, id).unwrap(), b"X");
        }
    }

    #[test]
    fn test_negative_frames_read_other_strand() {
        // antiparallel of ATGGCC is GGCCAT; frame -1 reads GGC CAT -> GH
        assert_eq!(translate_with_table(b"ATGGCC", -1, 1).unwrap(), b"GH");
        // frame -2 drops one nt: GCC AT -> A
        assert_eq!(translate_with_table(b"ATGGCC", -2, 1).unwrap(), b"A");
    }

    #[test]
    fn test_invalid_frame_rejected() {
        assert_eq!(
            translate_with_table(b"ATG", 4, 1).unwrap_err(),
            AnalysisError::InvalidFrame(4)
        );
        assert_eq!(
            translate_with_table(b"ATG", 0, 1).unwrap_err(),
            AnalysisError::InvalidFrame(0)
        );
    }

    #[test]
    fn test_unknown_table_rejected_before_translation() {
        assert_eq!(
            translate_with_table(b"ATG", 1, 99).unwrap_err(),
            AnalysisError::UnknownGeneticCode(99)
        );
    }

    #[test]
    fn test_mito_table_changes_output() {
        // TGA is a stop in table 1 but Trp in table 2
        assert_eq!(translate_with_table(b"TGA", 1, 1).unwrap(), b"*");
        assert_eq!(translate_with_table(b"TGA", 1, 2).unwrap(), b"W");
    }
}
