//! Genetic code tables and permissive codon translation
//!
//! Ships NCBI translation tables 1-6 and 11, each a total mapping from the
//! 64 concrete codons to an amino acid plus a start-codon set. Lookups for
//! "dirty" input go through [`PermissiveCode`], which never fails: anything
//! that is not one of the 64 concrete codons becomes the placeholder `X`.

use once_cell::sync::Lazy;

use super::error::{AnalysisError, Result};

/// Distinguished stop symbol in translated output.
pub const STOP_SYMBOL: u8 = b'*';

/// Placeholder amino acid for codons that cannot be resolved.
pub const PLACEHOLDER_AA: u8 = b'X';

fn base_index(b: u8) -> Option<usize> {
    match b.to_ascii_uppercase() {
        b'T' | b'U' => Some(0),
        b'C' => Some(1),
        b'A' => Some(2),
        b'G' => Some(3),
        _ => None,
    }
}

/// Convert a 3-base codon to an index in [0, 64), TCAG order.
fn codon_index(codon: &[u8]) -> Option<usize> {
    if codon.len() != 3 {
        return None;
    }
    let b1 = base_index(codon[0])?;
    let b2 = base_index(codon[1])?;
    let b3 = base_index(codon[2])?;
    Some(b1 * 16 + b2 * 4 + b3)
}

/// Convert an index in [0, 64) back to a codon (as DNA).
fn index_to_codon(idx: usize) -> [u8; 3] {
    const BASES: [u8; 4] = [b'T', b'C', b'A', b'G'];
    [BASES[idx >> 4], BASES[(idx >> 2) & 3], BASES[idx & 3]]
}

struct CodeSpec {
    id: u8,
    name: &'static str,
    /// 64 amino acids in TCAG codon order (TTT, TTC, TTA, TTG, TCT, ... GGG),
    /// stops as '*'.
    amino_acids: &'static str,
    start_codons: &'static [&'static str],
}

// Table data per NCBI. Start sets include the alternative initiators each
// table lists, not just ATG.
const CODE_SPECS: &[CodeSpec] = &[
    CodeSpec {
        id: 1,
        name: "Standard",
        amino_acids: "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["TTG", "CTG", "ATG"],
    },
    CodeSpec {
        id: 2,
        name: "Vertebrate Mitochondrial",
        // TGA=Trp, AGA/AGG=Stop, ATA=Met
        amino_acids: "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG",
        start_codons: &["ATT", "ATC", "ATA", "ATG", "GTG"],
    },
    CodeSpec {
        id: 3,
        name: "Yeast Mitochondrial",
        // TGA=Trp, CTN=Thr, ATA=Met
        amino_acids: "FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["ATA", "ATG"],
    },
    CodeSpec {
        id: 4,
        name: "Mold/Protozoan/Mycoplasma",
        // TGA=Trp
        amino_acids: "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["TTA", "TTG", "CTG", "ATT", "ATC", "ATA", "ATG", "GTG"],
    },
    CodeSpec {
        id: 5,
        name: "Invertebrate Mitochondrial",
        // TGA=Trp, AGA/AGG=Ser, ATA=Met
        amino_acids: "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG",
        start_codons: &["TTG", "ATT", "ATC", "ATA", "ATG", "GTG"],
    },
    CodeSpec {
        id: 6,
        name: "Ciliate Nuclear",
        // TAA/TAG=Gln
        amino_acids: "FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["ATG"],
    },
    CodeSpec {
        id: 11,
        name: "Bacterial/Plant Plastid",
        amino_acids: "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["TTG", "CTG", "ATT", "ATC", "ATA", "ATG", "GTG"],
    },
];

/// A genetic code translation table identified by its NCBI id.
///
/// Holds a total 64-entry codon -> amino acid mapping (stops as
/// [`STOP_SYMBOL`]) and the table's start-codon set. Instances live in a
/// process-wide registry built once; use [`GeneticCode::from_id`].
#[derive(Debug)]
pub struct GeneticCode {
    id: u8,
    name: &'static str,
    forward: [u8; 64],
    starts: [bool; 64],
}

static CODE_REGISTRY: Lazy<Vec<GeneticCode>> =
    Lazy::new(|| CODE_SPECS.iter().map(GeneticCode::from_spec).collect());

impl GeneticCode {
    fn from_spec(spec: &CodeSpec) -> Self {
        debug_assert_eq!(spec.amino_acids.len(), 64);
        let mut forward = [0u8; 64];
        for (i, aa) in spec.amino_acids.bytes().enumerate() {
            forward[i] = aa;
        }
        let mut starts = [false; 64];
        for codon in spec.start_codons {
            if let Some(idx) = codon_index(codon.as_bytes()) {
                starts[idx] = true;
            }
        }
        GeneticCode {
            id: spec.id,
            name: spec.name,
            forward,
            starts,
        }
    }

    /// Look up a genetic code table by NCBI id.
    pub fn from_id(id: u8) -> Result<&'static GeneticCode> {
        CODE_REGISTRY
            .iter()
            .find(|c| c.id == id)
            .ok_or(AnalysisError::UnknownGeneticCode(id))
    }

    /// The standard genetic code (NCBI table 1).
    pub fn standard() -> &'static GeneticCode {
        &CODE_REGISTRY[0]
    }

    /// NCBI table id.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Human-readable table name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Strict lookup: the amino acid for a concrete codon (stops as
    /// [`STOP_SYMBOL`]), or `None` for anything off the 64-entry table.
    pub fn translate_codon(&self, codon: &[u8]) -> Option<u8> {
        codon_index(codon).map(|idx| self.forward[idx])
    }

    /// Check whether a codon is a start codon in this table.
    pub fn is_start(&self, codon: &[u8]) -> bool {
        codon_index(codon).map_or(false, |idx| self.starts[idx])
    }

    /// Check whether a codon is a stop codon in this table.
    pub fn is_stop(&self, codon: &[u8]) -> bool {
        codon_index(codon).map_or(false, |idx| self.forward[idx] == STOP_SYMBOL)
    }

    /// All start codons for this table (as DNA).
    pub fn start_codons(&self) -> Vec<String> {
        (0..64)
            .filter(|&i| self.starts[i])
            .map(|i| String::from_utf8_lossy(&index_to_codon(i)).into_owned())
            .collect()
    }

    /// All stop codons for this table (as DNA).
    pub fn stop_codons(&self) -> Vec<String> {
        (0..64)
            .filter(|&i| self.forward[i] == STOP_SYMBOL)
            .map(|i| String::from_utf8_lossy(&index_to_codon(i)).into_owned())
            .collect()
    }
}

/// A genetic code wrapper whose lookup is total by construction.
///
/// Any 3-symbol input that is not one of the 64 concrete codons (ambiguity
/// codes, gaps, junk bytes, wrong length) yields [`PLACEHOLDER_AA`] rather
/// than an error, so whole-genome batch translation survives dirty regions.
#[derive(Debug, Clone, Copy)]
pub struct PermissiveCode {
    code: &'static GeneticCode,
}

impl PermissiveCode {
    pub fn new(code: &'static GeneticCode) -> Self {
        Self { code }
    }

    pub fn from_id(id: u8) -> Result<Self> {
        Ok(Self::new(GeneticCode::from_id(id)?))
    }

    /// The wrapped table.
    pub fn code(&self) -> &'static GeneticCode {
        self.code
    }

    /// Total codon lookup: amino acid, [`STOP_SYMBOL`] for stops,
    /// [`PLACEHOLDER_AA`] for everything else. Never fails.
    pub fn translate_codon(&self, codon: &[u8]) -> u8 {
        self.code.translate_codon(codon).unwrap_or(PLACEHOLDER_AA)
    }
}
