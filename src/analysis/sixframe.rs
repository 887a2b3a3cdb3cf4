//! Six-frame translation layout
//!
//! Builds the aligned per-row data for a DNA Strider style six-frame view:
//! fixed-width rows combining the forward strand, its complement, per-row
//! GC% and the six codon-aligned amino-acid tracks. Text rendering is left
//! to the caller.

use super::codon::PermissiveCode;
use super::composition::gc_content;
use super::error::Result;
use super::iupac::{complement, reverse};
use super::translate::{translate_frame, Frame};
use super::types::{BaseCounts, FrameTrack, SixFrameRow, SixFrameView};

/// Nucleotides per layout row.
pub const ROW_WIDTH: usize = 60;

const CODONS_PER_ROW: usize = ROW_WIDTH / 3;

fn track_slice(track: &[u8], p: usize) -> String {
    let end = (p + CODONS_PER_ROW).min(track.len());
    if p >= end {
        String::new()
    } else {
        String::from_utf8_lossy(&track[p..end]).into_owned()
    }
}

/// Compose the six-frame layout of a sequence against a genetic code table.
///
/// Frame k's track in a row starts at nucleotide column k-1 and each amino
/// acid spans three columns; the negative-frame tracks are reversed so they
/// read left-to-right under the forward strand. Fails on an unknown table
/// id or a symbol the complement table does not cover.
pub fn six_frame_view(seq: &[u8], table: u8) -> Result<SixFrameView> {
    let code = PermissiveCode::from_id(table)?;
    let upper = seq.to_ascii_uppercase();
    let comp = complement(&upper)?;

    // Reverse-frame translations are reversed once here so that row slicing
    // below works identically for both strands.
    let forward: [Vec<u8>; 3] =
        Frame::FORWARD.map(|frame| translate_frame(&upper, frame, &code));
    let reverse_tracks: [Vec<u8>; 3] =
        Frame::REVERSE.map(|frame| reverse(&translate_frame(&upper, frame, &code)));

    let length = upper.len();
    let mut rows = Vec::with_capacity(length.div_ceil(ROW_WIDTH));
    let mut i = 0;
    while i < length {
        let end = (i + ROW_WIDTH).min(length);
        let p = i / 3;
        rows.push(SixFrameRow {
            start: i,
            sequence: String::from_utf8_lossy(&upper[i..end]).into_owned(),
            complement: String::from_utf8_lossy(&comp[i..end]).into_owned(),
            gc_percent: gc_content(&upper[i..end]),
            forward: std::array::from_fn(|k| FrameTrack {
                frame: k as i8 + 1,
                offset: k,
                amino_acids: track_slice(&forward[k], p),
            }),
            reverse: std::array::from_fn(|k| FrameTrack {
                frame: -(k as i8) - 1,
                offset: k,
                amino_acids: track_slice(&reverse_tracks[k], p),
            }),
        });
        i += ROW_WIDTH;
    }

    Ok(SixFrameView {
        length,
        base_counts: BaseCounts::of(&upper),
        gc_percent: gc_content(&upper),
        rows,
    })
}
