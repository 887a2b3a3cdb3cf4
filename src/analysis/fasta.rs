//! Multi-record FASTA parsing and identifier cleanup
//!
//! Record splitting only: a record starts at a '>' line, its identifier is
//! the first whitespace- or comma-delimited token of the header, and its
//! sequence is the concatenation of the following lines, whitespace
//! stripped and uppercased. Symbol validation is left to the operations.

use std::collections::HashSet;

use super::types::FastaRecord;

fn split_header(header: &str) -> (String, String) {
    let header = header.trim();
    let end = header
        .find(|c: char| c.is_whitespace() || c == ',')
        .unwrap_or(header.len());
    let id = header[..end].to_string();
    let description = header[end..]
        .trim_start_matches(|c: char| c.is_whitespace() || c == ',')
        .to_string();
    (id, description)
}

/// Parse FASTA text into records. Text before the first '>' is ignored;
/// a record with no sequence lines is kept with an empty sequence.
pub fn parse_fasta(text: &str) -> Vec<FastaRecord> {
    let mut records = Vec::new();
    let mut current: Option<FastaRecord> = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(header) = line.strip_prefix('>') {
            if let Some(record) = current.take() {
                records.push(record);
            }
            let (id, description) = split_header(header);
            current = Some(FastaRecord {
                id,
                description,
                sequence: String::new(),
            });
        } else if let Some(record) = current.as_mut() {
            for c in line.chars() {
                if !c.is_whitespace() {
                    record.sequence.push(c.to_ascii_uppercase());
                }
            }
        }
    }

    if let Some(record) = current.take() {
        records.push(record);
    }

    records
}

/// Make record identifiers unique by suffixing duplicates with the smallest
/// number >= 2 that is not yet taken. Record order is preserved.
pub fn assign_unique_ids(records: &mut [FastaRecord]) {
    let mut seen: HashSet<String> = HashSet::new();
    for record in records.iter_mut() {
        if seen.contains(&record.id) {
            let mut n = 1usize;
            loop {
                n += 1;
                let candidate = format!("{}{}", record.id, n);
                if !seen.contains(&candidate) {
                    record.id = candidate;
                    break;
                }
            }
        }
        seen.insert(record.id.clone());
    }
}
