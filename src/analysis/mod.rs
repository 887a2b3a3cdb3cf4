mod codon;
mod composition;
mod error;
mod fasta;
mod iupac;
mod motif;
mod registry;
mod sixframe;
mod translate;
mod types;

pub use codon::*;
pub use composition::*;
pub use error::*;
pub use fasta::*;
pub use iupac::*;
pub use motif::*;
pub use registry::*;
pub use sixframe::*;
pub use translate::*;
pub use types::*;
