//! Parsers for sequence and taxonomy input files.
//!
//! - **FASTA files**: reference and query sequences, plain or gzipped
//! - **Taxonomy files**: tab-separated `id<TAB>lineage` mappings
//!
//! Reference lineages can come from either source: a taxonomy file keyed by
//! sequence id, or SILVA-style FASTA headers (`>ID Bacteria;Firmicutes;...`).

pub mod fasta;
pub mod taxonomy;
