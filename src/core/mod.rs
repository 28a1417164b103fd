//! Core data types: k-mer encoding and taxonomy labels.

pub mod kmer;
pub mod taxonomy;
