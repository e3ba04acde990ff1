//! Candidate screening scores: TF-IDF vectorization, text similarity and the
//! composite entrepreneurial score, plus the HTTP and CLI surfaces around them.

pub mod cli;
pub mod config;
pub mod errors;
pub mod routes;
pub mod scoring;
pub mod similarity;
pub mod state;
pub mod text;
