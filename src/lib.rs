pub mod assembler;
pub mod classifier;
pub mod config;
pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod filter;
pub mod model;
pub mod normalizer;
pub mod regions;
pub mod thresholds;
