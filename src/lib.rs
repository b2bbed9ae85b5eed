pub mod analyzers;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod prompt;
