pub mod collector;
pub mod counters;
pub mod platform;
pub mod process;
pub mod snapshot;
pub mod tokenizer;
