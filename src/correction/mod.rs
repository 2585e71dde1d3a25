//! Grammar and spelling correction pipeline.

pub mod client;
pub mod engine;
pub mod prompt;
pub mod remote;
pub mod result;

#[cfg(test)]
pub(crate) mod test_support;
