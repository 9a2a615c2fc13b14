//! Use cases for the application layer

pub(crate) mod fan_out;
pub mod run_debate;
pub mod run_deliberation;

#[cfg(test)]
pub(crate) mod test_support;
