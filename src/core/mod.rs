pub mod appender;
pub mod batch;
pub mod error;
pub mod pipeline;
pub mod planner;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
