pub mod controls;
pub mod experiment;
pub mod labels;
pub mod thresholds;
pub mod trend;
pub mod well;

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
