pub mod channel;
pub mod pattern;

#[cfg(test)]
#[path = "../../tests/src_inline/naming/tests.rs"]
mod tests;
