pub mod error;
pub mod prelude;
pub mod relational;
pub mod rep3;
#[cfg(test)]
pub(crate) mod tests;
pub mod traits;
pub mod types;
