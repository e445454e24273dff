pub mod artifacts;
pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
