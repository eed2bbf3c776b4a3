pub mod frankfurter;

pub use frankfurter::{FrankfurterClient, RateSource};

#[cfg(test)]
pub use frankfurter::MockRateSource;
