// Re-export model modules
mod envelope;
mod exchange_rates;
mod table;

pub use envelope::*;
pub use exchange_rates::*;
pub use table::*;
