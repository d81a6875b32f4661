//! Services over a Neptune connection.

mod lazy;
mod neptune;

pub use lazy::LazyNeptune;
pub use neptune::NeptuneServer;
