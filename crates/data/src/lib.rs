//! Configuration loading and save snapshots.

pub mod load;
pub mod snapshot;

pub use load::*;
pub use snapshot::*;
