//! Static pad geometry (spec §3, C1): lane coordinates, bracketability,
//! crossover/invert feasibility, mirror/flip symmetry, and starting
//! positions. Immutable once built (spec §3 "Lifecycle").

mod geometry;
mod lane;
mod raw;
mod starting;

#[cfg(test)]
pub mod fixtures;

pub use geometry::*;
pub use lane::*;
pub use raw::*;
pub use starting::*;
