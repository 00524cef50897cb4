//! The two best-cost searches (C5, C6) and cooperative cancellation (spec §5).

mod cancel;
mod expressed;
mod performed;

pub use cancel::*;
pub use expressed::*;
pub use performed::*;
