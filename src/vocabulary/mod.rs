//! The closed step vocabulary (spec §3, C2): foot primitives and the
//! step-kind enumeration, plus the kinematic predicates used by the step
//! graph builder and both searches.

mod foot;
mod step_kind;

pub use foot::*;
pub use step_kind::*;
