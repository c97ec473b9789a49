//! Path safety for filedeck
//!
//! Every filesystem-facing handler goes through [`PathResolver`]; nothing
//! operates on a request path that has not passed resolution.

pub mod path;
pub mod roots;

pub use path::{PathGuardError, PathResolver, ResolutionMode};
pub use roots::{FixedRoots, RootLister, SystemRoots};
