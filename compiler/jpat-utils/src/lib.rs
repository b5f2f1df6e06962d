//! jpat general utilities, shared by every crate in the workspace.

pub mod highlight;
pub mod logging;
pub mod printing;
pub mod stack;
pub mod stream;
pub mod timing;

// Re-export commonly used collection packages
pub use fixedbitset;
pub use fxhash;
pub use index_vec;
pub use indexmap;
pub use itertools;
// Re-export logging utility
pub use log;
pub use smallvec;

/// Produce an `s` suffix for the given count if it is not singular.
#[macro_export]
macro_rules! pluralise {
    ($count:expr) => {
        if $count == 1 { "" } else { "s" }
    };
}
