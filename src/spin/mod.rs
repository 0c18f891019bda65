//! Interactive rotation core
//!
//! - `quat` - unit quaternion math the whole core is expressed in
//! - `spinner` - the grab/drag/release/decay state machine, one per solid

mod quat;
mod spinner;

pub use quat::Quat;
pub use spinner::{PointerSample, Spinner};
