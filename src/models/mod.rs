pub mod moment;

pub use moment::{Moment, MomentStatus, Visibility};
