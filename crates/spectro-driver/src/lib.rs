pub mod driver;
pub mod source;

pub use driver::AnimationDriver;
pub use source::{ChannelLineSource, CyclingLineSource, LineSource, StaticLineSource};
