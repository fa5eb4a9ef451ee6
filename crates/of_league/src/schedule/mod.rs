//! Season fixture calendar generation.

pub mod round_robin;

pub use round_robin::RoundRobinScheduler;
