//! Collaborator traits at the telemetry core's seams.

pub mod sink;
pub mod source;

pub use sink::RenderSink;
pub use source::SessionSource;
