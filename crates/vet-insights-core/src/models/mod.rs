//! Domain models for the vet-insights system.

mod animal;
mod metrics;
mod timestamp;
mod vaccination;
mod visit;

pub use animal::*;
pub use metrics::*;
pub use timestamp::*;
pub use vaccination::*;
pub use visit::*;
