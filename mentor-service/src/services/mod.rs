pub mod mentor;
pub mod metrics;
pub mod providers;

pub use mentor::MentorEngine;
pub use metrics::{get_metrics, init_metrics};
