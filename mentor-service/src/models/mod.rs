//! Domain models for the career mentor service.

pub mod mentor;

pub use mentor::{CareerCluster, CareerMentorRequest, CareerMentorResponse};
