//! mentor-service: AI-powered career mentoring service.
//!
//! Exposes a single HTTP endpoint that turns a user profile into a prompt,
//! sends it to a hosted generative model, and returns the model's JSON reply.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;
