mod client;
mod models;
mod sonar_error;

pub use client::{Completion, SonarClient};
pub use sonar_error::SonarError;
