//! Coaching module — résumé analysis, learning plans, job scanning, project
//! ideas, market trends, and the simulated interview.
//!
//! Every operation follows the same shape: load the user's aggregate,
//! produce or mutate one slice of it, and commit the whole aggregate back to
//! the store. There are no partial writes.

pub mod analysis;
pub mod handlers;
pub mod interview;
pub mod jobs;
pub mod plan;
pub mod projects;
pub mod prompts;
pub mod trends;
