//! Backend for the local-SEO lead qualification quiz.
//!
//! The [`quiz`] module carries the whole flow: the typed answer model, the
//! scoring engine that turns answers into a qualification verdict and revenue
//! estimates, the stage sequencer, and the handoff to the notification
//! collaborator that mails the summary to the sales inbox.

pub mod config;
pub mod error;
pub mod quiz;
pub mod telemetry;
