//! Workflow driven by the command-line entry point.

pub mod orchestration;

pub use orchestration::{plan_bump, publish, run_bump_workflow, BumpDecision, BumpOutcome, BumpPlan, SkipReason};
