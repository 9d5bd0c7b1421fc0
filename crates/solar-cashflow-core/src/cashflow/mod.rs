//! Year-by-year cash-flow pipeline.
//!
//! Stages run in order, each a pure function of the previous stage's output
//! and the validated [`ProjectParameters`](crate::project::parameters::ProjectParameters):
//! production → revenue → incentives → financing → assembler → metrics.

pub mod assembler;
pub mod financing;
pub mod incentives;
pub mod metrics;
pub mod model;
pub mod production;
pub mod revenue;
