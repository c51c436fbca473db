//! Domain types shared by the resolver, the runner and the engine

mod attempt;
mod invocation;
mod policy;
mod rules;

pub use attempt::{AttemptResult, Outcome};
pub use invocation::Invocation;
pub use policy::RetryPolicy;
pub use rules::MatchRules;
