//! Test plan loading.

mod json_loader;

pub use json_loader::{PlanError, PlanLoader};
