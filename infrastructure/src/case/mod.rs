//! Case file intake.

mod loader;

pub use loader::{CaseLoadError, CaseLoader};
