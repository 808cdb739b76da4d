//! Application state module

mod forms;
mod session;
mod submission;

pub use forms::*;
pub use session::*;
pub use submission::*;
