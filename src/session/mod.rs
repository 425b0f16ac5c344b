pub mod controller;
pub mod result;
pub mod text;

pub use controller::{InputStatus, SessionController, WordStatus};
pub use result::{DegenerateSessionError, ResultStats, WordCounts};
pub use text::{Session, TimeLimit};
