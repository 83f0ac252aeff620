mod driver;
mod error;
mod session;

pub use driver::submit_turn;
pub use error::ChatError;
pub use session::{SessionContext, Transcript, Turn};
