pub mod command;
pub mod session;
pub mod session_flow;

pub use command::Command;
pub use session::{LoadOutcome, LoadStatus, LoadTicket, PaperContent, Session, View};
pub use session_flow::{Reply, SessionFlow};
