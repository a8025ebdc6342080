pub mod session;

pub use session::{SheetSession, SyncOutcome};
