mod controller;
mod events;

pub use controller::CallController;
pub use events::{CallCommand, CallEvents, Severity};
