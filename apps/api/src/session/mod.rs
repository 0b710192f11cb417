// Single-session interaction state machine and the controller that drives it.

pub mod controller;
pub mod state;

pub use controller::InteractionController;
pub use state::{ControllerError, SessionSnapshot, Status};
