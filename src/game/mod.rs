pub mod action;
pub mod assignment;
pub mod config;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod session;
pub mod snapshot;

pub use action::UiEvent;
pub use assignment::{RoleAssignment, assign};
pub use config::{ControllerConfig, RevealConfig, SessionConfig};
pub use controller::{Confirm, GameController};
pub use error::GameError;
pub use gesture::{GestureReading, RevealGesture};
pub use session::{DealPhase, DealSession, HintSettings};
pub use snapshot::{Snapshot, format_impostor_max, format_progress};
