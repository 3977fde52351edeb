#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod catalog;
pub mod cli;
pub mod game;
pub mod roster;
pub mod types;

pub use catalog::{CatalogError, SecretCatalog, SecretEntry};
pub use game::{
    Confirm, ControllerConfig, DealPhase, DealSession, GameController, GameError, RevealConfig,
    RevealGesture, RoleAssignment, SessionConfig, Snapshot, UiEvent,
};
pub use roster::{Player, Roster};
pub use types::{HintLevel, Role, View};
