#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("at least {min} players are required (have {actual})")]
    TooFewPlayers { min: usize, actual: usize },
    #[error("there is a player with an empty name")]
    EmptyName,
    #[error("duplicate names are not allowed: {0}")]
    DuplicateName(String),
    #[error("impostors must be between 0 and {max} (requested {requested})")]
    ImpostorCountOutOfRange { requested: usize, max: usize },
    #[error("there is no previous deal to review")]
    NoPriorDealToReplay,
    #[error("no player at position {index} (roster has {len})")]
    PlayerIndexOutOfRange { index: usize, len: usize },
    #[error("hint level must be 1, 2 or 3 (got {0})")]
    InvalidHintLevel(u8),
    #[error("not in a player's turn")]
    NotInTurn,
    #[error("the deal has not finished yet")]
    DealNotCompleted,
}
