use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

use crate::catalog::SecretCatalog;
use crate::game::action::UiEvent;
use crate::game::assignment::assign;
use crate::game::gesture::{GestureReading, RevealGesture};
use crate::game::session::{DealPhase, DealSession, HintSettings};
use crate::game::snapshot::{
    Snapshot, format_impostor_max, format_progress, format_roster_status,
};
use crate::game::{ControllerConfig, GameError, SessionConfig};
use crate::roster::{Roster, clamp_impostor_count, has_duplicates, max_impostors, validate};
use crate::types::View;

/// Yes/no question asked before destructive actions.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Owns the roster, settings and the single live deal, and turns UI events
/// into state changes.
#[derive(Debug)]
pub struct GameController {
    roster: Roster,
    config: SessionConfig,
    catalog: SecretCatalog,
    gesture: RevealGesture,
    lift_pixels: f32,
    session: Option<DealSession>,
    view: View,
    error: Option<String>,
    rng: StdRng,
}

impl GameController {
    pub fn new(catalog: SecretCatalog, config: ControllerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let roster = Roster::default();
        let session_config = SessionConfig::default();
        Self {
            config: SessionConfig {
                impostor_count: clamp_impostor_count(
                    roster.players(),
                    session_config.impostor_count,
                ),
                ..session_config
            },
            roster,
            catalog,
            gesture: RevealGesture::new(config.reveal),
            lift_pixels: 0.0,
            session: None,
            view: View::Menu,
            error: None,
            rng,
        }
    }

    /// Replaces the roster and settings, re-clamping the impostor count.
    pub fn with_setup(mut self, roster: Roster, config: SessionConfig) -> Self {
        self.config = SessionConfig {
            impostor_count: clamp_impostor_count(roster.players(), config.impostor_count),
            ..config
        };
        self.roster = roster;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&DealSession> {
        self.session.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    #[instrument(skip(self, confirm), fields(view = %self.view))]
    pub fn dispatch(&mut self, event: UiEvent, confirm: &mut impl Confirm) -> Snapshot {
        if !event.is_pointer() {
            self.error = None;
        }

        let result = match event {
            UiEvent::AddPlayer(raw) => self.add_player(&raw),
            UiEvent::RemovePlayer(index) => self.remove_player(index, confirm),
            UiEvent::ReorderPlayer { from, to } => self.roster.reorder(from, to),
            UiEvent::SetImpostorCount(count) => {
                self.config.impostor_count = clamp_impostor_count(self.roster.players(), count);
                Ok(())
            }
            UiEvent::SetHintsEnabled(enabled) => {
                self.config.hints_enabled = enabled;
                Ok(())
            }
            UiEvent::SetHintLevel(level) => {
                self.config.hint_level = level;
                Ok(())
            }
            UiEvent::StartGame => self.start_deal(),
            UiEvent::PointerDown { y } => self.pointer_down(y),
            UiEvent::PointerMove { y } => self.pointer_move(y),
            UiEvent::PointerUp | UiEvent::PointerCancel => self.pointer_release(),
            UiEvent::Next => self.next(),
            UiEvent::Exit => {
                self.exit(confirm);
                Ok(())
            }
            UiEvent::BackToMenu => {
                self.back_to_menu(confirm);
                Ok(())
            }
            UiEvent::ReviewLastDeal => self.replay(),
        };

        if let Err(err) = result {
            self.report(err);
        }
        self.snapshot()
    }

    /// Validates the setup, draws roles and a secret, and starts a new deal,
    /// replacing any previous one.
    pub fn start_deal(&mut self) -> Result<(), GameError> {
        validate(self.roster.players(), &self.config)?;
        let assignment = assign(
            self.roster.players(),
            &self.config,
            &self.catalog,
            &mut self.rng,
        );
        let session =
            DealSession::start(self.roster.players().to_vec(), assignment, &mut self.rng);
        info!(
            deal = %session.id,
            players = self.roster.len(),
            impostors = self.config.impostor_count,
            hints = self.config.hints_enabled,
            "Deal started"
        );
        self.session = Some(session);
        self.reset_gesture();
        self.view = View::Deal;
        Ok(())
    }

    /// Re-walks the last completed deal with the same roles and secret.
    pub fn replay(&mut self) -> Result<(), GameError> {
        let Some(session) = self.session.as_mut() else {
            self.view = View::Menu;
            return Err(GameError::NoPriorDealToReplay);
        };
        session.replay()?;
        info!(deal = %session.id, "Replaying deal");
        self.reset_gesture();
        self.view = View::Deal;
        Ok(())
    }

    /// Discards the live deal, if any, and returns to the menu.
    pub fn terminate(&mut self) {
        if let Some(session) = self.session.take() {
            info!(deal = %session.id, "Deal discarded");
        }
        self.reset_gesture();
        self.view = View::Menu;
    }

    fn add_player(&mut self, raw: &str) -> Result<(), GameError> {
        if let Some(player) = self.roster.add(raw)? {
            debug!(name = %player.display_name, "Player added");
        }
        self.reclamp();
        Ok(())
    }

    fn remove_player(&mut self, index: usize, confirm: &mut impl Confirm) -> Result<(), GameError> {
        let Some(player) = self.roster.get(index) else {
            return Err(GameError::PlayerIndexOutOfRange {
                index,
                len: self.roster.len(),
            });
        };
        if !confirm.confirm(&format!("Remove {}?", player.display_name)) {
            debug!(index, "Player removal declined");
            return Ok(());
        }
        let removed = self.roster.remove(index)?;
        debug!(name = %removed.display_name, "Player removed");
        self.reclamp();
        Ok(())
    }

    fn reclamp(&mut self) {
        self.config.impostor_count =
            clamp_impostor_count(self.roster.players(), self.config.impostor_count);
    }

    fn live_turn(&mut self) -> Option<&mut DealSession> {
        if self.view != View::Deal {
            return None;
        }
        self.session.as_mut().filter(|s| !s.is_completed())
    }

    fn pointer_down(&mut self, y: f32) -> Result<(), GameError> {
        if self.live_turn().is_none() {
            return Ok(());
        }
        self.gesture.begin(y);
        self.lift_pixels = 0.0;
        Ok(())
    }

    fn pointer_move(&mut self, y: f32) -> Result<(), GameError> {
        if !self.gesture.is_active() {
            return Ok(());
        }
        let reading = self.gesture.update(y);
        self.apply_reading(reading)
    }

    fn pointer_release(&mut self) -> Result<(), GameError> {
        let reading = self.gesture.end();
        self.apply_reading(reading)
    }

    fn apply_reading(&mut self, reading: GestureReading) -> Result<(), GameError> {
        self.lift_pixels = reading.lift_pixels;
        match self.live_turn() {
            Some(session) => session.set_revealed(reading.should_reveal),
            None => Ok(()),
        }
    }

    fn reset_gesture(&mut self) {
        self.gesture.end();
        self.lift_pixels = 0.0;
    }

    fn next(&mut self) -> Result<(), GameError> {
        if self.view != View::Deal {
            warn!("Next ignored outside of a deal");
            return Ok(());
        }
        self.reset_gesture();
        let Some(session) = self.session.as_mut() else {
            return Err(GameError::NotInTurn);
        };
        session.set_revealed(false)?;
        match session.advance(&mut self.rng)? {
            DealPhase::InTurn { index, .. } => {
                debug!(deal = %session.id, index, "Next player");
            }
            DealPhase::Completed { starter } => {
                info!(deal = %session.id, starter, "All roles dealt");
                self.view = View::Start;
            }
        }
        Ok(())
    }

    fn exit(&mut self, confirm: &mut impl Confirm) {
        if self.view == View::Menu {
            return;
        }
        if confirm.confirm("Exit to the menu? The current deal will be discarded.") {
            self.terminate();
        } else {
            debug!("Exit declined");
        }
    }

    /// From the start screen the finished deal is kept for review. Mid-deal
    /// it abandons the walk, so it goes through the same confirmation as exit.
    fn back_to_menu(&mut self, confirm: &mut impl Confirm) {
        match self.view {
            View::Start => {
                self.reset_gesture();
                self.view = View::Menu;
            }
            View::Deal => self.exit(confirm),
            View::Menu => warn!("Back to menu ignored in the menu"),
        }
    }

    fn report(&mut self, err: GameError) {
        warn!(error = %err, "Event rejected");
        self.error = Some(err.to_string());
    }

    pub fn snapshot(&self) -> Snapshot {
        let players = self
            .roster
            .players()
            .iter()
            .map(|p| p.display_name.clone())
            .collect::<Vec<_>>();
        let max = max_impostors(self.roster.len());
        let mut snapshot = Snapshot {
            view: self.view,
            current_player_name: None,
            progress: None,
            is_last_turn: false,
            revealed: false,
            lift_pixels: self.lift_pixels,
            role_label: None,
            hint_text: None,
            starter_name: None,
            roster_warning: self.roster.len() < crate::roster::MIN_PLAYERS
                || has_duplicates(self.roster.players()),
            roster_status: format_roster_status(players.len()),
            players,
            impostor_count: self.config.impostor_count,
            max_impostors: max,
            impostor_max_label: format_impostor_max(max),
            hints_enabled: self.config.hints_enabled,
            hint_level: self.config.hint_level,
            can_review: self.session.as_ref().is_some_and(DealSession::is_completed),
            error: self.error.clone(),
        };

        let Some(session) = self.session.as_ref() else {
            return snapshot;
        };
        match self.view {
            View::Deal => {
                if let Some(index) = session.current_index() {
                    snapshot.current_player_name =
                        session.current_player().map(|p| p.display_name.clone());
                    snapshot.progress = Some(format_progress(index, session.players().len()));
                    snapshot.is_last_turn = session.is_last_turn();
                    snapshot.revealed = session.is_revealed();
                    if session.is_revealed() {
                        snapshot.role_label = session.current_role();
                        snapshot.hint_text = session
                            .disclosure(HintSettings::from(&self.config))
                            .map(str::to_string);
                    }
                }
            }
            View::Start => {
                snapshot.starter_name = session.starter().map(|p| p.display_name.clone());
            }
            View::Menu => {}
        }
        snapshot
    }
}
