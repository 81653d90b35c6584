//! The battle session: top-level owner of all battle state.

use tracing::{info, warn};

use super::gate::{InputGate, NoGate};
use super::outcome::SwapOutcome;
use super::state::BattleState;
use crate::cards::{CardRegistry, InstanceIdAllocator};
use crate::core::{BattleConfig, Entity, EntityBaseStats, GameRng, Level, Side, Sides};
use crate::error::{BattleError, LookupError, SwapRejection};
use crate::events::{BattleEvent, EventQueue};
use crate::rules::{check_game_over, GameResult};
use crate::zones::{Deck, PileKind, PileRef};

/// Owns both entities, the registry, the RNG streams and the event queue.
///
/// Every command takes `&mut self`, so at most one resolution pass can be
/// in flight and a reset can only happen between steps.
///
/// ## Example
///
/// ```
/// use stack_battle::battle::{BattleSession, BattleState, ExecutionOutcome};
/// use stack_battle::cards::{CardId, CardRegistry, CardTemplate};
/// use stack_battle::core::{BattleConfig, EntityBaseStats, Side};
///
/// let registry = CardRegistry::from_templates([
///     CardTemplate::new(CardId::new(1), "Zap", 1),
/// ]).unwrap();
/// let mut session = BattleSession::new(BattleConfig::new(42), registry);
///
/// let hero = EntityBaseStats::new("Hero", 2, 3).with_deck(vec![CardId::new(1); 3]);
/// let slime = EntityBaseStats::new("Slime", 1, 3).with_deck(vec![CardId::new(1); 3]);
/// session.setup_battle(hero, slime).unwrap();
/// assert_eq!(session.state(), BattleState::PlayerTurn);
///
/// let executed: Vec<_> = session.execute_all(Side::Player).collect();
/// assert_eq!(executed.len(), 3); // two cards, then blocked on energy
/// assert_eq!(session.entity(Side::Player).stack.len(), 1);
/// ```
pub struct BattleSession {
    pub(super) config: BattleConfig,
    pub(super) registry: CardRegistry,
    pub(super) state: BattleState,
    pub(super) result: Option<GameResult>,
    pub(super) entities: Sides<Entity>,
    pub(super) deck_rng: GameRng,
    pub(super) effect_rng: GameRng,
    pub(super) ids: InstanceIdAllocator,
    pub(super) events: EventQueue,
    pub(super) gate: Box<dyn InputGate>,
    /// Cards executed since the current turn began.
    pub(super) turn_steps: usize,
    stats: Option<Sides<EntityBaseStats>>,
    level: Option<u32>,
}

impl BattleSession {
    /// Create a session in `Setup`. Nothing can execute until
    /// [`setup_battle`](Self::setup_battle) succeeds.
    #[must_use]
    pub fn new(config: BattleConfig, registry: CardRegistry) -> Self {
        let root = GameRng::new(config.seed);
        Self {
            deck_rng: root.for_context("deck"),
            effect_rng: root.for_context("effects"),
            config,
            registry,
            state: BattleState::Setup,
            result: None,
            entities: Sides::from_fn(Entity::empty),
            ids: InstanceIdAllocator::new(),
            events: EventQueue::new(),
            gate: Box::new(NoGate),
            turn_steps: 0,
            stats: None,
            level: None,
        }
    }

    /// Replace the presentation gate.
    pub fn set_gate(&mut self, gate: Box<dyn InputGate>) {
        self.gate = gate;
    }

    /// Build both entities and start the player's first turn.
    ///
    /// Content is validated first; on any error the session is left
    /// untouched. A successful setup discards whatever battle was in
    /// progress, including undrained events.
    pub fn setup_battle(
        &mut self,
        player: EntityBaseStats,
        enemy: EntityBaseStats,
    ) -> Result<(), BattleError> {
        self.registry.validate()?;

        let mut ids = InstanceIdAllocator::new();
        let mut deck_rng = self.deck_rng.clone();
        let stats = Sides::new(player, enemy);
        let player_entity = Entity::from_stats(
            &stats[Side::Player],
            Side::Player,
            self.config.player_stack_swappable,
            &self.registry,
            &mut ids,
            &mut deck_rng,
        )?;
        let enemy_entity = Entity::from_stats(
            &stats[Side::Enemy],
            Side::Enemy,
            self.config.enemy_stack_swappable,
            &self.registry,
            &mut ids,
            &mut deck_rng,
        )?;

        self.entities = Sides::new(player_entity, enemy_entity);
        self.ids = ids;
        self.deck_rng = deck_rng;
        self.stats = Some(stats);
        self.level = None;
        self.result = None;
        self.turn_steps = 0;
        self.state = BattleState::Setup;
        self.events.clear();
        self.events.push(BattleEvent::BattleReset);

        info!(
            player = %self.entities[Side::Player].name,
            enemy = %self.entities[Side::Enemy].name,
            player_cards = self.entities[Side::Player].stack.len(),
            enemy_cards = self.entities[Side::Enemy].stack.len(),
            "battle set up"
        );

        // The enemy refills now; the player refills as its turn begins.
        self.reset_energy(Side::Enemy);
        self.begin_turn(Side::Player);
        Ok(())
    }

    /// Set up from a level's base stats.
    pub fn load_level(&mut self, level: &Level) -> Result<(), BattleError> {
        self.setup_battle(level.player.clone(), level.enemy.clone())?;
        self.level = Some(level.number);
        info!(level = level.number, "level loaded");
        Ok(())
    }

    /// Abort the current battle and set it up again from the last stats.
    pub fn restart(&mut self) -> Result<(), BattleError> {
        let stats = self.stats.as_ref().ok_or(BattleError::NotSetUp)?;
        let (player, enemy) = (stats[Side::Player].clone(), stats[Side::Enemy].clone());
        let level = self.level;
        self.setup_battle(player, enemy)?;
        self.level = level;
        info!("battle restarted");
        Ok(())
    }

    /// Reorder the visible head of `side`'s stack.
    ///
    /// Only accepted during the player's turn. Rejections leave the stack
    /// untouched.
    pub fn attempt_swap(
        &mut self,
        side: Side,
        current: usize,
        target: usize,
        hard: bool,
        bypass: bool,
    ) -> SwapOutcome {
        if !self.state.is_player_turn() {
            warn!(%side, state = %self.state, "swap outside the player's turn");
            return SwapOutcome::Rejected(SwapRejection::WrongPhase(self.state));
        }

        let entity = &mut self.entities[side];
        let view = entity.view_size();
        match entity.stack.swap(view, current, target, hard, bypass) {
            Ok(permutation) => {
                self.events.push(BattleEvent::PileSwapped {
                    side,
                    pile: PileKind::Stack,
                    permutation: permutation.clone(),
                });
                SwapOutcome::Applied(permutation)
            }
            Err(rejection) => {
                warn!(%side, current, target, %rejection, "swap rejected");
                SwapOutcome::Rejected(rejection)
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> BattleState {
        self.state
    }

    /// Set once the battle reaches `GameOver`.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn level(&self) -> Option<u32> {
        self.level
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn entity(&self, side: Side) -> &Entity {
        &self.entities[side]
    }

    #[must_use]
    pub fn pile(&self, pile: PileRef) -> &Deck {
        self.entities[pile.side].pile(pile.kind)
    }

    /// Listing of one pile, one card per line.
    #[must_use]
    pub fn print_pile(&self, pile: PileRef) -> String {
        self.pile(pile).print_contents()
    }

    /// Resolve a console pile token, logging unknown names.
    pub fn lookup_pile(&self, name: &str) -> Result<&Deck, LookupError> {
        match name.parse::<PileRef>() {
            Ok(pile) => Ok(self.pile(pile)),
            Err(e) => {
                warn!(name, "unknown pile");
                Err(e)
            }
        }
    }

    /// Read-only snapshot of one side.
    #[must_use]
    pub fn debug_dump(&self, side: Side) -> String {
        self.entities[side].debug_status()
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        self.events.drain()
    }

    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    // === Turn plumbing shared with the execution and turn modules ===

    pub(super) fn transition(&mut self, to: BattleState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        info!(%from, %to, "battle state changed");
        self.events.push(BattleEvent::StateChanged { from, to });
    }

    /// Inspect both stacks; trips `GameOver` when either is empty.
    pub(super) fn check_game_over(&mut self) -> Option<GameResult> {
        if self.state.is_terminal() {
            return self.result;
        }
        let result = check_game_over(&self.entities)?;
        self.result = Some(result);
        self.transition(BattleState::GameOver);
        info!(%result, "game over");
        self.events.push(BattleEvent::GameOver { result });
        Some(result)
    }

    pub(super) fn reset_energy(&mut self, side: Side) {
        let entity = &mut self.entities[side];
        entity.reset_energy();
        self.events.push(BattleEvent::EnergyReset {
            side,
            energy: entity.current_energy,
        });
    }

    /// Start `side`'s turn: game-over check, phase change, energy refill.
    pub(super) fn begin_turn(&mut self, side: Side) -> Option<GameResult> {
        if let Some(result) = self.check_game_over() {
            return Some(result);
        }
        let state = match side {
            Side::Player => BattleState::PlayerTurn,
            Side::Enemy => BattleState::EnemyTurn,
        };
        self.transition(state);
        self.turn_steps = 0;
        self.events.push(BattleEvent::TurnStarted { side });
        self.reset_energy(side);
        info!(%side, energy = self.entities[side].current_energy, "turn started");
        None
    }
}

impl std::fmt::Debug for BattleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleSession")
            .field("state", &self.state)
            .field("result", &self.result)
            .field("level", &self.level)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}
