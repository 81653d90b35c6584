//! The card execution loop.
//!
//! One step: game-over check, affordability check on the top card, pay,
//! move the card to Discard, resolve its on-execute effects in order. The
//! player drives steps one at a time or through [`ExecuteAll`]; the enemy
//! turn runs the same step until it stops.

use std::iter::FusedIterator;

use tracing::{debug, warn};

use super::outcome::{BlockReason, ExecutionOutcome};
use super::session::BattleSession;
use super::state::BattleState;
use crate::core::Side;
use crate::effects::{EffectResolver, ResolverContext};
use crate::events::BattleEvent;

impl BattleSession {
    /// Execute the top card of `side`'s stack.
    ///
    /// The enemy only executes inside [`end_player_turn`](Self::end_player_turn),
    /// so `Side::Enemy` is blocked with `WrongPhase` from any other caller.
    pub fn execute_next(&mut self, side: Side) -> ExecutionOutcome {
        self.try_execute(side, true)
    }

    /// Execute cards until one is blocked or the battle ends.
    ///
    /// The iterator yields one outcome per step, ending with the `Blocked`
    /// or `GameOver` outcome that stopped it. State is fully updated each
    /// time an outcome is yielded. Events can be drained between steps
    /// through [`ExecuteAll::drain_events`]. The pass is finite: at most
    /// `max_steps_per_turn` cards run in one turn. As with
    /// [`execute_next`](Self::execute_next), only the player can start a pass.
    pub fn execute_all(&mut self, side: Side) -> ExecuteAll<'_> {
        ExecuteAll {
            session: self,
            side,
            started: false,
            finished: false,
        }
    }

    /// Phase, gate and drain checks, then one step.
    ///
    /// `new_pass` is false for the second and later steps of an
    /// `ExecuteAll`, which belong to a pass already admitted.
    fn try_execute(&mut self, side: Side, new_pass: bool) -> ExecutionOutcome {
        if let Some(result) = self.result {
            return ExecutionOutcome::GameOver(result);
        }

        let legal = match side {
            Side::Player => self.state.is_player_turn(),
            Side::Enemy => self.state == BattleState::EnemyTurn,
        };
        if !legal {
            warn!(%side, state = %self.state, "execute not allowed in this phase");
            return ExecutionOutcome::Blocked(BlockReason::WrongPhase(self.state));
        }
        if side.is_player() && self.gate.card_held() {
            warn!("execute blocked while a card is held");
            return ExecutionOutcome::Blocked(BlockReason::CardHeld);
        }
        if new_pass && self.config.reject_while_events_pending && !self.events.is_empty() {
            warn!(pending = self.events.len(), "execute blocked until events are drained");
            return ExecutionOutcome::Blocked(BlockReason::EventsPending);
        }

        if self.state == BattleState::PlayerTurn {
            self.transition(BattleState::PlayerExecution);
        }
        self.step(side)
    }

    /// Execute one card with no phase checks.
    pub(super) fn step(&mut self, side: Side) -> ExecutionOutcome {
        if let Some(result) = self.check_game_over() {
            return ExecutionOutcome::GameOver(result);
        }

        let limit = self.config.max_steps_per_turn;
        if self.turn_steps >= limit {
            warn!(%side, steps = self.turn_steps, "step limit reached for this turn");
            return ExecutionOutcome::Blocked(BlockReason::StepLimit { steps: limit });
        }

        let entity = &mut self.entities[side];
        let Some(cost) = entity.stack.top().map(|card| card.energy_cost) else {
            return ExecutionOutcome::Blocked(BlockReason::EmptyStack);
        };
        if cost > entity.current_energy {
            debug!(%side, cost, available = entity.current_energy, "cannot afford top card");
            return ExecutionOutcome::Blocked(BlockReason::InsufficientEnergy {
                cost,
                available: entity.current_energy,
            });
        }

        let Some(card) = entity.stack.take_top() else {
            return ExecutionOutcome::Blocked(BlockReason::EmptyStack);
        };
        self.turn_steps += 1;
        entity.current_energy -= card.energy_cost;
        entity.discard.push(card.clone());
        debug!(%side, card = %card.display_text(), energy = entity.current_energy, "executed");
        self.events.push(BattleEvent::CardExecuted {
            side,
            card: card.id,
            title: card.title.clone(),
            cost: card.energy_cost,
        });

        let mut ctx = ResolverContext::new(
            &mut self.entities,
            &self.registry,
            &mut self.effect_rng,
            &mut self.ids,
            &mut self.events,
        )
        .with_max_depth(self.config.max_effect_depth);
        EffectResolver::resolve_all(&mut ctx, &card.effects, side);

        ExecutionOutcome::Executed(card)
    }
}

/// One execute-all pass. Holds the session for its whole life, so no other
/// command can interleave with it.
///
/// Not restartable: once it has returned `None` it keeps returning `None`.
pub struct ExecuteAll<'s> {
    session: &'s mut BattleSession,
    side: Side,
    started: bool,
    finished: bool,
}

impl ExecuteAll<'_> {
    /// Take the events produced so far in this pass.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        self.session.drain_events()
    }

    /// Read-only view of the session between steps.
    #[must_use]
    pub fn session(&self) -> &BattleSession {
        self.session
    }
}

impl Iterator for ExecuteAll<'_> {
    type Item = ExecutionOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let outcome = self.session.try_execute(self.side, !self.started);
        self.started = true;
        if !outcome.is_executed() {
            self.finished = true;
        }
        Some(outcome)
    }
}

impl FusedIterator for ExecuteAll<'_> {}
