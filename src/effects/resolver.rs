//! Effect resolution - applying effects to the battle.
//!
//! The `EffectResolver` interprets one [`EffectSpec`] on behalf of a source
//! side. `Self` targets resolve to the source, `Opponent` targets to the
//! other side. All state it touches is borrowed through a
//! [`ResolverContext`]; it owns nothing.
//!
//! Malformed content (undefined target or mode, missing magnitude or
//! reference) is logged at `error` level and the effect is skipped. The
//! rest of the card's effect list still resolves.

use tracing::{debug, error, warn};

use crate::cards::{CardInstance, CardRegistry, CardTemplate, InstanceIdAllocator};
use crate::core::{GameRng, Side, Sides, Entity};
use crate::error::ContentError;
use crate::events::{BattleEvent, EventQueue};

use super::{EffectMode, EffectSpec, EffectTarget, EffectType};

/// Everything an effect may read or write.
pub struct ResolverContext<'a> {
    pub entities: &'a mut Sides<Entity>,
    pub registry: &'a CardRegistry,
    pub rng: &'a mut GameRng,
    pub ids: &'a mut InstanceIdAllocator,
    pub events: &'a mut EventQueue,
    /// Bound on nested on-delete resolution.
    pub max_depth: usize,
}

impl<'a> ResolverContext<'a> {
    pub fn new(
        entities: &'a mut Sides<Entity>,
        registry: &'a CardRegistry,
        rng: &'a mut GameRng,
        ids: &'a mut InstanceIdAllocator,
        events: &'a mut EventQueue,
    ) -> Self {
        Self {
            entities,
            registry,
            rng,
            ids,
            events,
            max_depth: 8,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Result of resolving an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// The battle changed.
    Applied,
    /// Nothing to do (zero amount, empty pile, `NoEffect`).
    NoOp,
    /// Content error; the effect was skipped.
    Skipped(ContentError),
}

/// Resolves effects against the battle.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve an effect list in declared order.
    pub fn resolve_all(
        ctx: &mut ResolverContext<'_>,
        effects: &[EffectSpec],
        source: Side,
    ) -> Vec<ResolveResult> {
        Self::resolve_all_at(ctx, effects, source, 0)
    }

    /// Resolve a single effect for `source`.
    pub fn resolve(
        ctx: &mut ResolverContext<'_>,
        effect: &EffectSpec,
        source: Side,
    ) -> ResolveResult {
        Self::resolve_at(ctx, effect, source, 0)
    }

    /// Which side an effect lands on.
    pub fn target_side(effect: &EffectSpec, source: Side) -> Result<Side, ContentError> {
        match effect.target {
            EffectTarget::Owner => Ok(source),
            EffectTarget::Opponent => Ok(source.opponent()),
            EffectTarget::Undefined | EffectTarget::NoTarget => Err(ContentError::UndefinedTarget {
                effect: effect.effect_type,
            }),
        }
    }

    fn resolve_all_at(
        ctx: &mut ResolverContext<'_>,
        effects: &[EffectSpec],
        source: Side,
        depth: usize,
    ) -> Vec<ResolveResult> {
        effects
            .iter()
            .map(|effect| Self::resolve_at(ctx, effect, source, depth))
            .collect()
    }

    fn resolve_at(
        ctx: &mut ResolverContext<'_>,
        effect: &EffectSpec,
        source: Side,
        depth: usize,
    ) -> ResolveResult {
        match Self::apply(ctx, effect, source, depth) {
            Ok(result) => result,
            Err(e) => {
                error!(%source, effect = %effect, error = %e, "skipping malformed effect");
                ResolveResult::Skipped(e)
            }
        }
    }

    fn apply(
        ctx: &mut ResolverContext<'_>,
        effect: &EffectSpec,
        source: Side,
        depth: usize,
    ) -> Result<ResolveResult, ContentError> {
        match effect.effect_type {
            EffectType::NoEffect => return Ok(ResolveResult::NoOp),
            EffectType::Undefined => return Err(ContentError::UndefinedEffectType),
            _ => {}
        }

        let side = Self::target_side(effect, source)?;
        let amount = effect.amount()?;
        if effect.effect_type.needs_mode() && effect.mode == EffectMode::Undefined {
            return Err(ContentError::UndefinedMode {
                effect: effect.effect_type,
            });
        }

        match effect.effect_type {
            EffectType::ModEnergy => Ok(Self::mod_energy(ctx, side, amount)),
            EffectType::ModEnergyNextTurn => Ok(Self::mod_carry_over(ctx, side, amount)),
            _ if amount < 1 => Ok(ResolveResult::NoOp),
            EffectType::Delete => Ok(Self::remove(ctx, side, amount, effect.mode, depth, true)),
            EffectType::Exile => Ok(Self::remove(ctx, side, amount, effect.mode, depth, false)),
            EffectType::Add => {
                let template = Self::reference(ctx.registry, effect)?;
                Ok(Self::add(ctx, side, amount, effect.mode, template))
            }
            EffectType::Transform => {
                let template = Self::reference(ctx.registry, effect)?;
                Ok(Self::transform(ctx, side, amount, effect.mode, template))
            }
            EffectType::MakeUnswappable => Ok(Self::lock(ctx, side, amount, effect.mode)),
            EffectType::NoEffect | EffectType::Undefined => Ok(ResolveResult::NoOp),
        }
    }

    fn reference<'r>(
        registry: &'r CardRegistry,
        effect: &EffectSpec,
    ) -> Result<&'r CardTemplate, ContentError> {
        let id = effect.reference.ok_or(ContentError::MissingReference {
            effect: effect.effect_type,
        })?;
        registry.require(id)
    }

    fn select(
        ctx: &mut ResolverContext<'_>,
        side: Side,
        amount: i32,
        mode: EffectMode,
    ) -> Vec<usize> {
        let entity = &ctx.entities[side];
        entity
            .stack
            .resolve_indices(mode, amount as usize, entity.view_size(), ctx.rng)
    }

    /// Delete (to Discard, firing on-delete effects) or exile selected cards.
    fn remove(
        ctx: &mut ResolverContext<'_>,
        side: Side,
        amount: i32,
        mode: EffectMode,
        depth: usize,
        delete: bool,
    ) -> ResolveResult {
        let indices = Self::select(ctx, side, amount, mode);
        // Identities, not positions: each removal shifts the rest.
        let ids = ctx.entities[side].stack.ids_at(&indices);
        if ids.is_empty() {
            return ResolveResult::NoOp;
        }

        for id in ids {
            let Some(card) = ctx.entities[side].stack.remove_by_id(id) else {
                // Already moved by an earlier card's on-delete effects.
                debug!(%side, card = %id, "selected card no longer in stack");
                continue;
            };

            if !delete {
                debug!(%side, card = %card.display_text(), "exiled");
                let event = BattleEvent::CardExiled {
                    side,
                    card: card.id,
                    title: card.title.clone(),
                };
                ctx.entities[side].exile.push(card);
                ctx.events.push(event);
                continue;
            }

            if !card.on_delete_effects.is_empty() {
                if depth < ctx.max_depth {
                    Self::resolve_all_at(ctx, &card.on_delete_effects, side, depth + 1);
                } else {
                    warn!(%side, card = %card.display_text(), depth, "on-delete chain too deep, not resolving");
                }
            }

            debug!(%side, card = %card.display_text(), "deleted");
            let event = BattleEvent::CardDeleted {
                side,
                card: card.id,
                title: card.title.clone(),
            };
            ctx.entities[side].discard.push(card);
            ctx.events.push(event);
        }
        ResolveResult::Applied
    }

    /// Insert one unit at a time, re-resolving the position for each.
    fn add(
        ctx: &mut ResolverContext<'_>,
        side: Side,
        amount: i32,
        mode: EffectMode,
        template: &CardTemplate,
    ) -> ResolveResult {
        for _ in 0..amount {
            let entity = &mut ctx.entities[side];
            let index = match mode {
                EffectMode::Top => 0,
                EffectMode::Bottom => entity.stack.len(),
                _ => entity
                    .stack
                    .resolve_indices(mode, 1, entity.view_size(), ctx.rng)
                    .first()
                    .copied()
                    .unwrap_or(0),
            };

            let card = CardInstance::from_template(ctx.ids.alloc(), template);
            debug!(%side, card = %card.display_text(), index, "added");
            let event = BattleEvent::CardAdded {
                side,
                card: card.id,
                title: card.title.clone(),
                index,
            };
            entity.stack.insert(index, card);
            ctx.events.push(event);
        }
        ResolveResult::Applied
    }

    fn transform(
        ctx: &mut ResolverContext<'_>,
        side: Side,
        amount: i32,
        mode: EffectMode,
        template: &CardTemplate,
    ) -> ResolveResult {
        let indices = Self::select(ctx, side, amount, mode);
        if indices.is_empty() {
            return ResolveResult::NoOp;
        }

        for index in indices {
            let Some(card) = ctx.entities[side].stack.get_mut(index) else {
                continue;
            };
            let from = std::mem::take(&mut card.title);
            card.set_template(template);
            debug!(%side, index, %from, to = %card.title, "transformed");
            ctx.events.push(BattleEvent::CardTransformed {
                side,
                card: card.id,
                from,
                to: card.title.clone(),
            });
        }
        ResolveResult::Applied
    }

    fn lock(
        ctx: &mut ResolverContext<'_>,
        side: Side,
        amount: i32,
        mode: EffectMode,
    ) -> ResolveResult {
        let indices = Self::select(ctx, side, amount, mode);
        let mut changed = false;
        for index in indices {
            let Some(card) = ctx.entities[side].stack.get_mut(index) else {
                continue;
            };
            if card.make_unswappable() {
                debug!(%side, index, card = %card.display_text(), "locked");
                ctx.events.push(BattleEvent::CardLocked { side, card: card.id });
                changed = true;
            }
        }
        if changed {
            ResolveResult::Applied
        } else {
            ResolveResult::NoOp
        }
    }

    fn mod_energy(ctx: &mut ResolverContext<'_>, side: Side, amount: i32) -> ResolveResult {
        let entity = &mut ctx.entities[side];
        entity.current_energy += amount;
        debug!(%side, delta = amount, energy = entity.current_energy, "energy changed");
        ctx.events.push(BattleEvent::EnergyChanged {
            side,
            delta: amount,
            energy: entity.current_energy,
        });
        ResolveResult::Applied
    }

    fn mod_carry_over(ctx: &mut ResolverContext<'_>, side: Side, amount: i32) -> ResolveResult {
        let entity = &mut ctx.entities[side];
        entity.carry_over_energy += amount;
        debug!(%side, delta = amount, carry_over = entity.carry_over_energy, "carry-over changed");
        ctx.events.push(BattleEvent::CarryOverChanged {
            side,
            delta: amount,
            carry_over: entity.carry_over_energy,
        });
        ResolveResult::Applied
    }
}
