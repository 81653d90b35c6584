//! Content validation.
//!
//! Catches authoring bugs before a battle starts: anything reported here
//! would otherwise be logged and skipped at resolution time.

use crate::cards::{CardRegistry, CardTemplate};
use crate::error::ContentError;

use super::{EffectMode, EffectSpec, EffectTarget, EffectType};

/// Check one effect against the fields its type requires.
pub fn validate_effect(effect: &EffectSpec, registry: &CardRegistry) -> Result<(), ContentError> {
    let kind = effect.effect_type;
    match kind {
        EffectType::Undefined => return Err(ContentError::UndefinedEffectType),
        EffectType::NoEffect => return Ok(()),
        _ => {}
    }

    if kind.needs_target()
        && matches!(effect.target, EffectTarget::Undefined | EffectTarget::NoTarget)
    {
        return Err(ContentError::UndefinedTarget { effect: kind });
    }
    if kind.needs_mode() && effect.mode == EffectMode::Undefined {
        return Err(ContentError::UndefinedMode { effect: kind });
    }
    if kind.needs_value() {
        effect.amount()?;
    }
    if kind.needs_reference() {
        let id = effect
            .reference
            .ok_or(ContentError::MissingReference { effect: kind })?;
        registry.require(id)?;
    }
    Ok(())
}

/// Check every on-execute and on-delete effect of a template.
pub fn validate_template(
    template: &CardTemplate,
    registry: &CardRegistry,
) -> Result<(), ContentError> {
    template
        .effects
        .iter()
        .chain(&template.on_delete_effects)
        .try_for_each(|effect| validate_effect(effect, registry))
}
