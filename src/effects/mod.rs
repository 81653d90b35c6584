//! Card effects.
//!
//! - `EffectSpec`: one effect as authored (type, target, mode, magnitude,
//!   reference template)
//! - `EffectResolver`: applies an `EffectSpec` to the battle
//! - `validate_template`: the content check run before a battle starts

mod effect;
mod resolver;
mod validate;

pub use effect::{EffectMode, EffectSpec, EffectTarget, EffectType, EffectValue, VariableValue};
pub use resolver::{EffectResolver, ResolveResult, ResolverContext};
pub use validate::{validate_effect, validate_template};
