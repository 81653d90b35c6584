//! Card system: templates, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card templates
//! - `CardTemplate`: Immutable card data (cost, rarity, effect lists)
//! - `CardInstance`: A card in a battle pile, copied from a template
//! - `InstanceId`: Per-battle identity of an instance
//! - `CardRegistry`: Template lookup and content validation
//!
//! ## Copy-on-instantiate
//!
//! Instances own copies of everything they might change at runtime, so a
//! Transform or a gained property never reaches back into the template.

pub mod definition;
pub mod instance;
pub mod properties;
pub mod registry;
mod text;

pub use definition::{CardId, CardTemplate, Rarity};
pub use instance::{CardInstance, InstanceId, InstanceIdAllocator};
pub use properties::{Property, PropertySet};
pub use registry::CardRegistry;
