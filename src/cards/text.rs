//! Card text rendering.
//!
//! Full text is the display line, an optional property line, then either the
//! description override or a description generated from the effect lists.
//! An instance's full text also appends the full text of every template its
//! effects create, so a tooltip can show what "Add 1 Junk" means.

use super::definition::{CardId, CardTemplate};
use super::instance::CardInstance;
use super::properties::PropertySet;
use super::registry::CardRegistry;
use crate::effects::EffectSpec;

fn describe_effects(
    effects: &[EffectSpec],
    on_delete: &[EffectSpec],
    registry: &CardRegistry,
) -> String {
    let mut out = effects
        .iter()
        .map(|e| e.describe(registry))
        .collect::<Vec<_>>()
        .join(";\n");
    if !on_delete.is_empty() {
        out.push_str("\nOn Delete:\n");
        out.push_str(
            &on_delete
                .iter()
                .map(|e| e.describe(registry))
                .collect::<Vec<_>>()
                .join(";\n"),
        );
    }
    out
}

fn body(
    display: String,
    properties: &PropertySet,
    description_override: Option<&str>,
    effects: &[EffectSpec],
    on_delete: &[EffectSpec],
    registry: &CardRegistry,
) -> String {
    let mut out = format!("{}:\n", display);
    if !properties.is_empty() {
        out.push_str(&properties.describe());
        out.push('\n');
    }
    match description_override {
        Some(text) => out.push_str(text),
        None => out.push_str(&describe_effects(effects, on_delete, registry)),
    }
    out
}

/// Referenced templates in first-seen order, following references of
/// references. Each template appears once, which also cuts cycles.
fn referenced_templates<'e, 'r>(
    effects: impl Iterator<Item = &'e EffectSpec>,
    registry: &'r CardRegistry,
) -> Vec<&'r CardTemplate> {
    let mut seen: Vec<CardId> = Vec::new();
    let mut pending: Vec<CardId> = effects.filter_map(|e| e.reference).collect();
    pending.reverse();
    let mut found = Vec::new();

    while let Some(id) = pending.pop() {
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);
        if let Some(template) = registry.get(id) {
            found.push(template);
            let nested = template
                .effects
                .iter()
                .chain(&template.on_delete_effects)
                .filter_map(|e| e.reference);
            let start = pending.len();
            pending.extend(nested);
            pending[start..].reverse();
        }
    }
    found
}

impl CardTemplate {
    /// Tooltip text: display line, properties, description.
    #[must_use]
    pub fn full_text(&self, registry: &CardRegistry) -> String {
        body(
            self.display_text(),
            &self.instance_properties(),
            self.description_override.as_deref(),
            &self.effects,
            &self.on_delete_effects,
            registry,
        )
    }
}

impl CardInstance {
    /// Description from the instance's current state.
    #[must_use]
    pub fn description(&self, registry: &CardRegistry) -> String {
        match &self.description_override {
            Some(text) => text.clone(),
            None => describe_effects(&self.effects, &self.on_delete_effects, registry),
        }
    }

    /// Tooltip text followed by the full text of every referenced template.
    #[must_use]
    pub fn full_text(&self, registry: &CardRegistry) -> String {
        let mut out = body(
            self.display_text(),
            &self.properties,
            self.description_override.as_deref(),
            &self.effects,
            &self.on_delete_effects,
            registry,
        );

        let referenced =
            referenced_templates(self.effects.iter().chain(&self.on_delete_effects), registry);
        if !referenced.is_empty() {
            out.push_str("\n\n");
            out.push_str(
                &referenced
                    .iter()
                    .map(|t| t.full_text(registry))
                    .collect::<Vec<_>>()
                    .join("\n\n"),
            );
        }
        out
    }
}
