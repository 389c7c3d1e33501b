use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::blueprints::{Blueprint, SchemaError};
use crate::domain::{BlueprintName, Blueprints};

/// In-memory registry of blueprint definitions. Cheap to clone; all
/// clones share the same map, so an upserted blueprint is visible to
/// every holder immediately.
#[derive(Clone, Debug, Default)]
pub struct BlueprintStore {
    internal: Arc<RwLock<HashMap<BlueprintName, Arc<Blueprint>>>>,
}

impl BlueprintStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means another writer panicked mid-operation;
    // the map itself is always in a consistent state.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<BlueprintName, Arc<Blueprint>>> {
        self.internal
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<BlueprintName, Arc<Blueprint>>> {
        self.internal
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers the definition unless one with the same name already
    /// exists, in which case the existing definition wins. Seed scripts
    /// are therefore safe to re-run. Attempting to reshape a system
    /// blueprint this way is rejected instead of ignored.
    pub fn upsert(&self, blueprint: Blueprint) -> Result<Arc<Blueprint>, SchemaError> {
        let mut map = self.write();
        match map.entry(blueprint.name.clone()) {
            Entry::Occupied(existing) => {
                if existing.get().is_system && !same_definition(existing.get(), &blueprint) {
                    return Err(SchemaError::ProtectedBlueprint {
                        name: blueprint.name,
                    });
                }
                tracing::debug!(name = %blueprint.name, "blueprint already registered, keeping existing definition");
                Ok(existing.get().clone())
            }
            Entry::Vacant(slot) => {
                tracing::debug!(name = %blueprint.name, "registering blueprint");
                Ok(slot.insert(Arc::new(blueprint)).clone())
            }
        }
    }

    /// Re-keys a custom blueprint under a new name. System blueprints
    /// keep their identity for life.
    pub fn rename(&self, from: &BlueprintName, to: BlueprintName) -> Result<(), SchemaError> {
        let mut map = self.write();
        if map.contains_key(&to) {
            return Err(SchemaError::AlreadyExists { name: to });
        }
        match map.remove(from) {
            None => Err(SchemaError::NotFound { name: from.clone() }),
            Some(existing) if existing.is_system => {
                map.insert(from.clone(), existing);
                Err(SchemaError::ProtectedBlueprint { name: from.clone() })
            }
            Some(existing) => {
                let mut renamed = Blueprint::clone(&existing);
                renamed.name = to.clone();
                map.insert(to, Arc::new(renamed));
                Ok(())
            }
        }
    }

    pub fn delete(&self, name: &BlueprintName) -> Result<(), SchemaError> {
        let mut map = self.write();
        match map.get(name) {
            None => Err(SchemaError::NotFound { name: name.clone() }),
            Some(existing) if existing.is_system => {
                Err(SchemaError::ProtectedBlueprint { name: name.clone() })
            }
            Some(_) => {
                map.remove(name);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

// Structural comparison through the serialized form. `PartialEq` on
// `Blueprint` is identity by name, which is too weak here.
fn same_definition(a: &Blueprint, b: &Blueprint) -> bool {
    serde_json::to_value(a).ok() == serde_json::to_value(b).ok()
}

impl Blueprints for BlueprintStore {
    fn list(&self) -> Vec<Arc<Blueprint>> {
        let mut all: Vec<_> = self.read().values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    fn get(&self, name: &BlueprintName) -> Option<Arc<Blueprint>> {
        self.read().get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{component, system_document, text_field};

    fn name(s: &str) -> BlueprintName {
        BlueprintName::try_new(s).unwrap()
    }

    #[test]
    fn upsert_is_idempotent_by_name() {
        let store = BlueprintStore::new();
        store.upsert(component("HeroBanner", vec![text_field("heading")])).unwrap();
        store.upsert(component("HeroBanner", vec![text_field("heading")])).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn the_existing_definition_wins_on_re_upsert() {
        let store = BlueprintStore::new();
        store.upsert(component("HeroBanner", vec![text_field("heading")])).unwrap();
        store
            .upsert(component(
                "HeroBanner",
                vec![text_field("heading"), text_field("subheading")],
            ))
            .unwrap();

        let stored = store.get(&name("HeroBanner")).unwrap();
        assert_eq!(stored.fields.len(), 1);
    }

    #[test]
    fn upserts_are_visible_through_clones() {
        let store = BlueprintStore::new();
        let view = store.clone();
        store.upsert(component("RichText", vec![text_field("content")])).unwrap();
        assert!(view.get(&name("RichText")).is_some());
    }

    #[test]
    fn system_definitions_cannot_be_reshaped_by_upsert() {
        let store = BlueprintStore::new();
        store
            .upsert(system_document("Navigation", false, vec![text_field("label")]))
            .unwrap();

        // identical re-upsert is a no-op
        store
            .upsert(system_document("Navigation", false, vec![text_field("label")]))
            .unwrap();

        // a different shape under the same name is refused
        let reshaped = system_document("Navigation", false, vec![text_field("url")]);
        assert_eq!(
            store.upsert(reshaped),
            Err(SchemaError::ProtectedBlueprint {
                name: name("Navigation")
            })
        );
        let stored = store.get(&name("Navigation")).unwrap();
        assert_eq!(stored.fields[0].name.as_ref(), "label");
    }

    #[test]
    fn system_blueprints_reject_rename_and_delete() {
        let store = BlueprintStore::new();
        store
            .upsert(system_document("Navigation", false, vec![text_field("label")]))
            .unwrap();

        assert_eq!(
            store.rename(&name("Navigation"), name("MainMenu")),
            Err(SchemaError::ProtectedBlueprint {
                name: name("Navigation")
            })
        );
        assert_eq!(
            store.delete(&name("Navigation")),
            Err(SchemaError::ProtectedBlueprint {
                name: name("Navigation")
            })
        );
        assert!(store.get(&name("Navigation")).is_some());
    }

    #[test]
    fn custom_blueprints_can_be_renamed_and_deleted() {
        let store = BlueprintStore::new();
        store.upsert(component("CTASection", vec![text_field("heading")])).unwrap();

        store.rename(&name("CTASection"), name("CallToAction")).unwrap();
        assert!(store.get(&name("CTASection")).is_none());
        let renamed = store.get(&name("CallToAction")).unwrap();
        assert_eq!(renamed.fields.len(), 1);

        store.delete(&name("CallToAction")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn rename_refuses_to_shadow_an_existing_blueprint() {
        let store = BlueprintStore::new();
        store.upsert(component("RichText", vec![text_field("content")])).unwrap();
        store.upsert(component("Markdown", vec![text_field("content")])).unwrap();

        assert_eq!(
            store.rename(&name("Markdown"), name("RichText")),
            Err(SchemaError::AlreadyExists {
                name: name("RichText")
            })
        );
    }

    #[test]
    fn missing_blueprints_report_not_found() {
        let store = BlueprintStore::new();
        assert_eq!(
            store.delete(&name("Ghost")),
            Err(SchemaError::NotFound { name: name("Ghost") })
        );
    }

    #[test]
    fn list_is_ordered_by_name() {
        let store = BlueprintStore::new();
        store.upsert(component("VideoEmbed", vec![text_field("videoUrl")])).unwrap();
        store.upsert(component("Asset", vec![text_field("alt")])).unwrap();

        let names: Vec<String> = store.list().iter().map(|b| b.name.to_string()).collect();
        assert_eq!(names, vec!["Asset", "VideoEmbed"]);
    }
}
