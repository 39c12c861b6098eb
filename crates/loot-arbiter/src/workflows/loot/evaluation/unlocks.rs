use super::super::domain::{ItemId, ItemMetadata};
use super::super::host::GameData;
use super::diagnostics::Diagnostics;

/// A loot item with its sheet row and faded-copy indirection resolved once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedItem {
    pub id: ItemId,
    pub metadata: Option<ItemMetadata>,
    /// Canonical unlockable ids for faded copies; empty for everything else.
    pub faded_targets: Vec<ItemId>,
}

impl ResolvedItem {
    pub fn lookup<G>(data: &G, id: ItemId, diagnostics: &mut Diagnostics) -> Self
    where
        G: GameData + ?Sized,
    {
        let metadata = data.resolve_item(id);
        let faded_targets = match &metadata {
            Some(item) if item.is_faded_copy => match data.resolve_recipe_target(id) {
                Some(target) => {
                    diagnostics.note(format!(
                        "Updating faded copy {} ({id}) to its finished item ({target})",
                        item.name
                    ));
                    vec![target]
                }
                None => Vec::new(),
            },
            _ => Vec::new(),
        };

        Self {
            id,
            metadata,
            faded_targets,
        }
    }

    pub fn name(&self) -> String {
        match &self.metadata {
            Some(item) => item.name.clone(),
            None => format!("item {}", self.id),
        }
    }

    /// Unlock state, following faded copies to their finished items.
    pub fn is_unlocked<G>(&self, data: &G) -> bool
    where
        G: GameData + ?Sized,
    {
        if !self.faded_targets.is_empty() {
            return self.faded_targets_unlocked(data);
        }
        self.metadata.is_some() && data.is_unlocked(self.id)
    }

    pub fn faded_targets_unlocked<G>(&self, data: &G) -> bool
    where
        G: GameData + ?Sized,
    {
        !self.faded_targets.is_empty()
            && self
                .faded_targets
                .iter()
                .all(|target| data.is_unlocked(*target))
    }

    pub fn is_unlockable<G>(&self, data: &G) -> bool
    where
        G: GameData + ?Sized,
    {
        if !self.faded_targets.is_empty() {
            return true;
        }
        self.metadata
            .as_ref()
            .map(|item| data.is_unlockable(item))
            .unwrap_or(false)
    }
}
