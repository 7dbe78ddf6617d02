//! The campaign's force tree and layered force icons.
//!
//! Forces live in an arena indexed by [`ForceId`]. Index 0 is the root; every
//! other force has exactly one parent.

use std::collections::BTreeMap;

use hecs::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ForceId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceKind {
    Root,
    /// The company's top-level force
    Origin,
    CommandLance,
    Company,
    Lance,
}

impl ForceKind {
    pub fn is_lance(&self) -> bool {
        matches!(self, ForceKind::CommandLance | ForceKind::Lance)
    }
}

/// Semantic slot an icon layer is drawn in, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LayerSlot {
    Background,
    Type,
    Formation,
    Adjustment,
    Alphanumeric,
    Logo,
}

/// One image in an icon layer: a directory category plus a file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconLayer {
    pub category: String,
    pub filename: String,
}

impl IconLayer {
    pub fn new(category: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            filename: filename.into(),
        }
    }
}

/// A force icon composited from ordered layers, several per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayeredIcon {
    layers: BTreeMap<LayerSlot, Vec<IconLayer>>,
}

impl LayeredIcon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer to a slot, creating the slot if needed.
    pub fn append(&mut self, slot: LayerSlot, layer: IconLayer) {
        self.layers.entry(slot).or_default().push(layer);
    }

    pub fn layers(&self, slot: LayerSlot) -> &[IconLayer] {
        self.layers.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.layers.values().all(Vec::is_empty)
    }

    /// All layers in drawing order
    pub fn iter(&self) -> impl Iterator<Item = (LayerSlot, &IconLayer)> + '_ {
        self.layers
            .iter()
            .flat_map(|(slot, layers)| layers.iter().map(move |layer| (*slot, layer)))
    }
}

/// A person in a force, with the unit they crew (if any).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForceSlot {
    pub person: Entity,
    pub unit: Option<Entity>,
}

#[derive(Debug, Clone)]
pub struct Force {
    pub name: String,
    pub kind: ForceKind,
    pub parent: Option<ForceId>,
    pub children: Vec<ForceId>,
    pub slots: Vec<ForceSlot>,
    pub icon: Option<LayeredIcon>,
}

impl Force {
    pub fn new(name: impl Into<String>, kind: ForceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            children: Vec::new(),
            slots: Vec::new(),
            icon: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForceTree {
    forces: Vec<Force>,
}

impl Default for ForceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceTree {
    pub const ROOT: ForceId = ForceId(0);

    pub fn new() -> Self {
        Self {
            forces: vec![Force::new("Root", ForceKind::Root)],
        }
    }

    /// Attach `force` under `parent`. Returns `None` if the parent does not exist.
    pub fn add(&mut self, mut force: Force, parent: ForceId) -> Option<ForceId> {
        if parent.0 >= self.forces.len() {
            return None;
        }
        let id = ForceId(self.forces.len());
        force.parent = Some(parent);
        force.children.clear();
        self.forces.push(force);
        self.forces[parent.0].children.push(id);
        Some(id)
    }

    pub fn get(&self, id: ForceId) -> Option<&Force> {
        self.forces.get(id.0)
    }

    pub fn get_mut(&mut self, id: ForceId) -> Option<&mut Force> {
        self.forces.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ForceId, &Force)> + '_ {
        self.forces.iter().enumerate().map(|(i, f)| (ForceId(i), f))
    }

    /// `id` and every force below it, depth first.
    pub fn subtree(&self, id: ForceId) -> Vec<ForceId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(force) = self.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(force.children.iter().rev().copied());
        }
        out
    }

    /// Every unit crewed anywhere in the subtree.
    pub fn units_in(&self, id: ForceId) -> Vec<Entity> {
        self.subtree(id)
            .into_iter()
            .filter_map(|f| self.get(f))
            .flat_map(|f| f.slots.iter().filter_map(|s| s.unit))
            .collect()
    }

    /// Lances in the subtree, in tree order.
    pub fn lances_in(&self, id: ForceId) -> Vec<ForceId> {
        self.subtree(id)
            .into_iter()
            .filter(|f| self.get(*f).map(|f| f.kind.is_lance()).unwrap_or(false))
            .collect()
    }
}
