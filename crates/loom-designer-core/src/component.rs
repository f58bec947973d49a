//! Component metadata: container-ness, nesting rules, allowed actions.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Operations a node may permit or refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeAction {
    Remove,
    Copy,
    Move,
}

impl NodeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remove => "remove",
            Self::Copy => "copy",
            Self::Move => "move",
        }
    }
}

impl fmt::Display for NodeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a component type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentMeta {
    /// Whether nodes of this component may hold children.
    pub is_container: bool,
    /// Parent components this one may be nested in. `None` allows any container.
    pub allowed_parents: Option<Vec<SmolStr>>,
    /// Actions nodes of this component refuse.
    pub disabled_actions: Vec<NodeAction>,
}

impl ComponentMeta {
    pub fn leaf() -> Self {
        Self::default()
    }

    pub fn container() -> Self {
        Self {
            is_container: true,
            ..Self::default()
        }
    }

    pub fn with_allowed_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.allowed_parents = Some(parents.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_disabled_action(mut self, action: NodeAction) -> Self {
        if !self.disabled_actions.contains(&action) {
            self.disabled_actions.push(action);
        }
        self
    }

    pub fn allows_parent(&self, parent_component: &str) -> bool {
        match &self.allowed_parents {
            Some(parents) => parents.iter().any(|p| p == parent_component),
            None => true,
        }
    }

    pub fn permits(&self, action: NodeAction) -> bool {
        !self.disabled_actions.contains(&action)
    }
}

/// Component name to metadata lookup.
///
/// Unregistered components are treated as unrestricted leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRegistry {
    components: HashMap<SmolStr, ComponentMeta>,
    fallback: ComponentMeta,
}

/// Layout components registered as containers by default.
const DEFAULT_CONTAINERS: &[&str] = &[
    "Page", "Block", "Div", "Section", "Card", "Form", "Row", "Col", "Tabs", "Modal",
];

impl Default for ComponentRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for name in DEFAULT_CONTAINERS {
            registry.register(*name, ComponentMeta::container());
        }
        registry
    }
}

impl ComponentRegistry {
    /// A registry with no components; everything is a leaf.
    pub fn empty() -> Self {
        Self {
            components: HashMap::new(),
            fallback: ComponentMeta::leaf(),
        }
    }

    /// Register or replace a component's metadata.
    pub fn register(&mut self, name: impl Into<SmolStr>, meta: ComponentMeta) -> &mut Self {
        self.components.insert(name.into(), meta);
        self
    }

    pub fn get(&self, name: &str) -> &ComponentMeta {
        self.components.get(name).unwrap_or(&self.fallback)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn is_container(&self, name: &str) -> bool {
        self.get(name).is_container
    }
}
