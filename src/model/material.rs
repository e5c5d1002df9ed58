use serde::Serialize;

/// A single named material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub name: Option<String>,
}

impl Material {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }

    /// Name if present and non-empty.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Layers of a layer set; a layer may carry no material.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaterialLayerSet {
    pub layers: Vec<Option<Material>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaterialProfileSet {
    pub profiles: Vec<Option<Material>>,
}

/// The material variants an element can be associated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterialAssignment {
    Material(Material),
    LayerSet(MaterialLayerSet),
    LayerSetUsage(Option<MaterialLayerSet>),
    List(Vec<Material>),
    ConstituentSet(Vec<Option<Material>>),
    ProfileSet(MaterialProfileSet),
    ProfileSetUsage(Option<MaterialProfileSet>),
}

/// Usage count of one material across all products of a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsage {
    pub name: String,
    pub usage_count: usize,
}
