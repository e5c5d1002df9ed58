//! Material names for elements and material usage across a model.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::AccessError;
use crate::model::{EntityId, Material, MaterialAssignment, MaterialUsage, ModelAccess};

impl MaterialAssignment {
    /// Constituent materials in order; a layer, constituent or profile
    /// without a material contributes nothing.
    #[must_use]
    pub fn members(&self) -> Vec<&Material> {
        match self {
            MaterialAssignment::Material(material) => vec![material],
            MaterialAssignment::LayerSet(set) => set.layers.iter().flatten().collect(),
            MaterialAssignment::LayerSetUsage(usage) => usage
                .iter()
                .flat_map(|set| set.layers.iter().flatten())
                .collect(),
            MaterialAssignment::List(materials) => materials.iter().collect(),
            MaterialAssignment::ConstituentSet(constituents) => constituents.iter().flatten().collect(),
            MaterialAssignment::ProfileSet(set) => set.profiles.iter().flatten().collect(),
            MaterialAssignment::ProfileSetUsage(usage) => usage
                .iter()
                .flat_map(|set| set.profiles.iter().flatten())
                .collect(),
        }
    }
}

/// Human-readable material name: member names joined with ", ", unnamed
/// members skipped. Empty when nothing is assigned.
#[must_use]
pub fn resolve_name(assignment: Option<&MaterialAssignment>) -> String {
    let Some(assignment) = assignment else {
        return String::new();
    };
    assignment
        .members()
        .into_iter()
        .filter_map(Material::display_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolved material name of one element; traversal failures yield "".
pub fn material_name(model: &dyn ModelAccess, id: EntityId) -> String {
    match model.material(id) {
        Ok(assignment) => resolve_name(assignment.as_ref()),
        Err(err) => {
            debug!(entity = id, error = %err, "Unresolved material");
            String::new()
        }
    }
}

/// Counts every member material of every product, sorted by descending
/// count. Ties keep first-occurrence order.
pub fn accumulate_usage(model: &dyn ModelAccess) -> Result<Vec<MaterialUsage>, AccessError> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    for id in model.entities_of_type("IfcProduct")? {
        let assignment = match model.material(id) {
            Ok(Some(assignment)) => assignment,
            Ok(None) => continue,
            Err(err) => {
                debug!(entity = id, error = %err, "Skipping material usage");
                continue;
            }
        };
        for member in assignment.members() {
            let name = member.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Unknown");
            *counts.entry(name.to_string()).or_default() += 1;
        }
    }

    let mut usage: Vec<MaterialUsage> = counts
        .into_iter()
        .map(|(name, usage_count)| MaterialUsage { name, usage_count })
        .collect();
    usage.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
    Ok(usage)
}
