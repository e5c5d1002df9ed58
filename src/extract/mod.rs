//! The extraction pipeline: units, per-category extractors, summary.

pub mod classify;
pub mod elements;
pub mod flatten;
pub mod lookup;
pub mod materials;
pub mod mep;
pub mod spatial;
pub mod summary;
pub mod units;

use std::path::Path;
use std::time::Instant;

use indexmap::IndexSet;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AccessError, ExtractError};
use crate::model::{EntityId, ExtractionResult, ModelAccess};
use crate::parser::open_model;

pub use classify::classify;
pub use flatten::Flattened;
pub use lookup::PropertyLookup;
pub use materials::{accumulate_usage, resolve_name};
pub use summary::summarize;
pub use units::{normalize_units, round_to, UnitScales};

/// Runs every extractor over an already-loaded model.
pub fn extract(model: &dyn ModelAccess) -> Result<ExtractionResult, ExtractError> {
    extract_since(model, Instant::now())
}

/// Loads `path` and extracts it; `parse_time_ms` includes loading.
pub fn extract_file(path: &Path, config: &Config) -> Result<ExtractionResult, ExtractError> {
    let start = Instant::now();
    info!(path = %path.display(), "Extracting IFC model");
    let model = open_model(path, Some(config.max_file_size_bytes()))?;
    extract_since(&model, start)
}

fn extract_since(model: &dyn ModelAccess, start: Instant) -> Result<ExtractionResult, ExtractError> {
    let scales = normalize_units(model);
    debug!(?scales, schema = model.schema(), "Unit scales");

    let structural = elements::structural_elements(model)?;
    let openings = elements::openings(model, scales)?;
    let mep_elements = mep::mep_elements(model, scales)?;
    let quantity_summary = summarize(&structural, &openings, &mep_elements, scales);
    let structural_elements: Vec<_> = structural.into_iter().map(|f| f.element).collect();

    let result = ExtractionResult {
        file_info: spatial::file_info(model),
        project: spatial::project_info(model)?,
        spatial_structure: spatial::spatial_structure(model, scales)?,
        spaces: spatial::spaces(model, scales)?,
        structural_elements,
        openings,
        mep_elements,
        materials: accumulate_usage(model)?,
        quantity_summary,
        parse_time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    };

    info!(
        structural = result.structural_elements.len(),
        openings = result.openings.len(),
        mep = result.mep_elements.len(),
        spaces = result.spaces.len(),
        elapsed_ms = result.parse_time_ms,
        "Extraction complete"
    );

    Ok(result)
}

/// Entities of every catalog tag, each reported once under the first tag
/// that covers it. Tags the schema does not define contribute nothing.
pub(crate) fn catalog_entities(
    model: &dyn ModelAccess,
    catalog: &[&str],
) -> Result<Vec<EntityId>, AccessError> {
    let mut ids = IndexSet::new();
    for tag in catalog {
        match model.entities_of_type(tag) {
            Ok(found) => ids.extend(found),
            Err(AccessError::UnknownEntityType { tag, schema }) => {
                debug!(%tag, %schema, "Entity type not in schema, skipping");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(ids.into_iter().collect())
}
