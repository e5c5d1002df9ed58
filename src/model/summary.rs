use indexmap::IndexMap;
use serde::Serialize;

/// Rollup of counts, lengths and areas for quote generation.
///
/// Lengths are metres and areas square metres, rounded to 2 decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitySummary {
    pub total_elements: usize,
    pub total_mep_elements: usize,

    pub wall_count: usize,
    pub slab_count: usize,
    pub column_count: usize,
    pub beam_count: usize,
    pub door_count: usize,
    pub window_count: usize,

    pub pipe_segment_count: usize,
    pub pipe_fitting_count: usize,
    pub duct_segment_count: usize,
    pub duct_fitting_count: usize,
    pub flow_terminal_count: usize,
    pub valve_count: usize,
    pub pump_count: usize,
    pub boiler_count: usize,
    pub fan_count: usize,
    pub filter_count: usize,

    pub total_pipe_length: f64,
    pub total_duct_length: f64,
    pub total_wall_area: f64,
    pub total_slab_area: f64,

    pub element_count_by_system: IndexMap<String, usize>,
    pub pipe_length_by_system: IndexMap<String, f64>,
    pub duct_length_by_system: IndexMap<String, f64>,
    pub element_count_by_material: IndexMap<String, usize>,
}
