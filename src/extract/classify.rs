//! Rule-based assignment of MEP elements to building-service systems.
//!
//! Free text (system property, object type, name) is matched first against
//! Estonian and English vocabularies; the entity type is the fallback.

use once_cell::sync::Lazy;
use regex::Regex;

use super::lookup::PropertyLookup;
use crate::model::{SystemType, Value};

/// Property keys that carry an explicit system classification, in priority order.
pub const SYSTEM_KEYS: &[&str] = &[
    "System Type",
    "SystemType",
    "System Name",
    "SystemName",
    "System Classification",
    "SystemClassification",
    "System",
    "Revit System Type",
    "MEP System Type",
];

/// Keys consulted by the large-bore pipe heuristic.
const PIPE_DIAMETER_KEYS: &[&str] = &["NominalDiameter", "Diameter", "DN"];

/// Nominal diameter (mm) above which an unclassified pipe is taken as a heating main.
const HEATING_MAIN_MIN_DIAMETER: f64 = 100.0;

const HEATING: &[&str] = &[
    r"\bküte\b",
    r"\bkütte\b",
    r"\bradiaator",
    r"\bpõrand.*küte",
    r"\bsoojus",
    r"\bkatel",
    r"\bboiler",
    r"\bheating\b",
    r"\bradiator",
    r"\bhw\b",
    r"\blthw\b",
    r"\bmthw\b",
    r"\bunderfloor\b",
    r"\bboiler",
    r"\bheat\b",
    r"\bhtg\b",
];

const VENTILATION: &[&str] = &[
    r"\bvent",
    r"\bventilatsioon",
    r"\bõhk",
    r"\bväljatõmme",
    r"\bsissepuhke",
    r"\brecup",
    r"\bvent",
    r"\bair\b",
    r"\bsupply air\b",
    r"\bextract\b",
    r"\bexhaust\b",
    r"\bsa\b",
    r"\bea\b",
    r"\bra\b",
    r"\boa\b",
    r"\bahv\b",
    r"\bhvac\b",
    r"\bduct\b",
    r"\bair conditioning\b",
    r"\bac\b",
];

const SEWAGE: &[&str] = &[
    r"\bkanal",
    r"\bkanalisatsioon",
    r"\bäravool",
    r"\breovesi",
    r"\bk1\b",
    r"\bk2\b",
    r"\bwc\b",
    r"\btrapid",
    r"\bsewer",
    r"\bsewage\b",
    r"\bdrain",
    r"\bwaste\b",
    r"\bsoil\b",
    r"\bsw\b",
    r"\bfw\b",
    r"\brw\b",
    r"\bsanitary\b",
    r"\bstorm",
];

const WATER_SUPPLY: &[&str] = &[
    r"\bvesi\b",
    r"\bvee\b",
    r"\bveetoru",
    r"\bsoojavesi",
    r"\bkülmavesi",
    r"\bsvk\b",
    r"\bevk\b",
    r"\bkraani",
    r"\bdušš",
    r"\bsegisti",
    r"\bwater\b",
    r"\bsupply\b",
    r"\bcw\b",
    r"\bdhw\b",
    r"\bcold water\b",
    r"\bhot water\b",
    r"\bdomestic\b",
    r"\bpotable\b",
    r"\bfresh\b",
];

const FIRE_SUPPRESSION: &[&str] = &[
    r"\bfire\b",
    r"\bsprinkler",
    r"\btulekustut",
    r"\bfire suppress",
];

const ELECTRICAL: &[&str] = &[
    r"\belekt",
    r"\bkaabel",
    r"\bvalgust",
    r"\belectric",
    r"\bcable",
    r"\blighting\b",
    r"\bpower\b",
];

/// Pattern groups in evaluation order; the first group with a match decides.
static TEXT_RULES: Lazy<Vec<(SystemType, Vec<Regex>)>> = Lazy::new(|| {
    [
        (SystemType::Heating, HEATING),
        (SystemType::Ventilation, VENTILATION),
        (SystemType::Sewage, SEWAGE),
        (SystemType::WaterSupply, WATER_SUPPLY),
        (SystemType::FireSuppression, FIRE_SUPPRESSION),
        (SystemType::Electrical, ELECTRICAL),
    ]
    .into_iter()
    .map(|(system, patterns)| {
        let compiled = patterns
            .iter()
            .map(|pattern| Regex::new(&format!("(?i){pattern}")).expect("valid classifier pattern"))
            .collect();
        (system, compiled)
    })
    .collect()
});

/// Entity-type substrings checked when no text rule matches, in order.
const TYPE_RULES: &[(&[&str], SystemType)] = &[
    (&["Duct", "AirTerminal"], SystemType::Ventilation),
    (&["Fan", "Damper"], SystemType::Ventilation),
    (&["SanitaryTerminal"], SystemType::WaterSupply),
    (&["WasteTerminal", "StackTerminal"], SystemType::Sewage),
    (&["FireSuppression"], SystemType::FireSuppression),
    (&["Boiler", "HeatExchanger"], SystemType::Heating),
    (&["Chiller", "Coil"], SystemType::Ventilation),
    (
        &[
            "Cable",
            "LightFixture",
            "Lamp",
            "Outlet",
            "SwitchingDevice",
            "ProtectiveDevice",
            "ElectricDistributionBoard",
            "JunctionBox",
        ],
        SystemType::Electrical,
    ),
];

/// Classifies one MEP element. Pure: depends only on its arguments.
#[must_use]
pub fn classify(ifc_type: &str, object_type: &str, name: &str, props: &PropertyLookup) -> SystemType {
    let system = props
        .find_non_empty(SYSTEM_KEYS)
        .map(Value::to_text)
        .unwrap_or_default();
    let combined = format!("{system} {object_type} {name}").to_lowercase();

    if let Some(system) = classify_text(&combined) {
        return system;
    }

    if let Some((_, system)) = TYPE_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| ifc_type.contains(needle)))
    {
        return *system;
    }

    if ifc_type.contains("Pipe") {
        let large_bore = props
            .find(PIPE_DIAMETER_KEYS)
            .and_then(Value::as_f64)
            .is_some_and(|diameter| diameter > HEATING_MAIN_MIN_DIAMETER);
        if large_bore {
            return SystemType::Heating;
        }
    }

    SystemType::Unknown
}

fn classify_text(text: &str) -> Option<SystemType> {
    TEXT_RULES
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|pattern| pattern.is_match(text)))
        .map(|(system, _)| *system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn props(entries: &[(&str, Value)]) -> PropertyLookup {
        entries.iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_all_patterns_compile() {
        let total: usize = TEXT_RULES.iter().map(|(_, patterns)| patterns.len()).sum();
        assert_eq!(
            total,
            HEATING.len()
                + VENTILATION.len()
                + SEWAGE.len()
                + WATER_SUPPLY.len()
                + FIRE_SUPPRESSION.len()
                + ELECTRICAL.len()
        );
    }

    #[test]
    fn test_estonian_system_property() {
        let p = props(&[("System Type", text("Küte"))]);
        assert_eq!(classify("IfcPipeSegment", "", "Toru", &p), SystemType::Heating);
    }

    #[test]
    fn test_heating_beats_ventilation() {
        let p = PropertyLookup::new();
        assert_eq!(
            classify("IfcDuctSegment", "Heating supply air", "", &p),
            SystemType::Heating
        );
    }

    #[test]
    fn test_priority_order_of_groups() {
        let p = PropertyLookup::new();
        // sewage beats water supply
        assert_eq!(classify("IfcPipeSegment", "", "drain water", &p), SystemType::Sewage);
        // ventilation beats sewage
        assert_eq!(classify("IfcPipeSegment", "", "vent kanal", &p), SystemType::Ventilation);
        // water supply beats fire suppression
        assert_eq!(classify("IfcPipeSegment", "", "fire water", &p), SystemType::WaterSupply);
        // fire suppression beats electrical
        assert_eq!(classify("IfcFlowTerminal", "", "Sprinkler power", &p), SystemType::FireSuppression);
    }

    #[test]
    fn test_word_boundaries() {
        let p = PropertyLookup::new();
        // "hw" needs a boundary on both sides
        assert_eq!(classify("IfcFlowController", "", "hwx", &p), SystemType::Unknown);
        assert_eq!(classify("IfcFlowController", "", "HW valve", &p), SystemType::Heating);
        // "ventil" is a prefix match
        assert_eq!(classify("IfcValve", "", "Tagasilöögiventiil", &p), SystemType::Unknown);
        assert_eq!(classify("IfcValve", "", "Ventiil DN20", &p), SystemType::Ventilation);
    }

    #[test]
    fn test_first_non_empty_system_key() {
        let p = props(&[("System Type", text("")), ("System Name", text("EVK"))]);
        assert_eq!(classify("IfcPipeSegment", "", "", &p), SystemType::WaterSupply);
    }

    #[test]
    fn test_system_keys_are_case_insensitive() {
        let p = props(&[("system classification", text("Sprinkler"))]);
        assert_eq!(classify("IfcPipeSegment", "", "", &p), SystemType::FireSuppression);
    }

    #[test]
    fn test_type_fallback() {
        let p = PropertyLookup::new();
        let cases = [
            ("IfcDuctFitting", SystemType::Ventilation),
            ("IfcAirTerminalBox", SystemType::Ventilation),
            ("IfcFan", SystemType::Ventilation),
            ("IfcSanitaryTerminal", SystemType::WaterSupply),
            ("IfcStackTerminal", SystemType::Sewage),
            ("IfcFireSuppressionTerminal", SystemType::FireSuppression),
            ("IfcHeatExchanger", SystemType::Heating),
            ("IfcCoil", SystemType::Ventilation),
            ("IfcCableSegment", SystemType::Electrical),
            ("IfcLightFixture", SystemType::Electrical),
            ("IfcPump", SystemType::Unknown),
        ];
        for (ifc_type, expected) in cases {
            assert_eq!(classify(ifc_type, "", "", &p), expected, "{ifc_type}");
        }
    }

    #[test]
    fn test_large_pipe_is_heating() {
        let p = props(&[("NominalDiameter", Value::Number(150.0))]);
        assert_eq!(classify("IfcPipeSegment", "", "", &p), SystemType::Heating);
    }

    #[test]
    fn test_pipe_diameter_boundary_and_text() {
        let exactly_100 = props(&[("DN", Value::Integer(100))]);
        assert_eq!(classify("IfcPipeSegment", "", "", &exactly_100), SystemType::Unknown);

        let numeric_text = props(&[("Diameter", text("125"))]);
        assert_eq!(classify("IfcPipeFitting", "", "", &numeric_text), SystemType::Heating);

        let not_numeric = props(&[("DN", text("DN150"))]);
        assert_eq!(classify("IfcPipeSegment", "", "", &not_numeric), SystemType::Unknown);
    }

    #[test]
    fn test_diameter_rule_only_for_pipes() {
        let p = props(&[("NominalDiameter", Value::Number(200.0))]);
        assert_eq!(classify("IfcValve", "", "", &p), SystemType::Unknown);
    }
}
