use crate::error::{DiagramError, DiagramResult};

use super::DiagramConfig;

pub(super) fn validate_diagram_config(config: DiagramConfig) -> DiagramResult<DiagramConfig> {
    if !config.km_stones_ui_distance.is_finite() || config.km_stones_ui_distance <= 0.0 {
        return Err(DiagramError::InvalidConfig(
            "km_stones_ui_distance must be finite and > 0".to_owned(),
        ));
    }
    for (name, value) in [
        ("stone_margin_px", config.stone_margin_px),
        ("top_offset_descending_px", config.top_offset_descending_px),
        ("top_offset_ascending_px", config.top_offset_ascending_px),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(DiagramError::InvalidConfig(format!(
                "{name} must be finite and >= 0"
            )));
        }
    }
    Ok(config)
}
