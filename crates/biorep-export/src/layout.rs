use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Physical figure widths in the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureLayout {
    /// Width in millimetres per figure slot.
    pub widths_mm: BTreeMap<u32, f64>,
    /// Width for slots not listed in `widths_mm`.
    pub default_width_mm: f64,
}

impl Default for FigureLayout {
    fn default() -> Self {
        let mut widths_mm = BTreeMap::new();
        widths_mm.insert(1, 150.0);
        widths_mm.insert(2, 83.0);
        for slot in 3..=6 {
            widths_mm.insert(slot, 90.0);
        }
        Self {
            widths_mm,
            default_width_mm: 80.0,
        }
    }
}

impl FigureLayout {
    pub fn width_for(&self, slot: u32) -> f64 {
        self.widths_mm
            .get(&slot)
            .copied()
            .unwrap_or(self.default_width_mm)
    }
}
