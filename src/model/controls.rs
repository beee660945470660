use serde::{Deserialize, Serialize};

use crate::model::labels::ClassificationLabel;
use crate::model::well::WellCoordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlType {
    High,
    Medium,
    Low,
    NoTemplate,
}

impl ControlType {
    pub fn expected_label(self) -> ClassificationLabel {
        match self {
            ControlType::NoTemplate => ClassificationLabel::Negative,
            ControlType::High | ControlType::Medium | ControlType::Low => {
                ClassificationLabel::Positive
            }
        }
    }

    pub fn short_code(self) -> &'static str {
        match self {
            ControlType::High => "H",
            ControlType::Medium => "M",
            ControlType::Low => "L",
            ControlType::NoTemplate => "NTC",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ControlType::High => "HIGH",
            ControlType::Medium => "MEDIUM",
            ControlType::Low => "LOW",
            ControlType::NoTemplate => "NO_TEMPLATE",
        }
    }
}

impl std::fmt::Display for ControlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlSource {
    SampleName,
    PlateCoordinate,
}

/// Fixed plate positions of control wells: one position per type and set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlLayout {
    positions: Vec<(WellCoordinate, ControlType, u32)>,
}

// (row index, column, type, set)
const LAYOUT_V1: &[(u8, u8, ControlType, u32)] = &[
    (6, 10, ControlType::High, 1),
    (6, 11, ControlType::Medium, 1),
    (6, 12, ControlType::Low, 1),
    (6, 13, ControlType::NoTemplate, 1),
    (10, 19, ControlType::High, 2),
    (10, 20, ControlType::Medium, 2),
    (10, 21, ControlType::Low, 2),
    (10, 22, ControlType::NoTemplate, 2),
    (0, 15, ControlType::High, 3),
    (0, 16, ControlType::Medium, 3),
    (0, 17, ControlType::Low, 3),
    (0, 18, ControlType::NoTemplate, 3),
    (12, 5, ControlType::High, 4),
    (12, 6, ControlType::Medium, 4),
    (12, 7, ControlType::Low, 4),
    (12, 8, ControlType::NoTemplate, 4),
];

impl ControlLayout {
    /// Four sets of H/M/L/NTC controls at G10-G13, K19-K22, A15-A18 and M5-M8.
    pub fn default_v1() -> Self {
        let positions = LAYOUT_V1
            .iter()
            .filter_map(|&(row, column, kind, set)| {
                WellCoordinate::new(row, column).map(|coord| (coord, kind, set))
            })
            .collect();
        Self { positions }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lookup(&self, coordinate: WellCoordinate) -> Option<(ControlType, u32)> {
        self.positions
            .iter()
            .find(|(coord, _, _)| *coord == coordinate)
            .map(|&(_, kind, set)| (kind, set))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
