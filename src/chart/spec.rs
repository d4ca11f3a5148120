//! Declarative chart description.
//!
//! A `ChartSpec` is everything a line-chart renderer needs: one dataset of `{x, y}`
//! points with its colours, plus axis/tooltip options. Field names follow the
//! camelCase convention of browser charting libraries so the JSON export can be
//! fed to one directly.

use serde::{Deserialize, Serialize};

use crate::chart::palette::palette_for;
use crate::domain::{CaseKind, ChartPoint, Scope};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub tool: String,
    pub kind: CaseKind,
    pub scope: String,
    pub dataset: Dataset,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub background_color: String,
    pub border_color: String,
    pub data: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub legend_display: bool,
    pub point_radius: u32,
    pub maintain_aspect_ratio: bool,
    pub tooltip: TooltipOptions,
    pub x_axis: TimeAxis,
    pub y_axis: ValueAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOptions {
    /// `index`: show the value at the hovered x position.
    pub mode: String,
    pub intersect: bool,
    /// numeral.js-style format of the value line.
    pub label_format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAxis {
    #[serde(rename = "type")]
    pub axis_type: String,
    /// Tick label format (moment.js tokens).
    pub format: String,
    /// Tooltip title format (moment.js tokens).
    pub tooltip_format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAxis {
    pub grid_lines: bool,
    /// numeral.js-style tick format.
    pub tick_format: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            legend_display: false,
            point_radius: 0,
            maintain_aspect_ratio: false,
            tooltip: TooltipOptions {
                mode: "index".to_string(),
                intersect: false,
                label_format: "+0,0".to_string(),
            },
            x_axis: TimeAxis {
                axis_type: "time".to_string(),
                format: "MM/DD/YY".to_string(),
                tooltip_format: "ll".to_string(),
            },
            y_axis: ValueAxis {
                grid_lines: false,
                tick_format: "0a".to_string(),
            },
        }
    }
}

/// Assemble the chart for one kind. Colours come from the palette table.
pub fn build_chart_spec(kind: CaseKind, scope: &Scope, points: &[ChartPoint]) -> ChartSpec {
    let palette = palette_for(kind);
    ChartSpec {
        tool: "trend".to_string(),
        kind,
        scope: scope.to_string(),
        dataset: Dataset {
            label: format!("New {} per day", kind.field_name()),
            background_color: palette.background_color(),
            border_color: palette.border_color(),
            data: points.to_vec(),
        },
        options: ChartOptions::default(),
    }
}
