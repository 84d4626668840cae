use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::callbacks::WidgetId;
use crate::color::Rgb;

// ---------------------------------------------------------------------------
// Chart specifications produced by the callbacks
// ---------------------------------------------------------------------------

/// A renderable chart description. Figures are plain data: the UI draws
/// them and `File → Export charts…` serializes them. Scatter figures are
/// shared so the plot's hover formatter can hold one without copying points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Figure {
    Pie(PieFigure),
    Scatter(Arc<ScatterFigure>),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Figure::Pie(p) => &p.title,
            Figure::Scatter(s) => &s.title,
        }
    }

    pub fn as_pie(&self) -> Option<&PieFigure> {
        match self {
            Figure::Pie(p) => Some(p),
            Figure::Scatter(_) => None,
        }
    }

    pub fn as_scatter(&self) -> Option<&Arc<ScatterFigure>> {
        match self {
            Figure::Scatter(s) => Some(s),
            Figure::Pie(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieFigure {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieFigure {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }
}

#[cfg(test)]
impl PieFigure {
    pub fn value_of(&self, label: &str) -> Option<usize> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_kg: f64,
    pub class: u8,
    pub site: String,
    pub booster_category: String,
}

/// One colour group of the scatter chart (one booster version category).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub color: Rgb,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<ScatterTrace>,
}

impl ScatterFigure {
    pub fn len(&self) -> usize {
        self.traces.iter().map(|t| t.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
impl ScatterFigure {
    pub fn points(&self) -> impl Iterator<Item = &ScatterPoint> {
        self.traces.iter().flat_map(|t| t.points.iter())
    }
}

// ---------------------------------------------------------------------------
// JSON export
// ---------------------------------------------------------------------------

/// Serialize the current figures keyed by chart widget name.
pub fn figures_to_json(figures: &BTreeMap<WidgetId, Figure>) -> Result<String> {
    let by_name: BTreeMap<&str, &Figure> = figures.iter().map(|(w, f)| (w.name(), f)).collect();
    serde_json::to_string_pretty(&by_name).context("serializing figures")
}

pub fn export_json(path: &Path, figures: &BTreeMap<WidgetId, Figure>) -> Result<()> {
    let json = figures_to_json(figures)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figures_serialize_with_type_tag_and_widget_names() {
        let mut figures = BTreeMap::new();
        figures.insert(
            WidgetId::SuccessPieChart,
            Figure::Pie(PieFigure {
                title: "Launch Outcomes for SiteA".into(),
                slices: vec![PieSlice {
                    label: "Success".into(),
                    value: 2,
                    color: Rgb::GREEN,
                }],
            }),
        );

        let json = figures_to_json(&figures).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let pie = &value["success-pie-chart"];
        assert_eq!(pie["type"], "pie");
        assert_eq!(pie["slices"][0]["label"], "Success");
        assert_eq!(pie["slices"][0]["value"], 2);
        assert_eq!(pie["slices"][0]["color"], serde_json::json!([22, 163, 74]));
    }

    fn scatter(points: usize) -> Figure {
        let point = ScatterPoint {
            payload_kg: 525.0,
            class: 1,
            site: "SiteA".into(),
            booster_category: "FT".into(),
        };
        Figure::Scatter(Arc::new(ScatterFigure {
            title: "Payload vs Outcome for SiteA".into(),
            x_label: "Payload Mass (kg)".into(),
            y_label: "class".into(),
            traces: vec![ScatterTrace {
                name: "FT".into(),
                color: Rgb::GREEN,
                points: vec![point; points],
            }],
        }))
    }

    #[test]
    fn cloned_scatter_figures_share_their_points() {
        let fig = scatter(500);
        let copy = fig.clone();
        let (a, b) = (fig.as_scatter().unwrap(), copy.as_scatter().unwrap());
        assert!(Arc::ptr_eq(a, b));
        assert_eq!(Arc::strong_count(a), 2);
        assert_eq!(a.len(), 500);
    }

    #[test]
    fn shared_scatter_serializes_inline() {
        let mut figures = BTreeMap::new();
        figures.insert(WidgetId::SuccessPayloadScatterChart, scatter(1));

        let json = figures_to_json(&figures).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let fig = &value["success-payload-scatter-chart"];
        assert_eq!(fig["type"], "scatter");
        assert_eq!(fig["traces"][0]["name"], "FT");
        assert_eq!(fig["traces"][0]["points"][0]["payload_kg"], 525.0);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let err = export_json(Path::new("/no/such/dir/charts.json"), &BTreeMap::new()).unwrap_err();
        assert!(format!("{err:#}").contains("writing"));
    }
}
