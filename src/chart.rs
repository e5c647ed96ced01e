//! Framework-neutral chart specifications.
//!
//! The recomputations produce these; the web adapter serialises them as
//! Plotly figures and the native viewer draws them with `egui_plot`.

use serde_json::{json, Value};

use crate::color::{outcome_color, to_hex, DashPalette, Rgb};
use crate::data::filter::{
    payload_outcome_points, success_proportion, BoundaryPolicy, SiteSelection, ViewState,
};
use crate::data::model::{LaunchDataset, LaunchRecord, Outcome};

pub const PAYLOAD_AXIS_LABEL: &str = "Payload Mass (kg)";
pub const CLASS_AXIS_LABEL: &str = "class";
pub const BOOSTER_LEGEND_TITLE: &str = "Booster Version Category";
pub const EMPTY_MESSAGE: &str = "No launches match the current selection";

// ---------------------------------------------------------------------------
// Proportion (pie) chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Success counts per site, or outcome counts within one site.
    pub fn success_launches(
        dataset: &LaunchDataset,
        site: &SiteSelection,
        palette: &DashPalette,
    ) -> Self {
        let title = match site {
            SiteSelection::All => "Success Launches By Site".to_string(),
            SiteSelection::Site(s) => format!("Success Launches For Site {s}"),
        };
        let slices = success_proportion(dataset, site)
            .into_iter()
            .map(|slice| {
                let color = match site {
                    SiteSelection::All => palette.sites.color_for(&slice.label),
                    SiteSelection::Site(_) => {
                        if slice.label == Outcome::Success.label() {
                            outcome_color(Outcome::Success)
                        } else {
                            outcome_color(Outcome::Failure)
                        }
                    }
                };
                PieSlice {
                    label: slice.label,
                    value: slice.count,
                    color,
                }
            })
            .collect();
        PieChart { title, slices }
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Payload / outcome scatter chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub class: u8,
    pub hover: String,
}

/// All points sharing one booster category.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub category: String,
    pub color: Rgb,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    /// One point per launch passing the view's site and payload filters,
    /// grouped by booster category in dataset order.
    pub fn payload_vs_outcome(
        dataset: &LaunchDataset,
        view: &ViewState,
        policy: BoundaryPolicy,
        palette: &DashPalette,
    ) -> Self {
        let title = match &view.site {
            SiteSelection::All => "Correlation between Payload and Success for all sites".to_string(),
            SiteSelection::Site(s) => format!("Correlation between Payload and Success for Site {s}"),
        };

        let records = payload_outcome_points(dataset, view, policy);
        let series = dataset
            .booster_categories()
            .iter()
            .filter_map(|category| {
                let points: Vec<ScatterPoint> = records
                    .iter()
                    .filter(|r| r.booster_category == *category)
                    .map(|r| ScatterPoint {
                        payload_mass_kg: r.payload_mass_kg,
                        class: r.outcome.as_class(),
                        hover: hover_text(r),
                    })
                    .collect();
                (!points.is_empty()).then(|| ScatterSeries {
                    category: category.clone(),
                    color: palette.boosters.color_for(category),
                    points,
                })
            })
            .collect();

        ScatterChart { title, series }
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

fn hover_text(record: &LaunchRecord) -> String {
    let mut text = record.site.clone();
    if let Some(n) = record.flight_number {
        text.push_str(&format!(" · flight {n}"));
    }
    if let Some(v) = &record.booster_version {
        text.push_str(&format!(" · {v}"));
    }
    text
}

// ---------------------------------------------------------------------------
// Figure: what a callback hands to a renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Figure::Pie(p) => &p.title,
            Figure::Scatter(s) => &s.title,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Figure::Pie(p) => p.is_empty(),
            Figure::Scatter(s) => s.is_empty(),
        }
    }

    /// Plotly figure JSON (`{ "data": [...], "layout": {...} }`).
    pub fn to_plotly(&self) -> Value {
        let mut layout = json!({
            "title": { "text": self.title() },
            "margin": { "t": 60, "l": 60, "r": 20, "b": 50 },
        });
        if self.is_empty() {
            layout["annotations"] = json!([{
                "text": EMPTY_MESSAGE,
                "showarrow": false,
                "xref": "paper",
                "yref": "paper",
                "x": 0.5,
                "y": 0.5,
            }]);
        }

        let data = match self {
            Figure::Pie(pie) => json!([{
                "type": "pie",
                "labels": pie.slices.iter().map(|s| s.label.as_str()).collect::<Vec<_>>(),
                "values": pie.slices.iter().map(|s| s.value).collect::<Vec<_>>(),
                "marker": {
                    "colors": pie.slices.iter().map(|s| to_hex(s.color)).collect::<Vec<_>>(),
                },
                "sort": false,
            }]),
            Figure::Scatter(scatter) => {
                layout["xaxis"] = json!({ "title": { "text": PAYLOAD_AXIS_LABEL } });
                layout["yaxis"] = json!({
                    "title": { "text": CLASS_AXIS_LABEL },
                    "tickvals": [0, 1],
                    "range": [-0.25, 1.25],
                });
                layout["legend"] = json!({ "title": { "text": BOOSTER_LEGEND_TITLE } });
                Value::Array(
                    scatter
                        .series
                        .iter()
                        .map(|series| {
                            json!({
                                "type": "scatter",
                                "mode": "markers",
                                "name": series.category,
                                "x": series.points.iter().map(|p| p.payload_mass_kg).collect::<Vec<_>>(),
                                "y": series.points.iter().map(|p| p.class).collect::<Vec<_>>(),
                                "text": series.points.iter().map(|p| p.hover.as_str()).collect::<Vec<_>>(),
                                "marker": { "color": to_hex(series.color), "size": 10 },
                            })
                        })
                        .collect(),
                )
            }
        };

        json!({ "data": data, "layout": layout })
    }
}
