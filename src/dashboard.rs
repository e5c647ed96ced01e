//! Reactive binding between UI components and the recomputations.
//!
//! A [`Dashboard`] owns the immutable [`DashContext`] built at startup and a
//! [`CallbackRegistry`] of explicit `output ← inputs` registrations. UI
//! adapters call [`Dashboard::invoke`] with the current view snapshot and
//! replace the displayed chart with the returned [`Figure`].

use serde::{Deserialize, Serialize};

use crate::chart::{Figure, PieChart, ScatterChart};
use crate::color::DashPalette;
use crate::data::filter::{BoundaryPolicy, PayloadInterval, SiteSelection, ViewState, ALL_SITES};
use crate::data::model::LaunchDataset;
use crate::error::DashError;

// Component ids shared by every adapter.
pub const SITE_DROPDOWN: &str = "site-dropdown";
pub const PAYLOAD_SLIDER: &str = "payload-slider";
pub const PIE_CHART: &str = "success-pie-chart";
pub const SCATTER_CHART: &str = "success-payload-scatter-chart";

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";

// ---------------------------------------------------------------------------
// Context: everything a handler may read
// ---------------------------------------------------------------------------

/// Read-only state shared by all handlers for the process lifetime.
#[derive(Debug, Clone)]
pub struct DashContext {
    dataset: LaunchDataset,
    palette: DashPalette,
    boundary: BoundaryPolicy,
}

impl DashContext {
    pub fn new(dataset: LaunchDataset, boundary: BoundaryPolicy) -> Self {
        let palette = DashPalette::for_dataset(&dataset);
        DashContext {
            dataset,
            palette,
            boundary,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn palette(&self) -> &DashPalette {
        &self.palette
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// Turn an untrusted snapshot from the UI into a [`ViewState`].
    pub fn validate(&self, raw: &RawViewState) -> Result<ViewState, DashError> {
        let site = SiteSelection::parse(&raw.site, &self.dataset)?;
        let [low, high] = raw.payload;
        let payload = PayloadInterval::new(low, high)?;
        Ok(ViewState { site, payload })
    }
}

/// View snapshot exactly as a UI sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawViewState {
    pub site: String,
    pub payload: [f64; 2],
}

impl From<&ViewState> for RawViewState {
    fn from(view: &ViewState) -> Self {
        RawViewState {
            site: view.site.as_value().to_string(),
            payload: [view.payload.low, view.payload.high],
        }
    }
}

// ---------------------------------------------------------------------------
// Callback registry
// ---------------------------------------------------------------------------

pub type Handler = fn(&DashContext, &ViewState) -> Figure;

/// One registration: recompute `output` whenever any of `inputs` changes.
#[derive(Clone)]
pub struct Callback {
    pub output: &'static str,
    pub inputs: &'static [&'static str],
    handler: Handler,
}

#[derive(Clone, Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. An output has at most one handler; a second
    /// registration replaces the first.
    pub fn register(
        &mut self,
        output: &'static str,
        inputs: &'static [&'static str],
        handler: Handler,
    ) {
        if let Some(existing) = self.callbacks.iter_mut().find(|c| c.output == output) {
            log::warn!("Replacing callback for output '{output}'");
            existing.inputs = inputs;
            existing.handler = handler;
            return;
        }
        self.callbacks.push(Callback {
            output,
            inputs,
            handler,
        });
    }

    pub fn get(&self, output: &str) -> Option<&Callback> {
        self.callbacks.iter().find(|c| c.output == output)
    }

    /// Outputs to recompute when `input` changes, in registration order.
    pub fn outputs_for(&self, input: &str) -> Vec<&'static str> {
        self.callbacks
            .iter()
            .filter(|c| c.inputs.contains(&input))
            .map(|c| c.output)
            .collect()
    }

    pub fn dependencies(&self) -> Vec<Dependency> {
        self.callbacks
            .iter()
            .map(|c| Dependency {
                output: c.output,
                inputs: c.inputs.to_vec(),
            })
            .collect()
    }
}

fn success_pie(ctx: &DashContext, view: &ViewState) -> Figure {
    Figure::Pie(PieChart::success_launches(
        ctx.dataset(),
        &view.site,
        ctx.palette(),
    ))
}

fn payload_scatter(ctx: &DashContext, view: &ViewState) -> Figure {
    Figure::Scatter(ScatterChart::payload_vs_outcome(
        ctx.dataset(),
        view,
        ctx.boundary(),
        ctx.palette(),
    ))
}

// ---------------------------------------------------------------------------
// Layout description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

/// Range selector: bounds are the observed payload range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSpec {
    pub id: &'static str,
    pub min: f64,
    pub max: f64,
    pub marks: Vec<SliderMark>,
    pub value: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownSpec {
    pub id: &'static str,
    pub options: Vec<SelectOption>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dependency {
    pub output: &'static str,
    pub inputs: Vec<&'static str>,
}

/// Everything a UI needs to build its widgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashLayout {
    pub title: &'static str,
    pub dropdown: DropdownSpec,
    pub slider: SliderSpec,
    pub boundary_policy: &'static str,
    pub dependencies: Vec<Dependency>,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct Dashboard {
    ctx: DashContext,
    registry: CallbackRegistry,
}

impl Dashboard {
    pub fn new(ctx: DashContext, registry: CallbackRegistry) -> Self {
        Dashboard { ctx, registry }
    }

    /// The two standard outputs: success pie (site) and payload scatter
    /// (site + payload).
    pub fn standard(ctx: DashContext) -> Self {
        let mut registry = CallbackRegistry::new();
        registry.register(PIE_CHART, &[SITE_DROPDOWN], success_pie);
        registry.register(SCATTER_CHART, &[SITE_DROPDOWN, PAYLOAD_SLIDER], payload_scatter);
        Dashboard::new(ctx, registry)
    }

    pub fn context(&self) -> &DashContext {
        &self.ctx
    }

    pub fn registry(&self) -> &CallbackRegistry {
        &self.registry
    }

    pub fn initial_view(&self) -> ViewState {
        ViewState::initial(self.ctx.dataset())
    }

    /// Recompute one output for a validated view.
    pub fn invoke(&self, output: &str, view: &ViewState) -> Result<Figure, DashError> {
        let callback = self.registry.get(output).ok_or_else(|| DashError::UnknownOutput {
            id: output.to_string(),
        })?;
        log::debug!(
            "Recomputing '{output}' for {} with payload ({}, {})",
            view.site,
            view.payload.low,
            view.payload.high
        );
        Ok((callback.handler)(&self.ctx, view))
    }

    /// Validate a raw snapshot, then recompute.
    pub fn invoke_raw(&self, output: &str, raw: &RawViewState) -> Result<Figure, DashError> {
        let view = self.ctx.validate(raw)?;
        self.invoke(output, &view)
    }

    pub fn layout(&self) -> DashLayout {
        let dataset = self.ctx.dataset();
        let range = dataset.payload_range();

        let options = std::iter::once(SelectOption {
            label: "All Sites".to_string(),
            value: ALL_SITES.to_string(),
        })
        .chain(dataset.sites().iter().map(|s| SelectOption {
            label: s.clone(),
            value: s.clone(),
        }))
        .collect();

        let marks = (0..4)
            .map(|i| {
                let value = range.min + (range.max - range.min) * i as f64 / 3.0;
                SliderMark {
                    value,
                    label: format!("{value:.0}"),
                }
            })
            .collect();

        DashLayout {
            title: DASHBOARD_TITLE,
            dropdown: DropdownSpec {
                id: SITE_DROPDOWN,
                options,
                value: ALL_SITES.to_string(),
            },
            slider: SliderSpec {
                id: PAYLOAD_SLIDER,
                min: range.min,
                max: range.max,
                marks,
                value: [range.min, range.max],
            },
            boundary_policy: self.ctx.boundary().as_str(),
            dependencies: self.registry.dependencies(),
        }
    }
}
