use std::collections::BTreeMap;

use crate::chart::Figure;
use crate::dashboard::{Dashboard, RawViewState, PAYLOAD_SLIDER, SITE_DROPDOWN};
use crate::data::filter::ViewState;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full native-viewer state, independent of rendering.
pub struct AppState {
    /// Immutable context plus callback registrations.
    pub dashboard: Dashboard,

    /// Current selection snapshot.
    pub view: ViewState,

    /// Latest figure per output id; replaced wholesale on every recompute.
    pub figures: BTreeMap<&'static str, Figure>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start from the default view and compute every output once.
    pub fn new(dashboard: Dashboard) -> Self {
        let view = dashboard.initial_view();
        let mut state = Self {
            dashboard,
            view,
            figures: BTreeMap::new(),
            status_message: None,
        };
        let outputs: Vec<&'static str> = state
            .dashboard
            .registry()
            .dependencies()
            .into_iter()
            .map(|d| d.output)
            .collect();
        state.recompute(&outputs);
        state
    }

    pub fn figure(&self, output: &str) -> Option<&Figure> {
        self.figures.get(output)
    }

    /// Apply a selector change (raw selector value).
    pub fn set_site(&mut self, site: &str) {
        let raw = RawViewState {
            site: site.to_string(),
            ..RawViewState::from(&self.view)
        };
        self.apply(raw, SITE_DROPDOWN);
    }

    /// Apply a range-selector change.
    pub fn set_payload(&mut self, low: f64, high: f64) {
        let raw = RawViewState {
            payload: [low, high],
            ..RawViewState::from(&self.view)
        };
        self.apply(raw, PAYLOAD_SLIDER);
    }

    fn apply(&mut self, raw: RawViewState, input: &str) {
        match self.dashboard.context().validate(&raw) {
            Ok(view) => {
                self.status_message = None;
                if view == self.view {
                    return;
                }
                self.view = view;
                let outputs = self.dashboard.registry().outputs_for(input);
                self.recompute(&outputs);
            }
            Err(e) => {
                log::warn!("Rejected {input} change: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Recompute the given outputs.
    fn recompute(&mut self, outputs: &[&'static str]) {
        self.status_message = None;
        for &output in outputs {
            match self.dashboard.invoke(output, &self.view) {
                Ok(figure) => {
                    self.figures.insert(output, figure);
                }
                Err(e) => {
                    log::error!("Failed to recompute {output}: {e}");
                    self.status_message = Some(format!("Error: {e}"));
                }
            }
        }
    }
}
