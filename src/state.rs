use std::collections::BTreeMap;
use std::sync::Arc;

use crate::callbacks::{Binding, CallbackRegistry, WidgetId};
use crate::data::filter::{filtered_records, PayloadRange};
use crate::data::model::{LaunchDataset, SiteSelection};
use crate::figure::Figure;

// ---------------------------------------------------------------------------
// Selection state – the current widget values
// ---------------------------------------------------------------------------

/// Dropdown and slider values as seen by the chart callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl SelectionState {
    /// "All Sites" over the full payload span.
    pub fn new(dataset: &LaunchDataset) -> Self {
        Self {
            site: SiteSelection::All,
            payload: PayloadRange::full(dataset),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup and shared read-only.
    pub dataset: Arc<LaunchDataset>,

    pub selection: SelectionState,

    /// Latest figure per chart widget.
    pub figures: BTreeMap<WidgetId, Figure>,

    /// Records passing the current selection (cached for the top bar).
    pub visible_count: usize,

    /// Text typed into the site dropdown's search box.
    pub site_search: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    registry: CallbackRegistry,
}

impl AppState {
    /// Wire the callbacks and render every chart once.
    pub fn new(dataset: Arc<LaunchDataset>, registry: CallbackRegistry) -> Self {
        let selection = SelectionState::new(&dataset);
        let mut state = Self {
            dataset,
            selection,
            figures: BTreeMap::new(),
            visible_count: 0,
            site_search: String::new(),
            status_message: None,
            registry,
        };
        let initial = state.registry.dispatch_all(&state.dataset, &state.selection);
        state.apply(initial);
        state
    }

    pub fn figure(&self, widget: WidgetId) -> Option<&Figure> {
        self.figures.get(&widget)
    }

    /// Dropdown changed.
    pub fn set_site(&mut self, site: SiteSelection) {
        if site == self.selection.site {
            return;
        }
        self.selection.site = site;
        self.notify(Binding::value(WidgetId::SiteDropdown));
    }

    /// Ends of the payload slider. With a step the span is widened outward to
    /// the step grid so both dataset extremes stay reachable once a snapped
    /// handle is clamped back by [`Self::set_payload_range`].
    pub fn slider_span(&self, step: Option<f64>) -> (f64, f64) {
        let (min, max) = (self.dataset.min_payload(), self.dataset.max_payload());
        match step {
            Some(step) if step > 0.0 => ((min / step).floor() * step, (max / step).ceil() * step),
            _ => (min, max),
        }
    }

    /// Slider moved. The range is kept inside the dataset payload span.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        let range = range.clamp_to(self.dataset.min_payload(), self.dataset.max_payload());
        if range == self.selection.payload {
            return;
        }
        self.selection.payload = range;
        self.notify(Binding::value(WidgetId::PayloadSlider));
    }

    fn notify(&mut self, changed: Binding) {
        let updates = self
            .registry
            .dispatch(changed, &self.dataset, &self.selection);
        self.apply(updates);
    }

    fn apply(&mut self, updates: Vec<(WidgetId, Figure)>) {
        for (widget, figure) in updates {
            log::debug!("{} now shows {:?}", widget.name(), figure.title());
            self.figures.insert(widget, figure);
        }
        self.visible_count =
            filtered_records(&self.dataset, &self.selection.site, self.selection.payload).count();
    }
}
