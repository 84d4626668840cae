use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::color::{outcome_color, CategoryColors};
use crate::data::filter::{filtered_records, outcome_counts, successes_by_site, PayloadRange};
use crate::data::model::{LaunchDataset, SiteSelection};
use crate::figure::{Figure, PieFigure, PieSlice, ScatterFigure, ScatterPoint, ScatterTrace};
use crate::state::SelectionState;

// ---------------------------------------------------------------------------
// Widget bindings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetId {
    SiteDropdown,
    PayloadSlider,
    SuccessPieChart,
    SuccessPayloadScatterChart,
}

impl WidgetId {
    pub fn name(self) -> &'static str {
        match self {
            WidgetId::SiteDropdown => "site-dropdown",
            WidgetId::PayloadSlider => "payload-slider",
            WidgetId::SuccessPieChart => "success-pie-chart",
            WidgetId::SuccessPayloadScatterChart => "success-payload-scatter-chart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Value,
    Figure,
}

/// A (widget, property) pair a callback reads from or writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Binding {
    pub widget: WidgetId,
    pub property: Property,
}

impl Binding {
    pub const fn value(widget: WidgetId) -> Self {
        Self {
            widget,
            property: Property::Value,
        }
    }

    pub const fn figure(widget: WidgetId) -> Self {
        Self {
            widget,
            property: Property::Figure,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = match self.property {
            Property::Value => "value",
            Property::Figure => "figure",
        };
        write!(f, "{}.{property}", self.widget.name())
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub type Handler = fn(&LaunchDataset, &SelectionState) -> Figure;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("output {0} already has a callback")]
    DuplicateOutput(Binding),
    #[error("callback for {0} has no inputs")]
    NoInputs(Binding),
    #[error("{0} cannot be both input and output of one callback")]
    OutputIsInput(Binding),
}

pub struct Callback {
    pub output: Binding,
    pub inputs: Vec<Binding>,
    handler: Handler,
}

impl Callback {
    pub fn run(&self, dataset: &LaunchDataset, selection: &SelectionState) -> Figure {
        (self.handler)(dataset, selection)
    }
}

/// Explicit mapping from triggering widget properties to chart handlers,
/// resolved once at startup.
#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
    by_trigger: BTreeMap<Binding, Vec<usize>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard wiring: the pie follows the dropdown, the scatter chart
    /// follows both the dropdown and the payload slider.
    pub fn dashboard() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(
            Binding::figure(WidgetId::SuccessPieChart),
            &[Binding::value(WidgetId::SiteDropdown)],
            pie_handler,
        )?;
        registry.register(
            Binding::figure(WidgetId::SuccessPayloadScatterChart),
            &[
                Binding::value(WidgetId::SiteDropdown),
                Binding::value(WidgetId::PayloadSlider),
            ],
            scatter_handler,
        )?;
        Ok(registry)
    }

    pub fn register(
        &mut self,
        output: Binding,
        inputs: &[Binding],
        handler: Handler,
    ) -> Result<(), RegistryError> {
        if inputs.is_empty() {
            return Err(RegistryError::NoInputs(output));
        }
        if inputs.contains(&output) {
            return Err(RegistryError::OutputIsInput(output));
        }
        if self.callbacks.iter().any(|cb| cb.output == output) {
            return Err(RegistryError::DuplicateOutput(output));
        }

        let idx = self.callbacks.len();
        for input in inputs {
            let slot = self.by_trigger.entry(*input).or_default();
            if !slot.contains(&idx) {
                slot.push(idx);
            }
        }
        self.callbacks.push(Callback {
            output,
            inputs: inputs.to_vec(),
            handler,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Callbacks listing `input` among their inputs, in registration order.
    pub fn triggered_by(&self, input: Binding) -> impl Iterator<Item = &Callback> {
        self.by_trigger
            .get(&input)
            .into_iter()
            .flatten()
            .map(|&idx| &self.callbacks[idx])
    }

    /// Run every callback triggered by a change of `changed`.
    pub fn dispatch(
        &self,
        changed: Binding,
        dataset: &LaunchDataset,
        selection: &SelectionState,
    ) -> Vec<(WidgetId, Figure)> {
        self.triggered_by(changed)
            .map(|cb| {
                log::debug!("{changed} changed → updating {}", cb.output);
                (cb.output.widget, cb.run(dataset, selection))
            })
            .collect()
    }

    /// Run every callback once; used for the initial render.
    pub fn dispatch_all(
        &self,
        dataset: &LaunchDataset,
        selection: &SelectionState,
    ) -> Vec<(WidgetId, Figure)> {
        self.callbacks
            .iter()
            .map(|cb| {
                log::debug!("initial render of {} from {} inputs", cb.output, cb.inputs.len());
                (cb.output.widget, cb.run(dataset, selection))
            })
            .collect()
    }
}

fn pie_handler(dataset: &LaunchDataset, selection: &SelectionState) -> Figure {
    Figure::Pie(pie_chart(dataset, &selection.site))
}

fn scatter_handler(dataset: &LaunchDataset, selection: &SelectionState) -> Figure {
    Figure::Scatter(Arc::new(scatter_chart(
        dataset,
        &selection.site,
        selection.payload,
    )))
}

// ---------------------------------------------------------------------------
// Chart callbacks
// ---------------------------------------------------------------------------

/// Success pie: per-site success totals for "All Sites", otherwise the
/// success/failure split of the chosen site.
pub fn pie_chart(dataset: &LaunchDataset, site: &SiteSelection) -> PieFigure {
    match site {
        SiteSelection::All => {
            let counts = successes_by_site(dataset);
            let colors = CategoryColors::new(counts.keys());
            let slices = counts
                .into_iter()
                .map(|(site, value)| PieSlice {
                    color: colors.color_for(&site),
                    label: site,
                    value,
                })
                .collect();
            PieFigure {
                title: "Total Successful Launches by Site".to_string(),
                slices,
            }
        }
        SiteSelection::Site(name) => {
            if !dataset.has_site(name) {
                log::warn!("pie chart requested for unknown launch site {name:?}");
            }
            let mut counts: Vec<_> = outcome_counts(dataset, site).into_iter().collect();
            // Largest slice first; Success wins ties.
            counts.sort_by(|(oa, ca), (ob, cb)| cb.cmp(ca).then(ob.cmp(oa)));
            let slices = counts
                .into_iter()
                .map(|(outcome, value)| PieSlice {
                    label: outcome.label().to_string(),
                    value,
                    color: outcome_color(outcome),
                })
                .collect();
            PieFigure {
                title: format!("Launch Outcomes for {name}"),
                slices,
            }
        }
    }
}

/// Payload vs. outcome scatter, one trace per booster version category.
pub fn scatter_chart(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> ScatterFigure {
    let title = match site {
        SiteSelection::All => "Payload vs Outcome by Booster Version".to_string(),
        SiteSelection::Site(name) => {
            if !dataset.has_site(name) {
                log::warn!("scatter chart requested for unknown launch site {name:?}");
            }
            format!("Payload vs Outcome for {name}")
        }
    };

    let colors = CategoryColors::new(dataset.booster_categories());
    let mut groups: BTreeMap<&str, Vec<ScatterPoint>> = BTreeMap::new();
    for rec in filtered_records(dataset, site, range) {
        groups
            .entry(rec.booster_category.as_str())
            .or_default()
            .push(ScatterPoint {
                payload_kg: rec.payload_kg,
                class: rec.outcome.class(),
                site: rec.site.clone(),
                booster_category: rec.booster_category.clone(),
            });
    }

    let traces = groups
        .into_iter()
        .map(|(name, points)| ScatterTrace {
            name: name.to_string(),
            color: colors.color_for(name),
            points,
        })
        .collect();

    ScatterFigure {
        title,
        x_label: "Payload Mass (kg)".to_string(),
        y_label: "Launch Outcome (0 = Fail, 1 = Success)".to_string(),
        traces,
    }
}
