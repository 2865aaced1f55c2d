// dashkit/src/charts.rs
//
// Chart view: bounded preview of chart cards and tag -> renderer dispatch
//

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::theme::{ChartPalette, Theme};
use crate::types::{ChartData, ChartSpec};

pub const CHART_PREVIEW_LIMIT: usize = 4;
pub const UNSUPPORTED_PLACEHOLDER: &str = "Visualization not supported yet";
pub const SHOW_MORE_LABEL: &str = "Show More Charts";
pub const SHOW_LESS_LABEL: &str = "Show Less";

#[derive(Debug, Clone, PartialEq)]
pub struct BarCategory {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarPlot {
    pub series_label: String,
    pub categories: Vec<BarCategory>,
    pub palette: ChartPalette,
    pub theme: Theme,
}

impl BarPlot {
    /// Largest value, floored at zero so empty or all-negative series still have a scale.
    pub fn max_value(&self) -> f64 {
        self.categories
            .iter()
            .map(|c| c.value)
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max)
    }
}

/// A plot instance, built fresh for one (spec, theme) pair.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Plot {
    Bar(BarPlot),
}

impl Plot {
    pub fn theme(&self) -> Theme {
        match self {
            Plot::Bar(bar) => bar.theme,
        }
    }
}

pub trait PlotRenderer: Send + Sync {
    fn render(&self, spec: &ChartSpec, data: &ChartData, theme: Theme) -> Plot;
}

/// Labels become categories, values the single series, joined columns the series label.
#[derive(Debug, Default, Clone, Copy)]
pub struct BarRenderer;

impl PlotRenderer for BarRenderer {
    fn render(&self, spec: &ChartSpec, data: &ChartData, theme: Theme) -> Plot {
        if data.labels.len() != data.values.len() {
            debug!(
                chart_type = %spec.chart_type,
                labels = data.labels.len(),
                values = data.values.len(),
                "Chart data length mismatch, binding common prefix"
            );
        }

        let categories = data
            .labels
            .iter()
            .zip(&data.values)
            .map(|(label, value)| BarCategory {
                label: label.clone(),
                value: *value,
            })
            .collect();

        Plot::Bar(BarPlot {
            series_label: spec.joined_columns(),
            categories,
            palette: theme.chart_palette(),
            theme,
        })
    }
}

/// Chart-kind tag -> renderer; new kinds are registered, not branched on.
#[derive(Clone)]
pub struct RendererRegistry {
    renderers: HashMap<String, Arc<dyn PlotRenderer>>,
}

impl RendererRegistry {
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    pub fn register(&mut self, chart_type: impl Into<String>, renderer: Arc<dyn PlotRenderer>) -> &mut Self {
        self.renderers.insert(chart_type.into(), renderer);
        self
    }

    pub fn supports(&self, chart_type: &str) -> bool {
        self.renderers.contains_key(chart_type)
    }

    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// `None` when the kind is unknown or the chart has no plot data.
    pub fn render(&self, spec: &ChartSpec, theme: Theme) -> Option<Plot> {
        let Some(renderer) = self.renderers.get(&spec.chart_type) else {
            debug!(chart_type = %spec.chart_type, "No renderer registered");
            return None;
        };
        let Some(data) = spec.chart_data.as_ref() else {
            debug!(chart_type = %spec.chart_type, "Chart has no plot data");
            return None;
        };
        Some(renderer.render(spec, data, theme))
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        let bar: Arc<dyn PlotRenderer> = Arc::new(BarRenderer);
        let mut registry = Self::empty();
        registry.register("bar", bar.clone()).register("histogram", bar);
        registry
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardBody {
    Plot(Plot),
    Unsupported,
}

impl CardBody {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            CardBody::Plot(_) => None,
            CardBody::Unsupported => Some(UNSUPPORTED_PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartCard {
    pub chart_type: String,
    pub columns: String,
    pub reason: String,
    pub body: CardBody,
}

/// Chart section state: the expand toggle plus the renderer registry.
#[derive(Debug, Clone, Default)]
pub struct ChartView {
    expanded: bool,
    registry: RendererRegistry,
}

impl ChartView {
    pub fn new(registry: RendererRegistry) -> Self {
        Self {
            expanded: false,
            registry,
        }
    }

    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RendererRegistry {
        &mut self.registry
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Received order, capped at the preview limit unless expanded.
    pub fn visible<'a>(&self, charts: &'a [ChartSpec]) -> &'a [ChartSpec] {
        if self.expanded {
            charts
        } else {
            &charts[..charts.len().min(CHART_PREVIEW_LIMIT)]
        }
    }

    /// No-op when every chart already fits in the preview.
    pub fn toggle(&mut self, total: usize) -> bool {
        if total > CHART_PREVIEW_LIMIT {
            self.expanded = !self.expanded;
        }
        self.expanded
    }

    pub fn collapse(&mut self) {
        self.expanded = false;
    }

    pub fn toggle_label(&self, total: usize) -> Option<&'static str> {
        if total <= CHART_PREVIEW_LIMIT {
            None
        } else if self.expanded {
            Some(SHOW_LESS_LABEL)
        } else {
            Some(SHOW_MORE_LABEL)
        }
    }

    pub fn card(&self, spec: &ChartSpec, theme: Theme) -> ChartCard {
        let body = match self.registry.render(spec, theme) {
            Some(plot) => CardBody::Plot(plot),
            None => CardBody::Unsupported,
        };

        ChartCard {
            chart_type: spec.chart_type.clone(),
            columns: spec.joined_columns(),
            reason: spec.reason.clone(),
            body,
        }
    }

    pub fn cards(&self, charts: &[ChartSpec], theme: Theme) -> Vec<ChartCard> {
        self.visible(charts)
            .iter()
            .map(|spec| self.card(spec, theme))
            .collect()
    }
}
