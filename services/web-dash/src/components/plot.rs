// services/web-dash/src/components/plot.rs
//
// NIRIKSHAN Dashboard - SVG bar plot
// Geometry is computed separately from the view so it can be tested natively
//

use dashkit::charts::BarPlot;
use dashkit::types::format_number;
use leptos::*;

pub const VIEW_WIDTH: f64 = 400.0;
pub const VIEW_HEIGHT: f64 = 220.0;
const PAD_LEFT: f64 = 44.0;
const PAD_RIGHT: f64 = 8.0;
const PAD_TOP: f64 = 10.0;
const PAD_BOTTOM: f64 = 30.0;
const GRID_LINES: usize = 4;
const BAR_FILL_RATIO: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub y: f64,
    pub tick: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub bars: Vec<BarRect>,
    pub grid: Vec<GridLine>,
    pub baseline: f64,
}

/// Bars share the plot width evenly; heights scale against the largest non-negative value.
pub fn layout_bars(plot: &BarPlot) -> BarLayout {
    let inner_width = VIEW_WIDTH - PAD_LEFT - PAD_RIGHT;
    let inner_height = VIEW_HEIGHT - PAD_TOP - PAD_BOTTOM;
    let baseline = PAD_TOP + inner_height;
    let max = plot.max_value();

    let slot = inner_width / plot.categories.len().max(1) as f64;
    let bars = plot
        .categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let height = if max > 0.0 && category.value.is_finite() {
                category.value.max(0.0) / max * inner_height
            } else {
                0.0
            };
            BarRect {
                x: PAD_LEFT + i as f64 * slot + slot * (1.0 - BAR_FILL_RATIO) / 2.0,
                y: baseline - height,
                width: slot * BAR_FILL_RATIO,
                height,
                label: category.label.clone(),
                value: format_number(category.value),
            }
        })
        .collect();

    let grid = (1..=GRID_LINES)
        .map(|step| {
            let fraction = step as f64 / GRID_LINES as f64;
            GridLine {
                y: baseline - fraction * inner_height,
                tick: format_number((max * fraction * 100.0).round() / 100.0),
            }
        })
        .collect();

    BarLayout { bars, grid, baseline }
}

#[component]
pub fn BarPlotSvg(plot: BarPlot) -> impl IntoView {
    let layout = layout_bars(&plot);
    let axis = plot.palette.axis.to_css();
    let grid = plot.palette.grid.to_css();
    let bar = plot.palette.bar.to_css();
    let baseline = format!("{:.1}", layout.baseline);

    let grid_lines = layout
        .grid
        .iter()
        .map(|line| {
            let y = format!("{:.1}", line.y);
            view! {
                <line x1=format!("{}", PAD_LEFT) y1=y.clone() x2=format!("{}", VIEW_WIDTH - PAD_RIGHT) y2=y.clone() stroke=grid.clone() />
                <text x=format!("{}", PAD_LEFT - 4.0) y=y text-anchor="end" class="tick" fill=axis.clone()>{line.tick.clone()}</text>
            }
        })
        .collect_view();

    let bars = layout
        .bars
        .iter()
        .map(|rect| {
            let center = format!("{:.1}", rect.x + rect.width / 2.0);
            view! {
                <rect
                    x=format!("{:.1}", rect.x)
                    y=format!("{:.1}", rect.y)
                    width=format!("{:.1}", rect.width)
                    height=format!("{:.1}", rect.height)
                    fill=bar.clone()
                >
                    <title>{format!("{}: {}", rect.label, rect.value)}</title>
                </rect>
                <text x=center y=format!("{:.1}", layout.baseline + 16.0) text-anchor="middle" class="tick" fill=axis.clone()>
                    {rect.label.clone()}
                </text>
            }
        })
        .collect_view();

    view! {
        <figure class="bar-plot" data-theme=plot.theme.as_str()>
            <svg class="chart-svg" viewBox=format!("0 0 {} {}", VIEW_WIDTH, VIEW_HEIGHT)>
                {grid_lines}
                <line x1=format!("{}", PAD_LEFT) y1=format!("{}", PAD_TOP) x2=format!("{}", PAD_LEFT) y2=baseline.clone() stroke=axis.clone() />
                <line x1=format!("{}", PAD_LEFT) y1=baseline.clone() x2=format!("{}", VIEW_WIDTH - PAD_RIGHT) y2=baseline stroke=axis.clone() />
                {bars}
            </svg>
            <figcaption class="legend">
                <span class="legend-swatch" style=format!("background:{}", plot.palette.bar.to_css())></span>
                <span style=format!("color:{}", axis)>{plot.series_label.clone()}</span>
            </figcaption>
        </figure>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashkit::charts::BarCategory;
    use dashkit::Theme;

    fn plot(values: &[f64]) -> BarPlot {
        BarPlot {
            series_label: "age".into(),
            categories: values
                .iter()
                .enumerate()
                .map(|(i, value)| BarCategory { label: format!("b{}", i), value: *value })
                .collect(),
            palette: Theme::Light.chart_palette(),
            theme: Theme::Light,
        }
    }

    #[test]
    fn tallest_bar_fills_the_plot_height() {
        let layout = layout_bars(&plot(&[30.0, 70.0]));
        let full = VIEW_HEIGHT - PAD_TOP - PAD_BOTTOM;

        assert_eq!(layout.bars.len(), 2);
        assert!((layout.bars[1].height - full).abs() < 1e-9);
        assert!((layout.bars[0].height - full * 30.0 / 70.0).abs() < 1e-9);
        assert_eq!(layout.bars[1].y, PAD_TOP);
        assert_eq!(layout.bars[0].value, "30");
    }

    #[test]
    fn bars_keep_order_and_do_not_overlap() {
        let layout = layout_bars(&plot(&[1.0, 2.0, 3.0, 4.0, 5.0]));
        for pair in layout.bars.windows(2) {
            assert!(pair[0].x + pair[0].width < pair[1].x);
        }
        let labels: Vec<_> = layout.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["b0", "b1", "b2", "b3", "b4"]);
    }

    #[test]
    fn negative_and_empty_series_stay_on_the_baseline() {
        let layout = layout_bars(&plot(&[-5.0, 0.0]));
        assert!(layout.bars.iter().all(|b| b.height == 0.0 && b.y == layout.baseline));

        let empty = layout_bars(&plot(&[]));
        assert!(empty.bars.is_empty());
        assert_eq!(empty.grid.len(), GRID_LINES);
    }

    #[test]
    fn top_gridline_is_labelled_with_the_max() {
        let layout = layout_bars(&plot(&[12.5, 50.0]));
        assert_eq!(layout.grid.last().map(|g| g.tick.as_str()), Some("50"));
        assert_eq!(layout.grid[0].tick, "12.5");
    }
}
