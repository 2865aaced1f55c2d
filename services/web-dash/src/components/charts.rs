// services/web-dash/src/components/charts.rs
//
// NIRIKSHAN Dashboard - Chart Grid Component
//

use dashkit::charts::UNSUPPORTED_PLACEHOLDER;
use dashkit::{CardBody, ChartCard, Plot};
use leptos::*;

use super::plot::BarPlotSvg;

#[component]
pub fn ChartGrid(
    cards: Vec<ChartCard>,
    toggle: Option<&'static str>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    let cards = cards
        .into_iter()
        .map(|card| view! { <ChartCardView card=card /> })
        .collect_view();

    view! {
        <div class="charts-grid">{cards}</div>
        {toggle.map(|label| view! {
            <button class="btn btn-toggle" on:click=move |_| on_toggle.call(())>{label}</button>
        })}
    }
}

#[component]
fn ChartCardView(card: ChartCard) -> impl IntoView {
    let ChartCard {
        chart_type,
        columns,
        reason,
        body,
    } = card;

    // Built from (spec, theme) on every render; a theme change yields a new Plot and a new subtree.
    let content = match body {
        CardBody::Plot(Plot::Bar(plot)) => view! { <BarPlotSvg plot=plot /> }.into_view(),
        other => {
            let message = other.placeholder().unwrap_or(UNSUPPORTED_PLACEHOLDER);
            view! { <p class="chart-placeholder">{message}</p> }.into_view()
        }
    };

    view! {
        <article class="chart-card">
            <header class="chart-card-header">
                <span class="chart-type">{chart_type}</span>
                <span class="chart-columns">{columns}</span>
            </header>
            <p class="chart-reason">{reason}</p>
            {content}
        </article>
    }
}
