// services/web-dash/src/components/summary.rs
//
// NIRIKSHAN Dashboard - Summary Cards Component
//

use dashkit::views::summary_cards;
use dashkit::SummaryItem;
use leptos::*;

#[component]
pub fn SummaryCards(items: Vec<SummaryItem>) -> impl IntoView {
    let cards: Vec<(String, String)> = summary_cards(&items)
        .map(|(title, value)| (title.to_string(), value.to_string()))
        .collect();

    view! {
        <div class="stats-grid">
            {cards
                .into_iter()
                .map(|(title, value)| view! { <StatCard label=title value=value /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn StatCard(label: String, value: String) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-content">
                <span class="stat-value">{value}</span>
                <span class="stat-label">{label}</span>
            </div>
        </div>
    }
}
