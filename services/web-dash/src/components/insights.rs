// services/web-dash/src/components/insights.rs
//
// NIRIKSHAN Dashboard - Insights List Component
//

use leptos::*;

#[component]
pub fn InsightList(insights: Vec<String>) -> impl IntoView {
    view! {
        <ul class="insights-list">
            {insights
                .into_iter()
                .map(|insight| view! { <li class="insight-item">{insight}</li> })
                .collect_view()}
        </ul>
    }
}
