// services/web-dash/src/app.rs
//
// NIRIKSHAN Dashboard - Main Application Component
//

use dashkit::{
    AnalysisClient, AnalysisConfig, Anomaly, ChartCard, DashboardController, PageBody, ReportView,
    SummaryItem, Theme,
};
use leptos::*;

use crate::base_url;
use crate::components::{
    AnomalyList, ChartGrid, ErrorBanner, Header, InsightList, SummaryCards, UploadPanel,
};

/// Owned copy of a report view, so it can be moved into the DOM tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSnapshot {
    pub caption: Option<String>,
    pub summary: Vec<SummaryItem>,
    pub charts: Vec<ChartCard>,
    pub chart_toggle: Option<&'static str>,
    pub anomalies: Vec<Anomaly>,
    pub insights: Vec<String>,
}

impl From<&ReportView<'_>> for ReportSnapshot {
    fn from(view: &ReportView<'_>) -> Self {
        Self {
            caption: view.report.meta.as_ref().map(|meta| meta.caption()),
            summary: view.report.summary.clone(),
            charts: view.charts.clone(),
            chart_toggle: view.chart_toggle,
            anomalies: view.anomalies.items().to_vec(),
            insights: view.report.insights.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Body {
    Welcome,
    Loading,
    Report(ReportSnapshot),
}

#[component]
pub fn App() -> impl IntoView {
    let controller = create_rw_signal(DashboardController::new(Theme::default()));

    let client = match AnalysisClient::new(&AnalysisConfig::new(base_url())) {
        Ok(client) => Some(client),
        Err(e) => {
            log::error!("Analysis client unavailable: {}", e);
            controller.update(|c| c.record_error(e));
            None
        }
    };
    let client = store_value(client);

    // Theme lives in controller state; the body attribute only mirrors it.
    create_effect(move |_| {
        let theme = controller.with(|c| c.theme());
        if let Some(body) = document().body() {
            let _ = body.set_attribute("data-theme", theme.as_str());
        }
    });

    let on_analyze = Callback::new(move |_: ()| {
        let Some(client) = client.get_value() else {
            return;
        };
        let ticket = match controller.try_update(|c| c.begin_analysis()) {
            Some(Ok(ticket)) => ticket,
            Some(Err(e)) => {
                log::debug!("Analyze ignored: {}", e);
                return;
            }
            None => return,
        };

        spawn_local(async move {
            let outcome = ticket.submit(&client).await;
            controller.update(|c| {
                c.finish(outcome);
            });
        });
    });

    let on_toggle_charts = Callback::new(move |_: ()| {
        controller.update(|c| {
            c.toggle_charts();
        });
    });

    let body = create_memo(move |_| {
        controller.with(|c| match &c.view().body {
            PageBody::Welcome => Body::Welcome,
            PageBody::Loading => Body::Loading,
            PageBody::Report(view) => Body::Report(ReportSnapshot::from(view)),
        })
    });

    view! {
        <div class="nirikshan-app">
            <Header controller=controller />

            <main class="dashboard">
                <UploadPanel controller=controller on_analyze=on_analyze />
                <ErrorBanner controller=controller />

                {move || match body.get() {
                    Body::Welcome => view! {
                        <section class="panel welcome-panel">
                            <h2 class="panel-title">"Upload a CSV to build its dashboard"</h2>
                            <p class="muted">"Choose a file, then press Analyze."</p>
                        </section>
                    }.into_view(),
                    Body::Loading => view! {
                        <section class="panel loading-panel">
                            <div class="spinner"></div>
                            <p>{dashkit::views::LOADING_MESSAGE}</p>
                        </section>
                    }.into_view(),
                    Body::Report(report) => view! {
                        <ReportSections report=report on_toggle_charts=on_toggle_charts />
                    }.into_view(),
                }}
            </main>

            <footer class="footer">
                <span class="footer-brand">"NIRIKSHAN"</span>
                <span class="footer-tagline">"Automated insight from any CSV"</span>
            </footer>
        </div>
    }
}

#[component]
fn ReportSections(report: ReportSnapshot, on_toggle_charts: Callback<()>) -> impl IntoView {
    let ReportSnapshot {
        caption,
        summary,
        charts,
        chart_toggle,
        anomalies,
        insights,
    } = report;

    view! {
        <div class="report">
            {caption.map(|caption| view! { <p class="report-caption">{caption}</p> })}

            <section class="panel summary-panel">
                <h2 class="panel-title">"Summary"</h2>
                <SummaryCards items=summary />
            </section>

            <section class="panel charts-panel">
                <h2 class="panel-title">"Visual Insights"</h2>
                <ChartGrid cards=charts toggle=chart_toggle on_toggle=on_toggle_charts />
            </section>

            <div class="dashboard-grid bottom-row">
                <AnomalyList anomalies=anomalies />
                <section class="panel insights-panel">
                    <h2 class="panel-title">"Insights"</h2>
                    <InsightList insights=insights />
                </section>
            </div>
        </div>
    }
}
