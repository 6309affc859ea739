use crate::handlers::{
    accounts::get_accounts,
    debts::{compare_debt_strategies, get_debt_plan, simulate_debts},
    health::health_check,
    recurring::{get_recurring_rules, process_recurring_rules, project_rule},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = state.config.request_timeout();

    let router = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Accounts
        .route("/api/v1/accounts", get(get_accounts))
        // Recurring transactions
        .route("/api/v1/recurring/project", post(project_rule))
        .route("/api/v1/recurring-rules", get(get_recurring_rules))
        .route("/api/v1/recurring-rules/process", post(process_recurring_rules))
        // Debt payoff
        .route("/api/v1/debts/simulate", post(simulate_debts))
        .route("/api/v1/debts/compare", post(compare_debt_strategies))
        .route("/api/v1/debts/plan", get(get_debt_plan))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // The Prometheus recorder is global and can only be installed once per
    // process, so tests build routers without it.
    #[cfg(not(test))]
    let router = {
        let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();
        router
            .route("/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer)
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
