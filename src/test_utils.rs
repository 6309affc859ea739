#[cfg(test)]
pub mod test_utils {
    use crate::config::AppConfig;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use model::{InMemoryLedger, LedgerSnapshot};
    use moka::future::Cache;
    use std::sync::{Arc, Once};
    use tokio::sync::RwLock;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Ledger used by the integration tests.
    pub const TEST_LEDGER: &str = r#"
accounts:
  - id: 1
    name: Checking
    balance: "1500.00"
  - id: 2
    name: Savings
    balance: "10000.00"
recurring_rules:
  - id: 1
    account_id: 1
    description: Salary
    amount: "3000.00"
    kind: income
    frequency: semi_monthly
    anchor_day: 15
    anchor_day_2: 31
    start_date: 2024-01-01
  - id: 2
    account_id: 1
    description: Rent
    amount: "1200.00"
    kind: expense
    frequency: monthly
    anchor_day: 1
    start_date: 2024-01-01
    last_processed_date: 2024-01-01
  - id: 3
    account_id: 2
    description: Broken annual rule
    amount: "100.00"
    kind: expense
    frequency: annual
    anchor_day: 1
    start_date: 2024-01-01
debts:
  - id: 1
    name: A
    current_balance: "1000"
    minimum_payment: "50"
    interest_rate: "12"
  - id: 2
    name: B
    current_balance: "500"
    minimum_payment: "25"
    interest_rate: "24"
"#;

    /// Create in-memory ledger seeded with [`TEST_LEDGER`]
    pub fn setup_test_ledger() -> InMemoryLedger {
        let snapshot = LedgerSnapshot::parse(TEST_LEDGER).expect("Failed to parse test ledger");
        InMemoryLedger::from_snapshot(snapshot).expect("Failed to build test ledger")
    }

    /// Create AppState for testing
    pub fn setup_test_app_state() -> AppState {
        let cache = Cache::new(100);

        AppState {
            store: Arc::new(RwLock::new(setup_test_ledger())),
            cache,
            config: Arc::new(AppConfig::default()),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    pub fn init_test_tracing() {
        static INIT: Once = Once::new();

        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        INIT.call_once(|| {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .finish();
            // Another test harness may already own the global subscriber
            let _ = tracing::subscriber::set_global_default(subscriber);
        });
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        init_test_tracing();
        create_router(setup_test_app_state())
    }

    /// Create axum app together with its state, for tests that inspect the store
    pub fn setup_test_app_with_state() -> (Router, AppState) {
        init_test_tracing();
        let state = setup_test_app_state();
        (create_router(state.clone()), state)
    }
}
