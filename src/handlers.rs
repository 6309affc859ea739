pub mod accounts;
pub mod debts;
pub mod health;
pub mod recurring;
pub mod validation;

/// Default as-of and start date for requests that omit one.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
