pub mod store;

pub use store::{ReportStore, StoreError, DEFAULT_HISTORY_CAPACITY};
