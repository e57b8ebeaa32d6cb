pub mod config;
pub mod file_utils;
pub mod log_utils;
pub mod render;
pub mod url_utils;

pub use config::Config;
pub use file_utils::{create_json, report_file_name, report_timestamp};
pub use log_utils::init_logging;
pub use url_utils::{normalize_url, parse_url_list, process_urls_from_file};
