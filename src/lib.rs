pub mod export;
pub mod fetch;
pub mod format;
pub mod infra;
pub mod pagination;
pub mod records;
pub mod report;
pub mod services;
pub mod validate;
