pub mod calendar;
pub mod config;
pub mod directory;

// Re-exports for convenience
pub use calendar::{CalendarError, MonthGrid, days_in_month, is_holiday_column};
pub use config::{AppConfigExt, ConfigError};
pub use directory::{DirectoryError, SUPPORTED_EXTENSIONS, ensure_output_dir, scan_images};
