// Library interface for fittrack modules
// This allows integration tests and benches to access the core functionality

pub mod config;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod logging;
pub mod models;
pub mod packages;
pub mod running;
pub mod swimming;
pub mod training;
pub mod walking;

// Re-export commonly used types for convenience
pub use dispatch::{build_workout, read_package, PackageOutcome, Workout, WorkoutCode};
pub use driver::{process_package, run_packages, write_report, OutputFormat, PackageResult, RunReport};
pub use error::{ParseError, Result, TrackerError, ValidationError};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::InfoMessage;
pub use packages::{load_packages, sample_packages, Package};
pub use running::Running;
pub use swimming::Swimming;
pub use training::{Training, TrainingBase};
pub use walking::SportsWalking;
