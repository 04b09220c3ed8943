//! Civic App - issue reporting client
//!
//! # Module structure
//!
//! ```text
//! civic-app/src/
//! ├── core/        # configuration, errors
//! ├── store/       # redb device cache
//! ├── dashboard/   # merged issue list + statistics
//! ├── report.rs    # report flow
//! ├── detail.rs    # issue detail flow
//! ├── map.rs       # map flow
//! ├── admin.rs     # admin panel
//! ├── location.rs  # coordinate input and address stub
//! ├── cli.rs       # command-line surface
//! └── utils/       # logging
//! ```

pub mod admin;
pub mod cli;
pub mod core;
pub mod dashboard;
pub mod detail;
pub mod location;
pub mod map;
pub mod report;
pub mod store;
pub mod utils;

#[cfg(test)]
mod testing;

pub use crate::core::{AppConfig, AppError, AppResult};
pub use dashboard::{Dashboard, DashboardState, Navigation};
pub use store::{LocalStore, StoreError};
pub use utils::init_logger_with_file;
