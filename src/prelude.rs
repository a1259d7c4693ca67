//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the funnelflow crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use funnelflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let funnel = FunnelDocument::from_file("path/to/funnel.json")?.into_funnel()?;
//! for issue in validate(&funnel) {
//!     eprintln!("{}", issue);
//! }
//! let report = simulate(&funnel);
//! println!("Profit: {}", report.totals.total_profit);
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::funnel::{EntryMetrics, Funnel, StageMetrics, Step, StepCategory, StepKind, Template};

// Simulation
pub use crate::simulation::{
    BranchSplit, FunnelTotals, GrowthPoint, SimulatedStep, SimulationConfig, SimulationReport,
    Simulator, StepMetrics, connection_weight, simulate,
};

// Input formats
pub use crate::record::{FunnelDocument, IntoFunnel, SavedFunnel, StepRecord};

// Editing and validation
pub use crate::edit::{Direction, FunnelCommand, History};
pub use crate::validate::{Issue, Severity, validate};

// Error types
pub use crate::error::{ConversionError, EditError};

// Report formatting
pub use crate::format::ReportFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
