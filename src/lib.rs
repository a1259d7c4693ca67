//! # FunnelFlow - Funnel Flow Simulation Engine
//!
//! **FunnelFlow** models a marketing funnel as a directed graph of steps and simulates
//! how traffic flows through it: how many visitors each step receives and passes on,
//! what it earns and what it costs, and what the whole funnel returns.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic. It operates on an immutable [`Funnel`](funnel::Funnel)
//! snapshot, an ordered list of [`Step`](funnel::Step)s. The primary workflow is:
//!
//! 1.  **Load Your Data**: Build steps directly, or load the editor's JSON format with
//!     [`FunnelDocument`](record::FunnelDocument).
//! 2.  **Convert**: Implement [`IntoFunnel`](record::IntoFunnel) for your own structs to
//!     translate them into a `Funnel`.
//! 3.  **Simulate**: Configure a [`Simulator`](simulation::Simulator) with its builder (or use
//!     [`simulate`](simulation::simulate)) and run it. The result is a
//!     [`SimulationReport`](simulation::SimulationReport) with per-step metrics and totals.
//! 4.  **Edit**: Apply [`FunnelCommand`](edit::FunnelCommand)s to get the next snapshot and
//!     simulate again. [`History`](edit::History) provides undo and redo.
//!
//! ## How flow is computed
//!
//! Traffic sources emit their volume at a fixed rate. Every other step converts a
//! percentage of what it receives and splits its output over its outgoing edges by
//! branch weight. Flow is relaxed over a bounded number of synchronous passes (five by
//! default), which handles re-converging paths and backward edges without requiring
//! a topological order.
//!
//! ## Quick Start
//!
//! ```rust
//! use funnelflow::prelude::*;
//!
//! let funnel = Funnel::new(vec![
//!     Step::new("ad", "Search Ad", StepCategory::Ad)
//!         .with_traffic(1000.0, 0.5, 0.0)
//!         .with_next(["lp"]),
//!     Step::new("lp", "Landing Page", StepCategory::Landing)
//!         .with_conversion(50.0, 0.0)
//!         .with_next(["sales"]),
//!     Step::new("sales", "Sales Page", StepCategory::Sales).with_conversion(20.0, 50.0),
//! ]);
//!
//! let report = Simulator::builder().passes(5).build().simulate(&funnel);
//!
//! let sales = report.metrics("sales").unwrap();
//! assert_eq!(sales.visitors_in, 500.0);
//! assert_eq!(sales.revenue, 5000.0);
//! assert_eq!(report.totals.total_cost, 500.0);
//! assert_eq!(report.totals.roas, 10.0);
//!
//! println!("{}", ReportFormatter::format_report(&report));
//! ```

pub mod edit;
pub mod error;
pub mod format;
pub mod funnel;
pub mod prelude;
pub mod record;
pub mod simulation;
pub mod validate;
