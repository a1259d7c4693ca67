//! Human-readable rendering of simulation output.

mod formatter;

pub use formatter::ReportFormatter;
