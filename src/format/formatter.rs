use crate::simulation::{FunnelTotals, SimulationReport};
use crate::validate::{Issue, Severity};
use itertools::Itertools;

const HEADERS: [&str; 7] = ["Step", "Type", "In", "Out", "Revenue", "Cost", "Cumulative"];

/// Formats simulation reports into plain-text tables.
pub struct ReportFormatter;

impl ReportFormatter {
    /// One row per step followed by the funnel totals.
    pub fn format_report(report: &SimulationReport) -> String {
        let rows: Vec<[String; 7]> = report
            .steps
            .iter()
            .map(|s| {
                [
                    s.step.name.clone(),
                    s.step.category.to_string(),
                    Self::format_number(s.metrics.visitors_in),
                    Self::format_number(s.metrics.visitors_out),
                    Self::format_number(s.metrics.revenue),
                    Self::format_number(s.metrics.cost),
                    Self::format_number(s.metrics.cumulative_revenue),
                ]
            })
            .collect();

        let widths: Vec<usize> = (0..HEADERS.len())
            .map(|col| {
                rows.iter()
                    .map(|r| r[col].chars().count())
                    .chain(std::iter::once(HEADERS[col].len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&Self::format_row(&HEADERS.map(String::from), &widths));
        out.push('\n');
        out.push_str(&widths.iter().map(|w| "-".repeat(*w)).join("-+-"));
        out.push('\n');
        for row in &rows {
            out.push_str(&Self::format_row(row, &widths));
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&Self::format_totals(&report.totals));
        out
    }

    pub fn format_totals(totals: &FunnelTotals) -> String {
        [
            format!("Revenue:    {}", Self::format_number(totals.total_revenue)),
            format!("Cost:       {}", Self::format_number(totals.total_cost)),
            format!(
                "Profit:     {} ({})",
                Self::format_number(totals.total_profit),
                match totals.total_profit {
                    p if p > 0.0 => "profit",
                    p if p < 0.0 => "loss",
                    _ => "break-even",
                }
            ),
            format!("ROAS:       {:.2}x", totals.roas),
            format!("EPA:        {:.2}", totals.epa),
        ]
        .join("\n")
    }

    /// One line per issue, errors first.
    pub fn format_issues(issues: &[Issue]) -> String {
        issues
            .iter()
            .sorted_by_key(|i| std::cmp::Reverse(i.severity()))
            .map(|i| {
                let label = match i.severity() {
                    Severity::Error => "error",
                    Severity::Warning => "warning",
                };
                format!("{}: {}", label, i)
            })
            .join("\n")
    }

    fn format_row(cells: &[String], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(col, (cell, width))| {
                // Text columns left-aligned, figures right-aligned.
                if col < 2 {
                    format!("{:<width$}", cell, width = *width)
                } else {
                    format!("{:>width$}", cell, width = *width)
                }
            })
            .join(" | ")
            .trim_end()
            .to_string()
    }

    /// Whole numbers without decimals, everything else to two places.
    fn format_number(n: f64) -> String {
        if n.fract() == 0.0 {
            format!("{}", n as i64)
        } else {
            format!("{:.2}", n)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::{Funnel, Step, StepCategory};
    use crate::simulation::simulate;

    #[test]
    fn table_lists_every_step_and_totals() {
        let funnel = Funnel::new(vec![
            Step::new("1", "Blog", StepCategory::Traffic)
                .with_traffic(1000.0, 0.0, 0.0)
                .with_next(["2"]),
            Step::new("2", "Offer", StepCategory::Sales).with_conversion(3.0, 49.0),
        ]);
        let text = ReportFormatter::format_report(&simulate(&funnel));
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Step"));
        assert!(lines[2].starts_with("Blog"));
        assert!(lines[3].contains("SALES"));
        assert!(lines[3].contains("1470"));
        assert!(text.contains("ROAS:       0.00x"));
        assert!(text.contains("EPA:        1.47"));
    }

    #[test]
    fn profit_label_follows_the_sign() {
        let label = |total_profit: f64| {
            ReportFormatter::format_totals(&FunnelTotals {
                total_profit,
                ..Default::default()
            })
        };
        assert!(label(10.0).contains("Profit:     10 (profit)"));
        assert!(label(-10.0).contains("Profit:     -10 (loss)"));
        assert!(label(0.0).contains("Profit:     0 (break-even)"));
    }

    #[test]
    fn numbers_drop_needless_decimals() {
        assert_eq!(ReportFormatter::format_number(5000.0), "5000");
        assert_eq!(ReportFormatter::format_number(58.333), "58.33");
    }

    #[test]
    fn errors_are_listed_before_warnings() {
        let issues = vec![
            Issue::SelfLoop { step: "a".into() },
            Issue::DuplicateId {
                id: "b".into(),
                count: 2,
            },
        ];
        let text = ReportFormatter::format_issues(&issues);
        assert!(text.starts_with("error: Step id 'b'"));
        assert!(text.ends_with("warning: Step 'a' links to itself"));
    }
}
