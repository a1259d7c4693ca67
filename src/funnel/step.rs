use super::StepCategory;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Acquisition inputs of a traffic source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMetrics {
    pub traffic_volume: f64,
    pub cost_per_click: f64,
    pub cost_per_lead: f64,
}

/// Conversion inputs of a page, event or messaging step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageMetrics {
    /// Percentage of inbound visitors that convert, nominally `0..=100`.
    pub conversion_rate: f64,
    /// Revenue per conversion.
    pub product_price: f64,
}

/// The role-specific inputs of a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum StepKind {
    Entry(EntryMetrics),
    Stage(StageMetrics),
}

impl StepKind {
    /// The default inputs for a freshly added step of `category`.
    pub fn default_for(category: StepCategory) -> Self {
        if category.is_entry() {
            StepKind::Entry(EntryMetrics {
                traffic_volume: 1000.0,
                cost_per_click: 1.0,
                cost_per_lead: 0.0,
            })
        } else {
            StepKind::Stage(StageMetrics {
                conversion_rate: 10.0,
                product_price: 0.0,
            })
        }
    }
}

/// A single node of the funnel graph.
///
/// Only structural fields live here. Computed flow figures are produced by the
/// simulator as [`StepMetrics`](crate::simulation::StepMetrics) and never stored back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub name: String,
    pub category: StepCategory,
    #[serde(flatten)]
    pub kind: StepKind,
    /// Cost charged per conversion at this step. Applies to every category.
    #[serde(default)]
    pub cost_per_acquisition: f64,
    /// Ids of the steps this one feeds, in display order.
    #[serde(default)]
    pub next_steps: Vec<String>,
    /// Explicit split percentages keyed by target id.
    #[serde(default)]
    pub branch_weights: AHashMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Step {
    /// Creates a step with the default inputs for its category and no edges.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: StepCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            kind: StepKind::default_for(category),
            cost_per_acquisition: 0.0,
            next_steps: Vec::new(),
            branch_weights: AHashMap::new(),
            group_name: None,
            description: None,
            url: None,
        }
    }

    /// Creates a step named after its category, e.g. `"New Landing"`.
    pub fn with_default_name(id: impl Into<String>, category: StepCategory) -> Self {
        Self::new(id, format!("New {}", category.label()), category)
    }

    /// Sets the traffic inputs. Has no effect on stage steps.
    pub fn with_traffic(mut self, volume: f64, cost_per_click: f64, cost_per_lead: f64) -> Self {
        if let StepKind::Entry(metrics) = &mut self.kind {
            metrics.traffic_volume = volume;
            metrics.cost_per_click = cost_per_click;
            metrics.cost_per_lead = cost_per_lead;
        }
        self
    }

    /// Sets the conversion inputs. Has no effect on entry steps.
    pub fn with_conversion(mut self, rate: f64, price: f64) -> Self {
        if let StepKind::Stage(metrics) = &mut self.kind {
            metrics.conversion_rate = rate;
            metrics.product_price = price;
        }
        self
    }

    pub fn with_cost_per_acquisition(mut self, cpa: f64) -> Self {
        self.cost_per_acquisition = cpa;
        self
    }

    pub fn with_next<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.next_steps.extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn with_weight(mut self, target: impl Into<String>, weight: f64) -> Self {
        self.branch_weights.insert(target.into(), weight);
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group_name = Some(group.into());
        self
    }

    /// Whether this step originates traffic. Decided by category alone.
    pub fn is_entry(&self) -> bool {
        self.category.is_entry()
    }

    pub fn entry_metrics(&self) -> Option<&EntryMetrics> {
        match &self.kind {
            StepKind::Entry(m) => Some(m),
            StepKind::Stage(_) => None,
        }
    }

    pub fn stage_metrics(&self) -> Option<&StageMetrics> {
        match &self.kind {
            StepKind::Stage(m) => Some(m),
            StepKind::Entry(_) => None,
        }
    }

    /// Originating traffic, `0` for anything that is not an entry step.
    pub fn traffic_volume(&self) -> f64 {
        self.entry_metrics().map_or(0.0, |m| m.traffic_volume)
    }

    /// `true` when `kind` carries the inputs its category calls for.
    pub fn kind_matches_category(&self) -> bool {
        matches!(self.kind, StepKind::Entry(_)) == self.is_entry()
    }

    /// Whether `target` is listed among this step's outgoing edges.
    pub fn links_to(&self, target: &str) -> bool {
        self.next_steps.iter().any(|t| t == target)
    }

    pub fn weight_for(&self, target: &str) -> Option<f64> {
        self.branch_weights.get(target).copied()
    }
}
