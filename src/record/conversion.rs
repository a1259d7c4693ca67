use super::definition::{FunnelDocument, SavedFunnel, StepRecord};
use crate::error::ConversionError;
use crate::funnel::{EntryMetrics, Funnel, StageMetrics, Step, StepCategory, StepKind};

/// A trait for external data models that can be converted into a [`Funnel`].
///
/// Implement it on your own storage or template structs to feed them to the
/// simulator. The flat editor format ([`StepRecord`]) is supported out of the box.
///
/// # Example
///
/// ```rust
/// use funnelflow::error::ConversionError;
/// use funnelflow::funnel::{Funnel, Step, StepCategory};
/// use funnelflow::record::IntoFunnel;
///
/// struct Campaign { visitors: f64 }
///
/// impl IntoFunnel for Campaign {
///     fn into_funnel(self) -> Result<Funnel, ConversionError> {
///         Ok(Funnel::new(vec![
///             Step::new("src", "Search", StepCategory::Ad)
///                 .with_traffic(self.visitors, 0.4, 0.0)
///                 .with_next(["lp"]),
///             Step::new("lp", "Landing", StepCategory::Landing).with_conversion(30.0, 0.0),
///         ]))
///     }
/// }
///
/// let funnel = Campaign { visitors: 500.0 }.into_funnel().unwrap();
/// assert_eq!(funnel.len(), 2);
/// ```
pub trait IntoFunnel {
    /// Consumes the object and converts it into a funnel snapshot.
    fn into_funnel(self) -> Result<Funnel, ConversionError>;
}

impl TryFrom<StepRecord> for Step {
    type Error = ConversionError;

    fn try_from(record: StepRecord) -> Result<Self, Self::Error> {
        let category: StepCategory = record.category.parse()?;
        let kind = if category.is_entry() {
            StepKind::Entry(EntryMetrics {
                traffic_volume: record.traffic_volume.unwrap_or(0.0),
                cost_per_click: record.cpc.unwrap_or(0.0),
                cost_per_lead: record.cpl.unwrap_or(0.0),
            })
        } else {
            StepKind::Stage(StageMetrics {
                conversion_rate: record.conversion_rate,
                product_price: record.product_price,
            })
        };

        Ok(Step {
            id: record.id,
            name: record.name,
            category,
            kind,
            cost_per_acquisition: record.cpa.unwrap_or(0.0),
            next_steps: record.next_steps,
            branch_weights: record.variant_weights.unwrap_or_default(),
            group_name: record.group_name,
            description: record.description,
            url: record.url,
        })
    }
}

impl From<&Step> for StepRecord {
    fn from(step: &Step) -> Self {
        let entry = step.entry_metrics();
        let stage = step.stage_metrics();
        StepRecord {
            id: step.id.clone(),
            category: step.category.as_str().to_string(),
            name: step.name.clone(),
            description: step.description.clone(),
            url: step.url.clone(),
            next_steps: step.next_steps.clone(),
            variant_weights: (!step.branch_weights.is_empty())
                .then(|| step.branch_weights.clone()),
            group_name: step.group_name.clone(),
            // Sources always pass everything they receive on.
            conversion_rate: stage.map_or(100.0, |m| m.conversion_rate),
            product_price: stage.map_or(0.0, |m| m.product_price),
            traffic_volume: entry.map(|m| m.traffic_volume),
            cpc: entry.map(|m| m.cost_per_click),
            cpl: entry.map(|m| m.cost_per_lead),
            cpa: Some(step.cost_per_acquisition),
        }
    }
}

impl IntoFunnel for Vec<StepRecord> {
    fn into_funnel(self) -> Result<Funnel, ConversionError> {
        self.into_iter()
            .enumerate()
            .map(|(position, record)| {
                if record.id.trim().is_empty() {
                    return Err(ConversionError::MissingId { position });
                }
                Step::try_from(record)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Funnel::new)
    }
}

impl IntoFunnel for SavedFunnel {
    fn into_funnel(self) -> Result<Funnel, ConversionError> {
        self.steps.into_funnel()
    }
}

impl IntoFunnel for FunnelDocument {
    fn into_funnel(self) -> Result<Funnel, ConversionError> {
        match self {
            FunnelDocument::Saved(saved) => saved.into_funnel(),
            FunnelDocument::Steps(steps) => steps.into_funnel(),
        }
    }
}

impl Funnel {
    /// Flattens the funnel back into editor records, in step order.
    pub fn to_records(&self) -> Vec<StepRecord> {
        self.iter().map(StepRecord::from).collect()
    }
}
