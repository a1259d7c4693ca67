use super::{Funnel, Step, StepCategory};
use crate::error::ConversionError;
use std::fmt;
use std::str::FromStr;

/// Ready-made funnel blueprints, meant to be loaded with
/// [`FunnelCommand::Replace`](crate::edit::FunnelCommand::Replace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Empty,
    SalesPage,
    Webinar,
    Application,
    BookFunnel,
    EmailMarketing,
    Survey,
}

impl Template {
    pub const ALL: [Template; 7] = [
        Template::Empty,
        Template::SalesPage,
        Template::Webinar,
        Template::Application,
        Template::BookFunnel,
        Template::EmailMarketing,
        Template::Survey,
    ];

    /// The kebab-case name used on the command line, e.g. `"book-funnel"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Template::Empty => "empty",
            Template::SalesPage => "sales-page",
            Template::Webinar => "webinar",
            Template::Application => "application",
            Template::BookFunnel => "book-funnel",
            Template::EmailMarketing => "email-marketing",
            Template::Survey => "survey",
        }
    }

    pub fn build(self) -> Funnel {
        let steps = match self {
            Template::Empty => Vec::new(),
            Template::SalesPage => vec![
                source("1", "Facebook Ad", StepCategory::Ad, 3000.0, 1.5)
                    .with_next(["2"])
                    .in_group("Acquisition"),
                stage("2", "Long Form Sales Page", StepCategory::Sales, 3.0, 197.0)
                    .with_next(["3", "4"])
                    .with_weight("3", 30.0)
                    .with_weight("4", 70.0)
                    .in_group("Acquisition"),
                stage("3", "Checkout", StepCategory::Checkout, 65.0, 0.0)
                    .with_next(["5"])
                    .in_group("Conversion"),
                stage("4", "One-Time Offer", StepCategory::Upsell, 20.0, 47.0)
                    .with_next(["5"])
                    .in_group("Conversion"),
                stage("5", "Order Confirmation", StepCategory::ThankYou, 0.0, 0.0),
            ],
            Template::Webinar => vec![
                source("1", "LinkedIn Ads", StepCategory::Ad, 1000.0, 4.5)
                    .with_next(["2"])
                    .in_group("Sources"),
                stage("2", "Registration Page", StepCategory::Landing, 25.0, 0.0)
                    .with_next(["3"])
                    .in_group("Registration"),
                stage("3", "Reminder Sequence", StepCategory::Email, 100.0, 0.0)
                    .with_next(["4"])
                    .in_group("Nurture"),
                stage("4", "Live Webinar", StepCategory::Webinar, 40.0, 0.0)
                    .with_next(["5"])
                    .in_group("Event"),
                stage("5", "Webinar Pitch", StepCategory::Sales, 10.0, 997.0)
                    .with_next(["6"])
                    .in_group("Sales"),
                stage("6", "Checkout", StepCategory::Checkout, 70.0, 0.0).in_group("Sales"),
            ],
            // The case study video is a content step, so it is a source with no traffic
            // of its own and the rest of the chain stays empty until it is given some.
            Template::Application => vec![
                source("1", "Targeted Ads", StepCategory::Ad, 2000.0, 2.0).with_next(["2"]),
                source("2", "Case Study Video", StepCategory::Content, 0.0, 0.0).with_next(["3"]),
                stage("3", "Application Form", StepCategory::Application, 25.0, 0.0)
                    .with_next(["4"]),
                stage("4", "Consultation Call", StepCategory::Call, 30.0, 3000.0).with_next(["5"]),
                stage("5", "Onboarding", StepCategory::ThankYou, 0.0, 0.0),
            ],
            Template::BookFunnel => vec![
                source("1", "Organic Social", StepCategory::Social, 5000.0, 0.0).with_next(["2"]),
                stage("2", "Free+Shipping Book", StepCategory::Sales, 5.0, 7.95)
                    .with_next(["3", "4"]),
                stage("3", "Checkout", StepCategory::Checkout, 80.0, 0.0).with_next(["6"]),
                stage("4", "Audiobook Bump", StepCategory::Upsell, 30.0, 27.0).with_next(["6"]),
                stage("5", "Masterclass", StepCategory::Upsell, 10.0, 97.0).with_next(["6"]),
                stage("6", "Access Page", StepCategory::ThankYou, 0.0, 0.0),
            ],
            Template::EmailMarketing => vec![
                source("1", "Blog Traffic", StepCategory::Traffic, 10000.0, 0.0).with_next(["2"]),
                stage("2", "Lead Magnet Popup", StepCategory::Optin, 3.0, 0.0).with_next(["3"]),
                stage("3", "Welcome Email", StepCategory::Email, 40.0, 0.0).with_next(["4"]),
                stage("4", "Value Email 1", StepCategory::Email, 30.0, 0.0).with_next(["5"]),
                stage("5", "Offer Email", StepCategory::Email, 5.0, 0.0).with_next(["6"]),
                stage("6", "Sales Page", StepCategory::Sales, 8.0, 49.0),
            ],
            Template::Survey => vec![
                source("1", "Quiz Ad", StepCategory::Ad, 2500.0, 0.8).with_next(["2"]),
                stage("2", "Segmentation Quiz", StepCategory::Survey, 60.0, 0.0).with_next(["3"]),
                stage("3", "Get Results Optin", StepCategory::Optin, 50.0, 0.0).with_next(["4"]),
                stage("4", "Customized Offer", StepCategory::Sales, 12.0, 37.0),
            ],
        };
        Funnel::new(steps)
    }
}

fn source(id: &str, name: &str, category: StepCategory, traffic: f64, cpc: f64) -> Step {
    Step::new(id, name, category).with_traffic(traffic, cpc, 0.0)
}

fn stage(id: &str, name: &str, category: StepCategory, rate: f64, price: f64) -> Step {
    Step::new(id, name, category).with_conversion(rate, price)
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Template::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConversionError::UnknownTemplate(s.to_string()))
    }
}

impl Funnel {
    /// Builds the named template, e.g. `Funnel::template("webinar")`.
    pub fn template(name: &str) -> Result<Self, ConversionError> {
        name.parse::<Template>().map(Template::build)
    }
}
