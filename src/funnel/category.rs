use crate::error::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of step categories a funnel can contain.
///
/// The first five are entry categories: they originate visitors from an
/// external traffic volume instead of receiving them over edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepCategory {
    // Traffic sources
    Traffic,
    Ad,
    Social,
    Content,
    Affiliate,

    // Pages
    Landing,
    Optin,
    Sales,
    Checkout,
    Upsell,
    Downsell,
    ThankYou,
    Survey,
    Application,

    // Events
    Webinar,
    Call,

    // Messaging
    Email,
    Sms,
    Bot,
}

impl StepCategory {
    pub const ALL: [StepCategory; 19] = [
        StepCategory::Traffic,
        StepCategory::Ad,
        StepCategory::Social,
        StepCategory::Content,
        StepCategory::Affiliate,
        StepCategory::Landing,
        StepCategory::Optin,
        StepCategory::Sales,
        StepCategory::Checkout,
        StepCategory::Upsell,
        StepCategory::Downsell,
        StepCategory::ThankYou,
        StepCategory::Survey,
        StepCategory::Application,
        StepCategory::Webinar,
        StepCategory::Call,
        StepCategory::Email,
        StepCategory::Sms,
        StepCategory::Bot,
    ];

    /// Returns `true` for categories that originate traffic.
    pub fn is_entry(self) -> bool {
        matches!(
            self,
            StepCategory::Traffic
                | StepCategory::Ad
                | StepCategory::Social
                | StepCategory::Content
                | StepCategory::Affiliate
        )
    }

    /// The canonical wire name, e.g. `"THANK_YOU"`.
    pub fn as_str(self) -> &'static str {
        match self {
            StepCategory::Traffic => "TRAFFIC",
            StepCategory::Ad => "AD",
            StepCategory::Social => "SOCIAL",
            StepCategory::Content => "CONTENT",
            StepCategory::Affiliate => "AFFILIATE",
            StepCategory::Landing => "LANDING",
            StepCategory::Optin => "OPTIN",
            StepCategory::Sales => "SALES",
            StepCategory::Checkout => "CHECKOUT",
            StepCategory::Upsell => "UPSELL",
            StepCategory::Downsell => "DOWNSELL",
            StepCategory::ThankYou => "THANK_YOU",
            StepCategory::Survey => "SURVEY",
            StepCategory::Application => "APPLICATION",
            StepCategory::Webinar => "WEBINAR",
            StepCategory::Call => "CALL",
            StepCategory::Email => "EMAIL",
            StepCategory::Sms => "SMS",
            StepCategory::Bot => "BOT",
        }
    }

    /// A human-readable label used for default step names, e.g. `"Thank you"`.
    pub fn label(self) -> String {
        let lower = self.as_str().to_lowercase().replace('_', " ");
        let mut chars = lower.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for StepCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepCategory {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StepCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConversionError::UnknownCategory(s.to_string()))
    }
}
