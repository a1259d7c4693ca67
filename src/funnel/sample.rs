use super::{Funnel, Step, StepCategory};

impl Funnel {
    /// A small six-step funnel with one split and one re-convergence.
    ///
    /// Ad (2000 visitors) -> Landing, which sends 80% to an email follow-up and
    /// 20% straight to the sales page; the email merges back into sales, then
    /// checkout and a thank-you page.
    pub fn sample() -> Self {
        Funnel::new(vec![
            Step::new("1", "Facebook Ad", StepCategory::Ad)
                .with_traffic(2000.0, 1.5, 0.0)
                .with_next(["2"])
                .in_group("Acquisition"),
            Step::new("2", "Landing Page", StepCategory::Landing)
                .with_conversion(25.0, 0.0)
                .with_next(["3", "4"])
                .with_weight("3", 80.0)
                .with_weight("4", 20.0)
                .in_group("Acquisition"),
            Step::new("3", "Email Follow-up", StepCategory::Email)
                .with_conversion(15.0, 0.0)
                .with_next(["4"])
                .in_group("Nurture"),
            Step::new("4", "Sales Page", StepCategory::Sales)
                .with_conversion(4.0, 197.0)
                .with_next(["5"])
                .in_group("Conversion"),
            Step::new("5", "Checkout", StepCategory::Checkout)
                .with_conversion(60.0, 0.0)
                .with_next(["6"])
                .in_group("Conversion"),
            Step::new("6", "Thank You", StepCategory::ThankYou).with_conversion(0.0, 0.0),
        ])
    }
}
