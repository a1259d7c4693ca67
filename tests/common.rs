//! Common test utilities for building funnels.
use funnelflow::prelude::*;

/// Entry(1000) -> Step2(50%) -> Step3(20%, price 50).
#[allow(dead_code)]
pub fn create_linear_chain() -> Funnel {
    Funnel::new(vec![
        Step::new("entry", "Entry", StepCategory::Traffic)
            .with_traffic(1000.0, 0.0, 0.0)
            .with_next(["step2"]),
        Step::new("step2", "Step 2", StepCategory::Landing)
            .with_conversion(50.0, 0.0)
            .with_next(["step3"]),
        Step::new("step3", "Step 3", StepCategory::Sales).with_conversion(20.0, 50.0),
    ])
}

/// Src(1000) -> A(50%) -> B(50%) -> back to A.
#[allow(dead_code)]
pub fn create_cyclic_funnel() -> Funnel {
    Funnel::new(vec![
        Step::new("src", "Source", StepCategory::Traffic)
            .with_traffic(1000.0, 0.0, 0.0)
            .with_next(["a"]),
        Step::new("a", "A", StepCategory::Webinar)
            .with_conversion(50.0, 0.0)
            .with_next(["b"]),
        Step::new("b", "B", StepCategory::Email)
            .with_conversion(50.0, 0.0)
            .with_next(["a"]),
    ])
}

/// Two paid sources feeding one sales page, which splits 70/50 (over-allocated)
/// between an upsell and a downsell and leaves a thank-you page unweighted.
#[allow(dead_code)]
pub fn create_multi_source_funnel() -> Funnel {
    Funnel::new(vec![
        Step::new("fb", "Facebook", StepCategory::Ad)
            .with_traffic(2000.0, 1.0, 0.0)
            .with_next(["sales"]),
        Step::new("aff", "Partners", StepCategory::Affiliate)
            .with_traffic(1000.0, 0.0, 0.5)
            .with_next(["sales"]),
        Step::new("sales", "Sales", StepCategory::Sales)
            .with_conversion(10.0, 100.0)
            .with_cost_per_acquisition(20.0)
            .with_next(["up", "down", "thanks"])
            .with_weight("up", 70.0)
            .with_weight("down", 50.0),
        Step::new("up", "Upsell", StepCategory::Upsell).with_conversion(30.0, 50.0),
        Step::new("down", "Downsell", StepCategory::Downsell).with_conversion(40.0, 20.0),
        Step::new("thanks", "Thanks", StepCategory::ThankYou).with_conversion(0.0, 0.0),
    ])
}

/// The editor's save format, as written by the web app.
#[allow(dead_code)]
pub const SAVED_FUNNEL_JSON: &str = r#"{
  "name": "Webinar Funnel",
  "date": "2024-03-02T09:30:00.000Z",
  "steps": [
    { "id": "1", "type": "AD", "name": "LinkedIn Ads", "conversionRate": 100, "productPrice": 0,
      "trafficVolume": 1000, "cpc": 4.5, "cpl": 0, "cpa": 0,
      "visitorsIn": 0, "visitorsOut": 0, "revenue": 0, "cost": 0,
      "nextSteps": ["2"], "groupName": "Sources" },
    { "id": "2", "type": "LANDING", "name": "Registration Page", "conversionRate": 25, "productPrice": 0,
      "visitorsIn": 0, "visitorsOut": 0, "revenue": 0, "cost": 0, "cpa": 0,
      "nextSteps": ["3"], "groupName": "Registration" },
    { "id": "3", "type": "EMAIL", "name": "Reminder Sequence", "conversionRate": 100, "productPrice": 0,
      "visitorsIn": 0, "visitorsOut": 0, "revenue": 0, "cost": 0, "cpa": 0,
      "nextSteps": ["4"], "groupName": "Nurture" },
    { "id": "4", "type": "WEBINAR", "name": "Live Webinar", "conversionRate": 40, "productPrice": 0,
      "visitorsIn": 0, "visitorsOut": 0, "revenue": 0, "cost": 0, "cpa": 0,
      "nextSteps": ["5"], "groupName": "Event" },
    { "id": "5", "type": "SALES", "name": "Webinar Pitch", "conversionRate": 10, "productPrice": 997,
      "visitorsIn": 0, "visitorsOut": 0, "revenue": 0, "cost": 0, "cpa": 0,
      "nextSteps": ["6"], "groupName": "Sales" },
    { "id": "6", "type": "CHECKOUT", "name": "Checkout", "conversionRate": 70, "productPrice": 0,
      "visitorsIn": 0, "visitorsOut": 0, "revenue": 0, "cost": 0, "cpa": 0,
      "nextSteps": [], "groupName": "Sales" }
  ]
}"#;

/// Compares every computed figure of two reports bit for bit.
#[allow(dead_code)]
pub fn assert_bit_identical(a: &SimulationReport, b: &SimulationReport) {
    assert_eq!(a.steps.len(), b.steps.len());
    for (x, y) in a.steps.iter().zip(&b.steps) {
        let (mx, my) = (&x.metrics, &y.metrics);
        assert_eq!(mx.visitors_in.to_bits(), my.visitors_in.to_bits());
        assert_eq!(mx.visitors_out.to_bits(), my.visitors_out.to_bits());
        assert_eq!(mx.revenue.to_bits(), my.revenue.to_bits());
        assert_eq!(mx.cost.to_bits(), my.cost.to_bits());
        assert_eq!(mx.cumulative_revenue.to_bits(), my.cumulative_revenue.to_bits());
    }
    assert_eq!(a.totals.roas.to_bits(), b.totals.roas.to_bits());
    assert_eq!(a.totals.epa.to_bits(), b.totals.epa.to_bits());
    assert_eq!(a.totals.total_profit.to_bits(), b.totals.total_profit.to_bits());
}
