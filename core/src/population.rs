//! Synthetic customer population for demos and load testing.
//!
//! Churn probability is a weighted sum of support tickets, days since
//! last activity and inverse tenure, plus Gaussian noise, clamped to [0, 1].
//! The segment label is the probability's risk tier. Every generated
//! customer carries a service plan (contract, payment method, internet).

use crate::{
    customer::{ContractType, CustomerRecord, ServicePlan},
    name_generator::NameGenerator,
    risk::RiskThresholds,
    rng::PopulationRng,
};
use chrono::{Duration, NaiveDate};

pub const TICKET_WEIGHT: f64 = 0.1;
pub const INACTIVITY_WEIGHT_PER_DAY: f64 = 0.01;
pub const TENURE_WEIGHT: f64 = 0.5;
pub const NOISE_STD_DEV: f64 = 0.1;

const PAYMENT_METHODS: &[&str] = &["Electronic check", "Mailed check", "Bank transfer", "Credit card"];
const INTERNET_SERVICES: &[&str] = &["DSL", "Fiber optic", "No"];

/// Drivers behind one synthetic customer's churn probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChurnDrivers {
    pub tenure:          u32,
    pub support_tickets: u32,
    pub inactive_days:   u32,
}

impl ChurnDrivers {
    /// Weighted score before noise and clamping.
    pub fn score(&self) -> f64 {
        f64::from(self.support_tickets) * TICKET_WEIGHT
            + f64::from(self.inactive_days) * INACTIVITY_WEIGHT_PER_DAY
            + TENURE_WEIGHT / f64::from(self.tenure + 1)
    }

    /// Noise-free probability.
    pub fn base_probability(&self) -> f64 {
        self.score().clamp(0.0, 1.0)
    }
}

/// Generate `count` customers deterministically from `seed`.
/// Ids run from 1; `last_activity` falls within 90 days before `as_of`.
pub fn generate_population(
    count: usize,
    seed: u64,
    as_of: NaiveDate,
    thresholds: &RiskThresholds,
) -> Vec<CustomerRecord> {
    let mut rng = PopulationRng::new(seed);
    let mut customers = Vec::with_capacity(count);

    for i in 0..count {
        let age = rng.range_u32(18, 70);
        let drivers = ChurnDrivers {
            tenure:          rng.range_u32(1, 60),
            support_tickets: rng.range_u32(0, 10),
            inactive_days:   rng.range_u32(0, 90),
        };
        let monthly_charges = round_cents(rng.uniform(20.0, 150.0));
        let total_charges = round_cents(rng.uniform(100.0, 8000.0));
        let plan = ServicePlan {
            contract_type:    *rng.pick(&ContractType::ALL),
            payment_method:   rng.pick(PAYMENT_METHODS).to_string(),
            internet_service: rng.pick(INTERNET_SERVICES).to_string(),
        };

        let churn_probability =
            (drivers.score() + rng.normal(0.0, NOISE_STD_DEV)).clamp(0.0, 1.0);

        customers.push(CustomerRecord {
            id: i as u32 + 1,
            name: NameGenerator::full_name(&mut rng),
            age,
            tenure: drivers.tenure,
            monthly_charges,
            total_charges,
            churn_probability,
            segment: thresholds.tier(churn_probability).label().into(),
            last_activity: as_of - Duration::days(i64::from(drivers.inactive_days)),
            plan: Some(plan),
        });
    }

    log::info!("population: generated {count} customers (seed={seed})");
    customers
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
