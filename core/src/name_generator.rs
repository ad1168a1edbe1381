//! Deterministic customer names from short curated lists.

use crate::rng::PopulationRng;

const FIRST_NAMES: &[&str] = &[
    "John", "Sarah", "Mike", "Emily", "Alex", "Jessica", "David", "Lisa", "Chris", "Amanda",
    "James", "Maria", "Daniel", "Olivia", "Kevin", "Grace", "Ryan", "Hannah", "Noah", "Sofia",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Chen", "Wilson", "Nguyen", "Patel", "Kim", "Lopez", "Taylor", "Moore",
];

pub struct NameGenerator;

impl NameGenerator {
    pub fn full_name(rng: &mut PopulationRng) -> String {
        let first = rng.pick(FIRST_NAMES);
        let last = rng.pick(LAST_NAMES);
        format!("{first} {last}")
    }
}
