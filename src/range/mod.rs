//! Bounded-pair engine shared by the salary and schedule controls.
//!
//! [`normalize`] turns raw endpoint text into canonical values at two trust
//! levels (loose while typing, strict on blur); [`validate`] judges a pair of
//! canonical values against the per-kind policy table.

pub mod normalize;
pub mod validate;

pub use normalize::{
    CanonicalEndpoint, ClockTime, Normalizer, RangeKind, AMOUNT_CEILING, AMOUNT_MAX_RAW_LEN,
    CLOCK_MAX_RAW_LEN, DEFAULT_SALARY_FLOOR,
};
pub use validate::{
    policy_for, BoundedPair, PairPolicy, PairVerdict, RepairPolicy, SALARY_RANGE_MESSAGE,
    SCHEDULE_RANGE_MESSAGE,
};
