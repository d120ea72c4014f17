use super::normalize::{CanonicalEndpoint, Normalizer, RangeKind};

pub const SALARY_RANGE_MESSAGE: &str = "El salario máximo debe ser mayor que el salario mínimo.";
pub const SCHEDULE_RANGE_MESSAGE: &str = "La hora de inicio no puede ser mayor que la hora de fin.";

/// What happens to an out-of-order pair without user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairPolicy {
    /// Upper endpoint becomes `lower + 1`.
    RaiseUpperToLowerPlusOne,
    /// Flag only; the user fixes it.
    WarnOnly,
}

/// Ordering rule, repair and message for one range kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairPolicy {
    pub kind: RangeKind,
    pub allows_equal: bool,
    pub repair: RepairPolicy,
    pub message: &'static str,
}

static POLICIES: [PairPolicy; 2] = [
    PairPolicy {
        kind: RangeKind::CurrencyAmount,
        allows_equal: false,
        repair: RepairPolicy::RaiseUpperToLowerPlusOne,
        message: SALARY_RANGE_MESSAGE,
    },
    PairPolicy {
        kind: RangeKind::ClockTime,
        allows_equal: true,
        repair: RepairPolicy::WarnOnly,
        message: SCHEDULE_RANGE_MESSAGE,
    },
];

pub fn policy_for(kind: RangeKind) -> &'static PairPolicy {
    match kind {
        RangeKind::CurrencyAmount => &POLICIES[0],
        RangeKind::ClockTime => &POLICIES[1],
    }
}

impl PairPolicy {
    pub fn holds(&self, lower: &CanonicalEndpoint, upper: &CanonicalEndpoint) -> bool {
        if self.allows_equal {
            lower.scalar() <= upper.scalar()
        } else {
            lower.scalar() < upper.scalar()
        }
    }

    /// Replacement for the upper endpoint, when this kind has one. `None`
    /// when the lower endpoint leaves no room above it.
    pub fn repaired_upper(&self, lower: &CanonicalEndpoint) -> Option<CanonicalEndpoint> {
        match (self.repair, lower) {
            (RepairPolicy::RaiseUpperToLowerPlusOne, CanonicalEndpoint::Amount(amount)) => {
                amount.checked_add(1).map(CanonicalEndpoint::Amount)
            }
            _ => None,
        }
    }
}

/// Outcome of judging a [`BoundedPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairVerdict {
    pub valid: bool,
    pub corrected_upper: Option<CanonicalEndpoint>,
    pub message: Option<&'static str>,
}

impl PairVerdict {
    fn valid() -> Self {
        Self {
            valid: true,
            corrected_upper: None,
            message: None,
        }
    }
}

/// Lower and upper endpoints of one kind; either side may still be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedPair {
    pub kind: RangeKind,
    pub lower: Option<CanonicalEndpoint>,
    pub upper: Option<CanonicalEndpoint>,
}

impl BoundedPair {
    /// Endpoints of a different kind are treated as absent.
    pub fn new(
        kind: RangeKind,
        lower: Option<CanonicalEndpoint>,
        upper: Option<CanonicalEndpoint>,
    ) -> Self {
        Self {
            kind,
            lower: lower.filter(|endpoint| endpoint.kind() == kind),
            upper: upper.filter(|endpoint| endpoint.kind() == kind),
        }
    }

    pub fn from_text(normalizer: &Normalizer, lower: &str, upper: &str) -> Self {
        Self::new(
            normalizer.kind(),
            normalizer.canonical(lower),
            normalizer.canonical(upper),
        )
    }

    pub fn validate(&self) -> PairVerdict {
        let (Some(lower), Some(upper)) = (&self.lower, &self.upper) else {
            return PairVerdict::valid();
        };
        let policy = policy_for(self.kind);
        if policy.holds(lower, upper) {
            return PairVerdict::valid();
        }
        PairVerdict {
            valid: false,
            corrected_upper: policy.repaired_upper(lower),
            message: Some(policy.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::ClockTime;

    fn amounts(lower: Option<u64>, upper: Option<u64>) -> BoundedPair {
        BoundedPair::new(
            RangeKind::CurrencyAmount,
            lower.map(CanonicalEndpoint::Amount),
            upper.map(CanonicalEndpoint::Amount),
        )
    }

    fn clocks(lower: &str, upper: &str) -> BoundedPair {
        BoundedPair::from_text(&Normalizer::new(RangeKind::ClockTime), lower, upper)
    }

    #[test]
    fn missing_endpoint_defers_judgment() {
        assert!(amounts(Some(5000), None).validate().valid);
        assert!(amounts(None, Some(10)).validate().valid);
        assert!(clocks("", "09:00").validate().valid);
    }

    #[test]
    fn equal_salaries_are_invalid_and_repaired() {
        let verdict = amounts(Some(1500), Some(1500)).validate();
        assert!(!verdict.valid);
        assert_eq!(verdict.corrected_upper, Some(CanonicalEndpoint::Amount(1501)));
        assert_eq!(verdict.message, Some(SALARY_RANGE_MESSAGE));
    }

    #[test]
    fn no_repair_offered_at_the_top_of_the_range() {
        let verdict = amounts(Some(u64::MAX), Some(u64::MAX)).validate();
        assert!(!verdict.valid);
        assert_eq!(verdict.corrected_upper, None);
    }

    #[test]
    fn equal_schedule_bounds_are_valid() {
        assert!(clocks("09:00", "09:00").validate().valid);
    }

    #[test]
    fn inverted_schedule_warns_without_repair() {
        let verdict = clocks("20:10", "09:00").validate();
        assert!(!verdict.valid);
        assert_eq!(verdict.corrected_upper, None);
        assert_eq!(verdict.message, Some(SCHEDULE_RANGE_MESSAGE));
    }

    #[test]
    fn mismatched_kinds_count_as_absent() {
        let pair = BoundedPair::new(
            RangeKind::CurrencyAmount,
            Some(CanonicalEndpoint::Clock(ClockTime::from_hm(10, 0).unwrap())),
            Some(CanonicalEndpoint::Amount(1)),
        );
        assert!(pair.lower.is_none());
        assert!(pair.validate().valid);
    }

    #[test]
    fn policy_table_covers_each_kind() {
        assert_eq!(policy_for(RangeKind::CurrencyAmount).kind, RangeKind::CurrencyAmount);
        assert_eq!(policy_for(RangeKind::ClockTime).repair, RepairPolicy::WarnOnly);
    }
}
