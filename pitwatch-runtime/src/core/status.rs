/// Aggregate severity of a monitored unit.
///
/// This tag is derived from the unit's current metrics against the threshold
/// rules. It is never stored independently of the rule evaluation, so
/// recomputing it on the same metrics always yields the same result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    /// All metrics within their standard ranges.
    #[default]
    Normal,
    /// At least one threshold breached, unit still operable.
    Warning,
    /// A critical condition holds, immediate attention required.
    Danger,
}

impl Status {
    /// Most severe of two severities.
    #[inline]
    pub fn escalate(self, other: Status) -> Status {
        self.max(other)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Normal => write!(f, "Normal"),
            Status::Warning => write!(f, "Warning"),
            Status::Danger => write!(f, "Danger"),
        }
    }
}
