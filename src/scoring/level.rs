use serde::Serialize;
use std::fmt;

/// How fully an intervention's design is realized, as a percentage.
///
/// Always within `[0, 100]`; construction clamps.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ImplementationLevel(f64);

impl ImplementationLevel {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Fraction of full implementation, `0.0..=1.0`.
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }

    pub fn adjusted(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }

    pub fn classify(self) -> ImpactLevel {
        classify_level(self.0)
    }
}

impl Default for ImplementationLevel {
    fn default() -> Self {
        Self(50.0)
    }
}

impl fmt::Display for ImplementationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.round() as i64)
    }
}

/// Qualitative bucket used to pick impact descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub fn label(self) -> &'static str {
        match self {
            ImpactLevel::Low => "low",
            ImpactLevel::Medium => "medium",
            ImpactLevel::High => "high",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `< 30` low, `< 70` medium, otherwise high.
pub fn classify_level(n: f64) -> ImpactLevel {
    if n < 30.0 {
        ImpactLevel::Low
    } else if n < 70.0 {
        ImpactLevel::Medium
    } else {
        ImpactLevel::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify_level(29.0), ImpactLevel::Low);
        assert_eq!(classify_level(30.0), ImpactLevel::Medium);
        assert_eq!(classify_level(69.0), ImpactLevel::Medium);
        assert_eq!(classify_level(70.0), ImpactLevel::High);
    }

    #[test]
    fn test_classify_fractional_edges() {
        assert_eq!(classify_level(29.999), ImpactLevel::Low);
        assert_eq!(classify_level(69.999), ImpactLevel::Medium);
        assert_eq!(classify_level(0.0), ImpactLevel::Low);
        assert_eq!(classify_level(100.0), ImpactLevel::High);
    }

    #[test]
    fn test_level_clamps() {
        assert_eq!(ImplementationLevel::new(-5.0).value(), 0.0);
        assert_eq!(ImplementationLevel::new(140.0).value(), 100.0);
        assert_eq!(ImplementationLevel::new(f64::NAN).value(), 0.0);
        assert_eq!(ImplementationLevel::new(95.0).adjusted(10.0).value(), 100.0);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(ImplementationLevel::new(40.0).to_string(), "40%");
    }
}
