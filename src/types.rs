use serde::Deserialize;

/// One `(x, y)` sample, used for both the true and the estimated state.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StateRecord {
    pub x: f64,
    pub y: f64,
}

impl StateRecord {
    /// Euclidean distance to another state.
    pub fn distance_to(&self, other: &StateRecord) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SensorReading {
    pub reading: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let truth = StateRecord { x: 10.0, y: 10.0 };
        let estimate = StateRecord { x: 11.0, y: 9.0 };
        assert!((truth.distance_to(&estimate) - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((estimate.distance_to(&truth) - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let s = StateRecord { x: 42.5, y: -7.0 };
        assert_eq!(s.distance_to(&s), 0.0);
    }
}
