use serde::{Deserialize, Serialize};

/// Market exposure held over the next period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Exposure {
    #[default]
    Flat,
    Long,
}

impl Exposure {
    /// Returns the position weight applied to the next period's return.
    pub fn as_f64(&self) -> f64 {
        match self {
            Exposure::Flat => 0.0,
            Exposure::Long => 1.0,
        }
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Exposure::Long)
    }
}

/// Identifies which strategy the factory should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    #[default]
    #[serde(rename = "ma_crossover")]
    MACrossover,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposure_weights() {
        assert_eq!(Exposure::Flat.as_f64(), 0.0);
        assert_eq!(Exposure::Long.as_f64(), 1.0);
        assert!(Exposure::Long.is_long());
        assert!(!Exposure::default().is_long());
    }

    #[test]
    fn strategy_id_uses_snake_case_name() {
        let id: StrategyId = serde_json::from_str("\"ma_crossover\"").unwrap();
        assert_eq!(id, StrategyId::MACrossover);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ma_crossover\"");
    }
}
