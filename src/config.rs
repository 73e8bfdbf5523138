use crate::{
    constants::*,
    error::{CountdownError, Result},
    fitness::Puzzle,
    gene::OperatorTable,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Every option of a run. Missing fields take their `COUNTDOWN_` default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub target: f64,
    pub genes: usize,
    pub initial_population: usize,
    pub final_population: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub operators: OperatorTable,
    /// offspring between full recomputations of the fitness sum, 0 never recomputes
    pub resync_interval: usize,
    /// offspring between progress reports, 0 never reports
    pub report_interval: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: COUNTDOWN_TARGET,
            genes: COUNTDOWN_GENES,
            initial_population: COUNTDOWN_INITIAL_POPULATION,
            final_population: COUNTDOWN_FINAL_POPULATION,
            crossover_rate: COUNTDOWN_CROSSOVER_RATE,
            mutation_rate: COUNTDOWN_MUTATION_RATE,
            operators: OperatorTable::default(),
            resync_interval: COUNTDOWN_RESYNC_INTERVAL,
            report_interval: COUNTDOWN_REPORT_INTERVAL,
        }
    }
}

fn invalid<T>(msg: impl Into<String>) -> Result<T> {
    Err(CountdownError::Configuration(msg.into()))
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !self.target.is_finite() {
            return invalid(format!("target must be finite, got {}", self.target));
        }
        if self.genes == 0 || self.genes % 2 != 0 {
            return invalid(format!("genes must be even and positive, got {}", self.genes));
        }
        if self.initial_population == 0 {
            return invalid("initial_population must be positive");
        }
        if self.final_population < self.initial_population {
            return invalid(format!(
                "final_population ({}) must be at least initial_population ({})",
                self.final_population, self.initial_population
            ));
        }
        if !(0. ..=1.).contains(&self.crossover_rate) {
            return invalid(format!(
                "crossover_rate must be between 0 and 1, got {}",
                self.crossover_rate
            ));
        }
        if !(self.mutation_rate > 0. && self.mutation_rate <= 1.) {
            return invalid(format!(
                "mutation_rate must be above 0 and at most 1, got {}",
                self.mutation_rate
            ));
        }
        if !self.operators.is_bijective() {
            return invalid(format!(
                "operators must name each of + - * / exactly once, got {:?}",
                self.operators.operators()
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn puzzle(&self) -> Puzzle {
        Puzzle::new(self.target, self.operators)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_str(&fs::read_to_string(path)?)
    }

    pub fn to_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{gene::Operator, new_t};

    #[test]
    fn test_default_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(145., config.puzzle().target);
    }

    #[test]
    fn test_invalid() {
        for config in [
            new_t!(Config, target = f64::NAN),
            new_t!(Config, target = f64::INFINITY),
            new_t!(Config, genes = 0),
            new_t!(Config, genes = 7),
            new_t!(Config, initial_population = 0, final_population = 0),
            new_t!(Config, initial_population = 10, final_population = 9),
            new_t!(Config, crossover_rate = -0.1),
            new_t!(Config, crossover_rate = 1.1),
            new_t!(Config, mutation_rate = 0.),
            new_t!(Config, mutation_rate = 1.5),
            new_t!(Config, mutation_rate = f64::NAN),
            new_t!(Config, operators = OperatorTable::new([Operator::Add; 4])),
        ] {
            assert!(
                matches!(config.validate(), Err(CountdownError::Configuration(_))),
                "{config:?}"
            );
        }
    }

    #[test]
    fn test_edge_valid() {
        for config in [
            new_t!(Config, crossover_rate = 0.),
            new_t!(Config, crossover_rate = 1.),
            new_t!(Config, mutation_rate = 1.),
            new_t!(Config, initial_population = 5, final_population = 5),
            new_t!(Config, genes = 2),
        ] {
            config.validate().unwrap();
        }
    }

    #[test]
    fn test_from_str_partial() {
        let config = Config::from_str(r#"{"target": 10, "genes": 4, "operators": ["+", "-", "*", "/"]}"#)
            .unwrap();
        assert_eq!(10., config.target);
        assert_eq!(4, config.genes);
        assert_eq!(COUNTDOWN_FINAL_POPULATION, config.final_population);
        assert_eq!(
            &[Operator::Add, Operator::Sub, Operator::Mul, Operator::Div],
            config.operators.operators()
        );
    }

    #[test]
    fn test_from_str_rejects() {
        assert!(matches!(
            Config::from_str(r#"{"genes": 5}"#),
            Err(CountdownError::Configuration(_))
        ));
        assert!(matches!(
            Config::from_str(r#"{"populaton": 5}"#),
            Err(CountdownError::Serde(_))
        ));
        assert!(matches!(
            Config::from_str(r#"{"operators": ["+", "-", "%", "/"]}"#),
            Err(CountdownError::Serde(_))
        ));
    }

    #[test]
    fn test_string_roundtrip() {
        let config = new_t!(Config, target = 21., crossover_rate = 0.5);
        assert_eq!(config, Config::from_str(&config.to_string().unwrap()).unwrap());
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("countdown-config-{}.json", std::process::id()));
        let config = new_t!(Config, genes = 12, mutation_rate = 0.01);
        config.to_file(&path).unwrap();
        let loaded = Config::from_file(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(config, loaded.unwrap());

        assert!(matches!(
            Config::from_file(std::env::temp_dir().join("countdown-config-missing.json")),
            Err(CountdownError::Io(_))
        ));
    }
}
