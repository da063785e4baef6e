use crate::collision::JoinStrategy;
use crate::error::ConfigError;
use crate::step::AlgorithmKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a [`Decoder`](crate::Decoder) needs besides the instance itself.
///
/// Every field has a default, so a configuration file only lists what it changes:
///
/// ```
/// use isd::{DecoderConfig, PermutationStrategy};
/// use isd::step::AlgorithmKind;
///
/// let config = DecoderConfig::from_toml_str(r#"
///     algorithm = "mmt"
///     threads = 4
///     permutation = { kind = "partial", window = 16 }
///
///     [parameters]
///     l1_fraction = 0.03
/// "#).unwrap();
/// assert_eq!(config.algorithm, AlgorithmKind::Mmt);
/// assert_eq!(config.permutation, PermutationStrategy::Partial { window: 16 });
/// assert_eq!(config.parameters.l2_fraction, 0.006);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    pub algorithm: AlgorithmKind,
    pub parameters: ParameterConfig,
    pub permutation: PermutationStrategy,
    /// Worker count for the concurrent driver; `None` uses the available parallelism.
    pub threads: Option<usize>,
    /// Seed of the permutation source; `None` draws one from the operating system.
    pub seed: Option<u64>,
    /// Upper bound on permutation draws; `None` searches until a solution is found.
    pub max_iterations: Option<u64>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::Stern,
            parameters: ParameterConfig::default(),
            permutation: PermutationStrategy::Random,
            threads: None,
            seed: None,
            max_iterations: None,
        }
    }
}

impl DecoderConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] for malformed documents or unknown keys and
    /// [`ConfigError::Invalid`] when [`validate`](DecoderConfig::validate) fails.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// See [`from_toml_str`](DecoderConfig::from_toml_str); unreadable files give [`ConfigError::Io`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == Some(0) {
            return Err(ConfigError::Invalid("threads must be at least 1".into()));
        }
        if let PermutationStrategy::Partial { window: 0 } = self.permutation {
            return Err(ConfigError::Invalid("partial permutation window must be at least 1".into()));
        }
        self.parameters.validate()
    }

    /// Number of workers for the concurrent driver.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(1)
        })
    }
}

/// Step parameters, given as fractions of the code length with optional absolute overrides.
///
/// A fractional parameter resolves to `max(1, ⌊fraction · n⌋)`; an explicit value is used
/// as is, including zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterConfig {
    pub p_fraction: f64,
    pub l_fraction: f64,
    pub l1_fraction: f64,
    pub l2_fraction: f64,
    pub p: Option<usize>,
    pub l: Option<usize>,
    pub l1: Option<usize>,
    pub l2: Option<usize>,
    /// First syndrome row of the FS-ISD projection window.
    pub window_offset: usize,
    /// How Stern and MMT match their collision lists.
    pub join: JoinStrategy,
    /// Multiplier on the expected number of level-2 collisions kept by MMT.
    pub collision_slack: f64,
    /// Hard cap on the length of an MMT level-1 list.
    pub max_collision_list: usize,
}

impl Default for ParameterConfig {
    fn default() -> Self {
        Self {
            p_fraction: 0.002,
            l_fraction: 0.013,
            l1_fraction: 0.028,
            l2_fraction: 0.006,
            p: None,
            l: None,
            l1: None,
            l2: None,
            window_offset: 0,
            join: JoinStrategy::SortMerge,
            collision_slack: 4.0,
            max_collision_list: 1_000_000,
        }
    }
}

fn scaled(fraction: f64, length: usize) -> usize {
    ((fraction * length as f64).floor() as usize).max(1)
}

impl ParameterConfig {
    #[must_use]
    pub fn p(&self, length: usize) -> usize {
        self.p.unwrap_or_else(|| scaled(self.p_fraction, length))
    }

    #[must_use]
    pub fn l(&self, length: usize) -> usize {
        self.l.unwrap_or_else(|| scaled(self.l_fraction, length))
    }

    #[must_use]
    pub fn l1(&self, length: usize) -> usize {
        self.l1.unwrap_or_else(|| scaled(self.l1_fraction, length))
    }

    #[must_use]
    pub fn l2(&self, length: usize) -> usize {
        self.l2.unwrap_or_else(|| scaled(self.l2_fraction, length))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fractions = [
            ("p_fraction", self.p_fraction),
            ("l_fraction", self.l_fraction),
            ("l1_fraction", self.l1_fraction),
            ("l2_fraction", self.l2_fraction),
        ];
        if let Some((name, value)) = fractions
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "{name} must be a non-negative number, got {value}"
            )));
        }
        if !(self.collision_slack.is_finite() && self.collision_slack > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "collision_slack must be positive, got {}",
                self.collision_slack
            )));
        }
        if self.max_collision_list == 0 {
            return Err(ConfigError::Invalid("max_collision_list must be at least 1".into()));
        }
        Ok(())
    }
}

/// How the decoders draw column permutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PermutationStrategy {
    /// Reshuffle every column on every draw.
    #[default]
    Random,
    /// Reshuffle only `window` information columns, with a full reshuffle every `window` draws.
    Partial { window: usize },
    /// Walk all permutations in lexicographic order, then stop.
    Lexicographic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_floor_to_at_least_one() {
        let parameters = ParameterConfig::default();
        assert_eq!(parameters.p(1000), 2);
        assert_eq!(parameters.l(1000), 13);
        assert_eq!(parameters.l1(1000), 28);
        assert_eq!(parameters.l2(1000), 6);
        assert_eq!(parameters.p(30), 1);
        assert_eq!(parameters.l(30), 1);
    }

    #[test]
    fn explicit_values_win() {
        let parameters = ParameterConfig {
            p: Some(0),
            l: Some(5),
            ..ParameterConfig::default()
        };
        assert_eq!(parameters.p(1000), 0);
        assert_eq!(parameters.l(10), 5);
    }
}
