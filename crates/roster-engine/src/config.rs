// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Assembly Configuration
//!
//! `AssemblyConfig` is the serializable form of an assembly run: the time
//! grid, the result and time limits, and the number of worker threads.
//! Every field has a default, so `{}` is a valid configuration.
//!
//! ```rust
//! use roster_engine::config::AssemblyConfig;
//!
//! let config = AssemblyConfig::from_json(r#"{ "max_results": 50, "block_minutes": 10 }"#).unwrap();
//! let grid = config.grid().unwrap();
//! assert_eq!(grid.max_blocks(), 144);
//! assert_eq!(config.engine_builder().unwrap().build().max_results(), Some(50));
//! ```

use crate::{
    engine::{AssemblyEngine, AssemblyEngineBuilder},
    parallel::ParallelAssembler,
};
use roster_model::{
    error::ModelError,
    grid::{DEFAULT_BLOCK_MINUTES, GridConfig, TimeGrid},
    mask::MaskKind,
};
use roster_search::monitor::time_limit::TimeLimitMonitor;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("thread count must be at least 1")]
    ZeroThreads,

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssemblyConfig {
    /// Stop after this many schedules.
    pub max_results: Option<u64>,
    /// Stop after this many milliseconds.
    pub time_limit_ms: Option<u64>,
    pub threads: usize,
    /// Block length in minutes; must divide 1440.
    pub block_minutes: u16,
    /// Mask representation; chosen from the block count when absent.
    pub mask: Option<MaskKind>,
    /// The time limit reads the clock when `steps & clock_check_mask == 0`.
    pub clock_check_mask: u64,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            max_results: None,
            time_limit_ms: None,
            threads: 1,
            block_minutes: DEFAULT_BLOCK_MINUTES,
            mask: None,
            clock_check_mask: TimeLimitMonitor::DEFAULT_CLOCK_CHECK_MASK,
        }
    }
}

impl AssemblyConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the thread count and the grid settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        self.grid()?;
        Ok(())
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    pub fn grid(&self) -> Result<TimeGrid, ConfigError> {
        let grid = GridConfig {
            block_minutes: self.block_minutes,
            mask: self.mask,
        };
        Ok(grid.build()?)
    }

    /// An engine builder with the grid and limits of this configuration.
    pub fn engine_builder(&self) -> Result<AssemblyEngineBuilder, ConfigError> {
        let mut builder = AssemblyEngineBuilder::new(&self.grid()?)
            .with_clock_check_mask(self.clock_check_mask);
        if let Some(limit) = self.max_results {
            builder = builder.with_max_results(limit);
        }
        if let Some(limit) = self.time_limit() {
            builder = builder.with_time_limit(limit);
        }
        Ok(builder)
    }

    pub fn engine(&self) -> Result<AssemblyEngine, ConfigError> {
        Ok(self.engine_builder()?.build())
    }

    /// A parallel assembler over `threads` workers.
    pub fn assembler(&self) -> Result<ParallelAssembler, ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(ParallelAssembler::new(self.engine()?, self.threads))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = AssemblyConfig::from_json("{}").unwrap();
        assert_eq!(config, AssemblyConfig::default());
        assert_eq!(config.threads, 1);
        assert_eq!(config.block_minutes, 5);
        assert_eq!(config.clock_check_mask, 0xFF);

        let engine = config.engine().unwrap();
        assert_eq!(engine.max_blocks(), 288);
        assert_eq!(engine.max_results(), None);
        assert_eq!(engine.time_limit(), None);
    }

    #[test]
    fn test_limits_reach_the_engine() {
        let config = AssemblyConfig::from_json(
            r#"{ "max_results": 25, "time_limit_ms": 1500, "threads": 4, "block_minutes": 30, "mask": "bitvec" }"#,
        )
        .unwrap();
        assert_eq!(config.grid().unwrap().mask_kind(), MaskKind::BitVec);

        let assembler = config.assembler().unwrap();
        assert_eq!(assembler.threads(), 4);
        assert_eq!(assembler.engine().max_blocks(), 48);
        assert_eq!(assembler.engine().max_results(), Some(25));
        assert_eq!(
            assembler.engine().time_limit(),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            AssemblyConfig::from_json(r#"{ "threads": 0 }"#),
            Err(ConfigError::ZeroThreads)
        ));
        assert!(matches!(
            AssemblyConfig::from_json(r#"{ "block_minutes": 7 }"#),
            Err(ConfigError::Model(ModelError::InvalidBlockLength(7)))
        ));
        assert!(matches!(
            AssemblyConfig::from_json(r#"{ "block_minutes": 5, "mask": "word" }"#),
            Err(ConfigError::Model(ModelError::OutOfRange { .. }))
        ));
        assert!(matches!(
            AssemblyConfig::from_json(r#"{ "treads": 2 }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_fields() {
        let config = AssemblyConfig {
            max_results: Some(3),
            threads: 2,
            ..AssemblyConfig::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"max_results\": 3"));
        assert_eq!(AssemblyConfig::from_json(&json).unwrap(), config);
    }
}
