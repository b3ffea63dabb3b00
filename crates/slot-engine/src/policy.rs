//! Per-resource scheduling policy and the process-wide policy table.
//!
//! A resource's policy is the system defaults with that resource's overrides
//! layered on top -- only fields present in the override replace the default,
//! with no deeper merging. The table is built and validated once at startup
//! and is immutable afterwards; it is the only process-wide state the engine
//! permits.

use std::collections::HashMap;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::projection;

/// Fully-resolved scheduling configuration for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingPolicy {
    /// Canonical zone in which operating hours and busy data are interpreted.
    pub timezone: Tz,
    /// Hour-of-day at which the bookable window opens.
    pub operating_start_hour: u32,
    /// Hour-of-day at which the bookable window closes (exclusive).
    pub operating_end_hour: u32,
    /// Whether Saturday and Sunday are bookable.
    pub allow_weekends: bool,
    /// Grid step, in minutes, at which candidate starts are generated.
    pub alignment_minutes: u32,
    /// Minimum contiguous free minutes a slot must guarantee.
    pub required_free_minutes: u32,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        SchedulingPolicy {
            timezone: Tz::UTC,
            operating_start_hour: 9,
            operating_end_hour: 17,
            allow_weekends: false,
            alignment_minutes: 30,
            required_free_minutes: 30,
        }
    }
}

impl SchedulingPolicy {
    fn validate(&self) -> Result<()> {
        if self.operating_start_hour >= self.operating_end_hour || self.operating_end_hour > 24 {
            return Err(EngineError::InvalidWindow(format!(
                "operating hours {}..{} are misconfigured",
                self.operating_start_hour, self.operating_end_hour
            )));
        }
        if self.alignment_minutes == 0 || self.alignment_minutes > 24 * 60 {
            return Err(EngineError::InvalidWindow(format!(
                "alignment_minutes {} is out of range",
                self.alignment_minutes
            )));
        }
        if self.required_free_minutes == 0 {
            return Err(EngineError::InvalidWindow(
                "required_free_minutes must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Layer overrides on top of this policy, replacing only present fields.
    pub fn with_overrides(&self, overrides: &PolicyOverrides) -> Result<SchedulingPolicy> {
        let mut resolved = *self;
        if let Some(tz) = overrides.timezone.as_deref() {
            resolved.timezone = projection::parse_tz(tz)?;
        }
        if let Some(h) = overrides.operating_start_hour {
            resolved.operating_start_hour = h;
        }
        if let Some(h) = overrides.operating_end_hour {
            resolved.operating_end_hour = h;
        }
        if let Some(w) = overrides.allow_weekends {
            resolved.allow_weekends = w;
        }
        if let Some(m) = overrides.alignment_minutes {
            resolved.alignment_minutes = m;
        }
        if let Some(m) = overrides.required_free_minutes {
            resolved.required_free_minutes = m;
        }
        resolved.validate()?;
        Ok(resolved)
    }
}

/// Sparse per-resource configuration; absent fields fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_start_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_end_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_weekends: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_free_minutes: Option<u32>,
}

/// Immutable policy table keyed by resource id.
///
/// Resources must be registered here to be schedulable at all; resolving an
/// unregistered id is [`EngineError::UnknownResource`]. Every entry is
/// validated at registration time, so resolution after startup cannot fail on
/// configuration.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    defaults: SchedulingPolicy,
    resources: HashMap<String, PolicyOverrides>,
}

impl PolicyTable {
    /// Build a table whose defaults are the system defaults with
    /// `default_overrides` applied.
    pub fn new(default_overrides: &PolicyOverrides) -> Result<Self> {
        let defaults = SchedulingPolicy::default().with_overrides(default_overrides)?;
        Ok(PolicyTable {
            defaults,
            resources: HashMap::new(),
        })
    }

    /// Register a resource, validating its resolved policy eagerly.
    pub fn with_resource(
        mut self,
        resource_id: impl Into<String>,
        overrides: PolicyOverrides,
    ) -> Result<Self> {
        self.defaults.with_overrides(&overrides)?;
        self.resources.insert(resource_id.into(), overrides);
        Ok(self)
    }

    /// The table defaults after default overrides were applied.
    pub fn defaults(&self) -> &SchedulingPolicy {
        &self.defaults
    }

    /// Resolve the effective policy for a resource.
    pub fn resolve(&self, resource_id: &str) -> Result<SchedulingPolicy> {
        let overrides = self
            .resources
            .get(resource_id)
            .ok_or_else(|| EngineError::UnknownResource(resource_id.to_string()))?;
        self.defaults.with_overrides(overrides)
    }
}
