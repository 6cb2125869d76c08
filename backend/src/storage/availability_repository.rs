//! # Availability Repository
//!
//! Read-only, file-backed source of blocked dates. The whole file is loaded at
//! startup and kept in memory.
//!
//! ## YAML Format
//!
//! ```yaml
//! users:
//!   alice:
//!     blocked_week_days: [0, 6]   # Sunday and Saturday, every month
//!     blocked_dates:
//!       "2024-10": [1, 25]        # specific days of October 2024
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::BlockedDates;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::traits::BlockedDatesSource;
use crate::domain::{CalendarError, MonthKey};

/// Blocking rules for one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAvailability {
    /// Weekdays blocked in every month, Sunday = 0
    #[serde(default)]
    pub blocked_week_days: BTreeSet<u32>,
    /// Days of the month blocked for a `"YYYY-MM"` month
    #[serde(default)]
    pub blocked_dates: BTreeMap<String, BTreeSet<u32>>,
}

impl UserAvailability {
    pub fn blocked_dates_for(&self, key: MonthKey) -> BlockedDates {
        BlockedDates {
            blocked_week_days: self.blocked_week_days.clone(),
            blocked_dates: self
                .blocked_dates
                .get(&key.to_string())
                .cloned()
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityFile {
    #[serde(default)]
    pub users: BTreeMap<String, UserAvailability>,
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityRepository {
    users: Arc<BTreeMap<String, UserAvailability>>,
}

impl AvailabilityRepository {
    pub fn new(file: AvailabilityFile) -> Self {
        Self {
            users: Arc::new(file.users),
        }
    }

    pub fn from_yaml_str(yaml_content: &str) -> Result<Self> {
        let file: AvailabilityFile = serde_yaml::from_str(yaml_content)?;
        Ok(Self::new(file))
    }

    /// Load availability from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read availability file {:?}", path))?;
        let repository = Self::from_yaml_str(&yaml_content)
            .with_context(|| format!("Failed to parse availability file {:?}", path))?;
        info!("Loaded availability for {} users from {:?}", repository.user_count(), path);
        Ok(repository)
    }

    pub fn with_user(self, username: impl Into<String>, availability: UserAvailability) -> Self {
        let mut users = (*self.users).clone();
        users.insert(username.into(), availability);
        Self {
            users: Arc::new(users),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl BlockedDatesSource for AvailabilityRepository {
    async fn blocked_dates(
        &self,
        username: &str,
        year: i32,
        month: u32,
    ) -> Result<BlockedDates, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        let availability = self
            .users
            .get(username)
            .ok_or_else(|| CalendarError::UnknownUser(username.to_string()))?;

        let key = MonthKey { year, month };
        let blocked = availability.blocked_dates_for(key);
        debug!(user = username, month = %key, ?blocked, "Resolved blocked dates");
        Ok(blocked)
    }
}
