//! Tracking-ID issuer.
//!
//! Resolution happens strictly before the counter is touched: a
//! department without a code never consumes a sequence number.

use maintabit_core::department::{self, TrackingId};
use maintabit_core::error::{MaintabitError, MaintabitResult};
use maintabit_core::repository::{CounterRepository, OptionRepository};
use tracing::{debug, info, warn};

/// Message returned when neither the directory nor the fallback table
/// knows a department.
pub const MISSING_CODE_MESSAGE: &str =
    "Department code not configured. Please set code in dynamic options.";

/// Issues tracking IDs of the form `4649 + code + seq`.
pub struct TrackingIdIssuer<O: OptionRepository, C: CounterRepository> {
    options: O,
    counters: C,
}

impl<O: OptionRepository, C: CounterRepository> TrackingIdIssuer<O, C> {
    pub fn new(options: O, counters: C) -> Self {
        Self { options, counters }
    }

    /// Department code for `department`: directory entry first, static
    /// table second.
    pub async fn resolve_code(&self, department: &str) -> MaintabitResult<String> {
        let name = department.trim();
        if name.is_empty() {
            return Err(MaintabitError::validation("Department is required"));
        }

        let entry = self.options.find_department(name).await?;
        match department::resolve_code(entry.as_ref(), name) {
            Some(code) => {
                debug!(department = name, code = %code, "Department code resolved");
                Ok(code)
            }
            None => {
                warn!(department = name, "No department code configured");
                Err(MaintabitError::validation(MISSING_CODE_MESSAGE))
            }
        }
    }

    /// Resolve the department, advance its counter and compose the ID.
    pub async fn issue(&self, department: &str) -> MaintabitResult<TrackingId> {
        let code = self.resolve_code(department).await?;
        let sequence = self.counters.increment(&department::counter_key(&code)).await?;
        let tracking_id = TrackingId::new(code, sequence);
        info!(tracking_id = %tracking_id, "Tracking ID issued");
        Ok(tracking_id)
    }
}
