// src/domain/follow_up.rs

use chrono::NaiveDate;
use tracing::info;

use super::customer::{Customer, CustomerPatch, FollowUpStatus};
use crate::db::store::DataStore;
use crate::errors::ServerError;

/// What an operator's status change turns into.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: FollowUpStatus,
    pub requested: FollowUpStatus,
    /// True when the request confirmed a renewal and opened a new service window.
    pub renewed: bool,
    pub patch: CustomerPatch,
}

/// Plans a follow-up status change.
///
/// Asking for `completed` confirms the renewal: the service window restarts today
/// and the follow-up is re-armed (`pending`) for the next cycle. Both values travel
/// in the same patch so they land in one write. Asking for `pending` only writes
/// the status.
pub fn plan(from: FollowUpStatus, requested: FollowUpStatus, today: NaiveDate) -> Transition {
    let patch = match requested {
        FollowUpStatus::Completed => CustomerPatch {
            service_date: Some(today.format("%Y-%m-%d").to_string()),
            follow_up_status: Some(FollowUpStatus::Pending),
            ..Default::default()
        },
        FollowUpStatus::Pending => CustomerPatch {
            follow_up_status: Some(FollowUpStatus::Pending),
            ..Default::default()
        },
    };

    Transition {
        from,
        requested,
        renewed: requested == FollowUpStatus::Completed,
        patch,
    }
}

/// Routes a generic update's status field through `plan`, so no write path can
/// persist `completed` with the old service date.
pub fn normalize_patch(mut patch: CustomerPatch, today: NaiveDate) -> CustomerPatch {
    if patch.follow_up_status == Some(FollowUpStatus::Completed) {
        let planned = plan(FollowUpStatus::Pending, FollowUpStatus::Completed, today).patch;
        patch.service_date = planned.service_date;
        patch.follow_up_status = planned.follow_up_status;
    }
    patch
}

/// Applies an operator's status change to a stored customer with a single update.
pub fn set_status<S: DataStore + ?Sized>(
    store: &S,
    customer_id: i64,
    requested: FollowUpStatus,
    today: NaiveDate,
) -> Result<Customer, ServerError> {
    let current = store
        .get_customer(customer_id)?
        .ok_or_else(|| ServerError::not_found("Customer"))?;

    let transition = plan(current.follow_up_status, requested, today);
    let updated = store.update_customer(customer_id, &transition.patch)?;

    if transition.renewed {
        info!(
            customer_id,
            service_date = %today,
            "renewal confirmed, new service window started"
        );
    } else {
        info!(
            customer_id,
            from = transition.from.as_str(),
            "follow-up status set to pending"
        );
    }

    Ok(updated)
}
