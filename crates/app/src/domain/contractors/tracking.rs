//! Request tracking.
//!
//! Pure state transitions on a contractor's request history. Each change is
//! applied inside a single locked transaction by the contractors service.

use jiff::Timestamp;

use crate::domain::{
    contractors::records::{ContractorRecord, LastRequest},
    schedules::RequestId,
};

/// Minimum spacing between two aggregation enqueues for one contractor.
pub const AGGREGATION_DEBOUNCE_SECONDS: i64 = 300;

/// Whether `contractor` still has to be asked for `request`.
///
/// Any existing entry counts, fulfilled or not.
pub fn needs_request(contractor: &ContractorRecord, request: &RequestId) -> bool {
    !contractor
        .last_requests
        .iter()
        .any(|entry| entry.id == *request)
}

/// A conditional change to a contractor's request state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractorChange {
    /// Append a pending entry unless one already exists.
    RecordRequest { request: RequestId },

    /// Stamp the matching entry as fulfilled.
    MarkFulfilled { request: RequestId, at: Timestamp },

    /// Take the aggregation window if it is open and work is outstanding.
    ClaimAggregationWindow { now: Timestamp },
}

impl ContractorChange {
    /// Apply the change in place, returning whether anything changed.
    pub fn apply(&self, contractor: &mut ContractorRecord) -> bool {
        match self {
            ContractorChange::RecordRequest { request } => {
                if !needs_request(contractor, request) {
                    return false;
                }

                contractor
                    .last_requests
                    .push(LastRequest::pending(request.clone()));

                true
            }
            ContractorChange::MarkFulfilled { request, at } => {
                let mut changed = false;

                for entry in contractor
                    .last_requests
                    .iter_mut()
                    .filter(|entry| entry.id == *request)
                {
                    entry.fulfilled_at = Some(*at);
                    changed = true;
                }

                changed
            }
            ContractorChange::ClaimAggregationWindow { now } => {
                if contractor.outstanding_requests().next().is_none() {
                    return false;
                }

                let window_open = contractor.last_aggregation_at.is_none_or(|last| {
                    now.as_second() - last.as_second() >= AGGREGATION_DEBOUNCE_SECONDS
                });

                if window_open {
                    contractor.last_aggregation_at = Some(*now);
                }

                window_open
            }
        }
    }
}

/// Result of a conditional contractor update.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeOutcome {
    /// Contractor state after the change.
    pub contractor: ContractorRecord,

    /// Whether the change applied and was persisted.
    pub applied: bool,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::helpers::contractor_record;

    use super::*;

    fn ts(seconds: i64) -> Timestamp {
        Timestamp::from_second(seconds).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    #[test]
    fn needs_request_is_false_once_any_entry_exists() {
        let request = RequestId::new("21_22-2024");
        let mut contractor = contractor_record();

        assert!(needs_request(&contractor, &request));

        contractor
            .last_requests
            .push(LastRequest::pending(request.clone()));
        assert!(!needs_request(&contractor, &request));

        contractor.last_requests[0].fulfilled_at = Some(ts(1_700_000_000));
        assert!(!needs_request(&contractor, &request));

        assert!(needs_request(&contractor, &RequestId::new("22_23-2024")));
    }

    #[test]
    fn record_request_is_idempotent() {
        let change = ContractorChange::RecordRequest {
            request: RequestId::new("21_22-2024"),
        };
        let mut contractor = contractor_record();

        assert!(change.apply(&mut contractor));
        assert!(!change.apply(&mut contractor));
        assert_eq!(
            contractor.last_requests,
            vec![LastRequest::pending(RequestId::new("21_22-2024"))]
        );
    }

    #[test]
    fn mark_fulfilled_stamps_only_the_matching_entry() {
        let mut contractor = contractor_record();

        contractor.last_requests = vec![
            LastRequest::pending(RequestId::new("20_21-2024")),
            LastRequest::pending(RequestId::new("21_22-2024")),
        ];

        let change = ContractorChange::MarkFulfilled {
            request: RequestId::new("21_22-2024"),
            at: ts(1_717_000_000),
        };

        assert!(change.apply(&mut contractor));
        assert!(!contractor.last_requests[0].is_fulfilled());
        assert_eq!(contractor.last_requests[1].fulfilled_at, Some(ts(1_717_000_000)));

        let unknown = ContractorChange::MarkFulfilled {
            request: RequestId::new("1_2-2020"),
            at: ts(1_717_000_000),
        };

        assert!(!unknown.apply(&mut contractor));
    }

    #[test]
    fn aggregation_window_is_debounced() -> TestResult {
        let mut contractor = contractor_record();

        contractor
            .last_requests
            .push(LastRequest::pending(RequestId::new("21_22-2024")));

        let first = ContractorChange::ClaimAggregationWindow {
            now: ts(1_000_000),
        };
        let too_soon = ContractorChange::ClaimAggregationWindow {
            now: ts(1_000_299),
        };
        let later = ContractorChange::ClaimAggregationWindow {
            now: ts(1_000_300),
        };

        assert!(first.apply(&mut contractor));
        assert!(!too_soon.apply(&mut contractor));
        assert_eq!(contractor.last_aggregation_at, Some(ts(1_000_000)));
        assert!(later.apply(&mut contractor));
        assert_eq!(contractor.last_aggregation_at, Some(Timestamp::from_second(1_000_300)?));

        Ok(())
    }

    #[test]
    fn aggregation_window_needs_outstanding_requests() {
        let mut contractor = contractor_record();

        let claim = ContractorChange::ClaimAggregationWindow {
            now: ts(1_000_000),
        };

        assert!(!claim.apply(&mut contractor));

        contractor.last_requests.push(LastRequest {
            id: RequestId::new("21_22-2024"),
            fulfilled_at: Some(ts(999_000)),
        });

        assert!(!claim.apply(&mut contractor));
        assert!(contractor.last_aggregation_at.is_none());
    }
}
