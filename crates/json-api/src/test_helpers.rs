//! Test helpers.

use std::{num::NonZeroU32, sync::Arc};

use jiff::{
    Timestamp,
    civil::{date, time},
};
use salvo::{affix_state::inject, prelude::*};
use zeroize::Zeroizing;

use jobsender_app::{
    cloud::{
        SessionData, identity::MockIdentityProvider, scheduler::MockRequestScheduler,
        storage::MockBlobStore,
    },
    context::AppContext,
    cycle::{
        aggregation::MockAggregationService, dispatcher::MockRequestDispatchService,
        importer::MockImportService,
    },
    domain::{
        contractors::{
            MockContractorsService,
            records::{ContractorRecord, ContractorUuid},
        },
        groups::{
            MockGroupsService,
            records::{GroupRecord, GroupUuid},
        },
        owners::{
            MockOwnersService,
            records::{OwnerId, OwnerRecord},
        },
        schedules::{Recurrence, Schedule, Weekday},
        timesheets::MockTimesheetsService,
    },
    reporting::MockErrorReporter,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_OWNER_ID: &str = "owner-1";

/// A verified caller owning nothing in particular.
pub(crate) fn test_session() -> SessionData {
    SessionData {
        token: Zeroizing::new("id-token".to_string()),
        email: "owner@example.com".to_string(),
        is_verified: true,
        owner_id: OwnerId::new(TEST_OWNER_ID),
    }
}

/// One mock per collaborator of the app context.
///
/// Mocks without expectations panic when called, so every test states the
/// calls it allows.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) owners: MockOwnersService,
    pub(crate) groups: MockGroupsService,
    pub(crate) contractors: MockContractorsService,
    pub(crate) timesheets: MockTimesheetsService,
    pub(crate) scheduler: MockRequestScheduler,
    pub(crate) blobs: MockBlobStore,
    pub(crate) identity: MockIdentityProvider,
    pub(crate) requests: MockRequestDispatchService,
    pub(crate) aggregation: MockAggregationService,
    pub(crate) importer: MockImportService,
    pub(crate) reporter: MockErrorReporter,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            owners: Arc::new(self.owners),
            groups: Arc::new(self.groups),
            contractors: Arc::new(self.contractors),
            timesheets: Arc::new(self.timesheets),
            scheduler: Arc::new(self.scheduler),
            blobs: Arc::new(self.blobs),
            identity: Arc::new(self.identity),
            requests: Arc::new(self.requests),
            aggregation: Arc::new(self.aggregation),
            importer: Arc::new(self.importer),
            reporter: Arc::new(self.reporter),
        })
    }

    /// Serve `route` with the mocks injected and [`test_session`] signed in.
    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_session)
                .push(route),
        )
    }

    /// Serve `route` with the mocks injected and nobody signed in.
    pub(crate) fn into_public_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

#[salvo::handler]
async fn inject_session(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session(test_session());
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn weekly_schedule() -> Schedule {
    Schedule {
        recurrence: Recurrence::Weeks {
            weekday: Weekday::Friday,
        },
        interval: NonZeroU32::MIN,
        timezone: "Europe/London".to_string(),
        time_of_day: time(17, 0, 0, 0),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
    }
}

pub(crate) fn make_owner(group_uuid: Option<GroupUuid>) -> OwnerRecord {
    OwnerRecord {
        id: OwnerId::new(TEST_OWNER_ID),
        group_uuid,
        name: "Ada".to_string(),
        surname: "Lovelace".to_string(),
        email: "owner@example.com".to_string(),
        phone: "+44 20 7946 0000".to_string(),
        photo_url: String::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_group(uuid: GroupUuid, owner: &str) -> GroupRecord {
    GroupRecord {
        uuid,
        owner_id: OwnerId::new(owner),
        name: "Night shift".to_string(),
        schedule: weekly_schedule(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_contractor(uuid: ContractorUuid, group_uuid: GroupUuid) -> ContractorRecord {
    ContractorRecord {
        uuid,
        group_uuid,
        name: "Jane".to_string(),
        surname: "Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: String::new(),
        photo_url: String::new(),
        last_requests: Vec::new(),
        last_aggregation_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
