//! Competition lifecycle integration tests

use touchline_common::ErrorKind;
use touchline_domain::{
    cancellation_message, CompetitionDraft, CompetitionFilter, CompetitionStatus, RequestStatus,
};

use crate::common::TestApp;

const ALL_STATUSES: [CompetitionStatus; 5] = [
    CompetitionStatus::Upcoming,
    CompetitionStatus::Registration,
    CompetitionStatus::InProgress,
    CompetitionStatus::Completed,
    CompetitionStatus::Cancelled,
];

/// Drive a fresh competition into `status` along the happy path
async fn competition_in(app: &TestApp, status: CompetitionStatus) -> uuid::Uuid {
    let competition = app.create_competition(None).await;
    let path: &[CompetitionStatus] = match status {
        CompetitionStatus::Upcoming => &[],
        CompetitionStatus::Registration => &[CompetitionStatus::Registration],
        CompetitionStatus::InProgress => &[
            CompetitionStatus::Registration,
            CompetitionStatus::InProgress,
        ],
        CompetitionStatus::Completed => &[
            CompetitionStatus::Registration,
            CompetitionStatus::InProgress,
            CompetitionStatus::Completed,
        ],
        CompetitionStatus::Cancelled => &[CompetitionStatus::Cancelled],
    };
    for step in path {
        app.move_competition(competition.id, *step).await.unwrap();
    }
    competition.id
}

#[test_log::test(tokio::test)]
async fn test_registration_then_start_then_no_way_back() {
    registration_then_start_then_no_way_back(&TestApp::new().await).await;
}

async fn registration_then_start_then_no_way_back(app: &TestApp) {
    let competition = app.create_competition(Some(8)).await;
    assert_eq!(competition.status, CompetitionStatus::Upcoming);

    let opened = app
        .move_competition(competition.id, CompetitionStatus::Registration)
        .await
        .unwrap();
    assert_eq!(opened.status, CompetitionStatus::Registration);

    let started = app
        .move_competition(competition.id, CompetitionStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(started.status, CompetitionStatus::InProgress);

    let err = app
        .move_competition(competition.id, CompetitionStatus::Registration)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let stored = app.services.competitions.get(competition.id).await.unwrap();
    assert_eq!(stored.status, CompetitionStatus::InProgress);
}

#[test_log::test(tokio::test)]
async fn test_transition_table_is_enforced() {
    let app = TestApp::new().await;

    for from in ALL_STATUSES {
        for to in ALL_STATUSES {
            let competition_id = competition_in(&app, from).await;
            let result = app.move_competition(competition_id, to).await;
            let allowed = from.valid_transitions().contains(&to);

            match result {
                Ok(competition) => {
                    assert!(allowed, "{} -> {} should be rejected", from, to);
                    assert_eq!(competition.status, to);
                }
                Err(err) => {
                    assert!(!allowed, "{} -> {} should be accepted", from, to);
                    assert_eq!(err.kind(), ErrorKind::Validation);
                }
            }
        }
    }
}

#[test_log::test(tokio::test)]
async fn test_cancellation_rejects_pending_requests() {
    cancellation_rejects_pending_requests(&TestApp::new().await).await;
}

async fn cancellation_rejects_pending_requests(app: &TestApp) {
    let competition = app.create_competition(None).await;
    app.enrol(competition.id, &[0]).await;
    let pending = app.request_registration(1, competition.id).await.unwrap();

    app.services
        .competitions
        .update_status(
            app.organizer_id(),
            competition.id,
            CompetitionStatus::Cancelled,
            Some("Pitch flooded".to_string()),
        )
        .await
        .unwrap();

    let requests = app
        .services
        .registration
        .list_requests_for_competition(app.organizer_id(), competition.id)
        .await
        .unwrap();
    let swept = requests.iter().find(|r| r.id == pending.id).unwrap();
    assert_eq!(swept.request_status, RequestStatus::Rejected);
    assert_eq!(
        swept.response_message.as_deref(),
        Some(cancellation_message("Pitch flooded").as_str())
    );
    assert!(swept.processed_at.is_some());

    // The approved registration is untouched
    assert!(requests
        .iter()
        .filter(|r| r.id != pending.id)
        .all(|r| r.request_status == RequestStatus::Approved));

    let err = app
        .request_registration(2, competition.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test_log::test(tokio::test)]
async fn test_only_owner_changes_competition() {
    let app = TestApp::new().await;
    let competition = app.create_competition(None).await;

    let err = app
        .services
        .competitions
        .update_status(
            app.fixture.other_organizer.id,
            competition.id,
            CompetitionStatus::Registration,
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = app
        .services
        .competitions
        .update_details(
            app.coach_id(0),
            competition.id,
            CompetitionDraft {
                name: "Hijacked".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test_log::test(tokio::test)]
async fn test_listing_filters_but_summary_counts_everything() {
    let app = TestApp::new().await;
    competition_in(&app, CompetitionStatus::Upcoming).await;
    competition_in(&app, CompetitionStatus::InProgress).await;
    competition_in(&app, CompetitionStatus::Cancelled).await;

    let listing = app
        .services
        .competitions
        .list_by_organizer(
            app.organizer_id(),
            &CompetitionFilter {
                status: Some(CompetitionStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(listing.competitions.len(), 1);
    assert_eq!(listing.summary.total, 3);
    assert_eq!(listing.summary.upcoming, 1);
    assert_eq!(listing.summary.active, 1);
    assert_eq!(listing.summary.cancelled, 1);
}

mod postgres {
    use super::*;
    use crate::common::TEAM_COUNT;

    #[test_log::test(tokio::test)]
    async fn test_registration_then_start_then_no_way_back() {
        let Some(app) = TestApp::postgres(TEAM_COUNT).await else {
            return;
        };
        registration_then_start_then_no_way_back(&app).await;
    }

    #[test_log::test(tokio::test)]
    async fn test_cancellation_rejects_pending_requests() {
        let Some(app) = TestApp::postgres(TEAM_COUNT).await else {
            return;
        };
        cancellation_rejects_pending_requests(&app).await;
    }
}
