//! Registration workflow integration tests

use touchline_common::ErrorKind;
use touchline_domain::{CompetitionStatus, CompetitionTeamStatus, RequestStatus, RequestType};

use crate::common::TestApp;

#[test_log::test(tokio::test)]
async fn test_capacity_blocks_third_approval() {
    capacity_blocks_third_approval(&TestApp::new().await).await;
}

async fn capacity_blocks_third_approval(app: &TestApp) {
    let competition = app.create_competition(Some(2)).await;
    app.move_competition(competition.id, CompetitionStatus::Registration)
        .await
        .unwrap();

    app.enrol(competition.id, &[0, 1]).await;

    let third = app.request_registration(2, competition.id).await.unwrap();
    let err = app.resolve(third.id, true).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("capacity exceeded"));

    let members = app
        .services
        .registration
        .list_teams(competition.id)
        .await
        .unwrap();
    assert_eq!(members.len(), 2);

    // The failed approval left the request pending; it can still be rejected
    let rejected = app.resolve(third.id, false).await.unwrap();
    assert_eq!(rejected.request_status, RequestStatus::Rejected);
}

#[test_log::test(tokio::test)]
async fn test_inactive_members_free_capacity() {
    let app = TestApp::new().await;
    let competition = app.create_competition(Some(2)).await;
    app.enrol(competition.id, &[0, 1]).await;

    app.services
        .registration
        .set_team_status(
            app.organizer_id(),
            competition.id,
            app.team_id(1),
            CompetitionTeamStatus::Disqualified,
            Some("Fielded an ineligible player".to_string()),
        )
        .await
        .unwrap();

    let late = app.request_registration(2, competition.id).await.unwrap();
    let approved = app.resolve(late.id, true).await.unwrap();
    assert_eq!(approved.request_status, RequestStatus::Approved);
}

#[test_log::test(tokio::test)]
async fn test_at_most_one_pending_request_per_kind() {
    at_most_one_pending_request_per_kind(&TestApp::new().await).await;
}

async fn at_most_one_pending_request_per_kind(app: &TestApp) {
    let competition = app.create_competition(None).await;

    let first = app.request_registration(0, competition.id).await.unwrap();
    let err = app
        .request_registration(0, competition.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // Once resolved, a fresh request may be filed
    app.resolve(first.id, false).await.unwrap();
    let second = app.request_registration(0, competition.id).await.unwrap();
    assert_eq!(second.request_status, RequestStatus::Pending);

    let mine = app
        .services
        .registration
        .list_requests_for_coach(app.coach_id(0))
        .await
        .unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(
        mine.iter()
            .filter(|r| r.request_status == RequestStatus::Pending)
            .count(),
        1
    );
}

#[test_log::test(tokio::test)]
async fn test_withdrawal_round_trip() {
    let app = TestApp::new().await;
    let competition = app.create_competition(None).await;

    let err = app
        .services
        .registration
        .request_withdrawal(app.coach_id(0), app.team_id(0), competition.id, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    app.enrol(competition.id, &[0]).await;

    let withdrawal = app
        .services
        .registration
        .request_withdrawal(
            app.coach_id(0),
            app.team_id(0),
            competition.id,
            Some("Not enough players".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(withdrawal.request_type, RequestType::Withdrawal);

    app.resolve(withdrawal.id, true).await.unwrap();

    let members = app
        .services
        .registration
        .list_teams(competition.id)
        .await
        .unwrap();
    assert!(members.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_request_is_resolved_once() {
    request_is_resolved_once(&TestApp::new().await).await;
}

async fn request_is_resolved_once(app: &TestApp) {
    let competition = app.create_competition(None).await;
    let request = app.request_registration(0, competition.id).await.unwrap();

    app.resolve(request.id, true).await.unwrap();
    let err = app.resolve(request.id, false).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = app
        .services
        .registration
        .resolve(app.fixture.other_organizer.id, request.id, true, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

mod postgres {
    use super::*;
    use crate::common::TEAM_COUNT;

    #[test_log::test(tokio::test)]
    async fn test_capacity_blocks_third_approval() {
        let Some(app) = TestApp::postgres(TEAM_COUNT).await else {
            return;
        };
        capacity_blocks_third_approval(&app).await;
    }

    #[test_log::test(tokio::test)]
    async fn test_at_most_one_pending_request_per_kind() {
        let Some(app) = TestApp::postgres(TEAM_COUNT).await else {
            return;
        };
        at_most_one_pending_request_per_kind(&app).await;
    }

    #[test_log::test(tokio::test)]
    async fn test_request_is_resolved_once() {
        let Some(app) = TestApp::postgres(TEAM_COUNT).await else {
            return;
        };
        request_is_resolved_once(&app).await;
    }
}
