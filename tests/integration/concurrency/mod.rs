//! Concurrent approval and cancellation integration tests

use touchline_common::ErrorKind;
use touchline_domain::{CompetitionStatus, CompetitionTeamStatus, RequestStatus};

use crate::common::TestApp;

const RACE_ROUNDS: usize = 25;

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
async fn test_parallel_approvals_respect_capacity() {
    parallel_approvals_respect_capacity(&TestApp::with_teams(6).await).await;
}

async fn parallel_approvals_respect_capacity(app: &TestApp) {
    let competition = app.create_competition(Some(3)).await;

    let mut request_ids = Vec::new();
    for index in 0..6 {
        let request = app.request_registration(index, competition.id).await.unwrap();
        request_ids.push(request.id);
    }

    let organizer_id = app.organizer_id();
    let handles: Vec<_> = request_ids
        .into_iter()
        .map(|request_id| {
            let registration = app.services.registration.clone();
            tokio::spawn(async move {
                registration
                    .resolve(organizer_id, request_id, true, None)
                    .await
            })
        })
        .collect();

    let mut approved = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            approved += 1;
        }
    }
    assert_eq!(approved, 3);

    let members = app
        .services
        .registration
        .list_teams(competition.id)
        .await
        .unwrap();
    assert_eq!(members.len(), 3);
    assert!(members
        .iter()
        .all(|m| m.status == CompetitionTeamStatus::Active));
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
async fn test_cancellation_never_leaves_pending_requests() {
    cancellation_never_leaves_pending_requests(&TestApp::new().await).await;
}

/// Race a registration against a cancellation of the same competition
///
/// Either the request lands first and is swept by the cancellation, or the
/// cancellation lands first and the request is refused.
async fn cancellation_never_leaves_pending_requests(app: &TestApp) {
    for _ in 0..RACE_ROUNDS {
        let competition = app.create_competition(None).await;
        app.move_competition(competition.id, CompetitionStatus::Registration)
            .await
            .unwrap();

        let registration = app.services.registration.clone();
        let (coach_id, team_id) = (app.coach_id(0), app.team_id(0));
        let filing = tokio::spawn(async move {
            registration
                .request_registration(coach_id, team_id, competition.id, None)
                .await
        });

        let competitions = app.services.competitions.clone();
        let organizer_id = app.organizer_id();
        let cancelling = tokio::spawn(async move {
            competitions
                .update_status(
                    organizer_id,
                    competition.id,
                    CompetitionStatus::Cancelled,
                    Some("Venue unavailable".to_string()),
                )
                .await
        });

        let filed = filing.await.unwrap();
        cancelling.await.unwrap().unwrap();

        let requests = app
            .services
            .registration
            .list_requests_for_competition(app.organizer_id(), competition.id)
            .await
            .unwrap();
        assert!(requests
            .iter()
            .all(|r| r.request_status != RequestStatus::Pending));

        match filed {
            Ok(request) => {
                let swept = requests.iter().find(|r| r.id == request.id).unwrap();
                assert_eq!(swept.request_status, RequestStatus::Rejected);
            }
            Err(err) => {
                assert_eq!(err.kind(), ErrorKind::Validation);
                assert!(requests.is_empty());
            }
        }

        let members = app
            .services
            .registration
            .list_teams(competition.id)
            .await
            .unwrap();
        assert!(members.is_empty());
    }
}

mod postgres {
    use super::*;
    use crate::common::TEAM_COUNT;

    #[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
    async fn test_parallel_approvals_respect_capacity() {
        let Some(app) = TestApp::postgres(6).await else {
            return;
        };
        parallel_approvals_respect_capacity(&app).await;
    }

    #[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
    async fn test_cancellation_never_leaves_pending_requests() {
        let Some(app) = TestApp::postgres(TEAM_COUNT).await else {
            return;
        };
        cancellation_never_leaves_pending_requests(&app).await;
    }
}
