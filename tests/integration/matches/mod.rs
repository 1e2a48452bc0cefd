//! Match lifecycle integration tests

use chrono::{Duration, TimeZone, Utc};
use touchline_common::ErrorKind;
use touchline_domain::{MatchSheetStatus, MatchStatus, ParticipantSpec};

use crate::common::{match_draft, TestApp};

#[test_log::test(tokio::test)]
async fn test_recording_score_completes_match() {
    let app = TestApp::new().await;
    let competition = app.create_competition(None).await;
    let details = app.schedule(competition.id, 0, 1).await;
    assert_eq!(details.fixture.status, MatchStatus::Scheduled);
    assert_eq!(details.participants.len(), 2);
    assert_eq!(details.sheets.len(), 2);

    let scored = app
        .services
        .matches
        .update_score(app.organizer_id(), details.fixture.id, 3, 1)
        .await
        .unwrap();
    assert_eq!(scored.status, MatchStatus::Completed);
    assert_eq!(scored.home_score, Some(3));
    assert_eq!(scored.away_score, Some(1));

    // Corrections are allowed on a completed match
    let corrected = app
        .services
        .matches
        .update_score(app.organizer_id(), details.fixture.id, 2, 1)
        .await
        .unwrap();
    assert_eq!(corrected.home_score, Some(2));
    assert_eq!(corrected.status, MatchStatus::Completed);
}

#[test_log::test(tokio::test)]
async fn test_cancelled_match_is_frozen() {
    let app = TestApp::new().await;
    let competition = app.create_competition(None).await;
    let match_id = app.schedule(competition.id, 0, 1).await.fixture.id;

    app.services
        .matches
        .update_status(
            app.organizer_id(),
            match_id,
            MatchStatus::Cancelled,
            None,
            Some("Waterlogged pitch".to_string()),
        )
        .await
        .unwrap();

    let err = app
        .services
        .matches
        .update_score(app.organizer_id(), match_id, 1, 0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = app
        .services
        .matches
        .update_status(
            app.organizer_id(),
            match_id,
            MatchStatus::Scheduled,
            None,
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test_log::test(tokio::test)]
async fn test_postpone_and_reschedule() {
    let app = TestApp::new().await;
    let competition = app.create_competition(None).await;
    let details = app.schedule(competition.id, 0, 1).await;
    let match_id = details.fixture.id;

    let postponed = app
        .services
        .matches
        .update_status(
            app.organizer_id(),
            match_id,
            MatchStatus::Postponed,
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(postponed.status, MatchStatus::Postponed);

    let new_date = details.fixture.match_date + Duration::days(7);
    let rescheduled = app
        .services
        .matches
        .update_status(
            app.organizer_id(),
            match_id,
            MatchStatus::Scheduled,
            Some(new_date),
            None,
        )
        .await
        .unwrap();
    assert_eq!(rescheduled.status, MatchStatus::Scheduled);
    assert_eq!(rescheduled.match_date, new_date);

    // SCHEDULED cannot jump straight to COMPLETED without a score
    let err = app
        .services
        .matches
        .update_status(
            app.organizer_id(),
            match_id,
            MatchStatus::Completed,
            None,
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test_log::test(tokio::test)]
async fn test_swapping_a_participant_replaces_its_sheet() {
    let app = TestApp::new().await;
    let competition = app.create_competition(None).await;
    let details = app.schedule(competition.id, 0, 1).await;
    let match_id = details.fixture.id;
    let kept_sheet = details
        .sheets
        .iter()
        .find(|s| s.team_id == app.team_id(1))
        .unwrap()
        .id;

    let participants = app
        .services
        .matches
        .update_participants(
            app.organizer_id(),
            match_id,
            vec![
                ParticipantSpec::home(app.team_id(2)),
                ParticipantSpec::away(app.team_id(1)),
            ],
        )
        .await
        .unwrap();
    assert_eq!(participants.len(), 2);

    let details = app.services.matches.get(match_id).await.unwrap();
    let teams: Vec<_> = details.sheets.iter().map(|s| s.team_id).collect();
    assert_eq!(details.sheets.len(), 2);
    assert!(teams.contains(&app.team_id(2)));
    assert!(!teams.contains(&app.team_id(0)));
    assert!(details.sheets.iter().any(|s| s.id == kept_sheet));
    assert!(details
        .sheets
        .iter()
        .all(|s| s.status == MatchSheetStatus::Unvalidated));
}

#[test_log::test(tokio::test)]
async fn test_schedule_validation() {
    let app = TestApp::new().await;
    let competition = app.create_competition(None).await;

    let err = app
        .services
        .matches
        .schedule(
            app.organizer_id(),
            competition.id,
            match_draft(1),
            vec![ParticipantSpec::home(app.team_id(0))],
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = app
        .services
        .matches
        .schedule(
            app.organizer_id(),
            competition.id,
            match_draft(1),
            vec![
                ParticipantSpec::home(app.team_id(0)),
                ParticipantSpec::away(app.team_id(0)),
            ],
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = app
        .services
        .matches
        .schedule(
            app.fixture.other_organizer.id,
            competition.id,
            match_draft(1),
            vec![
                ParticipantSpec::home(app.team_id(0)),
                ParticipantSpec::away(app.team_id(1)),
            ],
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let matches = app
        .services
        .matches
        .list_for_competition(competition.id)
        .await
        .unwrap();
    assert!(matches.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_update_info_keeps_status_and_score() {
    let app = TestApp::new().await;
    let competition = app.create_competition(None).await;
    let match_id = app.schedule(competition.id, 0, 1).await.fixture.id;
    app.services
        .matches
        .update_score(app.organizer_id(), match_id, 0, 0)
        .await
        .unwrap();

    let mut draft = match_draft(2);
    draft.match_date = Utc.with_ymd_and_hms(2026, 5, 2, 14, 30, 0).unwrap();
    let updated = app
        .services
        .matches
        .update_info(app.organizer_id(), match_id, draft)
        .await
        .unwrap();

    assert_eq!(updated.round, 2);
    assert_eq!(updated.status, MatchStatus::Completed);
    assert_eq!(updated.home_score, Some(0));
}
