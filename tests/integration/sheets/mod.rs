//! Match sheet workflow integration tests

use touchline_common::ErrorKind;
use touchline_domain::{MatchSheet, MatchSheetStatus, ParticipationEntry, PlayerStatus};

use crate::common::TestApp;

/// Team 0's sheet of a fresh fixture against team 1
async fn home_sheet(app: &TestApp) -> MatchSheet {
    let competition = app.create_competition(None).await;
    let details = app.schedule(competition.id, 0, 1).await;
    details
        .sheets
        .into_iter()
        .find(|s| s.team_id == app.team_id(0))
        .unwrap()
}

#[test_log::test(tokio::test)]
async fn test_submit_then_validate() {
    let app = TestApp::new().await;
    let sheet = home_sheet(&app).await;
    assert_eq!(sheet.status, MatchSheetStatus::Unvalidated);
    assert!(sheet.submission_deadline.is_some());

    let submitted = app
        .services
        .sheets
        .coach_update(
            app.coach_id(0),
            sheet.id,
            Some("4-4-2, press high".to_string()),
            Some(MatchSheetStatus::Submitted),
        )
        .await
        .unwrap();
    assert_eq!(submitted.status, MatchSheetStatus::Submitted);
    assert!(submitted.validation_date.is_none());

    let validated = app
        .services
        .sheets
        .organizer_validate(
            app.organizer_id(),
            sheet.id,
            MatchSheetStatus::Validated,
            Some("ok".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(validated.status, MatchSheetStatus::Validated);
    assert!(validated.validation_date.is_some());
    assert_eq!(validated.organizer_comments.as_deref(), Some("ok"));
    assert_eq!(validated.strategy.as_deref(), Some("4-4-2, press high"));
}

#[test_log::test(tokio::test)]
async fn test_coach_cannot_validate_own_sheet() {
    let app = TestApp::new().await;
    let sheet = home_sheet(&app).await;

    let unchanged = app
        .services
        .sheets
        .coach_update(
            app.coach_id(0),
            sheet.id,
            None,
            Some(MatchSheetStatus::Validated),
        )
        .await
        .unwrap();
    assert_eq!(unchanged.status, MatchSheetStatus::Unvalidated);

    let err = app
        .services
        .sheets
        .coach_update(app.coach_id(1), sheet.id, Some("Park the bus".into()), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = app
        .services
        .sheets
        .organizer_validate(
            app.fixture.other_organizer.id,
            sheet.id,
            MatchSheetStatus::Validated,
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[test_log::test(tokio::test)]
async fn test_roster_is_replaced_wholesale() {
    let app = TestApp::new().await;
    let sheet = home_sheet(&app).await;
    let squad = &app.fixture.squads[0];

    let entries: Vec<ParticipationEntry> = squad
        .iter()
        .enumerate()
        .map(|(n, player)| ParticipationEntry {
            player_id: player.id,
            shirt_number: Some(n as i32 + 1),
            status: if n < 2 {
                PlayerStatus::Starter
            } else {
                PlayerStatus::Substitute
            },
            ..Default::default()
        })
        .collect();
    let roster = app
        .services
        .sheets
        .update_roster(app.coach_id(0), sheet.id, entries)
        .await
        .unwrap();
    assert_eq!(roster.len(), squad.len());

    let trimmed = app
        .services
        .sheets
        .update_roster(
            app.coach_id(0),
            sheet.id,
            vec![ParticipationEntry {
                player_id: squad[0].id,
                goals_scored: Some(2),
                ..Default::default()
            }],
        )
        .await
        .unwrap();
    assert_eq!(trimmed.len(), 1);

    let details = app
        .services
        .sheets
        .get_for_coach(app.coach_id(0), sheet.id)
        .await
        .unwrap();
    assert_eq!(details.participations.len(), 1);
    assert_eq!(details.participations[0].goals_scored, Some(2));

    let err = app
        .services
        .sheets
        .update_roster(
            app.coach_id(0),
            sheet.id,
            vec![ParticipationEntry {
                player_id: uuid::Uuid::new_v4(),
                ..Default::default()
            }],
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // A failed replacement leaves the previous roster in place
    let details = app
        .services
        .sheets
        .get_for_coach(app.coach_id(0), sheet.id)
        .await
        .unwrap();
    assert_eq!(details.participations.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_team_sheet_summary() {
    let app = TestApp::new().await;
    let competition = app.create_competition(None).await;
    let first = app.schedule(competition.id, 0, 1).await;
    app.schedule(competition.id, 0, 2).await;

    let sheet = first
        .sheets
        .iter()
        .find(|s| s.team_id == app.team_id(0))
        .unwrap();
    app.services
        .sheets
        .coach_update(
            app.coach_id(0),
            sheet.id,
            None,
            Some(MatchSheetStatus::Submitted),
        )
        .await
        .unwrap();

    let listing = app
        .services
        .sheets
        .list_for_team(app.coach_id(0), app.team_id(0))
        .await
        .unwrap();
    assert_eq!(listing.sheets.len(), 2);
    assert_eq!(listing.summary.total, 2);
    assert_eq!(listing.summary.pending, 1);
    assert_eq!(listing.summary.validated, 0);

    let for_match = app
        .services
        .sheets
        .list_for_match(first.fixture.id)
        .await
        .unwrap();
    assert_eq!(for_match.len(), 2);
}
