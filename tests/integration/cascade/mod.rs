//! Competition deletion integration tests

use touchline_common::ErrorKind;
use touchline_competitions::CascadeReport;
use touchline_domain::{ParticipationEntry, RequestFilter};

use crate::common::TestApp;

#[test_log::test(tokio::test)]
async fn test_delete_removes_everything_below_the_competition() {
    let app = TestApp::new().await;
    let competition = app.create_competition(None).await;
    app.enrol(competition.id, &[0, 1]).await;
    app.request_registration(2, competition.id).await.unwrap();

    let details = app.schedule(competition.id, 0, 1).await;
    let sheet = details
        .sheets
        .iter()
        .find(|s| s.team_id == app.team_id(0))
        .unwrap();
    app.services
        .sheets
        .update_roster(
            app.coach_id(0),
            sheet.id,
            vec![ParticipationEntry {
                player_id: app.fixture.squads[0][0].id,
                ..Default::default()
            }],
        )
        .await
        .unwrap();

    let report = app
        .services
        .competitions
        .delete(app.organizer_id(), competition.id)
        .await
        .unwrap();
    assert_eq!(
        report,
        CascadeReport {
            matches: 1,
            participants: 2,
            sheets: 2,
            participations: 1,
            requests: 3,
            memberships: 2,
        }
    );

    let err = app
        .services
        .competitions
        .get(competition.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = app
        .services
        .matches
        .get(details.fixture.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // Nothing dangling is left in the store
    let mut tx = app.services.store().begin().await.unwrap();
    assert!(tx.find_sheet(sheet.id).await.unwrap().is_none());
    assert!(tx.list_participations(sheet.id).await.unwrap().is_empty());
    assert!(tx
        .list_requests(&RequestFilter {
            competition_id: Some(competition.id),
            ..Default::default()
        })
        .await
        .unwrap()
        .is_empty());

    // Teams and players outlive the competition
    assert!(tx.find_team(app.team_id(0)).await.unwrap().is_some());
    assert!(tx
        .find_player(app.fixture.squads[0][0].id)
        .await
        .unwrap()
        .is_some());
}

#[test_log::test(tokio::test)]
async fn test_only_owner_deletes() {
    let app = TestApp::new().await;
    let competition = app.create_competition(None).await;

    let err = app
        .services
        .competitions
        .delete(app.fixture.other_organizer.id, competition.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    assert!(app.services.competitions.get(competition.id).await.is_ok());
}
