//! Explicit delete cascade for a competition
//!
//! The store never cascades on its own. Deleting a competition removes,
//! in order: each match's sheets (with their roster entries), its
//! participants and the match itself, then the competition's requests and
//! memberships, and finally the competition row.

use serde::Serialize;
use touchline_common::Result;
use touchline_store::LeagueTx;
use uuid::Uuid;

/// Row counts removed by a cascade
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub matches: u64,
    pub participants: u64,
    pub sheets: u64,
    pub participations: u64,
    pub requests: u64,
    pub memberships: u64,
}

/// Remove a competition and everything that references it
///
/// Runs inside the caller's transaction; nothing is visible until commit.
pub async fn purge_competition(
    tx: &mut dyn LeagueTx,
    competition_id: Uuid,
) -> Result<CascadeReport> {
    let mut report = CascadeReport::default();

    for fixture in tx.list_matches_by_competition(competition_id).await? {
        for sheet in tx.list_sheets_by_match(fixture.id).await? {
            report.participations += tx.delete_participations(sheet.id).await?;
            tx.delete_sheet(sheet.id).await?;
            report.sheets += 1;
        }
        report.participants += tx.delete_participants(fixture.id).await?;
        tx.delete_match(fixture.id).await?;
        report.matches += 1;
    }

    report.requests = tx.delete_requests_for_competition(competition_id).await?;
    report.memberships = tx.delete_competition_teams(competition_id).await?;
    tx.delete_competition(competition_id).await?;

    tracing::debug!(
        competition_id = %competition_id,
        matches = report.matches,
        requests = report.requests,
        memberships = report.memberships,
        "Competition cascade applied"
    );

    Ok(report)
}
