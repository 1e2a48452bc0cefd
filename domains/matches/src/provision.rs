//! Match sheet provisioning
//!
//! Keeps exactly one sheet per participant of a match. Sheets are created
//! and removed as a side effect of scheduling and participant changes.

use std::collections::HashSet;

use touchline_common::Result;
use touchline_domain::{Match, MatchSheet, ParticipantSpec};
use touchline_store::LeagueTx;
use uuid::Uuid;

/// Sheets created and removed by a reconciliation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetChanges {
    pub created: Vec<MatchSheet>,
    pub removed: Vec<Uuid>,
}

/// Remove a sheet together with its roster
pub async fn purge_sheet(tx: &mut dyn LeagueTx, sheet_id: Uuid) -> Result<u64> {
    let participations = tx.delete_participations(sheet_id).await?;
    tx.delete_sheet(sheet_id).await?;
    Ok(participations)
}

/// Bring the match's sheets in line with `participants`
///
/// Sheets of retained teams are kept as they are, with their roster.
pub async fn reconcile_sheets(
    tx: &mut dyn LeagueTx,
    fixture: &Match,
    participants: &[ParticipantSpec],
) -> Result<SheetChanges> {
    let wanted: HashSet<Uuid> = participants.iter().map(|p| p.team_id).collect();
    let existing = tx.list_sheets_by_match(fixture.id).await?;
    let covered: HashSet<Uuid> = existing.iter().map(|s| s.team_id).collect();

    let mut changes = SheetChanges::default();

    for sheet in existing.iter().filter(|s| !wanted.contains(&s.team_id)) {
        purge_sheet(tx, sheet.id).await?;
        changes.removed.push(sheet.id);
    }

    for participant in participants.iter().filter(|p| !covered.contains(&p.team_id)) {
        let sheet = MatchSheet::for_participant(fixture, participant.team_id);
        tx.insert_sheet(&sheet).await?;
        changes.created.push(sheet);
    }

    Ok(changes)
}
