//! Match sheet workflow
//!
//! Coaches edit their team's sheet (strategy, roster) and may submit it.
//! The organizer of the match's competition reviews it and can set any
//! status; every review stamps the validation date.

use std::sync::Arc;

use serde::Serialize;
use touchline_common::{Error, Result};
use touchline_domain::{
    MatchSheet, MatchSheetStatus, ParticipationEntry, PlayerParticipation, SheetSummary,
};
use touchline_store::access::{
    coached_sheet, coached_team, find_match, find_sheet, owned_match, require_coach,
    require_organizer,
};
use touchline_store::LeagueStore;
use uuid::Uuid;

/// A sheet with its roster
#[derive(Debug, Clone, Serialize)]
pub struct SheetDetails {
    pub sheet: MatchSheet,
    pub participations: Vec<PlayerParticipation>,
}

/// A team's sheets with counts
#[derive(Debug, Clone, Serialize)]
pub struct TeamSheets {
    pub team_id: Uuid,
    pub sheets: Vec<MatchSheet>,
    pub summary: SheetSummary,
}

#[derive(Clone)]
pub struct MatchSheetService {
    store: Arc<dyn LeagueStore>,
}

impl MatchSheetService {
    pub fn new(store: Arc<dyn LeagueStore>) -> Self {
        Self { store }
    }

    /// Coach edit of the strategy, optionally submitting the sheet
    ///
    /// Only SUBMITTED can be requested; other requested statuses are ignored.
    pub async fn coach_update(
        &self,
        coach_id: Uuid,
        sheet_id: Uuid,
        strategy: Option<String>,
        requested: Option<MatchSheetStatus>,
    ) -> Result<MatchSheet> {
        let mut tx = self.store.begin().await?;
        let coach = require_coach(tx.as_mut(), coach_id).await?;
        let mut sheet = coached_sheet(tx.as_mut(), &coach, sheet_id).await?;

        if let Some(status) = requested.filter(|s| *s != MatchSheetStatus::Submitted) {
            tracing::debug!(
                sheet_id = %sheet_id,
                requested = %status,
                "Coach status request ignored"
            );
        }

        let previous = sheet.status;
        let submitted = sheet.apply_coach_update(strategy, requested);
        tx.update_sheet(&sheet).await?;
        tx.commit().await?;

        tracing::info!(
            sheet_id = %sheet_id,
            from = %previous,
            to = %sheet.status,
            submitted,
            "Match sheet updated by coach"
        );

        Ok(sheet)
    }

    /// Organizer review: set `new_status` and stamp the validation date
    pub async fn organizer_validate(
        &self,
        organizer_id: Uuid,
        sheet_id: Uuid,
        new_status: MatchSheetStatus,
        comments: Option<String>,
    ) -> Result<MatchSheet> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;
        let mut sheet = find_sheet(tx.as_mut(), sheet_id).await?;
        owned_match(tx.as_mut(), &organizer, sheet.match_id).await?;

        let previous = sheet.status;
        sheet.apply_review(new_status, comments);
        tx.update_sheet(&sheet).await?;
        tx.commit().await?;

        tracing::info!(
            sheet_id = %sheet_id,
            from = %previous,
            to = %sheet.status,
            "Match sheet reviewed"
        );

        Ok(sheet)
    }

    /// Replace the sheet's roster with `entries`
    ///
    /// Every player must exist. Shirt numbers, roster size and statistics
    /// are stored as given.
    pub async fn update_roster(
        &self,
        coach_id: Uuid,
        sheet_id: Uuid,
        entries: Vec<ParticipationEntry>,
    ) -> Result<Vec<PlayerParticipation>> {
        let mut tx = self.store.begin().await?;
        let coach = require_coach(tx.as_mut(), coach_id).await?;
        let mut sheet = coached_sheet(tx.as_mut(), &coach, sheet_id).await?;

        for entry in &entries {
            if tx.find_player(entry.player_id).await?.is_none() {
                return Err(Error::NotFound(format!(
                    "Player {} not found",
                    entry.player_id
                )));
            }
        }

        let replaced = tx.delete_participations(sheet_id).await?;
        let mut roster = Vec::with_capacity(entries.len());
        for entry in entries {
            let participation = entry.into_participation(sheet_id);
            tx.insert_participation(&participation).await?;
            roster.push(participation);
        }

        sheet.updated_at = chrono::Utc::now();
        tx.update_sheet(&sheet).await?;
        tx.commit().await?;

        tracing::info!(
            sheet_id = %sheet_id,
            replaced,
            players = roster.len(),
            "Match sheet roster replaced"
        );

        Ok(roster)
    }

    /// A sheet and its roster, for the coach of the sheet's team
    pub async fn get_for_coach(&self, coach_id: Uuid, sheet_id: Uuid) -> Result<SheetDetails> {
        let mut tx = self.store.begin().await?;
        let coach = require_coach(tx.as_mut(), coach_id).await?;
        let sheet = coached_sheet(tx.as_mut(), &coach, sheet_id).await?;
        let participations = tx.list_participations(sheet_id).await?;

        Ok(SheetDetails {
            sheet,
            participations,
        })
    }

    pub async fn list_for_match(&self, match_id: Uuid) -> Result<Vec<MatchSheet>> {
        let mut tx = self.store.begin().await?;
        find_match(tx.as_mut(), match_id).await?;

        Ok(tx.list_sheets_by_match(match_id).await?)
    }

    /// Every sheet of a coached team, with pending and validated counts
    pub async fn list_for_team(&self, coach_id: Uuid, team_id: Uuid) -> Result<TeamSheets> {
        let mut tx = self.store.begin().await?;
        let coach = require_coach(tx.as_mut(), coach_id).await?;
        coached_team(tx.as_mut(), &coach, team_id).await?;

        let sheets = tx.list_sheets_by_team(team_id).await?;
        let summary = SheetSummary::from_sheets(&sheets);

        Ok(TeamSheets {
            team_id,
            sheets,
            summary,
        })
    }
}
