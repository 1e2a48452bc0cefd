//! Match lifecycle
//!
//! Organizer operations on a fixture. Every mutation requires the caller to
//! organize the match's competition. Recording a score always completes the
//! match; participant changes keep one sheet per participant.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use touchline_common::{Error, Result};
use touchline_domain::{
    validate_participants, Match, MatchDraft, MatchParticipant, MatchSheet, MatchStatus,
    ParticipantSpec, MATCH_PARTICIPANTS,
};
use touchline_store::access::{
    find_competition, find_match, owned_competition, owned_match, require_organizer,
};
use touchline_store::{LeagueStore, LeagueTx};
use uuid::Uuid;

use crate::provision::reconcile_sheets;

/// A match with its participants and sheets
#[derive(Debug, Clone, Serialize)]
pub struct MatchDetails {
    #[serde(rename = "match")]
    pub fixture: Match,
    pub participants: Vec<MatchParticipant>,
    pub sheets: Vec<MatchSheet>,
}

#[derive(Clone)]
pub struct MatchService {
    store: Arc<dyn LeagueStore>,
}

/// Reject participant lists naming unknown or repeated teams
async fn check_participants(
    tx: &mut dyn LeagueTx,
    participants: &[ParticipantSpec],
) -> Result<()> {
    validate_participants(participants)?;
    for participant in participants {
        if tx.find_team(participant.team_id).await?.is_none() {
            return Err(Error::NotFound(format!(
                "Team {} not found",
                participant.team_id
            )));
        }
    }
    Ok(())
}

impl MatchService {
    pub fn new(store: Arc<dyn LeagueStore>) -> Self {
        Self { store }
    }

    /// Schedule a match between two teams
    ///
    /// Creates the match SCHEDULED, its two participants, and one sheet per
    /// participant due the day before kick-off.
    pub async fn schedule(
        &self,
        organizer_id: Uuid,
        competition_id: Uuid,
        draft: MatchDraft,
        participants: Vec<ParticipantSpec>,
    ) -> Result<MatchDetails> {
        if participants.len() != MATCH_PARTICIPANTS {
            return Err(Error::Validation(format!(
                "A match needs exactly {} participants, got {}",
                MATCH_PARTICIPANTS,
                participants.len()
            )));
        }

        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;
        owned_competition(tx.as_mut(), &organizer, competition_id, false).await?;
        check_participants(tx.as_mut(), &participants).await?;

        let fixture = Match::schedule(competition_id, &draft)?;
        tx.insert_match(&fixture).await?;

        let mut inserted = Vec::with_capacity(participants.len());
        for spec in &participants {
            let participant = MatchParticipant::new(fixture.id, *spec);
            tx.insert_participant(&participant).await?;
            inserted.push(participant);
        }
        let sheets = reconcile_sheets(tx.as_mut(), &fixture, &participants)
            .await?
            .created;

        tx.commit().await?;

        tracing::info!(
            match_id = %fixture.id,
            competition_id = %competition_id,
            round = fixture.round,
            match_date = %fixture.match_date,
            "Match scheduled"
        );

        Ok(MatchDetails {
            fixture,
            participants: inserted,
            sheets,
        })
    }

    /// Move the match to `new_status`, optionally with a new date
    pub async fn update_status(
        &self,
        organizer_id: Uuid,
        match_id: Uuid,
        new_status: MatchStatus,
        match_date: Option<DateTime<Utc>>,
        reason: Option<String>,
    ) -> Result<Match> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;
        let (mut fixture, _) = owned_match(tx.as_mut(), &organizer, match_id).await?;

        let current = fixture.status;
        let previous = fixture.apply_status(new_status, match_date).map_err(|e| {
            tracing::debug!(
                match_id = %match_id,
                from = %current,
                to = %new_status,
                error = %e,
                "Match transition rejected"
            );
            e
        })?;
        tx.update_match(&fixture).await?;
        tx.commit().await?;

        tracing::info!(
            match_id = %match_id,
            from = %previous,
            to = %fixture.status,
            match_date = %fixture.match_date,
            reason = reason.as_deref().unwrap_or(""),
            "Match status updated"
        );

        Ok(fixture)
    }

    /// Record the final score; the match ends up COMPLETED
    pub async fn update_score(
        &self,
        organizer_id: Uuid,
        match_id: Uuid,
        home_score: i32,
        away_score: i32,
    ) -> Result<Match> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;
        let (mut fixture, _) = owned_match(tx.as_mut(), &organizer, match_id).await?;

        let previous = fixture.record_score(home_score, away_score)?;
        tx.update_match(&fixture).await?;
        tx.commit().await?;

        tracing::info!(
            match_id = %match_id,
            from = %previous,
            home_score,
            away_score,
            "Match score recorded"
        );

        Ok(fixture)
    }

    /// Replace the whole participant list
    ///
    /// Sheets follow the participants: removed teams lose their sheet and
    /// roster, new teams get a fresh sheet, retained teams keep theirs.
    pub async fn update_participants(
        &self,
        organizer_id: Uuid,
        match_id: Uuid,
        participants: Vec<ParticipantSpec>,
    ) -> Result<Vec<MatchParticipant>> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;
        let (mut fixture, _) = owned_match(tx.as_mut(), &organizer, match_id).await?;
        check_participants(tx.as_mut(), &participants).await?;

        let replaced = tx.delete_participants(match_id).await?;
        let mut inserted = Vec::with_capacity(participants.len());
        for spec in &participants {
            let participant = MatchParticipant::new(match_id, *spec);
            tx.insert_participant(&participant).await?;
            inserted.push(participant);
        }
        let changes = reconcile_sheets(tx.as_mut(), &fixture, &participants).await?;

        fixture.updated_at = Utc::now();
        tx.update_match(&fixture).await?;
        tx.commit().await?;

        tracing::info!(
            match_id = %match_id,
            replaced,
            participants = inserted.len(),
            sheets_created = changes.created.len(),
            sheets_removed = changes.removed.len(),
            "Match participants replaced"
        );

        Ok(inserted)
    }

    /// Edit title, description, location, date and round
    pub async fn update_info(
        &self,
        organizer_id: Uuid,
        match_id: Uuid,
        draft: MatchDraft,
    ) -> Result<Match> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;
        let (mut fixture, _) = owned_match(tx.as_mut(), &organizer, match_id).await?;

        fixture.apply_info(&draft)?;
        tx.update_match(&fixture).await?;
        tx.commit().await?;

        tracing::info!(match_id = %match_id, "Match info updated");

        Ok(fixture)
    }

    pub async fn get(&self, match_id: Uuid) -> Result<MatchDetails> {
        let mut tx = self.store.begin().await?;
        let fixture = find_match(tx.as_mut(), match_id).await?;
        let participants = tx.list_participants(match_id).await?;
        let sheets = tx.list_sheets_by_match(match_id).await?;

        Ok(MatchDetails {
            fixture,
            participants,
            sheets,
        })
    }

    /// Matches of a competition, ordered by round then date
    pub async fn list_for_competition(&self, competition_id: Uuid) -> Result<Vec<Match>> {
        let mut tx = self.store.begin().await?;
        find_competition(tx.as_mut(), competition_id).await?;

        Ok(tx.list_matches_by_competition(competition_id).await?)
    }
}
