//! Competition lifecycle
//!
//! Organizer-facing operations on a competition: creation, detail edits,
//! status moves along the competition state machine, and deletion through
//! the explicit cascade. Cancelling rejects every pending request in the
//! same transaction as the status change.

use std::sync::Arc;

use serde::Serialize;
use touchline_common::{Error, Result};
use touchline_domain::{
    Competition, CompetitionDraft, CompetitionFilter, CompetitionStatus, OrganizerSummary,
    RequestFilter, RequestStatus,
};
use touchline_store::access::{find_competition, owned_competition, require_organizer};
use touchline_store::{LeagueStore, LeagueTx};
use uuid::Uuid;

use crate::cascade::{purge_competition, CascadeReport};

/// An organizer's competitions with per-status counts
#[derive(Debug, Clone, Serialize)]
pub struct OrganizerCompetitions {
    pub competitions: Vec<Competition>,
    /// Counts over all of the organizer's competitions, before filtering
    pub summary: OrganizerSummary,
}

#[derive(Clone)]
pub struct CompetitionService {
    store: Arc<dyn LeagueStore>,
}

impl CompetitionService {
    pub fn new(store: Arc<dyn LeagueStore>) -> Self {
        Self { store }
    }

    /// Create an UPCOMING competition owned by the organizer
    pub async fn create(&self, organizer_id: Uuid, draft: CompetitionDraft) -> Result<Competition> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;

        let competition = Competition::create(organizer.user_id, &draft)?;
        tx.insert_competition(&competition).await?;
        tx.commit().await?;

        tracing::info!(
            competition_id = %competition.id,
            organizer_id = %organizer_id,
            competition_type = ?competition.competition_type,
            "Competition created"
        );

        Ok(competition)
    }

    /// Edit name, dates, capacity and the other descriptive fields
    pub async fn update_details(
        &self,
        organizer_id: Uuid,
        competition_id: Uuid,
        draft: CompetitionDraft,
    ) -> Result<Competition> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;
        let mut competition =
            owned_competition(tx.as_mut(), &organizer, competition_id, true).await?;

        competition.apply_details(&draft)?;
        tx.update_competition(&competition).await?;
        tx.commit().await?;

        tracing::info!(competition_id = %competition_id, "Competition details updated");

        Ok(competition)
    }

    /// Move the competition to `new_status`
    ///
    /// Moving to CANCELLED also rejects every PENDING request of the
    /// competition, stamping `reason` into the response message.
    pub async fn update_status(
        &self,
        organizer_id: Uuid,
        competition_id: Uuid,
        new_status: CompetitionStatus,
        reason: Option<String>,
    ) -> Result<Competition> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;
        let mut competition =
            owned_competition(tx.as_mut(), &organizer, competition_id, true).await?;

        let previous = competition.apply_status(new_status).map_err(|e| {
            tracing::debug!(
                competition_id = %competition_id,
                from = %competition.status,
                to = %new_status,
                error = %e,
                "Competition transition rejected"
            );
            Error::from(e)
        })?;
        tx.update_competition(&competition).await?;

        let rejected = if competition.status == CompetitionStatus::Cancelled {
            let reason = reason.as_deref().unwrap_or("no reason given");
            reject_pending_requests(tx.as_mut(), competition_id, reason).await?
        } else {
            0
        };

        tx.commit().await?;

        tracing::info!(
            competition_id = %competition_id,
            from = %previous,
            to = %competition.status,
            rejected_requests = rejected,
            "Competition status updated"
        );

        Ok(competition)
    }

    /// Delete the competition with its matches, sheets, requests and memberships
    pub async fn delete(&self, organizer_id: Uuid, competition_id: Uuid) -> Result<CascadeReport> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;
        owned_competition(tx.as_mut(), &organizer, competition_id, true).await?;

        let report = purge_competition(tx.as_mut(), competition_id).await?;
        tx.commit().await?;

        tracing::info!(
            competition_id = %competition_id,
            matches = report.matches,
            memberships = report.memberships,
            "Competition deleted"
        );

        Ok(report)
    }

    pub async fn get(&self, competition_id: Uuid) -> Result<Competition> {
        let mut tx = self.store.begin().await?;
        find_competition(tx.as_mut(), competition_id).await
    }

    /// The organizer's competitions matching `filter`, plus a summary
    pub async fn list_by_organizer(
        &self,
        organizer_id: Uuid,
        filter: &CompetitionFilter,
    ) -> Result<OrganizerCompetitions> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;

        let all = tx.list_competitions_by_organizer(organizer.user_id).await?;
        let summary = OrganizerSummary::from_competitions(&all);
        let competitions = all.into_iter().filter(|c| filter.matches(c)).collect();

        Ok(OrganizerCompetitions {
            competitions,
            summary,
        })
    }
}

/// Reject every PENDING request of a cancelled competition
async fn reject_pending_requests(
    tx: &mut dyn LeagueTx,
    competition_id: Uuid,
    reason: &str,
) -> Result<usize> {
    let filter = RequestFilter::for_competition(competition_id).with_status(RequestStatus::Pending);
    let pending = tx.list_requests(&filter).await?;

    for mut request in pending.iter().cloned() {
        request.reject_for_cancellation(reason)?;
        tx.update_request(&request).await?;
    }

    Ok(pending.len())
}
