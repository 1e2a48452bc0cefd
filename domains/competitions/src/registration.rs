//! Registration workflow
//!
//! Coaches ask to join or leave a competition; the competition's organizer
//! approves or rejects. Resolution locks the competition row first, so the
//! capacity check and the membership insert cannot interleave with another
//! approval for the same competition.

use std::sync::Arc;

use touchline_common::{Error, Result};
use touchline_domain::{
    CompetitionRequest, CompetitionTeam, CompetitionTeamStatus, RequestFilter,
    RequestGuardContext, RequestType,
};
use touchline_identity::Actor;
use touchline_store::access::{
    coached_team, find_competition, locked_competition, owned_competition, require_coach,
    require_organizer,
};
use touchline_store::{LeagueStore, LeagueTx};
use uuid::Uuid;

#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn LeagueStore>,
}

/// Whether a PENDING request of this type already exists for the pair
async fn has_pending(
    tx: &mut dyn LeagueTx,
    team_id: Uuid,
    competition_id: Uuid,
    request_type: RequestType,
) -> Result<bool> {
    let pending = tx
        .list_requests(&RequestFilter::pending(team_id, competition_id, request_type))
        .await?;
    Ok(!pending.is_empty())
}

/// Insert a new PENDING request, reporting a lost uniqueness race as a conflict
async fn insert_pending(
    tx: &mut dyn LeagueTx,
    coach: &Actor,
    team_id: Uuid,
    competition_id: Uuid,
    request_type: RequestType,
    reason: Option<String>,
) -> Result<CompetitionRequest> {
    let request =
        CompetitionRequest::new(competition_id, team_id, coach.user_id, request_type, reason);
    tx.insert_request(&request).await?;
    Ok(request)
}

impl RegistrationService {
    pub fn new(store: Arc<dyn LeagueStore>) -> Self {
        Self { store }
    }

    /// Ask for `team_id` to join the competition
    pub async fn request_registration(
        &self,
        coach_id: Uuid,
        team_id: Uuid,
        competition_id: Uuid,
        reason: Option<String>,
    ) -> Result<CompetitionRequest> {
        let mut tx = self.store.begin().await?;
        let coach = require_coach(tx.as_mut(), coach_id).await?;
        coached_team(tx.as_mut(), &coach, team_id).await?;
        let competition = locked_competition(tx.as_mut(), competition_id).await?;

        if !competition.accepts_registrations() {
            tracing::debug!(
                competition_id = %competition_id,
                status = %competition.status,
                "Registration refused"
            );
            return Err(Error::Validation(format!(
                "Competition is not accepting registrations (status {})",
                competition.status
            )));
        }

        if tx
            .find_competition_team(competition_id, team_id)
            .await?
            .is_some()
        {
            return Err(Error::Conflict(
                "Team is already registered in this competition".to_string(),
            ));
        }

        if has_pending(tx.as_mut(), team_id, competition_id, RequestType::Registration).await? {
            return Err(Error::Conflict(
                "A registration request is already pending for this team".to_string(),
            ));
        }

        let request = insert_pending(
            tx.as_mut(),
            &coach,
            team_id,
            competition_id,
            RequestType::Registration,
            reason,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            request_id = %request.id,
            team_id = %team_id,
            competition_id = %competition_id,
            "Registration requested"
        );

        Ok(request)
    }

    /// Ask for `team_id` to leave a competition it belongs to
    pub async fn request_withdrawal(
        &self,
        coach_id: Uuid,
        team_id: Uuid,
        competition_id: Uuid,
        reason: Option<String>,
    ) -> Result<CompetitionRequest> {
        let mut tx = self.store.begin().await?;
        let coach = require_coach(tx.as_mut(), coach_id).await?;
        coached_team(tx.as_mut(), &coach, team_id).await?;
        let competition = locked_competition(tx.as_mut(), competition_id).await?;

        if competition.status.is_terminal() {
            tracing::debug!(
                competition_id = %competition_id,
                status = %competition.status,
                "Withdrawal refused"
            );
            return Err(Error::Validation(format!(
                "Competition is closed (status {})",
                competition.status
            )));
        }

        if tx
            .find_competition_team(competition_id, team_id)
            .await?
            .is_none()
        {
            return Err(Error::Validation(
                "Team is not registered in this competition".to_string(),
            ));
        }

        if has_pending(tx.as_mut(), team_id, competition_id, RequestType::Withdrawal).await? {
            return Err(Error::Conflict(
                "A withdrawal request is already pending for this team".to_string(),
            ));
        }

        let request = insert_pending(
            tx.as_mut(),
            &coach,
            team_id,
            competition_id,
            RequestType::Withdrawal,
            reason,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            request_id = %request.id,
            team_id = %team_id,
            competition_id = %competition_id,
            "Withdrawal requested"
        );

        Ok(request)
    }

    /// Ask to leave every competition the team belongs to
    ///
    /// Competitions that are already over, or that already have a pending
    /// withdrawal for the team, are skipped. Returns only the newly created
    /// requests.
    pub async fn request_all_withdrawals(
        &self,
        coach_id: Uuid,
        team_id: Uuid,
        reason: Option<String>,
    ) -> Result<Vec<CompetitionRequest>> {
        let mut tx = self.store.begin().await?;
        let coach = require_coach(tx.as_mut(), coach_id).await?;
        coached_team(tx.as_mut(), &coach, team_id).await?;

        let mut memberships = tx.list_memberships_for_team(team_id).await?;
        // Competition rows are locked in id order
        memberships.sort_by_key(|m| m.competition_id);
        let mut created = Vec::with_capacity(memberships.len());

        for membership in memberships {
            let competition_id = membership.competition_id;
            let competition = locked_competition(tx.as_mut(), competition_id).await?;
            if competition.status.is_terminal() {
                tracing::debug!(
                    team_id = %team_id,
                    competition_id = %competition_id,
                    status = %competition.status,
                    "Competition closed, skipped"
                );
                continue;
            }

            if has_pending(tx.as_mut(), team_id, competition_id, RequestType::Withdrawal).await? {
                tracing::debug!(
                    team_id = %team_id,
                    competition_id = %competition_id,
                    "Withdrawal already pending, skipped"
                );
                continue;
            }

            let request = insert_pending(
                tx.as_mut(),
                &coach,
                team_id,
                competition_id,
                RequestType::Withdrawal,
                reason.clone(),
            )
            .await?;
            created.push(request);
        }

        tx.commit().await?;

        tracing::info!(
            team_id = %team_id,
            created = created.len(),
            "Bulk withdrawal requested"
        );

        Ok(created)
    }

    /// Approve or reject a pending request
    ///
    /// Approving a registration checks the competition's capacity against
    /// its ACTIVE members and adds the team; approving a withdrawal removes
    /// the team's membership. The request stamp and the membership change
    /// commit together.
    pub async fn resolve(
        &self,
        organizer_id: Uuid,
        request_id: Uuid,
        approved: bool,
        reason: Option<String>,
    ) -> Result<CompetitionRequest> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;

        let competition_id = tx
            .find_request(request_id)
            .await?
            .ok_or_else(|| Error::NotFound("Request not found".to_string()))?
            .competition_id;
        let competition = owned_competition(tx.as_mut(), &organizer, competition_id, true).await?;

        // Re-read under the competition lock
        let mut request = tx
            .find_request(request_id)
            .await?
            .ok_or_else(|| Error::NotFound("Request not found".to_string()))?;

        if !request.is_pending() {
            tracing::debug!(
                request_id = %request_id,
                status = %request.request_status,
                "Request already processed"
            );
            return Err(Error::Validation(format!(
                "Request already processed ({})",
                request.request_status
            )));
        }

        let team_id = request.team_id;
        match (approved, request.request_type) {
            (true, RequestType::Registration) => {
                if !competition.accepts_registrations() {
                    tracing::debug!(
                        request_id = %request_id,
                        status = %competition.status,
                        "Approval refused, registrations closed"
                    );
                    return Err(Error::Validation(format!(
                        "Competition is not accepting registrations (status {})",
                        competition.status
                    )));
                }

                if tx
                    .find_competition_team(competition_id, team_id)
                    .await?
                    .is_some()
                {
                    return Err(Error::Conflict(
                        "Team is already registered in this competition".to_string(),
                    ));
                }

                let active = tx.count_active_competition_teams(competition_id).await?;
                let guard = RequestGuardContext {
                    has_capacity: competition.has_capacity(active),
                };
                request.resolve(true, reason, Some(&guard)).map_err(|e| {
                    tracing::debug!(
                        competition_id = %competition_id,
                        active_teams = active,
                        max_teams = ?competition.max_teams,
                        "Registration approval refused"
                    );
                    Error::from(e)
                })?;

                tx.insert_competition_team(&CompetitionTeam::new(competition_id, team_id))
                    .await?;
            }
            (true, RequestType::Withdrawal) => {
                request.resolve(true, reason, None)?;
                let removed = tx.delete_competition_team(competition_id, team_id).await?;
                if removed == 0 {
                    tracing::debug!(
                        team_id = %team_id,
                        competition_id = %competition_id,
                        "Withdrawn team had no membership"
                    );
                }
            }
            (false, _) => {
                request.resolve(false, reason, None)?;
            }
        }

        tx.update_request(&request).await?;
        tx.commit().await?;

        tracing::info!(
            request_id = %request_id,
            request_type = %request.request_type,
            status = %request.request_status,
            team_id = %team_id,
            competition_id = %competition_id,
            "Request resolved"
        );

        Ok(request)
    }

    /// Organizer override of a member's status
    ///
    /// Any status may be set from any status.
    pub async fn set_team_status(
        &self,
        organizer_id: Uuid,
        competition_id: Uuid,
        team_id: Uuid,
        new_status: CompetitionTeamStatus,
        reason: Option<String>,
    ) -> Result<CompetitionTeam> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;
        owned_competition(tx.as_mut(), &organizer, competition_id, true).await?;

        let mut membership = tx
            .find_competition_team(competition_id, team_id)
            .await?
            .ok_or_else(|| {
                Error::NotFound("Team is not registered in this competition".to_string())
            })?;

        let previous = membership.status;
        membership.status = new_status;
        membership.updated_at = chrono::Utc::now();
        tx.update_competition_team(&membership).await?;
        tx.commit().await?;

        tracing::info!(
            competition_id = %competition_id,
            team_id = %team_id,
            from = %previous,
            to = %new_status,
            reason = reason.as_deref().unwrap_or(""),
            "Team status overridden"
        );

        Ok(membership)
    }

    /// Every request of a competition, for its organizer
    pub async fn list_requests_for_competition(
        &self,
        organizer_id: Uuid,
        competition_id: Uuid,
    ) -> Result<Vec<CompetitionRequest>> {
        let mut tx = self.store.begin().await?;
        let organizer = require_organizer(tx.as_mut(), organizer_id).await?;
        owned_competition(tx.as_mut(), &organizer, competition_id, false).await?;

        Ok(tx
            .list_requests(&RequestFilter::for_competition(competition_id))
            .await?)
    }

    /// Every request a coach has filed
    pub async fn list_requests_for_coach(&self, coach_id: Uuid) -> Result<Vec<CompetitionRequest>> {
        let mut tx = self.store.begin().await?;
        let coach = require_coach(tx.as_mut(), coach_id).await?;

        Ok(tx
            .list_requests(&RequestFilter::for_coach(coach.user_id))
            .await?)
    }

    /// Current members of a competition
    pub async fn list_teams(&self, competition_id: Uuid) -> Result<Vec<CompetitionTeam>> {
        let mut tx = self.store.begin().await?;
        find_competition(tx.as_mut(), competition_id).await?;

        Ok(tx.list_competition_teams(competition_id).await?)
    }
}
