//! Deterministic seed data for tests and local runs
//!
//! Every seeded team gets its own coach and a minimum-size squad. Names and
//! licence numbers are derived from the team index so runs are repeatable.
//! A tag keeps e-mails and licence numbers apart when several seeds share
//! one database.

use touchline_common::Result;
use touchline_domain::{
    Player, PlayerDraft, PlayerPosition, Team, TeamDraft, User, MIN_SQUAD_SIZE,
};
use touchline_identity::Role;

use crate::repository::LeagueStore;

/// Seeded directory: two organizers, and one coach per team
#[derive(Debug, Clone)]
pub struct LeagueFixture {
    pub organizer: User,
    pub other_organizer: User,
    pub admin: User,
    pub coaches: Vec<User>,
    pub teams: Vec<Team>,
    /// Squads, indexed like `teams`
    pub squads: Vec<Vec<Player>>,
}

impl LeagueFixture {
    /// Seed `team_count` teams plus the organizers into `store`
    pub async fn seed(store: &dyn LeagueStore, team_count: usize) -> Result<Self> {
        Self::seed_tagged(store, team_count, "").await
    }

    /// Seed like [`LeagueFixture::seed`], with `tag` mixed into every unique key
    pub async fn seed_tagged(
        store: &dyn LeagueStore,
        team_count: usize,
        tag: &str,
    ) -> Result<Self> {
        let organizer = user("organizer", 0, tag, Role::Organizer)?;
        let other_organizer = user("organizer", 1, tag, Role::Organizer)?;
        let admin = user("admin", 0, tag, Role::Admin)?;

        let mut tx = store.begin().await?;
        for u in [&organizer, &other_organizer, &admin] {
            tx.insert_user(u).await?;
        }

        let mut coaches = Vec::with_capacity(team_count);
        let mut teams = Vec::with_capacity(team_count);
        let mut squads = Vec::with_capacity(team_count);

        for index in 0..team_count {
            let coach = user("coach", index, tag, Role::Coach)?;
            tx.insert_user(&coach).await?;

            let (team, players) = Team::create(coach.id, &tagged_team_draft(index, tag))?;
            tx.insert_team(&team).await?;
            for player in &players {
                tx.insert_player(player).await?;
            }

            coaches.push(coach);
            teams.push(team);
            squads.push(players);
        }

        tx.commit().await?;

        Ok(Self {
            organizer,
            other_organizer,
            admin,
            coaches,
            teams,
            squads,
        })
    }

    /// Coach of the team at `index`
    pub fn coach_of(&self, index: usize) -> &User {
        &self.coaches[index]
    }
}

fn user(prefix: &str, index: usize, tag: &str, role: Role) -> Result<User> {
    let local = if tag.is_empty() {
        format!("{}{}", prefix, index)
    } else {
        format!("{}{}+{}", prefix, index, tag)
    };
    User::new(
        format!("{}@touchline.test", local),
        capitalize(prefix),
        format!("No{}", index),
        role,
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const POSITIONS: [PlayerPosition; 4] = [
    PlayerPosition::Goalkeeper,
    PlayerPosition::Defender,
    PlayerPosition::Midfielder,
    PlayerPosition::Forward,
];

/// Minimum-size squad draft for the team at `index`
pub fn team_draft(index: usize) -> TeamDraft {
    tagged_team_draft(index, "")
}

fn tagged_team_draft(index: usize, tag: &str) -> TeamDraft {
    let prefix = if tag.is_empty() {
        String::new()
    } else {
        format!("{}-", tag)
    };
    TeamDraft {
        name: format!("Team {}", index + 1),
        description: None,
        category: "SENIOR".to_string(),
        players: (0..MIN_SQUAD_SIZE)
            .map(|n| PlayerDraft {
                first_name: format!("Player{}", n + 1),
                last_name: format!("Team{}", index + 1),
                license_number: format!("{}T{:02}-P{:02}", prefix, index + 1, n + 1),
                date_of_birth: None,
                position: Some(POSITIONS[n % POSITIONS.len()]),
            })
            .collect(),
    }
}
