//! Competitions domain: competition lifecycle, registration workflow, cascade policy

pub mod cascade;
pub mod lifecycle;
pub mod registration;

pub use cascade::{purge_competition, CascadeReport};
pub use lifecycle::{CompetitionService, OrganizerCompetitions};
pub use registration::RegistrationService;
