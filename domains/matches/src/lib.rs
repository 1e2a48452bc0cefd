//! Matches domain: match lifecycle, participants, match sheets and rosters

pub mod lifecycle;
pub mod provision;
pub mod sheets;

pub use lifecycle::{MatchDetails, MatchService};
pub use provision::{purge_sheet, reconcile_sheets, SheetChanges};
pub use sheets::{MatchSheetService, SheetDetails, TeamSheets};
