pub mod dataset;
pub mod format;
pub mod h2h;
pub mod league_tab;
pub mod record;
pub mod selectors;
pub mod table;
pub mod team_tab;
