//! Rendering-surface contract: every tab emits three parallel sequences of
//! equal row count (display rows, per-row tooltips, per-cell style
//! directives). The frontend only maps these onto widgets; nothing here is
//! persisted between interactions.

use serde::Serialize;

use crate::record::MatchRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnId {
    Result,
    MatchDate,
    FinalScore,
    HomeName,
    AwayName,
    League,
    HomeOdds,
    DrawOdds,
    AwayOdds,
    Total,
    Handicap,
}

impl ColumnId {
    pub fn header(self) -> &'static str {
        match self {
            ColumnId::Result => " ",
            ColumnId::MatchDate => "Date",
            ColumnId::FinalScore => "Score",
            ColumnId::HomeName => "Home",
            ColumnId::AwayName => "Away",
            ColumnId::League => "League",
            ColumnId::HomeOdds => "Home Odds",
            ColumnId::DrawOdds => "Draw Odds",
            ColumnId::AwayOdds => "Away Odds",
            ColumnId::Total => "O/U",
            ColumnId::Handicap => "AH",
        }
    }
}

pub const LEAGUE_COLUMNS: &[ColumnId] = &[
    ColumnId::MatchDate,
    ColumnId::HomeName,
    ColumnId::AwayName,
    ColumnId::HomeOdds,
    ColumnId::DrawOdds,
    ColumnId::AwayOdds,
    ColumnId::Total,
    ColumnId::Handicap,
];

pub const TEAM_COLUMNS: &[ColumnId] = &[
    ColumnId::Result,
    ColumnId::MatchDate,
    ColumnId::FinalScore,
    ColumnId::HomeName,
    ColumnId::AwayName,
    ColumnId::League,
    ColumnId::HomeOdds,
    ColumnId::DrawOdds,
    ColumnId::AwayOdds,
    ColumnId::Total,
];

pub const H2H_COLUMNS: &[ColumnId] = &[
    ColumnId::MatchDate,
    ColumnId::FinalScore,
    ColumnId::HomeName,
    ColumnId::AwayName,
    ColumnId::League,
    ColumnId::HomeOdds,
    ColumnId::DrawOdds,
    ColumnId::AwayOdds,
    ColumnId::Total,
];

/// Presentation projection of one `MatchRecord`, or a blank spacer row.
/// A spacer carries no match link and empty strings everywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayRow {
    pub match_link: String,
    pub result: String,
    pub match_date: String,
    pub final_score: String,
    pub home_name: String,
    pub away_name: String,
    pub league: String,
    pub home_odds: String,
    pub draw_odds: String,
    pub away_odds: String,
    pub total: String,
    pub handicap: String,
}

impl DisplayRow {
    pub fn spacer() -> Self {
        Self::default()
    }

    pub fn is_spacer(&self) -> bool {
        self.match_link.is_empty()
    }

    pub fn cell(&self, column: ColumnId) -> &str {
        match column {
            ColumnId::Result => &self.result,
            ColumnId::MatchDate => &self.match_date,
            ColumnId::FinalScore => &self.final_score,
            ColumnId::HomeName => &self.home_name,
            ColumnId::AwayName => &self.away_name,
            ColumnId::League => &self.league,
            ColumnId::HomeOdds => &self.home_odds,
            ColumnId::DrawOdds => &self.draw_odds,
            ColumnId::AwayOdds => &self.away_odds,
            ColumnId::Total => &self.total,
            ColumnId::Handicap => &self.handicap,
        }
    }
}

/// Opening odds shown on hover over the closing odds cells. The home tooltip
/// additionally carries the Asian handicap line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowTooltip {
    pub home_odds: String,
    pub draw_odds: String,
    pub away_odds: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const STRIPE_EVEN: Rgb = Rgb(248, 248, 248);
pub const STRIPE_ODD: Rgb = Rgb(255, 255, 255);
pub const SELECTED_BG: Rgb = Rgb(204, 255, 255);
pub const WINNER_ODDS_BG: Rgb = Rgb(255, 255, 204);
pub const WIN_BG: Rgb = Rgb(102, 255, 102);
pub const DRAW_BG: Rgb = Rgb(255, 165, 0);
pub const LOSS_BG: Rgb = Rgb(255, 51, 51);
pub const TEXT: Rgb = Rgb(0, 0, 0);
pub const OFF_BOOK_TEXT: Rgb = Rgb(192, 192, 192);

/// Zebra background for a row index.
pub fn stripe(row_ix: usize) -> Rgb {
    if row_ix % 2 == 0 { STRIPE_EVEN } else { STRIPE_ODD }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellStyle {
    pub background: Rgb,
    pub color: Rgb,
    pub bold: bool,
    pub font_size: u8,
    /// Vertical/horizontal cell padding in pixels.
    pub padding: (u8, u8),
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            background: STRIPE_ODD,
            color: TEXT,
            bold: false,
            font_size: 14,
            padding: (1, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyleDirective {
    pub row_index: usize,
    pub column: ColumnId,
    pub style: CellStyle,
}

/// One fully built tab: rows, tooltips and styles are parallel by row index.
/// Spacer rows get a `None` tooltip and no style directives.
#[derive(Debug, Clone, Serialize)]
pub struct TabOutput {
    pub columns: &'static [ColumnId],
    pub rows: Vec<DisplayRow>,
    pub tooltips: Vec<Option<RowTooltip>>,
    pub styles: Vec<StyleDirective>,
}

impl TabOutput {
    pub fn new(columns: &'static [ColumnId]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            tooltips: Vec::new(),
            styles: Vec::new(),
        }
    }

    pub fn style_at(&self, row_index: usize, column: ColumnId) -> Option<CellStyle> {
        self.styles
            .iter()
            .find(|d| d.row_index == row_index && d.column == column)
            .map(|d| d.style)
    }

    /// Serializes the whole tab (rows, tooltips, style directives) for a
    /// rendering surface that consumes JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Projects a record into its formatted display row. Shared by all tabs.
pub fn display_row(rec: &MatchRecord) -> DisplayRow {
    DisplayRow {
        match_link: rec.match_link.clone(),
        result: String::new(),
        match_date: crate::format::date_link(rec.match_dt, &rec.match_link),
        final_score: rec.final_score.clone(),
        home_name: rec.home_name.clone(),
        away_name: rec.away_name.clone(),
        league: rec.league.clone(),
        home_odds: crate::format::decorated_odds(rec.home_odds, rec.home_open_odds),
        draw_odds: crate::format::decorated_odds(rec.draw_odds, rec.draw_open_odds),
        away_odds: crate::format::decorated_odds(rec.away_odds, rec.away_open_odds),
        total: crate::format::line_or_empty(rec.total),
        handicap: crate::format::line_or_empty(rec.handicap),
    }
}
