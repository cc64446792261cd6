//! Match-history tab for one side of the selected fixture: every match the
//! team played, newest first, with a result color column seen from that
//! team's perspective.

use std::cmp::Reverse;

use anyhow::Result;

use crate::dataset::OddsDataset;
use crate::format::match_tooltip;
use crate::record::{MatchRecord, Outcome};
use crate::table::{
    CellStyle, ColumnId, DRAW_BG, LOSS_BG, OFF_BOOK_TEXT, SELECTED_BG, StyleDirective, TEAM_COLUMNS,
    TabOutput, WIN_BG, WINNER_ODDS_BG, display_row, stripe,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

pub fn team_odds_tab(data: &OddsDataset, match_link: &str, side: Side) -> Result<TabOutput> {
    let selected = data.record_by_link(match_link)?;
    let team_id = match side {
        Side::Home => selected.home_id.as_str(),
        Side::Away => selected.away_id.as_str(),
    };

    let mut matches: Vec<&MatchRecord> = data.matches_for_team(team_id);
    matches.sort_by_key(|r| Reverse(r.match_dt));

    let mut out = TabOutput::new(TEAM_COLUMNS);
    for (row_ix, rec) in matches.iter().enumerate() {
        out.rows.push(display_row(rec));
        out.tooltips.push(Some(match_tooltip(rec)));

        let outcome = rec.outcome();
        for &col in TEAM_COLUMNS {
            let mut style = CellStyle::default();
            match col {
                ColumnId::HomeName if rec.home_id == team_id => style.bold = true,
                ColumnId::AwayName if rec.away_id == team_id => style.bold = true,
                ColumnId::League => style.font_size = 13,
                ColumnId::FinalScore => {
                    style.font_size = 15;
                    style.bold = true;
                    style.padding = (1, 3);
                }
                ColumnId::Total => style.font_size = 13,
                _ => {}
            }

            style.background = if rec.match_link == match_link {
                SELECTED_BG
            } else {
                stripe(row_ix)
            };

            match col {
                ColumnId::HomeOdds => {
                    if outcome == Some(Outcome::Home) {
                        style.background = WINNER_ODDS_BG;
                    }
                    if !rec.pinnacle {
                        style.color = OFF_BOOK_TEXT;
                    }
                }
                ColumnId::DrawOdds => {
                    if outcome == Some(Outcome::Draw) {
                        style.background = WINNER_ODDS_BG;
                    }
                    if !rec.pinnacle {
                        style.color = OFF_BOOK_TEXT;
                    }
                }
                ColumnId::AwayOdds => {
                    style.padding = (1, 3);
                    if outcome == Some(Outcome::Away) {
                        style.background = WINNER_ODDS_BG;
                    }
                    if !rec.pinnacle {
                        style.color = OFF_BOOK_TEXT;
                    }
                }
                ColumnId::Result => {
                    if let Some(outcome) = outcome {
                        style.padding = (1, 3);
                        style.background = result_color(outcome, rec, team_id);
                    }
                }
                _ => {}
            }

            out.styles.push(StyleDirective {
                row_index: row_ix,
                column: col,
                style,
            });
        }
    }
    Ok(out)
}

/// Green when the selected team won, orange for a draw, red otherwise.
fn result_color(outcome: Outcome, rec: &MatchRecord, team_id: &str) -> crate::table::Rgb {
    match outcome {
        Outcome::Home if rec.home_id == team_id => WIN_BG,
        Outcome::Away if rec.away_id == team_id => WIN_BG,
        Outcome::Draw => DRAW_BG,
        _ => LOSS_BG,
    }
}
