//! Head-to-head tab builder.
//!
//! For the selected fixture this produces, top to bottom: every direct past
//! meeting of the two teams, then one block per common rival with up to four
//! of the most recent meetings either team had against that rival. Each
//! section is closed by a blank spacer row, including an empty direct
//! section. Rivals that only ever faced one of the two teams are dropped.

use std::cmp::Reverse;
use std::collections::HashSet;

use anyhow::Result;

use crate::dataset::OddsDataset;
use crate::format::match_tooltip;
use crate::record::{MatchRecord, Outcome};
use crate::table::{
    CellStyle, ColumnId, DisplayRow, H2H_COLUMNS, OFF_BOOK_TEXT, SELECTED_BG, StyleDirective,
    TabOutput, WINNER_ODDS_BG, display_row, stripe,
};

/// Most recent meetings kept per common rival.
const RIVAL_BLOCK_CAP: usize = 4;

pub fn h2h_tab(data: &OddsDataset, match_link: &str) -> Result<TabOutput> {
    let selected = data.record_by_link(match_link)?;
    let home_id = selected.home_id.as_str();
    let away_id = selected.away_id.as_str();

    // Direct meetings with a market, newest first.
    let mut direct: Vec<&MatchRecord> = data
        .matches_for_team(home_id)
        .into_iter()
        .filter(|r| r.is_between(home_id, away_id) && r.has_market())
        .collect();
    sort_newest_first(&mut direct);

    let mut sections: Vec<Option<&MatchRecord>> = direct.into_iter().map(Some).collect();
    sections.push(None);

    // Every market match either team played, newest first. Walking this
    // order means rivals appear by their most recent fixture against
    // either team.
    let mut teams_matches: Vec<&MatchRecord> = data
        .matches_for_teams(home_id, away_id)
        .into_iter()
        .filter(|r| r.has_market())
        .collect();
    sort_newest_first(&mut teams_matches);

    let mut checked_rivals: HashSet<&str> = HashSet::from([home_id, away_id]);
    for rec in &teams_matches {
        let rival = if rec.home_id != home_id && rec.home_id != away_id {
            rec.home_id.as_str()
        } else {
            rec.away_id.as_str()
        };
        if !checked_rivals.insert(rival) {
            continue;
        }

        let with_home: Vec<&MatchRecord> = teams_matches
            .iter()
            .copied()
            .filter(|r| r.is_between(home_id, rival))
            .collect();
        let with_away: Vec<&MatchRecord> = teams_matches
            .iter()
            .copied()
            .filter(|r| r.is_between(away_id, rival))
            .collect();
        // A rival qualifies only with history against both teams.
        if with_home.is_empty() || with_away.is_empty() {
            continue;
        }

        let mut block = with_home;
        block.extend(with_away);
        sort_newest_first(&mut block);
        block.truncate(RIVAL_BLOCK_CAP);
        sections.extend(block.into_iter().map(Some));
        sections.push(None);
    }

    let mut out = TabOutput::new(H2H_COLUMNS);
    for (row_ix, section) in sections.iter().enumerate() {
        let Some(rec) = section else {
            out.rows.push(DisplayRow::spacer());
            out.tooltips.push(None);
            continue;
        };

        out.rows.push(display_row(rec));
        out.tooltips.push(Some(match_tooltip(rec)));

        let outcome = rec.outcome();
        for &col in H2H_COLUMNS {
            let mut style = CellStyle::default();
            match col {
                ColumnId::HomeName if rec.home_id == home_id || rec.home_id == away_id => {
                    style.bold = true;
                }
                ColumnId::AwayName if rec.away_id == home_id || rec.away_id == away_id => {
                    style.bold = true;
                }
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

/// Stable date-descending sort; ties keep ingestion order.
fn sort_newest_first(matches: &mut [&MatchRecord]) {
    matches.sort_by_key(|r| Reverse(r.match_dt));
}
