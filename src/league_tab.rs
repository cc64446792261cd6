//! Upcoming-fixtures tab for one country and league, oldest kickoff first.

use crate::dataset::OddsDataset;
use crate::format::open_odds_tooltip;
use crate::record::MatchRecord;
use crate::table::{
    CellStyle, ColumnId, LEAGUE_COLUMNS, StyleDirective, TabOutput, display_row, stripe,
};

pub fn league_odds_tab(data: &OddsDataset, country: &str, league: &str) -> TabOutput {
    let mut fixtures: Vec<&MatchRecord> = data
        .records()
        .iter()
        .filter(|r| r.country == country && r.league == league && !r.finished)
        .collect();
    fixtures.sort_by_key(|r| r.match_dt);

    let mut out = TabOutput::new(LEAGUE_COLUMNS);
    for (row_ix, rec) in fixtures.iter().enumerate() {
        out.rows.push(display_row(rec));
        out.tooltips.push(Some(open_odds_tooltip(rec)));

        for &col in LEAGUE_COLUMNS {
            let mut style = CellStyle {
                background: stripe(row_ix),
                font_size: 15,
                padding: (2, 4),
                ..CellStyle::default()
            };
            match col {
                ColumnId::HomeName | ColumnId::AwayName => style.bold = true,
                ColumnId::Total | ColumnId::Handicap => {
                    style.padding = (2, 12);
                    style.font_size = 14;
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
    out
}
