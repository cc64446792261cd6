//! Cell formatting helpers: 2-decimal odds, open-vs-closing direction
//! markers, linked date strings and tooltip text. All of these are
//! permissive: a missing value renders as a placeholder instead of failing.

use chrono::NaiveDateTime;

use crate::record::MatchRecord;
use crate::table::RowTooltip;

pub const ODDS_PLACEHOLDER: &str = "-";
pub const UP_MARKER: char = '\u{25b2}'; // ▲
pub const DOWN_MARKER: char = '\u{25bc}'; // ▼

/// Formats a quoted price with two decimals; absent or non-positive
/// prices render as "-".
pub fn odds_2_decimal(odds: Option<f64>) -> String {
    match odds {
        Some(o) if o > 0.0 => format!("{o:.2}"),
        _ => ODDS_PLACEHOLDER.to_string(),
    }
}

/// Prefixes a direction marker by comparing the raw closing and opening
/// prices. The decision never looks at the display string, so re-formatting
/// a row can not stack markers. Rows without both prices pass through
/// unmarked.
pub fn mark_direction(display: String, odds: Option<f64>, open_odds: Option<f64>) -> String {
    let (Some(odds), Some(open)) = (odds, open_odds) else {
        return display;
    };
    if odds > open {
        format!("{UP_MARKER}{display}")
    } else if open > odds {
        format!("{DOWN_MARKER}{display}")
    } else {
        display
    }
}

pub fn decorated_odds(odds: Option<f64>, open_odds: Option<f64>) -> String {
    mark_direction(odds_2_decimal(odds), odds, open_odds)
}

/// Match date rendered as markdown-style link text, `**[dd.mm.yyyy](link)**`.
pub fn date_link(dt: NaiveDateTime, link: &str) -> String {
    format!("**[{}]({link})**", dt.format("%d.%m.%Y"))
}

/// Over/under and handicap lines are shown raw; empty when absent.
pub fn line_or_empty(line: Option<f64>) -> String {
    line.map(|v| v.to_string()).unwrap_or_default()
}

fn raw_or_placeholder(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| ODDS_PLACEHOLDER.to_string())
}

/// Opening odds tooltip, as used by the league fixtures tab.
pub fn open_odds_tooltip(rec: &MatchRecord) -> RowTooltip {
    RowTooltip {
        home_odds: raw_or_placeholder(rec.home_open_odds),
        draw_odds: raw_or_placeholder(rec.draw_open_odds),
        away_odds: raw_or_placeholder(rec.away_open_odds),
    }
}

/// Opening odds tooltip for the match-history tabs: the home side also
/// carries the handicap line.
pub fn match_tooltip(rec: &MatchRecord) -> RowTooltip {
    let mut tooltip = open_odds_tooltip(rec);
    tooltip.home_odds = format!(
        "{} | {}",
        tooltip.home_odds,
        raw_or_placeholder(rec.handicap)
    );
    tooltip
}
