use chrono::{NaiveDate, NaiveDateTime};

use oddstab::dataset::OddsDataset;
use oddstab::league_tab::league_odds_tab;
use oddstab::record::MatchRecord;
use oddstab::selectors::{CountryFilter, country_options, league_options, match_options};
use oddstab::table::{ColumnId, DRAW_BG, LOSS_BG, SELECTED_BG, STRIPE_EVEN, STRIPE_ODD, WIN_BG};
use oddstab::team_tab::{Side, team_odds_tab};

fn dt(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(20, 30, 0)
        .expect("valid time")
}

fn rec(link: &str, home: &str, away: &str, date: NaiveDateTime, score: &str) -> MatchRecord {
    MatchRecord {
        match_link: link.to_string(),
        home_id: home.to_string(),
        away_id: away.to_string(),
        home_name: home.to_uppercase(),
        away_name: away.to_uppercase(),
        league: "LaLiga".to_string(),
        country: "spain".to_string(),
        match_dt: date,
        final_score: score.to_string(),
        home_odds: Some(1.85),
        draw_odds: Some(3.4),
        away_odds: Some(4.2),
        home_open_odds: Some(1.95),
        draw_open_odds: Some(3.4),
        away_open_odds: Some(4.0),
        total: Some(2.5),
        handicap: Some(-0.75),
        pinnacle: true,
        finished: score != "-:-",
    }
}

fn in_league(mut m: MatchRecord, country: &str, league: &str) -> MatchRecord {
    m.country = country.to_string();
    m.league = league.to_string();
    m
}

#[test]
fn league_tab_lists_unfinished_fixtures_oldest_first() {
    let data = OddsDataset::new(vec![
        rec("m2", "a", "b", dt(2026, 9, 12), "-:-"),
        rec("m1", "c", "d", dt(2026, 9, 5), "-:-"),
        rec("old", "a", "d", dt(2026, 8, 1), "2:0"),
        in_league(rec("other", "e", "f", dt(2026, 9, 6), "-:-"), "spain", "LaLiga2"),
    ]);

    let tab = league_odds_tab(&data, "spain", "LaLiga");
    let links: Vec<&str> = tab.rows.iter().map(|r| r.match_link.as_str()).collect();
    assert_eq!(links, vec!["m1", "m2"]);

    // Zebra striping by row parity, bold team names.
    assert_eq!(
        tab.style_at(0, ColumnId::MatchDate).expect("styled").background,
        STRIPE_EVEN
    );
    assert_eq!(
        tab.style_at(1, ColumnId::MatchDate).expect("styled").background,
        STRIPE_ODD
    );
    assert!(tab.style_at(0, ColumnId::HomeName).expect("styled").bold);
    assert!(!tab.style_at(0, ColumnId::HomeOdds).expect("styled").bold);

    // Odds dropped from 1.95 to 1.85, so the home cell carries a down marker.
    assert_eq!(tab.rows[0].home_odds, "\u{25bc}1.85");
    assert_eq!(tab.rows[0].draw_odds, "3.40");
    assert_eq!(tab.rows[0].away_odds, "\u{25b2}4.20");

    let tooltip = tab.tooltips[0].as_ref().expect("tooltip");
    assert_eq!(tooltip.home_odds, "1.95");

    let json = tab.to_json().expect("tab serializes");
    assert!(json.contains("\"row_index\""));
    assert!(json.contains("\"home_odds\""));
}

#[test]
fn team_tab_is_newest_first_and_highlights_selection() {
    let data = OddsDataset::new(vec![
        rec("sel", "a", "b", dt(2026, 9, 5), "-:-"),
        rec("m1", "a", "c", dt(2026, 8, 1), "2:0"),
        rec("m2", "d", "a", dt(2026, 8, 20), "1:1"),
        rec("m3", "b", "c", dt(2026, 8, 10), "0:3"),
    ]);

    let tab = team_odds_tab(&data, "sel", Side::Home).expect("team tab builds");
    let links: Vec<&str> = tab.rows.iter().map(|r| r.match_link.as_str()).collect();
    // Only team a's matches, date descending.
    assert_eq!(links, vec!["sel", "m2", "m1"]);

    let sel_style = tab.style_at(0, ColumnId::League).expect("styled");
    assert_eq!(sel_style.background, SELECTED_BG);

    // Team a's name is bold on whichever side it played.
    assert!(tab.style_at(1, ColumnId::AwayName).expect("styled").bold);
    assert!(!tab.style_at(1, ColumnId::HomeName).expect("styled").bold);
    assert!(tab.style_at(2, ColumnId::HomeName).expect("styled").bold);
}

#[test]
fn team_tab_result_column_reflects_team_perspective() {
    let data = OddsDataset::new(vec![
        rec("sel", "a", "b", dt(2026, 9, 5), "-:-"),
        rec("won_home", "a", "c", dt(2026, 8, 4), "2:0"),
        rec("lost_away", "c", "a", dt(2026, 8, 3), "1:0"),
        rec("drew", "a", "d", dt(2026, 8, 2), "1:1"),
        rec("won_away", "d", "a", dt(2026, 8, 1), "0:2"),
    ]);

    let tab = team_odds_tab(&data, "sel", Side::Home).expect("team tab builds");
    let links: Vec<&str> = tab.rows.iter().map(|r| r.match_link.as_str()).collect();
    assert_eq!(links, vec!["sel", "won_home", "lost_away", "drew", "won_away"]);

    // Unplayed selected fixture gets no result color override.
    let sel = tab.style_at(0, ColumnId::Result).expect("styled");
    assert_eq!(sel.background, SELECTED_BG);

    assert_eq!(tab.style_at(1, ColumnId::Result).expect("styled").background, WIN_BG);
    assert_eq!(tab.style_at(2, ColumnId::Result).expect("styled").background, LOSS_BG);
    assert_eq!(tab.style_at(3, ColumnId::Result).expect("styled").background, DRAW_BG);
    assert_eq!(tab.style_at(4, ColumnId::Result).expect("styled").background, WIN_BG);
}

#[test]
fn team_tab_away_side_resolves_other_team() {
    let data = OddsDataset::new(vec![
        rec("sel", "a", "b", dt(2026, 9, 5), "-:-"),
        rec("m1", "b", "c", dt(2026, 8, 1), "1:0"),
        rec("m2", "a", "c", dt(2026, 8, 2), "1:0"),
    ]);

    let tab = team_odds_tab(&data, "sel", Side::Away).expect("team tab builds");
    let links: Vec<&str> = tab.rows.iter().map(|r| r.match_link.as_str()).collect();
    assert_eq!(links, vec!["sel", "m1"]);
}

#[test]
fn non_pinnacle_prices_are_grayed() {
    let mut off_book = rec("m1", "a", "c", dt(2026, 8, 1), "2:0");
    off_book.pinnacle = false;
    let data = OddsDataset::new(vec![rec("sel", "a", "b", dt(2026, 9, 5), "-:-"), off_book]);

    let tab = team_odds_tab(&data, "sel", Side::Home).expect("team tab builds");
    assert_eq!(
        tab.style_at(1, ColumnId::HomeOdds).expect("styled").color,
        oddstab::table::OFF_BOOK_TEXT
    );
    assert_eq!(
        tab.style_at(0, ColumnId::HomeOdds).expect("styled").color,
        oddstab::table::TEXT
    );
}

#[test]
fn country_options_respect_top_filter() {
    let data = OddsDataset::new(vec![
        in_league(rec("m1", "a", "b", dt(2026, 9, 1), "-:-"), "spain", "LaLiga"),
        in_league(rec("m2", "c", "d", dt(2026, 9, 1), "-:-"), "england", "PL"),
        in_league(rec("m3", "e", "f", dt(2026, 9, 1), "-:-"), "peru", "Liga1"),
    ]);

    assert_eq!(
        country_options(&data, CountryFilter::Top),
        vec!["england", "spain"]
    );
    assert_eq!(
        country_options(&data, CountryFilter::All),
        vec!["england", "peru", "spain"]
    );
}

#[test]
fn league_options_sort_numbered_divisions_together() {
    let data = OddsDataset::new(vec![
        in_league(rec("m1", "a", "b", dt(2026, 9, 1), "-:-"), "spain", "LaLiga2"),
        in_league(rec("m2", "c", "d", dt(2026, 9, 2), "-:-"), "spain", "LaLiga"),
        in_league(rec("m3", "e", "f", dt(2026, 9, 3), "-:-"), "spain", "LaLiga"),
        in_league(rec("m4", "g", "h", dt(2026, 9, 4), "-:-"), "italy", "SerieA"),
    ]);

    // Trailing-character order groups numbered divisions; italy is excluded.
    assert_eq!(league_options(&data, "spain"), vec!["LaLiga2", "LaLiga"]);
}

#[test]
fn match_options_start_with_all_matches() {
    let today = NaiveDate::from_ymd_opt(2026, 9, 3).expect("valid date");
    let data = OddsDataset::new(vec![
        rec("m1", "a", "b", dt(2026, 9, 5), "-:-"),
        rec("m2", "c", "d", dt(2026, 9, 4), "-:-"),
        // Played and in the past: both excluded.
        rec("m3", "e", "f", dt(2026, 9, 10), "2:0"),
        rec("m4", "g", "h", dt(2026, 9, 1), "-:-"),
    ]);

    let options = match_options(&data, "spain", "LaLiga", today);
    assert_eq!(options.len(), 3);
    assert_eq!(options[0].label, "All matches");
    assert_eq!(options[0].link, None);
    assert_eq!(options[1].label, "04.09 | C vs D");
    assert_eq!(options[1].link.as_deref(), Some("m2"));
    assert_eq!(options[2].link.as_deref(), Some("m1"));
}
