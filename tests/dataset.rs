use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;

use oddstab::dataset::{init_schema, load_dataset, upsert_record};
use oddstab::record::MatchRecord;

fn dt(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(19, 0, 0)
        .expect("valid time")
}

fn rec(link: &str, home: &str, away: &str, date: NaiveDateTime) -> MatchRecord {
    MatchRecord {
        match_link: link.to_string(),
        home_id: home.to_string(),
        away_id: away.to_string(),
        home_name: home.to_uppercase(),
        away_name: away.to_uppercase(),
        league: "LaLiga".to_string(),
        country: String::new(),
        match_dt: date,
        final_score: "-:-".to_string(),
        home_odds: Some(2.0),
        draw_odds: Some(3.2),
        away_odds: Some(3.8),
        home_open_odds: Some(2.0),
        draw_open_odds: Some(3.2),
        away_open_odds: Some(3.8),
        total: Some(2.75),
        handicap: Some(-0.25),
        pinnacle: true,
        finished: false,
    }
}

fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    init_schema(&conn).expect("schema");
    conn
}

#[test]
fn load_window_keeps_near_fixtures_and_all_market_matches() {
    let conn = test_conn();
    let now = dt(2026, 9, 1);

    // Inside the 15-day window, no market yet.
    let mut near = rec(
        "https://x/soccer/spain/laliga/near/",
        "a",
        "b",
        dt(2026, 9, 10),
    );
    near.home_odds = None;
    upsert_record(&conn, &near).expect("upsert");

    // Beyond the window and without a market: filtered out.
    let mut far = rec(
        "https://x/soccer/spain/laliga/far/",
        "c",
        "d",
        dt(2026, 10, 20),
    );
    far.home_odds = None;
    upsert_record(&conn, &far).expect("upsert");

    // Beyond the window but priced: kept.
    let priced = rec(
        "https://x/soccer/spain/laliga/priced/",
        "e",
        "f",
        dt(2026, 10, 20),
    );
    upsert_record(&conn, &priced).expect("upsert");

    let data = load_dataset(&conn, now).expect("load");
    let links: Vec<&str> = data.records().iter().map(|r| r.match_link.as_str()).collect();
    assert_eq!(
        links,
        vec![
            "https://x/soccer/spain/laliga/near/",
            "https://x/soccer/spain/laliga/priced/"
        ]
    );
}

#[test]
fn country_is_backfilled_from_the_match_link() {
    let conn = test_conn();
    upsert_record(
        &conn,
        &rec("https://x/soccer/turkey/super-lig/m/", "a", "b", dt(2026, 9, 2)),
    )
    .expect("upsert");

    let data = load_dataset(&conn, dt(2026, 9, 1)).expect("load");
    assert_eq!(data.records()[0].country, "turkey");
}

#[test]
fn upsert_replaces_by_match_link() {
    let conn = test_conn();
    let link = "https://x/soccer/spain/laliga/m/";
    let mut m = rec(link, "a", "b", dt(2026, 9, 2));
    upsert_record(&conn, &m).expect("insert");
    m.final_score = "2:1".to_string();
    m.finished = true;
    upsert_record(&conn, &m).expect("update");

    let data = load_dataset(&conn, dt(2026, 9, 1)).expect("load");
    assert_eq!(data.len(), 1);
    assert_eq!(data.records()[0].final_score, "2:1");
    assert!(data.records()[0].finished);

    let found = data.record_by_link(link).expect("unique link");
    assert_eq!(found.home_id, "a");
}

#[test]
fn team_index_covers_both_sides() {
    let conn = test_conn();
    upsert_record(&conn, &rec("https://x/soccer/spain/laliga/m1/", "a", "b", dt(2026, 9, 2)))
        .expect("upsert");
    upsert_record(&conn, &rec("https://x/soccer/spain/laliga/m2/", "c", "a", dt(2026, 9, 3)))
        .expect("upsert");
    upsert_record(&conn, &rec("https://x/soccer/spain/laliga/m3/", "c", "d", dt(2026, 9, 4)))
        .expect("upsert");

    let data = load_dataset(&conn, dt(2026, 9, 1)).expect("load");
    assert_eq!(data.matches_for_team("a").len(), 2);
    assert_eq!(data.matches_for_team("d").len(), 1);
    assert_eq!(data.matches_for_team("zz").len(), 0);
    assert_eq!(data.matches_for_teams("a", "d").len(), 3);
}
