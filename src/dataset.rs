//! In-memory odds archive plus its SQLite read adapter.
//!
//! The archive is loaded once at startup and treated as immutable for the
//! process lifetime. Lookups go through indexes by match link and by team id
//! rather than per-query scans.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{Duration, NaiveDateTime};
use rusqlite::{Connection, params};

use crate::record::{MatchRecord, country_from_link};

const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How far ahead of "now" fixtures without a market are still loaded.
const LOAD_HORIZON_DAYS: i64 = 15;

pub struct OddsDataset {
    records: Vec<MatchRecord>,
    by_link: HashMap<String, Vec<usize>>,
    by_team: HashMap<String, Vec<usize>>,
}

impl OddsDataset {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        let mut by_link: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_team: HashMap<String, Vec<usize>> = HashMap::new();
        for (ix, rec) in records.iter().enumerate() {
            by_link.entry(rec.match_link.clone()).or_default().push(ix);
            by_team.entry(rec.home_id.clone()).or_default().push(ix);
            if rec.away_id != rec.home_id {
                by_team.entry(rec.away_id.clone()).or_default().push(ix);
            }
        }
        Self {
            records,
            by_link,
            by_team,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Resolves a match link to its single record. A link shared by more
    /// than one record is reported as ambiguous instead of silently picking
    /// the first.
    pub fn record_by_link(&self, match_link: &str) -> Result<&MatchRecord> {
        let ixs = self
            .by_link
            .get(match_link)
            .ok_or_else(|| anyhow!("unknown match link: {match_link}"))?;
        if ixs.len() > 1 {
            return Err(anyhow!(
                "ambiguous match link: {match_link} resolves to {} records",
                ixs.len()
            ));
        }
        Ok(&self.records[ixs[0]])
    }

    /// All matches a team took part in, home or away, in ingestion order.
    pub fn matches_for_team(&self, team_id: &str) -> Vec<&MatchRecord> {
        self.by_team
            .get(team_id)
            .map(|ixs| ixs.iter().map(|&ix| &self.records[ix]).collect())
            .unwrap_or_default()
    }

    /// Union of both teams' matches, deduplicated, in ingestion order.
    pub fn matches_for_teams(&self, a: &str, b: &str) -> Vec<&MatchRecord> {
        let mut ixs = BTreeSet::new();
        for team in [a, b] {
            if let Some(team_ixs) = self.by_team.get(team) {
                ixs.extend(team_ixs.iter().copied());
            }
        }
        ixs.into_iter().map(|ix| &self.records[ix]).collect()
    }
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS odds_archive (
            match_link TEXT PRIMARY KEY,
            home_id TEXT NOT NULL,
            away_id TEXT NOT NULL,
            home_name TEXT NOT NULL,
            away_name TEXT NOT NULL,
            league TEXT NOT NULL,
            country TEXT NULL,
            match_dt TEXT NOT NULL,
            final_score TEXT NOT NULL,
            home_odds REAL NULL,
            draw_odds REAL NULL,
            away_odds REAL NULL,
            home_open_odds REAL NULL,
            draw_open_odds REAL NULL,
            away_open_odds REAL NULL,
            total REAL NULL,
            handicap REAL NULL,
            pinnacle INTEGER NOT NULL,
            finished INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_odds_home ON odds_archive(home_id);
        CREATE INDEX IF NOT EXISTS idx_odds_away ON odds_archive(away_id);
        CREATE INDEX IF NOT EXISTS idx_odds_dt ON odds_archive(match_dt);
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

pub fn upsert_record(conn: &Connection, rec: &MatchRecord) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO odds_archive (
            match_link, home_id, away_id, home_name, away_name,
            league, country, match_dt, final_score,
            home_odds, draw_odds, away_odds,
            home_open_odds, draw_open_odds, away_open_odds,
            total, handicap, pinnacle, finished
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5,
            ?6, ?7, ?8, ?9,
            ?10, ?11, ?12,
            ?13, ?14, ?15,
            ?16, ?17, ?18, ?19
        )
        ON CONFLICT(match_link) DO UPDATE SET
            home_id = excluded.home_id,
            away_id = excluded.away_id,
            home_name = excluded.home_name,
            away_name = excluded.away_name,
            league = excluded.league,
            country = excluded.country,
            match_dt = excluded.match_dt,
            final_score = excluded.final_score,
            home_odds = excluded.home_odds,
            draw_odds = excluded.draw_odds,
            away_odds = excluded.away_odds,
            home_open_odds = excluded.home_open_odds,
            draw_open_odds = excluded.draw_open_odds,
            away_open_odds = excluded.away_open_odds,
            total = excluded.total,
            handicap = excluded.handicap,
            pinnacle = excluded.pinnacle,
            finished = excluded.finished
        "#,
        params![
            rec.match_link,
            rec.home_id,
            rec.away_id,
            rec.home_name,
            rec.away_name,
            rec.league,
            rec.country,
            rec.match_dt.format(DT_FORMAT).to_string(),
            rec.final_score,
            rec.home_odds,
            rec.draw_odds,
            rec.away_odds,
            rec.home_open_odds,
            rec.draw_open_odds,
            rec.away_open_odds,
            rec.total,
            rec.handicap,
            bool_to_i64(rec.pinnacle),
            bool_to_i64(rec.finished),
        ],
    )
    .context("upsert odds record")?;
    Ok(())
}

/// Loads the browsing window: fixtures inside the next 15 days, plus every
/// match that ever had a market quoted. Country is backfilled from the match
/// link when the column is empty.
pub fn load_records(conn: &Connection, now: NaiveDateTime) -> Result<Vec<MatchRecord>> {
    let horizon = (now + Duration::days(LOAD_HORIZON_DAYS))
        .format(DT_FORMAT)
        .to_string();
    let mut stmt = conn
        .prepare(
            r#"
            SELECT
                match_link, home_id, away_id, home_name, away_name,
                league, country, match_dt, final_score,
                home_odds, draw_odds, away_odds,
                home_open_odds, draw_open_odds, away_open_odds,
                total, handicap, pinnacle, finished
            FROM odds_archive
            WHERE match_dt < ?1 OR home_odds IS NOT NULL
            ORDER BY match_dt ASC, match_link ASC
            "#,
        )
        .context("prepare odds archive query")?;

    let rows = stmt
        .query_map(params![horizon], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, Option<String>>(6)?,
                row.get::<_, String>(7)?,
                row.get::<_, String>(8)?,
                row.get::<_, Option<f64>>(9)?,
                row.get::<_, Option<f64>>(10)?,
                row.get::<_, Option<f64>>(11)?,
                row.get::<_, Option<f64>>(12)?,
                row.get::<_, Option<f64>>(13)?,
                row.get::<_, Option<f64>>(14)?,
                row.get::<_, Option<f64>>(15)?,
                row.get::<_, Option<f64>>(16)?,
                row.get::<_, i64>(17)?,
                row.get::<_, i64>(18)?,
            ))
        })
        .context("query odds archive")?;

    let mut out = Vec::new();
    for row in rows {
        let (
            match_link,
            home_id,
            away_id,
            home_name,
            away_name,
            league,
            country,
            match_dt,
            final_score,
            home_odds,
            draw_odds,
            away_odds,
            home_open_odds,
            draw_open_odds,
            away_open_odds,
            total,
            handicap,
            pinnacle,
            finished,
        ) = row.context("decode odds row")?;
        let match_dt = NaiveDateTime::parse_from_str(&match_dt, DT_FORMAT)
            .with_context(|| format!("bad match_dt for {match_link}"))?;
        let country = country
            .filter(|c| !c.is_empty())
            .or_else(|| country_from_link(&match_link))
            .unwrap_or_default();
        out.push(MatchRecord {
            match_link,
            home_id,
            away_id,
            home_name,
            away_name,
            league,
            country,
            match_dt,
            final_score,
            home_odds,
            draw_odds,
            away_odds,
            home_open_odds,
            draw_open_odds,
            away_open_odds,
            total,
            handicap,
            pinnacle: pinnacle != 0,
            finished: finished != 0,
        });
    }
    Ok(out)
}

pub fn load_dataset(conn: &Connection, now: NaiveDateTime) -> Result<OddsDataset> {
    Ok(OddsDataset::new(load_records(conn, now)?))
}

fn bool_to_i64(v: bool) -> i64 {
    if v { 1 } else { 0 }
}
