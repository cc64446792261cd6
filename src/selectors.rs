//! Drill-down selector options: countries, leagues per country and the
//! upcoming-match list per league.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use crate::dataset::OddsDataset;
use crate::record::MatchRecord;

pub const TOP_COUNTRIES: &[&str] = &[
    "england", "spain", "italy", "france", "germany", "turkey", "europe",
];

static TOP_COUNTRY_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| TOP_COUNTRIES.iter().copied().collect());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryFilter {
    Top,
    All,
}

impl CountryFilter {
    pub fn toggle(self) -> Self {
        match self {
            CountryFilter::Top => CountryFilter::All,
            CountryFilter::All => CountryFilter::Top,
        }
    }
}

/// One entry of the match dropdown. `None` link means "All matches", which
/// falls back to the league fixtures view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOption {
    pub label: String,
    pub link: Option<String>,
}

pub fn country_options(data: &OddsDataset, filter: CountryFilter) -> Vec<String> {
    let countries: BTreeSet<&str> = data
        .records()
        .iter()
        .map(|r| r.country.as_str())
        .filter(|c| !c.is_empty())
        .filter(|c| filter == CountryFilter::All || TOP_COUNTRY_SET.contains(c))
        .collect();
    countries.into_iter().map(|c| c.to_string()).collect()
}

/// Leagues of a country, ordered by their trailing character so numbered
/// divisions ("LaLiga", "LaLiga2") line up.
pub fn league_options(data: &OddsDataset, country: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut leagues: Vec<String> = data
        .records()
        .iter()
        .filter(|r| r.country == country)
        .filter(|r| seen.insert(r.league.clone()))
        .map(|r| r.league.clone())
        .collect();
    leagues.sort_by_key(|league| league.chars().last());
    leagues
}

/// Upcoming unfinished fixtures of a league from the given day onward,
/// earliest kickoff first, preceded by the "All matches" entry.
pub fn match_options(
    data: &OddsDataset,
    country: &str,
    league: &str,
    today: NaiveDate,
) -> Vec<MatchOption> {
    let day_start = today.and_hms_opt(0, 0, 0).unwrap_or_default();
    let mut fixtures: Vec<&MatchRecord> = data
        .records()
        .iter()
        .filter(|r| r.country == country && r.league == league)
        .filter(|r| !r.finished && r.match_dt >= day_start)
        .collect();
    fixtures.sort_by_key(|r| r.match_dt);

    let mut options = vec![MatchOption {
        label: "All matches".to_string(),
        link: None,
    }];
    options.extend(fixtures.into_iter().map(|r| MatchOption {
        label: format!("{} | {}", r.match_dt.format("%d.%m"), r.match_label()),
        link: Some(r.match_link.clone()),
    }));
    options
}
