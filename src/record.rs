use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Score string used while a match has no result.
pub const NO_RESULT_SCORE: &str = "-:-";

/// One row of the odds archive: a fixture with its market prices.
///
/// `match_link` is the globally unique join key; everything else hangs off it.
/// Closing odds of `None` (or zero) mean no market was ever quoted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_link: String,
    pub home_id: String,
    pub away_id: String,
    pub home_name: String,
    pub away_name: String,
    pub league: String,
    pub country: String,
    pub match_dt: NaiveDateTime,
    pub final_score: String,
    pub home_odds: Option<f64>,
    pub draw_odds: Option<f64>,
    pub away_odds: Option<f64>,
    pub home_open_odds: Option<f64>,
    pub draw_open_odds: Option<f64>,
    pub away_open_odds: Option<f64>,
    pub total: Option<f64>,
    pub handicap: Option<f64>,
    pub pinnacle: bool,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Home,
    Away,
    Draw,
}

impl MatchRecord {
    pub fn outcome(&self) -> Option<Outcome> {
        parse_outcome(&self.final_score)
    }

    /// Whether a market existed for this match (home price quoted and positive).
    pub fn has_market(&self) -> bool {
        self.home_odds.is_some_and(|o| o > 0.0)
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.home_id == team_id || self.away_id == team_id
    }

    /// True when the fixture is strictly between the two given teams
    /// (either side at home).
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.home_id == a && self.away_id == b) || (self.home_id == b && self.away_id == a)
    }

    pub fn match_label(&self) -> String {
        format!("{} vs {}", self.home_name, self.away_name)
    }
}

/// Derives the match outcome from a "H:A" score string by comparing goal
/// counts. The no-result sentinel and anything unparseable yield `None`.
pub fn parse_outcome(score: &str) -> Option<Outcome> {
    if score == NO_RESULT_SCORE {
        return None;
    }
    let (home, away) = score.split_once(':')?;
    let home_goals = home.trim().parse::<u32>().ok()?;
    let away_goals = away.trim().parse::<u32>().ok()?;
    if home_goals > away_goals {
        Some(Outcome::Home)
    } else if away_goals > home_goals {
        Some(Outcome::Away)
    } else {
        Some(Outcome::Draw)
    }
}

/// Pulls the country slug out of a match link of the form
/// `https://host/soccer/<country>/<league>/<fixture>`.
pub fn country_from_link(link: &str) -> Option<String> {
    let rest = link.split_once("soccer/")?.1;
    let country = rest.split('/').next()?;
    if country.is_empty() {
        return None;
    }
    Some(country.to_string())
}
