//! Leaderboard and analytics aggregation.
//!
//! Everything here is a pure function over rows already loaded from the
//! database, so the ranking rules can be tested without a connection.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, Utc};
use common::{SubmissionKind, Verdict};
use serde::Serialize;

use crate::entity::{submission, team, team_completion};
use crate::error::AppError;
use crate::utils::language::language_name;

/// Lookback window for analytics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Window {
    Days7,
    #[default]
    Days30,
    Days90,
    All,
}

impl Window {
    pub fn days(self) -> Option<u64> {
        match self {
            Self::Days7 => Some(7),
            Self::Days30 => Some(30),
            Self::Days90 => Some(90),
            Self::All => None,
        }
    }

    /// First calendar day inside the window, counting `today` as day one.
    pub fn first_day(self, today: NaiveDate) -> Option<NaiveDate> {
        self.days()
            .map(|d| today.checked_sub_days(Days::new(d - 1)).unwrap_or(NaiveDate::MIN))
    }

    /// Earliest timestamp inside the window.
    pub fn since(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.first_day(now.date_naive())
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|t| t.and_utc())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Days7 => "7d",
            Self::Days30 => "30d",
            Self::Days90 => "90d",
            Self::All => "all",
        }
    }
}

impl FromStr for Window {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7d" => Ok(Self::Days7),
            "30d" => Ok(Self::Days30),
            "90d" => Ok(Self::Days90),
            "all" => Ok(Self::All),
            _ => Err(AppError::Validation(
                "Range must be one of: 7d, 30d, 90d, all".into(),
            )),
        }
    }
}

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct TeamStanding {
    /// 1-based, contiguous.
    #[schema(example = 1)]
    pub rank: u32,
    pub team_id: i32,
    #[schema(example = "Null Pointers")]
    pub team_name: String,
    #[schema(example = 300)]
    pub total_points: i64,
    #[schema(example = 2)]
    pub challenges_completed: u32,
    /// Accepted share of the team's submissions, in percent.
    #[schema(example = 66.67)]
    pub average_score: f64,
    pub last_submission: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub algorithmic: u32,
    pub buildathon: u32,
    pub total: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct LanguageUsage {
    #[schema(example = "Python")]
    pub language: String,
    pub count: u32,
    /// Share of algorithmic submissions, in percent.
    #[schema(example = 42.5)]
    pub percentage: f64,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round2(part as f64 / whole as f64 * 100.0)
    }
}

fn in_window(at: DateTime<Utc>, since: Option<DateTime<Utc>>) -> bool {
    since.is_none_or(|t| at >= t)
}

#[derive(Default)]
struct Tally {
    submitted: u64,
    accepted: u64,
    /// challenge id -> points earned
    completed: BTreeMap<i32, i64>,
    last: Option<DateTime<Utc>>,
}

/// Rank `teams` by the points recorded in `completions` at or after `since`.
///
/// Completion rows are the award ledger, so a challenge counts once per team
/// with exactly the points that were added to the team's total. Submissions
/// only feed the activity columns. Ties keep the order of `teams`.
pub fn standings(
    teams: &[team::Model],
    completions: &[team_completion::Model],
    submissions: &[submission::Model],
    since: Option<DateTime<Utc>>,
) -> Vec<TeamStanding> {
    let mut tallies: HashMap<i32, Tally> = HashMap::new();

    for s in submissions.iter().filter(|s| in_window(s.created_at, since)) {
        let tally = tallies.entry(s.team_id).or_default();
        tally.submitted += 1;
        tally.last = tally.last.max(Some(s.created_at));
        if s.verdict == Verdict::Accepted {
            tally.accepted += 1;
        }
    }

    for c in completions.iter().filter(|c| in_window(c.completed_at, since)) {
        tallies
            .entry(c.team_id)
            .or_default()
            .completed
            .insert(c.challenge_id, c.points as i64);
    }

    let mut rows: Vec<TeamStanding> = teams
        .iter()
        .map(|t| {
            let tally = tallies.remove(&t.id).unwrap_or_default();
            TeamStanding {
                rank: 0,
                team_id: t.id,
                team_name: t.name.clone(),
                total_points: tally.completed.values().sum(),
                challenges_completed: tally.completed.len() as u32,
                average_score: percentage(tally.accepted, tally.submitted),
                last_submission: tally.last,
            }
        })
        .collect();

    // `sort_by` is stable: equal totals keep their input order.
    rows.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }
    rows
}

/// Per-day submission counts split by kind.
///
/// Bounded windows yield every day from the window start to `today`, zeros
/// included. [`Window::All`] starts at the earliest submission day and is
/// empty when there are no submissions.
pub fn daily_series(
    submissions: &[submission::Model],
    window: Window,
    today: NaiveDate,
) -> Vec<DailyCount> {
    let first = match window.first_day(today) {
        Some(day) => day,
        None => match submissions.iter().map(|s| s.created_at.date_naive()).min() {
            Some(day) => day,
            None => return Vec::new(),
        },
    };

    let mut days: BTreeMap<NaiveDate, DailyCount> = first
        .iter_days()
        .take_while(|d| *d <= today)
        .map(|date| {
            let empty = DailyCount {
                date,
                algorithmic: 0,
                buildathon: 0,
                total: 0,
            };
            (date, empty)
        })
        .collect();

    for s in submissions {
        let Some(day) = days.get_mut(&s.created_at.date_naive()) else {
            continue;
        };
        match s.kind {
            SubmissionKind::Algorithmic => day.algorithmic += 1,
            SubmissionKind::Buildathon => day.buildathon += 1,
        }
        day.total += 1;
    }

    days.into_values().collect()
}

/// Language histogram over algorithmic submissions, most used first.
pub fn language_usage(submissions: &[submission::Model]) -> Vec<LanguageUsage> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut total = 0u64;
    for s in submissions {
        let Some(language_id) = s.language_id.filter(|_| s.kind == SubmissionKind::Algorithmic)
        else {
            continue;
        };
        *counts.entry(language_name(language_id).into_owned()).or_default() += 1;
        total += 1;
    }

    let mut usage: Vec<LanguageUsage> = counts
        .into_iter()
        .map(|(language, count)| LanguageUsage {
            percentage: percentage(count as u64, total),
            language,
            count,
        })
        .collect();
    usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.language.cmp(&b.language)));
    usage
}
