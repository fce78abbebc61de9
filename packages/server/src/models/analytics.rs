use serde::{Deserialize, Serialize};

use crate::scoring::{DailyCount, LanguageUsage, TeamStanding};

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    /// `7d`, `30d` (default), `90d` or `all`.
    #[param(example = "7d")]
    pub range: Option<String>,
}

/// Totals over the selected window.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AnalyticsOverview {
    /// Accounts with the team role, regardless of window.
    pub total_teams: u64,
    pub active_challenges: u64,
    pub total_submissions: u64,
    pub algorithmic_submissions: u64,
    pub buildathon_submissions: u64,
    pub accepted_submissions: u64,
    /// Buildathon submissions still waiting for review.
    pub pending_reviews: u64,
    /// Accepted share of all submissions, in percent.
    pub success_rate: f64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AnalyticsResponse {
    #[schema(example = "7d")]
    pub range: String,
    pub overview: AnalyticsOverview,
    pub team_performance: Vec<TeamStanding>,
    pub daily_submissions: Vec<DailyCount>,
    pub languages: Vec<LanguageUsage>,
}
