//! Handlers for the `/dashboard` view.
//!
//! The dashboard is a pure derivation: one snapshot query, then filtering,
//! partitioning, and sorting in memory. Nothing derived is written back.

use axum::extract::{Query, State};
use axum::Json;
use fabshop_core::project::Urgency;
use fabshop_core::schedule::{classify_urgency, days_until};
use fabshop_core::types::Date;
use fabshop_core::views::{
    filter_by_fabricator, partition, sort_active, sort_completed, sort_unassigned, top_n,
    DashboardStats, FabricatorFilter, UP_NEXT_COUNT,
};
use fabshop_db::models::project::Project;
use fabshop_db::repositories::ProjectRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Valid values for the `tab` query parameter. `queue` is an accepted alias
/// for the unassigned bucket.
const TABS: &[&str] = &["unassigned", "queue", "active", "completed"];

/// Query parameters for `GET /dashboard`.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Optional tab name; rejected if not in [`TABS`].
    pub tab: Option<String>,
    /// Fabricator scoping: `"all"` (default) or an exact name.
    pub fabricator: Option<String>,
    /// Reference date for urgency classification. Defaults to today (UTC).
    pub as_of: Option<Date>,
}

/// One project row in a dashboard list, annotated with derived fields.
#[derive(Debug, Serialize)]
pub struct ProjectView<'a> {
    #[serde(flatten)]
    pub project: &'a Project,
    pub urgency: Urgency,
    pub days_until_deadline: i64,
}

impl<'a> ProjectView<'a> {
    fn new(project: &'a Project, as_of: Date) -> Self {
        Self {
            project,
            urgency: classify_urgency(project, as_of),
            days_until_deadline: days_until(project.deadline, as_of),
        }
    }
}

/// Full dashboard payload.
#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub as_of: Date,
    pub stats: DashboardStats,
    pub unassigned: Vec<ProjectView<'a>>,
    pub active: Vec<ProjectView<'a>>,
    pub completed: Vec<ProjectView<'a>>,
    /// The first few active projects in urgency order.
    pub up_next: Vec<ProjectView<'a>>,
}

/// GET /api/v1/dashboard
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<serde_json::Value>> {
    if let Some(tab) = &query.tab {
        if !TABS.contains(&tab.as_str()) {
            return Err(AppError::validation(format!(
                "Unknown tab '{tab}'. Expected one of: unassigned, queue, active, completed"
            )));
        }
    }

    let as_of = query
        .as_of
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let filter = query
        .fabricator
        .as_deref()
        .map(FabricatorFilter::parse)
        .unwrap_or(FabricatorFilter::All);

    let snapshot = ProjectRepo::list(&state.pool).await?;
    let all: Vec<&Project> = snapshot.iter().collect();
    let scoped = filter_by_fabricator(&all, &filter);

    let parts = partition(&scoped);
    let unassigned = sort_unassigned(&parts.unassigned);
    let active = sort_active(&parts.active, as_of);
    let completed = sort_completed(&parts.completed);
    let up_next = top_n(&active, UP_NEXT_COUNT).to_vec();

    let view = DashboardView {
        as_of,
        stats: DashboardStats::compute(&scoped, as_of),
        unassigned: annotate(&unassigned, as_of),
        active: annotate(&active, as_of),
        completed: annotate(&completed, as_of),
        up_next: annotate(&up_next, as_of),
    };

    // Serialized before the snapshot goes out of scope.
    let body = serde_json::to_value(&view)
        .map_err(|e| AppError::internal(format!("Serialization error: {e}")))?;
    Ok(Json(body))
}

fn annotate<'a>(projects: &[&'a Project], as_of: Date) -> Vec<ProjectView<'a>> {
    projects.iter().map(|p| ProjectView::new(p, as_of)).collect()
}
