//! Handlers for the `/calendar` weekly workload view.

use axum::extract::{Query, State};
use axum::Json;
use fabshop_core::schedule::ProjectSchedule;
use fabshop_core::types::{Date, DbId};
use fabshop_core::workload::{fabricator_workload, project_on_day, week_days, week_start};
use fabshop_db::models::project::Project;
use fabshop_db::repositories::{FabricatorRepo, ProjectRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /calendar`.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Any date inside the week to show; normalized to that week's Sunday.
    /// Defaults to the current week.
    pub week_of: Option<Date>,
    /// Optional exact fabricator name to scope the view to.
    pub fabricator: Option<String>,
}

/// A project bar on the calendar grid.
#[derive(Debug, Serialize)]
pub struct ProjectSpan {
    pub id: DbId,
    pub name: String,
    pub start_date: Date,
    pub deadline: Date,
    pub hours_remaining: i32,
    /// Which of the week's 7 days this project covers.
    pub days_active: [bool; 7],
}

/// One fabricator's row on the calendar.
#[derive(Debug, Serialize)]
pub struct FabricatorWeek {
    pub name: String,
    /// Total remaining hours across the week's projects (unclamped).
    pub hours: i32,
    pub overloaded: bool,
    pub projects: Vec<ProjectSpan>,
}

/// Full calendar payload.
#[derive(Debug, Serialize)]
pub struct CalendarView {
    pub week_start: Date,
    pub days: [Date; 7],
    pub fabricators: Vec<FabricatorWeek>,
}

/// GET /api/v1/calendar
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<CalendarView>> {
    let anchor = query
        .week_of
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let start = week_start(anchor);
    let days = week_days(start);

    // Scoping to one fabricator skips the roster scan entirely.
    let names: Vec<String> = match &query.fabricator {
        Some(wanted) => FabricatorRepo::find_by_name(&state.pool, wanted)
            .await?
            .map(|f| f.name)
            .into_iter()
            .collect(),
        None => FabricatorRepo::list(&state.pool)
            .await?
            .into_iter()
            .map(|f| f.name)
            .collect(),
    };

    let snapshot = ProjectRepo::list(&state.pool).await?;
    let refs: Vec<&Project> = snapshot.iter().collect();

    let fabricators = names
        .into_iter()
        .map(|name| {
            let load = fabricator_workload(&name, start, &refs);
            let projects = load
                .projects
                .iter()
                .map(|p| ProjectSpan {
                    id: p.id,
                    name: p.name.clone(),
                    start_date: p.start_date,
                    deadline: p.deadline,
                    hours_remaining: p.hours_remaining(),
                    days_active: std::array::from_fn(|i| project_on_day(*p, days[i])),
                })
                .collect();
            FabricatorWeek {
                name,
                hours: load.hours,
                overloaded: load.is_overloaded(),
                projects,
            }
        })
        .collect();

    Ok(Json(CalendarView {
        week_start: start,
        days,
        fabricators,
    }))
}
