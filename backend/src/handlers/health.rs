//! Service health endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// Report process liveness plus database reachability. Reports degraded
/// rather than failing when Postgres is down, so load balancers can tell
/// the two apart.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let database_up = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
        .is_ok();

    Json(health_status(database_up))
}

fn health_status(database_up: bool) -> HealthStatus {
    HealthStatus {
        status: if database_up { "healthy" } else { "degraded" },
        service: "vyapaar-backend",
        version: env!("CARGO_PKG_VERSION"),
        database: if database_up { "connected" } else { "unreachable" },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_database() {
        let up = health_status(true);
        assert_eq!(up.status, "healthy");
        assert_eq!(up.database, "connected");

        let down = health_status(false);
        assert_eq!(down.status, "degraded");
        assert_eq!(down.database, "unreachable");
        assert_eq!(down.service, "vyapaar-backend");
    }
}
