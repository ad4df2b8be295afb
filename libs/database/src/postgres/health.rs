use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::{DatabaseError, DatabaseResult};

/// Check PostgreSQL health with a `SELECT 1` round trip
///
/// # Example
/// ```ignore
/// use database::postgres::check_health;
///
/// let database = match check_health(&db).await {
///     Ok(()) => "connected",
///     Err(_) => "disconnected",
/// };
/// ```
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt)
        .await
        .map_err(|e| DatabaseError::Unreachable {
            backend: "PostgreSQL",
            reason: e.to_string(),
        })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}
