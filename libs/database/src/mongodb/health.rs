use mongodb::{Client, bson::doc};
use tracing::debug;

use crate::common::{DatabaseError, DatabaseResult};

/// Run the `ping` admin command
pub(crate) async fn ping(client: &Client) -> DatabaseResult<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::Unreachable {
            backend: "MongoDB",
            reason: e.to_string(),
        })
}

/// Check MongoDB health with a `ping` command
///
/// # Example
/// ```ignore
/// use database::mongodb::check_health;
///
/// let database = match check_health(&client).await {
///     Ok(()) => "connected",
///     Err(_) => "disconnected",
/// };
/// ```
pub async fn check_health(client: &Client) -> DatabaseResult<()> {
    debug!("Running MongoDB health check");
    ping(client).await?;
    debug!("MongoDB health check passed");
    Ok(())
}
