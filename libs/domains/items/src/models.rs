use chrono::{DateTime, Duration, DurationRound, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::Display;
use thiserror::Error;
use utoipa::ToSchema;

/// Item status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    DeriveActiveEnum,
    EnumIter,
    Default,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "item_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemStatus {
    /// Item is active
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    /// Item is inactive/disabled
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl ItemStatus {
    /// Every accepted status, in the order they are listed to clients
    pub const ALL: [ItemStatus; 2] = [ItemStatus::Active, ItemStatus::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item status \"{0}\"")]
pub struct UnknownStatus(pub String);

impl FromStr for ItemStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ItemStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| UnknownStatus(raw.to_string()))
    }
}

/// Backend-assigned item identifier
///
/// The relational backend hands out sequential integers, the document
/// backend opaque ObjectId strings. Serialized untagged, so clients see a
/// JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ItemId {
    Serial(i64),
    Opaque(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Serial(id) => write!(f, "{}", id),
            ItemId::Opaque(id) => f.write_str(id),
        }
    }
}

/// Item entity - the uniform representation returned by every backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Item name
    pub name: String,
    /// Item description, `null` when absent
    pub description: Option<String>,
    /// Current status
    pub status: ItemStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new item
///
/// Built from request JSON by [`CreateItem::from_json`](crate::validation).
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct CreateItem {
    /// 1 to 100 characters
    pub name: String,
    /// Up to 500 characters
    pub description: Option<String>,
    /// Defaults to `active`
    pub status: ItemStatus,
}

/// DTO for updating an existing item; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
}

/// Listing filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub status: Option<ItemStatus>,
}

impl ItemFilter {
    pub fn with_status(status: ItemStatus) -> Self {
        Self {
            status: Some(status),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.status.is_none_or(|status| item.status == status)
    }
}

/// Fully-formed record handed to a repository for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewItem {
    /// Stamp a create request with its creation time
    pub fn new(input: CreateItem, now: DateTime<Utc>) -> Self {
        Self {
            name: input.name,
            description: input.description,
            status: input.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update: only `Some` fields are written, `updated_at` always is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
    pub updated_at: DateTime<Utc>,
}

impl ItemChanges {
    pub fn new(input: UpdateItem, updated_at: DateTime<Utc>) -> Self {
        Self {
            name: input.name,
            description: input.description,
            status: input.status,
            updated_at,
        }
    }

    /// Apply these changes to an in-memory item
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(ref name) = self.name {
            item.name = name.clone();
        }
        if let Some(ref description) = self.description {
            item.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        item.updated_at = self.updated_at;
    }
}

/// Current time truncated to millisecond precision
///
/// Both backends store milliseconds, so truncating up front keeps a
/// read-back item equal to what was written.
pub fn now_millis() -> DateTime<Utc> {
    truncate_millis(Utc::now())
}

pub(crate) fn truncate_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    at.duration_trunc(Duration::milliseconds(1)).unwrap_or(at)
}

/// Timestamp for an update of an item last touched at `previous`
///
/// Always strictly later than `previous`, even when the clock has not moved.
pub fn next_updated_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now_millis();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample(id: ItemId) -> Item {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        Item {
            id,
            name: "Lamp".to_string(),
            description: None,
            status: ItemStatus::Active,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_item_serializes_camel_case_with_null_description() {
        let value = serde_json::to_value(sample(ItemId::Serial(7))).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "name": "Lamp",
                "description": null,
                "status": "active",
                "createdAt": "2026-01-02T03:04:05Z",
                "updatedAt": "2026-01-02T03:04:05Z"
            })
        );
    }

    #[test]
    fn test_opaque_id_serializes_as_string() {
        let value = serde_json::to_value(sample(ItemId::Opaque("65a1".to_string()))).unwrap();
        assert_eq!(value["id"], json!("65a1"));
    }

    #[test]
    fn test_status_string_forms() {
        assert_eq!(ItemStatus::Inactive.to_string(), "inactive");
        assert_eq!("active".parse::<ItemStatus>().unwrap(), ItemStatus::Active);
        assert_eq!(
            "archived".parse::<ItemStatus>(),
            Err(UnknownStatus("archived".to_string()))
        );
        assert!("Active".parse::<ItemStatus>().is_err());
        for status in ItemStatus::ALL {
            assert_eq!(status.to_string().parse::<ItemStatus>(), Ok(status));
        }
        assert_eq!(ItemStatus::default(), ItemStatus::Active);
    }

    #[test]
    fn test_filter_matches() {
        let item = sample(ItemId::Serial(1));
        assert!(ItemFilter::default().matches(&item));
        assert!(ItemFilter::with_status(ItemStatus::Active).matches(&item));
        assert!(!ItemFilter::with_status(ItemStatus::Inactive).matches(&item));
    }

    #[test]
    fn test_changes_apply_only_provided_fields() {
        let mut item = sample(ItemId::Serial(1));
        let later = item.updated_at + Duration::seconds(5);
        let changes = ItemChanges::new(
            UpdateItem {
                description: Some("x".to_string()),
                ..Default::default()
            },
            later,
        );

        changes.apply_to(&mut item);

        assert_eq!(item.name, "Lamp");
        assert_eq!(item.description.as_deref(), Some("x"));
        assert_eq!(item.status, ItemStatus::Active);
        assert_eq!(item.updated_at, later);
    }

    #[test]
    fn test_now_millis_has_no_sub_millisecond_part() {
        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_next_updated_at_is_strictly_later() {
        let future = Utc::now() + Duration::hours(1);
        let future = truncate_millis(future);
        assert_eq!(next_updated_at(future), future + Duration::milliseconds(1));

        let past = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert!(next_updated_at(past) > past);
    }
}
