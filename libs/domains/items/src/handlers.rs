use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, ValidatedJson,
    errors::responses::{
        BadRequestIdentifierResponse, BadRequestJsonResponse, BadRequestValidationResponse,
        NotFoundResponse, StorageErrorResponse,
    },
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::error::{ItemError, Operation};
use crate::models::{CreateItem, Item, ItemFilter, ItemStatus, UpdateItem};
use crate::pagination::{Page, PageRequest, Pagination};
use crate::repository::ItemRepository;
use crate::service::ItemService;
use crate::validation::invalid_status_message;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, update_item, delete_item),
    components(
        schemas(Item, ItemStatus, CreateItem, UpdateItem, Pagination, ItemData, ItemMessage, Message),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdentifierResponse,
            BadRequestJsonResponse,
            StorageErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Item management endpoints")
    )
)]
pub struct ApiDoc;

/// Router state: the service plus how much of a storage failure to reveal
pub struct ItemsState<R: ItemRepository> {
    pub service: ItemService<R>,
    pub expose_internal_errors: bool,
}

impl<R: ItemRepository> Clone for ItemsState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            expose_internal_errors: self.expose_internal_errors,
        }
    }
}

impl<R: ItemRepository> ItemsState<R> {
    fn fail(&self, operation: Operation) -> impl FnOnce(ItemError) -> AppError + '_ {
        move |err| err.into_app_error(operation, self.expose_internal_errors)
    }
}

/// Create the items router with all HTTP endpoints
///
/// `expose_internal_errors` puts storage error details into 500 responses;
/// leave it off in production.
pub fn router<R: ItemRepository + 'static>(
    service: ItemService<R>,
    expose_internal_errors: bool,
) -> Router {
    let state = ItemsState {
        service,
        expose_internal_errors,
    };

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(state)
}

/// Raw listing query; values are coerced leniently
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListItemsQuery {
    /// Page number, 1-based (default 1)
    pub page: Option<String>,
    /// Page size (default 10, capped by the server)
    pub limit: Option<String>,
    /// Only items with this status
    #[param(value_type = Option<ItemStatus>)]
    pub status: Option<String>,
}

impl ListItemsQuery {
    fn filter(&self) -> Result<ItemFilter, ItemError> {
        match self.status.as_deref() {
            None | Some("") => Ok(ItemFilter::default()),
            Some(raw) => raw
                .parse::<ItemStatus>()
                .map(ItemFilter::with_status)
                .map_err(|_| ItemError::Validation(vec![invalid_status_message()])),
        }
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), self.limit.as_deref())
    }
}

/// `{data: Item}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemData {
    pub data: Item,
}

/// `{message, data: Item}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemMessage {
    pub message: String,
    pub data: Item,
}

/// `{message}`
#[derive(Debug, Serialize, ToSchema)]
pub struct Message {
    pub message: String,
}

/// List items, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    params(ListItemsQuery),
    responses(
        (status = 200, description = "Page of items", body = Page<Item>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = StorageErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(state): State<ItemsState<R>>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<Page<Item>>, AppError> {
    let filter = query.filter().map_err(state.fail(Operation::List))?;
    let page = state
        .service
        .list_items(filter, query.page_request())
        .await
        .map_err(state.fail(Operation::List))?;
    Ok(Json(page))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = ItemMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 415, response = BadRequestJsonResponse),
        (status = 500, response = StorageErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(state): State<ItemsState<R>>,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> Result<impl IntoResponse, AppError> {
    let item = state
        .service
        .create_item(input)
        .await
        .map_err(state.fail(Operation::Create))?;

    Ok((
        StatusCode::CREATED,
        Json(ItemMessage {
            message: "Item created successfully".to_string(),
            data: item,
        }),
    ))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID: an integer or a 24-character hex ObjectId, depending on the backend")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemData),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StorageErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(state): State<ItemsState<R>>,
    Path(id): Path<String>,
) -> Result<Json<ItemData>, AppError> {
    let item = state
        .service
        .get_item(&id)
        .await
        .map_err(state.fail(Operation::Get))?;
    Ok(Json(ItemData { data: item }))
}

/// Update an item; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated successfully", body = ItemMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StorageErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(state): State<ItemsState<R>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> Result<Json<ItemMessage>, AppError> {
    let item = state
        .service
        .update_item(&id, input)
        .await
        .map_err(state.fail(Operation::Update))?;

    Ok(Json(ItemMessage {
        message: "Item updated successfully".to_string(),
        data: item,
    }))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted successfully", body = Message),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StorageErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(state): State<ItemsState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, AppError> {
    state
        .service
        .delete_item(&id)
        .await
        .map_err(state.fail(Operation::Delete))?;

    Ok(Json(Message {
        message: "Item deleted successfully".to_string(),
    }))
}
