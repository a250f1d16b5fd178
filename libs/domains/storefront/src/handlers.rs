use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        ServiceUnavailableResponse, UnprocessableEntityResponse,
    },
};
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::{
    OpenApi,
    openapi::{RefOr, Schema},
};

use crate::error::StorefrontResult;
use crate::models::{
    CreatedResponse, DiagnosticsReport, Mousepad, MousepadList, Order, OrderItem, Product,
    SeedResponse, SeedStatus, StatusMessage, User, collection_schemas,
};
use crate::service::StorefrontService;
use crate::store::DocumentStore;

const ROOT_MESSAGE: &str = "Mousepad Store Backend Running";

/// OpenAPI documentation for the `/api` routes
#[derive(OpenApi)]
#[openapi(
    paths(list_mousepads, create_mousepad, create_order, seed_catalog),
    components(
        schemas(
            Mousepad,
            Order,
            OrderItem,
            User,
            Product,
            CreatedResponse,
            MousepadList,
            SeedResponse,
            SeedStatus
        ),
        responses(
            BadRequestResponse,
            BadRequestValidationResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Storefront", description = "Mousepad catalog and orders")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for the top-level status routes
#[derive(OpenApi)]
#[openapi(
    paths(root, diagnostics, schemas),
    components(schemas(StatusMessage, DiagnosticsReport)),
    tags(
        (name = "Status", description = "Liveness banner, diagnostics and collection schemas")
    )
)]
pub struct StatusApiDoc;

/// Routes mounted under `/api`.
pub fn router<S: DocumentStore + 'static>(service: StorefrontService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/mousepads", get(list_mousepads).post(create_mousepad))
        .route("/orders", post(create_order))
        .route("/seed", post(seed_catalog))
        .with_state(shared_service)
}

/// Routes mounted at the root: `/`, `/test` and `/schema`.
pub fn status_router<S: DocumentStore + 'static>(service: StorefrontService<S>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(diagnostics))
        .route("/schema", get(schemas))
        .with_state(Arc::new(service))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Status",
    responses(
        (status = 200, description = "Backend is running", body = StatusMessage)
    )
)]
async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// Backend and database connectivity
///
/// Always answers 200; store problems are reported inside the body.
#[utoipa::path(
    get,
    path = "/test",
    tag = "Status",
    responses(
        (status = 200, description = "Diagnostic report", body = DiagnosticsReport)
    )
)]
async fn diagnostics<S: DocumentStore>(
    State(service): State<Arc<StorefrontService<S>>>,
) -> Json<DiagnosticsReport> {
    Json(service.diagnostics().await)
}

/// JSON schema of each collection, keyed by collection name
#[utoipa::path(
    get,
    path = "/schema",
    tag = "Status",
    responses(
        (status = 200, description = "Schemas for mousepad, order, order_item, user and product")
    )
)]
async fn schemas() -> Json<BTreeMap<&'static str, RefOr<Schema>>> {
    Json(collection_schemas())
}

/// List every mousepad in the catalog
#[utoipa::path(
    get,
    path = "/mousepads",
    tag = "Storefront",
    responses(
        (status = 200, description = "All mousepads", body = MousepadList),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_mousepads<S: DocumentStore>(
    State(service): State<Arc<StorefrontService<S>>>,
) -> StorefrontResult<Json<MousepadList>> {
    let items = service.list_mousepads().await?;
    Ok(Json(MousepadList { items }))
}

/// Add a mousepad to the catalog
#[utoipa::path(
    post,
    path = "/mousepads",
    tag = "Storefront",
    request_body = Mousepad,
    responses(
        (status = 201, description = "Mousepad created", body = CreatedResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_mousepad<S: DocumentStore>(
    State(service): State<Arc<StorefrontService<S>>>,
    ValidatedJson(input): ValidatedJson<Mousepad>,
) -> StorefrontResult<impl IntoResponse> {
    let id = service.create_mousepad(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Place an order
///
/// Every line needs a quantity of at least 1 and the line sum must match
/// `total` within 0.01.
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Storefront",
    request_body = Order,
    responses(
        (status = 201, description = "Order created", body = CreatedResponse),
        (status = 400, response = BadRequestResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_order<S: DocumentStore>(
    State(service): State<Arc<StorefrontService<S>>>,
    ValidatedJson(input): ValidatedJson<Order>,
) -> StorefrontResult<impl IntoResponse> {
    let id = service.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Insert the sample catalog when no mousepads exist
#[utoipa::path(
    post,
    path = "/seed",
    tag = "Storefront",
    responses(
        (status = 200, description = "Seeding outcome", body = SeedResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn seed_catalog<S: DocumentStore>(
    State(service): State<Arc<StorefrontService<S>>>,
) -> StorefrontResult<Json<SeedResponse>> {
    Ok(Json(service.seed().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorefrontError;
    use crate::store::MockDocumentStore;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_store_failure_on_create_is_500_with_message() {
        let mut store = MockDocumentStore::new();
        store
            .expect_insert()
            .returning(|_, _| Err(StorefrontError::Database("No suitable servers found".into())));

        let app = router(StorefrontService::new(store));
        let (status, body) = send(
            app,
            "POST",
            "/mousepads",
            Some(json!({"design": "Nebula Drift", "price": 39.99, "description": "Swirls"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "No suitable servers found");
    }

    #[tokio::test]
    async fn test_store_failure_on_seed_is_500() {
        let mut store = MockDocumentStore::new();
        store
            .expect_count()
            .returning(|_| Err(StorefrontError::Database("auth failed".into())));

        let (status, body) = send(router(StorefrontService::new(store)), "POST", "/seed", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_diagnostics_reports_listing_error_inline() {
        let mut store = MockDocumentStore::new();
        store
            .expect_collection_names()
            .returning(|| Err(StorefrontError::Database("connection refused".into())));

        let (status, body) = send(status_router(StorefrontService::new(store)), "GET", "/test", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "✅ Running");
        assert_eq!(body["database"], "❌ Error: connection refused");
        assert!(body.get("collections").is_none());
    }

    #[tokio::test]
    async fn test_no_store_makes_data_routes_unavailable() {
        let service = StorefrontService::<MockDocumentStore>::without_store();
        let (status, body) = send(router(service), "GET", "/mousepads", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["message"], "Database not available");
    }
}
