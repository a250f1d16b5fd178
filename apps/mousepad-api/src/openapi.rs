//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mousepad Store API",
        version = "0.1.0",
        description = "Mousepad catalog, order intake and catalog seeding over MongoDB"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(crate::api::health::readiness_check),
    nest(
        (path = "/api", api = domain_storefront::ApiDoc)
    ),
    tags(
        (name = "Health", description = "Readiness probe")
    )
)]
struct ServiceDoc;

/// Combined OpenAPI documentation: `/api` routes plus the top-level status routes.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_storefront::StatusApiDoc::openapi());
        doc
    }
}
