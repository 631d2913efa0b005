use utoipa::OpenApi;

use crate::routes::api;
use crate::routes::health::HealthApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Supportron API",
    description = "IT Tech Support AI Assistant API",
    version = "1.0.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(HealthApi::openapi());
    root.merge(api::api_docs());
    root
}
