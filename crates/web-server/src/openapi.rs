use core_types::{Student, StudentPayload};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::{ErrorBody, ValidationErrorBody};
use crate::handlers;

pub const SWAGGER_UI_PATH: &str = "/swagger";
pub const OPENAPI_JSON_PATH: &str = "/swagger/v1/swagger.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Student Registry", version = "v1"),
    paths(
        handlers::list_students,
        handlers::create_student,
        handlers::get_student,
        handlers::update_student,
        handlers::delete_student,
    ),
    components(schemas(Student, StudentPayload, ErrorBody, ValidationErrorBody)),
    tags((name = "Student", description = "Student records"))
)]
pub struct ApiDoc;

/// The Swagger UI, with the generated document mounted next to it.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
