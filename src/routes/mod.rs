use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::forms::ValidationFailure;
use crate::services::ServiceError;

pub mod artifacts;
pub mod categories;

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ValidationBody<'a> {
    errors: &'a [ValidationFailure],
}

/// Renders a service failure as a JSON response.
pub fn error_response(error: ServiceError) -> HttpResponse {
    match &error {
        ServiceError::NotFound => HttpResponse::NotFound().json(MessageBody {
            message: "not found",
        }),
        ServiceError::Validation(failures) => {
            HttpResponse::BadRequest().json(ValidationBody { errors: failures })
        }
        ServiceError::Form(_) | ServiceError::Domain(_) => {
            let message = error.to_string();
            HttpResponse::BadRequest().json(MessageBody { message: &message })
        }
        ServiceError::Internal => HttpResponse::InternalServerError().json(MessageBody {
            message: "internal error",
        }),
    }
}

/// Mounts every catalog endpoint under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(categories::list_categories)
            .service(categories::create_category)
            .service(categories::show_category)
            .service(categories::update_category)
            .service(categories::delete_category)
            .service(categories::rearrange_category)
            .service(artifacts::list_artifacts)
            .service(artifacts::create_artifact)
            .service(artifacts::show_artifact)
            .service(artifacts::update_artifact)
            .service(artifacts::delete_artifact)
            .service(artifacts::list_versions)
            .service(artifacts::add_version),
    );
}
