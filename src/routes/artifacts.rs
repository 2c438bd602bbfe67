use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::artifact::ArtifactUpdate;
use crate::domain::types::ArtifactId;
use crate::domain::version::NewArtifactVersion;
use crate::forms::artifacts::{
    ArtifactSearchForm, ArtifactSearchFormPayload, CreateArtifactForm, CreateArtifactFormPayload,
    CreateArtifactVersionForm, UpdateArtifactForm,
};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::artifacts::{
    add_version as add_version_service, create_artifact as create_artifact_service,
    delete_artifact as delete_artifact_service, list_artifacts as list_artifacts_service,
    show_artifact as show_artifact_service, update_artifact as update_artifact_service,
    version_history as version_history_service,
};

fn path_id(artifact_id: web::Path<i32>) -> Result<ArtifactId, HttpResponse> {
    ArtifactId::new(artifact_id.into_inner())
        .map_err(|_| error_response(ServiceError::NotFound))
}

#[get("/artifacts")]
pub async fn list_artifacts(
    repo: web::Data<DieselRepository>,
    web::Query(form): web::Query<ArtifactSearchForm>,
) -> impl Responder {
    let payload: ArtifactSearchFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match list_artifacts_service(payload, repo.get_ref()) {
        Ok(artifacts) => HttpResponse::Ok().json(artifacts),
        Err(err) => error_response(err),
    }
}

#[get("/artifacts/{artifact_id}")]
pub async fn show_artifact(
    artifact_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let artifact_id = match path_id(artifact_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match show_artifact_service(artifact_id, repo.get_ref()) {
        Ok(artifact) => HttpResponse::Ok().json(artifact),
        Err(err) => error_response(err),
    }
}

#[post("/artifacts")]
pub async fn create_artifact(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateArtifactForm>,
) -> impl Responder {
    let payload: CreateArtifactFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match create_artifact_service(payload, repo.get_ref()) {
        Ok(artifact) => HttpResponse::Created().json(artifact),
        Err(err) => error_response(err),
    }
}

#[put("/artifacts/{artifact_id}")]
pub async fn update_artifact(
    artifact_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateArtifactForm>,
) -> impl Responder {
    let artifact_id = match path_id(artifact_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let update: ArtifactUpdate = match form.try_into() {
        Ok(update) => update,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match update_artifact_service(artifact_id, update, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[delete("/artifacts/{artifact_id}")]
pub async fn delete_artifact(
    artifact_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let artifact_id = match path_id(artifact_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match delete_artifact_service(artifact_id, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[get("/artifacts/{artifact_id}/versions")]
pub async fn list_versions(
    artifact_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let artifact_id = match path_id(artifact_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match version_history_service(artifact_id, repo.get_ref()) {
        Ok(versions) => HttpResponse::Ok().json(versions),
        Err(err) => error_response(err),
    }
}

#[post("/artifacts/{artifact_id}/versions")]
pub async fn add_version(
    artifact_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateArtifactVersionForm>,
) -> impl Responder {
    let artifact_id = match path_id(artifact_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let version: NewArtifactVersion = match form.try_into() {
        Ok(version) => version,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match add_version_service(artifact_id, version, repo.get_ref()) {
        Ok(version) => HttpResponse::Created().json(version),
        Err(err) => error_response(err),
    }
}
