use actix_web::{HttpResponse, Responder, delete, get, patch, post, put, web};

use crate::domain::types::CategoryId;
use crate::forms::categories::{
    CreateCategoryForm, CreateCategoryFormPayload, RearrangeCategoryForm,
    RearrangeCategoryFormPayload, UpdateCategoryForm, UpdateCategoryFormPayload,
};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    list_categories as list_categories_service,
    rearrange_category as rearrange_category_service, show_category as show_category_service,
    update_category as update_category_service,
};

/// Non-positive ids can never exist.
fn path_id(category_id: web::Path<i32>) -> Result<CategoryId, HttpResponse> {
    CategoryId::new(category_id.into_inner())
        .map_err(|_| error_response(ServiceError::NotFound))
}

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_categories_service(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err),
    }
}

#[get("/categories/{category_id}")]
pub async fn show_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = match path_id(category_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match show_category_service(category_id, repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err),
    }
}

#[post("/categories")]
pub async fn create_category(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateCategoryForm>,
) -> impl Responder {
    let payload: CreateCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match create_category_service(payload, repo.get_ref()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => error_response(err),
    }
}

#[put("/categories/{category_id}")]
pub async fn update_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateCategoryForm>,
) -> impl Responder {
    let category_id = match path_id(category_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: UpdateCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match update_category_service(category_id, payload, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = match path_id(category_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match delete_category_service(category_id, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[patch("/categories/{category_id}/position")]
pub async fn rearrange_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RearrangeCategoryForm>,
) -> impl Responder {
    let category_id = match path_id(category_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: RearrangeCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match rearrange_category_service(category_id, payload, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
