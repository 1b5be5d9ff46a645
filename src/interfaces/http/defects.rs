use actix_web::{get, post, put, web, HttpRequest, HttpResponse, Responder};

use super::{add_log, bearer_token, fail, HttpState};
use crate::domain::credentials::{ChangePasswordRequest, LoginRequest};
use crate::domain::defect::DefectEntry;

#[get("/defects")]
async fn list_defects(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.app_state.defect_tracker.list())
}

#[get("/defects/summary")]
async fn defect_summary(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.app_state.defect_tracker.summary())
}

#[post("/defects")]
async fn add_defect(
    data: web::Data<HttpState>,
    http: HttpRequest,
    entry: web::Json<DefectEntry>,
) -> impl Responder {
    if let Err(e) = data.app_state.admin_auth.authorize(bearer_token(&http)) {
        return fail(&data.logs, "Defects", "Add rejected", &e);
    }

    match data.app_state.defect_tracker.add(entry.into_inner()) {
        Ok(entries) => {
            add_log(&data.logs, "INFO", "Defects", "Data added successfully!");
            HttpResponse::Created().json(entries)
        }
        Err(e) => fail(&data.logs, "Defects", "Failed to add defect", &e),
    }
}

#[put("/defects")]
async fn replace_defects(
    data: web::Data<HttpState>,
    http: HttpRequest,
    entries: web::Json<Vec<DefectEntry>>,
) -> impl Responder {
    if let Err(e) = data.app_state.admin_auth.authorize(bearer_token(&http)) {
        return fail(&data.logs, "Defects", "Update rejected", &e);
    }

    match data.app_state.defect_tracker.replace_all(entries.into_inner()) {
        Ok(entries) => {
            add_log(&data.logs, "INFO", "Defects", "Changes saved successfully!");
            HttpResponse::Ok().json(entries)
        }
        Err(e) => fail(&data.logs, "Defects", "Failed to save changes", &e),
    }
}

#[post("/auth/login")]
async fn login(data: web::Data<HttpState>, req: web::Json<LoginRequest>) -> impl Responder {
    match data.app_state.admin_auth.login(&req) {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => fail(&data.logs, "Auth", "Login failed", &e),
    }
}

#[post("/auth/logout")]
async fn logout(data: web::Data<HttpState>, http: HttpRequest) -> impl Responder {
    let Some(token) = bearer_token(&http) else {
        return HttpResponse::NoContent().finish();
    };
    match data.app_state.admin_auth.logout(token) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => fail(&data.logs, "Auth", "Logout failed", &e),
    }
}

#[post("/auth/password")]
async fn change_password(
    data: web::Data<HttpState>,
    http: HttpRequest,
    req: web::Json<ChangePasswordRequest>,
) -> impl Responder {
    let auth = &data.app_state.admin_auth;
    if let Err(e) = auth.authorize(bearer_token(&http)) {
        return fail(&data.logs, "Auth", "Password change rejected", &e);
    }

    match auth.change_password(&req) {
        Ok(()) => {
            add_log(&data.logs, "INFO", "Auth", "Password changed successfully!");
            HttpResponse::NoContent().finish()
        }
        Err(e) => fail(&data.logs, "Auth", "Password change failed", &e),
    }
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(defect_summary)
        .service(list_defects)
        .service(add_defect)
        .service(replace_defects)
        .service(login)
        .service(logout)
        .service(change_password);
}
