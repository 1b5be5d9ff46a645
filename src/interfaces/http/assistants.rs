use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;

use super::{add_log, fail, HttpState};
use crate::domain::image_description::ImageDescriptionRequest;
use crate::domain::travel_guide::TravelGuideRequest;

#[derive(Deserialize)]
pub struct DescribeQuery {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[post("/travel-guide")]
async fn travel_guide(
    data: web::Data<HttpState>,
    req: web::Json<TravelGuideRequest>,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "TravelGuide",
        &format!("Generating guide for {} in {}", req.city, req.month),
    );

    match data
        .app_state
        .travel_guide
        .execute(&data.app_state.config.llm, &req)
        .await
    {
        Ok(guide) => HttpResponse::Ok().json(guide),
        Err(e) => fail(&data.logs, "TravelGuide", "An error occurred", &e),
    }
}

#[post("/images/describe")]
async fn describe_image(
    data: web::Data<HttpState>,
    http: HttpRequest,
    query: web::Query<DescribeQuery>,
    body: web::Bytes,
) -> impl Responder {
    let mime_type = http
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    add_log(
        &data.logs,
        "INFO",
        "ImageDescribe",
        &format!("Describing image ({}, {} bytes)", mime_type, body.len()),
    );

    let request = ImageDescriptionRequest {
        mime_type,
        data: body.to_vec(),
        prompt: query.into_inner().prompt,
    };

    match data
        .app_state
        .image_description
        .execute(&data.app_state.config.llm, request)
        .await
    {
        Ok(description) => HttpResponse::Ok().json(description),
        Err(e) => fail(&data.logs, "ImageDescribe", "Image description failed", &e),
    }
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(travel_guide).service(describe_image);
}
