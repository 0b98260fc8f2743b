use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use std::sync::Arc;

use curata_core::Error;

use crate::engine::TasteEngine;
use crate::types::{FinishRequest, NextRequest, StartRequest};

pub struct RestApi;

impl RestApi {
    pub async fn start(engine: Arc<TasteEngine>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(engine.clone()))
                .route("/taste/start", web::post().to(taste_start))
                .route("/taste/next", web::post().to(taste_next))
                .route("/taste/finish", web::post().to(taste_finish))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn taste_start(
    engine: web::Data<Arc<TasteEngine>>,
    req: web::Json<StartRequest>,
) -> ActixResult<HttpResponse> {
    match engine.start(req.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(response)),
        Err(error) => Ok(error_response(&error)),
    }
}

async fn taste_next(
    engine: web::Data<Arc<TasteEngine>>,
    req: web::Json<NextRequest>,
) -> ActixResult<HttpResponse> {
    match engine.next(req.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(error) => Ok(error_response(&error)),
    }
}

async fn taste_finish(
    engine: web::Data<Arc<TasteEngine>>,
    req: web::Json<FinishRequest>,
) -> ActixResult<HttpResponse> {
    match engine.finish(req.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(error) => Ok(error_response(&error)),
    }
}

/// Insufficient candidates is a distinct condition, not a failure: the
/// client can choose to finish early instead of retrying.
fn error_response(error: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": error.to_string() });
    match error {
        Error::InvalidRequest(_) => HttpResponse::BadRequest().json(body),
        Error::SessionNotFound(_) => HttpResponse::NotFound().json(body),
        Error::InsufficientCandidates(_) => HttpResponse::Conflict().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}
