use actix_web::{HttpResponse, Responder, delete, get, post, web};
use serde::Deserialize;

use crate::domain::intervention::InterventionStatus;
use crate::domain::invoice::{InvoiceStatus, InvoiceType};
use crate::domain::types::{ClientId, InterventionId};
use crate::dto::api::{DeleteClientResponse, ErrorResponse, NotifyEnvelope};
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, InterventionListQuery, InvoiceListQuery};
use crate::routes::{error_response, run_blocking};
use crate::services::guard::{self, DeleteOutcome};
use crate::services::notify::{self, NotifyOutcome};
use crate::services::{ServiceError, reconcile};

#[get("/v1/clients")]
pub async fn list_clients(repo: web::Data<DieselRepository>) -> impl Responder {
    let repo = repo.get_ref().clone();
    match run_blocking(move || reconcile::list_client_summaries(&repo)).await {
        Ok(summaries) => HttpResponse::Ok().json(summaries),
        Err(err) => error_response("Failed to list clients", err),
    }
}

#[get("/v1/clients/{client_id}/interventions")]
pub async fn client_interventions(
    client_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(client_id) = ClientId::new(client_id.into_inner()) else {
        return HttpResponse::NotFound().json(ErrorResponse::new("Not found"));
    };

    let repo = repo.get_ref().clone();
    match run_blocking(move || reconcile::client_overview(&repo, client_id)).await {
        Ok(overview) => HttpResponse::Ok().json(overview),
        Err(err) => error_response("Failed to build client overview", err),
    }
}

#[delete("/v1/clients/{client_id}")]
pub async fn delete_client(
    client_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(client_id) = ClientId::new(client_id.into_inner()) else {
        return HttpResponse::NotFound().json(ErrorResponse::new("Not found"));
    };

    let repo = repo.get_ref().clone();
    match run_blocking(move || guard::delete_client(&repo, client_id)).await {
        Ok(DeleteOutcome::Deleted) => HttpResponse::Ok().json(DeleteClientResponse::deleted()),
        Ok(DeleteOutcome::Refused { intervention_count }) => {
            HttpResponse::Conflict().json(DeleteClientResponse::refused(intervention_count))
        }
        Err(err) => error_response("Failed to delete client", err),
    }
}

#[derive(Deserialize)]
struct InterventionsQueryParams {
    status: Option<String>,
}

#[get("/v1/interventions")]
pub async fn list_interventions(
    params: web::Query<InterventionsQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let mut query = InterventionListQuery::new();
    if let Some(raw) = &params.status {
        match InterventionStatus::try_from(raw.as_str()) {
            Ok(status) => query = query.status(status),
            Err(_) => {
                return HttpResponse::BadRequest()
                    .json(ErrorResponse::new(format!("Unknown status: {raw}")));
            }
        }
    }

    let repo = repo.get_ref().clone();
    match run_blocking(move || reconcile::interventions_with_invoices(&repo, query)).await {
        Ok(interventions) => HttpResponse::Ok().json(interventions),
        Err(err) => error_response("Failed to list interventions", err),
    }
}

#[derive(Deserialize)]
struct InvoicesQueryParams {
    status: Option<String>,
    invoice_type: Option<String>,
}

#[get("/v1/invoices")]
pub async fn list_invoices(
    params: web::Query<InvoicesQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let mut query = InvoiceListQuery::new();
    if let Some(raw) = &params.status {
        match InvoiceStatus::try_from(raw.as_str()) {
            Ok(status) => query = query.status(status),
            Err(_) => {
                return HttpResponse::BadRequest()
                    .json(ErrorResponse::new(format!("Unknown status: {raw}")));
            }
        }
    }
    if let Some(raw) = &params.invoice_type {
        match InvoiceType::try_from(raw.as_str()) {
            Ok(invoice_type) => query = query.invoice_type(invoice_type),
            Err(_) => {
                return HttpResponse::BadRequest()
                    .json(ErrorResponse::new(format!("Unknown invoice type: {raw}")));
            }
        }
    }

    let repo = repo.get_ref().clone();
    match run_blocking(move || reconcile::invoices_with_context(&repo, query)).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response("Failed to list invoices", err),
    }
}

#[post("/v1/interventions/{intervention_id}/notify-completion")]
pub async fn notify_completion(
    intervention_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    http: web::Data<reqwest::Client>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let Ok(intervention_id) = InterventionId::new(intervention_id.into_inner()) else {
        return HttpResponse::NotFound().json(ErrorResponse::new("Not found"));
    };

    let repo = repo.get_ref().clone();
    let payload =
        match run_blocking(move || notify::prepare_completion(&repo, intervention_id)).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                return HttpResponse::Ok().json(NotifyEnvelope::from(NotifyOutcome::Skipped));
            }
            Err(err) => return error_response("Failed to prepare completion notification", err),
        };

    match notify::dispatch_completion(http.get_ref(), &server_config.calendar, &payload).await {
        Ok(outcome) => HttpResponse::Ok().json(NotifyEnvelope::from(outcome)),
        Err(err @ ServiceError::Configuration(_)) => {
            error_response("Broken calendar notification configuration", err)
        }
        Err(err) => error_response("Failed to dispatch completion notification", err),
    }
}
