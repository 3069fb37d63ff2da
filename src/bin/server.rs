use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use garden_packer::Error;
use garden_packer::config::PlanRequest;
use garden_packer::solver::Planner;
use garden_packer::types::{Candidates, Requirement, Strategy};
use serde::Serialize;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
struct PlanResponse {
    estimates: Vec<EstimateResponse>,
    beds: Vec<BedResponse>,
    capacity: f64,
    bed_count: usize,
    segment_count: usize,
    total_waste: f64,
    waste_percent: f64,
    shortfall: Option<usize>,
    /// Set when the counts were scaled to fit the bed budget.
    multiplier: Option<f64>,
}

#[derive(Serialize)]
struct EstimateResponse {
    crop: Requirement,
    width: f64,
    strategy: Strategy,
    candidates: Candidates,
}

#[derive(Serialize)]
struct BedResponse {
    segments: Vec<SegmentResponse>,
    used: f64,
    remaining: f64,
}

#[derive(Serialize)]
struct SegmentResponse {
    label: String,
    width: f64,
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidSegment { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        Error::InvalidGeometry(_)
        | Error::TooManyPieces { .. }
        | Error::InvalidCapacity(_)
        | Error::InvalidConfig(_) => StatusCode::BAD_REQUEST,
    }
}

fn reject(err: Error) -> (StatusCode, String) {
    let status = status_for(&err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "planning failed");
        sentry::capture_error(&err);
    }
    (status, err.to_string())
}

async fn plan(Json(req): Json<PlanRequest>) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /plan"
    );

    if req.items.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "items must not be empty".to_string()));
    }

    let planner = Planner::new(req.config, req.items);
    let (plan, multiplier) = if req.scale_to_budget {
        match planner.max_multiplier().map_err(reject)? {
            Some(scaling) => (scaling.plan, Some(scaling.multiplier)),
            None => {
                return Err((
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "not even one plant of every crop fits the available beds".to_string(),
                ));
            }
        }
    } else {
        (planner.solve().map_err(reject)?, None)
    };

    let estimates = plan
        .requirements
        .iter()
        .zip(&plan.estimates)
        .map(|(crop, est)| EstimateResponse {
            crop: crop.clone(),
            width: est.width,
            strategy: est.strategy,
            candidates: est.candidates,
        })
        .collect();

    let beds = plan
        .report
        .containers
        .iter()
        .map(|c| BedResponse {
            segments: c
                .segments
                .iter()
                .map(|s| SegmentResponse {
                    label: plan.segment_label(s),
                    width: s.width,
                })
                .collect(),
            used: c.used(),
            remaining: c.remaining,
        })
        .collect();

    Ok(Json(PlanResponse {
        estimates,
        beds,
        capacity: plan.report.capacity,
        bed_count: plan.report.container_count(),
        segment_count: plan.report.segment_count(),
        total_waste: plan.report.total_waste,
        waste_percent: plan.report.waste_percent(),
        shortfall: plan.shortfall(),
        multiplier,
    }))
}

fn app() -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/plan", post(plan))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

fn main() {
    let _sentry = sentry::init((
        std::env::var("SENTRY_DSN").ok(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
        .block_on(serve());
}

async fn serve() {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app()).await.unwrap();
}
