//! Request handlers of the annotation API.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use nerlabel::{
    compile_batch, export_dataset, validate_entities, DatasetReport, EntityAnnotation,
    StoreReport, StoredAnnotation, DEFAULT_DATASET,
};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::export::{export_file_name, ExportArtifact};
use crate::AppState;

/// Body of `POST /api/save_annotation`.
#[derive(Debug, Deserialize)]
pub struct SaveAnnotationRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub entities: Vec<EntityAnnotation>,
    pub dataset_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveAnnotationResponse {
    pub success: bool,
    pub message: String,
    pub id: usize,
}

/// Liveness probe.
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, ServerError> {
    let datasets = state.store.dataset_names()?.len();
    Ok(Json(serde_json::json!({ "status": "ok", "datasets": datasets })))
}

/// Appends an annotation to a dataset, `default` when none is given.
pub async fn save_annotation(
    State(state): State<AppState>,
    Json(body): Json<SaveAnnotationRequest>,
) -> Result<Json<SaveAnnotationResponse>, ServerError> {
    validate_entities(&body.entities)?;
    let dataset = body
        .dataset_name
        .unwrap_or_else(|| String::from(DEFAULT_DATASET));
    let stored = state.store.append(&dataset, body.text, body.entities)?;
    tracing::info!(
        dataset = %dataset,
        id = stored.id,
        entities = stored.entities.len(),
        "annotation saved"
    );
    Ok(Json(SaveAnnotationResponse {
        success: true,
        message: String::from("Annotation saved successfully"),
        id: stored.id,
    }))
}

pub async fn get_datasets(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ServerError> {
    Ok(Json(state.store.dataset_names()?))
}

/// Stored annotations of a dataset. Unknown datasets are empty.
pub async fn get_annotations(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> Result<Json<Vec<StoredAnnotation>>, ServerError> {
    Ok(Json(state.store.list(&dataset)?))
}

/// Compiles a dataset and sends it back as a JSON attachment.
pub async fn export_hf_format(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> Result<Response, ServerError> {
    let file_name = export_file_name(&dataset, Local::now());
    // Compilation and file IO are blocking.
    let (file_name, bytes) = tokio::task::spawn_blocking(move || {
        let batch = export_dataset(state.store.as_ref(), &dataset, &state.compiler)?;
        let artifact = ExportArtifact::write(&state.export_prefix, file_name, &batch.records)?;
        tracing::info!(
            dataset = %dataset,
            records = batch.len(),
            path = %artifact.path().display(),
            "export file created"
        );
        let file_name = String::from(artifact.file_name());
        let bytes = artifact.into_bytes()?;
        Ok::<_, ServerError>((file_name, bytes))
    })
    .await??;

    let disposition = format!("attachment; filename=\"{}\"", file_name);
    let disposition = HeaderValue::from_str(&disposition)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(bytes),
    )
        .into_response())
}

/// Totals over every dataset.
pub async fn stats(State(state): State<AppState>) -> Result<Json<StoreReport>, ServerError> {
    Ok(Json(StoreReport::from_store(state.store.as_ref())?))
}

/// Statistics of one dataset, computed by compiling it.
pub async fn dataset_stats(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> Result<Json<DatasetReport>, ServerError> {
    let report = tokio::task::spawn_blocking(move || {
        let annotations = state.store.require(&dataset)?;
        let batch = compile_batch(&state.compiler, &annotations);
        Ok::<_, ServerError>(DatasetReport::new(&dataset, &annotations, &batch))
    })
    .await??;
    Ok(Json(report))
}
