//! HTTP handlers for the REST API.

use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartRejection},
    http::header,
    response::{Html, IntoResponse},
};

use super::dto::{HealthResponse, ProcessResponse};
use super::error::AppError;
use super::state::AppState;
use crate::cleaning::{CleaningConfig, extension_of};
use crate::pipeline::Upload;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const DASHBOARD_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>tabclean</title>
</head>
<body>
  <h1>Clean tabular files</h1>
  <form action="/process" method="post" enctype="multipart/form-data">
    <p><input type="file" name="files" multiple accept=".csv,.xls,.xlsx"></p>
    <p>
      <label>File type
        <select name="filetype">
          <option value="csv">CSV</option>
          <option value="xlsx">Excel</option>
        </select>
      </label>
    </p>
    <p>
      <label>Null values
        <select name="null_action">
          <option value="keep">Keep</option>
          <option value="mean">Fill with mean</option>
          <option value="median">Fill with median</option>
          <option value="drop">Drop rows</option>
        </select>
      </label>
    </p>
    <p><label><input type="checkbox" name="remove_duplicates"> Remove duplicate rows</label></p>
    <p><label><input type="checkbox" name="pk_action" value="assign"> Assign primary key</label></p>
    <p><button type="submit">Process</button></p>
  </form>
</body>
</html>
"#;

/// GET /
pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// GET /health
pub async fn health_check() -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    }))
}

/// POST /process
///
/// Reads every `files` part plus the option fields, then runs the batch on a
/// blocking thread.
pub async fn process_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> HandlerResult<ProcessResponse> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let mut uploads = Vec::new();
    let mut filetype = None;
    let mut null_action = None;
    let mut pk_action = None;
    let mut remove_duplicates = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "files" => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await?;
                uploads.push(Upload::new(filename, bytes.to_vec()));
            }
            "filetype" => filetype = Some(field.text().await?),
            "null_action" => null_action = Some(field.text().await?),
            "pk_action" => pk_action = Some(field.text().await?),
            "remove_duplicates" => remove_duplicates = Some(field.text().await?),
            other => tracing::debug!("Ignoring unknown form field '{other}'"),
        }
    }

    let config = CleaningConfig::from_form(
        filetype.as_deref(),
        null_action.as_deref(),
        pk_action.as_deref(),
        remove_duplicates.as_deref(),
    );

    let pipeline = state.pipeline.clone();
    let report = tokio::task::spawn_blocking(move || pipeline.process_batch(&config, &uploads))
        .await
        .map_err(|e| AppError::Internal(format!("Batch task failed: {e}")))??;

    Ok(Json(ProcessResponse::from(&report)))
}

/// GET /download/{filename}
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let path = state.pipeline.storage().resolve_output(&filename)?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read {}: {e}", path.display())))?;

    let headers = [
        (header::CONTENT_TYPE, content_type_for(&filename).to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes))
}

pub fn content_type_for(filename: &str) -> &'static str {
    match extension_of(filename).as_deref() {
        Some("csv") => "text/csv; charset=utf-8",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a_cleaned.csv"), "text/csv; charset=utf-8");
        assert_eq!(
            content_type_for("a_cleaned.XLSX"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(content_type_for("blob"), "application/octet-stream");
    }
}
