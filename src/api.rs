use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::error::ApiError;
use crate::report::{render_bulk, render_single, render_summary};
use crate::report_file::ReportFiles;
use crate::store::{GradeFilter, GradeStore};
use crate::types::{GradeRecord, GradesSummary, ReportFormat, RootResponse, SummaryQuery};

const BULK_REPORT_FILENAME: &str = "reporte_carga_masiva.txt";
const SUMMARY_REPORT_FILENAME: &str = "resumen_filtrado.txt";

/// Everything the routes need, injected per app instance.
#[derive(Clone)]
pub struct AppState {
    pub store: GradeStore,
    pub reports: ReportFiles,
    pub max_payload_bytes: usize,
}

fn student_report_filename(student_id: i64) -> String {
    format!("reporte_estudiante_{}.txt", student_id)
}

pub async fn root() -> impl Responder {
    web::Json(RootResponse {
        message: "API de Calificaciones Activa".to_string(),
    })
}

pub async fn get_student_report(
    path: web::Path<i64>,
    store: web::Data<GradeStore>,
    reports: web::Data<ReportFiles>,
) -> Result<HttpResponse, ApiError> {
    let student_id = path.into_inner();

    let record = store.find_by_id(student_id).await.ok_or_else(|| {
        ApiError::NotFound(format!("Estudiante con ID {} no encontrado.", student_id))
    })?;

    tracing::info!("Generating report for student {}", student_id);
    reports
        .deliver(&student_report_filename(student_id), render_single(&record))
        .await
}

pub async fn bulk_load_grades(
    body: web::Json<Vec<GradeRecord>>,
    store: web::Data<GradeStore>,
    reports: web::Data<ReportFiles>,
) -> Result<HttpResponse, ApiError> {
    let grades = body.into_inner();

    if grades.is_empty() {
        return Err(ApiError::InvalidInput(
            "Debe proporcionar al menos una calificación.".to_string(),
        ));
    }

    let report = render_bulk(&grades);
    let count = grades.len();
    store.append(grades).await;
    tracing::info!("Bulk loaded {} grades", count);

    reports.deliver(BULK_REPORT_FILENAME, report).await
}

pub async fn get_grades_summary(
    query: web::Query<SummaryQuery>,
    store: web::Data<GradeStore>,
    reports: web::Data<ReportFiles>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();

    if query.calificacion_minima.is_some_and(|min| !min.is_finite()) {
        return Err(ApiError::InvalidInput(
            "calificacion_minima debe ser un número finito.".to_string(),
        ));
    }

    let filter = GradeFilter::new(query.calificacion_minima, query.materia);
    let filtered = store.filter(&filter).await;

    if filtered.is_empty() {
        return Err(ApiError::NotFound(
            "No hay estudiantes que cumplan con los filtros especificados.".to_string(),
        ));
    }

    let summary = summarize(&filtered)?;
    tracing::info!(
        "Summary over {} records ({:?}): average {:.2}",
        summary.count,
        query.formato,
        summary.average
    );

    match query.formato {
        ReportFormat::Json => Ok(HttpResponse::Ok().json(summary)),
        ReportFormat::Txt => {
            let report = render_summary(&filtered, summary.average, summary.total);
            reports.deliver(SUMMARY_REPORT_FILENAME, report).await
        }
    }
}

fn summarize(records: &[GradeRecord]) -> Result<GradesSummary, ApiError> {
    let count = records.len();
    if count == 0 {
        return Err(ApiError::InternalError(
            "Error: División por cero al calcular el promedio.".to_string(),
        ));
    }

    let total: f64 = records.iter().map(|r| r.grade.value()).sum();
    Ok(GradesSummary {
        total,
        average: total / count as f64,
        count,
    })
}

/// Body that parsed as JSON but failed field validation is a 422; anything
/// else wrong with the payload is a 400.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    match err {
        JsonPayloadError::Deserialize(ref e) if e.is_data() => ApiError::Unprocessable(detail).into(),
        _ => ApiError::InvalidInput(detail).into(),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::new(state.store.clone()))
        .app_data(web::Data::new(state.reports.clone()))
        .app_data(
            web::JsonConfig::default()
                .limit(state.max_payload_bytes)
                .error_handler(json_error),
        )
        .app_data(
            web::QueryConfig::default()
                .error_handler(|err, _req| ApiError::InvalidInput(err.to_string()).into()),
        )
        .app_data(
            web::PathConfig::default()
                .error_handler(|err, _req| ApiError::InvalidInput(err.to_string()).into()),
        )
        .route("/", web::get().to(root))
        .route("/student/{student_id}/report", web::get().to(get_student_report))
        .route("/grades/bulk", web::post().to(bulk_load_grades))
        .route("/grades/summary", web::get().to(get_grades_summary));
}
