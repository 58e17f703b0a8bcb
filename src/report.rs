//! Plain-text report bodies
//!
//! Pure formatting over grade records. Labels are Spanish to match the
//! downloaded files consumers already parse.

use std::fmt::Write;

use crate::types::GradeRecord;

const MISSING_COMMENT: &str = "N/A";

const SINGLE_HEADER: &str = "Reporte de Calificaciones\n==========================\n";
const BULK_HEADER: &str =
    "Reporte de Carga Masiva de Calificaciones\n========================================\n";
const SUMMARY_HEADER: &str = "Resumen de Calificaciones Filtradas\n=================================\n";

fn comment_or_placeholder(record: &GradeRecord) -> &str {
    record
        .comment
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(MISSING_COMMENT)
}

/// Writes the pipe-delimited line shared by bulk and summary reports.
fn push_record_line(out: &mut String, record: &GradeRecord) {
    let _ = writeln!(
        out,
        "ID: {} | Nombre: {} | Materia: {} | Calificación: {} | Comentarios: {}",
        record.student_id,
        record.name,
        record.subject,
        record.grade,
        comment_or_placeholder(record)
    );
}

pub fn render_single(record: &GradeRecord) -> String {
    let mut out = String::from(SINGLE_HEADER);
    let _ = writeln!(out, "ID: {}", record.student_id);
    let _ = writeln!(out, "Nombre: {}", record.name);
    let _ = writeln!(out, "Materia: {}", record.subject);
    let _ = writeln!(out, "Calificación: {}", record.grade);
    let _ = writeln!(out, "Comentarios: {}", comment_or_placeholder(record));
    out
}

pub fn render_bulk(records: &[GradeRecord]) -> String {
    let mut out = String::from(BULK_HEADER);
    for record in records {
        push_record_line(&mut out, record);
    }
    out
}

pub fn render_summary(records: &[GradeRecord], average: f64, total: f64) -> String {
    let mut out = String::from(SUMMARY_HEADER);
    for record in records {
        push_record_line(&mut out, record);
    }
    let _ = write!(out, "\nPromedio: {:.2}\n", average);
    let _ = writeln!(out, "Total calificaciones: {:?}", total);
    out
}
