use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GradeOutOfRange;

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 5.0;

/// A grade in the inclusive range [0.0, 5.0].
///
/// Deserialization goes through [`Grade::new`], so every record that reaches
/// the store already satisfies the range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Grade(f64);

impl Grade {
    pub fn new(value: f64) -> Result<Self, GradeOutOfRange> {
        if (MIN_GRADE..=MAX_GRADE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GradeOutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Grade {
    type Error = GradeOutOfRange;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grade> for f64 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug keeps the trailing ".0" on whole numbers.
        write!(f, "{:?}", self.0)
    }
}

/// One student's single-subject graded entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub student_id: i64,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "materia", alias = "subject")]
    pub subject: String,
    #[serde(rename = "calificacion", alias = "grade")]
    pub grade: Grade,
    #[serde(rename = "comentarios", alias = "comment", default)]
    pub comment: Option<String>,
}

impl GradeRecord {
    pub fn new(
        student_id: i64,
        name: impl Into<String>,
        subject: impl Into<String>,
        grade: f64,
        comment: Option<&str>,
    ) -> Result<Self, GradeOutOfRange> {
        Ok(Self {
            student_id,
            name: name.into(),
            subject: subject.into(),
            grade: Grade::new(grade)?,
            comment: comment.map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Json,
    Txt,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub calificacion_minima: Option<f64>,
    #[serde(default)]
    pub materia: Option<String>,
    #[serde(default)]
    pub formato: ReportFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradesSummary {
    pub total: f64,
    pub average: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}
