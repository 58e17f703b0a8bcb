use std::sync::Arc;
use tokio::sync::RwLock;

use crate::types::GradeRecord;

/// Predicates applied by [`GradeStore::filter`]; unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct GradeFilter {
    min_grade: Option<f64>,
    subject: Option<String>,
}

impl GradeFilter {
    pub fn new(min_grade: Option<f64>, subject: Option<String>) -> Self {
        Self {
            min_grade,
            subject: subject.map(|s| s.to_lowercase()),
        }
    }

    pub fn matches(&self, record: &GradeRecord) -> bool {
        if let Some(min) = self.min_grade {
            if record.grade.value() < min {
                return false;
            }
        }
        if let Some(ref subject) = self.subject {
            if record.subject.to_lowercase() != *subject {
                return false;
            }
        }
        true
    }
}

/// Append-only, insertion-ordered grade records shared by every request.
#[derive(Clone, Default)]
pub struct GradeStore {
    records: Arc<RwLock<Vec<GradeRecord>>>,
}

impl GradeStore {
    pub fn with_records(records: Vec<GradeRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub async fn append(&self, records: impl IntoIterator<Item = GradeRecord>) {
        let mut guard = self.records.write().await;
        let before = guard.len();
        guard.extend(records);
        tracing::debug!("Appended {} records, store now holds {}", guard.len() - before, guard.len());
    }

    pub async fn find_by_id(&self, student_id: i64) -> Option<GradeRecord> {
        let records = self.records.read().await;
        records.iter().find(|r| r.student_id == student_id).cloned()
    }

    pub async fn filter(&self, filter: &GradeFilter) -> Vec<GradeRecord> {
        let records = self.records.read().await;
        records.iter().filter(|r| filter.matches(r)).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}
