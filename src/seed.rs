use std::path::Path;

use crate::error::{ConfigError, GradeOutOfRange};
use crate::types::GradeRecord;

/// Records the store starts with when no seed file is configured.
pub fn default_records() -> Result<Vec<GradeRecord>, GradeOutOfRange> {
    Ok(vec![
        GradeRecord::new(1, "Juan Pérez", "Matemáticas", 4.5, Some("Buen desempeño"))?,
        GradeRecord::new(2, "Laura Gómez", "Ciencias", 3.8, None)?,
        GradeRecord::new(3, "Carlos Díaz", "Historia", 4.9, Some("Excelente análisis"))?,
    ])
}

/// Loads the startup records, from `path` when given.
pub fn load(path: Option<&Path>) -> Result<Vec<GradeRecord>, ConfigError> {
    let Some(path) = path else {
        return default_records().map_err(|e| ConfigError::InvalidSeed(e.to_string()));
    };

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::InvalidSeed(format!("failed to read {}: {}", path.display(), e))
    })?;
    let records: Vec<GradeRecord> = serde_json::from_str(&content).map_err(|e| {
        ConfigError::InvalidSeed(format!("failed to parse {}: {}", path.display(), e))
    })?;

    tracing::info!("Loaded {} seed records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn seed_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_records() {
        let records = default_records().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Juan Pérez");
        assert_eq!(records[0].grade.value(), 4.5);
        assert!(records[1].comment.is_none());
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        let records = load(None).unwrap();
        assert_eq!(records, default_records().unwrap());
    }

    #[test]
    fn test_load_from_file() {
        let file = seed_file(
            r#"[{"student_id": 10, "nombre": "Sofía", "materia": "Química", "calificacion": 2.5}]"#,
        );
        let records = load(Some(file.path())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "Química");
    }

    #[test]
    fn test_load_rejects_out_of_range_grade() {
        let file = seed_file(
            r#"[{"student_id": 10, "nombre": "Sofía", "materia": "Química", "calificacion": 6.0}]"#,
        );
        let err = load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeed(_)));
    }

    #[test]
    fn test_constructor_rejects_out_of_range_grade() {
        let err = GradeRecord::new(4, "Mario", "Arte", -1.0, None).unwrap_err();
        assert_eq!(err, GradeOutOfRange(-1.0));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Some(Path::new("/nonexistent/seed.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
