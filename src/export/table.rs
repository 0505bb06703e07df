// src/export/table.rs
// Flat CSV of every classified record, one row per headline. This is the
// spreadsheet-facing artifact of the bundle.

use std::path::Path;

use crate::export::ExportError;
use crate::pipeline::ClassifiedRecord;

pub fn write_records(path: &Path, records: &[ClassifiedRecord]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path).map_err(ExportError::Csv)?;
    for record in records {
        writer.serialize(record).map_err(ExportError::Csv)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Risk;

    #[test]
    fn rows_carry_header_and_uppercase_risk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let records = vec![ClassifiedRecord {
            keyword: "에스원".into(),
            title: "해킹 사고 발생".into(),
            link: "https://news.example/a".into(),
            date: "2025-01-06".into(),
            risk: Risk::Red,
        }];
        write_records(&path, &records).unwrap();
        let out = std::fs::read_to_string(&path).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next().unwrap(), "keyword,title,link,date,risk");
        assert!(lines.next().unwrap().ends_with(",RED"));
    }
}
