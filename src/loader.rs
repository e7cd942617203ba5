// 📂 CSV Loader - read the three source tables into typed records
//
// Every table has a header row. Line numbers in errors count the header as
// line 1, so the first data row is line 2. Empty lines are skipped by the
// reader; a row of empty fields is still a row.

use crate::error::{Result, SlcspError};
use crate::records::{PlanRecord, QueryRecord, ZipRecord};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;
use tracing::info;

fn read_rows<T, F>(path: &Path, mut convert: F) -> Result<Vec<T>>
where
    F: FnMut(&StringRecord, usize) -> Result<T>,
{
    let file = File::open(path).map_err(|e| SlcspError::source_unavailable(path, e))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for (row_num, result) in reader.records().enumerate() {
        let record = result.map_err(|e| SlcspError::source_unavailable(path, e))?;
        // Fallback: 1-indexed + header row
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_num + 2);
        rows.push(convert(&record, line)?);
    }

    Ok(rows)
}

fn fields(record: &StringRecord) -> Vec<&str> {
    record.iter().collect()
}

pub fn load_zip_records(path: &Path) -> Result<Vec<ZipRecord>> {
    let records = read_rows(path, |record, line| {
        ZipRecord::from_fields(&fields(record), line)
    })?;
    info!(path = %path.display(), rows = records.len(), "loaded zip table");
    Ok(records)
}

pub fn load_plan_records(path: &Path) -> Result<Vec<PlanRecord>> {
    let records = read_rows(path, |record, line| {
        PlanRecord::from_fields(&fields(record), line)
    })?;
    info!(path = %path.display(), rows = records.len(), "loaded plan table");
    Ok(records)
}

pub fn load_query_records(path: &Path) -> Result<Vec<QueryRecord>> {
    let records = read_rows(path, |record, line| {
        QueryRecord::from_fields(&fields(record), line)
    })?;
    info!(path = %path.display(), rows = records.len(), "loaded query table");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Table;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_zip_records() {
        let file = csv_file(
            "zipcode,state,county_code,name,rate_area\n\
             36749,AL,01001,Autauga,11\n\
             36703,AL,01001,Autauga,11\n",
        );

        let records = load_zip_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].zipcode, "36703");
        assert_eq!(records[1].name, "Autauga");
    }

    #[test]
    fn test_load_plan_records_with_quoted_fields() {
        let file = csv_file(
            "plan_id,state,metal_level,rate,rate_area\n\
             74449NR9870320,GA,Silver,298.62,7\n\
             \"26325VH2723968\",\"FL\",\"Silver\",\"421.43\",\"60\"\n",
        );

        let records = load_plan_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].state, "FL");
        assert_eq!(records[1].rate, "421.43");
    }

    #[test]
    fn test_load_query_records_ignores_rate_and_blank_lines() {
        let file = csv_file("zipcode,rate\n64148,\n\n67118,\n");

        let records = load_query_records(file.path()).unwrap();
        let codes: Vec<&str> = records.iter().map(|r| r.zipcode.as_str()).collect();
        assert_eq!(codes, vec!["64148", "67118"]);
    }

    #[test]
    fn test_load_query_records_keeps_empty_fields_row() {
        let file = csv_file("zipcode,rate\n64148,\n,\n  ,\n");

        let records = load_query_records(file.path()).unwrap();
        let codes: Vec<&str> = records.iter().map(|r| r.zipcode.as_str()).collect();
        assert_eq!(codes, vec!["64148", "", "  "]);
    }

    #[test]
    fn test_load_plan_records_skips_rate_check_for_other_metals() {
        let file = csv_file(
            "plan_id,state,metal_level,rate,rate_area\n\
             74449NR9870320,NY,Silver,298.62,2\n\
             74449NR9870321,NY,Gold,,2\n\
             74449NR9870322,NY,Bronze,n/a,2\n",
        );

        let records = load_plan_records(file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[1].silver_rate().is_none());
    }

    #[test]
    fn test_keeps_leading_zeros() {
        let file = csv_file("zipcode,rate\n01001,\n");
        let records = load_query_records(file.path()).unwrap();
        assert_eq!(records[0].zipcode, "01001");
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("zips.csv");

        let err = load_zip_records(&missing).unwrap_err();
        assert!(matches!(err, SlcspError::SourceUnavailable { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_short_row_reports_line() {
        let file = csv_file(
            "plan_id,state,metal_level,rate,rate_area\n\
             74449NR9870320,GA,Silver,298.62,7\n\
             74449NR9870321,GA,Silver\n",
        );

        match load_plan_records(file.path()).unwrap_err() {
            SlcspError::MalformedRecord { table, line, .. } => {
                assert_eq!(table, Table::Plans);
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
