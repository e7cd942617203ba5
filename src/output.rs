// 🖨️ Output - write query results as CSV or JSON

use crate::error::Result;
use crate::pipeline::QueryResult;
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

pub const CSV_HEADER: [&str; 2] = ["zipcode", "rate"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected csv or json)", other)),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    zipcode: &'a str,
    rate: Option<&'a str>,
}

/// `zipcode,rate` header then one row per result; blank rate when indeterminate
pub fn write_csv<W: Write>(writer: W, results: &[QueryResult]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;
    for result in results {
        writer.write_record([result.zipcode.as_str(), result.rate.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut writer: W, results: &[QueryResult]) -> Result<()> {
    let rows: Vec<JsonRow> = results
        .iter()
        .map(|r| JsonRow {
            zipcode: &r.zipcode,
            rate: r.has_rate().then_some(r.rate.as_str()),
        })
        .collect();

    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_results<W: Write>(
    writer: W,
    results: &[QueryResult],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(writer, results),
        OutputFormat::Json => write_json(writer, results),
    }
}
