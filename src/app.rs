// 🚀 App - load tables, build indices, resolve queries, write output
//
// Everything is read before the first query is resolved.

use crate::config::Config;
use crate::error::Result;
use crate::loader::{load_plan_records, load_query_records, load_zip_records};
use crate::output::write_results;
use crate::pipeline::{QueryInput, QueryPipeline, RunSummary};
use crate::silver_rates::SilverRateTable;
use crate::zip_index::ZipIndex;
use std::io::Write;
use tracing::info;

pub fn run<W: Write>(config: &Config, writer: W) -> Result<RunSummary> {
    let zips = ZipIndex::build(&load_zip_records(&config.zips_path)?);
    info!(
        zipcodes = zips.len(),
        ambiguous = zips.ambiguous_count(),
        "built zip index"
    );

    let silver_rates = SilverRateTable::build(&load_plan_records(&config.plans_path)?);
    info!(triples = silver_rates.len(), "built silver rate table");

    let input = match config.single_query() {
        Some(single) => single,
        None => QueryInput::Batch(
            load_query_records(&config.queries_path)?
                .into_iter()
                .map(|q| q.zipcode)
                .collect(),
        ),
    };

    let results = QueryPipeline::new(&zips, &silver_rates).run(&input)?;
    write_results(writer, &results, config.output_format)?;

    let summary = RunSummary::new(&results, &zips, &silver_rates);
    summary.log();
    Ok(summary)
}
