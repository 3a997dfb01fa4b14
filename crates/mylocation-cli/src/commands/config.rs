//! Config command implementation

use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use anyhow::Result;
use mylocation_core::config::LayeredConfig;

pub fn execute(output: &OutputWriter, config: &LayeredConfig) -> Result<()> {
    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    if output.is_json() {
        output.result("success", rows)?;
    } else {
        output.section("Effective Configuration");
        output.table(rows);
    }

    Ok(())
}
