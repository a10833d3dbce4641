//! Presentation-side aggregation of traffic matches.

use chargescout_core::models::DistanceAnnotatedRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Traffic counts summed per road and suburb.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficSummaryRow {
    pub road_name: String,
    pub suburb: String,
    pub traffic_count: f64,
}

/// Sum `traffic_count` per (road_name, suburb), ordered by road then
/// suburb. Rows without a parseable count contribute zero.
pub fn summarize_traffic(records: &[DistanceAnnotatedRecord]) -> Vec<TrafficSummaryRow> {
    let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();

    for record in records {
        let road_name = record.fields.get("road_name").cloned().unwrap_or_default();
        let suburb = record.fields.get("suburb").cloned().unwrap_or_default();
        let count = record
            .fields
            .get("traffic_count")
            .and_then(|cell| cell.trim().parse::<f64>().ok())
            .unwrap_or(0.0);

        *totals.entry((road_name, suburb)).or_insert(0.0) += count;
    }

    totals
        .into_iter()
        .map(|((road_name, suburb), traffic_count)| TrafficSummaryRow {
            road_name,
            suburb,
            traffic_count,
        })
        .collect()
}

/// Column/row form of the summary for the table renderer.
pub fn traffic_summary_table(rows: &[TrafficSummaryRow]) -> (Vec<String>, Vec<Vec<String>>) {
    let columns = vec![
        "road_name".to_string(),
        "suburb".to_string(),
        "traffic_count".to_string(),
    ];
    let cells = rows
        .iter()
        .map(|row| {
            vec![
                row.road_name.clone(),
                row.suburb.clone(),
                format!("{:.0}", row.traffic_count),
            ]
        })
        .collect();
    (columns, cells)
}
