use binscore::diagnostics::BinFault;
use binscore::error::{BinScoreError, BsResult};
use binscore::scorer::{BatchEntry, ScoreResult};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub candidate: String,
    pub divergence: ScoreResult,
    pub separation: ScoreResult,
    pub faults: Vec<BinFault>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReportEntry {
    pub candidate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divergence: Option<ScoreResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separation: Option<ScoreResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub faults: Vec<BinFault>,
}

impl BatchReportEntry {
    pub fn from_result(candidate: String, result: Result<BatchEntry, BinScoreError>) -> Self {
        match result {
            Ok(e) => Self {
                candidate,
                divergence: Some(e.divergence),
                separation: Some(e.separation),
                error: None,
                faults: e.faults,
            },
            Err(e) => Self {
                candidate,
                divergence: None,
                separation: None,
                error: Some(e.to_string()),
                faults: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub entries: Vec<BatchReportEntry>,
}

pub fn print_json<T: Serialize>(report: &T) -> BsResult<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub type ScoreRow = (String, Result<(ScoreResult, ScoreResult), String>);

pub fn print_score_table(rows: &[ScoreRow]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Candidate").add_attribute(Attribute::Bold),
        Cell::new("KL").fg(Color::Cyan),
        Cell::new("± KL"),
        Cell::new("Gini").fg(Color::Cyan),
        Cell::new("± Gini"),
        Cell::new("Used"),
        Cell::new("Skip"),
        Cell::new("Fault").fg(Color::Red),
    ]);

    for i in 1..=7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (name, scores) in rows {
        match scores {
            Ok((kl, gini)) => {
                table.add_row(vec![
                    Cell::new(name).add_attribute(Attribute::Bold),
                    Cell::new(format!("{:.4}", kl.value)).fg(Color::Cyan),
                    Cell::new(format!("{:.4}", kl.std_dev)),
                    Cell::new(format!("{:.4}", gini.value)).fg(Color::Cyan),
                    Cell::new(format!("{:.4}", gini.std_dev)),
                    Cell::new(kl.bins_used),
                    Cell::new(kl.bins_skipped),
                    Cell::new(kl.bins_faulted + gini.bins_faulted).fg(Color::Red),
                ]);
            }
            Err(e) => {
                table.add_row(vec![
                    Cell::new(name).add_attribute(Attribute::Bold),
                    Cell::new(e).fg(Color::Red),
                ]);
            }
        }
    }
    println!("{}", table);
}

/// Excluded bins, one row per fault, labelled with the candidate they came from.
pub fn print_fault_table<'a, I>(faults: I)
where
    I: IntoIterator<Item = (&'a str, &'a BinFault)>,
{
    let faults: Vec<_> = faults.into_iter().collect();
    if faults.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Candidate").add_attribute(Attribute::Bold),
        Cell::new("Scorer").add_attribute(Attribute::Bold),
        Cell::new("Fault").fg(Color::Red),
        Cell::new("Bin"),
        Cell::new("p"),
        Cell::new("q"),
        Cell::new("w_p"),
        Cell::new("w_q"),
    ]);

    for (candidate, f) in faults {
        table.add_row(vec![
            Cell::new(candidate),
            Cell::new(f.scorer),
            Cell::new(f.kind).fg(Color::Red),
            Cell::new(f.bin_index),
            Cell::new(format!("{:.6}", f.p)),
            Cell::new(format!("{:.6}", f.q)),
            Cell::new(format!("{:.6}", f.w_p)),
            Cell::new(format!("{:.6}", f.w_q)),
        ]);
    }
    println!("\n⚠️  Excluded bins\n{}", table);
}
