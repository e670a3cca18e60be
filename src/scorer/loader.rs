use crate::distribution::Histogram;
use crate::error::{BinScoreError, BsResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Reads a histogram from CSV.
///
/// The first line is a header. Columns named `content` and `error` are used
/// when present; otherwise the last two columns are, so both `content,error`
/// and `bin,content,error` layouts work. Rows are taken in file order.
pub fn load_histogram<R: Read>(reader: R) -> BsResult<Histogram> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let (content_col, error_col) = resolve_columns(&headers)?;

    let mut contents = Vec::new();
    let mut errors = Vec::new();

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        // header is line 1
        let line = row_idx + 2;

        contents.push(parse_cell(&rec, content_col, "content", line)?);
        errors.push(parse_cell(&rec, error_col, "error", line)?);
    }

    debug!("Parsed {} bins", contents.len());
    Histogram::new(contents, errors)
}

pub fn load_histogram_from_file<P: AsRef<Path>>(path: P) -> BsResult<Histogram> {
    let path = path.as_ref();
    info!("📂 Loading distribution: {}", path.display());
    let file = File::open(path)?;
    load_histogram(file)
}

fn resolve_columns(headers: &csv::StringRecord) -> BsResult<(usize, usize)> {
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    if let (Some(c), Some(e)) = (find("content"), find("error")) {
        return Ok((c, e));
    }

    match headers.len() {
        2 => Ok((0, 1)),
        3 => Ok((1, 2)),
        n => Err(BinScoreError::Validation(format!(
            "Expected 2 or 3 columns (content,error or bin,content,error), found {}",
            n
        ))),
    }
}

fn parse_cell(rec: &csv::StringRecord, col: usize, name: &str, line: usize) -> BsResult<f64> {
    let raw = rec.get(col).ok_or_else(|| {
        BinScoreError::Validation(format!("[Line {}] Missing {} column", line, name))
    })?;

    raw.parse::<f64>().map_err(|_| {
        BinScoreError::Validation(format!("[Line {}] Invalid {} value '{}'", line, name, raw))
    })
}
