//! CSV trade input.
//!
//! Files hold two numeric columns, notional and rate. A header row is
//! optional: a first row with no numeric field is taken as a header, and
//! columns named `notional` / `rate` are then located by name.

use crate::core::aggregate::Aggregate;
use crate::core::error::ValidationError;
use crate::core::trade::{ExistingTrade, TradeSet};
use crate::io::InputError;
use log::debug;
use rust_decimal::Decimal;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// Column positions of notional and rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    notional: usize,
    rate: usize,
}

impl Columns {
    const POSITIONAL: Columns = Columns {
        notional: 0,
        rate: 1,
    };

    fn from_header(header: &csv::StringRecord) -> Self {
        let find = |name: &str| header.iter().position(|h| h.eq_ignore_ascii_case(name));
        match (find("notional"), find("rate")) {
            (Some(notional), Some(rate)) => Columns { notional, rate },
            _ => Self::POSITIONAL,
        }
    }
}

/// Iterator over the trades of a CSV source.
///
/// Yields one `Result` per data row; rows are numbered from 1 in errors,
/// header and blank lines excluded.
pub struct TradeRecords<R> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
    columns: Option<Columns>,
    row: usize,
}

impl<R: std::io::Read> TradeRecords<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);
        Self {
            reader,
            record: csv::StringRecord::new(),
            columns: None,
            row: 0,
        }
    }
}

impl<R: std::io::Read> Iterator for TradeRecords<R> {
    type Item = Result<ExistingTrade, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => return Some(Err(e.into())),
            }
            if self.record.iter().all(str::is_empty) {
                continue;
            }
            let columns = match self.columns {
                Some(columns) => columns,
                None if is_header(&self.record) => {
                    let columns = Columns::from_header(&self.record);
                    debug!("header {:?} -> {:?}", self.record, columns);
                    self.columns = Some(columns);
                    continue;
                }
                None => *self.columns.insert(Columns::POSITIONAL),
            };
            self.row += 1;
            return Some(parse_trade(&self.record, columns, self.row).map_err(Into::into));
        }
    }
}

/// A header has no numeric field. Non-finite values are data, not labels.
fn is_header(record: &csv::StringRecord) -> bool {
    record.iter().all(|field| {
        matches!(
            parse_decimal(0, "", field),
            Err(ValidationError::InvalidNumber { .. })
        )
    })
}

fn parse_trade(
    record: &csv::StringRecord,
    columns: Columns,
    row: usize,
) -> Result<ExistingTrade, ValidationError> {
    let field = |index: usize, name: &'static str| {
        record
            .get(index)
            .filter(|value| !value.is_empty())
            .ok_or(ValidationError::MissingColumn { row, field: name })
            .and_then(|value| parse_decimal(row, name, value))
    };
    Ok(ExistingTrade::new(
        field(columns.notional, "notional")?,
        field(columns.rate, "rate")?,
    ))
}

/// Parse a plain or scientific-notation number.
fn parse_decimal(row: usize, field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| {
            let word = raw.trim_start_matches(['+', '-']).to_ascii_lowercase();
            if matches!(word.as_str(), "nan" | "inf" | "infinity") {
                ValidationError::NonFinite {
                    row,
                    field,
                    value: raw.to_string(),
                }
            } else {
                ValidationError::InvalidNumber {
                    row,
                    field,
                    value: raw.to_string(),
                }
            }
        })
}

/// Reject paths without a `.csv` extension (any case).
pub fn check_extension(path: &Path) -> Result<(), ValidationError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(()),
        other => Err(ValidationError::UnsupportedExtension(
            other.map(|ext| format!(".{ext}")).unwrap_or_default(),
        )),
    }
}

fn open(path: &Path) -> Result<TradeRecords<File>, InputError> {
    check_extension(path)?;
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TradeRecords::new(file))
}

/// Load every trade of a file into memory.
pub fn read_trades(path: impl AsRef<Path>) -> Result<TradeSet, InputError> {
    let path = path.as_ref();
    let set = open(path)?.collect::<Result<TradeSet, _>>()?;
    debug!("read {} trades from {}", set.len(), path.display());
    Ok(set)
}

/// Stream a file into running totals without keeping the trades.
pub fn aggregate_file(path: impl AsRef<Path>) -> Result<Aggregate, InputError> {
    let path = path.as_ref();
    let aggregate = aggregate_records(open(path)?)?;
    debug!("aggregated {} trades from {}", aggregate.count(), path.display());
    Ok(aggregate)
}

/// Sum any stream of trades.
pub fn aggregate_records(
    records: impl IntoIterator<Item = Result<ExistingTrade, InputError>>,
) -> Result<Aggregate, InputError> {
    let mut aggregate = Aggregate::new();
    for trade in records {
        aggregate.push(&trade?)?;
    }
    Ok(aggregate)
}
