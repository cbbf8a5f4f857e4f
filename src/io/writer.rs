use crate::core::trade::TradeSet;
use std::io::Write;

/// Write a trade set as CSV with a `notional,rate` header.
pub fn write_trades<W: Write>(out: W, set: &TradeSet) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(["notional", "rate"])?;
    for trade in set.trades() {
        writer.write_record([trade.notional().to_string(), trade.rate().to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
