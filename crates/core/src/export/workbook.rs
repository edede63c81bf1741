use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::errors::Result;
use crate::portfolio::holdings::Holding;
use crate::transactions::Transaction;

pub const TRANSACTIONS_SHEET: &str = "Transactions";
pub const HOLDINGS_SHEET: &str = "Holdings";

const TRANSACTION_COLUMNS: [&str; 9] = [
    "id",
    "date",
    "account_id",
    "symbol",
    "quantity",
    "price",
    "side",
    "strategy",
    "created_at",
];

const HOLDING_COLUMNS: [&str; 11] = [
    "account_id",
    "strategy",
    "symbol",
    "net_quantity",
    "average_price",
    "current_price",
    "price_resolved",
    "investment",
    "current_value",
    "pnl",
    "pnl_pct",
];

/// One typed cell value, so numbers stay numeric in the spreadsheet.
enum Cell {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        value
            .to_f64()
            .map(Cell::Number)
            .unwrap_or_else(|| Cell::Text(value.to_string()))
    }
}

/// Writes the raw ledger and a holdings snapshot into an `.xlsx` workbook
/// with one worksheet each. Empty inputs produce header-only worksheets.
pub fn export_workbook(transactions: &[Transaction], holdings: &[Holding]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    write_sheet(
        workbook.add_worksheet().set_name(TRANSACTIONS_SHEET)?,
        &header,
        &TRANSACTION_COLUMNS,
        transactions.iter().map(transaction_row),
    )?;
    write_sheet(
        workbook.add_worksheet().set_name(HOLDINGS_SHEET)?,
        &header,
        &HOLDING_COLUMNS,
        holdings.iter().map(holding_row),
    )?;

    let bytes = workbook.save_to_buffer()?;
    debug!(
        "Exported {} transactions and {} holdings ({} bytes)",
        transactions.len(),
        holdings.len(),
        bytes.len()
    );
    Ok(bytes)
}

fn write_sheet<I>(sheet: &mut Worksheet, header: &Format, columns: &[&str], rows: I) -> Result<()>
where
    I: Iterator<Item = Vec<Cell>>,
{
    for (col, name) in (0u16..).zip(columns) {
        sheet.write_string_with_format(0, col, *name, header)?;
    }
    for (row, cells) in (1u32..).zip(rows) {
        for (col, cell) in (0u16..).zip(cells) {
            match cell {
                Cell::Text(text) => sheet.write_string(row, col, text)?,
                Cell::Number(number) => sheet.write_number(row, col, number)?,
                Cell::Flag(flag) => sheet.write_boolean(row, col, flag)?,
            };
        }
    }
    Ok(())
}

fn transaction_row(t: &Transaction) -> Vec<Cell> {
    vec![
        Cell::Number(f64::from(t.id)),
        Cell::Text(t.date.format("%Y-%m-%d").to_string()),
        Cell::Text(t.account_id.clone()),
        Cell::Text(t.symbol.clone()),
        Cell::Number(t.quantity as f64),
        t.price.into(),
        Cell::Text(t.side.to_string()),
        Cell::Text(t.strategy.clone()),
        Cell::Text(t.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
    ]
}

fn holding_row(h: &Holding) -> Vec<Cell> {
    vec![
        Cell::Text(h.account_id.clone()),
        Cell::Text(h.strategy.clone()),
        Cell::Text(h.symbol.clone()),
        Cell::Number(h.net_quantity as f64),
        h.average_price.into(),
        h.current_price.into(),
        Cell::Flag(h.price_resolved),
        h.investment.into(),
        h.current_value.into(),
        h.pnl.into(),
        h.pnl_pct.into(),
    ]
}
