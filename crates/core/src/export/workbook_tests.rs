#[cfg(test)]
mod tests {
    use crate::export::{export_workbook, HOLDINGS_SHEET, TRANSACTIONS_SHEET};
    use crate::portfolio::holdings::compute_holdings;
    use crate::transactions::{Transaction, TransactionSide};
    use calamine::{Data, Range, Reader, Xlsx};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::io::Cursor;

    fn open(bytes: &[u8]) -> Xlsx<Cursor<&[u8]>> {
        Xlsx::new(Cursor::new(bytes)).unwrap()
    }

    fn worksheet(bytes: &[u8], name: &str) -> Range<Data> {
        open(bytes).worksheet_range(name).unwrap()
    }

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    fn ledger() -> Vec<Transaction> {
        let date = NaiveDate::from_ymd_opt(2024, 4, 8).unwrap();
        vec![
            Transaction {
                id: 1,
                date,
                account_id: "Zerodha".to_string(),
                symbol: "INFY".to_string(),
                quantity: 10,
                price: dec!(1450.5),
                side: TransactionSide::Buy,
                strategy: "Long Term".to_string(),
                created_at: date.and_hms_opt(9, 30, 0).unwrap(),
            },
            Transaction {
                id: 2,
                date,
                account_id: "Zerodha".to_string(),
                symbol: "INFY".to_string(),
                quantity: 4,
                price: dec!(1500),
                side: TransactionSide::Sell,
                strategy: "Long Term".to_string(),
                created_at: date.and_hms_opt(14, 0, 0).unwrap(),
            },
        ]
    }

    #[test]
    fn test_workbook_contains_both_worksheets() {
        let transactions = ledger();
        let prices = HashMap::from([("INFY".to_string(), dec!(1600))]);
        let holdings = compute_holdings(&transactions, &prices).unwrap();

        let bytes = export_workbook(&transactions, &holdings).unwrap();

        assert_eq!(
            open(&bytes).sheet_names(),
            vec![TRANSACTIONS_SHEET.to_string(), HOLDINGS_SHEET.to_string()]
        );

        let tx_sheet = worksheet(&bytes, TRANSACTIONS_SHEET);
        let rows: Vec<&[Data]> = tx_sheet.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], text("id"));
        assert_eq!(rows[0][8], text("created_at"));
        assert_eq!(
            rows[1],
            &[
                Data::Float(1.0),
                text("2024-04-08"),
                text("Zerodha"),
                text("INFY"),
                Data::Float(10.0),
                Data::Float(1450.5),
                text("BUY"),
                text("Long Term"),
                text("2024-04-08 09:30:00"),
            ][..]
        );
        assert_eq!(rows[2][6], text("SELL"));

        let holdings_sheet = worksheet(&bytes, HOLDINGS_SHEET);
        let rows: Vec<&[Data]> = holdings_sheet.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2], text("INFY"));
        assert_eq!(rows[1][3], Data::Float(6.0));
        assert_eq!(rows[1][5], Data::Float(1600.0));
        assert_eq!(rows[1][6], Data::Bool(true));
    }

    #[test]
    fn test_empty_ledger_exports_headers_only() {
        let bytes = export_workbook(&[], &[]).unwrap();

        assert_eq!(worksheet(&bytes, TRANSACTIONS_SHEET).height(), 1);
        let holdings_sheet = worksheet(&bytes, HOLDINGS_SHEET);
        assert_eq!(holdings_sheet.height(), 1);
        assert_eq!(holdings_sheet.width(), 11);
        assert_eq!(
            holdings_sheet.get((0, 0)),
            Some(&Data::String("account_id".to_string()))
        );
    }
}
