#[cfg(test)]
mod tests {
    use crate::errors::Error;
    use crate::transactions::{
        parse_price, parse_quantity, prepare_rows, ColumnMapping, FileFormat, ImportError,
        TransactionSide, UploadKind, UploadOptions,
    };
    use crate::utils::read_sheet;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn upload_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_file_format_accepts_csv_and_xlsx() {
        assert_eq!(FileFormat::from_file_name("holdings.CSV").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_file_name("holdings.xlsx").unwrap(), FileFormat::Xlsx);
        assert!(matches!(
            FileFormat::from_file_name("holdings.xls"),
            Err(ImportError::UnsupportedFormat(_))
        ));
        assert!(FileFormat::from_file_name("notes.txt").is_err());
    }

    #[test]
    fn test_upload_kind_parsing_and_defaults() {
        assert_eq!(UploadKind::from_str("Holdings").unwrap(), UploadKind::Holdings);
        assert_eq!(UploadKind::from_str(" trades ").unwrap(), UploadKind::Trades);
        assert!(UploadKind::from_str("positions").is_err());

        let options = UploadOptions::new(UploadKind::Holdings, upload_date());
        assert_eq!(options.account_id, "Zerodha");
        assert_eq!(options.strategy, "Long Term");
        assert_eq!(
            UploadOptions::new(UploadKind::Trades, upload_date()).strategy,
            "Swing"
        );
    }

    #[test]
    fn test_resolve_prefers_first_alias_in_list_order() {
        // "Instrument" outranks "Symbol" even though it appears later in the file.
        let mapping = ColumnMapping::resolve(
            &headers(&["Symbol", "Qty", "Instrument", "Avg. cost", "Price"]),
            UploadKind::Holdings,
            FileFormat::Csv,
        )
        .unwrap();

        assert_eq!(mapping.symbol, 2);
        assert_eq!(mapping.quantity, 1);
        assert_eq!(mapping.price, 3);
        assert_eq!(mapping.side, None);
    }

    #[test]
    fn test_resolve_broker_statement_headers() {
        let mapping = ColumnMapping::resolve(
            &headers(&[
                "Client ID",
                "Company Name",
                "ISIN",
                "Total Quantity",
                "Avg Trading Price",
                "LTP",
            ]),
            UploadKind::Holdings,
            FileFormat::Xlsx,
        )
        .unwrap();

        assert_eq!((mapping.symbol, mapping.quantity, mapping.price), (1, 3, 4));
    }

    #[test]
    fn test_holdings_aliases_depend_on_format() {
        let sheet_headers = headers(&["Name", "Qty.", "Qty", "ATP", "Avg."]);

        let csv =
            ColumnMapping::resolve(&sheet_headers, UploadKind::Holdings, FileFormat::Csv).unwrap();
        assert_eq!((csv.quantity, csv.price), (1, 4));

        let xlsx =
            ColumnMapping::resolve(&sheet_headers, UploadKind::Holdings, FileFormat::Xlsx).unwrap();
        assert_eq!((xlsx.quantity, xlsx.price), (2, 3));

        let statement = headers(&["Company Name", "Total Quantity", "Avg Trading Price"]);
        assert!(matches!(
            ColumnMapping::resolve(&statement, UploadKind::Holdings, FileFormat::Csv),
            Err(ImportError::UnresolvedColumns(_))
        ));
    }

    #[test]
    fn test_resolve_reports_all_missing_fields_up_front() {
        let err = ColumnMapping::resolve(
            &headers(&["Symbol", "Side"]),
            UploadKind::Trades,
            FileFormat::Csv,
        )
        .unwrap_err();

        match err {
            ImportError::UnresolvedColumns(fields) => {
                assert_eq!(fields, vec!["quantity".to_string(), "price".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_trades_optional_columns() {
        let mapping = ColumnMapping::resolve(
            &headers(&["Date", "symbol", "quantity", "price", "side"]),
            UploadKind::Trades,
            FileFormat::Xlsx,
        )
        .unwrap();

        assert_eq!(mapping.date, Some(0));
        assert_eq!(mapping.side, Some(4));
    }

    #[test]
    fn test_parse_quantity_variants() {
        assert_eq!(parse_quantity("12").unwrap(), 12);
        assert_eq!(parse_quantity(" 12 Shares").unwrap(), 12);
        assert_eq!(parse_quantity("1 share").unwrap(), 1);
        assert_eq!(parse_quantity("1,200").unwrap(), 1200);
        assert_eq!(parse_quantity("10.0").unwrap(), 10);
        assert!(parse_quantity("10.5").is_err());
        assert!(parse_quantity("Shares 12").is_err());
        assert!(parse_quantity("ten").is_err());
    }

    #[test]
    fn test_parse_price_variants() {
        assert_eq!(parse_price("1,523.45").unwrap(), dec!(1523.45));
        assert_eq!(parse_price("1.5e2").unwrap(), dec!(150));
        assert!(parse_price("n/a").is_err());
    }

    #[test]
    fn test_prepare_holdings_rows_are_buys_on_upload_date() {
        let sheet = read_sheet(
            b"Instrument,Qty.,Avg. cost,LTP\nINFY,10,1450.5,1500\nTCS,4 Shares,3200,3300",
            None,
        )
        .unwrap();
        let mapping =
            ColumnMapping::resolve(&sheet.headers, UploadKind::Holdings, FileFormat::Csv).unwrap();
        let options = UploadOptions::new(UploadKind::Holdings, upload_date());

        let rows = prepare_rows(&sheet, &mapping, &options);

        assert_eq!(rows.len(), 2);
        let first = rows[0].1.as_ref().unwrap();
        assert_eq!(first.symbol, "INFY");
        assert_eq!(first.quantity, 10);
        assert_eq!(first.price, dec!(1450.5));
        assert_eq!(first.side, TransactionSide::Buy);
        assert_eq!(first.date, upload_date());
        assert_eq!(first.account_id, "Zerodha");
        assert_eq!(first.strategy, "Long Term");
        assert_eq!(rows[1].1.as_ref().unwrap().quantity, 4);
    }

    #[test]
    fn test_prepare_trade_rows_side_and_date() {
        let sheet = read_sheet(
            b"Date,Symbol,Qty,Price,Side\n2024-05-02,INFY,5,1400,sell\n,TCS,2,3000,\n03/05/2024,HDFC,1,1600,Buy",
            None,
        )
        .unwrap();
        let mapping =
            ColumnMapping::resolve(&sheet.headers, UploadKind::Trades, FileFormat::Csv).unwrap();
        let options = UploadOptions::new(UploadKind::Trades, upload_date());

        let rows = prepare_rows(&sheet, &mapping, &options);

        let sell = rows[0].1.as_ref().unwrap();
        assert_eq!(sell.side, TransactionSide::Sell);
        assert_eq!(sell.date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());

        let defaulted = rows[1].1.as_ref().unwrap();
        assert_eq!(defaulted.side, TransactionSide::Buy);
        assert_eq!(defaulted.date, upload_date());

        let third = rows[2].1.as_ref().unwrap();
        assert_eq!(third.date, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
    }

    #[test]
    fn test_prepare_rows_isolates_bad_rows() {
        let sheet = read_sheet(
            b"Symbol,Qty,Price,Side\nINFY,5,1400,BUY\n,3,100,BUY\nTCS,abc,100,BUY\nHDFC,2,1600,SHORT\nWIPRO,0,400,BUY\nITC,7,410,SELL",
            None,
        )
        .unwrap();
        let mapping =
            ColumnMapping::resolve(&sheet.headers, UploadKind::Trades, FileFormat::Csv).unwrap();
        let options = UploadOptions::new(UploadKind::Trades, upload_date());

        let rows = prepare_rows(&sheet, &mapping, &options);
        let failed: Vec<usize> = rows
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(idx, _)| *idx)
            .collect();

        assert_eq!(failed, vec![1, 2, 3, 4]);
        assert!(rows[0].1.is_ok());
        assert!(rows[5].1.is_ok());

        let missing = rows[1].1.as_ref().unwrap_err();
        assert_eq!(
            crate::transactions::row_error_message(missing),
            "Missing required fields."
        );
        assert!(matches!(
            rows[3].1.as_ref().unwrap_err(),
            Error::Validation(crate::errors::ValidationError::InvalidSide(_))
        ));
    }

    #[test]
    fn test_rows_of_empty_cells_are_missing_required_fields() {
        let sheet = read_sheet(b"Symbol,Qty,Price\nINFY,5,1400\n,,\nTCS,2,3000", None).unwrap();
        let mapping =
            ColumnMapping::resolve(&sheet.headers, UploadKind::Trades, FileFormat::Csv).unwrap();
        let options = UploadOptions::new(UploadKind::Trades, upload_date());

        let rows = prepare_rows(&sheet, &mapping, &options);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].0, 1);
        assert_eq!(
            crate::transactions::row_error_message(rows[1].1.as_ref().unwrap_err()),
            "Missing required fields."
        );
        assert_eq!(rows[2].1.as_ref().unwrap().symbol, "TCS");
    }
}
