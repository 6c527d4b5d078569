//! Integration tests for types

#[cfg(test)]
mod tests {
    use bankers_types::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    #[test]
    fn test_process_id_display_and_parse() {
        let pid = ProcessId::new(3);
        assert_eq!(pid.to_string(), "P3");
        assert_eq!(ProcessId::from_str("P3").unwrap(), pid);
        assert_eq!(ProcessId::from_str(" 3 ").unwrap(), pid);
        assert!(ProcessId::from_str("Px").is_err());
    }

    #[test]
    fn test_process_id_serializes_as_index() {
        let json = serde_json::to_string(&vec![ProcessId::new(1), ProcessId::new(0)]).unwrap();
        assert_eq!(json, "[1,0]");
    }

    #[test]
    fn test_scan_order_names() {
        assert_eq!(ScanOrder::default(), ScanOrder::Sweep);
        assert_eq!(ScanOrder::parse("restart"), Some(ScanOrder::RestartAfterGrant));
        assert_eq!(ScanOrder::parse("sweep"), Some(ScanOrder::Sweep));
        assert_eq!(ScanOrder::parse("random"), None);

        let json = serde_json::to_string(&ScanOrder::RestartAfterGrant).unwrap();
        assert_eq!(json, r#""restart_after_grant""#);
        let parsed: ScanOrder = serde_json::from_str(r#""restart""#).unwrap();
        assert_eq!(parsed, ScanOrder::RestartAfterGrant);
    }

    #[test]
    fn test_input_format_from_extension() {
        assert_eq!(InputFormat::from_extension(Some("TOML")), InputFormat::Toml);
        assert_eq!(InputFormat::from_extension(Some("json")), InputFormat::Json);
        assert_eq!(InputFormat::from_extension(Some("txt")), InputFormat::Text);
        assert_eq!(InputFormat::from_extension(None), InputFormat::Text);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Tty);
    }

    proptest! {
        #[test]
        fn prop_matrix_rows_match_generator(rows in 0usize..8, cols in 0usize..8) {
            let m = Matrix::from_fn(rows, cols, |i, j| (i * cols + j) as u64);
            prop_assert_eq!(m.rows(), rows);
            prop_assert_eq!(m.cols(), cols);
            for (i, row) in m.iter_rows().enumerate() {
                for (j, value) in row.iter().enumerate() {
                    prop_assert_eq!(*value, (i * cols + j) as u64);
                }
            }
        }
    }
}
