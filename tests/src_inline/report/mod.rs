use super::*;
use crate::model::labels::LabelCounts;
use crate::model::well::Channel;
use crate::pipeline::stage6_trends::TrendSummary;
use crate::report::text::{render_trends_table, trend_statement};

#[test]
fn test_number_formatting() {
    assert_eq!(format_f64_3(1.0 / 3.0), "0.333");
    assert_eq!(format_pct(100.0 / 3.0), "33.3");
    assert_eq!(format_optional(None), "");
    assert_eq!(format_optional(Some(24.25)), "24.250");
}

#[test]
fn test_tsv_field_strips_separators() {
    assert_eq!(tsv_field("a\tb\nc\r"), "a b c ");
    assert_eq!(tsv_field("plain"), "plain");
}

#[test]
fn test_trend_statements() {
    assert_eq!(
        trend_statement(&TrendOutcome::Recorded { records: 3 }),
        "Recorded 3 trend record(s)."
    );
    assert_eq!(
        trend_statement(&TrendOutcome::Skipped {
            missing_channels: vec![Channel::Fam, Channel::Cy5]
        }),
        "Not recorded: missing FAM, Cy5."
    );
}

#[test]
fn test_trends_table() {
    let rows = vec![TrendSummary {
        test_code: "BVAB".to_string(),
        channel: Channel::Hex,
        target: "BVAB1".to_string(),
        experiments: 2,
        counts: LabelCounts {
            total: 8,
            positive: 2,
            negative: 6,
            indeterminate: 0,
        },
        positive_percentage: 25.0,
    }];
    let table = render_trends_table(&rows);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "BVAB\tHEX\tBVAB1\t2\t8\t2\t25.0");
}
