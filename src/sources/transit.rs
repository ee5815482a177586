//! Transit adapter
//!
//! Maps OV-chipkaart transaction log rows to `TransitRow`s. Trips are formed
//! later by the pairing stage.

use crate::error::TimelineError;
use crate::types::{RawRow, SourceKind, TransitKind, TransitRow};

use super::{field, parse_date, require, SourceAdapter};

/// Transaction log date format (`05-03-2018`)
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Transit log adapter
pub struct TransitAdapter;

impl SourceAdapter for TransitAdapter {
    type Record = TransitRow;

    fn kind(&self) -> SourceKind {
        SourceKind::Transit
    }

    fn normalize(&self, rows: &[RawRow]) -> Result<Vec<TransitRow>, TimelineError> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| normalize_row(row, index))
            .collect()
    }
}

fn normalize_row(row: &RawRow, index: usize) -> Result<TransitRow, TimelineError> {
    let kind = TransitKind::from_transaction(require(row, SourceKind::Transit, index, "Transactie")?);
    let date = parse_date(
        require(row, SourceKind::Transit, index, "Datum")?,
        DATE_FORMAT,
        SourceKind::Transit,
        index,
    )?;

    // A row carries either a check-in or a check-out time
    let time = field(row, "Check-in")
        .or_else(|| field(row, "Check-uit"))
        .map(str::to_string);

    Ok(TransitRow {
        kind,
        time,
        date,
        origin: field(row, "Vertrek").unwrap_or_default().to_string(),
        destination: field(row, "Bestemming").map(str::to_string),
        row: index + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::row;
    use chrono::NaiveDate;

    #[test]
    fn test_normalize_check_in_and_out() {
        let rows = vec![
            row(&[
                ("Datum", "05-03-2018"),
                ("Check-in", "08:12"),
                ("Vertrek", "Utrecht Centraal"),
                ("Check-uit", ""),
                ("Bestemming", ""),
                ("Transactie", "Check-in"),
            ]),
            row(&[
                ("Datum", "05-03-2018"),
                ("Check-in", ""),
                ("Vertrek", "Utrecht Centraal"),
                ("Check-uit", "08:41"),
                ("Bestemming", "Amsterdam Centraal"),
                ("Transactie", "Check-uit"),
            ]),
        ];

        let normalized = TransitAdapter.normalize(&rows).unwrap();
        assert_eq!(normalized.len(), 2);

        let check_in = &normalized[0];
        assert_eq!(check_in.kind, TransitKind::CheckIn);
        assert_eq!(check_in.time.as_deref(), Some("08:12"));
        assert_eq!(check_in.date, NaiveDate::from_ymd_opt(2018, 3, 5).unwrap());
        assert_eq!(check_in.destination, None);

        let check_out = &normalized[1];
        assert_eq!(check_out.kind, TransitKind::CheckOut);
        assert_eq!(check_out.time.as_deref(), Some("08:41"));
        assert_eq!(check_out.destination.as_deref(), Some("Amsterdam Centraal"));
        assert_eq!(check_out.row, 2);
    }

    #[test]
    fn test_keeps_other_transactions() {
        let rows = vec![row(&[
            ("Datum", "06-03-2018"),
            ("Transactie", "Saldo opgeladen"),
        ])];

        let normalized = TransitAdapter.normalize(&rows).unwrap();
        assert_eq!(
            normalized[0].kind,
            TransitKind::Other("Saldo opgeladen".to_string())
        );
        assert_eq!(normalized[0].time, None);
        assert_eq!(normalized[0].origin, "");
    }

    #[test]
    fn test_invalid_date() {
        let rows = vec![row(&[("Datum", "2018-03-05"), ("Transactie", "Check-in")])];
        let result = TransitAdapter.normalize(&rows);
        assert!(matches!(result, Err(TimelineError::DateParse { row: 1, .. })));
    }
}
