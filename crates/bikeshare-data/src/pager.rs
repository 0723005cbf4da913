use bikeshare_core::models::{Dataset, TripRecord};

/// Rows returned by each call to [`next_page`].
pub const PAGE_SIZE: usize = 5;

/// The next [`PAGE_SIZE`] rows starting at `cursor`, and the cursor to pass
/// on the following call.
///
/// Once the end is reached every further call returns an empty slice and a
/// cursor equal to the dataset length.
pub fn next_page(dataset: &Dataset, cursor: usize) -> (&[TripRecord], usize) {
    let len = dataset.len();
    let start = cursor.min(len);
    let end = start.saturating_add(PAGE_SIZE).min(len);
    (&dataset.records[start..end], end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::ColumnSet;
    use bikeshare_core::time_utils::parse_start_time;

    fn seven_rows() -> Dataset {
        let records = (0..7)
            .map(|i| {
                TripRecord::new(
                    parse_start_time("2017-04-03 12:00:00").unwrap(),
                    format!("Station {i}"),
                    "Dock",
                    300.0,
                )
            })
            .collect();
        Dataset::new(records, ColumnSet::default())
    }

    #[test]
    fn test_pages_through_seven_rows() {
        let ds = seven_rows();

        let (rows, cursor) = next_page(&ds, 0);
        assert_eq!(rows, &ds.records[0..5]);
        assert_eq!(cursor, 5);

        let (rows, cursor) = next_page(&ds, cursor);
        assert_eq!(rows, &ds.records[5..7]);
        assert_eq!(cursor, 7);

        for _ in 0..3 {
            let (rows, next) = next_page(&ds, cursor);
            assert!(rows.is_empty());
            assert_eq!(next, 7);
        }
    }

    #[test]
    fn test_cursor_far_past_end() {
        let ds = seven_rows();
        let (rows, cursor) = next_page(&ds, usize::MAX);
        assert!(rows.is_empty());
        assert_eq!(cursor, 7);
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::default();
        let (rows, cursor) = next_page(&ds, 0);
        assert!(rows.is_empty());
        assert_eq!(cursor, 0);
    }
}
