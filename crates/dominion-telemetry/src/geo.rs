//! Country/geo aggregation into ranked buckets.

use std::collections::HashMap;

use dominion_core::types::session::SessionRecord;
use dominion_core::types::stats::GeoBucket;

/// The displayed country label for a record: the country name when known,
/// else the two-letter code. Records carrying neither have no label.
///
/// This is the single fallback helper; the aggregator and the row
/// projection both go through it so the two can never diverge.
pub fn display_label(record: &SessionRecord) -> Option<&str> {
    record
        .country
        .as_deref()
        .or(record.country_code.as_deref())
}

/// Group records by country label, count occurrences, rank descending,
/// and truncate to the `top_n` largest buckets.
///
/// Records without any geo data contribute to no bucket. Ties are broken
/// by first-encountered-label order, so identical input order yields
/// identical output. An empty result is valid.
pub fn aggregate_by_country(records: &[SessionRecord], top_n: usize) -> Vec<GeoBucket> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for record in records {
        if let Some(label) = display_label(record) {
            let entry = counts.entry(label).or_insert(0);
            if *entry == 0 {
                order.push(label);
            }
            *entry += 1;
        }
    }

    let mut buckets: Vec<GeoBucket> = order
        .into_iter()
        .map(|label| GeoBucket {
            label: label.to_string(),
            count: counts[label],
        })
        .collect();

    // Stable sort keeps first-encounter order on equal counts.
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets.truncate(top_n);
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn record(country: Option<&str>, code: Option<&str>) -> SessionRecord {
        SessionRecord {
            id: Uuid::new_v4(),
            user: None,
            created_at: Utc::now(),
            last_activity: None,
            country_code: code.map(String::from),
            country: country.map(String::from),
            city: None,
            distro: None,
            os_name: None,
            terminal: None,
            public_ip: None,
            is_vpn: false,
        }
    }

    #[test]
    fn test_counts_sum_to_labelled_records() {
        let records = vec![
            record(Some("Spain"), Some("ES")),
            record(Some("Spain"), Some("ES")),
            record(None, Some("MX")),
            record(None, None),
        ];

        let buckets = aggregate_by_country(&records, 10);
        let total: u64 = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_descending_order_with_stable_ties() {
        let records = vec![
            record(Some("Chile"), None),
            record(Some("Spain"), None),
            record(Some("Spain"), None),
            record(Some("Mexico"), None),
        ];

        let buckets = aggregate_by_country(&records, 10);
        assert_eq!(buckets[0].label, "Spain");
        assert_eq!(buckets[0].count, 2);
        // Chile and Mexico tie at 1; Chile was seen first.
        assert_eq!(buckets[1].label, "Chile");
        assert_eq!(buckets[2].label, "Mexico");
    }

    #[test]
    fn test_code_fallback_when_name_absent() {
        let records = vec![record(None, Some("AR")), record(None, Some("AR"))];
        let buckets = aggregate_by_country(&records, 10);
        assert_eq!(buckets, vec![GeoBucket { label: "AR".to_string(), count: 2 }]);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let records = vec![
            record(Some("Spain"), None),
            record(Some("Spain"), None),
            record(Some("Spain"), None),
            record(Some("Chile"), None),
            record(Some("Chile"), None),
            record(Some("Mexico"), None),
        ];

        let buckets = aggregate_by_country(&records, 2);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "Spain");
        assert_eq!(buckets[1].label, "Chile");
    }

    #[test]
    fn test_no_geo_data_is_empty_not_error() {
        let records = vec![record(None, None), record(None, None)];
        assert!(aggregate_by_country(&records, 10).is_empty());
        assert!(aggregate_by_country(&[], 10).is_empty());
    }

    #[test]
    fn test_display_label_prefers_name() {
        let r = record(Some("Spain"), Some("ES"));
        assert_eq!(display_label(&r), Some("Spain"));
        let r = record(None, Some("ES"));
        assert_eq!(display_label(&r), Some("ES"));
        let r = record(None, None);
        assert_eq!(display_label(&r), None);
    }
}
