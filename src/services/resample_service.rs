use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::{Period, SampledSeries};

/// Reduce a series to a coarser period by selection, never by averaging.
///
/// * `Monthly` keeps every point.
/// * `Quarterly` keeps indices 0, 3, 6, ...
/// * `Yearly` keeps the first point of each distinct calendar year, keyed on the
///   four-digit year prefix of the date string.
///
/// Empty input yields an empty series. The inputs are never aliased by the output.
pub fn resample(dates: &[String], values: &[Option<f64>], period: Period) -> SampledSeries {
    if dates.is_empty() || values.is_empty() {
        return SampledSeries::default();
    }

    if dates.len() != values.len() {
        warn!(
            "Resampling series with {} dates but {} values; extra entries are ignored",
            dates.len(),
            values.len()
        );
    }

    let pairs = dates.iter().zip(values.iter());

    let (dates, values): (Vec<String>, Vec<Option<f64>>) = match period {
        Period::Monthly => pairs.map(|(d, v)| (d.clone(), *v)).unzip(),
        Period::Quarterly => pairs
            .enumerate()
            .filter(|(i, _)| i % 3 == 0)
            .map(|(_, (d, v))| (d.clone(), *v))
            .unzip(),
        Period::Yearly => {
            let mut seen_years: HashSet<&str> = HashSet::new();
            let mut skipped = 0usize;
            let mut out_dates = Vec::new();
            let mut out_values = Vec::new();

            for (date, value) in pairs {
                match year_key(date) {
                    Some(year) => {
                        if seen_years.insert(year) {
                            out_dates.push(date.clone());
                            out_values.push(*value);
                        }
                    }
                    None => skipped += 1,
                }
            }

            if skipped > 0 {
                warn!("Yearly resampling skipped {} point(s) without a YYYY date prefix", skipped);
            }

            (out_dates, out_values)
        }
    };

    debug!("Resampled series to {} {} point(s)", dates.len(), period);

    SampledSeries { dates, values }
}

/// Four-digit year prefix of an ISO-8601 date, if present
fn year_key(date: &str) -> Option<&str> {
    let prefix = date.get(..4)?;
    if prefix.bytes().all(|b| b.is_ascii_digit()) {
        Some(prefix)
    } else {
        None
    }
}

/// Resample values that share an already-known date axis
pub fn resample_values(dates: &[String], values: &[Option<f64>], period: Period) -> Vec<Option<f64>> {
    resample(dates, values, period).values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn values(items: &[f64]) -> Vec<Option<f64>> {
        items.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_monthly_is_identity() {
        let d = dates(&["2021-01-01", "2021-02-01", "2021-03-01"]);
        let v = vec![Some(1.0), None, Some(3.0)];

        let out = resample(&d, &v, Period::Monthly);
        assert_eq!(out.dates, d);
        assert_eq!(out.values, v);
    }

    #[test]
    fn test_quarterly_keeps_every_third_index() {
        let d = dates(&[
            "2021-01-01", "2021-02-01", "2021-03-01", "2021-04-01", "2021-05-01",
            "2021-06-01", "2021-07-01",
        ]);
        let v = values(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let out = resample(&d, &v, Period::Quarterly);
        assert_eq!(out.dates, dates(&["2021-01-01", "2021-04-01", "2021-07-01"]));
        assert_eq!(out.values, values(&[0.0, 3.0, 6.0]));
    }

    #[test]
    fn test_yearly_keeps_first_point_per_year() {
        let d = dates(&["2021-01-01", "2021-06-01", "2022-01-01"]);
        let v = values(&[1.0, 2.0, 3.0]);

        let out = resample(&d, &v, Period::Yearly);
        assert_eq!(out.dates, dates(&["2021-01-01", "2022-01-01"]));
        assert_eq!(out.values, values(&[1.0, 3.0]));
    }

    #[test]
    fn test_yearly_drops_revisited_year() {
        let d = dates(&["2021-01-01", "2022-01-01", "2021-12-01"]);
        let v = values(&[1.0, 2.0, 3.0]);

        let out = resample(&d, &v, Period::Yearly);
        assert_eq!(out.dates, dates(&["2021-01-01", "2022-01-01"]));
    }

    #[test]
    fn test_yearly_skips_malformed_dates() {
        let d = dates(&["Jan 2021", "2021-03-01", "20", "2022-01-01"]);
        let v = values(&[1.0, 2.0, 3.0, 4.0]);

        let out = resample(&d, &v, Period::Yearly);
        assert_eq!(out.dates, dates(&["2021-03-01", "2022-01-01"]));
        assert_eq!(out.values, values(&[2.0, 4.0]));
    }

    #[test]
    fn test_lengths_stay_aligned_for_every_period() {
        let d = dates(&[
            "2020-11-01", "2020-12-01", "2021-01-01", "2021-02-01", "2021-03-01",
        ]);
        let v = values(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        for period in [Period::Monthly, Period::Quarterly, Period::Yearly] {
            let out = resample(&d, &v, period);
            assert_eq!(out.dates.len(), out.values.len(), "period {}", period);
        }
    }

    #[test]
    fn test_empty_input_returns_empty_series() {
        let out = resample(&[], &[], Period::Quarterly);
        assert!(out.dates.is_empty());
        assert!(out.values.is_empty());

        let out = resample(&dates(&["2021-01-01"]), &[], Period::Monthly);
        assert!(out.dates.is_empty());
    }

    #[test]
    fn test_mismatched_lengths_are_truncated_pairwise() {
        let d = dates(&["2021-01-01", "2021-02-01", "2021-03-01"]);
        let v = values(&[1.0, 2.0]);

        let out = resample(&d, &v, Period::Monthly);
        assert_eq!(out.dates.len(), 2);
        assert_eq!(out.values.len(), 2);
    }
}
