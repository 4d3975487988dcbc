use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::MergedSeries;

/// Right-pad (or cut) a series with gaps so it matches the label axis length
pub fn pad_to(values: &[Option<f64>], len: usize) -> Vec<Option<f64>> {
    let mut out: Vec<Option<f64>> = values.iter().copied().take(len).collect();
    out.resize(len, None);
    out
}

/// Join a historical series and its forecast continuation on one label axis.
///
/// The label axis is the historical dates followed by every forecast date that
/// is not already a historical date. The historical series is right-padded
/// with gaps; the forecast series is left-padded with one gap per historical
/// point and then carries the forecast values in order.
///
/// When a forecast date repeats a historical date the label is not appended
/// again, but the forecast values keep their index alignment, so the forecast
/// runs past the label axis by the number of overlapping dates. Those trailing
/// values are cut and the overlap is logged.
pub fn merge_with_forecast(
    historical_dates: &[String],
    historical_values: &[Option<f64>],
    forecast_dates: &[String],
    forecast_values: &[Option<f64>],
    include_forecast: bool,
) -> MergedSeries {
    if !include_forecast || forecast_dates.is_empty() || forecast_values.is_empty() {
        return MergedSeries {
            labels: historical_dates.to_vec(),
            historical: historical_values.to_vec(),
            forecast: None,
        };
    }

    let known: HashSet<&str> = historical_dates.iter().map(String::as_str).collect();

    let mut labels = historical_dates.to_vec();
    let mut overlap = 0usize;
    for date in forecast_dates {
        if known.contains(date.as_str()) {
            overlap += 1;
        } else {
            labels.push(date.clone());
        }
    }

    let historical = pad_to(historical_values, labels.len());

    let mut forecast: Vec<Option<f64>> = vec![None; historical_dates.len()];
    forecast.extend(forecast_values.iter().copied());
    if forecast.len() > labels.len() {
        warn!(
            "Forecast overlaps {} historical date(s); dropping {} trailing forecast value(s)",
            overlap,
            forecast.len() - labels.len()
        );
    }
    let forecast = pad_to(&forecast, labels.len());

    debug!(
        "Merged {} historical and {} forecast point(s) into {} label(s)",
        historical_dates.len(),
        forecast_dates.len(),
        labels.len()
    );

    MergedSeries {
        labels,
        historical,
        forecast: Some(forecast),
    }
}
