//! Builds chart-ready data for the four analytics charts

use crate::api::analytics::models::{
    FarmPerformanceResponse, InvestmentSummaryResponse, MarketPriceResponse, RiskLevelsResponse,
    RoiTrendsResponse, WeatherYieldResponse,
};
use crate::models::chart::{self, category_color};
use crate::models::{ChartData, Dataset, ViewSettings};
use crate::services::forecast_service::{merge_with_forecast, pad_to};
use crate::services::resample_service::{resample, resample_values};

/// Actual ROI against a flat dashed target line
pub fn roi_trends_chart(data: &RoiTrendsResponse, view: &ViewSettings) -> ChartData {
    let sampled = resample(&data.dates, &data.roi_values, view.period);
    let target = vec![data.target_roi; sampled.dates.len()];

    ChartData {
        labels: sampled.dates,
        datasets: vec![
            Dataset::solid("Actual ROI", sampled.values, chart::SUCCESS),
            Dataset::dashed("Target ROI", target, chart::MUTED).without_fill(),
        ],
    }
}

/// Actual and predicted yields, with the future forecast when enabled
pub fn weather_yield_chart(data: &WeatherYieldResponse, view: &ViewSettings) -> ChartData {
    let actual = resample(&data.dates, &data.yields_actual, view.period);
    let predicted = resample_values(&data.dates, &data.yields_predicted, view.period);
    let future = resample(&data.future_dates, &data.future_predictions, view.period);

    let merged = merge_with_forecast(
        &actual.dates,
        &actual.values,
        &future.dates,
        &future.values,
        view.include_forecast,
    );
    let predicted = pad_to(&predicted, merged.labels.len());

    let mut datasets = vec![
        Dataset::solid("Actual Yield", merged.historical, chart::SUCCESS),
        Dataset::dashed("Predicted Yield", predicted, chart::INFO),
    ];
    if let Some(forecast) = merged.forecast {
        datasets.push(Dataset::dashed("Future Forecast", forecast, chart::WARNING));
    }

    ChartData {
        labels: merged.labels,
        datasets,
    }
}

/// Historical prices, with the price forecast when enabled
pub fn market_price_chart(data: &MarketPriceResponse, view: &ViewSettings) -> ChartData {
    let historical = resample(&data.dates, &data.historical_prices, view.period);
    let future = resample(&data.future_dates, &data.predicted_prices, view.period);

    let merged = merge_with_forecast(
        &historical.dates,
        &historical.values,
        &future.dates,
        &future.values,
        view.include_forecast,
    );

    let mut datasets = vec![Dataset::solid("Historical Price", merged.historical, chart::INFO)];
    if let Some(forecast) = merged.forecast {
        datasets.push(Dataset::dashed("Price Forecast", forecast, chart::WARNING));
    }

    ChartData {
        labels: merged.labels,
        datasets,
    }
}

/// Overall risk and its three components. Risk has no forecast.
pub fn risk_levels_chart(data: &RiskLevelsResponse, view: &ViewSettings) -> ChartData {
    let overall = resample(&data.dates, &data.overall_risks, view.period);
    let volatility = resample_values(&data.dates, &data.volatility_risks, view.period);
    let weather = resample_values(&data.dates, &data.weather_risks, view.period);
    let financial = resample_values(&data.dates, &data.financial_risks, view.period);
    let len = overall.dates.len();

    ChartData {
        labels: overall.dates,
        datasets: vec![
            Dataset::solid("Overall Risk", overall.values, chart::DANGER),
            Dataset::solid("Volatility Risk", pad_to(&volatility, len), chart::WARNING),
            Dataset::solid("Weather Risk", pad_to(&weather, len), chart::INFO),
            Dataset::solid("Financial Risk", pad_to(&financial, len), chart::PURPLE),
        ],
    }
}

/// Revenue, profit and expenses of a farm
pub fn farm_performance_chart(data: &FarmPerformanceResponse, view: &ViewSettings) -> ChartData {
    let revenue = resample(&data.dates, &data.revenues, view.period);
    let profit = resample_values(&data.dates, &data.profits, view.period);
    let expenses = resample_values(&data.dates, &data.expenses, view.period);
    let len = revenue.dates.len();

    ChartData {
        labels: revenue.dates,
        datasets: vec![
            Dataset::solid("Revenue", revenue.values, chart::INFO),
            Dataset::solid("Profit", pad_to(&profit, len), chart::SUCCESS),
            Dataset::solid("Expenses", pad_to(&expenses, len), chart::DANGER),
        ],
    }
}

/// One bar per farm type, each in its own palette colour
pub fn portfolio_distribution_chart(summary: &InvestmentSummaryResponse) -> ChartData {
    let labels = summary.farm_types.clone();
    let datasets = summary
        .investment_amounts
        .iter()
        .enumerate()
        .take(labels.len())
        .map(|(i, &amount)| {
            let mut values = vec![None; labels.len()];
            values[i] = Some(amount);
            Dataset::solid(&labels[i], values, category_color(i))
        })
        .collect();

    ChartData { labels, datasets }
}
