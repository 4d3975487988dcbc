//! Time-series models shared by the resampler and the forecast merger

use std::fmt;
use std::str::FromStr;

/// Resampling granularity applied to every series plotted together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Monthly => "monthly",
            Period::Quarterly => "quarterly",
            Period::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" | "m" => Ok(Period::Monthly),
            "quarterly" | "q" => Ok(Period::Quarterly),
            "yearly" | "y" => Ok(Period::Yearly),
            _ => Err(format!("❌ Unknown period: '{}'. Supported: monthly, quarterly, yearly", s)),
        }
    }
}

/// Parallel date/value arrays after resampling. Always freshly allocated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampledSeries {
    pub dates: Vec<String>,
    pub values: Vec<Option<f64>>,
}

/// Historical and forecast series aligned on one label axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedSeries {
    pub labels: Vec<String>,
    pub historical: Vec<Option<f64>>,
    /// `None` when the forecast is disabled or empty; the caller skips the series
    pub forecast: Option<Vec<Option<f64>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse() {
        assert_eq!("Quarterly".parse::<Period>().unwrap(), Period::Quarterly);
        assert_eq!("y".parse::<Period>().unwrap(), Period::Yearly);
        assert!("weekly".parse::<Period>().is_err());
        assert_eq!(Period::default(), Period::Monthly);
    }
}
