use finapis_shared::FinapisError;

/// Bar size of an OHLC request, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    SixtyMinutes,
    Daily,
}

impl Interval {
    pub const INTRADAY: [Interval; 5] = [
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::ThirtyMinutes,
        Interval::SixtyMinutes,
    ];

    pub fn minutes(self) -> u32 {
        match self {
            Interval::OneMinute => 1,
            Interval::FiveMinutes => 5,
            Interval::FifteenMinutes => 15,
            Interval::ThirtyMinutes => 30,
            Interval::SixtyMinutes => 60,
            Interval::Daily => 1440,
        }
    }

    pub fn is_intraday(self) -> bool {
        self != Interval::Daily
    }

    pub fn function(self) -> &'static str {
        if self.is_intraday() {
            "TIME_SERIES_INTRADAY"
        } else {
            "TIME_SERIES_DAILY_ADJUSTED"
        }
    }

    /// Format of the row keys in the provider's time series.
    pub fn timestamp_format(self) -> &'static str {
        if self.is_intraday() {
            "%Y-%m-%d %H:%M:%S"
        } else {
            "%Y-%m-%d"
        }
    }

    /// Columns the provider returns for this interval, used when the series is empty.
    pub fn default_columns(self) -> &'static [&'static str] {
        if self.is_intraday() {
            &["open", "high", "low", "close", "volume"]
        } else {
            &[
                "open",
                "high",
                "low",
                "close",
                "adjusted_close",
                "volume",
                "dividend_amount",
                "split_coefficient",
            ]
        }
    }
}

impl TryFrom<u32> for Interval {
    type Error = FinapisError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            1 => Ok(Interval::OneMinute),
            5 => Ok(Interval::FiveMinutes),
            15 => Ok(Interval::FifteenMinutes),
            30 => Ok(Interval::ThirtyMinutes),
            60 => Ok(Interval::SixtyMinutes),
            1440 => Ok(Interval::Daily),
            other => Err(FinapisError::InvalidArgument(format!(
                "{other} is invalid interval. Valid intervals: [1, 5, 15, 30, 60, 1440]"
            ))),
        }
    }
}
