//! Public holiday oracle with network lookup and static regional fallback.
//!
//! The primary source is an HTTP endpoint in the nager.at style: a GET
//! request answering 200 for "public holiday today" and 204 for "not a
//! holiday". When the endpoint is unreachable or answers anything else, the
//! chain falls back to a computed table of German statutory holidays for the
//! configured state. If both sources fail the chain reports "not a holiday"
//! (fail open).

use chrono::{Datelike, NaiveDate, Weekday};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::HolidayConfig;

/// Answers whether a date is a public holiday.
pub trait HolidayOracle {
    /// Returns true if `date` is a public holiday in the oracle's region.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Computes the date of Easter Sunday for a year (Gregorian calendar).
///
/// Uses the anonymous Gregorian computus. Most German public holidays are
/// fixed offsets from this date.
///
/// # Example
///
/// ```
/// use catcher_engine::calendar::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2025), NaiveDate::from_ymd_opt(2025, 4, 20).unwrap());
/// assert_eq!(easter_sunday(2026), NaiveDate::from_ymd_opt(2026, 4, 5).unwrap());
/// ```
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 4, 1).unwrap())
}

/// The Wednesday before November 23rd (Buß- und Bettag, Saxony only).
fn penance_day(year: i32) -> NaiveDate {
    let mut date = NaiveDate::from_ymd_opt(year, 11, 22).unwrap();
    while date.weekday() != Weekday::Wed {
        date = date.pred_opt().unwrap();
    }
    date
}

/// Static table of German statutory public holidays, keyed by state code.
///
/// Serves as the offline fallback when the holiday endpoint cannot be
/// reached, and as the sole source for historical dates when walking back
/// through past working days.
#[derive(Debug, Clone)]
pub struct RegionalHolidayTable {
    region: String,
}

impl RegionalHolidayTable {
    /// Creates a table for the given German state code (e.g. "BW", "BY").
    ///
    /// Unknown codes fall back to the nationwide holiday set.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into().to_uppercase(),
        }
    }

    /// The configured state code.
    pub fn region(&self) -> &str {
        &self.region
    }

    fn nationwide(date: NaiveDate) -> bool {
        let easter = easter_sunday(date.year());
        let fixed = matches!(
            (date.month(), date.day()),
            (1, 1) | (5, 1) | (10, 3) | (12, 25) | (12, 26)
        );
        fixed
            || date == easter - chrono::Duration::days(2) // Good Friday
            || date == easter + chrono::Duration::days(1) // Easter Monday
            || date == easter + chrono::Duration::days(39) // Ascension
            || date == easter + chrono::Duration::days(50) // Whit Monday
    }

    fn regional(&self, date: NaiveDate) -> bool {
        let easter = easter_sunday(date.year());
        let corpus_christi = easter + chrono::Duration::days(60);
        let epiphany = (date.month(), date.day()) == (1, 6);
        let assumption = (date.month(), date.day()) == (8, 15);
        let all_saints = (date.month(), date.day()) == (11, 1);
        let reformation = (date.month(), date.day()) == (10, 31);
        let womens_day = (date.month(), date.day()) == (3, 8);

        match self.region.as_str() {
            "BW" => epiphany || date == corpus_christi || all_saints,
            "BY" => epiphany || date == corpus_christi || assumption || all_saints,
            "BE" => womens_day,
            "BB" | "HB" | "HH" | "MV" | "NI" | "SH" => reformation,
            "HE" => date == corpus_christi,
            "NW" | "RP" => date == corpus_christi || all_saints,
            "SL" => date == corpus_christi || assumption || all_saints,
            "SN" => reformation || date == penance_day(date.year()),
            "ST" => epiphany || reformation,
            "TH" => reformation || womens_day,
            _ => false,
        }
    }
}

impl HolidayOracle for RegionalHolidayTable {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        Self::nationwide(date) || self.regional(date)
    }
}

/// Network holiday probe in the nager.at `IsTodayPublicHoliday` style.
///
/// The stock endpoint answers for the current day only, which matches how
/// the calendar gate uses it: it is only ever consulted about "today".
/// Historical lookups go straight to the static table.
#[derive(Debug, Clone)]
pub struct HolidayApi {
    url: String,
    timeout: Duration,
}

impl HolidayApi {
    /// Creates a probe for the given endpoint.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    /// Queries the endpoint.
    ///
    /// Returns `Some(true)` on HTTP 200, `Some(false)` on 204, and `None`
    /// for any other status or transport failure, which the caller treats
    /// as "ask the fallback".
    pub fn probe(&self) -> Option<bool> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .ok()?;

        match client.get(&self.url).send() {
            Ok(response) => match response.status().as_u16() {
                200 => {
                    info!("holiday detected via web service");
                    Some(true)
                }
                204 => {
                    debug!("no holiday today (web service)");
                    Some(false)
                }
                status => {
                    warn!(status, "holiday web service returned unexpected status");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "holiday web service failed, falling back to static table");
                None
            }
        }
    }
}

/// The full fallback chain: network probe first, static table second.
#[derive(Debug, Clone)]
pub struct HolidayChain {
    api: Option<HolidayApi>,
    table: RegionalHolidayTable,
}

impl HolidayChain {
    /// Builds the chain from configuration.
    pub fn from_config(config: &HolidayConfig) -> Self {
        let api = config
            .api_url
            .as_ref()
            .map(|url| HolidayApi::new(url.clone(), Duration::from_secs(config.timeout_secs)));
        Self {
            api,
            table: RegionalHolidayTable::new(config.region.clone()),
        }
    }

    /// Builds a chain without a network probe (table only).
    pub fn table_only(region: impl Into<String>) -> Self {
        Self {
            api: None,
            table: RegionalHolidayTable::new(region),
        }
    }

    /// The static table used as the fallback source.
    pub fn table(&self) -> &RegionalHolidayTable {
        &self.table
    }
}

impl HolidayOracle for HolidayChain {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        if let Some(api) = &self.api {
            if let Some(answer) = api.probe() {
                return answer;
            }
        }
        self.table.is_holiday(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    // ==========================================================================
    // Easter computus
    // ==========================================================================
    #[test]
    fn test_easter_known_dates() {
        assert_eq!(easter_sunday(2024), date("2024-03-31"));
        assert_eq!(easter_sunday(2025), date("2025-04-20"));
        assert_eq!(easter_sunday(2026), date("2026-04-05"));
        assert_eq!(easter_sunday(2027), date("2027-03-28"));
    }

    // ==========================================================================
    // Nationwide holidays
    // ==========================================================================
    #[test]
    fn test_new_year_is_holiday_everywhere() {
        let table = RegionalHolidayTable::new("XX");
        assert!(table.is_holiday(date("2026-01-01")));
    }

    #[test]
    fn test_christmas_days_are_holidays() {
        let table = RegionalHolidayTable::new("BW");
        assert!(table.is_holiday(date("2025-12-25")));
        assert!(table.is_holiday(date("2025-12-26")));
        assert!(!table.is_holiday(date("2025-12-24")));
    }

    #[test]
    fn test_good_friday_and_easter_monday_2026() {
        let table = RegionalHolidayTable::new("BW");
        // Easter Sunday 2026 is April 5th
        assert!(table.is_holiday(date("2026-04-03")));
        assert!(table.is_holiday(date("2026-04-06")));
        assert!(!table.is_holiday(date("2026-04-07")));
    }

    #[test]
    fn test_ascension_and_whit_monday_2025() {
        let table = RegionalHolidayTable::new("XX");
        // Easter Sunday 2025 is April 20th
        assert!(table.is_holiday(date("2025-05-29")));
        assert!(table.is_holiday(date("2025-06-09")));
    }

    // ==========================================================================
    // Regional holidays
    // ==========================================================================
    #[test]
    fn test_epiphany_only_in_bw_by_st() {
        let day = date("2026-01-06");
        assert!(RegionalHolidayTable::new("BW").is_holiday(day));
        assert!(RegionalHolidayTable::new("BY").is_holiday(day));
        assert!(RegionalHolidayTable::new("ST").is_holiday(day));
        assert!(!RegionalHolidayTable::new("NW").is_holiday(day));
    }

    #[test]
    fn test_corpus_christi_in_bw_2025() {
        // Easter Sunday 2025 + 60 days = June 19th
        let day = date("2025-06-19");
        assert!(RegionalHolidayTable::new("BW").is_holiday(day));
        assert!(!RegionalHolidayTable::new("HH").is_holiday(day));
    }

    #[test]
    fn test_all_saints_in_bw_not_in_sh() {
        let day = date("2025-11-01");
        assert!(RegionalHolidayTable::new("BW").is_holiday(day));
        assert!(!RegionalHolidayTable::new("SH").is_holiday(day));
    }

    #[test]
    fn test_reformation_day_in_north_not_in_bw() {
        let day = date("2025-10-31");
        assert!(RegionalHolidayTable::new("HH").is_holiday(day));
        assert!(RegionalHolidayTable::new("SN").is_holiday(day));
        assert!(!RegionalHolidayTable::new("BW").is_holiday(day));
    }

    #[test]
    fn test_penance_day_is_a_wednesday_in_sn() {
        // Wednesday before 2025-11-23 is 2025-11-19
        let day = date("2025-11-19");
        assert_eq!(day.weekday(), Weekday::Wed);
        assert!(RegionalHolidayTable::new("SN").is_holiday(day));
        assert!(!RegionalHolidayTable::new("BW").is_holiday(day));
    }

    #[test]
    fn test_region_code_is_case_insensitive() {
        let table = RegionalHolidayTable::new("bw");
        assert!(table.is_holiday(date("2026-01-06")));
    }

    #[test]
    fn test_plain_tuesday_is_not_a_holiday() {
        let table = RegionalHolidayTable::new("BW");
        assert!(!table.is_holiday(date("2025-12-16")));
    }

    // ==========================================================================
    // Fallback chain
    // ==========================================================================
    #[test]
    fn test_table_only_chain_uses_static_table() {
        let chain = HolidayChain::table_only("BW");
        assert!(chain.is_holiday(date("2025-12-25")));
        assert!(!chain.is_holiday(date("2025-12-16")));
    }

    #[test]
    fn test_chain_with_unreachable_api_fails_over_to_table() {
        // The probe against a closed port errors out and the chain must
        // fall through to the static table.
        let chain = HolidayChain {
            api: Some(HolidayApi::new(
                "http://127.0.0.1:1/holiday",
                Duration::from_millis(50),
            )),
            table: RegionalHolidayTable::new("BW"),
        };
        assert!(chain.is_holiday(date("2025-12-25")));
        assert!(!chain.is_holiday(date("2025-12-16")));
    }
}
