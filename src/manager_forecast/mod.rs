pub mod errors;
pub mod models;

use std::collections::HashMap;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use crate::manager_forecast::errors::{ForecastError, SampleFault};
use crate::manager_forecast::models::{DaySummary, Sample};

/// Buckets forecast samples into calendar days of the local time zone
///
/// # Arguments
///
/// * 'samples' - forecast samples, expected in ascending time order
pub fn aggregate_by_day(samples: &[Sample]) -> Result<Vec<DaySummary>, ForecastError> {
    aggregate_by_day_in(samples, &Local)
}

/// Buckets forecast samples into calendar days of the given time zone.
///
/// Every day gets the min/max temperature over all its samples, while condition,
/// humidity and wind speed are taken from the first sample of the day. Days are returned
/// in ascending date order. A sample without any temperature reading fails the whole call,
/// there is no partial result.
///
/// # Arguments
///
/// * 'samples' - forecast samples, expected in ascending time order
/// * 'tz' - time zone whose calendar defines the day boundaries
pub fn aggregate_by_day_in<Tz: TimeZone>(samples: &[Sample], tz: &Tz) -> Result<Vec<DaySummary>, ForecastError> {
    if samples.is_empty() {
        return Err(ForecastError::InvalidInput("no samples to aggregate".to_string()));
    }

    // Stable sort on a copy of the references, the caller's slice is left untouched
    let mut ordered: Vec<&Sample> = samples.iter().collect();
    ordered.sort_by_key(|s| s.timestamp_utc);

    let mut days: Vec<DaySummary> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in ordered {
        let (min, max) = sample.temperature_range()
            .ok_or(ForecastError::InvalidSample(sample.timestamp_utc, SampleFault::NoTemperature))?;
        let date = calendar_date(sample.timestamp_utc, tz)?;

        match index.get(&date) {
            Some(&i) => {
                let day = &mut days[i];
                day.temperature_min = day.temperature_min.min(min);
                day.temperature_max = day.temperature_max.max(max);
            },
            None => {
                index.insert(date, days.len());
                days.push(DaySummary {
                    date,
                    temperature_min: min,
                    temperature_max: max,
                    condition: sample.condition.clone(),
                    humidity: sample.humidity,
                    wind_speed: sample.wind_speed,
                });
            }
        }
    }

    Ok(days)
}

/// Returns at most `n` leading day summaries
///
/// # Arguments
///
/// * 'summaries' - aggregated days
/// * 'n' - max number of days to keep
pub fn first_days(summaries: &[DaySummary], n: usize) -> &[DaySummary] {
    &summaries[..n.min(summaries.len())]
}

fn calendar_date<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Result<NaiveDate, ForecastError> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(tz).date_naive())
        .ok_or(ForecastError::InvalidSample(timestamp, SampleFault::TimestampOutOfRange))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use crate::manager_forecast::models::Condition;

    const THREE_HOURS: i64 = 3 * 3600;

    fn day_start(y: i32, m: u32, d: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap().timestamp()
    }

    fn sample(ts: i64, temp: f64) -> Sample {
        Sample {
            timestamp_utc: ts,
            temperature: Some(temp),
            temperature_min: Some(temp),
            temperature_max: Some(temp),
            condition: Condition { main_category: "Clear".to_string(), icon_id: "01d".to_string() },
            humidity: 50,
            wind_speed: 2.0,
        }
    }

    fn with_weather(mut s: Sample, main: &str, icon: &str, humidity: u8, wind: f64) -> Sample {
        s.condition = Condition { main_category: main.to_string(), icon_id: icon.to_string() };
        s.humidity = humidity;
        s.wind_speed = wind;
        s
    }

    fn five_days() -> Vec<Sample> {
        let start = day_start(2024, 6, 3);
        (0..40)
            .map(|i| sample(start + i * THREE_HOURS, 10.0 + (i % 8) as f64 + (i / 8) as f64))
            .collect()
    }

    #[test]
    fn empty_input_is_rejected() {
        let result = aggregate_by_day_in(&[], &Utc);
        assert!(matches!(result, Err(ForecastError::InvalidInput(_))));
    }

    #[test]
    fn sample_without_temperature_is_rejected() {
        let start = day_start(2024, 6, 3);
        let mut broken = sample(start + THREE_HOURS, 0.0);
        broken.temperature = None;
        broken.temperature_min = None;
        broken.temperature_max = None;

        let result = aggregate_by_day_in(&[sample(start, 12.0), broken], &Utc);
        assert_eq!(result, Err(ForecastError::InvalidSample(start + THREE_HOURS, SampleFault::NoTemperature)));
    }

    #[test]
    fn unrepresentable_timestamp_is_reported_as_such() {
        let result = aggregate_by_day_in(&[sample(i64::MAX, 5.0)], &Utc);

        assert_eq!(result, Err(ForecastError::InvalidSample(i64::MAX, SampleFault::TimestampOutOfRange)));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("timestamp out of range"));
        assert!(!message.contains("temperature"));
    }

    #[test]
    fn partial_temperature_fields_are_usable() {
        let start = day_start(2024, 6, 3);
        let mut only_temp = sample(start, 14.0);
        only_temp.temperature_min = None;
        only_temp.temperature_max = None;
        let mut only_max = sample(start + THREE_HOURS, 0.0);
        only_max.temperature = None;
        only_max.temperature_min = None;
        only_max.temperature_max = Some(19.5);

        let days = aggregate_by_day_in(&[only_temp, only_max], &Utc).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].temperature_min, 14.0);
        assert_eq!(days[0].temperature_max, 19.5);
    }

    #[test]
    fn one_day_of_samples_gives_one_summary() {
        let start = day_start(2024, 6, 3);
        let temps = [11.0, 9.5, 8.0, 12.0, 17.5, 21.0, 18.0, 14.0];
        let samples: Vec<Sample> = temps.iter().enumerate()
            .map(|(i, t)| sample(start + i as i64 * THREE_HOURS, *t))
            .collect();

        let days = aggregate_by_day_in(&samples, &Utc).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(days[0].temperature_min, 8.0);
        assert_eq!(days[0].temperature_max, 21.0);
    }

    #[test]
    fn slot_min_max_widen_the_day() {
        let start = day_start(2024, 6, 3);
        let mut a = sample(start, 15.0);
        a.temperature_min = Some(13.2);
        let mut b = sample(start + THREE_HOURS, 16.0);
        b.temperature_max = Some(18.9);

        let days = aggregate_by_day_in(&[a, b], &Utc).unwrap();
        assert_eq!(days[0].temperature_min, 13.2);
        assert_eq!(days[0].temperature_max, 18.9);
    }

    #[test]
    fn five_days_in_chronological_order() {
        let days = aggregate_by_day_in(&five_days(), &Utc).unwrap();

        assert_eq!(days.len(), 5);
        for (i, day) in days.iter().enumerate() {
            assert_eq!(day.date, NaiveDate::from_ymd_opt(2024, 6, 3 + i as u32).unwrap());
            assert_eq!(day.temperature_min, 10.0 + i as f64);
            assert_eq!(day.temperature_max, 17.0 + i as f64);
            assert!(day.temperature_min <= day.temperature_max);
        }
        assert_eq!(first_days(&days, 5), &days[..]);
    }

    #[test]
    fn first_days_truncates() {
        let days = aggregate_by_day_in(&five_days(), &Utc).unwrap();

        assert_eq!(first_days(&days, 3).len(), 3);
        assert_eq!(first_days(&days, 3)[2].date, NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
        assert_eq!(first_days(&days, 7).len(), 5);
        assert!(first_days(&days, 0).is_empty());
    }

    #[test]
    fn midnight_splits_days() {
        let next = day_start(2024, 6, 4);
        let samples = vec![sample(next - 60, 9.0), sample(next, 7.0)];

        let days = aggregate_by_day_in(&samples, &Utc).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!((days[0].temperature_min, days[0].temperature_max), (9.0, 9.0));
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 6, 4).unwrap());
        assert_eq!((days[1].temperature_min, days[1].temperature_max), (7.0, 7.0));
    }

    #[test]
    fn day_boundaries_follow_time_zone() {
        // 22:00 and 23:00 UTC are already the next day two hours east of UTC
        let next = day_start(2024, 6, 4);
        let samples = vec![sample(next - 7200, 9.0), sample(next - 3600, 8.0), sample(next, 7.0)];

        assert_eq!(aggregate_by_day_in(&samples, &Utc).unwrap().len(), 2);

        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        let days = aggregate_by_day_in(&samples, &east).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 4).unwrap());
        assert_eq!(days[0].temperature_min, 7.0);
    }

    #[test]
    fn first_sample_of_day_is_representative() {
        let start = day_start(2024, 6, 3);
        let samples = vec![
            with_weather(sample(start, 10.0), "Clouds", "04n", 81, 1.5),
            with_weather(sample(start + THREE_HOURS, 12.0), "Rain", "10d", 95, 6.0),
            with_weather(sample(start + 2 * THREE_HOURS, 14.0), "Clear", "01d", 40, 3.0),
        ];

        let days = aggregate_by_day_in(&samples, &Utc).unwrap();
        assert_eq!(days[0].condition.main_category, "Clouds");
        assert_eq!(days[0].condition.icon_id, "04n");
        assert_eq!(days[0].humidity, 81);
        assert_eq!(days[0].wind_speed, 1.5);
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        let start = day_start(2024, 6, 3);
        let samples = vec![
            with_weather(sample(start + 86400, 5.0), "Snow", "13d", 90, 4.0),
            with_weather(sample(start + THREE_HOURS, 12.0), "Rain", "10d", 95, 6.0),
            with_weather(sample(start, 10.0), "Clouds", "04n", 81, 1.5),
        ];
        let before = samples.clone();

        let days = aggregate_by_day_in(&samples, &Utc).unwrap();
        assert_eq!(samples, before);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(days[0].condition.main_category, "Clouds");
        assert_eq!(days[1].condition.main_category, "Snow");
    }

    #[test]
    fn min_max_ignore_order_within_day() {
        let start = day_start(2024, 6, 3);
        let temps = [11.0, 9.5, 8.0, 12.0, 17.5, 21.0, 18.0, 14.0];
        let samples: Vec<Sample> = temps.iter().enumerate()
            .map(|(i, t)| sample(start + i as i64 * THREE_HOURS, *t))
            .collect();
        let mut shuffled = samples.clone();
        shuffled.reverse();
        shuffled.swap(1, 5);

        let a = aggregate_by_day_in(&samples, &Utc).unwrap();
        let b = aggregate_by_day_in(&shuffled, &Utc).unwrap();
        assert_eq!(a[0].temperature_min, b[0].temperature_min);
        assert_eq!(a[0].temperature_max, b[0].temperature_max);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let samples = five_days();
        assert_eq!(aggregate_by_day_in(&samples, &Utc), aggregate_by_day_in(&samples, &Utc));
        assert_eq!(aggregate_by_day(&samples), aggregate_by_day(&samples));
    }

    #[test]
    fn local_calendar_gives_one_entry_per_date() {
        let days = aggregate_by_day(&five_days()).unwrap();
        let mut dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
        let count = dates.len();
        dates.dedup();
        assert_eq!(dates.len(), count);
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
        assert!(days.iter().all(|d| d.temperature_min <= d.temperature_max));
    }
}
