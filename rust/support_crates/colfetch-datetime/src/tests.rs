use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{Date, DateTime, Time};

#[test]
fn test_date_components_and_display() {
    let date = Date::new(2023, 12, 25);
    assert_eq!(date.year(), 2023);
    assert_eq!(date.month(), 12);
    assert_eq!(date.day(), 25);
    assert_eq!(date.to_string(), "2023-12-25");
    assert!(date.is_valid());
}

#[test]
fn test_unvalidated_components_are_kept() {
    // A zeroed driver structure decodes to this.
    let date = Date::new(0, 0, 0);
    assert!(!date.is_valid());
    assert_eq!(date.to_naive(), None);
    assert_eq!(Date::default(), date);

    assert!(Date::try_new(2023, 2, 29).is_err());
    assert!(Time::try_new(24, 0, 0).is_err());
    assert!(DateTime::try_new(Date::new(2024, 1, 1), Time::MIDNIGHT, 1_000_000_000).is_err());
}

#[test]
fn test_chrono_round_trip() {
    let naive = NaiveDate::from_ymd_opt(1999, 1, 31).unwrap();
    assert_eq!(Date::from(naive).to_naive(), Some(naive));

    let naive = NaiveTime::from_hms_opt(23, 59, 58).unwrap();
    assert_eq!(Time::from(naive).to_naive(), Some(naive));
    assert_eq!(Time::from(naive).seconds_from_midnight(), 86398);

    let naive = NaiveDateTime::parse_from_str("2020-02-29 12:34:56.000000789", "%Y-%m-%d %H:%M:%S%.f")
        .unwrap();
    let dt = DateTime::from(naive);
    assert_eq!(dt.nanosecond(), 789);
    assert_eq!(dt.to_naive(), Some(naive));
}

#[test]
fn test_parse() {
    assert_eq!("2001-09-11".parse::<Date>().unwrap(), Date::new(2001, 9, 11));
    assert_eq!("07:08:09".parse::<Time>().unwrap(), Time::new(7, 8, 9));
    assert_eq!(
        "2001-09-11T07:08:09.5".parse::<DateTime>().unwrap(),
        DateTime::from_ymd_hms_nano(2001, 9, 11, 7, 8, 9, 500_000_000)
    );
    assert!("2001-13-01".parse::<Date>().is_err());
    assert!("noon".parse::<Time>().is_err());
}

#[test]
fn test_display_fraction() {
    let dt = DateTime::from_ymd_hms_nano(2010, 10, 10, 1, 2, 3, 0);
    assert_eq!(dt.to_string(), "2010-10-10 01:02:03");
    let dt = DateTime::from_ymd_hms_nano(2010, 10, 10, 1, 2, 3, 42);
    assert_eq!(dt.to_string(), "2010-10-10 01:02:03.000000042");
    assert_eq!(dt.to_string().parse::<DateTime>().unwrap(), dt);
}

#[test]
fn test_serde() {
    let dt = DateTime::from_ymd_hms_nano(1970, 1, 1, 0, 0, 1, 7);
    let json = serde_json::to_string(&dt).unwrap();
    let back: DateTime = serde_json::from_str(&json).unwrap();
    assert_eq!(back, dt);
}
