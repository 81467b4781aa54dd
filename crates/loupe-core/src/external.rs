//! `Reflect` for third-party value types: `serde_json` trees, `chrono`
//! temporals and `chrono-tz` zones.

use chrono::{DateTime, Month, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::reflect::{EntryVisitor, Mapping, Reflect};
use crate::types::Kind;

impl Reflect for Value {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(match self {
            Value::Null => Kind::Null,
            Value::Bool(b) => Kind::Boolean(*b),
            Value::Number(n) => Kind::number(n),
            Value::String(s) => Kind::text(s),
            Value::Array(arr) => Kind::Sequence(arr),
            Value::Object(map) => Kind::Mapping(map),
        })
    }
}

impl Reflect for Map<String, Value> {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::Mapping(self))
    }
}

/// Entries come out in insertion order (`preserve_order`).
impl Mapping for Map<String, Value> {
    fn visit_entries(&self, visit: &mut EntryVisitor<'_>) -> Result<()> {
        for (key, value) in self {
            visit(key, value)?;
        }
        Ok(())
    }
}

impl<Tz> Reflect for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::label(self))
    }
}

macro_rules! label {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Result<Kind<'_>> {
                    Ok(Kind::label(self))
                }
            }
        )*
    };
}

label!(NaiveDate, NaiveTime, NaiveDateTime, Weekday, chrono_tz::Tz);

impl Reflect for Month {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::label(self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn label_of(value: &dyn Reflect) -> String {
        match value.reflect().unwrap() {
            Kind::Label(l) => l.into_owned(),
            other => panic!("expected label, got {other:?}"),
        }
    }

    #[test]
    fn naive_date_label() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(label_of(&d), "2024-03-09");
    }

    #[test]
    fn utc_datetime_label() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 0).unwrap();
        assert_eq!(label_of(&dt), "2024-03-09 14:30:00 UTC");
    }

    #[test]
    fn weekday_and_month_labels() {
        assert_eq!(label_of(&Weekday::Mon), "Mon");
        assert_eq!(label_of(&Month::March), "March");
    }

    #[test]
    fn timezone_label() {
        assert_eq!(label_of(&chrono_tz::Europe::Paris), "Europe/Paris");
    }

    #[test]
    fn json_categories() {
        assert!(matches!(json!(null).reflect().unwrap(), Kind::Null));
        assert!(matches!(json!(true).reflect().unwrap(), Kind::Boolean(true)));
        assert!(matches!(json!(2).reflect().unwrap(), Kind::Number(ref n) if n == "2"));
        assert!(matches!(json!([1]).reflect().unwrap(), Kind::Sequence(_)));
        assert!(matches!(json!({"a": 1}).reflect().unwrap(), Kind::Mapping(_)));
    }
}
