pub mod whole_number {
    use std::fmt;

    use serde::de::{self, Deserializer, Visitor};

    /// Accepts JSON integers, floats without a fractional part (`5.0`) and
    /// integral strings (`"5"`), as HTML forms tend to send them.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(WholeNumberVisitor)
    }

    struct WholeNumberVisitor;

    impl<'de> Visitor<'de> for WholeNumberVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a whole number")
        }

        fn visit_i64<E>(self, value: i64) -> Result<i64, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<i64, E>
        where
            E: de::Error,
        {
            i64::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
        }

        fn visit_f64<E>(self, value: f64) -> Result<i64, E>
        where
            E: de::Error,
        {
            if value.fract() != 0.0 || !value.is_finite() || value.abs() > i64::MAX as f64 {
                return Err(E::invalid_value(de::Unexpected::Float(value), &self));
            }

            Ok(value as i64)
        }

        fn visit_str<E>(self, value: &str) -> Result<i64, E>
        where
            E: de::Error,
        {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }
}
