use crate::error::ParameterError;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deployment instance whose logs are queried separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instance {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

impl Instance {
    pub const ALL: [Instance; 2] = [Instance::One, Instance::Two];

    /// Wire representation (`"1"` or `"2"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Instance::One => "1",
            Instance::Two => "2",
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Instance {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Instance::One),
            "2" => Ok(Instance::Two),
            other => Err(ParameterError::Invalid {
                key: "instance",
                value: other.to_string(),
                expected: "1, 2".into(),
            }),
        }
    }
}

/// Parameters of the log listing endpoint (`/ialirt-log-query`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogQuery {
    /// Year of the logs, e.g. `"2024"`.
    pub year: String,
    /// Zero-padded day of year, e.g. `"045"`.
    pub doy: String,
    pub instance: Instance,
}

impl LogQuery {
    /// Accepted keys, in wire order.
    pub const KEYS: [&'static str; 3] = ["year", "doy", "instance"];

    pub fn new(year: impl Into<String>, doy: impl Into<String>, instance: Instance) -> Self {
        Self {
            year: year.into(),
            doy: doy.into(),
            instance,
        }
    }

    /// Build from dynamic key/value pairs. The key set must be exactly
    /// `year`, `doy`, `instance`.
    ///
    /// ```
    /// # use ialirt_data_access::{Instance, LogQuery};
    /// let q = LogQuery::from_params([("year", "2024"), ("doy", "045"), ("instance", "1")])?;
    /// assert_eq!(q.instance, Instance::One);
    /// assert!(LogQuery::from_params([("bad_param", "test")]).is_err());
    /// # Ok::<(), ialirt_data_access::ParameterError>(())
    /// ```
    pub fn from_params<I, K, V>(params: I) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let [year, doy, instance] = take_params(params, Self::KEYS)?;
        Ok(Self {
            year,
            doy,
            instance: instance.parse()?,
        })
    }

    /// `year=..&doy=..&instance=..`
    pub fn to_query_string(&self) -> String {
        encode_query(&[
            ("year", self.year.as_str()),
            ("doy", self.doy.as_str()),
            ("instance", self.instance.as_str()),
        ])
    }
}

/// Parameters of the algorithm database endpoint (`/ialirt-db-query/query`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmQuery {
    /// Start of the range, mission elapsed time.
    pub met_start: String,
    /// End of the range, mission elapsed time.
    pub met_end: String,
    pub product_name: String,
}

impl AlgorithmQuery {
    /// Accepted keys, in wire order.
    pub const KEYS: [&'static str; 3] = ["met_start", "met_end", "product_name"];

    pub fn new(
        met_start: impl Into<String>,
        met_end: impl Into<String>,
        product_name: impl Into<String>,
    ) -> Self {
        Self {
            met_start: met_start.into(),
            met_end: met_end.into(),
            product_name: product_name.into(),
        }
    }

    /// Build from dynamic key/value pairs. The key set must be exactly
    /// `met_start`, `met_end`, `product_name`.
    pub fn from_params<I, K, V>(params: I) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let [met_start, met_end, product_name] = take_params(params, Self::KEYS)?;
        Ok(Self {
            met_start,
            met_end,
            product_name,
        })
    }

    pub fn to_query_string(&self) -> String {
        encode_query(&[
            ("met_start", self.met_start.as_str()),
            ("met_end", self.met_end.as_str()),
            ("product_name", self.product_name.as_str()),
        ])
    }
}

/// Match `params` against the closed key set `keys`, returning the values in key order.
fn take_params<const N: usize, I, K, V>(
    params: I,
    keys: [&'static str; N],
) -> Result<[String; N], ParameterError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut slots: [Option<String>; N] = std::array::from_fn(|_| None);
    for (k, v) in params {
        let k = k.as_ref();
        let idx = keys
            .iter()
            .position(|key| *key == k)
            .ok_or_else(|| ParameterError::Unknown(k.to_string()))?;
        if slots[idx].is_some() {
            return Err(ParameterError::Duplicate(keys[idx]));
        }
        slots[idx] = Some(v.into());
    }

    let mut out: [String; N] = std::array::from_fn(|_| String::new());
    for (idx, slot) in slots.into_iter().enumerate() {
        out[idx] = slot.ok_or(ParameterError::Missing(keys[idx]))?;
    }
    Ok(out)
}

// Form encoding: only alphanumerics and -._~ pass through, spaces become '+'.
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn enc(s: &str) -> String {
    // '%' itself is escaped to %25, so every %20 left here came from a space.
    percent_encoding::utf8_percent_encode(s, FORM)
        .to_string()
        .replace("%20", "+")
}

/// Encode pairs as an `application/x-www-form-urlencoded` query string, in order.
pub fn encode_query(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", enc(k), enc(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn log_query_string_keeps_wire_order() {
        let q = LogQuery::new("2024", "045", Instance::One);
        assert_eq!(q.to_query_string(), "year=2024&doy=045&instance=1");
    }

    #[test]
    fn algorithm_query_string_keeps_wire_order() {
        let q = AlgorithmQuery::new("100", "130", "codicelo_product_1");
        assert_eq!(
            q.to_query_string(),
            "met_start=100&met_end=130&product_name=codicelo_product_1"
        );
    }

    #[test]
    fn encoding_escapes_reserved_characters() {
        assert_eq!(
            encode_query(&[("product_name", "a b&c=d/e%")]),
            "product_name=a+b%26c%3Dd%2Fe%25"
        );
        assert_eq!(encode_query(&[("k", "x-y_z.w~")]), "k=x-y_z.w~");
        assert_eq!(encode_query(&[]), "");
    }

    #[test]
    fn from_params_accepts_any_order() {
        let mut map = BTreeMap::new();
        map.insert("instance", "2");
        map.insert("year", "2025");
        map.insert("doy", "001");
        let q = LogQuery::from_params(map).unwrap();
        assert_eq!(q, LogQuery::new("2025", "001", Instance::Two));
    }

    #[test]
    fn from_params_rejects_unknown_key() {
        let err = LogQuery::from_params([("bad_param", "test")]).unwrap_err();
        assert_eq!(err, ParameterError::Unknown("bad_param".into()));
        assert!(err.to_string().contains("unexpected parameter 'bad_param'"));

        let err = AlgorithmQuery::from_params([
            ("met_start", "100"),
            ("met_end", "130"),
            ("product_name", "p"),
            ("year", "2024"),
        ])
        .unwrap_err();
        assert_eq!(err, ParameterError::Unknown("year".into()));
    }

    #[test]
    fn from_params_rejects_missing_and_duplicate_keys() {
        let err = LogQuery::from_params([("year", "2024"), ("instance", "1")]).unwrap_err();
        assert_eq!(err, ParameterError::Missing("doy"));

        let err =
            AlgorithmQuery::from_params([("met_start", "1"), ("met_start", "2")]).unwrap_err();
        assert_eq!(err, ParameterError::Duplicate("met_start"));
    }

    #[test]
    fn instance_must_be_one_or_two() {
        assert_eq!("1".parse::<Instance>().unwrap(), Instance::One);
        assert_eq!("2".parse::<Instance>().unwrap(), Instance::Two);
        let err = LogQuery::from_params([("year", "2024"), ("doy", "045"), ("instance", "3")])
            .unwrap_err();
        assert!(matches!(err, ParameterError::Invalid { key: "instance", .. }));
    }

    #[test]
    fn instance_serializes_as_wire_string() {
        let q = LogQuery::new("2024", "045", Instance::Two);
        let v = serde_json::to_value(&q).unwrap();
        assert_eq!(v["instance"], "2");
        let back: LogQuery = serde_json::from_value(v).unwrap();
        assert_eq!(back, q);
    }
}
