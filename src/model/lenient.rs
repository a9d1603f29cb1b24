//! Lenient deserialization for imported record fields.
//!
//! Imported spreadsheets routinely carry numbers as strings, ids as bare
//! integers, and blanks as `null`. These helpers never fail: a value that
//! cannot be read as a number becomes `NaN`, which the data-quality pass
//! later coerces to zero and reports.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl RawNumber {
    fn into_value(self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(n),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.replace(',', "").parse::<f64>().unwrap_or(f64::NAN))
                }
            }
            Self::Bool(_) => Some(f64::NAN),
        }
    }
}

/// Read a required numeric field; blanks and `null` read as 0.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(RawNumber::into_value).unwrap_or(0.0))
}

/// Read an optional numeric field; blanks and `null` read as absent.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(RawNumber::into_value))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
}

impl RawText {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Integer(n) => n.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Read a text field; `null` reads as empty and scalars render as text.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawText>::deserialize(deserializer)?;
    Ok(raw.map(RawText::into_text).unwrap_or_default())
}

/// Read an optional text field; `null` reads as absent.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawText>::deserialize(deserializer)?;
    Ok(raw.map(RawText::into_text))
}

/// Read a list of names that may arrive as an array or a `;`/`,`/`|`
/// separated string.
pub fn name_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawList {
        List(Vec<String>),
        Joined(String),
    }

    let raw = Option::<RawList>::deserialize(deserializer)?;
    let names = match raw {
        None => Vec::new(),
        Some(RawList::List(items)) => items,
        Some(RawList::Joined(joined)) => joined
            .split([';', ',', '|'])
            .map(str::to_string)
            .collect(),
    };
    Ok(names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "number")]
        count: f64,
        #[serde(default, deserialize_with = "optional_number")]
        signal: Option<f64>,
        #[serde(default, deserialize_with = "name_list")]
        names: Vec<String>,
        #[serde(default, deserialize_with = "text")]
        label: String,
        #[serde(default, deserialize_with = "optional_text")]
        date: Option<String>,
    }

    fn parse(json: &str) -> Fields {
        serde_json::from_str(json).expect("fields should deserialize")
    }

    #[test]
    fn numbers_and_numeric_strings() {
        let p = parse(r#"{"count": "1,204", "signal": 4}"#);
        assert_eq!(p.count, 1204.0);
        assert_eq!(p.signal, Some(4.0));
    }

    #[test]
    fn blanks_and_nulls() {
        let p = parse(r#"{"count": null, "signal": "  "}"#);
        assert_eq!(p.count, 0.0);
        assert_eq!(p.signal, None);

        let p = parse("{}");
        assert_eq!(p.count, 0.0);
        assert_eq!(p.signal, None);
        assert!(p.names.is_empty());
    }

    #[test]
    fn junk_becomes_nan() {
        let p = parse(r#"{"count": "n/a", "signal": true}"#);
        assert!(p.count.is_nan());
        assert!(p.signal.is_some_and(f64::is_nan));
    }

    #[test]
    fn text_accepts_null_and_scalars() {
        assert_eq!(parse(r#"{"label": null}"#).label, "");
        assert_eq!(parse(r#"{"label": 10000001}"#).label, "10000001");
        assert_eq!(parse(r#"{"label": 2.5}"#).label, "2.5");
        assert_eq!(parse(r#"{"label": "video-codec"}"#).label, "video-codec");
        assert_eq!(parse("{}").label, "");

        assert_eq!(parse(r#"{"date": 20150301}"#).date.as_deref(), Some("20150301"));
        assert_eq!(parse(r#"{"date": null}"#).date, None);
    }

    #[test]
    fn joined_name_lists_split() {
        let p = parse(r#"{"names": "Cisco; Juniper Networks |  ,Arista"}"#);
        assert_eq!(p.names, vec!["Cisco", "Juniper Networks", "Arista"]);

        let p = parse(r#"{"names": ["Cisco", " "]}"#);
        assert_eq!(p.names, vec!["Cisco"]);
    }
}
