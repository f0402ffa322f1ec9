// Serde helpers shared by the update DTOs

use serde::{Deserialize, Deserializer};

/// Deserialize into `Some(inner)` whenever the field is present
///
/// Plain `Option<Option<T>>` collapses an explicit JSON null into the outer
/// `None`, which makes nullable columns impossible to clear through a partial
/// update. Paired with `#[serde(default)]` this keeps the three states apart:
/// omitted is `None`, null is `Some(None)`, a value is `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "double_option")]
        notes: Option<Option<String>>,
    }

    #[test]
    fn test_omitted_field_is_outer_none() {
        let payload: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.notes, None);
    }

    #[test]
    fn test_explicit_null_is_some_none() {
        let payload: Payload = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(payload.notes, Some(None));
    }

    #[test]
    fn test_value_is_some_some() {
        let payload: Payload = serde_json::from_str(r#"{"notes": "fork bent"}"#).unwrap();
        assert_eq!(payload.notes, Some(Some("fork bent".to_string())));
    }
}
