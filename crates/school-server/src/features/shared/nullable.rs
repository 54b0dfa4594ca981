//! Tri-state request fields
//!
//! For an update, `"classId": null` clears the reference while an absent
//! `classId` leaves it unchanged. Declare such fields as
//! `Option<Option<T>>` with `#[serde(default, deserialize_with = "nullable::deserialize")]`:
//!
//! - absent: `None`
//! - `null`: `Some(None)`
//! - value: `Some(Some(value))`

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::deserialize")]
        class_id: Option<Option<i64>>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"class_id": null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"class_id": 7}"#).unwrap();

        assert_eq!(absent.class_id, None);
        assert_eq!(null.class_id, Some(None));
        assert_eq!(value.class_id, Some(Some(7)));
    }
}
