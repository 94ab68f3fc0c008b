//! Index key extraction
//!
//! Keys are totally ordered so BTreeMap iteration stays deterministic:
//! Null < Bool < Int < Double < String. A missing or unindexable field
//! extracts as Null, which means documents both lacking a unique key field
//! collide with each other.

use serde_json::Value;

/// Index key representing one field value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexKey {
    /// Missing or unindexable field
    Null,
    /// Boolean value (false < true)
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Float value (stored as bits for total ordering)
    Double(u64),
    /// String value
    String(String),
}

impl IndexKey {
    /// Create a key from a float.
    ///
    /// Uses bit manipulation for total ordering.
    pub fn from_double(v: f64) -> Self {
        let bits = v.to_bits();
        let ordered = if (bits >> 63) == 1 {
            !bits // Negative: flip all bits
        } else {
            bits ^ (1 << 63) // Positive: flip sign bit
        };
        IndexKey::Double(ordered)
    }

    /// Create a key from a JSON value; arrays and objects key as Null.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Bool(b) => IndexKey::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    IndexKey::Int(i)
                } else if let Some(f) = n.as_f64() {
                    IndexKey::from_double(f)
                } else {
                    IndexKey::Null
                }
            }
            Value::String(s) => IndexKey::String(s.clone()),
            _ => IndexKey::Null,
        }
    }

    /// Extract a composite key from a document, field by field.
    pub fn extract(document: &Value, fields: &[String]) -> Vec<IndexKey> {
        fields
            .iter()
            .map(|f| document.get(f).map_or(IndexKey::Null, IndexKey::from_json))
            .collect()
    }

    /// Human-readable form for duplicate key errors.
    pub fn render(key: &[IndexKey]) -> String {
        let parts: Vec<String> = key
            .iter()
            .map(|k| match k {
                IndexKey::Null => "null".to_string(),
                IndexKey::Bool(b) => b.to_string(),
                IndexKey::Int(i) => i.to_string(),
                IndexKey::Double(bits) => format!("double:{:#x}", bits),
                IndexKey::String(s) => format!("\"{}\"", s),
            })
            .collect();
        format!("({})", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_composite() {
        let doc = json!({"repId": "r1", "journeyId": "j1", "moduleId": "m1"});
        let fields = vec![
            "repId".to_string(),
            "journeyId".to_string(),
            "moduleId".to_string(),
        ];

        assert_eq!(
            IndexKey::extract(&doc, &fields),
            vec![
                IndexKey::String("r1".into()),
                IndexKey::String("j1".into()),
                IndexKey::String("m1".into()),
            ]
        );
    }

    #[test]
    fn test_missing_field_extracts_as_null() {
        let doc = json!({"repId": "r1"});
        let fields = vec!["repId".to_string(), "journeyId".to_string()];

        assert_eq!(
            IndexKey::extract(&doc, &fields),
            vec![IndexKey::String("r1".into()), IndexKey::Null]
        );
    }

    #[test]
    fn test_variant_ordering() {
        assert!(IndexKey::Null < IndexKey::Bool(false));
        assert!(IndexKey::Bool(true) < IndexKey::Int(0));
        assert!(IndexKey::Int(i64::MAX) < IndexKey::from_double(0.0));
        assert!(IndexKey::from_double(f64::MAX) < IndexKey::String(String::new()));
    }

    #[test]
    fn test_double_ordering_matches_numeric_ordering() {
        let values = [-10.5, -0.1, 0.0, 0.1, 2.0, 1e9];
        for pair in values.windows(2) {
            assert!(
                IndexKey::from_double(pair[0]) < IndexKey::from_double(pair[1]),
                "{} should order below {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_render_composite() {
        let key = vec![IndexKey::String("r1".into()), IndexKey::Null, IndexKey::Int(3)];
        assert_eq!(IndexKey::render(&key), "(\"r1\", null, 3)");
    }
}
