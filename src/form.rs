use std::collections::BTreeMap;

use serde_json::Value;

use crate::{Error, FormTree, Result};

/// Flat form data: each key with its values in submission order.
pub type FormValues = BTreeMap<String, Vec<String>>;

/// Groups `(key, value)` pairs by key, keeping repeated values in order.
pub fn group_pairs<I, K, V>(pairs: I) -> FormValues
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut form = FormValues::new();
    for (key, value) in pairs {
        form.entry(key.into()).or_default().push(value.into());
    }
    form
}

/// Decodes an `application/x-www-form-urlencoded` body.
pub fn parse_urlencoded(input: &[u8]) -> FormValues {
    group_pairs(form_urlencoded::parse(input))
}

/// Reads a JSON object whose values are strings, arrays of strings or
/// `null` (no values).
pub fn parse_json_form(input: &str) -> Result<FormValues> {
    let value: Value = serde_json::from_str(input)
        .map_err(|err| Error::decode(format!("invalid json: {err}")))?;
    let Value::Object(object) = value else {
        return Err(Error::decode("json form must be an object"));
    };

    let mut form = FormValues::new();
    for (key, value) in object {
        let values = match value {
            Value::Null => Vec::new(),
            Value::String(value) => vec![value],
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(value) => Ok(value),
                    _ => Err(Error::decode(format!("values of {key:?} must be strings"))),
                })
                .collect::<Result<Vec<_>>>()?,
            _ => {
                return Err(Error::decode(format!(
                    "value of {key:?} must be a string or an array of strings"
                ))
                .with_key(key))
            }
        };
        form.insert(key, values);
    }
    Ok(form)
}

impl FormTree {
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(group_pairs(pairs))
    }

    pub fn from_urlencoded(input: &[u8]) -> Result<Self> {
        Self::new(parse_urlencoded(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[rstest::rstest]
    fn test_group_pairs_keeps_value_order() {
        let form = group_pairs([("tag", "b"), ("name", "x"), ("tag", "a")]);
        assert_eq!(form["tag"], vec!["b", "a"]);
        assert_eq!(form["name"], vec!["x"]);
    }

    #[rstest::rstest]
    fn test_parse_urlencoded_decodes() {
        let form = parse_urlencoded(b"fields.0.label=Head+Office&tags=a%26b&tags=c&empty=");
        assert_eq!(form["fields.0.label"], vec!["Head Office"]);
        assert_eq!(form["tags"], vec!["a&b", "c"]);
        assert_eq!(form["empty"], vec![""]);
    }

    #[rstest::rstest]
    fn test_parse_json_form() {
        let form = parse_json_form(r#"{"a.b":"x","a.c":["1","2"],"skip":null}"#).unwrap();
        assert_eq!(form["a.b"], vec!["x"]);
        assert_eq!(form["a.c"], vec!["1", "2"]);
        assert!(form["skip"].is_empty());
    }

    #[rstest::rstest]
    #[case("[]")]
    #[case(r#"{"a":1}"#)]
    #[case(r#"{"a":["x",2]}"#)]
    #[case("{")]
    fn test_parse_json_form_rejects(#[case] input: &str) {
        let err = parse_json_form(input).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }

    #[rstest::rstest]
    fn test_from_urlencoded_builds_tree() {
        let tree = FormTree::from_urlencoded(b"rows.0.name=a&rows.1.name=b").unwrap();
        let name = tree.lookup("rows.1.name").and_then(|node| node.as_leaf());
        assert_eq!(name.map(|leaf| leaf.first()), Some("b"));
    }
}
