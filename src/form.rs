use std::collections::hash_map::{self, HashMap};
use std::iter::Map;
#[cfg(feature = "json")]
use serde::de::DeserializeOwned;

type Entry = (String, (String, String));

/// The ordinary (non-file) fields of a multipart body, by field name.
///
/// Field names match ASCII case-insensitively: `Name` and `name` are the same
/// field. A field that appears more than once keeps only its last value, under
/// the spelling it was first seen with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    // Lowercased name -> (name as sent, value).
    fields: HashMap<String, (String, String)>,
}

impl Form {
    pub(crate) fn with_capacity(capacity: usize) -> Form {
        Form {
            fields: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, name: String, value: String) {
        match self.fields.entry(name.to_ascii_lowercase()) {
            hash_map::Entry::Occupied(mut entry) => entry.get_mut().1 = value,
            hash_map::Entry::Vacant(entry) => {
                entry.insert((name, value));
            }
        }
    }

    /// Returns the value of the field `name`, in any letter case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Converts the form into a map keyed by the field names as sent.
    pub fn into_inner(self) -> HashMap<String, String> {
        self.into_iter().collect()
    }

    /// Deserializes the fields into `T`, treating the form as a JSON object of
    /// strings.
    ///
    /// # Optional
    ///
    /// This requires the optional `json` feature to be enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use upload_filter::{Config, Parser};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Profile {
    ///     user: String,
    /// }
    ///
    /// let mut parser = Parser::new("X", Config::new());
    /// parser.feed(b"--X\r\nContent-Disposition: form-data; name=\"user\"\r\n\r\nann\r\n--X--\r\n").unwrap();
    ///
    /// let profile: Profile = parser.form().json().unwrap();
    /// assert_eq!(profile.user, "ann");
    /// ```
    #[cfg(feature = "json")]
    #[cfg_attr(nightly, doc(cfg(feature = "json")))]
    pub fn json<T: DeserializeOwned>(&self) -> crate::Result<T> {
        let fields = self.iter().collect::<HashMap<_, _>>();

        serde_json::to_value(fields)
            .and_then(serde_json::from_value)
            .map_err(crate::Error::DecodeJson)
    }
}

impl IntoIterator for Form {
    type Item = (String, String);
    type IntoIter = Map<hash_map::IntoIter<String, (String, String)>, fn(Entry) -> (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        let field: fn(Entry) -> (String, String) = |(_, field)| field;
        self.fields.into_iter().map(field)
    }
}
