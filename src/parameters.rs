use std::fmt;

/// Key whose value gets mention escaping.
pub const STATUS_KEY: &str = "status";

/// Marker put in front of a `status` beginning with `@`, so the service does not
/// read the leading word as a mention.
pub const MENTION_ESCAPE: char = '\0';

/// A parameter value, converted to its string form at the API boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterValue(String);

impl ParameterValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParameterValue {
    fn from(s: &str) -> Self {
        ParameterValue(s.to_owned())
    }
}

impl From<String> for ParameterValue {
    fn from(s: String) -> Self {
        ParameterValue(s)
    }
}

impl From<&String> for ParameterValue {
    fn from(s: &String) -> Self {
        ParameterValue(s.clone())
    }
}

impl From<bool> for ParameterValue {
    fn from(b: bool) -> Self {
        ParameterValue(if b { "true" } else { "false" }.to_owned())
    }
}

impl From<f64> for ParameterValue {
    fn from(n: f64) -> Self {
        ParameterValue(n.to_string())
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParameterValue {
                fn from(n: $t) -> Self {
                    ParameterValue(n.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

/// Request parameters: unique names, kept in insertion order.
///
/// Sorting happens only while signing, the order here is the order used for
/// query strings and form bodies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parameters {
    pairs: Vec<(String, String)>,
}

impl Parameters {
    pub fn new() -> Self {
        Parameters { pairs: Vec::new() }
    }

    /// Sets `key` to `value`, replacing an existing value in place.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> &mut Parameters
    where
        K: Into<String>,
        V: Into<ParameterValue>,
    {
        let key = key.into();
        let value = value.into().0;
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<ParameterValue>,
    {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<ParameterValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Parameters::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Escapes a `status` starting with `@` when `escape_leading_mention` is set.
/// Every other parameter passes through unchanged.
pub fn prepare_parameters(mut parameters: Parameters, escape_leading_mention: bool) -> Parameters {
    if !escape_leading_mention {
        return parameters;
    }
    if let Some((_, status)) = parameters
        .pairs
        .iter_mut()
        .find(|(k, v)| k == STATUS_KEY && v.starts_with('@'))
    {
        status.insert(0, MENTION_ESCAPE);
    }
    parameters
}
