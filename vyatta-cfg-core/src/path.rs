use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Serializer};

/// One element of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A bare key name such as `interfaces` or `eth0`.
    Key(String),
    /// A leaf value, rendered wrapped in double quotes.
    Value(String),
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Value(value) => write!(f, "\"{value}\""),
        }
    }
}

/// A fully qualified location in a configuration tree.
///
/// Leaf paths end in a [`Segment::Value`]; truncated branch paths produced by
/// shallow diffs end in a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a key-only path.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: keys.into_iter().map(|k| Segment::Key(k.into())).collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Return a copy of this path extended by `key`.
    pub fn child(&self, key: &str) -> Path {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(Segment::Key(key.to_string()));
        Path { segments }
    }

    /// Return a copy of this path terminated by a quoted value.
    pub fn with_value(&self, value: &str) -> Path {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(Segment::Value(value.to_string()));
        Path { segments }
    }

    /// Key names of this path, skipping any value segment.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Key(key) => Some(key.as_str()),
            Segment::Value(_) => None,
        })
    }

    /// True when the leading key segments equal `prefix`.
    pub fn starts_with_keys(&self, prefix: &[String]) -> bool {
        prefix.len() <= self.segments.len()
            && self
                .segments
                .iter()
                .zip(prefix)
                .all(|(segment, key)| matches!(segment, Segment::Key(k) if k == key))
    }

    /// Rendered segments, values quoted.
    pub fn to_strings(&self) -> Vec<String> {
        self.segments.iter().map(ToString::to_string).collect()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.segments.iter().map(ToString::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::Path;

    #[test]
    fn renders_values_quoted_and_space_joined() {
        let path = Path::from_keys(["system", "name-server"]).with_value("8.8.8.8");
        assert_eq!(path.to_string(), r#"system name-server "8.8.8.8""#);
        assert_eq!(
            Path::from_keys(["service"]).with_value("").to_strings(),
            vec!["service".to_string(), "\"\"".to_string()]
        );
    }

    #[test]
    fn key_prefix_matching_stops_at_values() {
        let path = Path::from_keys(["system", "login"]).with_value("x");
        assert_eq!(path.keys().collect::<Vec<_>>(), vec!["system", "login"]);
        assert!(path.starts_with_keys(&["system".to_string()]));
        assert!(!path.starts_with_keys(&[
            "system".to_string(),
            "login".to_string(),
            "x".to_string()
        ]));
    }
}
