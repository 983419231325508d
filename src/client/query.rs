//! Query-string parameters for daemon requests

/// Ordered query parameters, percent-encoded when the URL is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds a parameter only when a value is present.
    pub fn opt<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Adds a boolean parameter, always sent as `true` or `false`.
    pub fn flag(self, key: &str, value: bool) -> Self {
        self.param(key, value)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Looks up the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let query = Query::new()
            .flag("all", false)
            .opt("limit", Some(5))
            .opt::<u32>("t", None)
            .param("fromImage", "alpine");

        let pairs: Vec<_> = query.pairs().collect();
        assert_eq!(
            pairs,
            vec![("all", "false"), ("limit", "5"), ("fromImage", "alpine")]
        );
        assert_eq!(query.get("limit"), Some("5"));
        assert_eq!(query.get("t"), None);
    }
}
