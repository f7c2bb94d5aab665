use super::parse::{LIMIT_KEY, OFFSET_KEY};

/// Query-string fragments echoed back to callers for building page links.
///
/// Pairs are kept verbatim and in input order; `limit`/`offset` go to
/// `section`, everything else (filters, sort and unrecognized keys) to `query`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EchoFragments {
    query: String,
    section: String,
}

impl EchoFragments {
    pub fn push(&mut self, key: &str, value: &str) {
        let target = if key == LIMIT_KEY || key == OFFSET_KEY {
            &mut self.section
        } else {
            &mut self.query
        };
        if !target.is_empty() {
            target.push('&');
        }
        target.push_str(key);
        target.push('=');
        target.push_str(value);
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.query, self.section)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for EchoFragments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut fragments = Self::default();
        for (key, value) in pairs {
            fragments.push(key.as_ref(), value.as_ref());
        }
        fragments
    }
}
