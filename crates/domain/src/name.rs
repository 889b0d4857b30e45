use std::fmt;
use std::str::FromStr;

/// Maximum length of a single label on the wire.
pub const MAX_LABEL_LEN: usize = 63;

/// A domain name as an ordered sequence of labels.
///
/// `"host.local"` is the two labels `["host", "local"]`. Matching is exact;
/// there is no case folding and no compression-pointer handling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainName {
    labels: Vec<String>,
}

impl DomainName {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The leading label, e.g. `Cache1` of `Cache1._semcache._tcp.local`.
    pub fn first_label(&self) -> &str {
        self.labels.first().map(String::as_str).unwrap_or("")
    }

    /// Encoded size on the wire: one length byte per label plus the label
    /// bytes, plus the terminating zero-length label.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// True when every label fits the 63-byte wire limit.
    pub fn is_encodable(&self) -> bool {
        self.labels.iter().all(|l| l.len() <= MAX_LABEL_LEN)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels.join("."))
    }
}

impl FromStr for DomainName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self { labels: Vec::new() });
        }
        Ok(Self {
            labels: s.split('.').map(str::to_string).collect(),
        })
    }
}

impl From<&str> for DomainName {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| Self { labels: Vec::new() })
    }
}
