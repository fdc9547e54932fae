//! Ordered catalog of remote bases.
//!
//! A remote base is a host/path prefix; joining it with a repository name
//! gives the fetch URL. Catalog order is fallback priority and is never
//! reordered by availability or latency.

/// Immutable, ordered list of remote bases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteCatalog {
    bases: Vec<String>,
}

impl RemoteCatalog {
    /// Build a catalog from bases in priority order. Blank entries and
    /// duplicates are dropped (first occurrence wins).
    pub fn new<I, S>(bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for base in bases {
            let base = base.into();
            let base = base.trim().trim_end_matches('/').to_string();
            if base.is_empty() || out.contains(&base) {
                continue;
            }
            out.push(base);
        }
        Self { bases: out }
    }

    /// User-supplied remotes go ahead of the defaults, in the order given.
    pub fn with_user_remotes<I, S>(user: I, defaults: &[String]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let user: Vec<String> = user.into_iter().map(Into::into).collect();
        Self::new(user.into_iter().chain(defaults.iter().cloned()))
    }

    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.bases.iter().map(String::as_str)
    }
}

/// Fetch URL for `name` under `base`.
pub fn repo_url(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name)
}
