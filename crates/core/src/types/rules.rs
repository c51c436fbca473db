use crate::errors::{Error, Result};
use regex::Regex;

/// Ordered patterns marking an exit-code-1 failure as expected.
///
/// Patterns are searched (not anchored) in the captured standard output, in
/// the order they were given; the first hit wins.
#[derive(Debug, Clone, Default)]
pub struct MatchRules {
    patterns: Vec<Regex>,
}

impl MatchRules {
    /// Compile every pattern, failing on the first invalid one
    pub fn compile<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|e| Error::invalid_pattern(p, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// The first pattern found in `output`, if any
    pub fn first_match(&self, output: &str) -> Option<&Regex> {
        self.patterns.iter().find(|re| re.is_match(output))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
