/// A contiguous span of recognized speech, in engine order.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub start_secs: f32,
    pub end_secs: f32,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start_secs: f32, end_secs: f32, text: impl Into<String>) -> Self {
        Self {
            start_secs,
            end_secs,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    /// Joins segment texts with single spaces, preserving order, then trims the ends.
    /// Blank segments contribute nothing.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = TranscriptSegment>,
    {
        let joined = segments
            .into_iter()
            .map(|s| s.text)
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self(joined.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
