use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A search result exactly as the search API returns it.
///
/// The API's shape has drifted across integration versions, so field names
/// accept every alias seen in the wild and value types accept both numeric and
/// textual encodings. Unknown fields are ignored. Every field is optional;
/// the decoration engine supplies defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawSearchResult {
    #[serde(default, alias = "movie_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "release_date", alias = "release_year")]
    pub year: Option<RawYear>,
    #[serde(
        default,
        alias = "confidence",
        alias = "confidence_score",
        alias = "match_score"
    )]
    pub score: Option<RawScore>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub runtime: Option<RawRuntime>,
    #[serde(default)]
    pub cast: Option<Vec<String>>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default, alias = "poster_url", alias = "posterUrl")]
    pub poster: Option<String>,
    #[serde(default, alias = "trailer_url", alias = "trailerUrl")]
    pub trailer: Option<String>,
    #[serde(default, alias = "certData")]
    pub certification: Option<RawCertification>,
    #[serde(default, alias = "primary_aesthetic")]
    pub aesthetics: Option<RawLabels>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub vibe_pacing: Option<f64>,
    #[serde(default)]
    pub vibe_complexity: Option<f64>,
    #[serde(default)]
    pub vibe_atmosphere: Option<f64>,
    #[serde(default)]
    pub unverified: Option<bool>,
}

/// Release year as a number (`2010`) or text (`"2010"`, `"2010-07-16"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawYear {
    Number(i64),
    Text(String),
}

/// Relevance score: a fraction, a 0-100 value, or a percentage string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawScore {
    Number(f64),
    Text(String),
}

/// Runtime as minutes or as preformatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawRuntime {
    Minutes(f64),
    Text(String),
}

/// Aesthetic labels: one label or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawLabels {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RawCertification {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// A search result ready for presentation.
///
/// Built once per raw result by [`crate::decorate`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DecoratedResult {
    /// Display identifier. Negative when synthesized for an unverified result.
    pub id: i64,
    pub title: String,
    pub year: String,
    /// Relevance normalized to `0.0..=1.0`.
    pub score: f64,
    pub runtime: String,
    pub overview: String,
    pub tagline: Option<String>,
    pub director: String,
    pub cast: Vec<String>,
    pub poster: Option<String>,
    pub trailer: Option<String>,
    pub genres: Vec<String>,
    pub aesthetics: Vec<String>,
    pub vibe: VibeDynamics,
    pub moment_sentence: String,
    pub palette: Palette,
    pub badges: Vec<Badge>,
    pub tags: Vec<Tag>,
    /// Placeholder, filled by a detail view that fetches recommendations.
    pub recommendations: Vec<i64>,
    pub certification: Certification,
    /// Set when the upstream record had no stable identifier or was flagged.
    pub unverified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VibeDynamics {
    pub pacing: VibeAxis,
    pub complexity: VibeAxis,
    pub atmosphere: VibeAxis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VibeAxis {
    pub label: String,
    /// Position on the axis, `0..=100`.
    pub value: u8,
    pub low: String,
    pub high: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Palette {
    pub name: String,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Badge {
    pub label: String,
    /// Icon name resolved by the presentation layer.
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Tag {
    pub name: String,
    pub score: u32,
    pub user_voted: bool,
    pub is_custom: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Certification {
    pub code: String,
    pub reason: String,
}
