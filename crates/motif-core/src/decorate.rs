//! Decoration engine: raw search result → presentation-ready result.
//!
//! [`decorate`] is pure. Every cosmetic choice (sentence, palette, badges, tag
//! scores, placeholder id) is a draw from a [`Seed`] built from the result's
//! own title and id, so decorating the same record twice yields the same
//! output regardless of time or call order.

use crate::entities::{
    Badge, Certification, DecoratedResult, Palette, RawLabels, RawRuntime, RawScore,
    RawSearchResult, RawYear, Tag, VibeAxis, VibeDynamics,
};
use crate::rng::Seed;

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_RUNTIME: &str = "Unknown";
pub const UNKNOWN_YEAR: &str = "N/A";
pub const UNKNOWN_DIRECTOR: &str = "Unknown";
pub const UNRATED_CODE: &str = "NR";
pub const UNRATED_REASON: &str = "Not Rated";
pub const DEFAULT_VIBE: u8 = 50;

// Draw offsets. Changing any of these changes every decoration ever shown.
const SENTENCE_OFFSET: u32 = 1;
const BADGE_OFFSET: u32 = 3;
const PALETTE_OFFSET: u32 = 5;
const PLACEHOLDER_OFFSET: &str = "id";

const MOMENT_SENTENCES: [&str; 5] = [
    "Perfect for when you want to feel smart but don't want to work for it.",
    "The visual equivalent of a double espresso.",
    "Slow, methodical, and deeply rewarding.",
    "Zero cognitive load. Just vibes.",
    "A cinematic warm hug.",
];

const PALETTES: [(&str, [&str; 3]); 4] = [
    ("Neon Noir", ["#f43f5e", "#8b5cf6", "#1e293b"]),
    ("Industrial", ["#94a3b8", "#475569", "#0f172a"]),
    ("Warm Retro", ["#f59e0b", "#78350f", "#fffbeb"]),
    ("Miami Sunset", ["#f97316", "#db2777", "#8b5cf6"]),
];

const BADGE_SETS: [&[(&str, &str)]; 4] = [
    &[("Immersive", "user")],
    &[("Date Night", "heart"), ("Immersive", "user")],
    &[("Group Watch", "users"), ("Crowd Pleaser", "beer")],
    &[("Solo Watch", "user"), ("Deep Cut", "moon")],
];

/// Decorate one raw search result.
///
/// Never fails: every missing optional field falls back to a fixed default
/// (see the `UNKNOWN_*` / `UNRATED_*` constants, score 0, vibe 50). A result
/// with no usable identifier, or flagged `unverified` upstream, is marked
/// unverified and, if the id is missing, given a negative placeholder id that
/// is only good for keying UI lists.
#[must_use]
pub fn decorate(raw: &RawSearchResult) -> DecoratedResult {
    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED)
        .to_string();

    let stable_id = raw.id.filter(|id| *id > 0);
    let seed = match stable_id {
        Some(id) => Seed::new(format!("{title}{id}")),
        None => Seed::new(title.as_str()),
    };
    let unverified = stable_id.is_none() || raw.unverified.unwrap_or(false);
    let id = stable_id.unwrap_or_else(|| placeholder_id(&seed));

    let genres = raw.genres.clone().unwrap_or_default();
    let tags = genres
        .iter()
        .map(|name| Tag {
            name: name.clone(),
            score: tag_score(&seed, name),
            user_voted: false,
            is_custom: false,
        })
        .collect();

    let (palette_name, colors) = PALETTES[seed.pick(PALETTE_OFFSET, PALETTES.len())];
    let badges = BADGE_SETS[seed.pick(BADGE_OFFSET, BADGE_SETS.len())]
        .iter()
        .map(|(label, icon)| Badge {
            label: (*label).to_string(),
            icon: (*icon).to_string(),
        })
        .collect();

    let certification = raw.certification.clone().unwrap_or_default();

    DecoratedResult {
        id,
        year: display_year(raw.year.as_ref()),
        score: normalize_score(raw.score.as_ref()),
        runtime: display_runtime(raw.runtime.as_ref()),
        overview: raw.overview.clone().unwrap_or_default(),
        tagline: raw.tagline.clone(),
        director: raw
            .director
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_DIRECTOR.to_string()),
        cast: raw.cast.clone().unwrap_or_default(),
        poster: raw.poster.clone().filter(|p| !p.is_empty()),
        trailer: raw.trailer.clone().filter(|t| !t.is_empty()),
        aesthetics: match raw.aesthetics.clone() {
            Some(RawLabels::One(label)) => vec![label],
            Some(RawLabels::Many(labels)) => labels,
            None => Vec::new(),
        },
        vibe: VibeDynamics {
            pacing: vibe_axis("Pacing", "Slow", "Fast", raw.vibe_pacing),
            complexity: vibe_axis("Cognitive Load", "Light", "Heavy", raw.vibe_complexity),
            atmosphere: vibe_axis("Mood", "Dark", "Bright", raw.vibe_atmosphere),
        },
        moment_sentence: MOMENT_SENTENCES[seed.pick(SENTENCE_OFFSET, MOMENT_SENTENCES.len())]
            .to_string(),
        palette: Palette {
            name: palette_name.to_string(),
            colors: colors.iter().map(|c| (*c).to_string()).collect(),
        },
        badges,
        tags,
        recommendations: Vec::new(),
        certification: Certification {
            code: certification
                .code
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| UNRATED_CODE.to_string()),
            reason: certification
                .reason
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| UNRATED_REASON.to_string()),
        },
        genres,
        title,
        unverified,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn placeholder_id(seed: &Seed) -> i64 {
    -(1 + (seed.draw(PLACEHOLDER_OFFSET) * 999_999.0) as i64)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn tag_score(seed: &Seed, name: &str) -> u32 {
    (seed.draw(name) * 50.0).floor() as u32 + 1
}

/// Normalize any score encoding to `0.0..=1.0`.
///
/// Numbers above 1 and percentage strings are read as percentages. Missing or
/// unparseable scores are 0.
#[must_use]
pub fn normalize_score(score: Option<&RawScore>) -> f64 {
    let value = match score {
        Some(RawScore::Number(n)) if *n > 1.0 => n / 100.0,
        Some(RawScore::Number(n)) => *n,
        Some(RawScore::Text(text)) => {
            let trimmed = text.trim();
            let (digits, percent) = trimmed
                .strip_suffix('%')
                .map_or((trimmed, false), |d| (d.trim(), true));
            match digits.parse::<f64>() {
                Ok(n) if percent || n > 1.0 => n / 100.0,
                Ok(n) => n,
                Err(_) => 0.0,
            }
        }
        None => 0.0,
    };
    if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 }
}

/// Render a runtime for display. Minutes become `"2h 15m"` or `"45m"`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn display_runtime(runtime: Option<&RawRuntime>) -> String {
    match runtime {
        Some(RawRuntime::Minutes(minutes)) if minutes.is_finite() && *minutes > 0.0 => {
            let total = minutes.round() as u64;
            match (total / 60, total % 60) {
                (0, m) => format!("{m}m"),
                (h, 0) => format!("{h}h"),
                (h, m) => format!("{h}h {m}m"),
            }
        }
        Some(RawRuntime::Text(text)) if !text.trim().is_empty() => text.trim().to_string(),
        _ => UNKNOWN_RUNTIME.to_string(),
    }
}

/// Render a release year. Dates like `2010-07-16` are cut to the year.
#[must_use]
pub fn display_year(year: Option<&RawYear>) -> String {
    match year {
        Some(RawYear::Number(n)) => n.to_string(),
        Some(RawYear::Text(text)) => {
            let text = text.trim();
            match text.get(..4) {
                Some(prefix) if prefix.bytes().all(|b| b.is_ascii_digit()) => prefix.to_string(),
                _ if text.is_empty() => UNKNOWN_YEAR.to_string(),
                _ => text.to_string(),
            }
        }
        None => UNKNOWN_YEAR.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn vibe_axis(label: &str, low: &str, high: &str, raw: Option<f64>) -> VibeAxis {
    VibeAxis {
        label: label.to_string(),
        value: raw
            .filter(|v| v.is_finite())
            .map_or(DEFAULT_VIBE, |v| v.clamp(0.0, 100.0).round() as u8),
        low: low.to_string(),
        high: high.to_string(),
    }
}
