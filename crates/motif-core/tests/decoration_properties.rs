//! Decoration behavior over realistic search API payloads.

use motif_core::decorate;
use motif_core::entities::{DecoratedResult, RawSearchResult, SavedItem};
use motif_core::errors::CoreError;
use motif_core::rng::{Seed, pseudo_random};
use pretty_assertions::assert_eq;
use schemars::schema_for;

fn decode(json: &str) -> RawSearchResult {
    serde_json::from_str(json).expect("fixture should decode")
}

const VARIANTS: [&str; 4] = [
    // Vector-search backend
    r#"{"id": 603, "title": "The Matrix", "vibe": "cyber", "poster_url": "https://img/603.jpg",
        "overview": "A hacker learns the truth.", "director": "The Wachowskis",
        "cast": ["Keanu Reeves"], "runtime": 136, "rating": 8.7, "year": 1999,
        "genres": ["Sci-Fi"], "tagline": "Welcome to the real world", "match_score": "91.20%"}"#,
    // Typed frontend contract
    r#"{"movie_id": 27205, "title": "Inception", "overview": "Dreams within dreams.",
        "release_date": "2010", "score": 0.88, "runtime": "2h 28m",
        "vibe_pacing": 70, "vibe_complexity": 90, "vibe_atmosphere": 35,
        "certData": {"code": "PG-13", "reason": "Sequences of violence"}}"#,
    // LLM-ranked results, unverified
    r#"{"title": "Blade Runner 2049", "year": 2017, "confidence_score": 80, "unverified": true}"#,
    // Bare minimum
    r#"{"title": "Paddington 2"}"#,
];

#[test]
fn every_variant_decodes_and_decorates_identically_twice() {
    for json in VARIANTS {
        let raw = decode(json);
        let first = decorate(&raw);
        let second = decorate(&raw);
        assert_eq!(first, second, "non-deterministic decoration for {json}");
        assert!((0.0..=1.0).contains(&first.score));
    }
}

#[test]
fn vector_search_variant_fields_map_through() {
    let decorated = decorate(&decode(VARIANTS[0]));
    assert_eq!(decorated.id, 603);
    assert_eq!(decorated.year, "1999");
    assert_eq!(decorated.runtime, "2h 16m");
    assert_eq!(decorated.poster.as_deref(), Some("https://img/603.jpg"));
    assert!((decorated.score - 0.912).abs() < 1e-9);
    assert_eq!(decorated.tagline.as_deref(), Some("Welcome to the real world"));
}

#[test]
fn typed_variant_keeps_certification_and_vibes() {
    let decorated = decorate(&decode(VARIANTS[1]));
    assert_eq!(decorated.certification.code, "PG-13");
    assert_eq!(decorated.vibe.complexity.value, 90);
    assert_eq!(decorated.vibe.atmosphere.low, "Dark");
    assert_eq!(decorated.runtime, "2h 28m");
}

#[test]
fn unverified_results_cannot_be_saved() {
    let decorated = decorate(&decode(VARIANTS[2]));
    assert!(decorated.unverified);
    assert!(decorated.id < 0);
    assert_eq!(
        SavedItem::try_from(&decorated),
        Err(CoreError::Unverified {
            title: "Blade Runner 2049".into()
        })
    );
}

#[test]
fn verified_results_become_canonical_saved_items() {
    let decorated = decorate(&decode(VARIANTS[0]));
    let item = SavedItem::try_from(&decorated).unwrap();
    assert_eq!(
        item,
        SavedItem {
            id: 603,
            title: "The Matrix".into(),
            year: "1999".into(),
            poster: Some("https://img/603.jpg".into()),
        }
    );
}

#[test]
fn seed_includes_identifier_when_present() {
    let with_id = decorate(&decode(r#"{"id": 11, "title": "Heat"}"#));
    let seed = Seed::new("Heat11");
    let palette_index = seed.pick(5, 4);
    let expected = ["Neon Noir", "Industrial", "Warm Retro", "Miami Sunset"][palette_index];
    assert_eq!(with_id.palette.name, expected);
}

#[test]
fn pseudo_random_is_pure_across_calls() {
    let samples: Vec<u64> = (0..50)
        .map(|offset| pseudo_random(&format!("cozy rainy evening{offset}")).to_bits())
        .collect();
    let again: Vec<u64> = (0..50)
        .map(|offset| pseudo_random(&format!("cozy rainy evening{offset}")).to_bits())
        .collect();
    assert_eq!(samples, again);
}

#[test]
fn decorated_result_schema_lists_presentation_fields() {
    let schema = serde_json::to_value(schema_for!(DecoratedResult)).unwrap();
    let properties = schema["properties"].as_object().expect("object schema");
    for field in ["palette", "badges", "tags", "vibe", "moment_sentence", "unverified"] {
        assert!(properties.contains_key(field), "schema missing {field}");
    }
}
