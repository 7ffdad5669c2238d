//! Canned service payloads shared by integration tests.

use serde_json::{Value, json};

/// Plex section listing with one `<Video>` per `(title, year)` pair.
pub fn plex_section_xml(movies: &[(&str, &str)]) -> String {
    let videos: String = movies
        .iter()
        .enumerate()
        .map(|(index, (title, year))| {
            format!(
                "  <Video ratingKey=\"{}\" type=\"movie\" title=\"{title}\" year=\"{year}\">\
                 <Media id=\"{index}\"/></Video>\n",
                100 + index
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<MediaContainer size="{}" librarySectionID="1" librarySectionTitle="Movies">
{videos}</MediaContainer>"#,
        movies.len()
    )
}

/// Chat-completion response whose first choice carries `content`.
pub fn chat_completion_json(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 18, "total_tokens": 138}
    })
}

/// Radarr movie resource.
pub fn radarr_movie_json(title: &str, year: i32, tmdb_id: i64) -> Value {
    let slug = format!(
        "{}-{tmdb_id}",
        title
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect::<String>()
    );
    json!({
        "title": title,
        "year": year,
        "tmdbId": tmdb_id,
        "titleSlug": slug,
        "monitored": false,
        "hasFile": false,
        "isAvailable": true
    })
}
