//! Pexels video search provider.

use std::time::Duration;

use serde::Deserialize;

use clipdeck_common::config::StockConfig;
use clipdeck_project_model::time::format_duration_label;

use crate::error::{StockError, StockResult};
use crate::provider::StockProvider;
use crate::video::{Attribution, Category, SearchRequest, StockPage, StockVideo};

const DEFAULT_QUERY: &str = "nature";
const UNTITLED: &str = "Beautiful Video";
const TITLE_TAGS: usize = 3;
const MAX_TAGS: usize = 5;

/// HTTP provider for a Pexels-compatible `/search` endpoint.
pub struct PexelsProvider {
    agent: ureq::Agent,
    api_key: String,
    base_url: String,
    per_page: u32,
}

impl PexelsProvider {
    pub fn new(api_key: impl Into<String>, config: &StockConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();
        Self {
            agent,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            per_page: config.per_page.max(1),
        }
    }

    /// Build from configuration, reading the API key from the environment.
    pub fn from_config(config: &StockConfig) -> StockResult<Self> {
        let api_key = config.api_key().ok_or_else(|| StockError::MissingApiKey {
            var: config.api_key_env.clone(),
        })?;
        Ok(Self::new(api_key, config))
    }
}

impl StockProvider for PexelsProvider {
    fn search(&self, request: &SearchRequest) -> StockResult<StockPage> {
        let query = search_query(&request.query, request.category);
        let url = format!("{}/search", self.base_url);
        tracing::debug!(%url, %query, page = request.page, "Searching Pexels");

        let mut response = self
            .agent
            .get(&url)
            .header("Authorization", self.api_key.as_str())
            .query("query", query.as_str())
            .query("per_page", self.per_page.to_string())
            .query("page", request.page.to_string())
            .call()?;
        let body = response.body_mut().read_to_string()?;

        parse_search_response(&body, request.category)
    }

    fn page_size(&self) -> usize {
        self.per_page as usize
    }

    fn name(&self) -> &str {
        "Pexels"
    }
}

/// Provider query for a user query narrowed by category.
pub fn search_query(query: &str, category: Category) -> String {
    let query = query.trim();
    match category.search_terms() {
        Some(terms) if query.is_empty() => terms.to_string(),
        Some(terms) => format!("{query} {terms}"),
        None if query.is_empty() => DEFAULT_QUERY.to_string(),
        None => query.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    videos: Vec<PexelsVideo>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideo {
    id: u64,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    image: String,
    #[serde(default)]
    tags: Option<PexelsTags>,
    #[serde(default)]
    user: Option<PexelsUser>,
    #[serde(default)]
    video_files: Vec<PexelsVideoFile>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PexelsTags {
    Joined(String),
    List(Vec<String>),
}

impl PexelsTags {
    fn into_vec(self) -> Vec<String> {
        let raw = match self {
            Self::Joined(joined) => joined.split(',').map(str::to_string).collect(),
            Self::List(list) => list,
        };
        raw.into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct PexelsUser {
    name: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideoFile {
    #[serde(default)]
    quality: Option<String>,
    link: String,
}

/// Decode a search response body into catalog entries. Videos without any
/// playable file are skipped but still count towards `received`.
pub fn parse_search_response(body: &str, category: Category) -> StockResult<StockPage> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let received = response.videos.len();
    let videos = response
        .videos
        .into_iter()
        .filter_map(|video| into_stock_video(video, category))
        .collect();
    Ok(StockPage { videos, received })
}

fn into_stock_video(video: PexelsVideo, category: Category) -> Option<StockVideo> {
    let video_url = video
        .video_files
        .iter()
        .find(|f| matches!(f.quality.as_deref(), Some("hd") | Some("sd")))
        .or_else(|| video.video_files.first())
        .map(|f| f.link.clone())?;

    let tags = video.tags.map(PexelsTags::into_vec).unwrap_or_default();
    let title = tags
        .iter()
        .take(TITLE_TAGS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let title = if title.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        title.trim().to_string()
    };
    let tags = if tags.is_empty() {
        vec!["video".to_string(), "footage".to_string()]
    } else {
        tags.into_iter().take(MAX_TAGS).collect()
    };

    let (author_name, author_url) = match video.user {
        Some(user) => (user.name, user.url),
        None => (None, None),
    };

    Some(StockVideo {
        id: format!("pexels-{}", video.id),
        title,
        duration_label: format_duration_label(video.duration),
        category: (category != Category::All).then_some(category),
        thumbnail_url: video.image,
        video_url,
        tags,
        attribution: Attribution {
            source: "Pexels".to_string(),
            author_name: author_name.unwrap_or_else(|| "Pexels Contributor".to_string()),
            author_url: author_url.unwrap_or_else(|| "https://www.pexels.com".to_string()),
        },
        width: video.width,
        height: video.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_BODY: &str = r#"{
        "page": 1,
        "per_page": 15,
        "videos": [
            {
                "id": 1093662,
                "width": 1920,
                "height": 1080,
                "duration": 75,
                "image": "https://images.pexels.com/videos/1093662/thumb.jpg",
                "tags": "ocean, waves, beach, water, blue, sea",
                "user": { "name": "Jane Doe", "url": "https://www.pexels.com/@jane" },
                "video_files": [
                    { "quality": "uhd", "link": "https://player.example/uhd.mp4" },
                    { "quality": "sd", "link": "https://player.example/sd.mp4" }
                ]
            },
            {
                "id": 42,
                "duration": 9,
                "image": "https://images.pexels.com/videos/42/thumb.jpg",
                "video_files": [ { "quality": "uhd", "link": "https://player.example/only.mp4" } ]
            },
            {
                "id": 7,
                "duration": 3,
                "image": "",
                "video_files": []
            }
        ]
    }"#;

    #[test]
    fn test_search_query_composition() {
        assert_eq!(search_query("", Category::All), "nature");
        assert_eq!(search_query("dogs", Category::All), "dogs");
        assert_eq!(
            search_query("", Category::Urban),
            "city urban street building architecture"
        );
        assert_eq!(
            search_query("night", Category::Tech),
            "night technology computer digital innovation"
        );
    }

    #[test]
    fn test_parse_maps_fields() {
        let page = parse_search_response(SAMPLE_BODY, Category::Nature).unwrap();
        assert_eq!(page.received, 3);
        let videos = page.videos;
        assert_eq!(videos.len(), 2);

        let first = &videos[0];
        assert_eq!(first.id, "pexels-1093662");
        assert_eq!(first.title, "ocean waves beach");
        assert_eq!(first.tags.len(), 5);
        assert_eq!(first.duration_label, "1:15");
        assert_eq!(first.video_url, "https://player.example/sd.mp4");
        assert_eq!(first.category, Some(Category::Nature));
        assert_eq!(first.attribution.author_name, "Jane Doe");
        assert_eq!(first.width, Some(1920));
    }

    #[test]
    fn test_parse_defaults_for_sparse_entries() {
        let videos = parse_search_response(SAMPLE_BODY, Category::All).unwrap().videos;
        let sparse = &videos[1];
        assert_eq!(sparse.title, "Beautiful Video");
        assert_eq!(sparse.tags, vec!["video", "footage"]);
        assert_eq!(sparse.video_url, "https://player.example/only.mp4");
        assert_eq!(sparse.attribution.author_name, "Pexels Contributor");
        assert_eq!(sparse.category, None);
    }

    #[test]
    fn test_parse_accepts_tag_lists() {
        let body = r#"{"videos":[{"id":1,"duration":5,"image":"","tags":["a","b"],
            "video_files":[{"link":"https://player.example/a.mp4"}]}]}"#;
        let videos = parse_search_response(body, Category::All).unwrap().videos;
        assert_eq!(videos[0].title, "a b");
    }

    #[test]
    fn test_parse_rejects_malformed_body() {
        let err = parse_search_response("<html>rate limited</html>", Category::All).unwrap_err();
        assert!(matches!(err, StockError::Decode { .. }));
    }

    #[test]
    fn test_missing_api_key() {
        let config = StockConfig {
            api_key_env: "CLIPDECK_TEST_UNSET_PEXELS_KEY".to_string(),
            ..StockConfig::default()
        };
        let err = PexelsProvider::from_config(&config).err().unwrap();
        assert_eq!(
            err,
            StockError::MissingApiKey {
                var: "CLIPDECK_TEST_UNSET_PEXELS_KEY".to_string()
            }
        );
    }
}
