//! Stock footage entries, categories, and the static sample set.

use serde::{Deserialize, Serialize};

/// Browsing category. Every category except [`Category::All`] narrows the
/// provider search with a fixed set of terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Nature,
    Urban,
    Tech,
    Lifestyle,
    Business,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 6] = [
        Category::All,
        Category::Nature,
        Category::Urban,
        Category::Lifestyle,
        Category::Tech,
        Category::Business,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Nature => "nature",
            Self::Urban => "urban",
            Self::Tech => "tech",
            Self::Lifestyle => "lifestyle",
            Self::Business => "business",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Videos",
            Self::Nature => "Nature",
            Self::Urban => "Urban",
            Self::Tech => "Technology",
            Self::Lifestyle => "Lifestyle",
            Self::Business => "Business",
        }
    }

    /// Provider search terms for this category.
    pub fn search_terms(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Nature => Some("nature landscape mountain ocean forest"),
            Self::Urban => Some("city urban street building architecture"),
            Self::Tech => Some("technology computer digital innovation"),
            Self::Lifestyle => Some("lifestyle people happy life home"),
            Self::Business => Some("business office meeting professional work"),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// Who made a clip and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    /// Hosting service, e.g. `Pexels`.
    pub source: String,
    pub author_name: String,
    pub author_url: String,
}

/// One selectable stock clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockVideo {
    pub id: String,
    pub title: String,
    /// `M:SS`.
    pub duration_label: String,
    /// `None` for results of an all-category search.
    pub category: Option<Category>,
    pub thumbnail_url: String,
    pub video_url: String,
    pub tags: Vec<String>,
    pub attribution: Attribution,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl StockVideo {
    /// Case-insensitive match of `query` against title and tags. An empty
    /// query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
    }

    pub fn in_category(&self, category: Category) -> bool {
        category == Category::All || self.category == Some(category)
    }
}

/// One page request against a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub category: Category,
    /// 1-based.
    pub page: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, category: Category, page: u32) -> Self {
        Self {
            query: query.into(),
            category,
            page: page.max(1),
        }
    }
}

/// One page of provider results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockPage {
    pub videos: Vec<StockVideo>,
    /// Entries the provider returned before unusable ones were dropped.
    /// Decides whether another page is worth requesting.
    pub received: usize,
}

impl From<Vec<StockVideo>> for StockPage {
    fn from(videos: Vec<StockVideo>) -> Self {
        let received = videos.len();
        Self { videos, received }
    }
}

struct StaticSample {
    id: &'static str,
    title: &'static str,
    duration: &'static str,
    category: Category,
    thumbnail: &'static str,
    video: &'static str,
    tags: [&'static str; 4],
}

const STATIC_SAMPLES: [StaticSample; 6] = [
    StaticSample {
        id: "1",
        title: "City Traffic at Night",
        duration: "0:15",
        category: Category::Urban,
        thumbnail: "https://images.pexels.com/videos/3571264/free-video-3571264.jpg?auto=compress&cs=tinysrgb&dpr=1&w=500",
        video: "https://vod-progressive.akamaized.net/exp=1703721600~acl=%2Fvimeo-prod-skyfire-std-us%2F01%2F3571%2F14%2F368002407%2F1546619575.mp4~hmac=abc123/1546619575.mp4",
        tags: ["city", "traffic", "night", "urban"],
    },
    StaticSample {
        id: "2",
        title: "Ocean Waves",
        duration: "0:20",
        category: Category::Nature,
        thumbnail: "https://images.pexels.com/videos/1093662/free-video-1093662.jpg?auto=compress&cs=tinysrgb&dpr=1&w=500",
        video: "https://vod-progressive.akamaized.net/exp=1703721600~acl=%2Fvimeo-prod-skyfire-std-us%2F01%2F1093%2F7%2F178602667%2F746475770.mp4~hmac=def456/746475770.mp4",
        tags: ["ocean", "waves", "nature", "water"],
    },
    StaticSample {
        id: "3",
        title: "Coffee Shop Ambiance",
        duration: "0:12",
        category: Category::Lifestyle,
        thumbnail: "https://images.pexels.com/videos/5645034/free-video-5645034.jpg?auto=compress&cs=tinysrgb&dpr=1&w=500",
        video: "https://vod-progressive.akamaized.net/exp=1703721600~acl=%2Fvimeo-prod-skyfire-std-us%2F01%2F5645%2F22%2F571739466%2F2464936089.mp4~hmac=ghi789/2464936089.mp4",
        tags: ["coffee", "cafe", "lifestyle", "cozy"],
    },
    StaticSample {
        id: "4",
        title: "Mountain Landscape",
        duration: "0:25",
        category: Category::Nature,
        thumbnail: "https://images.pexels.com/videos/4626379/free-video-4626379.jpg?auto=compress&cs=tinysrgb&dpr=1&w=500",
        video: "https://vod-progressive.akamaized.net/exp=1703721600~acl=%2Fvimeo-prod-skyfire-std-us%2F01%2F4626%2F15%2F473171503%2F2056706886.mp4~hmac=jkl012/2056706886.mp4",
        tags: ["mountain", "landscape", "nature", "scenic"],
    },
    StaticSample {
        id: "5",
        title: "Technology Interface",
        duration: "0:18",
        category: Category::Tech,
        thumbnail: "https://images.pexels.com/videos/3183175/free-video-3183175.jpg?auto=compress&cs=tinysrgb&dpr=1&w=500",
        video: "https://vod-progressive.akamaized.net/exp=1703721600~acl=%2Fvimeo-prod-skyfire-std-us%2F01%2F3183%2F8%2F340448721%2F1426797617.mp4~hmac=mno345/1426797617.mp4",
        tags: ["technology", "interface", "digital", "modern"],
    },
    StaticSample {
        id: "6",
        title: "Business Meeting",
        duration: "0:30",
        category: Category::Business,
        thumbnail: "https://images.pexels.com/videos/7688336/free-video-7688336.jpg?auto=compress&cs=tinysrgb&dpr=1&w=500",
        video: "https://vod-progressive.akamaized.net/exp=1703721600~acl=%2Fvimeo-prod-skyfire-std-us%2F01%2F7688%2F19%2F783933461%2F3430920591.mp4~hmac=pqr678/3430920591.mp4",
        tags: ["business", "meeting", "corporate", "professional"],
    },
];

/// The fixed sample set shown whenever the catalog holds no results.
pub fn static_samples() -> Vec<StockVideo> {
    STATIC_SAMPLES
        .iter()
        .map(|s| StockVideo {
            id: s.id.to_string(),
            title: s.title.to_string(),
            duration_label: s.duration.to_string(),
            category: Some(s.category),
            thumbnail_url: s.thumbnail.to_string(),
            video_url: s.video.to_string(),
            tags: s.tags.iter().map(|t| t.to_string()).collect(),
            attribution: Attribution {
                source: "Pexels".to_string(),
                author_name: "Pexels Contributor".to_string(),
                author_url: "https://www.pexels.com".to_string(),
            },
            width: None,
            height: None,
        })
        .collect()
}

/// Static samples narrowed to `category` and `query`.
pub fn filtered_static_samples(category: Category, query: &str) -> Vec<StockVideo> {
    static_samples()
        .into_iter()
        .filter(|v| v.in_category(category) && v.matches_query(query))
        .collect()
}
