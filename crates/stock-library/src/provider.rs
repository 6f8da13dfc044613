//! The provider seam and the offline sample provider.

use crate::error::StockResult;
use crate::video::{Attribution, Category, SearchRequest, StockPage, StockVideo};

/// A source of stock footage search results.
///
/// Searches are blocking; the catalog runs them off the caller's thread.
pub trait StockProvider: Send + Sync {
    /// Fetch one page of results.
    fn search(&self, request: &SearchRequest) -> StockResult<StockPage>;

    /// Results per full page. A shorter page means there is nothing more.
    fn page_size(&self) -> usize;

    /// Provider name for notices and logs.
    fn name(&self) -> &str;
}

const SAMPLE_PAGE_SIZE: usize = 8;

const SAMPLE_MEDIA_BASE: &str = "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample";

const SAMPLE_MEDIA_FILES: [&str; 6] = [
    "BigBuckBunny.mp4",
    "ElephantsDream.mp4",
    "ForBiggerBlazes.mp4",
    "ForBiggerEscapes.mp4",
    "ForBiggerFun.mp4",
    "ForBiggerJoyrides.mp4",
];

const SAMPLE_SOURCES: [&str; 4] = ["Pexels", "Pixabay", "Videvo", "Videezy"];

const SAMPLE_AUTHORS: [&str; 4] = ["Alex Johnson", "Maria Silva", "David Chen", "Sarah Wilson"];

struct SampleTitle {
    title: &'static str,
    duration: &'static str,
    tags: [&'static str; 4],
}

const fn sample(title: &'static str, duration: &'static str, tags: [&'static str; 4]) -> SampleTitle {
    SampleTitle {
        title,
        duration,
        tags,
    }
}

const SAMPLE_TITLES: [(Category, [SampleTitle; 5]); 5] = [
    (
        Category::Nature,
        [
            sample("Mountain Sunrise Timelapse", "0:30", ["mountain", "sunrise", "timelapse", "nature"]),
            sample("Forest Stream Flowing", "0:25", ["forest", "water", "stream", "peaceful"]),
            sample("Ocean Waves Crashing", "0:20", ["ocean", "waves", "beach", "water"]),
            sample("Wildlife in Savanna", "0:35", ["wildlife", "animals", "savanna", "nature"]),
            sample("Autumn Leaves Falling", "0:18", ["autumn", "leaves", "fall", "trees"]),
        ],
    ),
    (
        Category::Urban,
        [
            sample("City Night Traffic", "0:22", ["city", "traffic", "night", "lights"]),
            sample("Skyscrapers from Below", "0:15", ["buildings", "architecture", "urban", "sky"]),
            sample("Street Art Wall", "0:12", ["art", "street", "culture", "urban"]),
            sample("Busy Intersection", "0:28", ["intersection", "people", "city", "movement"]),
            sample("Subway Platform", "0:20", ["subway", "transport", "urban", "people"]),
        ],
    ),
    (
        Category::Tech,
        [
            sample("Code on Screen", "0:16", ["programming", "code", "technology", "screen"]),
            sample("Circuit Board Close-up", "0:14", ["electronics", "circuit", "technology", "macro"]),
            sample("Data Visualization", "0:24", ["data", "charts", "analytics", "technology"]),
            sample("Robot Assembly Line", "0:32", ["robot", "automation", "industry", "technology"]),
            sample("Server Room Lights", "0:19", ["servers", "data center", "technology", "lights"]),
        ],
    ),
    (
        Category::Lifestyle,
        [
            sample("Morning Coffee Ritual", "0:18", ["coffee", "morning", "lifestyle", "cozy"]),
            sample("Yoga at Sunset", "0:26", ["yoga", "wellness", "sunset", "health"]),
            sample("Friends Laughing", "0:15", ["friends", "happiness", "social", "lifestyle"]),
            sample("Home Cooking", "0:22", ["cooking", "food", "home", "lifestyle"]),
            sample("Reading by Window", "0:20", ["reading", "books", "quiet", "lifestyle"]),
        ],
    ),
    (
        Category::Business,
        [
            sample("Team Meeting", "0:28", ["meeting", "team", "business", "office"]),
            sample("Handshake Deal", "0:08", ["handshake", "business", "deal", "professional"]),
            sample("Financial Charts", "0:21", ["finance", "charts", "business", "analysis"]),
            sample("Office Workspace", "0:17", ["office", "workspace", "business", "modern"]),
            sample("Presentation Screen", "0:24", ["presentation", "business", "meeting", "screen"]),
        ],
    ),
];

/// Offline provider generating results from a curated title list.
#[derive(Debug, Clone, Default)]
pub struct SampleProvider;

impl SampleProvider {
    pub fn new() -> Self {
        Self
    }
}

impl StockProvider for SampleProvider {
    fn search(&self, request: &SearchRequest) -> StockResult<StockPage> {
        let query = request.query.trim().to_lowercase();
        let matching = SAMPLE_TITLES
            .iter()
            .filter(|(category, _)| request.category == Category::All || *category == request.category)
            .flat_map(|(_, titles)| titles.iter())
            .filter(|s| {
                query.is_empty()
                    || s.title.to_lowercase().contains(&query)
                    || s.tags.iter().any(|tag| tag.contains(query.as_str()))
            });

        let page = request.page.max(1) as usize;
        let offset = (page - 1) * SAMPLE_PAGE_SIZE;
        let results: Vec<StockVideo> = matching
            .skip(offset)
            .take(SAMPLE_PAGE_SIZE)
            .enumerate()
            .map(|(index, s)| StockVideo {
                id: format!("{}-{}-{}", request.category.as_str(), page, index),
                title: s.title.to_string(),
                duration_label: s.duration.to_string(),
                category: (request.category != Category::All).then_some(request.category),
                thumbnail_url: format!(
                    "https://picsum.photos/320/180?random={}&blur=1",
                    page * SAMPLE_PAGE_SIZE + index
                ),
                video_url: format!(
                    "{SAMPLE_MEDIA_BASE}/{}",
                    SAMPLE_MEDIA_FILES[index % SAMPLE_MEDIA_FILES.len()]
                ),
                tags: s.tags.iter().map(|t| t.to_string()).collect(),
                attribution: Attribution {
                    source: SAMPLE_SOURCES[index % SAMPLE_SOURCES.len()].to_string(),
                    author_name: SAMPLE_AUTHORS[index % SAMPLE_AUTHORS.len()].to_string(),
                    author_url: "#".to_string(),
                },
                width: Some(1920),
                height: Some(1080),
            })
            .collect();
        Ok(results.into())
    }

    fn page_size(&self) -> usize {
        SAMPLE_PAGE_SIZE
    }

    fn name(&self) -> &str {
        "Sample Library"
    }
}
