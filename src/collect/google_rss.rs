// src/collect/google_rss.rs
// Google News RSS search feed, queried per keyword with a percent-encoded
// query parameter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;
use time::{format_description::well_known::Rfc2822, OffsetDateTime, UtcOffset};
use url::Url;

use crate::collect::{normalize_title, FeedError, FeedSource, NewsItem};

pub const DEFAULT_FEED_URL: &str =
    "https://news.google.com/rss/search?q={q}&hl=ko&gl=KR&ceid=KR:ko";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}
#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default, rename = "item")]
    items: Vec<Item>,
}
#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

fn parse_rfc2822(ts: &str) -> Option<DateTime<Utc>> {
    // Google News stamps entries with a literal "GMT" zone.
    let ts = ts.trim().replace(" GMT", " +0000");
    OffsetDateTime::parse(&ts, &Rfc2822)
        .ok()
        .map(|dt| dt.to_offset(UtcOffset::UTC).unix_timestamp())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
}

pub struct GoogleNewsSource {
    mode: Mode,
}

enum Mode {
    Http {
        template: String,
        client: reqwest::Client,
    },
    Fixture(String),
}

impl GoogleNewsSource {
    /// Real HTTP mode. `template` must contain a `{q}` placeholder for the
    /// encoded keyword.
    pub fn from_template(template: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("news-risk-reporter/0.1")
            .connect_timeout(std::time::Duration::from_secs(4))
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .expect("reqwest client");
        Self {
            mode: Mode::Http {
                template: template.to_string(),
                client,
            },
        }
    }

    /// Fixture mode for tests: parses the given XML, no network.
    pub fn from_fixture_str(xml: &str) -> Self {
        Self {
            mode: Mode::Fixture(xml.to_string()),
        }
    }

    /// Substitute the percent-encoded keyword into the URL template and
    /// validate the result.
    pub fn build_query_url(template: &str, keyword: &str) -> Result<Url, url::ParseError> {
        let encoded: String = url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
        Url::parse(&template.replace("{q}", &encoded))
    }

    fn parse_items_from_str(xml: &str, limit: usize) -> Result<Vec<NewsItem>, FeedError> {
        let xml_clean = scrub_html_entities_for_xml(xml);
        let rss: Rss = from_str(&xml_clean)?;

        let mut out = Vec::new();
        for it in rss.channel.items.into_iter() {
            if out.len() >= limit {
                break;
            }
            let title = normalize_title(it.title.as_deref().unwrap_or_default());
            let link = it.link.unwrap_or_default().trim().to_string();
            if title.is_empty() || link.is_empty() {
                continue;
            }
            let published = it
                .pub_date
                .as_deref()
                .and_then(parse_rfc2822)
                .unwrap_or_else(Utc::now);
            out.push(NewsItem {
                title,
                link,
                published,
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl FeedSource for GoogleNewsSource {
    async fn fetch(&self, keyword: &str, limit: usize) -> Result<Vec<NewsItem>, FeedError> {
        match &self.mode {
            Mode::Fixture(xml) => Self::parse_items_from_str(xml, limit),
            Mode::Http { template, client } => {
                let url = Self::build_query_url(template, keyword)?;
                let body = client.get(url).send().await?.error_for_status()?.text().await?;
                Self::parse_items_from_str(&body, limit)
            }
        }
    }

    fn name(&self) -> &'static str {
        "GoogleNews"
    }
}

// Feeds occasionally leak HTML entities that are not valid XML entities.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
