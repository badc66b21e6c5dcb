use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The requested output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    FacebookAd,
    InstagramCaption,
    ColdEmail,
    LandingPage,
    BrandKit,
}

/// Which generator produced a history item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    #[default]
    CopyGenerator,
    BrandKit,
}

impl ContentType {
    pub const COPY_TYPES: [ContentType; 4] = [
        ContentType::FacebookAd,
        ContentType::InstagramCaption,
        ContentType::ColdEmail,
        ContentType::LandingPage,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ContentType::FacebookAd => "facebook-ad",
            ContentType::InstagramCaption => "instagram-caption",
            ContentType::ColdEmail => "cold-email",
            ContentType::LandingPage => "landing-page",
            ContentType::BrandKit => "brand-kit",
        }
    }

    /// Human-readable label used in listings and exports.
    pub fn label(self) -> &'static str {
        match self {
            ContentType::FacebookAd => "Facebook/Google Ad",
            ContentType::InstagramCaption => "Instagram Caption",
            ContentType::ColdEmail => "Cold Email",
            ContentType::LandingPage => "Landing Page",
            ContentType::BrandKit => "Brand Kit",
        }
    }

    pub fn page_type(self) -> PageType {
        match self {
            ContentType::BrandKit => PageType::BrandKit,
            _ => PageType::CopyGenerator,
        }
    }

    /// Resolves a key, falling back to Facebook ad headlines for anything unknown.
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or(ContentType::FacebookAd)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "facebook-ad" => Ok(ContentType::FacebookAd),
            "instagram-caption" => Ok(ContentType::InstagramCaption),
            "cold-email" => Ok(ContentType::ColdEmail),
            "landing-page" => Ok(ContentType::LandingPage),
            "brand-kit" => Ok(ContentType::BrandKit),
            other => Err(format!("unknown content type '{other}'")),
        }
    }
}
