//! Social card (Twitter / Open Graph) meta augmentation.
//!
//! Presence is decided solely by a `twitter:card` entry, which makes the
//! augmentation idempotent: once appended, later runs leave `meta` alone.

use super::MetaEntry;

pub const TWITTER_CARD: &str = "twitter:card";
pub const CARD_KIND: &str = "summary_large_image";

/// Resolved values the card entries are built from.
#[derive(Debug, Clone, Copy)]
pub struct SocialCard<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub image: &'a str,
    pub placeholder_image: &'a str,
}

pub fn has_social_card(meta: &[MetaEntry]) -> bool {
    meta.iter().any(|entry| entry.has_name(TWITTER_CARD))
}

/// Append card entries unless a `twitter:card` entry already exists.
///
/// Image entries are only added when the image is not the placeholder.
/// Returns whether `meta` changed.
pub fn augment_social_card(meta: &mut Vec<MetaEntry>, card: &SocialCard<'_>) -> bool {
    if has_social_card(meta) {
        return false;
    }

    meta.extend([
        MetaEntry::name(TWITTER_CARD, CARD_KIND),
        MetaEntry::name("twitter:title", card.title),
        MetaEntry::name("twitter:description", card.description),
        MetaEntry::property("og:title", card.title),
        MetaEntry::property("og:description", card.description),
    ]);

    if card.image != card.placeholder_image {
        meta.extend([
            MetaEntry::name("twitter:image", card.image),
            MetaEntry::property("og:image", card.image),
        ]);
    }

    true
}
