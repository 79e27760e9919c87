//! Summary record derivation.

use super::{
    MetadataBlock, PostContext, PostError,
    read_time::estimate_read_time,
    social::{SocialCard, augment_social_card},
};
use crate::{log, utils::date::DateTimeUtc};
use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled";

/// One entry of the summary index, as read by listing pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub title: String,
    pub date: String,
    pub image: String,
    pub slug: String,
    pub estimated_read_time: usize,
    pub description: String,
    pub tags: Vec<String>,
}

/// Result of [`derive_summary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
    pub summary: PostSummary,
    /// The block was augmented and should be written back.
    pub need_rewrite: bool,
}

/// Build the summary for one post, filling in missing `date`/`image` and
/// social card entries on `block`.
///
/// The slug is resolved first, so an unrecognized filename leaves `block`
/// untouched.
pub fn derive_summary(
    block: &mut MetadataBlock,
    filename: &str,
    body: &str,
    ctx: &PostContext,
) -> Result<Derived, PostError> {
    let slug = ctx.pattern.slug(filename)?.to_string();
    let mut need_rewrite = false;

    let title = block.title().unwrap_or(UNTITLED).to_string();
    let description = block.description().unwrap_or_default().to_string();

    let date = match block.date.as_deref() {
        Some(date) if !date.is_empty() => {
            if DateTimeUtc::parse(date).is_none() {
                log!("warning"; "{}: date `{}` is not YYYY-MM-DD, index order may be off", filename, date);
            }
            date.to_string()
        }
        _ => {
            need_rewrite = true;
            ctx.today.clone()
        }
    };
    block.date = Some(date.clone());

    let image = match block.image.as_deref() {
        Some(image) if !image.is_empty() => image.to_string(),
        _ => {
            need_rewrite = true;
            ctx.placeholder_image.clone()
        }
    };
    block.image = Some(image.clone());

    let card = SocialCard {
        title: &title,
        description: &description,
        image: &image,
        placeholder_image: &ctx.placeholder_image,
    };
    need_rewrite |= augment_social_card(&mut block.meta, &card);

    let summary = PostSummary {
        title,
        date,
        image,
        slug,
        estimated_read_time: estimate_read_time(body, ctx.rates),
        description,
        tags: block.tags.clone().unwrap_or_default(),
    };

    Ok(Derived {
        summary,
        need_rewrite,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::{MetaEntry, test_context};

    fn block(yaml: &str) -> MetadataBlock {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_defaults_substituted() {
        let ctx = test_context();
        let mut block = MetadataBlock::default();
        let derived = derive_summary(&mut block, "posts.empty.mdx", "", &ctx).unwrap();

        assert!(derived.need_rewrite);
        let summary = derived.summary;
        assert_eq!(summary.title, UNTITLED);
        assert_eq!(summary.date, "2024-06-15");
        assert_eq!(summary.image, ctx.placeholder_image);
        assert_eq!(summary.description, "");
        assert_eq!(summary.slug, "empty");
        assert_eq!(summary.estimated_read_time, 0);
        assert!(summary.tags.is_empty());

        assert_eq!(block.date.as_deref(), Some("2024-06-15"));
        assert_eq!(block.image.as_deref(), Some(ctx.placeholder_image.as_str()));
        assert_eq!(block.meta.len(), 5);
    }

    #[test]
    fn test_complete_block_needs_no_rewrite() {
        let ctx = test_context();
        let mut block = block(
            "meta:\n  - title: Hello\n  - name: description\n    content: About\n  \
             - name: twitter:card\n    content: summary\ndate: 2023-01-02\n\
             image: /img/a.png\ntags: [x]\n",
        );
        let before = block.clone();
        let derived = derive_summary(&mut block, "posts.hello.mdx", "word", &ctx).unwrap();

        assert!(!derived.need_rewrite);
        assert_eq!(block, before);
        assert_eq!(
            derived.summary,
            PostSummary {
                title: "Hello".into(),
                date: "2023-01-02".into(),
                image: "/img/a.png".into(),
                slug: "hello".into(),
                estimated_read_time: 1,
                description: "About".into(),
                tags: vec!["x".into()],
            }
        );
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let ctx = test_context();
        let mut block = block("date: ''\nimage: ''\nmeta:\n  - name: twitter:card\n");
        let derived = derive_summary(&mut block, "posts.e.mdx", "", &ctx).unwrap();
        assert!(derived.need_rewrite);
        assert_eq!(derived.summary.date, "2024-06-15");
        assert_eq!(block.meta.len(), 1);
    }

    #[test]
    fn test_unrecognized_filename_leaves_block() {
        let ctx = test_context();
        let mut block = MetadataBlock::default();
        let err = derive_summary(&mut block, "draft.mdx", "", &ctx).unwrap_err();
        assert!(matches!(err, PostError::UnrecognizedFilename(_)));
        assert_eq!(block, MetadataBlock::default());
    }

    #[test]
    fn test_summary_json_keys() {
        let ctx = test_context();
        let mut block = MetadataBlock {
            meta: vec![MetaEntry::title("Hi")],
            ..Default::default()
        };
        let summary = derive_summary(&mut block, "posts.hi.mdx", "", &ctx)
            .unwrap()
            .summary;
        let json = serde_json::to_value(&summary).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            [
                "title",
                "date",
                "image",
                "slug",
                "estimatedReadTime",
                "description",
                "tags"
            ]
        );
    }
}
