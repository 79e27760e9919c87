//! Head block re-serialization.

use super::{MetadataBlock, PostError, head::ParsedHead};
use serde_yaml::{Sequence, Value};

/// Return the new source when `need_rewrite` is set, `None` otherwise.
///
/// Only the head span is replaced: the bytes after the closing `---` are
/// copied unchanged. Fields the pipeline owns (`meta`, `date`, `image`)
/// are written into the original mapping, so untouched keys keep their
/// position and new keys go last. `meta` items from the original head are
/// kept as written; entries `block` gained past them are appended.
pub fn rewrite_if_needed(
    source: &str,
    parsed: &ParsedHead<'_>,
    block: &MetadataBlock,
    need_rewrite: bool,
) -> Result<Option<String>, PostError> {
    if !need_rewrite {
        return Ok(None);
    }

    let mut mapping = parsed.mapping.clone();
    let mut meta = match parsed.mapping.get("meta") {
        Some(Value::Sequence(items)) => items.clone(),
        _ => Sequence::new(),
    };
    for entry in block.meta.get(parsed.block.meta.len()..).unwrap_or_default() {
        meta.push(serde_yaml::to_value(entry)?);
    }
    mapping.insert(Value::from("meta"), Value::Sequence(meta));
    if let Some(date) = &block.date {
        mapping.insert(Value::from("date"), Value::from(date.as_str()));
    }
    if let Some(image) = &block.image {
        mapping.insert(Value::from("image"), Value::from(image.as_str()));
    }

    let yaml = serde_yaml::to_string(&mapping)?;
    let eol = parsed.head.eol;
    let yaml = yaml.trim_end_matches('\n');
    let yaml = if eol == "\n" {
        yaml.to_string()
    } else {
        yaml.replace('\n', eol)
    };

    let span = &parsed.head.span;
    let mut out = String::with_capacity(source.len() + yaml.len());
    out.push_str(&source[..span.start]);
    out.push_str("---");
    out.push_str(eol);
    out.push_str(&yaml);
    out.push_str(eol);
    out.push_str("---");
    out.push_str(&source[span.end..]);
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::head::parse_head;
    use std::path::Path;

    fn rewrite(source: &str, edit: impl FnOnce(&mut MetadataBlock)) -> String {
        let parsed = parse_head(Path::new("posts.t.mdx"), source).unwrap();
        let mut block = parsed.block.clone();
        edit(&mut block);
        rewrite_if_needed(source, &parsed, &block, true)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_no_rewrite() {
        let source = "---\ndate: x\n---\nbody";
        let parsed = parse_head(Path::new("posts.t.mdx"), source).unwrap();
        let out = rewrite_if_needed(source, &parsed, &parsed.block, false).unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn test_body_byte_identical() {
        let body = "\n# Title\n\n```rust\nfn main() {}\n```\n---\nnot: head\n";
        let source = format!("---\nmeta:\n  - title: Hi\n---{body}");
        let out = rewrite(&source, |block| block.date = Some("2024-06-15".into()));
        assert!(out.ends_with(body));
        assert!(out.starts_with("---\n"));
    }

    #[test]
    fn test_key_order_and_unknown_keys_preserved() {
        let source = "---\nlayout: post\ndate: 2024-01-01\nmeta:\n- title: Hi\n  lang: en\n---\nbody";
        let out = rewrite(source, |block| {
            block.image = Some("/img/p.webp".into());
        });

        let pos = |key: &str| out.find(key).unwrap();
        assert!(pos("layout:") < pos("date:"));
        assert!(pos("date:") < pos("meta:"));
        assert!(pos("meta:") < pos("image:"));
        assert!(out.contains("lang: en"));
        assert!(out.ends_with("\n---\nbody"));
    }

    #[test]
    fn test_crlf_preserved() {
        let source = "---\r\nimage: /a.png\r\n---\r\nbody\r\n";
        let out = rewrite(source, |_| {});
        assert!(out.starts_with("---\r\nimage:"));
        assert!(out.ends_with("\r\n---\r\nbody\r\n"));
        assert!(!out.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_rewritten_head_reparses() {
        let source = "---\n---\nbody";
        let out = rewrite(source, |block| {
            block.date = Some("2024-06-15".into());
            block.image = Some("/img/a.png".into());
        });
        let parsed = parse_head(Path::new("posts.t.mdx"), &out).unwrap();
        assert_eq!(parsed.block.date.as_deref(), Some("2024-06-15"));
        assert_eq!(parsed.block.image.as_deref(), Some("/img/a.png"));
        assert_eq!(parsed.body(&out), "body");
    }

    #[test]
    fn test_opaque_meta_items_kept() {
        let source = "---\nmeta:\n- title: Hi\n- just a string\n- content: 1.5\n---\nbody";
        let out = rewrite(source, |block| {
            block.meta.push(crate::post::MetaEntry::name("twitter:card", "summary"));
        });

        let parsed = parse_head(Path::new("posts.t.mdx"), &out).unwrap();
        let Some(Value::Sequence(items)) = parsed.mapping.get("meta") else {
            panic!("meta is not a sequence: {out}");
        };
        assert_eq!(items.len(), 4);
        assert_eq!(items[1], Value::from("just a string"));
        assert!(items[2]["content"].is_f64());
        assert_eq!(items[3]["name"], Value::from("twitter:card"));
    }
}
