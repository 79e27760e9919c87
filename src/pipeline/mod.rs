//! Code block transform pipeline.
//!
//! Rewrites the fenced code blocks of a post tree into references to an
//! interactive component that reads the untouched source and language.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ ExtractCode ──► Highlight<H> ──► RelabelCode               │
//! │  pre.rawCode     code > span      pre → Pre, + import decl │
//! │  pre.language    (pre untouched)                           │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Extraction runs before highlighting so `rawCode` is the exact fenced
//! text, not the text of the highlighted spans.

pub mod transform;

use crate::{config::CodeConfig, debug, logger::is_verbose, tree::Document};

pub use transform::{
    ExtractCode, Highlight, Highlighter, LANGUAGE_ATTR, PlainHighlighter, RAW_CODE_ATTR,
    RelabelCode, TokenHighlighter,
};

// =============================================================================
// Transform / Pipeline
// =============================================================================

/// One tree-to-tree stage.
pub trait Transform {
    fn transform(self, doc: Document) -> Document;
}

/// Applies transforms in order.
///
/// ```ignore
/// let doc = Pipeline::new(doc).pipe(ExtractCode).pipe(stage).into_inner();
/// ```
pub struct Pipeline {
    doc: Document,
}

impl Pipeline {
    pub fn new(doc: Document) -> Self {
        Self { doc }
    }

    pub fn pipe<T: Transform>(self, transform: T) -> Self {
        Self {
            doc: transform.transform(self.doc),
        }
    }

    /// Observe the intermediate tree without changing it.
    pub fn inspect_if(self, cond: bool, f: impl FnOnce(&Document)) -> Self {
        if cond {
            f(&self.doc);
        }
        self
    }

    pub fn into_inner(self) -> Document {
        self.doc
    }
}

// =============================================================================
// Compilation
// =============================================================================

/// Run the full code block pipeline configured by `[code]`.
pub fn compile(doc: Document, config: &CodeConfig) -> Document {
    let pipeline = Pipeline::new(doc)
        .pipe(ExtractCode)
        .inspect_if(is_verbose(), |doc| {
            debug!("compile"; "{} code blocks extracted", count_extracted(doc));
        });

    let pipeline = if config.highlight {
        pipeline.pipe(Highlight::new(TokenHighlighter))
    } else {
        pipeline.pipe(Highlight::new(PlainHighlighter))
    };

    pipeline
        .pipe(RelabelCode::from_config(config))
        .into_inner()
}

fn count_extracted(doc: &Document) -> usize {
    let mut count = 0;
    doc.root.walk(&mut |elem| {
        if elem.attrs.has(RAW_CODE_ATTR) {
            count += 1;
        }
    });
    count
}
