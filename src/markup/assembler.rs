// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Region-to-markup assembly

use std::fmt::Write;

use super::element::{Document, ExtractedElement};

const DOCUMENT_HEAD: &str = "<html>
<head>
    <style>
        body { font-family: Arial, sans-serif; background: white; position: relative; }
        .container { width: 100%; max-width: 600px; margin: auto; position: relative; }
        .element { position: absolute; background: rgba(211, 211, 211, 0.5); padding: 5px; border-radius: 5px; }
        .text { position: absolute; font-size: 16px; font-weight: bold; }
    </style>
</head>
<body>
    <div class='container'>
";

const DOCUMENT_TAIL: &str = "    </div>
</body>
</html>
";

/// Builds the positioned HTML document from extracted elements
///
/// Pure and deterministic: the same elements in the same order always
/// produce byte-identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupAssembler;

impl MarkupAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Emit the document shell followed by one block per element, in order
    ///
    /// Element text is HTML-escaped, so OCR output can never inject markup.
    pub fn assemble(&self, elements: &[ExtractedElement]) -> Document {
        let mut html = String::with_capacity(DOCUMENT_HEAD.len() + DOCUMENT_TAIL.len() + elements.len() * 128);
        html.push_str(DOCUMENT_HEAD);

        for element in elements {
            let b = &element.bbox;
            debug_assert!(b.width > 0 && b.height > 0, "degenerate box {:?}", b);

            // Writing into a String cannot fail
            let _ = writeln!(
                html,
                "<div class='element' style='top: {}px; left: {}px; width: {}px; height: {}px;' id='{}'>{}</div>",
                b.y,
                b.x,
                b.width,
                b.height,
                element.dom_id(),
                ammonia::clean_text(&element.text)
            );
        }

        html.push_str(DOCUMENT_TAIL);
        Document::new(html, elements.len())
    }
}
