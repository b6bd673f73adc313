#![allow(dead_code)]

use handmark_core::SketchConfig;
use handmark_render::{Result, RoughSandbox, SketchRenderer, SketchRequest, SketchSandbox};
use std::collections::BTreeMap;

/// Wraps the real sandbox and records every request it evaluates.
pub struct RecordingSandbox {
    inner: RoughSandbox,
    pub requests: Vec<SketchRequest>,
}

impl RecordingSandbox {
    pub fn new() -> Self {
        Self {
            inner: RoughSandbox::initialize().expect("sandbox init"),
            requests: Vec::new(),
        }
    }

    pub fn counts(&self) -> BTreeMap<&'static str, usize> {
        let mut out = BTreeMap::new();
        for r in &self.requests {
            *out.entry(r.kind()).or_insert(0) += 1;
        }
        out
    }

    pub fn count(&self, kind: &str) -> usize {
        self.requests.iter().filter(|r| r.kind() == kind).count()
    }
}

impl SketchSandbox for RecordingSandbox {
    fn evaluate(&mut self, request: &SketchRequest) -> Result<()> {
        self.requests.push(request.clone());
        self.inner.evaluate(request)
    }

    fn current_children(&self) -> Result<String> {
        self.inner.current_children()
    }
}

pub fn recording_renderer() -> SketchRenderer<RecordingSandbox> {
    SketchRenderer::with_sandbox(RecordingSandbox::new(), SketchConfig::default())
        .expect("renderer")
}

pub fn renderer() -> SketchRenderer {
    SketchRenderer::new(SketchConfig::default()).expect("renderer")
}

/// Elements of a rendered fragment as `(tag, attributes)` pairs, in document order.
pub fn elements(fragment: &str) -> Vec<(String, BTreeMap<String, String>)> {
    let wrapped = format!(r#"<svg xmlns="http://www.w3.org/2000/svg">{fragment}</svg>"#);
    let doc = roxmltree::Document::parse(&wrapped).expect("fragment is well-formed xml");
    doc.root_element()
        .children()
        .filter(|n| n.is_element())
        .map(|n| {
            let attrs = n
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect();
            (n.tag_name().name().to_string(), attrs)
        })
        .collect()
}

pub fn texts(fragment: &str) -> Vec<String> {
    let wrapped = format!(r#"<svg xmlns="http://www.w3.org/2000/svg">{fragment}</svg>"#);
    let doc = roxmltree::Document::parse(&wrapped).expect("fragment is well-formed xml");
    doc.root_element()
        .children()
        .filter(|n| n.has_tag_name("text"))
        .map(|n| n.text().unwrap_or_default().to_string())
        .collect()
}
