use std::collections::BTreeMap;

use selector_audit::capture::{
    CanvasCapture, IframeCapture, PageCapture, ScanCapture, ShadowHostCapture,
};
use selector_audit::element::ElementSnapshot;

pub fn element(tag: &str) -> ElementSnapshot {
    ElementSnapshot {
        tag: tag.to_string(),
        ..Default::default()
    }
}

pub fn button_with_id(id: &str) -> ElementSnapshot {
    ElementSnapshot {
        id: Some(id.to_string()),
        ..element("button")
    }
}

pub fn button_with_text(text: &str) -> ElementSnapshot {
    ElementSnapshot {
        text: text.to_string(),
        ..element("button")
    }
}

pub fn input_named(name: &str) -> ElementSnapshot {
    ElementSnapshot {
        name: name.to_string(),
        ..element("input")
    }
}

pub fn tracked_button(attr: &str) -> ElementSnapshot {
    ElementSnapshot {
        track_attrs: vec![attr.to_string()],
        ..element("button")
    }
}

pub fn data_attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn probes(pairs: &[(&str, bool)]) -> BTreeMap<String, bool> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

pub fn page(url: &str) -> PageCapture {
    PageCapture {
        url: url.to_string(),
        ..Default::default()
    }
}

pub fn capture(site_url: &str, pages: Vec<PageCapture>) -> ScanCapture {
    ScanCapture {
        site_url: site_url.to_string(),
        pages,
    }
}

pub fn iframe(src: &str) -> IframeCapture {
    IframeCapture {
        src: src.to_string(),
    }
}

pub fn shadow_host(tag: &str, id: Option<&str>, classes: Option<&str>) -> ShadowHostCapture {
    ShadowHostCapture {
        tag: tag.to_string(),
        id: id.map(str::to_string),
        classes: classes.map(str::to_string),
    }
}

pub fn canvas(width: f64, height: f64, id: Option<&str>, classes: Option<&str>) -> CanvasCapture {
    CanvasCapture {
        id: id.map(str::to_string),
        width,
        height,
        classes: classes.map(str::to_string),
    }
}
