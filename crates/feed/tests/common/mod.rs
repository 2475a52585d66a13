// ABOUTME: Helpers for reading generated feed XML back with quick-xml in integration tests.
// ABOUTME: Flattens documents into element lists, CDATA contents, text contents, and attributes.

#![allow(dead_code)]

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

fn name_of(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Every element in document order with its nesting depth (root is 0).
pub fn elements(xml: &str) -> Vec<(usize, String)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut depth = 0;
    let mut out = Vec::new();
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) => {
                out.push((depth, name_of(&e)));
                depth += 1;
            }
            Event::Empty(e) => out.push((depth, name_of(&e))),
            Event::End(_) => depth -= 1,
            Event::Eof => break,
            _ => {}
        }
    }
    out
}

/// Names of the direct children of `<channel>`.
pub fn channel_children(xml: &str) -> Vec<String> {
    elements(xml)
        .into_iter()
        .filter(|(depth, _)| *depth == 2)
        .map(|(_, name)| name)
        .collect()
}

/// Concatenated CDATA content of every element named `name`.
pub fn cdata_of(xml: &str, name: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut stack: Vec<String> = Vec::new();
    let mut out = Vec::new();
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) => {
                let n = name_of(&e);
                if n == name {
                    out.push(String::new());
                }
                stack.push(n);
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::CData(e) => {
                if stack.last().map(String::as_str) == Some(name) {
                    if let Some(last) = out.last_mut() {
                        last.push_str(&String::from_utf8_lossy(&e));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    out
}

/// Plain text content of every element named `name`. Text must not contain entities.
pub fn text_of(xml: &str, name: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut capturing = false;
    let mut out = Vec::new();
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) => {
                capturing = name_of(&e) == name;
                if capturing {
                    out.push(String::new());
                }
            }
            Event::Text(e) if capturing => {
                let text = e.decode().map(|s| s.into_owned()).unwrap_or_default();
                if let Some(last) = out.last_mut() {
                    last.push_str(&text);
                }
            }
            Event::End(_) => capturing = false,
            Event::Eof => break,
            _ => {}
        }
    }
    out
}

/// Attributes of every element named `name`, in document order.
pub fn attributes_of(xml: &str, name: &str) -> Vec<Vec<(String, String)>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut out = Vec::new();
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) | Event::Empty(e) if name_of(&e) == name => {
                let attrs = e
                    .attributes()
                    .flatten()
                    .map(|a| {
                        (
                            String::from_utf8_lossy(a.key.as_ref()).into_owned(),
                            String::from_utf8_lossy(&a.value).into_owned(),
                        )
                    })
                    .collect();
                out.push(attrs);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    out
}
