//! HTML markup for panel bodies
//!
//! The web front end drops this into `#panel-content` and routes clicks on
//! `button[data-action]` back through [`PanelAction::parse`].
//!
//! [`PanelAction::parse`]: super::PanelAction::parse

use std::fmt::Write;

use super::panels::{Block, Button, ButtonStyle, ListItem, Panel};

/// Escape text for element content and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn button_class(style: ButtonStyle) -> &'static str {
    match style {
        ButtonStyle::Plain => "small-pill",
        ButtonStyle::Owned => "small-pill owned",
        ButtonStyle::Selected => "small-pill equipped disabled",
    }
}

fn write_button(out: &mut String, button: &Button) {
    let _ = write!(out, r#"<button class="{}""#, button_class(button.style));
    match &button.action {
        Some(action) => {
            let _ = write!(out, r#" data-action="{}""#, action.name());
            if let Some(id) = action.id() {
                let _ = write!(out, r#" data-id="{}""#, escape(id));
            }
        }
        None => out.push_str(" disabled"),
    }
    let _ = write!(out, ">{}</button>", escape(&button.label));
}

fn write_item(out: &mut String, item: &ListItem) {
    out.push_str(r#"<li class="store-item"><div class="store-label">"#);
    let _ = write!(
        out,
        "<span>{}</span><span>{}</span></div>",
        escape(&item.title),
        escape(&item.detail)
    );
    if let Some(button) = &item.button {
        write_button(out, button);
    }
    out.push_str("</li>");
}

/// Body markup for a panel (the title is set separately as text)
pub fn panel_body(panel: &Panel) -> String {
    let mut out = String::new();
    for block in &panel.blocks {
        match block {
            Block::Label(text) => {
                let _ = write!(out, r#"<div class="section-label">{}</div>"#, escape(text));
            }
            Block::List(items) => {
                out.push_str(r#"<ul class="store-list">"#);
                for item in items {
                    write_item(&mut out, item);
                }
                out.push_str("</ul>");
            }
            Block::Paragraph(text) => {
                let _ = write!(out, "<p>{}</p>", escape(text));
            }
        }
    }
    out
}
