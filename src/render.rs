//! Static HTML rendering.
//!
//! Renders the showcase page for a [`SiteContent`] as a single `index.html`.
//! The markup carries the same ids, classes and data attributes that
//! [`crate::content::build_document`] builds in memory, so a host that binds
//! the page controllers to the rendered file sees the structure the behavior
//! tests run against.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time. The error-message style
//! from `[forms.error_style]` is appended as a generated rule so the stylesheet
//! and the inline style applied on a failed submit agree.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolated content is escaped.

use crate::carousel::{ARROW_CLASS, CONTAINER_CLASS, INDICATOR_CLASS, SLIDE_CLASS};
use crate::config::{ErrorStyle, SiteConfig};
use crate::content::{FieldSpec, SiteContent, form_fields, form_section};
use crate::forms::ERROR_CLASS;
use crate::gallery::{FILTER_CLASS, ITEM_CLASS};
use crate::scroll::BACK_TO_TOP_ID;
use crate::validate::{FormKind, error_id_for};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Render the page and write it to `output_dir/index.html`.
pub fn render_site(
    content: &SiteContent,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<PathBuf, RenderError> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("index.html");
    fs::write(&path, render_page(content, config).into_string())?;
    tracing::info!(path = %path.display(), "page rendered");
    Ok(path)
}

/// Stylesheet: embedded base rules plus the configured error style.
pub fn render_css(config: &SiteConfig) -> String {
    format!("{}\n{}", CSS_STATIC, error_style_css(&config.forms.error_style))
}

fn error_style_css(style: &ErrorStyle) -> String {
    format!(
        ".{ERROR_CLASS} {{ color: {}; font-size: {}; margin-top: {}; }}\n",
        style.color, style.font_size, style.margin_top
    )
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

fn with_active(class: &str, active: bool) -> String {
    if active {
        format!("{class} active")
    } else {
        class.to_string()
    }
}

fn site_header(content: &SiteContent) -> Markup {
    html! {
        header.site-header {
            nav {
                @for link in &content.nav {
                    a href=(link.href) { (link.label) }
                }
            }
        }
    }
}

/// Banner slider. Empty when there are no slides, matching a page with no
/// carousel markup.
pub fn render_carousel(content: &SiteContent) -> Markup {
    html! {
        @if !content.slides.is_empty() {
            section #home {
                div class=(CONTAINER_CLASS) {
                    @for (i, slide) in content.slides.iter().enumerate() {
                        div class=(with_active(SLIDE_CLASS, i == 0)) {
                            img src=(slide.image) alt=(slide.title);
                            h2 { (slide.title) }
                            p { (slide.caption) }
                        }
                    }
                    button class={ (ARROW_CLASS) " prev" } type="button" { "‹" }
                    button class={ (ARROW_CLASS) " next" } type="button" { "›" }
                    div.slider-dots {
                        @for i in 0..content.slides.len() {
                            span class=(with_active(INDICATOR_CLASS, i == 0)) {}
                        }
                    }
                }
            }
        }
    }
}

pub fn render_gallery(content: &SiteContent, config: &SiteConfig) -> Markup {
    html! {
        section #gallery {
            div.gallery-filter {
                button class=(with_active(FILTER_CLASS, true)) data-filter=(config.gallery.all_category) { "All" }
                @for category in &content.categories {
                    button class=(FILTER_CLASS) data-filter=(category.tag) { (category.label) }
                }
            }
            div.gallery-grid {
                @for work in &content.works {
                    div class=(ITEM_CLASS) data-category=(work.category) {
                        img src=(work.image) alt=(work.title) loading="lazy";
                        h3 { (work.title) }
                    }
                }
            }
        }
    }
}

fn render_field(spec: &FieldSpec) -> Markup {
    html! {
        div.form-group {
            label for=(spec.id) { (spec.label) }
            @match spec.control.input_type() {
                Some(ty) => {
                    input id=(spec.id) name=(spec.id) type=(ty);
                }
                None => {
                    textarea id=(spec.id) name=(spec.id) {}
                }
            }
            span id=(error_id_for(spec.id)) class=(ERROR_CLASS) {}
        }
    }
}

pub fn render_form(kind: FormKind) -> Markup {
    html! {
        section id=(form_section(kind)) {
            form id=(kind.form_id()) novalidate {
                @for spec in form_fields(kind) {
                    (render_field(spec))
                }
                button type="submit" { "Submit" }
            }
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

pub fn render_page(content: &SiteContent, config: &SiteConfig) -> Markup {
    let body = html! {
        (site_header(content))
        main {
            (render_carousel(content))
            (render_gallery(content, config))
            section #about {
                p { (content.about) }
            }
            @for kind in FormKind::ALL {
                (render_form(kind))
            }
        }
        button id=(BACK_TO_TOP_ID) class="back-to-top" type="button" { "↑" }
    };
    base_document(&content.title, &render_css(config), body)
}
