//! # Page Views
//!
//! Askama templates for server-rendered pages. Every page is wrapped in the
//! `Default` layout (`templates/layouts/default.html`), which receives
//! [`LayoutProps`]; the page body receives the props produced by the page's
//! server-side step, unmodified.

use askama::Template;
use lib_core::dto::MarketPageProps;
use lib_core::AppError;
use std::collections::HashMap;

/// Page name shown by the layout on the market page.
pub const MARKET_PAGE_NAME: &str = "Market";

/// Viewport hints supplied by the client as `?width=&height=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportQuery {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ViewportQuery {
    /// Read the hints from raw query parameters. A hint that is not an
    /// unsigned integer is dropped instead of failing the request.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let hint = |name: &str| params.get(name).and_then(|v| v.trim().parse::<u32>().ok());
        Self {
            width: hint("width"),
            height: hint("height"),
        }
    }
}

/// Props of the `Default` layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutProps {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub page_name: &'static str,
}

impl LayoutProps {
    pub fn new(viewport: ViewportQuery, page_name: &'static str) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            page_name,
        }
    }
}

/// `Market` view inside the `Default` layout.
#[derive(Template)]
#[template(path = "market.html")]
pub struct MarketView<'a> {
    pub layout: LayoutProps,
    pub props: &'a MarketPageProps,
    /// Props as JSON for client-side hydration, safe to embed in a script tag
    pub props_json: String,
}

impl<'a> MarketView<'a> {
    pub fn new(viewport: ViewportQuery, props: &'a MarketPageProps) -> Result<Self, AppError> {
        Ok(Self {
            layout: LayoutProps::new(viewport, MARKET_PAGE_NAME),
            props,
            props_json: script_safe_json(props)?,
        })
    }
}

/// Render a template, mapping failures to [`AppError::Render`].
pub fn render<T: Template>(template: &T) -> Result<String, AppError> {
    template
        .render()
        .map_err(|e| AppError::Render(e.to_string()))
}

/// Serialize to JSON with `<` escaped so the output cannot close a `<script>` element.
fn script_safe_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_viewport_hints_parsed() {
        let viewport = ViewportQuery::from_params(&params(&[("width", "1440"), ("height", " 900 ")]));
        assert_eq!(viewport, ViewportQuery { width: Some(1440), height: Some(900) });
    }

    #[test]
    fn test_unparseable_viewport_hints_dropped() {
        let viewport = ViewportQuery::from_params(&params(&[("width", "abc"), ("height", "-5")]));
        assert_eq!(viewport, ViewportQuery::default());

        let viewport = ViewportQuery::from_params(&params(&[("width", ""), ("height", "720")]));
        assert_eq!(viewport, ViewportQuery { width: None, height: Some(720) });
    }

    #[test]
    fn test_layout_wraps_ready_market() {
        let props = MarketPageProps::ready();
        let viewport = ViewportQuery { width: Some(1440), height: Some(900) };
        let html = render(&MarketView::new(viewport, &props).unwrap()).unwrap();

        assert!(html.contains(r#"data-page-name="Market""#));
        assert!(html.contains(r#"data-width="1440""#));
        assert!(html.contains(r#"data-height="900""#));
        assert!(html.contains("market-panel"));
        assert!(!html.contains("market-error"));
        assert!(html.contains(r#"<script id="page-props" type="application/json">{}</script>"#));
    }

    #[test]
    fn test_layout_wraps_error_market() {
        let props = MarketPageProps::connect_wallet();
        let html = render(&MarketView::new(ViewportQuery::default(), &props).unwrap()).unwrap();

        assert!(html.contains(r#"data-page-name="Market""#));
        assert!(!html.contains("data-width"));
        assert!(html.contains("Connect your wallet first"));
        assert!(!html.contains("market-panel"));
    }

    #[test]
    fn test_error_text_is_escaped() {
        let props = MarketPageProps {
            error: Some("<script>alert(1)</script>".to_string()),
        };
        let html = render(&MarketView::new(ViewportQuery::default(), &props).unwrap()).unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("alert(1)"));
        assert!(html.contains(r#"{"error":"\u003cscript>alert(1)\u003c/script>"}"#));
    }
}
