//! Sitemap page rendering.
//!
//! Builds the sitemap [`Document`] from the selected content and a resolved
//! [`TemplateContext`]. The layout only decides how items are arranged and
//! which classes they carry; content and order come from the [`Selection`].

use sitemap_html_core::{SiteConfig, UrlResolver};
use tracing::debug;

use crate::{
    document::{Document, Element, Node},
    options::SitemapOptions,
    selector::{ContentItem, Meta, Selection},
    template::{Arrangement, Strings, TemplateContext},
};

const BACK_HREF: &str = "javascript:history.back()";

/// The content sections, in the order they appear on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Posts,
    Categories,
    Pages,
}

impl Section {
    /// All sections in page order.
    pub const ALL: [Section; 3] = [Section::Posts, Section::Categories, Section::Pages];

    fn id(&self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Categories => "categories",
            Self::Pages => "pages",
        }
    }

    fn heading(&self, strings: &Strings) -> &'static str {
        match self {
            Self::Posts => strings.posts,
            Self::Categories => strings.categories,
            Self::Pages => strings.pages,
        }
    }

    fn items<'a>(&self, selection: &'a Selection) -> &'a [ContentItem] {
        match self {
            Self::Posts => &selection.posts,
            Self::Categories => &selection.categories,
            Self::Pages => &selection.pages,
        }
    }

    fn meta_text(&self, meta: &Meta, strings: &Strings) -> String {
        match (self, meta) {
            (Self::Pages, Meta::Date(date)) => format!("{} {date}", strings.updated),
            (_, Meta::Date(date)) => date.clone(),
            (_, Meta::Count(count)) => format!("{count} {}", strings.items),
        }
    }
}

/// Renders the sitemap page for one site.
#[derive(Debug)]
pub struct PageRenderer<'a> {
    site: &'a SiteConfig,
    options: &'a SitemapOptions,
    context: &'a TemplateContext,
}

impl<'a> PageRenderer<'a> {
    /// Create a renderer.
    #[must_use]
    pub fn new(
        site: &'a SiteConfig,
        options: &'a SitemapOptions,
        context: &'a TemplateContext,
    ) -> Self {
        Self {
            site,
            options,
            context,
        }
    }

    /// Render the page to HTML text.
    #[must_use]
    pub fn render(&self, selection: &Selection) -> String {
        self.build(selection).to_html()
    }

    /// Build the page as a document tree.
    #[must_use]
    pub fn build(&self, selection: &Selection) -> Document {
        debug!(
            layout = %self.context.layout,
            locale = self.context.locale.id(),
            "rendering sitemap"
        );

        let lang = match self.site.language.trim() {
            "" => "en",
            lang => lang,
        };

        Document::new(lang, self.head(), self.body(selection))
    }

    fn head(&self) -> Element {
        let label = self.context.strings.title;
        let title = match self.site.title.trim() {
            "" => label.to_string(),
            site_title => format!("{label} - {site_title}"),
        };

        Element::new("head")
            .child(Element::new("meta").attr("charset", "UTF-8"))
            .child(
                Element::new("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=device-width, initial-scale=1.0"),
            )
            .child(Element::new("title").text(title))
            .child(Element::new("style").child(Node::Raw(self.context.style.clone())))
    }

    fn body(&self, selection: &Selection) -> Element {
        let strings = self.context.strings;

        let nav = Element::new("nav")
            .class("nav")
            .child(
                Element::new("a")
                    .attr("href", self.site.url_for("/"))
                    .class("nav-home")
                    .text(strings.home),
            )
            .child(
                Element::new("a")
                    .attr("href", BACK_HREF)
                    .class("nav-back")
                    .text(strings.back),
            );

        let header = Element::new("header")
            .child(Element::new("h1").text(strings.title))
            .child(
                Element::new("p")
                    .class("summary")
                    .text(strings.summary(selection.posts.len(), selection.categories.len())),
            );

        let sections = Section::ALL
            .into_iter()
            .filter_map(|section| self.section(section, section.items(selection)));

        let container = Element::new("div")
            .class(&format!("container layout-{}", self.context.layout.id()))
            .child(nav)
            .child(header)
            .children(sections);

        Element::new("body").child(container)
    }

    /// Render a section, or nothing when it has no items.
    fn section(&self, section: Section, items: &[ContentItem]) -> Option<Element> {
        if items.is_empty() {
            return None;
        }

        let strings = self.context.strings;
        let entries = items
            .iter()
            .map(|item| self.item(item, &section.meta_text(&item.meta, strings)));

        let list = match self.context.layout.arrangement() {
            Arrangement::Grid => Element::new("div").class("grid"),
            Arrangement::List => Element::new("ul").class("list"),
            Arrangement::Links => Element::new("div").class("links"),
        }
        .children(entries);

        Some(
            Element::new("div")
                .class(&format!("section section-{}", section.id()))
                .child(Element::new("h2").text(section.heading(strings)))
                .child(list),
        )
    }

    fn item(&self, item: &ContentItem, meta: &str) -> Element {
        let rel = self.options.nofollow.then_some("nofollow");

        match self.context.layout.arrangement() {
            Arrangement::Grid => Element::new("a")
                .attr("href", item.url.as_str())
                .class("card")
                .attr_opt("rel", rel)
                .child(Element::new("span").class("card-title").text(item.title.as_str()))
                .child(Element::new("span").class("card-meta").text(meta)),
            Arrangement::List => Element::new("li")
                .class("item list-item")
                .child(
                    Element::new("a")
                        .attr("href", item.url.as_str())
                        .attr_opt("rel", rel)
                        .text(item.title.as_str()),
                )
                .child(Element::new("span").class("dot"))
                .child(Element::new("span").class("meta").text(meta)),
            Arrangement::Links => Element::new("a")
                .attr("href", item.url.as_str())
                .class("item-link")
                .attr_opt("rel", rel)
                .child(Element::new("span").class("item-title").text(item.title.as_str()))
                .child(Element::new("span").class("item-meta").text(meta)),
        }
    }
}
