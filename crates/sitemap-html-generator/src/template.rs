//! Layout and locale registry.
//!
//! Layouts and locales are closed sets. Every lookup is total: unknown ids
//! resolve to [`Layout::default`] and [`Locale::default`], so a render context
//! can always be produced.

use std::fmt;

/// A visual template variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Flat cards on a bordered sheet.
    #[default]
    Flat,
    /// Serif list with dotted leaders.
    Minimal,
    /// Frosted panels with gradient heading.
    Rich,
    /// Plain list with dashed separators.
    Simple,
    /// Shadowed cards on a tinted background.
    Modern,
}

/// How items of a section are arranged on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    /// Cards in a responsive grid.
    Grid,
    /// Rows in an unordered list.
    List,
    /// Full-width link rows inside a panel.
    Links,
}

impl Layout {
    /// All known layouts.
    pub const ALL: [Layout; 5] = [
        Layout::Flat,
        Layout::Minimal,
        Layout::Rich,
        Layout::Simple,
        Layout::Modern,
    ];

    /// Configuration id of this layout.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Minimal => "minimal",
            Self::Rich => "rich",
            Self::Simple => "simple",
            Self::Modern => "modern",
        }
    }

    /// Look up a layout by id, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|layout| layout.id().eq_ignore_ascii_case(id))
    }

    /// Look up a layout by id, falling back to the default.
    #[must_use]
    pub fn resolve(id: &str) -> Self {
        Self::from_id(id).unwrap_or_default()
    }

    /// Item arrangement used by this layout.
    #[must_use]
    pub fn arrangement(&self) -> Arrangement {
        match self {
            Self::Flat | Self::Modern => Arrangement::Grid,
            Self::Minimal | Self::Simple => Arrangement::List,
            Self::Rich => Arrangement::Links,
        }
    }

    /// Stylesheet of this layout, without the shared navigation rules.
    #[must_use]
    pub fn stylesheet(&self) -> &'static str {
        match self {
            Self::Flat => FLAT_STYLE,
            Self::Minimal => MINIMAL_STYLE,
            Self::Rich => RICH_STYLE,
            Self::Simple => SIMPLE_STYLE,
            Self::Modern => MODERN_STYLE,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A set of localized UI strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Simplified Chinese.
    ZhCn,
}

impl Locale {
    /// All known locales.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::ZhCn];

    /// Language tag of this locale.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhCn => "zh-CN",
        }
    }

    /// Look up a locale by language tag.
    ///
    /// Matching is case-insensitive and accepts `_` as a subtag separator.
    /// Any English tag maps to [`Locale::En`]; simplified Chinese tags map to
    /// [`Locale::ZhCn`].
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let tag = id.trim().to_ascii_lowercase().replace('_', "-");
        match tag.as_str() {
            "en" => Some(Self::En),
            t if t.starts_with("en-") => Some(Self::En),
            "zh" | "zh-cn" | "zh-hans" | "zh-hans-cn" | "zh-sg" => Some(Self::ZhCn),
            _ => None,
        }
    }

    /// Look up a locale by language tag, falling back to the default.
    #[must_use]
    pub fn resolve(id: &str) -> Self {
        Self::from_id(id).unwrap_or_default()
    }

    /// UI strings for this locale.
    #[must_use]
    pub fn strings(&self) -> &'static Strings {
        match self {
            Self::En => &EN_STRINGS,
            Self::ZhCn => &ZH_CN_STRINGS,
        }
    }
}

/// Logical UI labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Home,
    Back,
    Title,
    Posts,
    Categories,
    Pages,
    Items,
    Updated,
}

impl Label {
    /// Every label a locale must provide.
    pub const ALL: [Label; 8] = [
        Label::Home,
        Label::Back,
        Label::Title,
        Label::Posts,
        Label::Categories,
        Label::Pages,
        Label::Items,
        Label::Updated,
    ];
}

/// Localized text for every [`Label`], plus the header summary pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strings {
    pub home: &'static str,
    pub back: &'static str,
    pub title: &'static str,
    pub posts: &'static str,
    pub categories: &'static str,
    pub pages: &'static str,
    pub items: &'static str,
    pub updated: &'static str,
    /// Header summary with `{posts}` and `{categories}` placeholders.
    pub summary: &'static str,
}

impl Strings {
    /// Text for a label.
    #[must_use]
    pub fn get(&self, label: Label) -> &'static str {
        match label {
            Label::Home => self.home,
            Label::Back => self.back,
            Label::Title => self.title,
            Label::Posts => self.posts,
            Label::Categories => self.categories,
            Label::Pages => self.pages,
            Label::Items => self.items,
            Label::Updated => self.updated,
        }
    }

    /// Header summary line for the given counts.
    #[must_use]
    pub fn summary(&self, posts: usize, categories: usize) -> String {
        self.summary
            .replace("{posts}", &posts.to_string())
            .replace("{categories}", &categories.to_string())
    }
}

static EN_STRINGS: Strings = Strings {
    home: "Home",
    back: "Back",
    title: "Sitemap",
    posts: "Posts",
    categories: "Categories",
    pages: "Pages",
    items: "items",
    updated: "Updated",
    summary: "Total {posts} posts, {categories} categories",
};

static ZH_CN_STRINGS: Strings = Strings {
    home: "首页",
    back: "返回",
    title: "站点地图",
    posts: "文章归档",
    categories: "分类目录",
    pages: "独立页面",
    items: "篇内容",
    updated: "更新于",
    summary: "共 {posts} 篇文章，{categories} 个分类",
};

/// Resolved presentation for one render: layout, strings and style block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    /// Layout the style belongs to.
    pub layout: Layout,

    /// Locale the strings belong to.
    pub locale: Locale,

    /// Localized labels.
    pub strings: &'static Strings,

    /// Complete inline stylesheet.
    pub style: String,
}

/// Registry resolving layout and locale ids into render contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRegistry;

impl TemplateRegistry {
    /// Create a registry holding the built-in layouts and locales.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolve raw ids into a context. Unknown ids fall back to the defaults.
    #[must_use]
    pub fn resolve(&self, layout_id: &str, locale_id: &str) -> TemplateContext {
        self.context(Layout::resolve(layout_id), Locale::resolve(locale_id))
    }

    /// Build the context for a known layout and locale.
    #[must_use]
    pub fn context(&self, layout: Layout, locale: Locale) -> TemplateContext {
        let mut style = String::with_capacity(layout.stylesheet().len() + NAV_STYLE.len());
        style.push_str(layout.stylesheet());
        style.push_str(NAV_STYLE);

        TemplateContext {
            layout,
            locale,
            strings: locale.strings(),
            style,
        }
    }
}

const NAV_STYLE: &str = r#"
.nav { display: flex; gap: 1.25rem; margin-bottom: 2rem; font-size: 0.9rem; }
.nav a { color: inherit; text-decoration: none; opacity: 0.65; }
.nav a:hover { opacity: 1; }
.summary { color: #64748b; margin-top: -0.5rem; }
"#;

const MINIMAL_STYLE: &str = r#"
:root { --accent: #111; --text: #1a1a1a; --light: #888; }
body { font-family: "Optima", "Georgia", serif; background: #fff; color: var(--text); padding: 80px 10%; line-height: 1.8; }
.container { max-width: 800px; margin: 0 auto; }
h1 { font-size: 3.5rem; font-weight: 300; margin-bottom: 60px; letter-spacing: -2px; }
h2 { font-size: 0.75rem; text-transform: uppercase; letter-spacing: 4px; color: var(--light); margin-top: 60px; border: none; }
.list { list-style: none; padding: 0; }
.item { display: flex; align-items: baseline; margin-bottom: 12px; }
.item a { text-decoration: none; color: var(--text); font-size: 1.15rem; transition: 0.3s; border-bottom: 1px solid transparent; }
.item a:hover { border-bottom: 1px solid var(--accent); }
.dot { flex: 1; border-bottom: 1px dotted #ececec; margin: 0 15px; }
.meta { font-size: 0.85rem; color: var(--light); font-style: italic; font-family: sans-serif; }
"#;

const FLAT_STYLE: &str = r#"
:root { --bg: #f9f9fb; --primary: #000; --text: #111; --border: #eaeaea; }
body { font-family: -apple-system, system-ui, sans-serif; background: var(--bg); color: var(--text); padding: 40px; }
.container { max-width: 1000px; margin: 0 auto; background: #fff; padding: 50px; border: 1px solid var(--border); border-radius: 4px; }
h1 { font-size: 24px; font-weight: 600; margin-bottom: 30px; }
h2 { font-size: 14px; font-weight: 600; color: #666; margin: 40px 0 20px; text-transform: uppercase; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 15px; }
.card { display: block; padding: 16px; border: 1px solid var(--border); text-decoration: none; color: inherit; transition: 0.2s; }
.card:hover { border-color: var(--primary); background: #fafafa; }
.card-title { font-weight: 500; display: block; margin-bottom: 4px; }
.card-meta { font-size: 12px; color: #999; }
"#;

const RICH_STYLE: &str = r#"
body { background: #f0f2f5; font-family: "Segoe UI", system-ui; padding: 60px 20px; }
.container { max-width: 900px; margin: 0 auto; }
h1 { font-size: 3rem; text-align: center; margin-bottom: 50px; background: linear-gradient(45deg, #007aff, #00c6ff); -webkit-background-clip: text; -webkit-text-fill-color: transparent; }
.section { background: rgba(255,255,255,0.7); backdrop-filter: blur(20px); border-radius: 20px; padding: 30px; margin-bottom: 30px; box-shadow: 0 10px 30px rgba(0,0,0,0.05); }
h2 { color: #333; margin-bottom: 20px; padding-left: 12px; border-left: 5px solid #007aff; }
.item-link { display: flex; justify-content: space-between; padding: 15px; border-radius: 12px; text-decoration: none; color: #444; transition: all 0.3s; margin-bottom: 5px; }
.item-link:hover { background: #fff; transform: scale(1.02); box-shadow: 0 5px 15px rgba(0,0,0,0.05); color: #007aff; }
.item-meta { color: #999; font-size: 0.85em; }
"#;

const SIMPLE_STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; max-width: 900px; margin: 0 auto; padding: 2rem; color: #333; line-height: 1.6; }
h1 { text-align: center; margin-bottom: 2rem; color: #2c3e50; }
.section { margin-bottom: 3rem; }
h2 { border-bottom: 2px solid #eee; padding-bottom: 0.5rem; margin-bottom: 1rem; color: #34495e; }
.list { list-style: none; }
.list-item { padding: 0.5rem 0; border-bottom: 1px dashed #eee; display: flex; justify-content: space-between; }
.list-item a { color: #3498db; text-decoration: none; }
.list-item a:hover { color: #2980b9; text-decoration: underline; }
.meta { color: #95a5a6; font-size: 0.9em; }
"#;

const MODERN_STYLE: &str = r#"
:root { --primary: #6366f1; --bg: #f8fafc; --card: #ffffff; --text: #1e293b; --text-light: #64748b; }
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: "Inter", system-ui, sans-serif; background: var(--bg); color: var(--text); padding: 3rem 1rem; line-height: 1.5; }
.container { max-width: 1000px; margin: 0 auto; }
header { text-align: center; margin-bottom: 4rem; }
h1 { font-size: 2.5rem; font-weight: 800; color: var(--text); margin-bottom: 1rem; }
.section { margin-bottom: 4rem; }
h2 { font-size: 1.5rem; margin-bottom: 1.5rem; display: flex; align-items: center; gap: 0.5rem; }
h2::before { content: ''; display: inline-block; width: 4px; height: 1.5rem; background: var(--primary); border-radius: 4px; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1.25rem; }
.card { background: var(--card); padding: 1.25rem; border-radius: 12px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); transition: all 0.2s; border: 1px solid #e2e8f0; text-decoration: none; display: block; }
.card:hover { transform: translateY(-2px); box-shadow: 0 10px 15px -3px rgba(0,0,0,0.1); border-color: var(--primary); }
.card-title { display: block; font-weight: 600; color: var(--text); margin-bottom: 0.5rem; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.card-meta { font-size: 0.875rem; color: var(--text-light); }
@media (max-width: 640px) { .grid { grid-template-columns: 1fr; } }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_id() {
        assert_eq!(Layout::from_id("flat"), Some(Layout::Flat));
        assert_eq!(Layout::from_id(" Minimal "), Some(Layout::Minimal));
        assert_eq!(Layout::from_id("RICH"), Some(Layout::Rich));
        assert_eq!(Layout::from_id("doesnotexist"), None);
        assert_eq!(Layout::from_id(""), None);
    }

    #[test]
    fn test_layout_resolve_falls_back() {
        assert_eq!(Layout::resolve("doesnotexist"), Layout::default());
        assert_eq!(Layout::resolve("modern"), Layout::Modern);
    }

    #[test]
    fn test_layout_ids_round_trip() {
        for layout in Layout::ALL {
            assert_eq!(Layout::from_id(layout.id()), Some(layout));
            assert_eq!(layout.to_string(), layout.id());
        }
    }

    #[test]
    fn test_arrangements() {
        assert_eq!(Layout::Flat.arrangement(), Arrangement::Grid);
        assert_eq!(Layout::Modern.arrangement(), Arrangement::Grid);
        assert_eq!(Layout::Minimal.arrangement(), Arrangement::List);
        assert_eq!(Layout::Simple.arrangement(), Arrangement::List);
        assert_eq!(Layout::Rich.arrangement(), Arrangement::Links);
    }

    #[test]
    fn test_locale_from_id() {
        assert_eq!(Locale::from_id("en"), Some(Locale::En));
        assert_eq!(Locale::from_id("en-US"), Some(Locale::En));
        assert_eq!(Locale::from_id("zh-CN"), Some(Locale::ZhCn));
        assert_eq!(Locale::from_id("zh_cn"), Some(Locale::ZhCn));
        assert_eq!(Locale::from_id("zh-Hans"), Some(Locale::ZhCn));
        assert_eq!(Locale::from_id("fr"), None);
        assert_eq!(Locale::resolve("fr"), Locale::En);
    }

    #[test]
    fn test_resolve_is_total() {
        let registry = TemplateRegistry::new();
        let layout_ids = ["flat", "minimal", "rich", "simple", "modern", "doesnotexist", ""];
        let locale_ids = ["en", "zh-CN", "xx", "", "ZH"];

        for layout_id in layout_ids {
            for locale_id in locale_ids {
                let ctx = registry.resolve(layout_id, locale_id);
                assert!(!ctx.style.trim().is_empty(), "{layout_id}/{locale_id}");
                for label in Label::ALL {
                    assert!(
                        !ctx.strings.get(label).is_empty(),
                        "{layout_id}/{locale_id} missing {label:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_resolve_selects_style_and_strings() {
        let registry = TemplateRegistry::new();

        let ctx = registry.resolve("minimal", "zh-CN");
        assert_eq!(ctx.layout, Layout::Minimal);
        assert_eq!(ctx.locale, Locale::ZhCn);
        assert_eq!(ctx.strings.title, "站点地图");
        assert!(ctx.style.contains(".dot"));
        assert!(ctx.style.contains(".nav"));

        let fallback = registry.resolve("doesnotexist", "xx");
        assert_eq!(fallback, registry.context(Layout::Flat, Locale::En));
        assert_eq!(fallback.strings.get(Label::Items), "items");
    }

    #[test]
    fn test_summary_fills_counts() {
        assert_eq!(
            Locale::En.strings().summary(12, 3),
            "Total 12 posts, 3 categories"
        );
        assert_eq!(Locale::ZhCn.strings().summary(0, 1), "共 0 篇文章，1 个分类");
    }
}
