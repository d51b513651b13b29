//! Page layout: site header and navigation menus.
//!
//! Every full page embeds a [`LayoutView`]. The header menu comes from
//! Shopify; links pointing at the shop's own domains are rewritten to
//! relative paths so navigation stays on the storefront.

use tracing::warn;
use url::Url;

use crate::shopify::types::{HeaderData, Menu, MenuItem, Shop};
use crate::state::AppState;

/// Shop name used when the header query fails.
const DEFAULT_SHOP_NAME: &str = "Soap Store";

/// Logo shown in the header.
pub const LOGO_PATH: &str = "/static/images/soap.svg";

/// Which header variant a menu is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Desktop,
    Mobile,
}

impl Viewport {
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Desktop => "header-menu-desktop",
            Self::Mobile => "header-menu-mobile",
        }
    }
}

/// A rendered menu link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLinkView {
    pub id: String,
    pub title: String,
    pub url: String,
    pub active: bool,
}

/// A header menu for one viewport.
#[derive(Debug, Clone)]
pub struct HeaderMenuView {
    pub viewport: Viewport,
    pub links: Vec<MenuLinkView>,
}

impl HeaderMenuView {
    /// Build the menu for `viewport`.
    ///
    /// Falls back to the built-in menu when the shop has none, prepends a
    /// `Home` link on mobile, skips items without a URL, and marks the link
    /// whose path equals `current_path`.
    #[must_use]
    pub fn new(
        menu: Option<&Menu>,
        primary_domain_url: &str,
        public_store_domain: &str,
        viewport: Viewport,
        current_path: &str,
    ) -> Self {
        let fallback;
        let menu = if let Some(menu) = menu {
            menu
        } else {
            fallback = fallback_header_menu();
            &fallback
        };

        let mut links = Vec::with_capacity(menu.items.len() + 1);

        if viewport == Viewport::Mobile {
            links.push(MenuLinkView {
                id: "home".to_string(),
                title: "Home".to_string(),
                url: "/".to_string(),
                active: is_active("/", current_path),
            });
        }

        for item in &menu.items {
            let Some(raw_url) = item.url.as_deref() else {
                continue;
            };
            let url = menu_link_url(raw_url, public_store_domain, primary_domain_url);
            links.push(MenuLinkView {
                id: item.id.clone(),
                title: item.title.clone(),
                active: is_active(&url, current_path),
                url,
            });
        }

        Self { viewport, links }
    }

    #[must_use]
    pub const fn class(&self) -> &'static str {
        self.viewport.class()
    }
}

/// Header data for templates.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub shop_name: String,
    pub logo_path: &'static str,
    pub desktop_menu: HeaderMenuView,
    pub mobile_menu: HeaderMenuView,
}

impl HeaderView {
    #[must_use]
    pub fn new(data: &HeaderData, public_store_domain: &str, current_path: &str) -> Self {
        let menu = data.menu.as_ref();
        let primary = data.shop.primary_domain_url.as_str();
        Self {
            shop_name: data.shop.name.clone(),
            logo_path: LOGO_PATH,
            desktop_menu: HeaderMenuView::new(
                menu,
                primary,
                public_store_domain,
                Viewport::Desktop,
                current_path,
            ),
            mobile_menu: HeaderMenuView::new(
                menu,
                primary,
                public_store_domain,
                Viewport::Mobile,
                current_path,
            ),
        }
    }
}

/// Data shared by every full page.
#[derive(Debug, Clone)]
pub struct LayoutView {
    pub header: HeaderView,
    /// CSP nonce for inline scripts.
    pub nonce: String,
}

impl LayoutView {
    /// Load the header for `current_path`.
    ///
    /// A failed header query is logged and rendered with the fallback menu.
    pub async fn load(state: &AppState, current_path: &str, nonce: String) -> Self {
        let shopify = &state.config().shopify;

        let data = match state.storefront().get_header(&shopify.header_menu_handle).await {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "Failed to load header, using fallback menu");
                HeaderData {
                    shop: Shop {
                        name: DEFAULT_SHOP_NAME.to_string(),
                        primary_domain_url: String::new(),
                    },
                    menu: None,
                }
            }
        };

        Self {
            header: HeaderView::new(&data, &shopify.public_store_domain, current_path),
            nonce,
        }
    }
}

/// Strip the origin from links into the shop's own domains.
///
/// Links containing `myshopify.com`, the public store domain, or the primary
/// domain URL keep only their path; anything else is left untouched.
#[must_use]
pub fn menu_link_url(url: &str, public_store_domain: &str, primary_domain_url: &str) -> String {
    let internal = url.contains("myshopify.com")
        || (!public_store_domain.is_empty() && url.contains(public_store_domain))
        || (!primary_domain_url.is_empty() && url.contains(primary_domain_url));

    if !internal {
        return url.to_string();
    }

    Url::parse(url).map_or_else(|_| url.to_string(), |parsed| parsed.path().to_string())
}

/// Whether a link to `url` is the current page.
///
/// Only exact path matches count; a trailing slash is ignored.
#[must_use]
pub fn is_active(url: &str, current_path: &str) -> bool {
    url.starts_with('/') && normalize_path(url) == normalize_path(current_path)
}

fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

fn fallback_item(id: &str, resource_id: Option<&str>, title: &str, kind: &str, url: &str) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        resource_id: resource_id.map(String::from),
        tags: Vec::new(),
        title: title.to_string(),
        kind: kind.to_string(),
        url: Some(url.to_string()),
        items: Vec::new(),
    }
}

/// Menu rendered when the shop has no menu with the configured handle.
#[must_use]
pub fn fallback_header_menu() -> Menu {
    Menu {
        id: "gid://shopify/Menu/199655587896".to_string(),
        items: vec![
            fallback_item(
                "gid://shopify/MenuItem/461609500728",
                None,
                "Collections",
                "HTTP",
                "/collections",
            ),
            fallback_item(
                "gid://shopify/MenuItem/461609533496",
                None,
                "Blog",
                "HTTP",
                "/blogs/journal",
            ),
            fallback_item(
                "gid://shopify/MenuItem/461609566264",
                None,
                "Policies",
                "HTTP",
                "/policies",
            ),
            fallback_item(
                "gid://shopify/MenuItem/461609599032",
                Some("gid://shopify/Page/92591030328"),
                "About",
                "PAGE",
                "/pages/about",
            ),
        ],
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn item(title: &str, url: Option<&str>) -> MenuItem {
        MenuItem {
            id: format!("gid://shopify/MenuItem/{title}"),
            resource_id: None,
            tags: Vec::new(),
            title: title.to_string(),
            kind: "HTTP".to_string(),
            url: url.map(String::from),
            items: Vec::new(),
        }
    }

    fn titles(menu: &HeaderMenuView) -> Vec<&str> {
        menu.links.iter().map(|l| l.title.as_str()).collect()
    }

    #[test]
    fn test_fallback_menu_when_missing() {
        let menu = HeaderMenuView::new(None, "", "", Viewport::Desktop, "/");
        assert_eq!(titles(&menu), vec!["Collections", "Blog", "Policies", "About"]);
        assert_eq!(menu.links[1].url, "/blogs/journal");
        assert!(menu.links.iter().all(|l| !l.active));
    }

    #[test]
    fn test_mobile_prepends_home() {
        let menu = HeaderMenuView::new(None, "", "", Viewport::Mobile, "/");
        assert_eq!(menu.links[0].title, "Home");
        assert_eq!(menu.links[0].url, "/");
        assert!(menu.links[0].active);
        assert_eq!(menu.links.len(), 5);
        assert_eq!(menu.class(), "header-menu-mobile");
    }

    #[test]
    fn test_skips_items_without_url() {
        let remote = Menu {
            id: "gid://shopify/Menu/1".to_string(),
            items: vec![item("Shop", Some("/collections/all")), item("Label", None)],
        };
        let menu = HeaderMenuView::new(Some(&remote), "", "", Viewport::Desktop, "/");
        assert_eq!(titles(&menu), vec!["Shop"]);
    }

    #[test]
    fn test_internal_urls_stripped_to_path() {
        let remote = Menu {
            id: "gid://shopify/Menu/1".to_string(),
            items: vec![
                item("Dev", Some("https://soap-store.myshopify.com/collections/bars")),
                item("Public", Some("https://shop.soap.example/pages/about")),
                item("Primary", Some("https://soap.example/blogs/journal?page=2")),
                item("External", Some("https://instagram.com/soap")),
            ],
        };
        let menu = HeaderMenuView::new(
            Some(&remote),
            "https://soap.example",
            "shop.soap.example",
            Viewport::Desktop,
            "/pages/about",
        );
        let urls: Vec<&str> = menu.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "/collections/bars",
                "/pages/about",
                "/blogs/journal",
                "https://instagram.com/soap"
            ]
        );
        assert!(menu.links[1].active);
        assert!(!menu.links[0].active);
        assert!(!menu.links[3].active);
    }

    #[test]
    fn test_active_ignores_trailing_slash_but_not_prefix() {
        assert!(is_active("/collections", "/collections/"));
        assert!(is_active("/collections/", "/collections"));
        assert!(!is_active("/collections", "/collections/bars"));
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/cart"));
        assert!(!is_active("https://x.example/", "/"));
    }

    #[test]
    fn test_menu_link_url_unparseable_is_kept() {
        assert_eq!(menu_link_url("myshopify.com/odd", "", ""), "myshopify.com/odd");
        assert_eq!(menu_link_url("/relative", "", ""), "/relative");
    }

    #[test]
    fn test_header_view_renders_both_variants() {
        let data = HeaderData {
            shop: Shop {
                name: "Soap Store".to_string(),
                primary_domain_url: "https://soap.example".to_string(),
            },
            menu: None,
        };
        let header = HeaderView::new(&data, "soap-store.myshopify.com", "/policies");
        assert_eq!(header.shop_name, "Soap Store");
        assert_eq!(header.desktop_menu.links.len(), 4);
        assert_eq!(header.mobile_menu.links.len(), 5);
        assert!(header.desktop_menu.links[2].active);
    }

    #[test]
    fn test_fallback_about_links_page() {
        let menu = fallback_header_menu();
        let about = &menu.items[3];
        assert_eq!(about.kind, "PAGE");
        assert_eq!(
            about.resource_id.as_deref(),
            Some("gid://shopify/Page/92591030328")
        );
    }
}
