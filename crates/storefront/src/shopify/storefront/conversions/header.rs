//! Shop and menu conversion functions.

use crate::shopify::types::{HeaderData, Menu, MenuItem, Shop};

use super::super::queries::header;

pub fn convert_header(data: header::ResponseData) -> HeaderData {
    HeaderData {
        shop: Shop {
            name: data.shop.name,
            primary_domain_url: data.shop.primary_domain.url,
        },
        menu: data.menu.map(|menu| Menu {
            id: menu.id,
            items: menu.items.into_iter().map(convert_menu_item).collect(),
        }),
    }
}

fn convert_menu_item(item: header::MenuItemFields) -> MenuItem {
    MenuItem {
        id: item.id,
        resource_id: item.resource_id,
        tags: item.tags,
        title: item.title,
        kind: item.kind,
        url: item.url,
        items: item.items.into_iter().map(convert_menu_item).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_header_with_menu() {
        let data: header::ResponseData = serde_json::from_str(
            r#"{
              "shop": {"name": "Soap Store", "primaryDomain": {"url": "https://soap.example"}},
              "menu": {
                "id": "gid://shopify/Menu/1",
                "items": [
                  {"id": "gid://shopify/MenuItem/1", "resourceId": null, "tags": [], "title": "Shop", "type": "CATALOG", "url": "https://soap.example/collections/all",
                   "items": [{"id": "gid://shopify/MenuItem/2", "resourceId": null, "tags": [], "title": "Bars", "type": "COLLECTION", "url": "https://soap.example/collections/bars"}]}
                ]
              }
            }"#,
        )
        .unwrap();

        let header = convert_header(data);
        assert_eq!(header.shop.name, "Soap Store");
        assert_eq!(header.shop.primary_domain_url, "https://soap.example");

        let menu = header.menu.unwrap();
        assert_eq!(menu.items.len(), 1);
        assert_eq!(menu.items[0].kind, "CATALOG");
        assert_eq!(menu.items[0].items[0].title, "Bars");
        assert!(menu.items[0].items[0].items.is_empty());
    }

    #[test]
    fn test_convert_header_without_menu() {
        let data: header::ResponseData = serde_json::from_str(
            r#"{"shop": {"name": "Soap Store", "primaryDomain": {"url": "https://soap.example"}}, "menu": null}"#,
        )
        .unwrap();

        assert!(convert_header(data).menu.is_none());
    }
}
