use crate::format::iso_date;
use crate::models::Item;
use crate::page::SiteContext;
use crate::slug::item_url;

const HOME_PRIORITY: &str = "1.0";
const ITEM_PRIORITY: &str = "0.8";

/// Sitemap with the home page first, then one entry per item in catalog
/// order. Every entry shares the run date as `lastmod`.
pub fn render_sitemap(ctx: &SiteContext, items: &[Item]) -> String {
    let lastmod = iso_date(ctx.today);
    let mut xml = String::with_capacity(256 + items.len() * 160);

    xml.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
"#,
    );
    push_url(&mut xml, &format!("{}/", ctx.base_url), &lastmod, HOME_PRIORITY);
    for item in items {
        push_url(&mut xml, &item_url(&ctx.base_url, &item.name), &lastmod, ITEM_PRIORITY);
    }
    xml.push_str("</urlset>");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, priority: &str) {
    let loc = escape_xml(loc);
    xml.push_str(&format!(
        "    <url>
        <loc>{loc}</loc>
        <lastmod>{lastmod}</lastmod>
        <changefreq>daily</changefreq>
        <priority>{priority}</priority>
    </url>
"
    ));
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn ctx() -> SiteContext {
        SiteContext {
            base_url: "https://www.osrs.lol".into(),
            today: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
        }
    }

    fn locs(xml: &str) -> Vec<&str> {
        xml.split("<loc>")
            .skip(1)
            .filter_map(|chunk| chunk.split("</loc>").next())
            .collect()
    }

    #[test]
    fn empty_catalog_lists_only_home() {
        let xml = render_sitemap(&ctx(), &[]);
        assert_eq!(locs(&xml), vec!["https://www.osrs.lol/"]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset"));
        assert!(xml.ends_with("</urlset>"));
    }

    #[test]
    fn entries_follow_catalog_order() {
        let items = vec![
            Item { id: 3, name: "Zamorak godsword".into() },
            Item { id: 1, name: "Abyssal whip".into() },
            Item { id: 2, name: "Magic logs".into() },
        ];
        let xml = render_sitemap(&ctx(), &items);
        assert_eq!(
            locs(&xml),
            vec![
                "https://www.osrs.lol/",
                "https://www.osrs.lol/items/zamorak-godsword.html",
                "https://www.osrs.lol/items/abyssal-whip.html",
                "https://www.osrs.lol/items/magic-logs.html",
            ]
        );
    }

    #[test]
    fn every_entry_shares_the_run_date() {
        let items: Vec<Item> = (0..5)
            .map(|i| Item { id: i, name: format!("Item {i}") })
            .collect();
        let xml = render_sitemap(&ctx(), &items);
        assert_eq!(xml.matches("<lastmod>2026-10-14</lastmod>").count(), 6);
        assert_eq!(xml.matches("<priority>1.0</priority>").count(), 1);
        assert_eq!(xml.matches("<priority>0.8</priority>").count(), 5);
    }

    #[test]
    fn base_url_is_escaped_in_loc() {
        let ctx = SiteContext {
            base_url: "https://mirror.test/osrs?ref=a&b".into(),
            ..ctx()
        };
        let items = vec![Item { id: 1, name: "Cannonball".into() }];
        let xml = render_sitemap(&ctx, &items);
        assert_eq!(
            locs(&xml),
            vec![
                "https://mirror.test/osrs?ref=a&amp;b/",
                "https://mirror.test/osrs?ref=a&amp;b/items/cannonball.html",
            ]
        );
        assert!(!xml.contains("a&b"));
    }
}
