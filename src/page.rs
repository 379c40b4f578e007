//! Per-item HTML page.
//!
//! Rendering is pure: everything time- or site-dependent comes in through
//! [`SiteContext`], and every number is formatted by a helper in
//! [`crate::format`] before it reaches the template.

use chrono::NaiveDate;
use serde_json::json;

use crate::format::{iso_date, percent, thousands};
use crate::models::{Item, Price};
use crate::slug::item_url;

const COIN_ICON: &str = "https://oldschool.runescape.wiki/images/Coins_10000.png";

/// Site-wide values shared by every page of one run.
#[derive(Debug, Clone)]
pub struct SiteContext {
    pub base_url: String,
    /// UTC calendar date of the run.
    pub today: NaiveDate,
}

/// Derived market figures for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceMetrics {
    pub price_up: bool,
    /// `high - low`, may be negative. Saturates at the `i64` bounds.
    pub spread: i64,
    /// `spread / low * 100` with two decimals. Not guarded against `low == 0`.
    pub profit_percent: String,
}

impl PriceMetrics {
    pub fn from_price(price: Price) -> Self {
        let spread = price.high.saturating_sub(price.low);
        Self {
            price_up: price.high > price.low,
            spread,
            profit_percent: percent(spread as f64 / price.low as f64 * 100.0),
        }
    }

    fn trend_class(&self) -> &'static str {
        if self.price_up { "text-profit" } else { "text-loss" }
    }

    fn trend_keyword(&self) -> &'static str {
        if self.price_up { "profit" } else { "loss" }
    }
}

/// Render a complete HTML document for `item`.
pub fn render_item_page(ctx: &SiteContext, item: &Item, price: Price, volume: u64) -> String {
    let metrics = PriceMetrics::from_price(price);
    let url = item_url(&ctx.base_url, &item.name);
    let href = escape_html(&url);
    let name = escape_html(&item.name);
    let high = thousands(price.high);
    let low = thousands(price.low);
    let spread = thousands(metrics.spread);
    let volume_fmt = thousands(volume);
    let pct = &metrics.profit_percent;
    let updated = iso_date(ctx.today);

    let mut html = String::with_capacity(12 * 1024);

    html.push_str(&format!(
        r##"<!DOCTYPE html>
<html lang="en" data-theme="dark">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{name} - OSRS Grand Exchange Price &amp; Flipping Analysis</title>
    <meta name="description" content="Real-time {name} price data, trading volume, and profit analysis for OSRS Grand Exchange. Current price: {high} GP.">
    <meta name="keywords" content="{name}, OSRS, Grand Exchange, price, flipping, {keyword}, trading, RuneScape">
    <meta name="robots" content="index, follow, max-snippet:-1, max-image-preview:large">
    <meta name="theme-color" content="#e7bc1c">

    <meta property="og:title" content="{name} - OSRS Price &amp; Trading Analysis">
    <meta property="og:description" content="Live Grand Exchange price data for {name}. High: {high} GP, Low: {low} GP. Volume: {volume_fmt} items/4h.">
    <meta property="og:url" content="{href}">
    <meta property="og:type" content="website">
    <meta property="og:image" content="{COIN_ICON}">

    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:title" content="{name} - OSRS GE Price">
    <meta name="twitter:description" content="High: {high} GP | Low: {low} GP | Spread: {spread} GP ({pct}%)">
    <meta name="twitter:image" content="{COIN_ICON}">

    <link rel="canonical" href="{href}">
    <link rel="icon" type="image/png" href="{COIN_ICON}">
    <link rel="apple-touch-icon" href="{COIN_ICON}">
"##,
        keyword = metrics.trend_keyword(),
    ));

    for block in structured_data(ctx, item, price, volume, &url) {
        html.push_str("    <script type=\"application/ld+json\">\n");
        html.push_str(&block);
        html.push_str("\n    </script>\n");
    }

    html.push_str(STYLE);

    html.push_str(&format!(
        r##"</head>
<body class="font-sans">
    <div class="container mx-auto max-w-6xl p-4 md:p-8">
        <header class="text-center mb-8">
            <div class="flex justify-center items-center space-x-4 mb-4">
                <img src="{COIN_ICON}" alt="OSRS Coins" class="h-12">
                <div>
                    <h1 class="text-4xl font-bold mb-2">
                        <a href="/" class="text-accent no-underline hover:opacity-80">{name}</a>
                    </h1>
                    <p class="text-lg text-secondary">OSRS Grand Exchange Price Analysis</p>
                </div>
                <img src="{COIN_ICON}" alt="OSRS Coins" class="h-12 transform -scale-x-100">
            </div>
            <nav class="mb-6">
                <a href="/" class="text-accent hover:opacity-80 mr-4">&larr; Back to Tool</a>
            </nav>
        </header>

        <main>
            <section class="bg-main border border-custom rounded-lg p-6 mb-6">
                <h2 class="text-2xl font-bold text-accent mb-4">Current Market Data</h2>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4 mb-6">
                    <div class="bg-dark-contrast p-4 rounded">
                        <p class="text-secondary text-sm mb-1">High Price</p>
                        <p class="text-2xl font-bold" id="price-high">{high}</p>
                        <p class="text-xs text-secondary mt-2">GP</p>
                    </div>
                    <div class="bg-dark-contrast p-4 rounded">
                        <p class="text-secondary text-sm mb-1">Low Price</p>
                        <p class="text-2xl font-bold" id="price-low">{low}</p>
                        <p class="text-xs text-secondary mt-2">GP</p>
                    </div>
                    <div class="bg-dark-contrast p-4 rounded">
                        <p class="text-secondary text-sm mb-1">Spread / Profit Potential</p>
                        <p class="text-2xl font-bold {trend}" id="price-spread">{spread}</p>
                        <p class="text-xs text-secondary mt-2" id="price-margin">{pct}% margin</p>
                    </div>
                </div>

                <div class="bg-dark-contrast p-4 rounded">
                    <p class="text-secondary text-sm mb-1">Trading Volume (4 hour)</p>
                    <p class="text-2xl font-bold text-volume" id="volume">{volume_fmt}</p>
                    <p class="text-xs text-secondary mt-2">Items traded per 4 hours</p>
                </div>
            </section>

            <section class="bg-main border border-custom rounded-lg p-6">
                <h2 class="text-2xl font-bold text-accent mb-4">About {name}</h2>
                <p class="text-secondary mb-4">
                    This page provides real-time Grand Exchange price data for <strong>{name}</strong> in Old School RuneScape.
                    The high-low price spread and trading volume are updated regularly to help you make informed trading decisions.
                </p>
                <p class="text-secondary mb-4">
                    <strong>Item ID:</strong> {id}
                </p>
                <p class="text-secondary">
                    For a complete analysis tool with flipping strategies and budget-based recommendations,
                    <a href="/" class="text-accent hover:underline">return to the main OSRS flipping tool</a>.
                </p>
            </section>
        </main>

        <footer class="text-center text-secondary text-sm mt-12 py-6 border-t border-custom">
            <p>Data provided by <a href="https://prices.runescape.wiki/" class="text-accent hover:underline">RuneScape Wiki</a></p>
            <p class="mt-2">Last updated: {updated}</p>
        </footer>
    </div>
</body>
</html>
"##,
        trend = metrics.trend_class(),
        id = item.id,
    ));

    html
}

/// Product and breadcrumb JSON-LD blocks, ready to sit inside a script tag.
fn structured_data(
    ctx: &SiteContext,
    item: &Item,
    price: Price,
    volume: u64,
    url: &str,
) -> [String; 2] {
    let base = &ctx.base_url;
    let product = json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": item.name,
        "description": format!("OSRS Grand Exchange item: {}", item.name),
        "brand": { "@type": "Organization", "name": "GrandFreexchange" },
        "offers": {
            "@type": "AggregateOffer",
            "priceCurrency": "OSRS GP",
            "lowPrice": price.low.to_string(),
            "highPrice": price.high.to_string(),
            "offerCount": volume.to_string(),
        },
        "url": url,
        "itemId": item.id.to_string(),
    });
    let breadcrumbs = json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": [
            { "@type": "ListItem", "position": 1, "name": "Home", "item": format!("{base}/") },
            { "@type": "ListItem", "position": 2, "name": "Items", "item": format!("{base}/items/") },
            { "@type": "ListItem", "position": 3, "name": item.name, "item": url },
        ],
    });
    [product, breadcrumbs].map(|value| escape_json_for_script(&value.to_string()))
}

/// `<` cannot appear in valid JSON outside strings, so replacing it keeps the
/// JSON valid while making `</script>` impossible.
fn escape_json_for_script(json: &str) -> String {
    json.replace('<', "\\u003c")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

const STYLE: &str = r#"    <script src="https://cdn.tailwindcss.com"></script>
    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;700&display=swap" rel="stylesheet">
    <style>
        :root {
            --bg-dark: #211e1c;
            --bg-main: #3a3532;
            --bg-contrast: #2a2725;
            --border-color: #504a45;
            --text-primary: #e5e0db;
            --text-secondary: #a8a29e;
            --accent-gold: #e7bc1c;
            --accent-green: #22c55e;
            --accent-red: #ef4444;
        }
        body {
            background-color: var(--bg-dark);
            color: var(--text-primary);
            font-family: 'Inter', sans-serif;
        }
        .bg-main { background-color: var(--bg-main); }
        .bg-dark-contrast { background-color: var(--bg-contrast); }
        .border-custom { border-color: var(--border-color); }
        .text-accent { color: var(--accent-gold); }
        .text-profit { color: var(--accent-green); }
        .text-loss { color: var(--accent-red); }
        .text-secondary { color: var(--text-secondary); }
        .text-volume { color: #3b82f6; }
    </style>
"#;
