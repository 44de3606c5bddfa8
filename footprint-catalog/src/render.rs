//! Server-side HTML for the storefront.

use html_escape::{encode_safe as attr, encode_text as text};
use serde::Serialize;
use footprint_shared::Mode;
use crate::card::{CardAction, CatalogCard, MatrixView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One-shot banner shown above the catalog after an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

pub struct StorefrontPage<'a> {
    pub title: &'a str,
    pub mode: Mode,
    pub cards: &'a [CatalogCard],
    pub notice: Option<&'a Notice>,
}

/// Render a single catalog card
pub fn render_card(card: &CatalogCard) -> String {
    let id = card.product_id;

    let badges = match &card.price.moq_badge {
        Some(badge) => format!(r#"<span class="badge badge-moq">{}</span>"#, text(badge)),
        None => String::new(),
    };

    let tax_note = match &card.price.tax_note {
        Some(note) => format!(r#"<span class="price-note">{}</span>"#, text(note)),
        None => String::new(),
    };

    let action = match card.action {
        CardAction::AddToCart => format!(
            r#"<form method="post" action="/items/{id}/cart">
            <button type="submit" class="btn btn-cart">{label}</button>
        </form>"#,
            id = id,
            label = text(card.action_label),
        ),
        CardAction::BulkOrder { expanded } => format!(
            r#"<form method="post" action="/items/{id}/toggle">
            <button type="submit" class="btn btn-bulk" aria-expanded="{expanded}">{label}</button>
        </form>"#,
            id = id,
            expanded = expanded,
            label = text(card.action_label),
        ),
    };

    let matrix = card
        .matrix
        .as_ref()
        .map(|m| render_matrix(card, m))
        .unwrap_or_default();

    format!(
        r#"<article class="product-card" data-product-id="{id}">
    <img class="product-image" src="{image}" alt="{alt}">
    <div class="product-body">
        <span class="product-category">{category}</span>
        <h2 class="product-name">{name}</h2>
        {badges}
        <div class="product-pricing">
            <span class="price-current">{price}</span>
            {tax_note}
        </div>
        {action}
        {matrix}
    </div>
</article>"#,
        id = id,
        image = attr(&card.image),
        alt = attr(&card.name),
        category = text(&card.category),
        name = text(&card.name),
        badges = badges,
        price = text(&card.price.label),
        tax_note = tax_note,
        action = action,
        matrix = matrix,
    )
}

fn render_matrix(card: &CatalogCard, matrix: &MatrixView) -> String {
    let cells: String = matrix
        .cells
        .iter()
        .map(|cell| {
            format!(
                r#"<label class="size-cell">
                <span class="size-label">Size {size}</span>
                <input type="number" name="size_{size}" min="0" step="1" value="{qty}">
            </label>"#,
                size = cell.size,
                qty = cell.quantity,
            )
        })
        .collect();

    format!(
        r#"<form class="size-matrix" method="post" action="/items/{id}/batch">
            {cells}
            <span class="matrix-total">Total: {total} Pairs</span>
            <button type="submit" formaction="/items/{id}/quantities" class="btn btn-secondary">Save Quantities</button>
            <button type="submit" class="btn btn-batch">{label}</button>
        </form>"#,
        id = card.product_id,
        cells = cells,
        total = matrix.total_pairs,
        label = text(matrix.submit_label),
    )
}

fn render_mode_switch(mode: Mode) -> String {
    let options: String = Mode::ALL
        .iter()
        .map(|m| {
            let class = if *m == mode { "mode-option mode-active" } else { "mode-option" };
            format!(
                r#"<button type="submit" name="mode" value="{value}" class="{class}">{label}</button>"#,
                value = m.as_str(),
                class = class,
                label = m.label(),
            )
        })
        .collect();

    format!(
        r#"<form class="mode-switch" method="post" action="/mode" data-mode="{mode}">
        {options}
    </form>"#,
        mode = mode,
        options = options,
    )
}

fn render_notice(notice: &Notice) -> String {
    let class = match notice.level {
        NoticeLevel::Success => "notice notice-success",
        NoticeLevel::Error => "notice notice-error",
    };
    format!(
        r#"<div class="{class}" role="status">{message}</div>"#,
        class = class,
        message = text(&notice.message),
    )
}

/// Render the whole storefront page
pub fn render_storefront(page: &StorefrontPage<'_>) -> String {
    let cards: String = page.cards.iter().map(render_card).collect::<Vec<_>>().join("\n");
    let notice = page.notice.map(render_notice).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
</head>
<body class="mode-{mode}">
    <header class="site-header">
        <h1 class="site-title">{title}</h1>
        {switch}
    </header>
    {notice}
    <main class="catalog-grid">
{cards}
    </main>
</body>
</html>"#,
        title = text(page.title),
        mode = page.mode,
        switch = render_mode_switch(page.mode),
        notice = notice,
        cards = cards,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingEngine;
    use crate::product::Product;
    use crate::sizes::SizeBuckets;
    use crate::view::ItemViewState;
    use footprint_shared::Money;

    fn oxford() -> Product {
        Product::new("Classic Oxford", "Formal", "/img/oxford.jpg", Money::new(1200), Money::new(800))
    }

    #[test]
    fn test_retail_card_html() {
        let card = CatalogCard::build(&oxford(), Mode::Retail, None, &PricingEngine::default());
        let html = render_card(&card);

        assert!(html.contains("₹1200"));
        assert!(!html.contains("₹800"));
        assert!(!html.contains("MOQ"));
        assert!(html.contains("Add to Cart"));
        assert!(!html.contains("Bulk Order"));
    }

    #[test]
    fn test_wholesale_card_html() {
        let card = CatalogCard::build(&oxford(), Mode::Wholesale, None, &PricingEngine::default());
        let html = render_card(&card);

        assert!(html.contains("₹800*"));
        assert!(!html.contains("₹1200"));
        assert!(html.contains("*Excl. GST"));
        assert!(html.contains("MOQ: 24 Pairs"));
        assert!(html.contains("Bulk Order"));
        assert!(!html.contains("size_6"));
    }

    #[test]
    fn test_expanded_matrix_html() {
        let product = oxford();
        let mut state = ItemViewState::new(&SizeBuckets::default());
        state.toggle();

        let card = CatalogCard::build(&product, Mode::Wholesale, Some(&state), &PricingEngine::default());
        let html = render_card(&card);

        for size in 6..=9 {
            assert!(html.contains(&format!(r#"name="size_{}" min="0" step="1" value="0""#, size)));
        }
        assert!(html.contains("Add Batch to Cart"));
        assert!(html.contains(r#"aria-expanded="true""#));
    }

    #[test]
    fn test_product_text_is_escaped() {
        let product = Product::new(
            "<script>alert(1)</script>",
            "Formal & Office",
            "/img/x.jpg\" onerror=\"x",
            Money::new(1),
            Money::new(1),
        );
        let card = CatalogCard::build(&product, Mode::Retail, None, &PricingEngine::default());
        let html = render_card(&card);

        assert!(!html.contains("<script>"));
        assert!(html.contains("Formal &amp; Office"));
        assert!(!html.contains("\" onerror=\""));
    }

    #[test]
    fn test_page_marks_active_mode() {
        let cards = vec![CatalogCard::build(&oxford(), Mode::Wholesale, None, &PricingEngine::default())];
        let notice = Notice::success("Saved");
        let html = render_storefront(&StorefrontPage {
            title: "Footprint",
            mode: Mode::Wholesale,
            cards: &cards,
            notice: Some(&notice),
        });

        assert!(html.contains(r#"<body class="mode-wholesale">"#));
        assert!(html.contains(r#"value="wholesale" class="mode-option mode-active""#));
        assert!(html.contains("notice-success"));
    }
}
