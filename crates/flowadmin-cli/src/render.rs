//! Pure projections of console state to HTML fragments and terminal text.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use flowadmin_core::products::MAX_MEDIA_PER_PRODUCT;
use flowadmin_core::{star_string, AdminProfile, CatalogStats, Media, Product, Review};

/// Flavour tags shown per row before collapsing into `+N`.
const VISIBLE_FLAVOURS: usize = 2;

pub const EMPTY_REVIEWS: &str = "No reviews yet. Add a review to display on the product page.";

/// Escapes text for interpolation into HTML element content or attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Rupee amount with thousands separators and at most two decimals.
#[must_use]
pub fn format_price(amount: f64) -> String {
    let cents = (amount * 100.0).round();
    let negative = cents < 0.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = cents.abs() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    match fraction {
        0 => format!("\u{20b9}{sign}{grouped}"),
        f if f % 10 == 0 => format!("\u{20b9}{sign}{grouped}.{}", f / 10),
        f => format!("\u{20b9}{sign}{grouped}.{f:02}"),
    }
}

/// Review date as `18 Oct 2026`; missing dates render as an em dash.
#[must_use]
pub fn format_review_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(
        || "\u{2014}".to_string(),
        |d| d.format("%-d %b %Y").to_string(),
    )
}

fn flavour_summary(flavours: &[String]) -> (Vec<&str>, usize) {
    let shown = flavours
        .iter()
        .take(VISIBLE_FLAVOURS)
        .map(String::as_str)
        .collect();
    (shown, flavours.len().saturating_sub(VISIBLE_FLAVOURS))
}

fn status_label(active: bool) -> &'static str {
    if active {
        "Active"
    } else {
        "Inactive"
    }
}

/// Table body for the product list.
#[must_use]
pub fn products_table_html(products: &[&Product]) -> String {
    if products.is_empty() {
        return concat!(
            "<tr><td colspan=\"6\"><div class=\"empty-state\">",
            "<h3>No products yet</h3>",
            "<p>Start by adding your first product to the catalog.</p>",
            "<button class=\"btn btn-primary\" data-action=\"add-product\">Add Product</button>",
            "</div></td></tr>"
        )
        .to_string();
    }

    let mut html = String::new();
    for product in products {
        let id = escape_html(&product.id);
        let name = escape_html(&product.name);
        let media_count = product.media.len();

        let thumb = product.media.first().map_or_else(
            || "<span class=\"product-thumb-placeholder\"></span>".to_string(),
            |m| {
                format!(
                    "<img src=\"{}\" alt=\"{name}\" class=\"media-thumb-preview\">",
                    escape_html(&m.url)
                )
            },
        );

        let (shown, more) = flavour_summary(&product.flavours);
        let mut flavours: String = shown
            .iter()
            .map(|f| format!("<span class=\"flavour-tag\">{}</span>", escape_html(f)))
            .collect();
        if more > 0 {
            let _ = write!(flavours, "<span class=\"flavour-more\">+{more}</span>");
        }

        let status_class = if product.is_active { "active" } else { "inactive" };
        let media_class = if media_count > 0 { " has-media" } else { "" };

        let _ = write!(
            html,
            concat!(
                "<tr data-id=\"{id}\">",
                "<td><div class=\"product-cell\"><div class=\"product-thumb\">{thumb}</div>",
                "<div class=\"product-info\"><h4>{name}</h4><span>{slug}</span></div></div></td>",
                "<td><button class=\"btn btn-secondary btn-sm media-count{media_class}\" ",
                "data-action=\"media\" data-id=\"{id}\">{media_count}/{max}</button></td>",
                "<td><div class=\"flavours-list\">{flavours}</div></td>",
                "<td>{price}</td>",
                "<td><span class=\"status-badge {status_class}\">{status}</span></td>",
                "<td><div class=\"action-buttons\">",
                "<button class=\"btn btn-secondary btn-icon\" data-action=\"edit\" data-id=\"{id}\">Edit</button>",
                "<button class=\"btn btn-danger btn-icon\" data-action=\"delete\" data-id=\"{id}\">Delete</button>",
                "</div></td></tr>"
            ),
            id = id,
            thumb = thumb,
            name = name,
            media_class = media_class,
            media_count = media_count,
            flavours = flavours,
            status_class = status_class,
            slug = escape_html(&product.slug),
            max = MAX_MEDIA_PER_PRODUCT,
            price = format_price(product.lowest_price()),
            status = status_label(product.is_active),
        );
    }
    html
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Terminal rendering of the same projection as [`products_table_html`].
#[must_use]
pub fn products_table_text(products: &[&Product]) -> String {
    if products.is_empty() {
        return "No products yet. Start by adding your first product with `flowadmin products create`.\n"
            .to_string();
    }

    let mut out = format!(
        "{:<26}{:<30}{:<7}{:<28}{:<11}STATUS\n",
        "ID", "NAME", "MEDIA", "FLAVOURS", "FROM"
    );
    for product in products {
        let (shown, more) = flavour_summary(&product.flavours);
        let mut flavours = shown.join(", ");
        if more > 0 {
            let _ = write!(flavours, " +{more}");
        }
        let _ = writeln!(
            out,
            "{:<26}{:<30}{:<7}{:<28}{:<11}{}",
            product.id,
            truncate(&product.name, 26),
            format!("{}/{MAX_MEDIA_PER_PRODUCT}", product.media.len()),
            flavours,
            format_price(product.lowest_price()),
            status_label(product.is_active),
        );
    }
    out
}

/// Header block: avatar initial, name, role, and the navigation items the
/// role can see.
#[must_use]
pub fn user_info(profile: &AdminProfile) -> String {
    let mut nav = vec!["Products"];
    if profile.is_super_admin() {
        nav.push("Manage Admins");
    }
    let mut out = format!(
        "[{}] {} ({})\n",
        profile.avatar_initial(),
        profile.display_name(),
        profile.role.label()
    );
    if let Some(email) = &profile.email {
        let _ = writeln!(out, "    {email}");
    }
    let _ = writeln!(out, "Navigation: {}", nav.join(" | "));
    out
}

#[must_use]
pub fn stats(stats: &CatalogStats) -> String {
    format!(
        "Total products: {}\nActive: {}\nFeatured: {}\n",
        stats.total, stats.active, stats.featured
    )
}

/// Media grid of one product, already in display order.
#[must_use]
pub fn media_grid(product: &Product, items: &[&Media]) -> String {
    let mut out = format!(
        "{} ({}/{MAX_MEDIA_PER_PRODUCT} media)\n",
        product.name,
        items.len()
    );
    if items.is_empty() {
        out.push_str("No media uploaded yet.\n");
        return out;
    }
    for (position, media) in items.iter().enumerate() {
        let badge = if media.is_primary { " [thumbnail]" } else { "" };
        let _ = writeln!(
            out,
            "{}. {:<6}{}{badge}\n   id: {}\n   url: {}",
            position + 1,
            media.kind.to_string(),
            media.key,
            media.media_id(),
            media.url
        );
    }
    if items.len() >= MAX_MEDIA_PER_PRODUCT {
        out.push_str("Maximum 3 media items reached\n");
    }
    out
}

#[must_use]
pub fn reviews_text(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return format!("{EMPTY_REVIEWS}\n");
    }
    let mut out = String::new();
    for review in reviews {
        let verified = if review.verified { " [Verified]" } else { "" };
        let _ = writeln!(
            out,
            "{}  {}{verified}  ({})",
            review.author,
            star_string(review.rating),
            review.id
        );
        if let Some(title) = review.title.as_deref().filter(|t| !t.is_empty()) {
            let _ = writeln!(out, "  {title}");
        }
        let _ = writeln!(out, "  {}", review.content);
        let _ = writeln!(out, "  {}", format_review_date(review.date));
    }
    out
}

#[must_use]
pub fn reviews_html(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return format!("<div class=\"reviews-empty\">{EMPTY_REVIEWS}</div>");
    }
    let mut html = String::new();
    for review in reviews {
        let verified = if review.verified {
            "<span class=\"review-verified\">Verified</span>"
        } else {
            ""
        };
        let title = review
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("<div class=\"review-title\">{}</div>", escape_html(t)))
            .unwrap_or_default();
        let _ = write!(
            html,
            concat!(
                "<div class=\"review-item\" data-id=\"{id}\"><div class=\"review-item-content\">",
                "<div class=\"review-item-header\"><span class=\"review-author\">{author}</span>",
                "<span class=\"review-stars\">{stars}</span>{verified}</div>",
                "{title}<div class=\"review-text\">{content}</div>",
                "<div class=\"review-date\">{date}</div></div></div>"
            ),
            id = escape_html(&review.id),
            author = escape_html(&review.author),
            stars = star_string(review.rating),
            verified = verified,
            title = title,
            content = escape_html(&review.content),
            date = format_review_date(review.date),
        );
    }
    html
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
