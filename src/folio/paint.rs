//! # HTML Paint Adapter
//!
//! Turns the view models computed by the command layer into the markup the site
//! embeds. Nothing here decides *what* is shown; it only draws it.
//!
//! Templates live next to this file and are compiled in. They are minijinja
//! templates with `.html` names, so every interpolated value is HTML-escaped
//! except the rendered post body, which is inserted with `| safe`.

use crate::commands::list::{FilterButton, ListView};
use crate::commands::view::OpenPost;
use crate::error::Result;
use minijinja::{context, Environment};

const FILTERS_TEMPLATE: &str = include_str!("templates/filters.html");
const LIST_TEMPLATE: &str = include_str!("templates/list.html");
const POST_TEMPLATE: &str = include_str!("templates/post.html");
const PAGE_TEMPLATE: &str = include_str!("templates/page.html");

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("filters.html", FILTERS_TEMPLATE)?;
    env.add_template("list.html", LIST_TEMPLATE)?;
    env.add_template("post.html", POST_TEMPLATE)?;
    env.add_template("page.html", PAGE_TEMPLATE)?;
    Ok(env)
}

/// Filter bar; the active button carries the `active` class.
pub fn filter_bar(buttons: &[FilterButton]) -> Result<String> {
    let env = environment()?;
    Ok(env
        .get_template("filters.html")?
        .render(context! { buttons })?)
}

/// Post cards plus the empty-state block, visible only for an empty view.
pub fn post_list(view: &ListView) -> Result<String> {
    let env = environment()?;
    Ok(env.get_template("list.html")?.render(context! {
        posts => view.entries(),
        empty => view.shows_empty_state(),
    })?)
}

/// The modal. Without a post it renders closed and empty.
pub fn post_modal(post: Option<&OpenPost>) -> Result<String> {
    let env = environment()?;
    Ok(env
        .get_template("post.html")?
        .render(context! { post })?)
}

/// The whole blog section: filters, list and modal, painted by the functions
/// above and wrapped with the scroll state.
pub fn page(view: &ListView, buttons: &[FilterButton], post: Option<&OpenPost>) -> Result<String> {
    let env = environment()?;
    Ok(env.get_template("page.html")?.render(context! {
        scroll => scroll_state(post),
        filters => filter_bar(buttons)?,
        list => post_list(view)?,
        modal => post_modal(post)?,
    })?)
}

/// `locked` while a post is open, `auto` otherwise.
pub fn scroll_state(post: Option<&OpenPost>) -> &'static str {
    if post.is_some() {
        "locked"
    } else {
        "auto"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list::{ListEntry, PostRenderer};
    use crate::model::{Category, Filter};
    use chrono::NaiveDate;

    fn entry(slug: &str, title: &str) -> ListEntry {
        ListEntry {
            slug: slug.to_string(),
            title: title.to_string(),
            category: Category::Journal,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            display_date: "January 1, 2024".to_string(),
            excerpt: "An excerpt".to_string(),
        }
    }

    fn open_post() -> OpenPost {
        OpenPost {
            slug: "a".into(),
            title: "Hello <World>".into(),
            category: Category::Notebook,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            display_date: "June 1, 2024".into(),
            markdown: "*hi*".into(),
            content_html: "<p><em>hi</em></p>".into(),
        }
    }

    #[test]
    fn cards_carry_slugs_and_hide_empty_state() {
        let view = ListView::Posts(vec![entry("a", "First"), entry("b", "Second")]);
        let html = post_list(&view).unwrap();

        assert!(html.contains(r#"data-slug="a""#));
        assert!(html.contains(r#"data-slug="b""#));
        assert!(html.contains("January 1, 2024"));
        assert!(html.contains("display: none;"));
        assert!(html.find("First").unwrap() < html.find("Second").unwrap());
    }

    #[test]
    fn empty_view_shows_empty_state_without_cards() {
        let html = post_list(&ListView::Empty).unwrap();
        assert!(html.contains("display: block;"));
        assert!(!html.contains("post-card"));
    }

    #[test]
    fn text_fields_are_escaped() {
        let view = ListView::Posts(vec![entry("a", "<script>alert(1)</script>")]);
        let html = post_list(&view).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn filter_bar_marks_one_active_button() {
        let renderer = PostRenderer::with_filter(Filter::Category(Category::Journal));
        let html = filter_bar(&renderer.filter_buttons(&[Category::Journal, Category::Notebook]))
            .unwrap();

        assert_eq!(html.matches("filter-btn active").count(), 1);
        assert!(html.contains(r#"class="filter-btn active" data-filter="journal""#));
    }

    #[test]
    fn open_modal_has_header_and_raw_body() {
        let post = open_post();
        let html = post_modal(Some(&post)).unwrap();

        assert!(html.contains("post-modal active"));
        assert!(html.contains("Hello &lt;World&gt;"));
        assert!(html.contains("<p><em>hi</em></p>"));
        assert!(html.contains("June 1, 2024"));
        assert!(html.contains("post-category notebook"));
    }

    #[test]
    fn closed_modal_is_inactive_and_empty() {
        let html = post_modal(None).unwrap();
        assert!(!html.contains("active"));
        assert!(!html.contains("post-full-header"));
    }

    #[test]
    fn page_locks_scroll_only_while_open() {
        let view = ListView::Posts(vec![entry("a", "First")]);
        let buttons = PostRenderer::new().filter_buttons(&[Category::Journal]);
        let post = open_post();

        let closed = page(&view, &buttons, None).unwrap();
        assert!(closed.contains(r#"data-scroll="auto""#));
        let open = page(&view, &buttons, Some(&post)).unwrap();
        assert!(open.contains(r#"data-scroll="locked""#));

        assert!(open.contains("post-modal active"));
        assert!(!closed.contains("post-modal active"));
        assert_eq!(scroll_state(None), "auto");
        assert_eq!(scroll_state(Some(&post)), "locked");
    }
}
