//! HTML views rendered with Tera.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Dates are pre-formatted here so the templates stay logic-free.

use models::news_item::Model;
use serde::Serialize;
use tera::{Context, Tera};

use service::news_item::{NewsItem, NewsListing, ResponseFormat};

use crate::errors::AppError;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("layout.mobile.html", include_str!("../templates/layout.mobile.html")),
    ("news/index.html", include_str!("../templates/news/index.html")),
    ("news/index.mobile.html", include_str!("../templates/news/index.mobile.html")),
    ("news/show.html", include_str!("../templates/news/show.html")),
    ("news/show.mobile.html", include_str!("../templates/news/show.mobile.html")),
    ("admin/news_items/index.html", include_str!("../templates/admin/news_items/index.html")),
    ("admin/news_items/show.html", include_str!("../templates/admin/news_items/show.html")),
    ("admin/news_items/new.html", include_str!("../templates/admin/news_items/new.html")),
    ("admin/news_items/edit.html", include_str!("../templates/admin/news_items/edit.html")),
    ("admin/news_items/_form.html", include_str!("../templates/admin/news_items/_form.html")),
];

const DATE_FORMAT: &str = "%B %-d, %Y %H:%M";

/// Record as shown on a page.
#[derive(Debug, Serialize)]
pub struct ItemView {
    pub id: i32,
    pub name: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Model> for ItemView {
    fn from(m: &Model) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            body: m.body.clone(),
            created_at: m.created_at.format(DATE_FORMAT).to_string(),
            updated_at: m.updated_at.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Form state: submitted values plus validation messages.
#[derive(Debug, Serialize)]
struct FormView<'a> {
    id: Option<i32>,
    name: &'a str,
    body: &'a str,
    messages: Vec<String>,
    name_error: bool,
    body_error: bool,
}

impl<'a> From<&'a NewsItem> for FormView<'a> {
    fn from(item: &'a NewsItem) -> Self {
        Self {
            id: item.id,
            name: &item.name,
            body: &item.body,
            messages: item.errors().full_messages(),
            name_error: !item.errors().get("name").is_empty(),
            body_error: !item.errors().get("body").is_empty(),
        }
    }
}

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    fn render(&self, name: &str, ctx: &Context) -> Result<String, AppError> {
        Ok(self.tera.render(name, ctx)?)
    }

    fn template(base: &str, format: ResponseFormat) -> String {
        match format {
            ResponseFormat::Mobile => format!("{base}.mobile.html"),
            _ => format!("{base}.html"),
        }
    }

    pub fn news_index(&self, listing: &NewsListing) -> Result<String, AppError> {
        let page = &listing.page;
        let items: Vec<ItemView> = page.items.iter().map(ItemView::from).collect();
        let mut ctx = Context::new();
        ctx.insert("is_empty", &items.is_empty());
        ctx.insert("items", &items);
        ctx.insert("page", &page.page);
        ctx.insert("total_pages", &page.total_pages);
        ctx.insert("prev_page", &page.prev_page());
        ctx.insert("next_page", &page.next_page());
        self.render(&Self::template("news/index", listing.format), &ctx)
    }

    pub fn news_show(&self, item: &Model, format: ResponseFormat) -> Result<String, AppError> {
        let mut ctx = Context::new();
        ctx.insert("item", &ItemView::from(item));
        self.render(&Self::template("news/show", format), &ctx)
    }

    pub fn admin_index(&self, items: &[Model], notice: Option<&str>) -> Result<String, AppError> {
        let items: Vec<ItemView> = items.iter().map(ItemView::from).collect();
        let mut ctx = Context::new();
        ctx.insert("notice", &notice);
        ctx.insert("is_empty", &items.is_empty());
        ctx.insert("items", &items);
        self.render("admin/news_items/index.html", &ctx)
    }

    pub fn admin_show(&self, item: &NewsItem) -> Result<String, AppError> {
        let record = item.to_record().ok_or_else(|| AppError::Render("news item is not saved".into()))?;
        let mut ctx = Context::new();
        ctx.insert("item", &ItemView::from(&record));
        self.render("admin/news_items/show.html", &ctx)
    }

    /// Blank or re-displayed form; saved items get the edit template.
    pub fn admin_form(&self, item: &NewsItem) -> Result<String, AppError> {
        let mut ctx = Context::new();
        ctx.insert("form", &FormView::from(item));
        let name = if item.is_new_record() { "admin/news_items/new.html" } else { "admin/news_items/edit.html" };
        self.render(name, &ctx)
    }
}
