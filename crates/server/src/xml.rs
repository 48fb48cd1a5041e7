//! XML rendering for news items.
//!
//! Element names are dasherized and typed values carry a `type` attribute,
//! e.g. `<id type="integer">3</id>`.

use models::news_item::Model;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

type XmlWriter = Writer<Vec<u8>>;

/// `<news-items type="array">` document for a listing page.
pub fn render_list(items: &[Model]) -> Result<String, quick_xml::Error> {
    let mut w = writer()?;
    w.write_event(Event::Start(BytesStart::new("news-items").with_attributes([("type", "array")])))?;
    for item in items {
        write_item(&mut w, item)?;
    }
    w.write_event(Event::End(BytesEnd::new("news-items")))?;
    finish(w)
}

/// Single `<news-item>` document.
pub fn render_one(item: &Model) -> Result<String, quick_xml::Error> {
    let mut w = writer()?;
    write_item(&mut w, item)?;
    finish(w)
}

fn writer() -> Result<XmlWriter, quick_xml::Error> {
    let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(w)
}

fn finish(w: XmlWriter) -> Result<String, quick_xml::Error> {
    // every event was built from &str
    let mut out = String::from_utf8_lossy(&w.into_inner()).into_owned();
    out.push('\n');
    Ok(out)
}

fn write_item(w: &mut XmlWriter, item: &Model) -> Result<(), quick_xml::Error> {
    w.write_event(Event::Start(BytesStart::new("news-item")))?;
    write_field(w, "id", Some("integer"), &item.id.to_string())?;
    write_field(w, "name", None, &item.name)?;
    write_field(w, "body", None, &item.body)?;
    write_field(w, "created-at", Some("datetime"), &item.created_at.to_rfc3339())?;
    write_field(w, "updated-at", Some("datetime"), &item.updated_at.to_rfc3339())?;
    w.write_event(Event::End(BytesEnd::new("news-item")))?;
    Ok(())
}

fn write_field(w: &mut XmlWriter, tag: &str, kind: Option<&str>, text: &str) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(tag);
    if let Some(kind) = kind {
        start.push_attribute(("type", kind));
    }
    w.write_event(Event::Start(start))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
