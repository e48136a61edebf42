use crate::Portfolio;
use folio_domain::constants::{
    CLIENT_NAME, COMPLETED_DATE, GALLERY, PORTFOLIO, PROJECT_URL, TECHNOLOGIES_USED,
};
use folio_domain::portfolio::PortfolioItem;
use folio_domain::record::{Pagination, RecordId};
use folio_kernel::html::{escape_attr, escape_html, escape_url};
use tracing::debug;

impl Portfolio {
    /// Markup of every portfolio record, newest first.
    ///
    /// Zero records render a single placeholder paragraph instead of the container.
    #[must_use]
    pub fn render_listing(&self) -> String {
        let ids = self.store.query(PORTFOLIO, Pagination::All);
        debug!(items = ids.len(), "Rendering portfolio listing");

        if ids.is_empty() {
            return format!("<p>{}</p>", escape_html(&self.render.empty_message));
        }

        let mut out = String::from(r#"<div class="portfolio-items">"#);
        for id in ids {
            self.write_item(&mut out, id);
        }
        out.push_str("</div>");
        out
    }

    #[must_use]
    pub fn render_item(&self, id: RecordId) -> String {
        let mut out = String::new();
        self.write_item(&mut out, id);
        out
    }

    fn write_item(&self, out: &mut String, id: RecordId) {
        let reader = self.reader();
        let client = reader.text(id, CLIENT_NAME).unwrap_or_default();
        let completed = reader.text(id, COMPLETED_DATE).unwrap_or_default();
        let project = escape_url(&reader.text(id, PROJECT_URL).unwrap_or_default());
        let technologies = reader.list(id, TECHNOLOGIES_USED).unwrap_or_default();
        let gallery = reader.images(id, GALLERY).unwrap_or_default();

        out.push_str(r#"<div class="portfolio-item">"#);

        let size = self.render.thumbnail_size.as_str();
        if let Some(thumbnail) = self.store.get_thumbnail(id, size) {
            let size = escape_attr(size);
            out.push_str(&format!(
                r#"<img src="{}" class="attachment-{size} size-{size}" alt="{}" />"#,
                escape_url(&thumbnail.url),
                escape_attr(&thumbnail.alt),
            ));
        }

        out.push_str(&format!("<h3>{}</h3>", escape_html(&self.store.get_title(id))));
        out.push_str(&format!("<p><strong>Client:</strong> {}</p>", escape_html(&client)));
        out.push_str(&format!("<p><strong>Completed:</strong> {}</p>", escape_html(&completed)));
        out.push_str(&format!(
            r#"<p><strong>Project:</strong> <a href="{project}" target="_blank" rel="noopener noreferrer">{project}</a></p>"#
        ));

        if !technologies.is_empty() {
            let joined: Vec<_> = technologies.iter().map(|name| escape_html(name)).collect();
            out.push_str(&format!("<p><strong>Technologies:</strong> {}</p>", joined.join(", ")));
        }

        if !gallery.is_empty() {
            out.push_str(r#"<div class="portfolio-gallery">"#);
            for image in &gallery {
                out.push_str(&format!(
                    r#"<img src="{}" alt="{}" />"#,
                    escape_url(image.size_url(&self.render.gallery_size)),
                    escape_attr(&image.alt),
                ));
            }
            out.push_str("</div>");
        }

        // Filtered body is trusted markup.
        out.push_str(&format!(
            r#"<div class="portfolio-content">{}</div>"#,
            self.store.get_body(id, true)
        ));
        out.push_str("</div>");
    }

    /// Structured payload of one record, or `None` if `id` is not a portfolio record.
    #[must_use]
    pub fn item(&self, id: RecordId) -> Option<PortfolioItem> {
        if self.store.kind_of(id).as_deref() != Some(PORTFOLIO) {
            return None;
        }
        let reader = self.reader();

        Some(PortfolioItem {
            id,
            title: self.store.get_title(id),
            thumbnail: self.store.get_thumbnail(id, &self.render.thumbnail_size).map(|asset| asset.url),
            client_name: reader.text(id, CLIENT_NAME),
            project_url: reader.text(id, PROJECT_URL),
            completed_date: reader.text(id, COMPLETED_DATE),
            technologies: reader.list(id, TECHNOLOGIES_USED).unwrap_or_default(),
            gallery: reader.images(id, GALLERY).unwrap_or_default(),
            content: self.store.get_body(id, true),
        })
    }

    /// Structured payload of every portfolio record, in listing order.
    #[must_use]
    pub fn collect_items(&self) -> Vec<PortfolioItem> {
        self.store
            .query(PORTFOLIO, Pagination::All)
            .into_iter()
            .filter_map(|id| self.item(id))
            .collect()
    }
}
