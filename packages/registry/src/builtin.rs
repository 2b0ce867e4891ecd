use crate::definition::{Definition, FieldKind, PropField};
use crate::registry::Registry;

/// Type of the document root
pub const ROOT_TYPE: &str = "page";

impl Registry {
    /// The default block catalog
    pub fn builtin() -> Self {
        Registry::empty()
            // Layout
            .register(Definition::container(ROOT_TYPE, "Page"))
            .register(
                Definition::container("section", "Section")
                    .with_style("padding", "32px 16px"),
            )
            .register(
                Definition::container("columns", "Columns")
                    .with_style("display", "flex")
                    .with_style("gap", "16px"),
            )
            .register(Definition::container("column", "Column").with_style("flex", "1"))
            // Content
            .register(
                Definition::leaf("heading", "Heading")
                    .with_content("text", "Heading")
                    .with_content("level", 2)
                    .with_field(PropField::new("text", "Text", FieldKind::Text).required())
                    .with_field(PropField::new("level", "Level", FieldKind::Select {
                        options: (1..=6).map(|l| l.to_string()).collect(),
                    })),
            )
            .register(
                Definition::leaf("text", "Text")
                    .with_content("text", "")
                    .with_field(PropField::new("text", "Text", FieldKind::Text)),
            )
            .register(
                Definition::leaf("image", "Image")
                    .with_content("src", "")
                    .with_content("alt", "")
                    .with_style("max-width", "100%")
                    .with_field(PropField::new("src", "Image URL", FieldKind::Url).required())
                    .with_field(PropField::new("alt", "Alt text", FieldKind::Text)),
            )
            .register(
                Definition::leaf("button", "Button")
                    .with_content("label", "Click me")
                    .with_content("href", "")
                    .with_field(PropField::new("label", "Label", FieldKind::Text).required())
                    .with_field(PropField::new("href", "Link", FieldKind::Url)),
            )
            .register(
                Definition::leaf("video", "Video")
                    .with_content("src", "")
                    .with_content("autoplay", false)
                    .with_field(PropField::new("src", "Video URL", FieldKind::Url).required())
                    .with_field(PropField::new("autoplay", "Autoplay", FieldKind::Bool)),
            )
            // Interactive containers and their items
            .register(Definition::container("tabs", "Tabs"))
            .register_item(
                Definition::container("tab-panel", "Tab")
                    .with_content("title", "Tab")
                    .with_field(PropField::new("title", "Title", FieldKind::Text).required()),
                "tabs",
            )
            .register(Definition::container("accordion", "Accordion"))
            .register_item(
                Definition::container("accordion-item", "Accordion item")
                    .with_content("title", "Item")
                    .with_field(PropField::new("title", "Title", FieldKind::Text).required()),
                "accordion",
            )
            // Module-gated blocks
            .register(
                Definition::leaf("product-grid", "Product grid")
                    .with_module("shop")
                    .with_content("columns", 3)
                    .with_field(PropField::new("columns", "Columns", FieldKind::Number)),
            )
            .register(
                Definition::leaf("form", "Form")
                    .with_module("forms")
                    .with_content("formId", ""),
            )
            .register(
                Definition::leaf("booking-widget", "Booking")
                    .with_module("booking")
                    .with_content("calendarId", "")
                    .with_style("min-height", "400px"),
            )
    }
}
