use crate::page::Page;
use tracing::debug;

const PRINT_SHELL_HEAD: &str = r#"<html>
    <head>
        <title>Print</title>
        <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet">
        <style>
            body { font-family: Arial, sans-serif; }
            @media print { body { margin: 0; } }
        </style>
    </head>
    <body>
"#;

const PRINT_SHELL_TAIL: &str = r#"
    </body>
</html>
"#;

/// The platform print dialog.
pub trait PrintSink {
    fn print(&self, document: &str);
}

pub fn render_print_document(fragment: &str) -> String {
    format!("{PRINT_SHELL_HEAD}{fragment}{PRINT_SHELL_TAIL}")
}

impl Page {
    /// Builds a print document for the whole page: summary cards, then every
    /// printable element in id order.
    pub fn print_document(&self) -> String {
        let mut body = String::new();
        for (field, text) in self.summary().iter() {
            body.push_str(&format!("<div class=\"h5\" id=\"{}\">{text}</div>\n", field.id()));
        }
        for (_, html) in self.elements() {
            body.push_str(html);
            body.push('\n');
        }
        render_print_document(&body)
    }

    /// Builds a standalone print document for one element, if it exists.
    pub fn print_element(&self, id: &str) -> Option<String> {
        let Some(fragment) = self.element(id) else {
            debug!(id, "print target not found");
            return None;
        };
        Some(render_print_document(fragment))
    }
}

pub fn print_page(page: &Page, sink: &dyn PrintSink) {
    debug!(path = page.path(), "printing page");
    sink.print(&page.print_document());
}

pub fn print_element(page: &Page, id: &str, sink: &dyn PrintSink) -> bool {
    match page.print_element(id) {
        Some(document) => {
            sink.print(&document);
            true
        }
        None => false,
    }
}
