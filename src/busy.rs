pub const BUSY_CONTENT: &str =
    r#"<span class="spinner-border spinner-border-sm" role="status"></span> Loading..."#;

/// An interactive control (usually a submit button) that can be put in a busy state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    content: String,
    interactive: bool,
    loading: bool,
    original_label: Option<String>,
}

impl Control {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            content: label.into(),
            interactive: true,
            loading: false,
            original_label: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn is_busy(&self) -> bool {
        self.original_label.is_some()
    }

    pub fn has_loading_class(&self) -> bool {
        self.loading
    }

    pub fn set_busy(&mut self, busy: bool) {
        if busy {
            self.loading = true;
            self.interactive = false;
            // Keep the first saved label if already busy.
            if self.original_label.is_none() {
                self.original_label = Some(std::mem::take(&mut self.content));
            }
            self.content = BUSY_CONTENT.to_string();
        } else {
            self.loading = false;
            self.interactive = true;
            if let Some(label) = self.original_label.take() {
                self.content = label;
            }
        }
    }
}
