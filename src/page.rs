use crate::format::format_egp;
use crate::models::SummaryData;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type SharedPage = Arc<Mutex<Page>>;

/// Summary card slots on the dashboard, each bound by a stable element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SummaryField {
    PcSessions,
    Services,
    Expenses,
    NetTotal,
}

impl SummaryField {
    pub const ALL: [SummaryField; 4] = [
        SummaryField::PcSessions,
        SummaryField::Services,
        SummaryField::Expenses,
        SummaryField::NetTotal,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SummaryField::PcSessions => "summary-pcs-total",
            SummaryField::Services => "summary-services-total",
            SummaryField::Expenses => "summary-expenses-total",
            SummaryField::NetTotal => "summary-net-total",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SummaryField::PcSessions => "PC Sessions",
            SummaryField::Services => "Services",
            SummaryField::Expenses => "Expenses",
            SummaryField::NetTotal => "Net Total",
        }
    }

    pub fn value(self, summary: &SummaryData) -> f64 {
        match self {
            SummaryField::PcSessions => summary.pcs_total,
            SummaryField::Services => summary.services_total,
            SummaryField::Expenses => summary.expenses_total,
            SummaryField::NetTotal => summary.total_all,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SummaryCards {
    cards: BTreeMap<SummaryField, String>,
}

impl SummaryCards {
    pub fn bind(&mut self, field: SummaryField, text: impl Into<String>) {
        self.cards.insert(field, text.into());
    }

    pub fn text(&self, field: SummaryField) -> Option<&str> {
        self.cards.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SummaryField, &str)> {
        self.cards.iter().map(|(field, text)| (*field, text.as_str()))
    }

    pub fn is_bound(&self, field: SummaryField) -> bool {
        self.cards.contains_key(&field)
    }

    /// Rewrites every bound card from `summary`. Unbound fields are ignored.
    pub fn apply(&mut self, summary: &SummaryData) -> usize {
        let mut updated = 0;
        for (field, text) in self.cards.iter_mut() {
            *text = format_egp(field.value(summary));
            updated += 1;
        }
        updated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Modal,
    Collapse,
}

#[derive(Debug, Clone)]
pub struct Overlay {
    pub id: String,
    pub kind: OverlayKind,
    pub open: bool,
}

/// In-memory model of the rendered page the behaviour layer operates on.
#[derive(Debug, Clone)]
pub struct Page {
    path: String,
    body_classes: BTreeSet<String>,
    overlays: Vec<Overlay>,
    elements: BTreeMap<String, String>,
    summary: SummaryCards,
}

impl Page {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            body_classes: BTreeSet::new(),
            overlays: Vec::new(),
            elements: BTreeMap::new(),
            summary: SummaryCards::default(),
        }
    }

    /// The landing view with all four summary cards bound.
    pub fn dashboard() -> Self {
        let mut page = Self::new("/");
        for field in SummaryField::ALL {
            page.summary.bind(field, format_egp(0.0));
        }
        page
    }

    pub fn into_shared(self) -> SharedPage {
        Arc::new(Mutex::new(self))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_dashboard(&self) -> bool {
        self.path == "/"
    }

    pub fn navigate(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn add_body_class(&mut self, class: &str) {
        self.body_classes.insert(class.to_string());
    }

    pub fn remove_body_class(&mut self, class: &str) {
        self.body_classes.remove(class);
    }

    pub fn add_overlay(&mut self, id: impl Into<String>, kind: OverlayKind, open: bool) {
        self.overlays.push(Overlay {
            id: id.into(),
            kind,
            open,
        });
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn open_overlay_count(&self) -> usize {
        self.overlays.iter().filter(|overlay| overlay.open).count()
    }

    /// Hides every open modal and collapse, returning how many were closed.
    pub fn close_overlays(&mut self) -> usize {
        let mut closed = 0;
        for overlay in self.overlays.iter_mut().filter(|overlay| overlay.open) {
            overlay.open = false;
            closed += 1;
        }
        closed
    }

    pub fn insert_element(&mut self, id: impl Into<String>, html: impl Into<String>) {
        self.elements.insert(id.into(), html.into());
    }

    pub fn element(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(String::as_str)
    }

    pub fn elements(&self) -> impl Iterator<Item = (&str, &str)> {
        self.elements.iter().map(|(id, html)| (id.as_str(), html.as_str()))
    }

    pub fn summary(&self) -> &SummaryCards {
        &self.summary
    }

    pub fn summary_mut(&mut self) -> &mut SummaryCards {
        &mut self.summary
    }
}
