//! lopdf-based form document.
//!
//! [`FormDocument`] wraps a [`lopdf::Document`] and exposes the widget-level
//! view the inspector and filler work with: page-by-page widget enumeration,
//! value application (see [`crate::writer`]), flattening (see
//! [`crate::flatten`]) and saving with garbage collection.

use std::path::Path;

use acroform_core::{BBox, FieldType, FormError, FormWidget, WidgetKind};
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::BackendError;
use crate::pdf_string::object_to_text;

/// Guard against circular `/Parent` chains and reference loops.
pub(crate) const MAX_DEPTH: usize = 64;

/// Default page height (US Letter) when no `/MediaBox` is found.
const DEFAULT_PAGE_HEIGHT: f64 = 792.0;

/// An opened form document backed by lopdf.
pub struct FormDocument {
    /// The underlying lopdf document.
    pub(crate) inner: Document,
    /// Cached ordered list of page ObjectIds (indexed by 0-based page number).
    pub(crate) page_ids: Vec<ObjectId>,
    /// Lazily created Helvetica font used by generated text appearances.
    pub(crate) helv_font: Option<ObjectId>,
}

impl std::fmt::Debug for FormDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// A widget annotation together with the object ids needed to mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct LopdfWidget {
    /// Backend-independent view of the widget.
    pub widget: FormWidget,
    /// The widget annotation dictionary.
    pub annot_id: ObjectId,
    /// The terminal field dictionary holding `/V`. Equal to `annot_id` for
    /// merged field/widget dictionaries.
    pub field_id: ObjectId,
    /// Set when some `/Parent` in the widget's chain does not resolve.
    pub orphaned: bool,
}

impl FormDocument {
    /// Parse a form document from raw PDF bytes.
    ///
    /// Encrypted documents are rejected with [`FormError::PasswordRequired`].
    pub fn open(bytes: &[u8]) -> Result<Self, BackendError> {
        let inner = Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;
        Self::from_document(inner)
    }

    /// Read and parse a form document from disk.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::open(&bytes)
    }

    /// Wrap an already-loaded lopdf document.
    ///
    /// Widget dictionaries written inline in a page's `/Annots` are moved
    /// into their own objects so every widget has an object id.
    pub fn from_document(mut inner: Document) -> Result<Self, BackendError> {
        if inner.is_encrypted() {
            return Err(BackendError::Core(FormError::PasswordRequired));
        }
        let page_ids: Vec<ObjectId> = inner.get_pages().values().copied().collect();
        let promoted = promote_inline_widgets(&mut inner, &page_ids);
        if promoted > 0 {
            tracing::debug!(promoted, "inline widget annotations moved to objects");
        }
        Ok(Self {
            inner,
            page_ids,
            helv_font: None,
        })
    }

    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Enumerate the widget annotations on one page, in `/Annots` order.
    pub fn widgets_on_page(&self, page_index: usize) -> Result<Vec<LopdfWidget>, BackendError> {
        let page_id = *self.page_ids.get(page_index).ok_or_else(|| {
            BackendError::Parse(format!(
                "page index {page_index} out of range (document has {} pages)",
                self.page_ids.len()
            ))
        })?;
        let doc = &self.inner;
        let page_dict = doc
            .get_object(page_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;
        let (page_left, page_top) = page_origin(doc, page_dict);

        let mut widgets = Vec::new();
        for annot_id in widget_annotation_ids(doc, page_dict) {
            let Some(annot) = doc.get_object(annot_id).ok().and_then(|o| o.as_dict().ok()) else {
                continue;
            };
            widgets.push(read_widget(doc, annot_id, annot, page_index, page_left, page_top));
        }
        Ok(widgets)
    }

    /// Enumerate every widget on every page.
    pub fn all_widgets(&self) -> Result<Vec<LopdfWidget>, BackendError> {
        let mut all = Vec::new();
        for page_index in 0..self.page_ids.len() {
            all.extend(self.widgets_on_page(page_index)?);
        }
        Ok(all)
    }

    /// Backend-independent widget list for every page.
    pub fn form_widgets(&self) -> Result<Vec<FormWidget>, BackendError> {
        Ok(self.all_widgets()?.into_iter().map(|w| w.widget).collect())
    }

    /// Save to `path`, pruning unreachable objects and compressing streams.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), BackendError> {
        self.garbage_collect();
        self.inner
            .save(path.as_ref())
            .map(|_| ())
            .map_err(|e| BackendError::Write(format!("failed to save {}: {e}", path.as_ref().display())))
    }

    /// Serialize to a writer, pruning unreachable objects and compressing streams.
    pub fn save_to<W: std::io::Write>(&mut self, target: &mut W) -> Result<(), BackendError> {
        self.garbage_collect();
        self.inner
            .save_to(target)
            .map_err(|e| BackendError::Write(format!("failed to write PDF: {e}")))
    }

    fn garbage_collect(&mut self) {
        let pruned = self.inner.prune_objects();
        tracing::debug!(pruned = pruned.len(), "pruned unreachable objects");
        self.inner.renumber_objects();
        self.inner.compress();
        // Object ids changed; refresh the cached ones.
        self.page_ids = self.inner.get_pages().values().copied().collect();
        self.helv_font = None;
    }
}

/// Follow references until a direct object is reached.
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    let mut current = obj;
    for _ in 0..MAX_DEPTH {
        match current {
            Object::Reference(id) => current = doc.get_object(*id).ok()?,
            other => return Some(other),
        }
    }
    None
}

pub(crate) fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    resolve(doc, obj)?.as_dict().ok()
}

/// Look up `key` on `dict`, walking up `/Parent` links when it is absent.
///
/// Works for both the page tree and the field tree.
pub(crate) fn lookup_inherited<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = dict;
    for _ in 0..MAX_DEPTH {
        if let Ok(value) = current.get(key) {
            return resolve(doc, value);
        }
        current = resolve_dict(doc, current.get(b"Parent").ok()?)?;
    }
    None
}

/// Whether every `/Parent` link above `dict` resolves to a dictionary.
pub(crate) fn parent_chain_intact(doc: &Document, dict: &Dictionary) -> bool {
    let mut current = dict;
    for _ in 0..MAX_DEPTH {
        match current.get(b"Parent") {
            Err(_) => return true,
            Ok(parent) => match resolve_dict(doc, parent) {
                Some(next) => current = next,
                None => return false,
            },
        }
    }
    false
}

/// Fully qualified field name: `/T` segments from the root down, joined
/// with `.` and trimmed.
pub(crate) fn qualified_name(doc: &Document, dict: &Dictionary) -> String {
    let mut parts = Vec::new();
    let mut current = Some(dict);
    let mut depth = 0;
    while let Some(node) = current {
        if depth >= MAX_DEPTH {
            break;
        }
        if let Some(partial) = node
            .get(b"T")
            .ok()
            .and_then(|t| resolve(doc, t))
            .and_then(object_to_text)
        {
            parts.push(partial);
        }
        current = node.get(b"Parent").ok().and_then(|p| resolve_dict(doc, p));
        depth += 1;
    }
    parts.reverse();
    parts.join(".").trim().to_string()
}

/// Convert a lopdf numeric object (Integer or Real) to f64.
pub(crate) fn object_to_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some(*f as f64),
        _ => None,
    }
}

/// Read a 4-number array such as `/Rect` or `/BBox`.
pub(crate) fn read_rect(doc: &Document, obj: &Object) -> Option<[f64; 4]> {
    let arr = resolve(doc, obj)?.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let mut out = [0.0; 4];
    for (slot, item) in out.iter_mut().zip(arr) {
        *slot = object_to_f64(resolve(doc, item)?)?;
    }
    Some(out)
}

/// Reference ids in a page's `/Annots` whose `/Subtype` is `/Widget`.
/// Inline widget dictionaries were already promoted by
/// [`FormDocument::from_document`].
pub(crate) fn widget_annotation_ids(doc: &Document, page_dict: &Dictionary) -> Vec<ObjectId> {
    let Some(annots) = page_dict
        .get(b"Annots")
        .ok()
        .and_then(|a| resolve(doc, a))
        .and_then(|a| a.as_array().ok())
    else {
        return Vec::new();
    };
    annots
        .iter()
        .filter_map(|entry| entry.as_reference().ok())
        .filter(|id| {
            doc.get_object(*id)
                .and_then(|o| o.as_dict())
                .ok()
                .and_then(|d| d.get(b"Subtype").ok())
                .and_then(|s| s.as_name().ok())
                == Some(b"Widget".as_slice())
        })
        .collect()
}

fn is_inline_widget(entry: &Object) -> bool {
    entry
        .as_dict()
        .ok()
        .and_then(|d| d.get(b"Subtype").ok())
        .and_then(|s| s.as_name().ok())
        == Some(b"Widget".as_slice())
}

/// Replace inline widget dictionaries in each page's `/Annots` with
/// references to new objects. Returns how many were moved.
fn promote_inline_widgets(doc: &mut Document, page_ids: &[ObjectId]) -> usize {
    let mut promoted = 0;
    for &page_id in page_ids {
        let Some(annots_obj) = doc
            .get_object(page_id)
            .and_then(|o| o.as_dict())
            .ok()
            .and_then(|d| d.get(b"Annots").ok())
            .cloned()
        else {
            continue;
        };
        let array_id = annots_obj.as_reference().ok();
        let entries = match array_id {
            Some(id) => match doc.get_object(id).and_then(|o| o.as_array()) {
                Ok(items) => items.clone(),
                Err(_) => continue,
            },
            None => match annots_obj {
                Object::Array(items) => items,
                _ => continue,
            },
        };
        if !entries.iter().any(is_inline_widget) {
            continue;
        }

        let mut rewritten = Vec::with_capacity(entries.len());
        for entry in entries {
            if is_inline_widget(&entry) {
                rewritten.push(Object::Reference(doc.add_object(entry)));
                promoted += 1;
            } else {
                rewritten.push(entry);
            }
        }
        match array_id {
            Some(id) => {
                if let Ok(slot) = doc.get_object_mut(id) {
                    *slot = Object::Array(rewritten);
                }
            }
            None => {
                if let Ok(page) = doc.get_object_mut(page_id).and_then(|o| o.as_dict_mut()) {
                    page.set("Annots", rewritten);
                }
            }
        }
    }
    promoted
}

/// The page's top-left corner in PDF space: `(llx, ury)` of the inherited
/// `/MediaBox`.
fn page_origin(doc: &Document, page_dict: &Dictionary) -> (f64, f64) {
    lookup_inherited(doc, page_dict, b"MediaBox")
        .and_then(|mb| read_rect(doc, mb))
        .map(|mb| (mb[0].min(mb[2]), mb[1].max(mb[3])))
        .unwrap_or((0.0, DEFAULT_PAGE_HEIGHT))
}

/// The dictionary carrying the field's `/T` and `/V`.
fn field_id_for(annot_id: ObjectId, annot: &Dictionary) -> ObjectId {
    if annot.has(b"T") {
        return annot_id;
    }
    annot
        .get(b"Parent")
        .and_then(|p| p.as_reference())
        .unwrap_or(annot_id)
}

pub(crate) fn field_flags(doc: &Document, dict: &Dictionary) -> u32 {
    match lookup_inherited(doc, dict, b"Ff") {
        Some(Object::Integer(n)) => *n as u32,
        _ => 0,
    }
}

pub(crate) fn widget_kind(doc: &Document, dict: &Dictionary) -> WidgetKind {
    let field_type = lookup_inherited(doc, dict, b"FT")
        .and_then(|ft| ft.as_name().ok())
        .and_then(|name| FieldType::from_pdf_name(&String::from_utf8_lossy(name)));
    WidgetKind::classify(field_type, field_flags(doc, dict))
}

fn read_widget(
    doc: &Document,
    annot_id: ObjectId,
    annot: &Dictionary,
    page_index: usize,
    page_left: f64,
    page_top: f64,
) -> LopdfWidget {
    let kind = widget_kind(doc, annot);
    let flags = field_flags(doc, annot);
    let bbox = annot
        .get(b"Rect")
        .ok()
        .and_then(|r| read_rect(doc, r))
        .map(|r| {
            BBox::from_pdf_rect(
                [r[0] - page_left, r[1], r[2] - page_left, r[3]],
                page_top,
            )
        })
        .unwrap_or_default();
    let value = lookup_inherited(doc, annot, b"V").and_then(field_value_text);
    let choices = if kind.is_choice() {
        resolve_choices(doc, annot)
    } else {
        Vec::new()
    };

    LopdfWidget {
        widget: FormWidget {
            page_index,
            name: qualified_name(doc, annot),
            kind,
            bbox,
            value,
            choices,
            flags,
        },
        annot_id,
        field_id: field_id_for(annot_id, annot),
        orphaned: !parent_chain_intact(doc, annot),
    }
}

/// `/V` as text. Multi-select arrays are joined with `, `.
fn field_value_text(obj: &Object) -> Option<String> {
    match obj {
        Object::Array(items) => {
            let vals: Vec<String> = items.iter().filter_map(object_to_text).collect();
            if vals.is_empty() {
                None
            } else {
                Some(vals.join(", "))
            }
        }
        other => object_to_text(other),
    }
}

/// Which half of an `[export, display]` option pair to read.
#[derive(Clone, Copy)]
enum OptionPart {
    Display,
    Export,
}

/// The terminal field dictionary for a widget: the widget itself when it
/// carries `/T`, otherwise its `/Parent`.
fn field_dict<'a>(doc: &'a Document, annot: &'a Dictionary) -> &'a Dictionary {
    if annot.has(b"T") {
        return annot;
    }
    annot
        .get(b"Parent")
        .ok()
        .and_then(|p| resolve_dict(doc, p))
        .unwrap_or(annot)
}

/// Choice list for a combo/list widget.
///
/// Tries the field's (inherited) `/Opt` display values, then an `/Opt` on
/// the widget annotation itself, then the export values of the field's
/// `/Opt`. The first non-empty list wins.
pub(crate) fn resolve_choices(doc: &Document, annot: &Dictionary) -> Vec<String> {
    let inherited = lookup_inherited(doc, field_dict(doc, annot), b"Opt");
    let own = annot.get(b"Opt").ok().and_then(|o| resolve(doc, o));

    let sources = [
        (inherited, OptionPart::Display),
        (own, OptionPart::Display),
        (inherited, OptionPart::Export),
    ];
    for (source, part) in sources {
        let values = source.map(|opt| option_values(doc, opt, part)).unwrap_or_default();
        if !values.is_empty() {
            return values;
        }
    }
    Vec::new()
}

fn option_values(doc: &Document, opt: &Object, part: OptionPart) -> Vec<String> {
    let Ok(items) = opt.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match resolve(doc, item)? {
            Object::Array(pair) => {
                let index = match part {
                    OptionPart::Export => 0,
                    OptionPart::Display if pair.len() >= 2 => 1,
                    OptionPart::Display => return None,
                };
                resolve(doc, pair.get(index)?).and_then(object_to_text)
            }
            plain => match part {
                OptionPart::Display => object_to_text(plain),
                OptionPart::Export => None,
            },
        })
        .collect()
}
