//! Flattening: baking widget appearances into page content.
//!
//! Each widget's current value is first committed to its appearance. The
//! normal appearance is then registered as a Form XObject on its page and
//! drawn by an overlay content stream; the widget annotation is removed
//! from `/Annots`. Hidden widgets and widgets without an appearance for
//! their current state are removed without drawing.

use std::collections::HashSet;

use acroform_core::{FlattenReport, SkipReason, WidgetKind};
use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};

use crate::appearance::fmt_num;
use crate::error::BackendError;
use crate::lopdf_backend::{
    FormDocument, lookup_inherited, parent_chain_intact, read_rect, resolve, resolve_dict,
    widget_annotation_ids,
};
use crate::writer::{OFF_STATE, WidgetTarget};

/// Annotation flags that keep a widget from being drawn (Hidden, NoView).
const HIDDEN_FLAGS: i64 = 1 << 1 | 1 << 5;

const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Where a widget's normal appearance stream lives.
enum Appearance {
    Indirect(ObjectId),
    Inline(Stream),
}

enum FlattenAction {
    Draw {
        appearance: Appearance,
        cm: [f64; 6],
    },
    Drop,
    Skip(SkipReason),
}

impl FormDocument {
    /// Convert every widget on every page into static page content.
    ///
    /// Orphaned or malformed widgets are skipped and left in place; the
    /// catalog `/AcroForm` is removed only when nothing was skipped.
    pub fn flatten(&mut self) -> FlattenReport {
        let mut report = FlattenReport::default();
        for page_index in 0..self.page_ids.len() {
            if let Err(e) = self.flatten_page(page_index, &mut report) {
                tracing::warn!(page = page_index + 1, error = %e, "page flatten failed");
                report.skipped.push(SkipReason::Malformed(e.to_string()));
            }
        }
        if report.skipped.is_empty() {
            self.remove_acroform();
        }
        tracing::debug!(
            flattened = report.flattened,
            dropped = report.dropped,
            skipped = report.skipped.len(),
            "flatten complete"
        );
        report
    }

    fn flatten_page(
        &mut self,
        page_index: usize,
        report: &mut FlattenReport,
    ) -> Result<(), BackendError> {
        self.commit_values(page_index)?;

        let page_id = self.page_ids[page_index];
        let plans: Vec<(ObjectId, FlattenAction)> = {
            let doc = &self.inner;
            let page_dict = doc
                .get_object(page_id)
                .and_then(|o| o.as_dict())
                .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;
            widget_annotation_ids(doc, page_dict)
                .into_iter()
                .map(|annot_id| (annot_id, plan_widget(doc, annot_id)))
                .collect()
        };
        if plans.is_empty() {
            return Ok(());
        }

        let mut removed = HashSet::new();
        let mut placements = Vec::new();
        for (annot_id, action) in plans {
            match action {
                FlattenAction::Draw { appearance, cm } => {
                    let xobject_id = match appearance {
                        Appearance::Indirect(id) => id,
                        Appearance::Inline(stream) => self.inner.add_object(stream),
                    };
                    self.prepare_form_xobject(xobject_id);
                    placements.push((xobject_id, cm));
                    removed.insert(annot_id);
                    report.flattened += 1;
                }
                FlattenAction::Drop => {
                    removed.insert(annot_id);
                    report.dropped += 1;
                }
                FlattenAction::Skip(reason) => {
                    tracing::warn!(
                        page = page_index + 1,
                        annot = annot_id.0,
                        %reason,
                        "widget not flattened"
                    );
                    report.skipped.push(reason);
                }
            }
        }

        if !placements.is_empty() {
            let names = self.register_xobjects(page_id, &placements)?;
            let mut overlay = b"\nQ\n".to_vec();
            for (name, (_, cm)) in names.iter().zip(&placements) {
                overlay.extend_from_slice(
                    format!(
                        "q {} cm /{name} Do Q\n",
                        cm.iter().map(|v| fmt_num(*v)).collect::<Vec<_>>().join(" ")
                    )
                    .as_bytes(),
                );
            }
            self.wrap_page_contents(page_id, overlay)?;
        }
        self.remove_annotations(page_id, &removed)
    }

    /// Bring every intact widget's appearance in line with its inherited
    /// `/V`. Text and choice widgets get a regenerated stream; widgets with
    /// an appearance state dictionary get `/AS` synced to the value.
    fn commit_values(&mut self, page_index: usize) -> Result<(), BackendError> {
        for widget in self.widgets_on_page(page_index)? {
            if widget.orphaned {
                continue;
            }
            let Some(value) = widget.widget.value.clone() else {
                continue;
            };
            let target = self.target_for(widget);
            let result = if !target.normal_states.is_empty() {
                self.sync_appearance_state(&target, &value)
            } else {
                match target.kind {
                    WidgetKind::Text | WidgetKind::ComboBox | WidgetKind::ListBox => {
                        self.write_text_appearance(&target, &value)
                    }
                    WidgetKind::CheckBox => self.write_checkbox(&target, value != OFF_STATE),
                    _ => Ok(()),
                }
            };
            if let Err(e) = result {
                tracing::debug!(field = %target.name, error = %e, "value not committed");
            }
        }
        Ok(())
    }

    fn sync_appearance_state(
        &mut self,
        target: &WidgetTarget,
        value: &str,
    ) -> Result<(), BackendError> {
        let state = if target.normal_states.iter().any(|s| s == value) {
            value
        } else if target.kind == WidgetKind::CheckBox && value != OFF_STATE {
            target.on_state.as_str()
        } else {
            OFF_STATE
        };
        self.dict_mut(target.annot_id)?
            .set("AS", Object::Name(state.as_bytes().to_vec()));
        Ok(())
    }

    /// Make sure a stream is usable as a Form XObject.
    fn prepare_form_xobject(&mut self, id: ObjectId) {
        if let Ok(Object::Stream(stream)) = self.inner.get_object_mut(id) {
            stream.dict.set("Type", "XObject");
            stream.dict.set("Subtype", "Form");
        }
    }

    /// Add the appearance streams to the page's `/XObject` resources under
    /// fresh names. Inherited resources are copied onto the page first.
    fn register_xobjects(
        &mut self,
        page_id: ObjectId,
        placements: &[(ObjectId, [f64; 6])],
    ) -> Result<Vec<String>, BackendError> {
        let mut resources = {
            let doc = &self.inner;
            let page_dict = doc
                .get_object(page_id)
                .and_then(|o| o.as_dict())
                .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;
            lookup_inherited(doc, page_dict, b"Resources")
                .and_then(|r| r.as_dict().ok())
                .cloned()
                .unwrap_or_else(Dictionary::new)
        };
        let mut xobjects = resources
            .get(b"XObject")
            .ok()
            .and_then(|x| resolve_dict(&self.inner, x))
            .cloned()
            .unwrap_or_else(Dictionary::new);

        let mut names = Vec::with_capacity(placements.len());
        let mut counter = 0usize;
        for (xobject_id, _) in placements {
            let name = loop {
                counter += 1;
                let candidate = format!("FlatW{counter}");
                if !xobjects.has(candidate.as_bytes()) {
                    break candidate;
                }
            };
            xobjects.set(name.as_bytes().to_vec(), *xobject_id);
            names.push(name);
        }

        resources.set("XObject", xobjects);
        self.dict_mut(page_id)?.set("Resources", resources);
        Ok(names)
    }

    /// Replace `/Contents` with `[q, existing..., overlay]` so the overlay
    /// draws in the page's initial graphics state.
    fn wrap_page_contents(&mut self, page_id: ObjectId, overlay: Vec<u8>) -> Result<(), BackendError> {
        let existing: Vec<Object> = {
            let doc = &self.inner;
            let page_dict = doc
                .get_object(page_id)
                .and_then(|o| o.as_dict())
                .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;
            match page_dict.get(b"Contents") {
                Ok(Object::Reference(id)) => match doc.get_object(*id) {
                    Ok(Object::Array(items)) => items.clone(),
                    _ => vec![Object::Reference(*id)],
                },
                Ok(Object::Array(items)) => items.clone(),
                _ => Vec::new(),
            }
        };

        let open_id = self
            .inner
            .add_object(Stream::new(dictionary! {}, b"q\n".to_vec()));
        let overlay_id = self.inner.add_object(Stream::new(dictionary! {}, overlay));
        let mut contents = Vec::with_capacity(existing.len() + 2);
        contents.push(Object::Reference(open_id));
        contents.extend(existing);
        contents.push(Object::Reference(overlay_id));
        self.dict_mut(page_id)?.set("Contents", contents);
        Ok(())
    }

    fn remove_annotations(
        &mut self,
        page_id: ObjectId,
        removed: &HashSet<ObjectId>,
    ) -> Result<(), BackendError> {
        if removed.is_empty() {
            return Ok(());
        }
        let keep = |obj: &Object| !matches!(obj, Object::Reference(id) if removed.contains(id));

        let annots_ref = self
            .inner
            .get_object(page_id)
            .and_then(|o| o.as_dict())
            .ok()
            .and_then(|d| d.get(b"Annots").ok())
            .and_then(|a| a.as_reference().ok());

        let remaining = match annots_ref {
            Some(array_id) => {
                let array = self
                    .inner
                    .get_object_mut(array_id)
                    .and_then(|o| o.as_array_mut())
                    .map_err(|e| BackendError::Parse(format!("page /Annots: {e}")))?;
                array.retain(keep);
                array.len()
            }
            None => {
                let page = self.dict_mut(page_id)?;
                match page.get_mut(b"Annots").and_then(|a| a.as_array_mut()) {
                    Ok(array) => {
                        array.retain(keep);
                        array.len()
                    }
                    Err(_) => return Ok(()),
                }
            }
        };
        if remaining == 0 {
            self.dict_mut(page_id)?.remove(b"Annots");
        }
        Ok(())
    }

    fn remove_acroform(&mut self) {
        let Ok(root_id) = self.inner.trailer.get(b"Root").and_then(|r| r.as_reference()) else {
            return;
        };
        if let Ok(catalog) = self.dict_mut(root_id) {
            catalog.remove(b"AcroForm");
        }
    }
}

fn plan_widget(doc: &lopdf::Document, annot_id: ObjectId) -> FlattenAction {
    let Some(annot) = doc.get_object(annot_id).ok().and_then(|o| o.as_dict().ok()) else {
        return FlattenAction::Skip(SkipReason::Malformed("unreadable annotation".to_string()));
    };
    if !parent_chain_intact(doc, annot) {
        return FlattenAction::Skip(SkipReason::OrphanedReference);
    }
    let Some(rect) = annot.get(b"Rect").ok().and_then(|r| read_rect(doc, r)) else {
        return FlattenAction::Skip(SkipReason::Malformed("no /Rect".to_string()));
    };
    let annot_flags = match annot.get(b"F").ok().and_then(|f| resolve(doc, f)) {
        Some(Object::Integer(f)) => *f,
        _ => 0,
    };
    if annot_flags & HIDDEN_FLAGS != 0 {
        return FlattenAction::Drop;
    }

    let Some((appearance, stream)) = normal_appearance(doc, annot) else {
        return FlattenAction::Drop;
    };
    let bbox = stream
        .dict
        .get(b"BBox")
        .ok()
        .and_then(|b| read_rect(doc, b))
        .unwrap_or([0.0, 0.0, rect[2] - rect[0], rect[3] - rect[1]]);
    let matrix = stream
        .dict
        .get(b"Matrix")
        .ok()
        .and_then(|m| read_matrix(doc, m))
        .unwrap_or(IDENTITY);

    FlattenAction::Draw {
        appearance,
        cm: placement_matrix(rect, bbox, matrix),
    }
}

/// The widget's `/AP /N` stream, picking the `/AS` state from a state
/// dictionary when needed.
fn normal_appearance<'a>(
    doc: &'a lopdf::Document,
    annot: &'a Dictionary,
) -> Option<(Appearance, &'a Stream)> {
    let ap = resolve_dict(doc, annot.get(b"AP").ok()?)?;
    let mut entry = ap.get(b"N").ok()?;
    let resolved = resolve(doc, entry)?;
    if let Object::Dictionary(states) = resolved {
        let state = match annot.get(b"AS").ok().and_then(|s| resolve(doc, s)) {
            Some(Object::Name(name)) => name.clone(),
            _ => match lookup_inherited(doc, annot, b"V") {
                Some(Object::Name(name)) => name.clone(),
                _ => return None,
            },
        };
        entry = states.get(&state).ok()?;
    }

    // Follow a chain of references to the stream, remembering the last id.
    let mut last_id = None;
    let mut current = entry;
    for _ in 0..crate::lopdf_backend::MAX_DEPTH {
        match current {
            Object::Reference(id) => {
                last_id = Some(*id);
                current = doc.get_object(*id).ok()?;
            }
            Object::Stream(stream) => {
                let appearance = match last_id {
                    Some(id) => Appearance::Indirect(id),
                    None => Appearance::Inline(stream.clone()),
                };
                return Some((appearance, stream));
            }
            _ => return None,
        }
    }
    None
}

fn read_matrix(doc: &lopdf::Document, obj: &Object) -> Option<[f64; 6]> {
    let arr = resolve(doc, obj)?.as_array().ok()?;
    if arr.len() != 6 {
        return None;
    }
    let mut out = [0.0; 6];
    for (slot, item) in out.iter_mut().zip(arr) {
        *slot = crate::lopdf_backend::object_to_f64(resolve(doc, item)?)?;
    }
    Some(out)
}

/// The `cm` matrix that maps the appearance's transformed bounding box onto
/// the annotation rectangle.
fn placement_matrix(rect: [f64; 4], bbox: [f64; 4], matrix: [f64; 6]) -> [f64; 6] {
    let [a, b, c, d, e, f] = matrix;
    let corners = [
        (bbox[0], bbox[1]),
        (bbox[2], bbox[1]),
        (bbox[0], bbox[3]),
        (bbox[2], bbox[3]),
    ];
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (x, y) in corners {
        let tx = a * x + c * y + e;
        let ty = b * x + d * y + f;
        min_x = min_x.min(tx);
        min_y = min_y.min(ty);
        max_x = max_x.max(tx);
        max_y = max_y.max(ty);
    }

    let (rx0, rx1) = (rect[0].min(rect[2]), rect[0].max(rect[2]));
    let (ry0, ry1) = (rect[1].min(rect[3]), rect[1].max(rect[3]));
    let sx = scale(rx1 - rx0, max_x - min_x);
    let sy = scale(ry1 - ry0, max_y - min_y);
    [sx, 0.0, 0.0, sy, rx0 - min_x * sx, ry0 - min_y * sy]
}

fn scale(target: f64, source: f64) -> f64 {
    if source.abs() < f64::EPSILON {
        1.0
    } else {
        target / source
    }
}
