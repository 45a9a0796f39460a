//! A four-page stand-in for the ACORD 125 template, built in memory with
//! lopdf. It carries one widget for every field name the filler writes.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use acord125::schema::{LINES_OF_BUSINESS, LOSS_ROWS, LOSS_TOTAL, LegalEntity, NO_PRIOR_LOSSES};
use acord125::{FormDocument, InputValue, synthesize};
use chrono::NaiveDate;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const PAGES: usize = 4;

/// A field the filler never writes.
pub const UNUSED_FIELD: &str = "F[0].P2[0].Construction_YearBuilt_A[0]";

pub fn effective() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn rect(x: i64, y: i64, w: i64, h: i64) -> Vec<Object> {
    vec![
        Object::Integer(x),
        Object::Integer(y),
        Object::Integer(x + w),
        Object::Integer(y + h),
    ]
}

/// 0-based page from the `F[0].P<n>[0]` prefix.
pub fn page_of(name: &str) -> usize {
    name.strip_prefix("F[0].P")
        .and_then(|rest| rest.chars().next())
        .and_then(|c| c.to_digit(10))
        .map(|n| n as usize - 1)
        .unwrap_or(0)
}

pub struct TemplateBuilder {
    doc: Document,
    pages_id: ObjectId,
    annots: Vec<Vec<Object>>,
    fields: Vec<Object>,
    slots: Vec<i64>,
    pub widget_count: usize,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            annots: vec![Vec::new(); PAGES],
            fields: Vec::new(),
            slots: vec![0; PAGES],
            widget_count: 0,
        }
    }

    /// Three columns, 14pt rows, from the top of the page down.
    fn next_rect(&mut self, page: usize, w: i64, h: i64) -> Vec<Object> {
        let slot = self.slots[page];
        self.slots[page] += 1;
        rect(36 + (slot % 3) * 190, 750 - (slot / 3) * 14, w, h)
    }

    fn add_widget(&mut self, page: usize, mut dict: Dictionary) -> ObjectId {
        dict.set("Type", "Annot");
        dict.set("Subtype", "Widget");
        let id = self.doc.add_object(dict);
        self.annots[page].push(Object::Reference(id));
        self.fields.push(Object::Reference(id));
        self.widget_count += 1;
        id
    }

    pub fn text(&mut self, page: usize, name: &str) -> ObjectId {
        let ap = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "BBox" => rect(0, 0, 180, 12),
            },
            b"/Tx BMC EMC".to_vec(),
        ));
        let dict = dictionary! {
            "FT" => "Tx",
            "T" => Object::string_literal(name),
            "DA" => Object::string_literal("/Helv 0 Tf 0 g"),
            "Rect" => self.next_rect(page, 180, 12),
            "AP" => dictionary! { "N" => ap },
        };
        self.add_widget(page, dict)
    }

    pub fn checkbox(&mut self, page: usize, name: &str) -> ObjectId {
        let on = self.doc.add_object(Stream::new(
            dictionary! { "BBox" => rect(0, 0, 10, 10) },
            b"0 0 m 10 10 l S".to_vec(),
        ));
        let off = self.doc.add_object(Stream::new(
            dictionary! { "BBox" => rect(0, 0, 10, 10) },
            Vec::new(),
        ));
        let dict = dictionary! {
            "FT" => "Btn",
            "T" => Object::string_literal(name),
            "V" => "Off",
            "AS" => "Off",
            "Rect" => self.next_rect(page, 10, 10),
            "AP" => dictionary! { "N" => dictionary! { "Yes" => on, "Off" => off } },
        };
        self.add_widget(page, dict)
    }

    pub fn build(mut self) -> Document {
        let content_id = self.doc.add_object(Stream::new(
            dictionary! {},
            b"BT /F1 10 Tf 36 770 Td (COMMERCIAL INSURANCE APPLICATION) Tj ET".to_vec(),
        ));
        let font_id = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let mut kids = Vec::new();
        for annots in std::mem::take(&mut self.annots) {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            };
            if !annots.is_empty() {
                page.set("Annots", annots);
            }
            kids.push(Object::Reference(self.doc.add_object(page)));
        }
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(count),
                "MediaBox" => rect(0, 0, 612, 792),
            }),
        );
        let acroform = self.doc.add_object(dictionary! {
            "Fields" => std::mem::take(&mut self.fields),
            "DA" => Object::string_literal("/Helv 0 Tf 0 g"),
        });
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
            "AcroForm" => acroform,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc
    }

    pub fn write_to(self, path: &Path) {
        let mut doc = self.build();
        doc.save(path).unwrap();
    }
}

/// Every field the filler can write, plus [`UNUSED_FIELD`].
///
/// Checkbox widgets: the legal-entity group, the line-of-business
/// selectors, the no-prior-losses indicator and every plain field that is
/// filled with a boolean. Everything else is a text widget.
pub fn acord_template() -> TemplateBuilder {
    let mut b = TemplateBuilder::new();
    let sample = synthesize(0, effective(), &mut StdRng::seed_from_u64(0));
    for (name, value) in &sample.fields {
        if matches!(value, InputValue::Bool(_)) {
            b.checkbox(page_of(name), name);
        } else {
            b.text(page_of(name), name);
        }
    }
    for entity in LegalEntity::ALL {
        b.checkbox(0, entity.field_name());
    }
    for line in &LINES_OF_BUSINESS {
        b.checkbox(0, line.checkbox);
        b.text(0, line.premium);
    }
    b.checkbox(3, NO_PRIOR_LOSSES);
    for row in &LOSS_ROWS {
        for name in [
            row.occurrence_date,
            row.line_of_business,
            row.description,
            row.claim_date,
            row.paid,
            row.reserved,
            row.subrogation,
            row.open,
        ] {
            b.text(3, name);
        }
    }
    b.text(3, LOSS_TOTAL);
    b.text(1, UNUSED_FIELD);
    b
}

pub fn open_template() -> FormDocument {
    FormDocument::from_document(acord_template().build()).unwrap()
}

/// Current value of every widget, keyed by name.
pub fn widget_values(doc: &FormDocument) -> HashMap<String, Option<String>> {
    doc.form_widgets()
        .unwrap()
        .into_iter()
        .map(|w| (w.name, w.value))
        .collect()
}
