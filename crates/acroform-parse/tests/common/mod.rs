//! In-memory AcroForm fixtures built with lopdf.
//!
//! Widgets are stacked down the left side of each page, one every 30pt.

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

pub struct FormBuilder {
    doc: Document,
    pages_id: ObjectId,
    annots: Vec<Vec<Object>>,
    fields: Vec<Object>,
    next_slot: Vec<i64>,
}

fn rect(x: i64, y: i64, w: i64, h: i64) -> Vec<Object> {
    vec![
        Object::Integer(x),
        Object::Integer(y),
        Object::Integer(x + w),
        Object::Integer(y + h),
    ]
}

impl FormBuilder {
    pub fn new(page_count: usize) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            annots: vec![Vec::new(); page_count],
            fields: Vec::new(),
            next_slot: vec![0; page_count],
        }
    }

    fn next_rect(&mut self, page: usize, w: i64, h: i64) -> Vec<Object> {
        let slot = self.next_slot[page];
        self.next_slot[page] += 1;
        rect(72, 700 - slot * 30, w, h)
    }

    fn add_widget(&mut self, page: usize, mut dict: Dictionary, top_level: bool) -> ObjectId {
        dict.set("Type", "Annot");
        dict.set("Subtype", "Widget");
        let id = self.doc.add_object(dict);
        self.annots[page].push(Object::Reference(id));
        if top_level {
            self.fields.push(Object::Reference(id));
        }
        id
    }

    fn text_appearance(&mut self, w: i64, h: i64) -> ObjectId {
        self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "BBox" => rect(0, 0, w, h),
            },
            b"/Tx BMC EMC".to_vec(),
        ))
    }

    /// Merged text field/widget with an existing (blank) appearance.
    pub fn text(&mut self, page: usize, name: &str, value: Option<&str>) -> ObjectId {
        let ap = self.text_appearance(200, 14);
        let mut dict = dictionary! {
            "FT" => "Tx",
            "T" => Object::string_literal(name),
            "DA" => Object::string_literal("/Helv 0 Tf 0 g"),
            "Rect" => self.next_rect(page, 200, 14),
            "AP" => dictionary! { "N" => ap },
        };
        if let Some(v) = value {
            dict.set("V", Object::string_literal(v));
        }
        self.add_widget(page, dict, true)
    }

    /// Text widget flagged hidden.
    pub fn hidden_text(&mut self, page: usize, name: &str) -> ObjectId {
        let id = self.text(page, name, None);
        if let Ok(d) = self.doc.get_object_mut(id).and_then(|o| o.as_dict_mut()) {
            d.set("F", Object::Integer(2));
        }
        id
    }

    /// Merged checkbox field/widget, optionally with `/Yes` and `/Off`
    /// appearance states.
    pub fn checkbox(&mut self, page: usize, name: &str, with_appearance: bool) -> ObjectId {
        let mut dict = dictionary! {
            "FT" => "Btn",
            "T" => Object::string_literal(name),
            "V" => "Off",
            "AS" => "Off",
            "Rect" => self.next_rect(page, 10, 10),
        };
        if with_appearance {
            let on = self.doc.add_object(Stream::new(
                dictionary! { "BBox" => rect(0, 0, 10, 10) },
                b"0 0 m 10 10 l S".to_vec(),
            ));
            let off = self.doc.add_object(Stream::new(
                dictionary! { "BBox" => rect(0, 0, 10, 10) },
                Vec::new(),
            ));
            dict.set("AP", dictionary! { "N" => dictionary! { "Yes" => on, "Off" => off } });
        }
        self.add_widget(page, dict, true)
    }

    /// Combo box with `[export, display]` option pairs.
    pub fn combo(&mut self, page: usize, name: &str, options: &[(&str, &str)]) -> ObjectId {
        let opt: Vec<Object> = options
            .iter()
            .map(|(export, display)| {
                Object::Array(vec![
                    Object::string_literal(*export),
                    Object::string_literal(*display),
                ])
            })
            .collect();
        let ap = self.text_appearance(80, 14);
        let dict = dictionary! {
            "FT" => "Ch",
            "Ff" => Object::Integer(1 << 17),
            "T" => Object::string_literal(name),
            "Opt" => opt,
            "Rect" => self.next_rect(page, 80, 14),
            "AP" => dictionary! { "N" => ap },
        };
        self.add_widget(page, dict, true)
    }

    /// One text field with a widget kid on each listed page.
    pub fn shared_text(&mut self, pages: &[usize], name: &str) -> ObjectId {
        let field_id = self.doc.add_object(dictionary! {
            "FT" => "Tx",
            "T" => Object::string_literal(name),
            "DA" => Object::string_literal("/Helv 9 Tf 0 g"),
        });
        let mut kids = Vec::new();
        for &page in pages {
            let dict = dictionary! {
                "Parent" => field_id,
                "Rect" => self.next_rect(page, 150, 14),
            };
            kids.push(Object::Reference(self.add_widget(page, dict, false)));
        }
        if let Ok(d) = self.doc.get_object_mut(field_id).and_then(|o| o.as_dict_mut()) {
            d.set("Kids", kids);
        }
        self.fields.push(Object::Reference(field_id));
        field_id
    }

    /// Text widget whose `/Parent` points at an object that does not exist.
    pub fn orphan(&mut self, page: usize, name: &str) -> ObjectId {
        let ap = self.text_appearance(200, 14);
        let dict = dictionary! {
            "FT" => "Tx",
            "T" => Object::string_literal(name),
            "Parent" => Object::Reference((9999, 0)),
            "Rect" => self.next_rect(page, 200, 14),
            "AP" => dictionary! { "N" => ap },
        };
        self.add_widget(page, dict, false)
    }

    pub fn build(mut self) -> Document {
        let content_id = self.doc.add_object(Stream::new(
            dictionary! {},
            b"BT /F1 12 Tf 72 740 Td (ACORD 125) Tj ET".to_vec(),
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

    pub fn bytes(self) -> Vec<u8> {
        let mut doc = self.build();
        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }
}

/// `/V` of a dictionary as a name or decoded string.
pub fn value_of(doc: &Document, id: ObjectId) -> Option<String> {
    match doc.get_object(id).ok()?.as_dict().ok()?.get(b"V").ok()? {
        Object::Name(n) => Some(String::from_utf8_lossy(n).into_owned()),
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

/// `/AS` of a widget annotation.
pub fn appearance_state(doc: &Document, id: ObjectId) -> Option<String> {
    match doc.get_object(id).ok()?.as_dict().ok()?.get(b"AS").ok()? {
        Object::Name(n) => Some(String::from_utf8_lossy(n).into_owned()),
        _ => None,
    }
}
