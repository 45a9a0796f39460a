//! Small ACORD-named form written to disk for the CLI tests.

#![allow(dead_code)]

use std::path::Path;

use lopdf::{Document, Object, Stream, dictionary};

pub const TEMPLATE: &str = "Acord-125-Commercial-Insurance-Application.pdf";

pub const TEXT_FIELDS: [&str; 3] = [
    "F[0].P1[0].NamedInsured_FullName_A[0]",
    "F[0].P1[0].Policy_EffectiveDate_A[0]",
    "F[0].P4[0].LossHistory_TotalAmount_A[0]",
];

pub const CHECKBOX_FIELDS: [&str; 2] = [
    "F[0].P1[0].NamedInsured_LegalEntity_CorporationIndicator_A[0]",
    "F[0].P4[0].LossHistory_NoPriorLossesIndicator_A[0]",
];

pub const WIDGET_COUNT: usize = TEXT_FIELDS.len() + CHECKBOX_FIELDS.len();

fn rect(x: i64, y: i64, w: i64, h: i64) -> Vec<Object> {
    vec![
        Object::Integer(x),
        Object::Integer(y),
        Object::Integer(x + w),
        Object::Integer(y + h),
    ]
}

/// Single-page form with [`TEXT_FIELDS`] and [`CHECKBOX_FIELDS`].
pub fn write_template(path: &Path) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let mut annots = Vec::new();
    let mut y = 700;

    for name in TEXT_FIELDS {
        let ap = doc.add_object(Stream::new(
            dictionary! { "Type" => "XObject", "Subtype" => "Form", "BBox" => rect(0, 0, 200, 14) },
            b"/Tx BMC EMC".to_vec(),
        ));
        let id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Tx",
            "T" => Object::string_literal(name),
            "DA" => Object::string_literal("/Helv 0 Tf 0 g"),
            "Rect" => rect(72, y, 200, 14),
            "AP" => dictionary! { "N" => ap },
        });
        annots.push(Object::Reference(id));
        y -= 30;
    }
    for name in CHECKBOX_FIELDS {
        let id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Btn",
            "T" => Object::string_literal(name),
            "V" => "Off",
            "AS" => "Off",
            "Rect" => rect(72, y, 10, 10),
        });
        annots.push(Object::Reference(id));
        y -= 30;
    }

    let content_id = doc.add_object(Stream::new(dictionary! {}, b"BT ET".to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Annots" => annots.clone(),
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
            "MediaBox" => rect(0, 0, 612, 792),
        }),
    );
    let acroform = doc.add_object(dictionary! { "Fields" => annots });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => acroform,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

/// Number of widget annotations left across all pages.
pub fn widget_annotations(path: &Path) -> usize {
    let doc = Document::load(path).unwrap();
    let mut count = 0;
    for page_id in doc.get_pages().values() {
        let page = doc.get_object(*page_id).unwrap().as_dict().unwrap();
        let annots = match page.get(b"Annots") {
            Ok(Object::Array(items)) => items.clone(),
            Ok(Object::Reference(id)) => doc.get_object(*id).unwrap().as_array().unwrap().clone(),
            _ => Vec::new(),
        };
        for annot in annots {
            let dict = match annot {
                Object::Reference(id) => doc.get_object(id).unwrap().as_dict().unwrap().clone(),
                Object::Dictionary(d) => d,
                _ => continue,
            };
            if dict.get(b"Subtype").and_then(|s| s.as_name()).ok() == Some(b"Widget".as_slice()) {
                count += 1;
            }
        }
    }
    count
}
