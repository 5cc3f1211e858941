//! Secondary index evaluation for the in-memory backend.
//!
//! An [`IndexSpec`](prefstore_core::backend::IndexSpec) names a dotted field
//! path; this module extracts the values a record contributes under that path
//! and compares them against a probe value.

use bson::Bson;

use prefstore_core::backend::IndexSpec;

/// Collects the index entries a document contributes under `spec`.
///
/// Walks the dotted path segment by segment. When `multi` is set, an array
/// met along the path (or at its end) fans out to one entry per element; a
/// missing segment contributes nothing.
pub(crate) fn index_entries<'a>(document: &'a Bson, spec: &IndexSpec) -> Vec<&'a Bson> {
    let segments = spec.field.split('.').collect::<Vec<_>>();
    let mut entries = Vec::new();

    collect(document, &segments, spec.multi, &mut entries);

    entries
}

fn collect<'a>(value: &'a Bson, segments: &[&str], multi: bool, out: &mut Vec<&'a Bson>) {
    if multi {
        if let Bson::Array(items) = value {
            for item in items {
                collect(item, segments, multi, out);
            }
            return;
        }
    }

    match segments.split_first() {
        None => out.push(value),
        Some((segment, rest)) => {
            if let Bson::Document(doc) = value {
                if let Some(next) = doc.get(segment) {
                    collect(next, rest, multi, out);
                }
            }
        }
    }
}

/// Value equality for index probes.
///
/// Numeric BSON values are compared by value rather than representation, so
/// an `Int32` entry matches an `Int64` probe. Everything else falls back to
/// structural equality.
pub(crate) fn bson_eq(left: &Bson, right: &Bson) -> bool {
    if let (Some(l), Some(r)) = (as_number(left), as_number(right)) {
        return l == r;
    }

    match (left, right) {
        (Bson::Array(l), Bson::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| bson_eq(a, b))
        }
        (Bson::Document(l), Bson::Document(r)) => {
            l.len() == r.len()
                && l.iter()
                    .all(|(k, v)| r.get(k).is_some_and(|w| bson_eq(v, w)))
        }
        _ => left == right,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(*v as f64),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}
