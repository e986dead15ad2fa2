//! Resource path templating.
//!
//! Paths are written with `{}` placeholders (`/network_pools/{}/subnetworks`)
//! and filled with percent-encoded identifiers, one per placeholder.

/// Substitute `ids` into the `{}` placeholders of `template`, in order.
///
/// Each identifier is percent-encoded so it always stays inside its own path
/// segment. Surplus placeholders are left empty; surplus ids are ignored.
pub(crate) fn resource_path(template: &str, ids: &[&str]) -> String {
    let mut path = String::with_capacity(template.len());
    let mut ids = ids.iter();
    let mut parts = template.split("{}");

    if let Some(head) = parts.next() {
        path.push_str(head);
    }
    for part in parts {
        if let Some(id) = ids.next() {
            path.push_str(&urlencoding::encode(id));
        }
        path.push_str(part);
    }

    path
}
