//! The tag aggregator (spec.md §2, §4.8): buckets operations by tag in
//! declaration order.

use indexmap::IndexMap;

use crate::document::Value;
use crate::model::Operation;

/// Groups operations by tag. Bucket order follows the document's top-level
/// `tags` array; any tag used by an operation but absent from that array is
/// appended afterward, in order of first appearance. A tag with no
/// operations is never present as a key (spec.md §4.8: "tags that have zero
/// operations after filtering are omitted").
pub fn group_by_tag<'a>(operations: &'a [Operation], declared_tags: &[Value]) -> IndexMap<String, Vec<&'a Operation>> {
	let mut buckets: IndexMap<String, Vec<&Operation>> = IndexMap::new();

	for tag in declared_tags {
		if let Some(name) = tag.get("name").and_then(Value::as_str) {
			buckets.entry(name.to_string()).or_default();
		}
	}

	for op in operations {
		buckets.entry(op.tag.clone()).or_default().push(op);
	}

	buckets.retain(|_, ops| !ops.is_empty());
	buckets
}
