//! Result Transformation Tests
//!
//! ## Test Scopes
//! - **Hit shapes**: identifier promotion per resource type, dropped types.
//! - **Record values**: projections, fallback limits, labels, custom values.
//! - **Envelope**: totals, suppressed hits, missing primary response.

#[cfg(test)]
mod tests {
    use crate::backend::{BucketNode, RawHit, SearchResponse};
    use crate::config::profile::EXTENDED_FALLBACK_FIELDS;
    use crate::config::{IdentifierKey, Profile, ValueLabels};
    use crate::content::{ContentMetadata, ProjectionIndex};
    use crate::results::{normalize_hit, transform};
    use serde_json::{json, Map, Value};

    fn normalize(source: Value, projections: &ProjectionIndex, profile: &Profile) -> Option<Value> {
        normalize_hit(&RawHit::from_source(source), projections, profile)
            .map(|hit| serde_json::to_value(hit).unwrap())
    }

    fn record(namespace_id: u64, module_id: u64, values: Value) -> Value {
        json!({
            "resourceType": "compose:record",
            "_id": "501",
            "module": {"moduleId": module_id.to_string(), "name": "Leads", "handle": "leads"},
            "namespace": {"namespaceId": namespace_id.to_string(), "name": "CRM", "handle": "crm"},
            "values": values,
            "valueLabels": {"a": "Alpha", "b": "Beta"}
        })
    }

    fn ten_values() -> Value {
        let mut values = Map::new();
        for i in 0..10 {
            values.insert(format!("f{}", i), json!(i));
        }
        Value::Object(values)
    }

    fn names(hit: &Value) -> Vec<String> {
        hit["value"]["values"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap().to_string())
            .collect()
    }

    // ============================================================
    // HIT SHAPES
    // ============================================================

    #[test]
    fn test_namespace_identifier_promoted() {
        let source = json!({"resourceType": "compose:namespace", "_id": "77"});

        let hit = normalize(source.clone(), &ProjectionIndex::new(), &Profile::default()).unwrap();
        assert_eq!(hit["type"], "compose:namespace");
        assert_eq!(hit["value"], json!({"id": "77"}));

        let hit = normalize(source, &ProjectionIndex::new(), &Profile::legacy()).unwrap();
        assert_eq!(hit["value"], json!({"@id": "77"}));
    }

    #[test]
    fn test_module_identifier_promoted() {
        let source = json!({"resourceType": "compose:module", "_id": "9", "name": "Leads"});
        let hit = normalize(source, &ProjectionIndex::new(), &Profile::default()).unwrap();
        assert_eq!(hit["value"], json!({"name": "Leads", "id": "9"}));
    }

    #[test]
    fn test_user_identifier_renamed() {
        let source = json!({"resourceType": "system:user", "userID": "42", "email": "a@b.c"});
        let mut profile = Profile::default();
        profile.identifier_key = IdentifierKey::JsonLd;

        let hit = normalize(source, &ProjectionIndex::new(), &profile).unwrap();
        assert_eq!(hit["type"], "system:user");
        assert_eq!(hit["value"], json!({"email": "a@b.c", "@id": "42"}));
    }

    #[test]
    fn test_identifier_falls_back_to_hit_id() {
        let hit = RawHit {
            id: "88".to_string(),
            source: json!({"resourceType": "compose:namespace"}),
            ..RawHit::default()
        };
        let hit = normalize_hit(&hit, &ProjectionIndex::new(), &Profile::default()).unwrap();
        assert_eq!(hit.value.get("id"), Some(&json!("88")));
    }

    #[test]
    fn test_unknown_and_untyped_hits_dropped() {
        let profile = Profile::default();
        let projections = ProjectionIndex::new();

        assert!(normalize(json!({"resourceType": "system:role", "_id": "1"}), &projections, &profile).is_none());
        assert!(normalize(json!({"_id": "1"}), &projections, &profile).is_none());
        assert!(normalize(json!("not an object"), &projections, &profile).is_none());
    }

    #[test]
    fn test_resource_type_never_in_output() {
        let profile = Profile::default();
        let projections = ProjectionIndex::new();
        let sources = vec![
            json!({"resourceType": "system:user", "userID": "1"}),
            json!({"resourceType": "compose:namespace", "_id": "2"}),
            json!({"resourceType": "compose:module", "_id": "3"}),
            record(1, 2, json!({"a": 1})),
        ];

        for source in sources {
            let hit = normalize(source, &projections, &profile).unwrap();
            assert!(hit["value"].get("resourceType").is_none());
        }
    }

    // ============================================================
    // RECORD VALUES
    // ============================================================

    #[test]
    fn test_projection_bounds_exposed_fields() {
        let mut projections = ProjectionIndex::new();
        projections.insert(5, 9, vec!["a".to_string(), "b".to_string()]);

        let hit = normalize(
            record(5, 9, json!({"a": 1, "b": 2, "c": 3})),
            &projections,
            &Profile::default(),
        )
        .unwrap();

        assert_eq!(
            hit["value"]["values"],
            json!([
                {"name": "a", "label": "Alpha", "value": 1},
                {"name": "b", "label": "Beta", "value": 2}
            ])
        );
        assert_eq!(hit["value"]["id"], "501");
        assert!(hit["value"].get("_id").is_none());
        assert!(hit["value"].get("valueLabels").is_none());
    }

    #[test]
    fn test_projection_follows_configured_order() {
        let mut projections = ProjectionIndex::new();
        projections.insert(5, 9, vec!["c".to_string(), "missing".to_string(), "a".to_string()]);

        let hit = normalize(
            record(5, 9, json!({"a": 1, "b": 2, "c": 3})),
            &projections,
            &Profile::default(),
        )
        .unwrap();

        assert_eq!(names(&hit), vec!["c", "missing", "a"]);
        assert_eq!(hit["value"]["values"][1]["value"], Value::Null);
        assert_eq!(hit["value"]["values"][1]["label"], "");
    }

    #[test]
    fn test_fallback_takes_first_values() {
        let projections = ProjectionIndex::new();

        let hit = normalize(record(5, 9, ten_values()), &projections, &Profile::default()).unwrap();
        assert_eq!(names(&hit), vec!["f0", "f1", "f2", "f3", "f4"]);

        let mut profile = Profile::default();
        profile.fallback_fields = EXTENDED_FALLBACK_FIELDS;
        let hit = normalize(record(5, 9, ten_values()), &projections, &profile).unwrap();
        assert_eq!(names(&hit).len(), 7);
    }

    #[test]
    fn test_projection_of_other_module_not_applied() {
        let mut projections = ProjectionIndex::new();
        projections.insert(5, 10, vec!["f9".to_string()]);

        let hit = normalize(record(5, 9, ten_values()), &projections, &Profile::default()).unwrap();
        assert_eq!(names(&hit).len(), 5);
    }

    #[test]
    fn test_labels_omitted_when_configured() {
        let mut profile = Profile::default();
        profile.value_labels = ValueLabels::Omit;

        let hit = normalize(record(1, 2, json!({"a": 1})), &ProjectionIndex::new(), &profile).unwrap();
        assert_eq!(hit["value"]["values"], json!([{"name": "a", "value": 1}]));
    }

    #[test]
    fn test_custom_values_hold_first_array_element() {
        let hit = normalize(
            record(1, 2, json!({"a": ["x", "y"], "b": [], "c": "plain"})),
            &ProjectionIndex::new(),
            &Profile::default(),
        )
        .unwrap();

        assert_eq!(hit["value"]["customValues"], json!({"a": "x"}));
    }

    #[test]
    fn test_record_with_null_values_kept() {
        let mut source = record(5, 9, Value::Null);
        let hit = normalize(source.clone(), &ProjectionIndex::new(), &Profile::default()).unwrap();
        assert_eq!(hit["value"]["values"], json!([]));
        assert_eq!(hit["value"]["customValues"], json!({}));

        source["values"] = json!({"a": 1});
        source["valueLabels"] = Value::Null;
        let hit = normalize(source, &ProjectionIndex::new(), &Profile::default()).unwrap();
        assert_eq!(hit["value"]["values"], json!([{"name": "a", "label": "", "value": 1}]));
    }

    #[test]
    fn test_record_with_null_refs_kept() {
        let mut projections = ProjectionIndex::new();
        projections.insert(5, 9, vec!["b".to_string()]);

        let mut source = record(5, 9, json!({"a": 1, "b": 2}));
        source["module"] = Value::Null;
        let hit = normalize(source, &projections, &Profile::default()).unwrap();
        // without a module id the projection cannot apply
        assert_eq!(names(&hit), vec!["a", "b"]);

        let mut source = record(5, 9, json!({"a": 1}));
        source["namespace"] = Value::Null;
        assert!(normalize(source, &projections, &Profile::default()).is_some());

        let mut source = record(5, 9, json!({"b": 2}));
        source["module"] = json!({"moduleId": null, "name": null, "handle": null});
        source["namespace"] = json!({"namespaceId": "5", "name": null});
        assert!(normalize(source, &projections, &Profile::default()).is_some());
    }

    #[test]
    fn test_record_refs_kept_in_output() {
        let hit = normalize(record(1, 2, json!({})), &ProjectionIndex::new(), &Profile::default())
            .unwrap();
        assert_eq!(hit["value"]["module"]["handle"], "leads");
        assert_eq!(hit["value"]["namespace"]["name"], "CRM");
        assert_eq!(hit["value"]["values"], json!([]));
    }

    // ============================================================
    // ENVELOPE
    // ============================================================

    fn primary() -> SearchResponse {
        serde_json::from_value(json!({
            "hits": {
                "total": {"value": 1200, "relation": "gte"},
                "hits": [
                    {"_id": "1", "_source": {"resourceType": "compose:namespace", "_id": "1"}},
                    {"_id": "2", "_source": {"resourceType": "system:role", "_id": "2"}},
                    {"_id": "3", "_source": {"resourceType": "compose:module", "_id": "3"}}
                ]
            }
        }))
        .unwrap()
    }

    fn tree() -> Vec<BucketNode> {
        vec![BucketNode::new("compose:record", 2).with_children(
            "namespaces",
            vec![BucketNode::new("b", 1), BucketNode::new("a", 1)],
        )]
    }

    #[test]
    fn test_transform_counts_returned_hits() {
        let result = transform(
            Some(&primary()),
            &tree(),
            &ContentMetadata::default(),
            false,
            &Profile::default(),
        );

        assert_eq!(result.total.value, 1200);
        assert_eq!(result.total.op, "gte");
        assert_eq!(result.hits.len(), 2);
        assert_eq!(result.total_hits, 2);
        assert!(result.degraded.is_empty());
    }

    #[test]
    fn test_no_hits_still_returns_facets() {
        let result = transform(
            Some(&primary()),
            &tree(),
            &ContentMetadata::default(),
            true,
            &Profile::default(),
        );

        assert!(result.hits.is_empty());
        assert_eq!(result.total_hits, 0);
        let names: Vec<&str> = result.aggregations[0]
            .resource_name
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_primary_yields_empty_total() {
        let result = transform(None, &tree(), &ContentMetadata::default(), false, &Profile::default());

        assert_eq!(result.total.value, 0);
        assert_eq!(result.total.op, "eq");
        assert!(result.hits.is_empty());
        assert_eq!(result.aggregations.len(), 2);
    }

    #[test]
    fn test_serialized_envelope_shape() {
        let result = transform(None, &[], &ContentMetadata::default(), true, &Profile::default());
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["total"], json!({"value": 0, "op": "eq"}));
        assert_eq!(value["total_hits"], 0);
        assert!(value.get("degraded").is_none());
        assert_eq!(value["aggregations"][0]["resource"], "compose:namespace");
        assert_eq!(value["aggregations"][1]["name"], "Module");
    }
}
