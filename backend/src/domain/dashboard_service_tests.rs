//! Tests for dashboard assembly and name-based lookups.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPropertyStore, PropertyStoreError};
use crate::domain::{DoorCodeId, DoorCodeSlot, ErrorCode, GroupId};

fn property(id: &str, name: &str) -> PropertyRecord {
    PropertyRecord {
        id: PropertyId::new(id),
        name: name.to_owned(),
    }
}

fn group(id: &str, property_id: &str, name: &str, links: Option<Vec<String>>) -> GroupRecord {
    GroupRecord {
        id: GroupId::new(id),
        property_id: PropertyId::new(property_id),
        name: name.to_owned(),
        template: format!("template for {name}"),
        links,
        external_ref: None,
    }
}

fn code(id: &str, property_id: &str, slot: i64) -> DoorCode {
    DoorCode {
        id: DoorCodeId::new(id),
        property_id: PropertyId::new(property_id),
        slot: DoorCodeSlot::new(slot).expect("slot in range"),
        description: String::new(),
        updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("valid"),
        last_used_at: None,
    }
}

#[fixture]
fn store() -> MockPropertyStore {
    MockPropertyStore::new()
}

fn service(store: MockPropertyStore) -> DashboardService<MockPropertyStore> {
    DashboardService::new(Arc::new(store))
}

#[rstest]
#[tokio::test]
async fn empty_store_skips_child_reads(mut store: MockPropertyStore) {
    store
        .expect_list_properties()
        .times(1)
        .return_once(|| Ok(Vec::new()));
    store.expect_list_groups().times(0);
    store.expect_list_door_codes().times(0);

    let views = service(store).get_all().await.expect("empty dashboard");
    assert!(views.is_empty());
}

#[rstest]
#[tokio::test]
async fn children_are_read_in_one_batch_each(mut store: MockPropertyStore) {
    store
        .expect_list_properties()
        .return_once(|| Ok(vec![property("p1", "Lakeview"), property("p2", "Hilltop")]));
    store
        .expect_list_groups()
        .withf(|ids| ids.len() == 2)
        .times(1)
        .return_once(|_| {
            Ok(vec![
                group("g1", "p1", "Guests", Some(vec!["https://x/1.jpg".to_owned()])),
                group("g2", "p2", "Cleaners", None),
            ])
        });
    store
        .expect_list_door_codes()
        .withf(|ids| ids.len() == 2)
        .times(1)
        .return_once(|_| Ok(vec![code("c2", "p1", 1), code("c1", "p1", 0), code("c3", "p2", 0)]));

    let views = service(store).get_all().await.expect("dashboard");

    assert_eq!(views.len(), 2);
    let lakeview = &views[0];
    assert_eq!(lakeview.name, "Lakeview");
    assert_eq!(lakeview.groups.len(), 1);
    assert_eq!(lakeview.groups[0].links, vec!["https://x/1.jpg".to_owned()]);
    let slots: Vec<u8> = lakeview.door_codes.iter().map(|c| c.slot.get()).collect();
    assert_eq!(slots, vec![0, 1]);

    let hilltop = &views[1];
    assert_eq!(hilltop.groups[0].links, Vec::<String>::new());
    assert!(
        views
            .iter()
            .flat_map(|v| v.groups.iter().map(move |g| (&v.id, &g.property_id)))
            .all(|(owner, property_id)| owner == property_id)
    );
}

#[rstest]
#[case::groups(true)]
#[case::door_codes(false)]
#[tokio::test]
async fn failing_child_read_fails_whole_request(
    mut store: MockPropertyStore,
    #[case] groups_fail: bool,
) {
    store
        .expect_list_properties()
        .return_once(|| Ok(vec![property("p1", "Lakeview")]));
    store.expect_list_groups().returning(move |_| {
        if groups_fail {
            Err(PropertyStoreError::query("groups unavailable"))
        } else {
            Ok(Vec::new())
        }
    });
    store.expect_list_door_codes().returning(move |_| {
        if groups_fail {
            Ok(Vec::new())
        } else {
            Err(PropertyStoreError::connection("door codes unavailable"))
        }
    });

    let error = service(store).get_all().await.expect_err("partial failure");
    assert_eq!(error.code(), ErrorCode::StoreError);
    assert_eq!(error.message(), "Failed to fetch data");
}

#[rstest]
#[tokio::test]
async fn groups_for_unknown_property_is_not_found(mut store: MockPropertyStore) {
    store
        .expect_find_property_by_name()
        .withf(|name| name == "Nowhere")
        .return_once(|_| Err(PropertyStoreError::not_found("property", "Nowhere")));
    store.expect_list_groups().times(0);

    let error = service(store)
        .groups_for_property("Nowhere")
        .await
        .expect_err("unknown property");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Property not found");
}

#[rstest]
#[tokio::test]
async fn groups_for_property_materialises_links(mut store: MockPropertyStore) {
    store
        .expect_find_property_by_name()
        .return_once(|_| Ok(property("p1", "Lakeview")));
    store
        .expect_list_groups()
        .withf(|ids| ids == [PropertyId::new("p1")])
        .return_once(|_| Ok(vec![group("g1", "p1", "Guests", None)]));

    let result = service(store)
        .groups_for_property("lakeview")
        .await
        .expect("groups");
    assert_eq!(result.property_name, "Lakeview");
    assert_eq!(result.groups[0].links, Vec::<String>::new());
}

#[rstest]
#[tokio::test]
async fn template_scoped_to_property(mut store: MockPropertyStore) {
    store.expect_list_groups_by_name().return_once(|_| {
        Ok(vec![
            group("g1", "p1", "Guests", None),
            group("g2", "p2", "Guests", None),
        ])
    });
    store
        .expect_find_property_by_name()
        .return_once(|_| Ok(property("p2", "Hilltop")));

    let template = service(store)
        .group_template(GroupTemplateRequest {
            group_name: "guests".to_owned(),
            property_name: Some("hilltop".to_owned()),
        })
        .await
        .expect("template");
    assert_eq!(template.group_id, GroupId::new("g2"));
    assert_eq!(template.property_name, "Hilltop");
    assert_eq!(template.template, "template for Guests");
}

#[rstest]
#[tokio::test]
async fn template_missing_in_property_is_not_found(mut store: MockPropertyStore) {
    store
        .expect_list_groups_by_name()
        .return_once(|_| Ok(vec![group("g1", "p1", "Guests", None)]));
    store
        .expect_find_property_by_name()
        .return_once(|_| Ok(property("p2", "Hilltop")));

    let error = service(store)
        .group_template(GroupTemplateRequest {
            group_name: "Guests".to_owned(),
            property_name: Some("Hilltop".to_owned()),
        })
        .await
        .expect_err("not in property");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Group not found in this property");
}

#[rstest]
#[tokio::test]
async fn ambiguous_template_without_property_is_rejected(mut store: MockPropertyStore) {
    store.expect_list_groups_by_name().return_once(|_| {
        Ok(vec![
            group("g1", "p1", "Guests", None),
            group("g2", "p2", "Guests", None),
        ])
    });
    store.expect_list_properties().times(0);

    let error = service(store)
        .group_template(GroupTemplateRequest {
            group_name: "Guests".to_owned(),
            property_name: None,
        })
        .await
        .expect_err("ambiguous");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|d| d["matches"].as_u64()),
        Some(2)
    );
}

#[rstest]
#[tokio::test]
async fn unique_template_resolves_owner_name(mut store: MockPropertyStore) {
    store
        .expect_list_groups_by_name()
        .return_once(|_| Ok(vec![group("g1", "p1", "Guests", None)]));
    store
        .expect_list_properties()
        .return_once(|| Ok(vec![property("p1", "Lakeview")]));

    let template = service(store)
        .group_template(GroupTemplateRequest {
            group_name: "Guests".to_owned(),
            property_name: None,
        })
        .await
        .expect("template");
    assert_eq!(template.property_name, "Lakeview");
}

#[rstest]
fn assemble_drops_orphaned_children() {
    let views = assemble(
        vec![property("p1", "Lakeview")],
        vec![group("g9", "p9", "Stray", None)],
        vec![code("c9", "p9", 3)],
    );
    assert_eq!(views.len(), 1);
    assert!(views[0].groups.is_empty());
    assert!(views[0].door_codes.is_empty());
}
