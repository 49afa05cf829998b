//! Behavioural tests for the dashboard read and mutation flows, run against
//! the in-memory store through the domain services.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use propdesk::domain::ports::{
    AddGroupRequest, AddPropertyRequest, DashboardQuery, PropertyCommand, PropertyStore,
    PropertyStoreError, UpdateDoorCodeRequest, UpdateGroupRequest,
};
use propdesk::domain::{
    DashboardService, DoorCode, DoorCodeId, GroupContent, GroupId, GroupRecord, NewDoorCode,
    NewGroup, PropertyCommandService, PropertyId, PropertyName, PropertyRecord, PropertyView,
};
use propdesk::outbound::memory::InMemoryPropertyStore;
use rstest::{fixture, rstest};

/// Delegates to the in-memory store, counting batched child reads and
/// optionally dropping stored links to mimic a nullable column.
#[derive(Default)]
struct ObservedStore {
    inner: InMemoryPropertyStore,
    batched_reads: AtomicUsize,
    null_links: bool,
}

#[async_trait]
impl PropertyStore for ObservedStore {
    async fn probe(&self) -> Result<(), PropertyStoreError> {
        self.inner.probe().await
    }

    async fn list_properties(&self) -> Result<Vec<PropertyRecord>, PropertyStoreError> {
        self.inner.list_properties().await
    }

    async fn find_property_by_name(
        &self,
        name: &str,
    ) -> Result<PropertyRecord, PropertyStoreError> {
        self.inner.find_property_by_name(name).await
    }

    async fn list_groups(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<GroupRecord>, PropertyStoreError> {
        self.batched_reads.fetch_add(1, Ordering::SeqCst);
        let mut groups = self.inner.list_groups(property_ids).await?;
        if self.null_links {
            for group in &mut groups {
                group.links = None;
            }
        }
        Ok(groups)
    }

    async fn list_groups_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<GroupRecord>, PropertyStoreError> {
        self.inner.list_groups_by_name(name).await
    }

    async fn list_door_codes(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<DoorCode>, PropertyStoreError> {
        self.batched_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_door_codes(property_ids).await
    }

    async fn insert_property(
        &self,
        name: &PropertyName,
    ) -> Result<PropertyRecord, PropertyStoreError> {
        self.inner.insert_property(name).await
    }

    async fn insert_door_codes(
        &self,
        property_id: &PropertyId,
        codes: &[NewDoorCode],
    ) -> Result<Vec<DoorCode>, PropertyStoreError> {
        self.inner.insert_door_codes(property_id, codes).await
    }

    async fn insert_group(
        &self,
        property_id: &PropertyId,
        group: &NewGroup,
    ) -> Result<GroupRecord, PropertyStoreError> {
        self.inner.insert_group(property_id, group).await
    }

    async fn update_group(
        &self,
        id: &GroupId,
        content: &GroupContent,
    ) -> Result<GroupRecord, PropertyStoreError> {
        self.inner.update_group(id, content).await
    }

    async fn update_door_code(
        &self,
        id: &DoorCodeId,
        description: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<DoorCode, PropertyStoreError> {
        self.inner.update_door_code(id, description, updated_at).await
    }

    async fn delete_property(&self, id: &PropertyId) -> Result<(), PropertyStoreError> {
        self.inner.delete_property(id).await
    }

    async fn delete_group(&self, id: &GroupId) -> Result<(), PropertyStoreError> {
        self.inner.delete_group(id).await
    }
}

struct Desk {
    store: Arc<ObservedStore>,
    dashboard: DashboardService<ObservedStore>,
    commands: PropertyCommandService<ObservedStore>,
}

impl Desk {
    fn over(store: ObservedStore) -> Self {
        let store = Arc::new(store);
        Self {
            dashboard: DashboardService::new(store.clone()),
            commands: PropertyCommandService::new(store.clone(), Arc::new(DefaultClock)),
            store,
        }
    }

    async fn add_property(&self, name: &str) -> PropertyView {
        self.commands
            .add_property(AddPropertyRequest {
                name: name.to_owned(),
            })
            .await
            .expect("property created")
    }

    async fn add_group(&self, property_id: &PropertyId, name: &str) -> GroupId {
        self.commands
            .add_group(AddGroupRequest {
                property_id: property_id.clone(),
                name: name.to_owned(),
                external_ref: None,
            })
            .await
            .expect("group created")
            .id
    }

    async fn all(&self) -> Vec<PropertyView> {
        self.dashboard.get_all().await.expect("get_all succeeds")
    }
}

#[fixture]
fn desk() -> Desk {
    Desk::over(ObservedStore::default())
}

#[rstest]
#[case("Lakeview")]
#[case("  Harbour Loft ")]
#[case("Casa Ñandú")]
#[tokio::test]
async fn new_property_has_one_code_per_slot(desk: Desk, #[case] name: &str) {
    desk.add_property(name).await;

    let all = desk.all().await;
    assert_eq!(all.len(), 1);
    let slots: Vec<u8> = all[0].door_codes.iter().map(|code| code.slot.get()).collect();
    assert_eq!(slots, (0..11).collect::<Vec<u8>>());
    assert!(all[0].door_codes.iter().all(|code| code.property_id == all[0].id));
}

#[rstest]
#[tokio::test]
async fn deleting_property_leaves_no_orphans(desk: Desk) {
    let lakeview = desk.add_property("Lakeview").await;
    let harbour = desk.add_property("Harbour").await;
    desk.add_group(&lakeview.id, "Guests").await;
    desk.add_group(&harbour.id, "Cleaners").await;

    desk.commands
        .delete_property(&lakeview.id)
        .await
        .expect("property deleted");

    let all = desk.all().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Harbour");
    let orphans = desk
        .store
        .inner
        .list_groups(&[lakeview.id.clone()])
        .await
        .expect("groups listed");
    assert!(orphans.is_empty());
    let codes = desk
        .store
        .inner
        .list_door_codes(&[lakeview.id])
        .await
        .expect("codes listed");
    assert!(codes.is_empty());
}

#[rstest]
#[tokio::test]
async fn group_update_is_idempotent(desk: Desk) {
    let property = desk.add_property("Lakeview").await;
    let group_id = desk.add_group(&property.id, "Guests").await;
    let request = UpdateGroupRequest {
        group_id,
        template: "Welcome!".to_owned(),
        links: vec!["https://x/1.jpg".to_owned(), "https://x/2.jpg".to_owned()],
    };

    let first = desk
        .commands
        .update_group(request.clone())
        .await
        .expect("first update");
    let after_first = desk.all().await;
    let second = desk
        .commands
        .update_group(request)
        .await
        .expect("second update");

    assert_eq!(first, second);
    assert_eq!(after_first, desk.all().await);
}

#[rstest]
#[tokio::test]
async fn empty_dashboard_skips_batched_reads(desk: Desk) {
    assert!(desk.all().await.is_empty());
    assert_eq!(desk.store.batched_reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn absent_links_are_returned_as_empty_lists() {
    let desk = Desk::over(ObservedStore {
        null_links: true,
        ..ObservedStore::default()
    });
    let property = desk.add_property("Lakeview").await;
    desk.add_group(&property.id, "Guests").await;

    let all = desk.all().await;
    assert_eq!(all[0].groups.len(), 1);
    assert!(all[0].groups[0].links.is_empty());
    let json = serde_json::to_value(&all).expect("serialise view");
    assert_eq!(json[0]["whatsAppGroups"][0]["links"], serde_json::json!([]));
}

#[rstest]
#[tokio::test]
async fn lakeview_door_code_lifecycle(desk: Desk) {
    let property = desk.add_property("Lakeview").await;
    assert_eq!(property.door_codes.len(), 11);
    let first = property.door_codes[0].clone();

    desk.commands
        .update_door_code(UpdateDoorCodeRequest {
            door_code_id: first.id.clone(),
            description: "1234".to_owned(),
        })
        .await
        .expect("door code updated");

    let all = desk.all().await;
    let updated = all[0]
        .door_codes
        .iter()
        .find(|code| code.id == first.id)
        .expect("code still present");
    assert_eq!(updated.description, "1234");
    assert!(updated.updated_at >= first.updated_at);

    desk.commands
        .delete_property(&property.id)
        .await
        .expect("property deleted");
    assert!(desk.all().await.is_empty());
}

#[rstest]
#[tokio::test]
async fn guests_template_and_links_round_trip(desk: Desk) {
    let property = desk.add_property("Lakeview").await;
    let group_id = desk.add_group(&property.id, "Guests").await;

    desk.commands
        .update_group(UpdateGroupRequest {
            group_id: group_id.clone(),
            template: "Welcome!".to_owned(),
            links: vec!["https://x/1.jpg".to_owned(), "https://x/2.jpg".to_owned()],
        })
        .await
        .expect("group updated");

    let all = desk.all().await;
    let group = all[0]
        .groups
        .iter()
        .find(|group| group.id == group_id)
        .expect("group present");
    assert_eq!(group.template, "Welcome!");
    assert_eq!(group.links, vec!["https://x/1.jpg", "https://x/2.jpg"]);
}
