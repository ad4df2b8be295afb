//! Behaviour every storage adapter must share, driven through the service

use domain_items::{
    CreateItem, ItemError, ItemFilter, ItemRepository, ItemService, ItemStatus, PageRequest,
    UpdateItem,
};

fn input(name: &str, status: ItemStatus) -> CreateItem {
    CreateItem {
        name: name.to_string(),
        description: None,
        status,
    }
}

pub async fn crud_round_trip<R: ItemRepository>(service: &ItemService<R>) {
    let created = service
        .create_item(CreateItem {
            name: "Lamp".to_string(),
            description: Some("Desk lamp".to_string()),
            status: ItemStatus::Active,
        })
        .await
        .unwrap();
    let raw_id = created.id.to_string();

    let fetched = service.get_item(&raw_id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = service
        .update_item(
            &raw_id,
            UpdateItem {
                status: Some(ItemStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Lamp");
    assert_eq!(updated.description.as_deref(), Some("Desk lamp"));
    assert_eq!(updated.status, ItemStatus::Inactive);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    service.delete_item(&raw_id).await.unwrap();
    assert!(matches!(
        service.get_item(&raw_id).await,
        Err(ItemError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_item(&raw_id).await,
        Err(ItemError::NotFound(_))
    ));
}

pub async fn paging_and_filtering<R: ItemRepository>(service: &ItemService<R>) {
    for i in 0..25 {
        let status = if i % 5 == 0 {
            ItemStatus::Inactive
        } else {
            ItemStatus::Active
        };
        service
            .create_item(input(&format!("item-{i:02}"), status))
            .await
            .unwrap();
    }

    let page = service
        .list_items(ItemFilter::default(), PageRequest::new(2, 10))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 10);
    assert_eq!(page.pagination.total, 25);
    assert_eq!(page.pagination.pages, 3);

    let first = service
        .list_items(ItemFilter::default(), PageRequest::new(1, 25))
        .await
        .unwrap();
    let created: Vec<_> = first.data.iter().map(|item| item.created_at).collect();
    let mut sorted = created.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(created, sorted, "items must be newest first");

    let inactive = service
        .list_items(
            ItemFilter::with_status(ItemStatus::Inactive),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(inactive.pagination.total, 5);
    assert!(inactive
        .data
        .iter()
        .all(|item| item.status == ItemStatus::Inactive));
}

pub async fn rejects_malformed_ids<R: ItemRepository>(service: &ItemService<R>, malformed: &str) {
    assert!(matches!(
        service.get_item(malformed).await,
        Err(ItemError::InvalidIdentifier(_))
    ));
    assert!(matches!(
        service.update_item(malformed, UpdateItem::default()).await,
        Err(ItemError::InvalidIdentifier(_))
    ));
    assert!(matches!(
        service.delete_item(malformed).await,
        Err(ItemError::InvalidIdentifier(_))
    ));
}
