use std::sync::Arc;

use super::*;
use crate::application::notify::{ToastKind, ToastQueue};
use crate::application::testing::{Call, FakeApi, page_of};
use crate::domain::resources::ResourceKind;

fn controller(api: &Arc<FakeApi>, toasts: &Arc<ToastQueue>) -> AdminResourceController {
    AdminResourceController::new(
        api.clone(),
        toasts.clone(),
        ResourceKind::Testimonials.collection(),
    )
}

fn pair(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}

fn ids(controller: &AdminResourceController) -> Vec<String> {
    controller
        .records()
        .iter()
        .map(|record| record.id().to_string())
        .collect()
}

#[tokio::test]
async fn first_load_moves_from_idle_to_loaded() {
    let api = Arc::new(FakeApi::with_pages(vec![Ok(page_of(&[1, 2], 35))]));
    let toasts = Arc::new(ToastQueue::default());
    let mut screen = controller(&api, &toasts);
    assert_eq!(screen.state(), ScreenState::Idle);

    let page = screen.load().await.expect("load succeeds");
    assert_eq!(page.total_pages, 4);
    assert_eq!(screen.state(), ScreenState::Loaded);
    assert!(!screen.is_loading());
    assert_eq!(ids(&screen), vec!["1", "2"]);
    assert_eq!(api.list_queries(), vec![vec![pair("page", "1")]]);
    assert_eq!(api.list_collections(), vec!["testimonials"]);
}

#[tokio::test]
async fn filter_change_sends_next_load_to_page_one() {
    let api = Arc::new(FakeApi::with_pages(vec![
        Ok(page_of(&[1], 50)),
        Ok(page_of(&[2], 50)),
        Ok(page_of(&[3], 12)),
    ]));
    let toasts = Arc::new(ToastQueue::default());
    let mut screen = controller(&api, &toasts);

    screen.load().await.expect("initial load");
    assert!(screen.change_page(3));
    screen.load().await.expect("page 3");
    assert_eq!(screen.page_state().current_page(), 3);

    assert!(screen.set_filter("status", Some("approved")));
    assert_eq!(screen.page_state().current_page(), 1);
    screen.load().await.expect("filtered load");

    let queries = api.list_queries();
    assert_eq!(
        queries.last(),
        Some(&vec![pair("page", "1"), pair("status", "approved")])
    );
}

#[tokio::test]
async fn blank_filters_never_reach_the_query() {
    let api = Arc::new(FakeApi::default());
    let toasts = Arc::new(ToastQueue::default());
    let mut screen = controller(&api, &toasts);

    screen.set_filter("status", Some(""));
    screen.set_filter("featured", None);
    screen.set_filter("search", Some("great"));
    screen.load().await.expect("load");

    assert_eq!(
        api.list_queries(),
        vec![vec![pair("page", "1"), pair("search", "great")]]
    );
}

#[tokio::test]
async fn out_of_range_page_changes_are_no_ops() {
    let api = Arc::new(FakeApi::with_pages(vec![Ok(page_of(&[1], 30))]));
    let toasts = Arc::new(ToastQueue::default());
    let mut screen = controller(&api, &toasts);
    screen.load().await.expect("load");
    let before = screen.page_state();

    assert!(!screen.change_page(0));
    assert!(!screen.change_page(4));
    assert_eq!(screen.page_state(), before);
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn load_failure_keeps_stale_records_and_notifies() {
    let api = Arc::new(FakeApi::with_pages(vec![
        Ok(page_of(&[1, 2], 25)),
        Err(FetchError::Status {
            status: 500,
            message: "Server exploded".into(),
        }),
    ]));
    let toasts = Arc::new(ToastQueue::default());
    let mut screen = controller(&api, &toasts);
    screen.load().await.expect("initial load");

    assert!(screen.change_page(2));
    let err = screen.load().await.expect_err("second load fails");
    assert!(matches!(err, FetchError::Status { status: 500, .. }));
    assert_eq!(screen.state(), ScreenState::LoadFailed);
    assert!(!screen.is_loading());
    assert_eq!(ids(&screen), vec!["1", "2"]);

    let toasts = toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].text, "Server exploded");
}

#[tokio::test]
async fn page_zero_is_rejected_without_a_request() {
    let api = Arc::new(FakeApi::default());
    let toasts = Arc::new(ToastQueue::default());
    let mut screen = controller(&api, &toasts);

    let err = screen
        .load_with(FilterSet::new(), 0)
        .await
        .expect_err("page 0");
    assert_eq!(err, FetchError::InvalidPage);
    assert!(api.calls().is_empty());
    assert_eq!(screen.state(), ScreenState::Idle);
}

#[tokio::test]
async fn successful_mutation_reloads_same_filters_and_page() {
    let api = Arc::new(FakeApi::with_pages(vec![
        Ok(page_of(&[1], 40)),
        Ok(page_of(&[21, 22], 40)),
        Ok(page_of(&[22], 39)),
    ]));
    let toasts = Arc::new(ToastQueue::default());
    let mut screen = controller(&api, &toasts);

    screen.set_filter("status", Some("pending"));
    screen.load().await.expect("initial");
    assert!(screen.change_page(3));
    screen.load().await.expect("page 3");
    toasts.drain();

    api.set_mutation(Ok(Ack::new(Some("Testimonial approved".into()))));
    let ack = screen
        .mutate(&RecordId::from("21"), Mutation::Approve)
        .await
        .expect("approve");
    assert_eq!(ack.message.as_deref(), Some("Testimonial approved"));

    let calls = api.calls();
    assert_eq!(
        calls[calls.len() - 2],
        Call::Perform {
            id: "21".into(),
            action: "approve"
        }
    );
    assert_eq!(
        api.list_queries().last(),
        Some(&vec![pair("page", "3"), pair("status", "pending")])
    );
    assert_eq!(ids(&screen), vec!["22"]);
    assert_eq!(toasts.drain()[0].text, "Testimonial approved");
}

#[tokio::test]
async fn mutation_closes_selection_of_mutated_record() {
    let api = Arc::new(FakeApi::with_pages(vec![
        Ok(page_of(&[1, 2], 2)),
        Ok(page_of(&[1, 2], 2)),
    ]));
    let toasts = Arc::new(ToastQueue::default());
    let mut screen = controller(&api, &toasts);
    screen.load().await.expect("load");

    assert!(screen.select(&RecordId::from("2")));
    assert!(!screen.select(&RecordId::from("99")));
    assert_eq!(
        screen.selected().map(|record| record.id().to_string()),
        Some("2".into())
    );

    screen
        .mutate(&RecordId::from("2"), Mutation::Feature)
        .await
        .expect("feature");
    assert!(screen.selected().is_none());
}

#[tokio::test]
async fn rejected_delete_leaves_records_and_surfaces_message() {
    let api = Arc::new(FakeApi::with_pages(vec![Ok(page_of(&[1, 2, 3], 3))]));
    let toasts = Arc::new(ToastQueue::default());
    let mut screen = controller(&api, &toasts);
    screen.load().await.expect("load");
    toasts.drain();

    api.set_mutation(Err(MutationError::Rejected("X".into())));
    let err = screen
        .mutate(&RecordId::from("2"), Mutation::Delete(Confirmation::assumed()))
        .await
        .expect_err("delete rejected");

    assert_eq!(err.user_message(), "X");
    assert_eq!(ids(&screen), vec!["1", "2", "3"]);
    assert_eq!(screen.state(), ScreenState::Loaded);
    assert_eq!(api.list_queries().len(), 1);
    let toasts = toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].text, "X");
}

#[tokio::test]
async fn unsupported_action_fails_locally() {
    let api = Arc::new(FakeApi::default());
    let toasts = Arc::new(ToastQueue::default());
    let mut screen = AdminResourceController::new(
        api.clone(),
        toasts.clone(),
        ResourceKind::Users.collection(),
    );

    let err = screen
        .mutate(&RecordId::from("5"), Mutation::Feature)
        .await
        .expect_err("users cannot be featured");
    assert!(matches!(err, MutationError::Unsupported { .. }));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn deleting_last_record_of_last_page_falls_back_a_page() {
    let api = Arc::new(FakeApi::with_pages(vec![
        Ok(page_of(&[1], 21)),
        Ok(page_of(&[21], 21)),
        Ok(page_of(&[], 20)),
        Ok(page_of(&[11, 12], 20)),
    ]));
    let toasts = Arc::new(ToastQueue::default());
    let mut screen = controller(&api, &toasts);
    screen.load().await.expect("load");
    assert!(screen.change_page(3));
    screen.load().await.expect("page 3");

    screen
        .mutate(&RecordId::from("21"), Mutation::Delete(Confirmation::assumed()))
        .await
        .expect("delete");

    let pages: Vec<String> = api
        .list_queries()
        .iter()
        .map(|query| query[0].1.clone())
        .collect();
    assert_eq!(pages, vec!["1", "3", "3", "2"]);
    assert_eq!(screen.page_state().current_page(), 2);
    assert_eq!(screen.page_state().total_pages(), 2);
    assert_eq!(ids(&screen), vec!["11", "12"]);
}

#[test]
fn superseded_response_is_discarded() {
    let api = Arc::new(FakeApi::default());
    let toasts = Arc::new(ToastQueue::default());
    let mut screen = controller(&api, &toasts);

    let older = screen.begin_load(FilterSet::new(), 1).expect("first");
    let newer = screen
        .begin_load(FilterSet::new().with("status", Some("approved")), 1)
        .expect("second");
    assert!(newer.token() > older.token());

    let applied = screen
        .complete_load(newer, Ok(page_of(&[7], 1)))
        .expect("newer applies");
    assert_eq!(applied, LoadOutcome::Applied { clamped: false });

    let stale = screen
        .complete_load(older, Ok(page_of(&[1, 2, 3], 3)))
        .expect("older is dropped");
    assert_eq!(stale, LoadOutcome::Superseded);
    assert_eq!(ids(&screen), vec!["7"]);
    assert_eq!(screen.filters().get("status"), Some("approved"));
}

#[test]
fn confirmation_requires_explicit_yes() {
    assert!(Confirmation::from_answer("y").is_some());
    assert!(Confirmation::from_answer(" YES ").is_some());
    assert!(Confirmation::from_answer("").is_none());
    assert!(Confirmation::from_answer("nope").is_none());
}
