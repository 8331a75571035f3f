//! Record fetcher tests: over-fetch pagination, consumer filtering and
//! namespace hiding.

use ic_client::notice::REAUTHENTICATE;
use ic_client::{api, ListView, Operation, PageRequest, RecordFetcher, RoleScope, UserQuery};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{group, list_response, role, user, users, TestEnv, GROUPS, ROLES, USERS};

#[tokio::test]
async fn test_user_page_requests_one_extra_record() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("GET"))
        .and(path(USERS))
        .and(query_param("count", "11"))
        .and(query_param("startIndex", "21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_response(users(11))))
        .expect(1)
        .mount(&env.server)
        .await;

    let client = env.client();
    let page = RecordFetcher::new(&client)
        .fetch_users(&UserQuery::new(PageRequest::new(10, 20)))
        .await?;

    assert!(page.has_next);
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.offset, 20);
    assert_eq!(page.items.last().map(|u| u.id.as_str()), Some("u-10"));
    Ok(())
}

#[tokio::test]
async fn test_short_user_page_has_no_next() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.mock_get(USERS, list_response(users(4))).await;

    let client = env.client();
    let page = RecordFetcher::new(&client)
        .fetch_users(&UserQuery::new(PageRequest::default()))
        .await?;

    assert!(!page.has_next);
    assert_eq!(page.items.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_consumer_users_are_hidden_after_paging() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    let mut resources = users(2);
    resources.push(user("c-1", "CONSUMER/alice"));
    resources.push(user("c-2", "consumer/bob"));
    env.mock_get(USERS, list_response(resources)).await;

    let client = env.client();
    let page = RecordFetcher::new(&client)
        .fetch_users(&UserQuery::new(PageRequest::new(3, 0)))
        .await?;

    // Four raw records for a limit of three: the next-page flag is set before
    // the consumer users are dropped.
    assert!(page.has_next);
    let ids: Vec<&str> = page.items.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, ["u-1", "u-2"]);
    assert_eq!(page.items[0].primary_email(), Some("u-1@example.com"));

    let serialized = serde_json::to_value(&page.items[0])?;
    assert_eq!(serialized["emails"], json!(["u-1@example.com"]));
    Ok(())
}

#[tokio::test]
async fn test_user_filter_and_domain_are_forwarded() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("GET"))
        .and(path(USERS))
        .and(query_param("filter", "userName sw ad"))
        .and(query_param("domain", "LDAP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalResults": 0 })))
        .expect(1)
        .mount(&env.server)
        .await;

    let client = env.client();
    let query = UserQuery::new(PageRequest::default())
        .with_filter(Some("userName sw ad".to_string()))
        .with_domain(Some("LDAP".to_string()));
    let page = RecordFetcher::new(&client).fetch_users(&query).await?;

    assert!(page.is_empty());
    assert!(!page.has_next);
    Ok(())
}

#[tokio::test]
async fn test_attribute_restricted_listing_requests_user_name() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("GET"))
        .and(path(USERS))
        .and(query_param("attributes", "emails,userName"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_response(vec![
            json!({ "id": "u-1", "userName": "alice", "emails": ["a@example.com"] }),
            json!({ "id": "u-2", "emails": ["b@example.com"] }),
        ])))
        .expect(1)
        .mount(&env.server)
        .await;

    let client = env.client();
    let query = UserQuery::new(PageRequest::default()).with_attributes(Some("emails".to_string()));
    let page = RecordFetcher::new(&client).fetch_users(&query).await?;

    let names: Vec<&str> = page.items.iter().map(|u| u.user_name.as_str()).collect();
    assert_eq!(names, ["alice", ""]);
    assert_eq!(page.items[1].primary_email(), Some("b@example.com"));
    Ok(())
}

#[tokio::test]
async fn test_role_scopes_over_one_listing() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.mock_get(
        ROLES,
        list_response(vec![
            role("r-1", "admin"),
            role("r-2", "Internal/everyone"),
            role("r-3", "Application/billing"),
            role("r-4", "auditor"),
        ]),
    )
    .await;

    let client = env.client();
    let fetcher = RecordFetcher::new(&client);
    let all = PageRequest::new(50, 0);

    let names = |roles: Vec<ic_model::Role>| -> Vec<String> { roles.into_iter().map(|r| r.display_name).collect() };

    let visible = fetcher.fetch_roles(RoleScope::Visible, None, all).await?;
    assert_eq!(names(visible.items), ["admin", "auditor"]);

    let application = fetcher.fetch_roles(RoleScope::Application, None, all).await?;
    assert_eq!(names(application.items), ["Application/billing"]);

    let internal = fetcher.fetch_roles(RoleScope::Internal, None, all).await?;
    assert_eq!(internal.items.len(), 3);

    let raw = api::roles::list(&client, None).await?;
    assert_eq!(raw.resources.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_groups_are_paged_locally() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.mock_get(
        GROUPS,
        list_response(vec![
            group("g-1", "ops"),
            group("g-2", "Application/portal"),
            group("g-3", "LDAP/dev"),
            group("g-4", "qa"),
        ]),
    )
    .await;

    let client = env.client();
    let fetcher = RecordFetcher::new(&client);

    let first = fetcher.fetch_groups(None, PageRequest::new(2, 0)).await?;
    assert!(first.has_next);
    assert_eq!(first.items.len(), 2);

    let second = fetcher.fetch_groups(None, PageRequest::new(2, 2)).await?;
    assert!(!second.has_next);
    assert_eq!(second.items[0].display_name, "qa");
    Ok(())
}

#[tokio::test]
async fn test_rejected_credentials_clear_the_list() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("GET"))
        .and(path(USERS))
        .respond_with(ResponseTemplate::new(401))
        .mount(&env.server)
        .await;

    let client = env.client();
    let result = RecordFetcher::new(&client)
        .fetch_users(&UserQuery::new(PageRequest::new(10, 30)))
        .await;

    let mut view = ListView::default();
    view.apply(result, Operation::FetchUsers);

    assert!(view.page.items.is_empty());
    assert!(!view.page.has_next);
    let notice = view.notice.expect("notice");
    assert_eq!(notice.description, REAUTHENTICATE);
    Ok(())
}
